//! # 애플리케이션 에러 시스템
//!
//! 레시피 서비스 전역에서 사용하는 통합 에러 타입입니다.
//! `thiserror`로 에러 메시지를 정의하고 `actix_web::ResponseError`를 구현하여
//! 핸들러에서 `?` 연산자만으로 HTTP 응답까지 변환되도록 합니다.
//!
//! ## 상태 코드 매핑
//!
//! | 변형 | 상태 코드 | 대표 상황 |
//! |------|-----------|-----------|
//! | `ValidationError` | 400 | 중복 재료/태그, 0 이하 수량, 자기 자신 구독 |
//! | `AuthenticationError` | 401 | 토큰 없음, 만료/폐기된 토큰 |
//! | `AuthorizationError` | 403 | 다른 사용자의 레시피 수정/삭제 |
//! | `NotFound` | 404 | 존재하지 않는 레시피, 없는 즐겨찾기 해제 |
//! | `ConflictError` | 409 | 이미 즐겨찾기/장바구니/구독된 대상 |
//! | 그 외 | 500 | 데이터베이스, Redis, 내부 오류 |
//!
//! ## 응답 형식
//!
//! ```json
//! { "error": "Conflict error: 이미 즐겨찾기에 추가된 레시피입니다" }
//! ```

use mongodb::error::{ErrorKind, WriteFailure};
use thiserror::Error;

/// MongoDB 유니크 인덱스 위반 에러 코드
const DUPLICATE_KEY_CODE: i32 = 11000;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Redis error: {0}")]
    RedisError(String),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Conflict error: {0}")]
    ConflictError(String),

    #[error("Authentication error: {0}")]
    AuthenticationError(String),

    #[error("Authorization error: {0}")]
    AuthorizationError(String),

    #[error("Internal server error: {0}")]
    InternalError(String),
}

impl AppError {
    /// MongoDB 쓰기 에러를 변환합니다.
    ///
    /// 애플리케이션 레벨의 존재 확인은 사전 점검일 뿐이고, 동시에 들어온
    /// 중복 삽입은 유니크 인덱스가 막습니다. 그 경우 `conflict_message`를 담은
    /// `ConflictError`로, 나머지는 `DatabaseError`로 변환합니다.
    pub fn from_write_error(error: mongodb::error::Error, conflict_message: &str) -> Self {
        if is_duplicate_key(&error) {
            AppError::ConflictError(conflict_message.to_string())
        } else {
            AppError::DatabaseError(error.to_string())
        }
    }
}

/// 유니크 인덱스 위반(E11000) 여부
pub fn is_duplicate_key(error: &mongodb::error::Error) -> bool {
    match error.kind.as_ref() {
        ErrorKind::Write(WriteFailure::WriteError(write_error)) => {
            write_error.code == DUPLICATE_KEY_CODE
        }
        ErrorKind::InsertMany(insert_error) => insert_error
            .write_errors
            .as_ref()
            .is_some_and(|errors| errors.iter().any(|e| e.code == DUPLICATE_KEY_CODE)),
        _ => false,
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        AppError::ValidationError(errors.to_string())
    }
}

impl From<mongodb::error::Error> for AppError {
    fn from(error: mongodb::error::Error) -> Self {
        AppError::DatabaseError(error.to_string())
    }
}

impl From<redis::RedisError> for AppError {
    fn from(error: redis::RedisError) -> Self {
        AppError::RedisError(error.to_string())
    }
}

impl actix_web::ResponseError for AppError {
    fn status_code(&self) -> actix_web::http::StatusCode {
        use actix_web::http::StatusCode;

        match self {
            AppError::ValidationError(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::ConflictError(_) => StatusCode::CONFLICT,
            AppError::AuthenticationError(_) => StatusCode::UNAUTHORIZED,
            AppError::AuthorizationError(_) => StatusCode::FORBIDDEN,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> actix_web::HttpResponse {
        if self.status_code().is_server_error() {
            log::error!("요청 처리 실패: {}", self);
        }

        actix_web::HttpResponse::build(self.status_code())
            .json(serde_json::json!({
                "error": self.to_string()
            }))
    }
}

pub type AppResult<T> = Result<T, AppError>;

/// 임의의 에러에 문맥 메시지를 붙여 `InternalError`로 변환하는 헬퍼
pub trait ErrorContext<T> {
    fn context(self, msg: &str) -> AppResult<T>;

    fn with_context<F>(self, f: F) -> AppResult<T>
    where
        F: FnOnce() -> String;
}

impl<T, E> ErrorContext<T> for Result<T, E>
where
    E: std::fmt::Display,
{
    fn context(self, msg: &str) -> AppResult<T> {
        self.map_err(|e| AppError::InternalError(format!("{}: {}", msg, e)))
    }

    fn with_context<F>(self, f: F) -> AppResult<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| AppError::InternalError(format!("{}: {}", f(), e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::ResponseError;
    use actix_web::http::StatusCode;
    use mongodb::bson::doc;
    use mongodb::error::WriteError;

    fn write_error(code: i32) -> mongodb::error::Error {
        let write_error: WriteError = mongodb::bson::from_document(doc! {
            "code": code,
            "errmsg": "E11000 duplicate key error collection: favorites index: user_id_1_recipe_id_1",
        })
        .unwrap();

        mongodb::error::Error::from(ErrorKind::Write(WriteFailure::WriteError(write_error)))
    }

    #[test]
    fn test_validation_error_response() {
        let error = AppError::ValidationError("재료가 중복되었습니다".to_string());

        assert_eq!(error.error_response().status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_conflict_error_response() {
        let error = AppError::ConflictError("이미 즐겨찾기에 추가된 레시피입니다".to_string());

        assert_eq!(error.error_response().status(), StatusCode::CONFLICT);
    }

    #[test]
    fn test_not_found_error_response() {
        let error = AppError::NotFound("레시피를 찾을 수 없습니다".to_string());

        assert_eq!(error.error_response().status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_authentication_error_response() {
        let error = AppError::AuthenticationError("Invalid token".to_string());

        assert_eq!(error.error_response().status(), StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn test_authorization_error_response() {
        let error = AppError::AuthorizationError("작성자만 수정할 수 있습니다".to_string());

        assert_eq!(error.error_response().status(), StatusCode::FORBIDDEN);
    }

    #[test]
    fn test_storage_errors_are_server_errors() {
        let db = AppError::DatabaseError("connection reset".to_string());
        let redis = AppError::RedisError("timeout".to_string());

        assert_eq!(db.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(redis.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_error_context_trait() {
        let result: Result<(), &str> = Err("original error");
        let app_result = result.context("Additional context");

        match app_result {
            Err(AppError::InternalError(msg)) => {
                assert!(msg.contains("Additional context"));
                assert!(msg.contains("original error"));
            }
            _ => panic!("Expected InternalError"),
        }
    }

    #[test]
    fn test_duplicate_key_becomes_conflict() {
        let error = write_error(DUPLICATE_KEY_CODE);
        assert!(is_duplicate_key(&error));

        match AppError::from_write_error(error, "이미 즐겨찾기에 추가된 레시피입니다") {
            AppError::ConflictError(msg) => assert_eq!(msg, "이미 즐겨찾기에 추가된 레시피입니다"),
            other => panic!("Expected ConflictError, got {:?}", other),
        }
    }

    #[test]
    fn test_other_write_errors_stay_database_errors() {
        // 121: 문서 검증 실패
        let error = write_error(121);
        assert!(!is_duplicate_key(&error));
        assert!(matches!(
            AppError::from_write_error(error, "중복"),
            AppError::DatabaseError(_)
        ));

        let custom = mongodb::error::Error::custom("connection closed");
        assert!(!is_duplicate_key(&custom));
    }
}
