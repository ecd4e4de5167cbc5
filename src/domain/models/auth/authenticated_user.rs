//! 요청 단위 인증 사용자와 actix 추출자
//!
//! `AuthMiddleware`가 토큰을 검증한 뒤 request extensions에 [`AuthenticatedUser`]를
//! 넣어 두면 핸들러는 인자로 받아 씁니다.
//!
//! ```rust,ignore
//! #[post("/{id}/favorite")]
//! async fn add_favorite(user: AuthenticatedUser, path: web::Path<i64>) -> Result<HttpResponse, AppError> {
//!     // user.user_id 사용
//! }
//!
//! #[get("")]
//! async fn list_recipes(viewer: OptionalUser) -> Result<HttpResponse, AppError> {
//!     let viewer_id = viewer.user_id();
//! }
//! ```

use std::future::{ready, Ready};
use actix_web::{FromRequest, HttpMessage, HttpRequest};
use serde::{Deserialize, Serialize};

use crate::core::errors::AppError;

/// JWT 토큰에서 추출된 사용자 정보
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthenticatedUser {
    pub user_id: i64,

    pub roles: Vec<String>,

    /// 토큰 고유 ID (`jti`). 로그아웃 시 폐기 목록 키로 쓰입니다.
    pub token_id: String,

    /// 토큰 만료 시각 (Unix timestamp)
    pub expires_at: i64,
}

impl FromRequest for AuthenticatedUser {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut actix_web::dev::Payload) -> Self::Future {
        match req.extensions().get::<AuthenticatedUser>() {
            Some(user) => ready(Ok(user.clone())),
            None => ready(Err(AppError::AuthenticationError(
                "인증되지 않은 요청입니다".to_string(),
            ))),
        }
    }
}

/// 선택적 인증 사용자 추출자
///
/// 익명 요청도 허용하는 조회 엔드포인트에서 `is_favorited`, `is_subscribed` 같은
/// 뷰어 기준 필드를 계산할 때 사용합니다.
#[derive(Debug, Clone)]
pub struct OptionalUser(pub Option<AuthenticatedUser>);

impl OptionalUser {
    pub fn user_id(&self) -> Option<i64> {
        self.0.as_ref().map(|user| user.user_id)
    }
}

impl FromRequest for OptionalUser {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut actix_web::dev::Payload) -> Self::Future {
        let user = req.extensions().get::<AuthenticatedUser>().cloned();
        ready(Ok(OptionalUser(user)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::test::TestRequest;

    fn sample_user() -> AuthenticatedUser {
        AuthenticatedUser {
            user_id: 7,
            roles: vec!["user".to_string()],
            token_id: "jti-1".to_string(),
            expires_at: 0,
        }
    }

    #[actix_web::test]
    async fn test_authenticated_user_missing_is_unauthorized() {
        let req = TestRequest::default().to_http_request();
        let result = AuthenticatedUser::extract(&req).await;

        assert!(matches!(result, Err(AppError::AuthenticationError(_))));
    }

    #[actix_web::test]
    async fn test_authenticated_user_from_extensions() {
        let req = TestRequest::default().to_http_request();
        req.extensions_mut().insert(sample_user());

        let user = AuthenticatedUser::extract(&req).await.unwrap();
        assert_eq!(user.user_id, 7);
        assert_eq!(user.roles, vec!["user".to_string()]);
    }

    #[actix_web::test]
    async fn test_optional_user_allows_anonymous() {
        let req = TestRequest::default().to_http_request();
        let viewer = OptionalUser::extract(&req).await.unwrap();

        assert_eq!(viewer.user_id(), None);
    }
}
