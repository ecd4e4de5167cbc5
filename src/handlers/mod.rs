//! # HTTP 요청 핸들러
//!
//! 핸들러는 요청 해석, DTO 검증, 서비스 호출, 응답 생성만 담당합니다.
//!
//! | 모듈 | 경로 |
//! |------|------|
//! | [`auth`] | `/api/auth/token/*` |
//! | [`users`] | `/api/users/*` |
//! | [`catalog`] | `/api/tags/*`, `/api/ingredients/*` |
//! | [`recipes`] | `/api/recipes/*` |
//! | [`short_link`] | `/s/{token}` |
//!
//! ```rust,ignore
//! #[post("")]
//! pub async fn create_recipe(
//!     user: AuthenticatedUser,
//!     payload: web::Json<RecipeCreateRequest>,
//! ) -> Result<HttpResponse, AppError> {
//!     payload.validate()
//!         .map_err(|e| AppError::ValidationError(e.to_string()))?;
//!     let response = RecipeService::instance()
//!         .create_recipe(user.user_id, payload.into_inner())
//!         .await?;
//!     Ok(HttpResponse::Created().json(response))
//! }
//! ```

pub mod auth;
pub mod catalog;
pub mod recipes;
pub mod short_link;
pub mod users;

use actix_web::{mime, HttpMessage, HttpRequest};
use serde::de::DeserializeOwned;
use url::Url;

use crate::{
    core::errors::{AppError, AppResult, ErrorContext},
    domain::models::media::ImageData,
};

/// 요청의 절대 URL (`scheme://host/path?query`)
///
/// 페이지네이션 링크와 짧은 링크를 만들 때 씁니다. 프록시 뒤에서는
/// `Forwarded`/`X-Forwarded-*` 헤더를 따릅니다.
pub fn request_url(req: &HttpRequest) -> AppResult<Url> {
    let info = req.connection_info();
    let raw = format!("{}://{}{}", info.scheme(), info.host(), req.uri());

    Url::parse(&raw).with_context(|| format!("요청 URL 해석 실패 ({})", raw))
}

/// 요청 호스트 기준 절대 URL
pub fn absolute_url(req: &HttpRequest, path: &str) -> String {
    let info = req.connection_info();
    format!("{}://{}{}", info.scheme(), info.host(), path)
}

/// 본문이 `image/*`이면 원본 파일 업로드로 해석합니다. 그 외에는 `None`.
///
/// ```bash
/// curl -X PUT http://localhost:8080/api/users/me/avatar \
///   -H "Authorization: Token <token>" \
///   -H "Content-Type: image/png" \
///   --data-binary @avatar.png
/// ```
pub fn uploaded_image(req: &HttpRequest, body: &[u8]) -> AppResult<Option<ImageData>> {
    let content_type = req
        .mime_type()
        .map_err(|e| AppError::ValidationError(format!("잘못된 Content-Type입니다: {}", e)))?;

    match content_type {
        Some(content_type) if content_type.type_() == mime::IMAGE => {
            Ok(Some(ImageData::from_upload(&content_type, body.to_vec())?))
        }
        _ => Ok(None),
    }
}

/// 원시 본문을 JSON DTO로 해석 (`JsonConfig`와 같은 400 응답)
pub fn json_body<T: DeserializeOwned>(body: &[u8]) -> AppResult<T> {
    serde_json::from_slice(body)
        .map_err(|e| AppError::ValidationError(format!("잘못된 요청 본문입니다: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::test::TestRequest;

    #[test]
    fn test_request_url_keeps_query() {
        let req = TestRequest::get()
            .uri("/api/recipes?page=2&tags=lunch")
            .insert_header(("Host", "food.example.com"))
            .to_http_request();

        let url = request_url(&req).unwrap();
        assert_eq!(url.as_str(), "http://food.example.com/api/recipes?page=2&tags=lunch");
    }

    #[test]
    fn test_absolute_url() {
        let req = TestRequest::get()
            .uri("/api/recipes/5/get-link")
            .insert_header(("Host", "food.example.com"))
            .to_http_request();

        assert_eq!(absolute_url(&req, "/s/5"), "http://food.example.com/s/5");
    }

    #[test]
    fn test_uploaded_image_from_image_body() {
        let req = TestRequest::put()
            .insert_header(("Content-Type", "image/png"))
            .to_http_request();

        let image = uploaded_image(&req, b"\x89PNG").unwrap().unwrap();
        assert_eq!(image.extension, "png");
        assert_eq!(image.bytes, b"\x89PNG");
    }

    #[test]
    fn test_json_body_is_not_an_upload() {
        let req = TestRequest::put()
            .insert_header(("Content-Type", "application/json"))
            .to_http_request();

        assert!(uploaded_image(&req, br#"{"avatar": "data:image/png;base64,aGVsbG8="}"#).unwrap().is_none());
        assert!(uploaded_image(&TestRequest::put().to_http_request(), b"").unwrap().is_none());
    }

    #[test]
    fn test_empty_upload_rejected() {
        let req = TestRequest::put()
            .insert_header(("Content-Type", "image/jpeg"))
            .to_http_request();

        assert!(matches!(uploaded_image(&req, b""), Err(AppError::ValidationError(_))));
    }

    #[test]
    fn test_json_body_errors_are_validation_errors() {
        #[derive(serde::Deserialize)]
        struct Body {
            #[allow(dead_code)]
            image: String,
        }

        assert!(json_body::<Body>(br#"{"image": "x"}"#).is_ok());
        assert!(matches!(json_body::<Body>(b"not json"), Err(AppError::ValidationError(_))));
    }
}
