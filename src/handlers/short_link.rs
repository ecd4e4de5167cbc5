//! 짧은 링크 리다이렉트
//!
//! `GET /s/{token}` → `302 Found`, `Location: /recipes/{id}/` (프론트엔드 경로).
//! 레시피 존재 여부는 확인하지 않으며, 없는 레시피는 프론트엔드가 처리합니다.

use actix_web::{get, http::header, web, HttpResponse};
use crate::{core::errors::AppError, domain::models::recipes::short_link};

#[get("/s/{token}")]
pub async fn redirect_short_link(path: web::Path<String>) -> Result<HttpResponse, AppError> {
    let recipe_id = short_link::recipe_id_from_token(&path)?;

    Ok(HttpResponse::Found()
        .insert_header((header::LOCATION, format!("/recipes/{}/", recipe_id)))
        .finish())
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{http::StatusCode, test, App};

    #[actix_web::test]
    async fn test_redirects_to_recipe_page() {
        let app = test::init_service(App::new().service(redirect_short_link)).await;
        let token = short_link::encode(64);

        let req = test::TestRequest::get().uri(&format!("/s/{}", token)).to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::FOUND);
        assert_eq!(resp.headers().get(header::LOCATION).unwrap(), "/recipes/64/");
    }

    #[actix_web::test]
    async fn test_invalid_token_is_bad_request() {
        let app = test::init_service(App::new().service(redirect_short_link)).await;

        let req = test::TestRequest::get().uri("/s/%21%21").to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }
}
