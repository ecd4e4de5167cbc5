//! API 라우트 설정 모듈
//!
//! 모든 `/api` 라우트는 [`AuthMiddleware`]로 감쌉니다. 토큰이 있으면
//! 검증해 요청 사용자를 남기고, 로그인이 필요한 핸들러는 `AuthenticatedUser`
//! 추출자로 401을 돌려줍니다.
//!
//! ```text
//! /health                         헬스체크
//! /s/{token}                      짧은 링크 리다이렉트
//! /api
//! ├── /auth/token/{login,logout}
//! ├── /users ...
//! ├── /tags, /tags/{id}
//! ├── /ingredients, /ingredients/{id}
//! └── /recipes ...
//! ```
//!
//! 같은 스코프 안에서는 등록 순서대로 매칭하므로 고정 경로
//! (`/users/me`, `/recipes/download_shopping_cart`)를 `{id}` 경로보다 먼저 둡니다.

use crate::handlers;
use crate::middlewares::AuthMiddleware;
use actix_web::web;
use serde_json::json;

pub fn configure_all_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(health_check);
    cfg.service(handlers::short_link::redirect_short_link);

    cfg.service(
        web::scope("/api")
            .wrap(AuthMiddleware)
            .configure(configure_api_routes)
    );
}

fn configure_api_routes(cfg: &mut web::ServiceConfig) {
    configure_auth_routes(cfg);
    configure_user_routes(cfg);
    configure_catalog_routes(cfg);
    configure_recipe_routes(cfg);
}

fn configure_auth_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/auth/token")
            .service(handlers::auth::login)
            .service(handlers::auth::logout)
    );
}

fn configure_user_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/users")
            .service(handlers::users::create_user)
            .service(handlers::users::list_users)
            .service(handlers::users::get_me)
            .service(handlers::users::set_avatar)
            .service(handlers::users::delete_avatar)
            .service(handlers::users::set_password)
            .service(handlers::users::subscriptions)
            .service(handlers::users::subscribe)
            .service(handlers::users::unsubscribe)
            .service(handlers::users::get_user)
    );
}

fn configure_catalog_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/tags")
            .service(handlers::catalog::list_tags)
            .service(handlers::catalog::get_tag)
    );

    cfg.service(
        web::scope("/ingredients")
            .service(handlers::catalog::list_ingredients)
            .service(handlers::catalog::get_ingredient)
    );
}

fn configure_recipe_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/recipes")
            .service(handlers::recipes::list_recipes)
            .service(handlers::recipes::create_recipe)
            .service(handlers::recipes::download_shopping_cart)
            .service(handlers::recipes::get_recipe)
            .service(handlers::recipes::update_recipe)
            .service(handlers::recipes::delete_recipe)
            .service(handlers::recipes::replace_recipe_image)
            .service(handlers::recipes::get_short_link)
            .service(handlers::recipes::add_favorite)
            .service(handlers::recipes::remove_favorite)
            .service(handlers::recipes::add_to_shopping_cart)
            .service(handlers::recipes::remove_from_shopping_cart)
    );
}

#[actix_web::get("/health")]
async fn health_check() -> actix_web::HttpResponse {
    actix_web::HttpResponse::Ok().json(json!({
        "status": "healthy",
        "service": "recipe_service",
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "features": {
            "database": "MongoDB",
            "cache": "Redis",
            "dependency_injection": "Singleton Macro"
        }
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{http::StatusCode, test, App};

    #[actix_web::test]
    async fn test_health_check() {
        let app = test::init_service(App::new().configure(configure_all_routes)).await;

        let resp = test::call_service(&app, test::TestRequest::get().uri("/health").to_request()).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["status"], "healthy");
    }

    #[actix_web::test]
    async fn test_anonymous_me_is_unauthorized() {
        let app = test::init_service(App::new().configure(configure_all_routes)).await;

        let resp = test::call_service(&app, test::TestRequest::get().uri("/api/users/me").to_request()).await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    }

    #[actix_web::test]
    async fn test_short_link_route_registered() {
        let app = test::init_service(App::new().configure(configure_all_routes)).await;

        let resp = test::call_service(&app, test::TestRequest::get().uri("/s/10").to_request()).await;
        assert_eq!(resp.status(), StatusCode::FOUND);
        assert_eq!(resp.headers().get("location").unwrap(), "/recipes/64/");
    }
}
