//! JWT 인증 미들웨어
//!
//! 요청의 `Authorization` 헤더(`Bearer <jwt>` 또는 `Token <jwt>`)를 검증하고
//! [`AuthenticatedUser`](crate::domain::models::auth::AuthenticatedUser)를 request
//! extensions에 넣습니다. 헤더가 없으면 익명으로 진행하고, 헤더가 있는데 토큰이
//! 잘못됐거나 폐기됐으면 401로 끝냅니다.
//!
//! ```rust,ignore
//! App::new().service(
//!     web::scope("/api")
//!         .wrap(AuthMiddleware)
//!         .configure(configure_api_routes)
//! )
//! ```
//!
//! 쓰기 엔드포인트는 `AuthenticatedUser` 추출자로 로그인 여부를 강제하고,
//! 조회 엔드포인트는 `OptionalUser`로 뷰어 기준 필드를 계산합니다.

use std::future::{ready, Ready};
use std::rc::Rc;

use actix_web::{
    dev::{Service, ServiceRequest, ServiceResponse, Transform},
    Error, Result,
    body::EitherBody,
};
use crate::middlewares::auth_inner::AuthMiddlewareService;

pub struct AuthMiddleware;

impl<S, B> Transform<S, ServiceRequest> for AuthMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Transform = AuthMiddlewareService<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(AuthMiddlewareService {
            service: Rc::new(service),
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{http::StatusCode, test, web, App, HttpResponse};
    use crate::domain::models::auth::AuthenticatedUser;

    async fn ok() -> HttpResponse {
        HttpResponse::Ok().finish()
    }

    async fn me(user: AuthenticatedUser) -> HttpResponse {
        HttpResponse::Ok().json(user.user_id)
    }

    #[actix_web::test]
    async fn test_anonymous_request_passes() {
        let app = test::init_service(
            App::new()
                .wrap(AuthMiddleware)
                .route("/", web::get().to(ok)),
        )
        .await;

        let resp = test::call_service(&app, test::TestRequest::get().uri("/").to_request()).await;
        assert_eq!(resp.status(), StatusCode::OK);
    }

    #[actix_web::test]
    async fn test_anonymous_request_to_login_route_is_unauthorized() {
        let app = test::init_service(
            App::new()
                .wrap(AuthMiddleware)
                .route("/me", web::get().to(me)),
        )
        .await;

        let resp = test::call_service(&app, test::TestRequest::get().uri("/me").to_request()).await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

        let body: serde_json::Value = test::read_body_json(resp).await;
        assert!(body["error"].is_string());
    }

    #[actix_web::test]
    async fn test_unknown_scheme_is_unauthorized() {
        let app = test::init_service(
            App::new()
                .wrap(AuthMiddleware)
                .route("/", web::get().to(ok)),
        )
        .await;

        let req = test::TestRequest::get()
            .uri("/")
            .insert_header(("Authorization", "Basic dXNlcjpwYXNz"))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    }
}
