//! 토큰 로그인/로그아웃 핸들러
//!
//! | 메서드 | 경로 | 설명 | 상태 코드 |
//! |--------|------|------|-----------|
//! | `POST` | `/api/auth/token/login` | 이메일/비밀번호로 토큰 발급 | 200 OK |
//! | `POST` | `/api/auth/token/logout` | 현재 토큰 폐기 | 204 No Content |

use actix_web::{post, web, HttpResponse};
use validator::Validate;
use crate::{
    core::errors::AppError,
    domain::dto::tokens::TokenResponse,
    domain::dto::users::request::LocalLoginRequest,
    domain::models::auth::AuthenticatedUser,
    services::{auth::TokenService, users::UserService},
};

/// 로그인
///
/// ```bash
/// curl -X POST http://localhost:8080/api/auth/token/login \
///   -H "Content-Type: application/json" \
///   -d '{"email": "cook@example.com", "password": "secret-pass"}'
/// ```
///
/// ```json
/// { "auth_token": "eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9..." }
/// ```
#[post("/login")]
pub async fn login(
    payload: web::Json<LocalLoginRequest>,
) -> Result<HttpResponse, AppError> {
    payload.validate()
        .map_err(|e| AppError::ValidationError(e.to_string()))?;

    let user = UserService::instance()
        .verify_password(&payload.email, &payload.password)
        .await?;

    let auth_token = TokenService::instance().issue_token(&user)?;

    log::info!("로그인 - 사용자 ID: {}", user.id);
    Ok(HttpResponse::Ok().json(TokenResponse { auth_token }))
}

/// 로그아웃 (현재 토큰의 `jti`를 만료 시각까지 폐기)
#[post("/logout")]
pub async fn logout(
    user: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    TokenService::instance().revoke(&user).await?;

    log::info!("로그아웃 - 사용자 ID: {}", user.user_id);
    Ok(HttpResponse::NoContent().finish())
}
