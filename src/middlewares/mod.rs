//! HTTP 미들웨어
//!
//! - [`AuthMiddleware`] - JWT 검증, 폐기 토큰 차단, 요청 사용자 주입

pub mod auth_middleware;
mod auth_inner;

pub use auth_middleware::AuthMiddleware;
