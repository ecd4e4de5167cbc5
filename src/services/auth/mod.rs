//! 인증 서비스 모듈
//!
//! 이메일/비밀번호 로그인으로 HS256 JWT를 발급하고, 요청마다 검증하며,
//! 로그아웃한 토큰은 Redis 폐기 목록으로 막습니다.
//!
//! ```rust,ignore
//! use crate::services::auth::TokenService;
//!
//! let token_service = TokenService::instance();
//! let token = token_service.issue_token(&user)?;
//! let current = token_service.authenticate(&token).await?;
//! token_service.revoke(&current).await?;
//! ```

pub mod token_service;

pub use token_service::TokenService;
