//! 폐기된 JWT 관리 리포지토리
//!
//! 로그아웃한 토큰의 `jti`를 Redis에 남은 유효 시간만큼 보관하고,
//! 인증 미들웨어가 요청마다 이를 확인합니다.
//!
//! ```rust,ignore
//! use crate::repositories::tokens::TokenRepository;
//!
//! let token_repo = TokenRepository::instance();
//! token_repo.blacklist(&claims.jti, user_id, claims.exp).await?;
//! assert!(token_repo.is_blacklisted(&claims.jti).await?);
//! ```

pub mod token_repository;

pub use token_repository::TokenRepository;
