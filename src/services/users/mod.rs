//! 사용자 관리 서비스 모듈
//!
//! 회원가입, 로그인 검증, 프로필/비밀번호/아바타 관리를 제공합니다.
//!
//! ```rust,ignore
//! use crate::services::users::UserService;
//!
//! let user_service = UserService::instance();
//! let response = user_service.create_user(request).await?;
//! ```

pub mod user_service;

pub use user_service::UserService;
