//! Users Entity Module
//!
//! 이메일/비밀번호로 로그인하는 사용자 엔티티를 정의합니다.
//!
//! ```rust,ignore
//! use crate::domain::entities::users::user::User;
//!
//! let id = database.next_sequence("users").await?;
//! let user = User::new(
//!     id,
//!     "cook@example.com".to_string(),
//!     "cook".to_string(),
//!     "Gordon".to_string(),
//!     "Ramsay".to_string(),
//!     hashed_password,
//! );
//! ```

pub mod user;

pub use user::User;
