//! # User Data Transfer Objects Module
//!
//! 사용자, 인증 API의 요청/응답 구조입니다.
//!
//! ```text
//! users/
//! ├── request/
//! │   ├── create_user.rs    # 회원가입
//! │   └── auth_request.rs   # 로그인, 비밀번호 변경, 아바타
//! └── response/
//!     └── user_response.rs  # 사용자, 구독 목록 항목
//! ```
//!
//! ## JSON 응답 예제
//!
//! ```json
//! {
//!   "email": "cook@example.com",
//!   "id": 3,
//!   "username": "cook",
//!   "first_name": "Gordon",
//!   "last_name": "Ramsay",
//!   "is_subscribed": false,
//!   "avatar": "/media/users/avatars/3f2a9c1b7d4e.png"
//! }
//! ```

pub mod request;
pub mod response;

pub use request::*;
pub use response::*;
