//! 엔티티가 아닌 도메인 모델
//!
//! ```text
//! models/
//! ├── auth/     ← 요청 단위 인증 사용자, 미들웨어 모드
//! ├── token/    ← JWT 클레임
//! ├── recipes/  ← 짧은 링크 코덱, 장보기 목록
//! └── media/    ← data-URI 이미지
//! ```

pub mod auth;
pub mod token;
pub mod recipes;
pub mod media;
