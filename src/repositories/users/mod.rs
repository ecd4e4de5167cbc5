//! 사용자 리포지토리
//!
//! [`UserRepository`](user_repo::UserRepository)는 `users` 컬렉션과 ID/이메일 조회 캐시를
//! 관리합니다.

pub mod user_repo;

pub use user_repo::UserRepository;
