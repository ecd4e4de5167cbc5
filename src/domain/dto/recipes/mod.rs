//! # Recipe DTOs
//!
//! - [`request`] - 생성/수정 요청과 검증 규칙
//! - [`response`] - 상세, 요약, 짧은 링크 응답
//! - [`filter`] - 목록 필터 쿼리

pub mod request;
pub mod response;
pub mod filter;

pub use request::*;
pub use response::*;
pub use filter::RecipeFilter;
