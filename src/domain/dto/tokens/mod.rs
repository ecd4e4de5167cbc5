//! 토큰 로그인 응답 DTO
//!
//! 로그아웃은 `Authorization` 헤더의 토큰만 사용하므로 요청 본문이 없습니다.

pub mod response;

pub use response::TokenResponse;
