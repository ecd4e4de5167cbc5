//! # Data Transfer Objects (DTO) Module
//!
//! API 경계에서 주고받는 요청/응답 구조입니다. 요청 DTO는 `validator::Validate`를
//! 구현하고, 핸들러가 `payload.validate()?`로 검증합니다.
//!
//! ```text
//! dto/
//! ├── common/    # 페이지네이션 envelope, page/limit 쿼리
//! ├── users/     # 회원가입, 로그인, 비밀번호, 아바타, 사용자/구독 응답
//! ├── tokens/    # 로그인 토큰 응답
//! ├── catalog/   # 태그, 재료 응답
//! └── recipes/   # 레시피 요청/응답, 목록 필터
//! ```
//!
//! ## 변환 패턴
//!
//! - 단순 변환은 `From<Entity> for Response`
//! - 요청자 기준 값(`is_subscribed`, `is_favorited`)이 필요한 변환은 서비스가
//!   일괄 조회한 결과를 넘겨 생성합니다.

pub mod common;
pub mod users;
pub mod tokens;
pub mod catalog;
pub mod recipes;
