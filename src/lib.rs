//! 레시피 공유 서비스 백엔드
//!
//! 사용자가 재료와 태그를 붙인 레시피를 올리고, 다른 사람의 레시피를 즐겨찾기하거나
//! 장바구니에 담고, 작성자를 구독하며, 장바구니 재료를 합산한 장보기 목록을
//! 내려받는 REST API입니다.
//!
//! # Features
//!
//! - **레시피**: 생성/수정/삭제, 작성자, 태그, 즐겨찾기, 장바구니 필터와 페이지네이션
//! - **관계**: 즐겨찾기, 장바구니, 구독 (중복 409, 없는 항목 제거 404)
//! - **장보기 목록**: MongoDB 집계 파이프라인으로 재료 합산
//! - **짧은 링크**: 64자 알파벳 코덱 기반 `/s/{token}` 리다이렉트
//! - **인증**: bcrypt 비밀번호, HS256 JWT, Redis 토큰 폐기 목록
//! - **싱글톤 DI**: `#[repository]`, `#[service]` 매크로 기반 자동 의존성 주입
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────┐
//! │   HTTP Routes   │ ← REST API 엔드포인트, 인증 미들웨어
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │    Handlers     │ ← 요청 해석, DTO 검증
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │    Services     │ ← 권한, 존재 여부, 응답 조립
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │  Repositories   │ ← 컬렉션 단위 데이터 액세스
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │ MongoDB + Redis │ ← 저장소, 캐시, 토큰 폐기 목록
//! └─────────────────┘
//! ```
//!
//! # Examples
//!
//! ```rust,ignore
//! use recipe_service_backend::services::recipes::RecipeService;
//! use recipe_service_backend::services::relations::CartService;
//!
//! let recipe = RecipeService::instance().get_recipe(12, Some(user_id)).await?;
//! let list = CartService::instance().shopping_list(user_id).await?;
//! println!("{}", list);
//! ```

pub mod core;
pub mod config;
pub mod db;
pub mod caching;
pub mod domain;
pub mod repositories;
pub mod services;
pub mod utils;
pub mod routes;
pub mod handlers;
pub mod middlewares;
