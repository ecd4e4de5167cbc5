//! 비즈니스 로직을 담당하는 서비스 계층 모듈
//!
//! `#[service]` 매크로로 싱글톤 서비스를 선언합니다. 서비스는 리포지토리를 주입받아
//! 도메인 규칙(권한, 중복, 존재 여부)을 확인하고 응답 DTO를 조립합니다.
//!
//! ```rust,ignore
//! use crate::services::{recipes::RecipeService, relations::CartService};
//!
//! let recipe_service = RecipeService::instance();
//! let cart_service = CartService::instance();
//! ```

pub mod auth;
pub mod ingredients;
pub mod media;
pub mod recipes;
pub mod relations;
pub mod tags;
pub mod users;
