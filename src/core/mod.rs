//! # Core Framework Module
//!
//! 서비스 전반이 기대는 두 가지 기반 기능을 제공합니다.
//!
//! ### [`registry`] - 의존성 주입 컨테이너
//! - `ServiceLocator`: 리포지토리/서비스 싱글톤의 생성과 보관
//! - `inventory` 기반 자동 등록 (`#[service]`, `#[repository]`)
//! - 순환 참조 감지
//!
//! ### [`errors`] - 통합 에러 처리
//! - `AppError`: 계층 공통 에러 타입
//! - `actix_web::ResponseError` 구현으로 HTTP 상태 코드 자동 매핑
//! - MongoDB 유니크 인덱스 위반 → `ConflictError` 변환
//!
//! ## 사용 패턴
//!
//! ```rust,ignore
//! use crate::core::errors::AppError;
//! use crate::services::recipes::recipe_service::RecipeService;
//!
//! #[get("/{recipe_id}")]
//! pub async fn get_recipe(
//!     recipe_id: web::Path<i64>,
//!     viewer: OptionalUser,
//! ) -> Result<HttpResponse, AppError> {
//!     let service = RecipeService::instance();
//!     let recipe = service.get_recipe(*recipe_id, viewer.user_id()).await?;
//!     Ok(HttpResponse::Ok().json(recipe))
//! }
//! ```

pub mod errors;
pub mod registry;

pub use errors::*;
pub use registry::*;
