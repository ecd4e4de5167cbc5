//! 데이터 액세스 계층을 담당하는 리포지토리 모듈
//!
//! `#[repository]` 매크로로 싱글톤 리포지토리를 선언합니다. MongoDB를 주 저장소로,
//! Redis를 단건 조회 캐시와 토큰 폐기 목록으로 사용합니다.
//!
//! | 리포지토리 | 컬렉션 |
//! |------------|--------|
//! | [`users::UserRepository`] | `users` |
//! | [`tokens::TokenRepository`] | (Redis 전용) |
//! | [`tags::TagRepository`] | `tags` |
//! | [`ingredients::IngredientRepository`] | `ingredients` |
//! | [`recipes::RecipeRepository`] | `recipes` |
//! | [`relations::FavoriteRepository`] | `favorites` |
//! | [`relations::CartRepository`] | `shopping_carts` |
//! | [`relations::FollowRepository`] | `follows` |
//!
//! ```rust,ignore
//! use crate::repositories::recipes::RecipeRepository;
//!
//! let recipe_repo = RecipeRepository::instance();
//! let recipe = recipe_repo.find_by_id(12).await?;
//! ```

pub mod ingredients;
pub mod recipes;
pub mod relations;
pub mod tags;
pub mod tokens;
pub mod users;

use crate::core::errors::AppError;

fn index_result(collection: &'static str, result: Result<(), AppError>) -> (&'static str, bool) {
    if let Err(ref e) = result {
        log::error!("{} 인덱스 생성 실패: {}", collection, e);
    }
    (collection, result.is_ok())
}

/// 모든 컬렉션의 인덱스 생성 (기동 시 1회)
///
/// 실패한 컬렉션은 로그만 남기고 `(컬렉션, false)`로 보고합니다.
pub async fn ensure_indexes() -> Vec<(&'static str, bool)> {
    vec![
        index_result("users", users::UserRepository::instance().create_indexes().await),
        index_result("tags", tags::TagRepository::instance().create_indexes().await),
        index_result("ingredients", ingredients::IngredientRepository::instance().create_indexes().await),
        index_result("recipes", recipes::RecipeRepository::instance().create_indexes().await),
        index_result("favorites", relations::FavoriteRepository::instance().create_indexes().await),
        index_result("shopping_carts", relations::CartRepository::instance().create_indexes().await),
        index_result("follows", relations::FollowRepository::instance().create_indexes().await),
    ]
}
