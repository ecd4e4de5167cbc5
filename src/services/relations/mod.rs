//! 즐겨찾기, 장바구니, 구독 서비스
//!
//! 세 관계 모두 추가는 중복이면 `ConflictError`(409), 제거는 없으면 `NotFound`(404)입니다.

pub mod cart_service;
pub mod favorite_service;
pub mod follow_service;

pub use cart_service::CartService;
pub use favorite_service::FavoriteService;
pub use follow_service::FollowService;

/// MongoDB와 Redis가 있어야 하는 테스트입니다.
/// `MONGODB_URI`와 `REDIS_URL`이 모두 설정된 경우에만 실행되고, 아니면 바로 통과합니다.
///
/// ```bash
/// MONGODB_URI=mongodb://localhost:27017 REDIS_URL=redis://localhost:6379 cargo test relations
/// ```
#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use mongodb::bson::DateTime;
    use uuid::Uuid;
    use crate::{
        caching::redis::RedisClient,
        core::errors::AppError,
        core::registry::ServiceLocator,
        db::Database,
        domain::entities::recipes::Recipe,
        repositories::recipes::RecipeRepository,
    };

    const TEST_DATABASE: &str = "recipe_service_test";

    async fn connect_storage() -> bool {
        let (Ok(mongodb_uri), Ok(_)) = (std::env::var("MONGODB_URI"), std::env::var("REDIS_URL")) else {
            return false;
        };

        let database = Database::connect(&mongodb_uri, TEST_DATABASE).await.unwrap();
        let redis = RedisClient::new().await.unwrap();
        ServiceLocator::set(Arc::new(database));
        ServiceLocator::set(Arc::new(redis));
        true
    }

    /// 다른 실행과 겹치지 않는 양수 ID
    fn unique_id() -> i64 {
        (Uuid::new_v4().as_u128() >> 66) as i64
    }

    async fn stored_recipe() -> i64 {
        let id = unique_id();
        RecipeRepository::instance()
            .create(Recipe {
                id,
                author_id: unique_id(),
                name: format!("relation-test-{}", id),
                text: "테스트".to_string(),
                cooking_time: 5,
                image: "recipes/images/test.png".to_string(),
                ingredients: Vec::new(),
                tags: Vec::new(),
                pub_date: DateTime::now(),
            })
            .await
            .unwrap();
        id
    }

    #[actix_web::test]
    async fn test_favorite_twice_conflicts_and_missing_removal_not_found() {
        if !connect_storage().await {
            return;
        }
        let recipe_id = stored_recipe().await;
        let user_id = unique_id();
        let service = FavoriteService::instance();

        service.add_favorite(user_id, recipe_id).await.unwrap();
        assert!(matches!(
            service.add_favorite(user_id, recipe_id).await,
            Err(AppError::ConflictError(_))
        ));

        service.remove_favorite(user_id, recipe_id).await.unwrap();
        assert!(matches!(
            service.remove_favorite(user_id, recipe_id).await,
            Err(AppError::NotFound(_))
        ));

        // 없는 레시피
        assert!(matches!(
            service.remove_favorite(user_id, unique_id()).await,
            Err(AppError::NotFound(_))
        ));

        RecipeRepository::instance().delete(recipe_id).await.unwrap();
    }

    #[actix_web::test]
    async fn test_cart_twice_conflicts_and_missing_removal_not_found() {
        if !connect_storage().await {
            return;
        }
        let recipe_id = stored_recipe().await;
        let user_id = unique_id();
        let service = CartService::instance();

        service.add_to_cart(user_id, recipe_id).await.unwrap();
        assert!(matches!(
            service.add_to_cart(user_id, recipe_id).await,
            Err(AppError::ConflictError(_))
        ));

        service.remove_from_cart(user_id, recipe_id).await.unwrap();
        assert!(matches!(
            service.remove_from_cart(user_id, recipe_id).await,
            Err(AppError::NotFound(_))
        ));

        RecipeRepository::instance().delete(recipe_id).await.unwrap();
    }
}
