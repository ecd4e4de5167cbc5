//! 즐겨찾기 리포지토리

use std::collections::HashSet;
use std::sync::Arc;
use futures_util::TryStreamExt;
use mongodb::{IndexModel, bson::doc, options::IndexOptions};
use crate::{
    caching::redis::RedisClient,
    core::errors::AppError,
    core::registry::Repository,
    db::Database,
    domain::entities::relations::Favorite,
};
use singleton_macro::repository;

#[repository(name = "favorite", collection = "favorites")]
pub struct FavoriteRepository {
    db: Arc<Database>,
    redis: Arc<RedisClient>,
}

impl FavoriteRepository {
    pub async fn exists(&self, user_id: i64, recipe_id: i64) -> Result<bool, AppError> {
        let found = self.collection::<Favorite>()
            .find_one(doc! { "user_id": user_id, "recipe_id": recipe_id })
            .await?;

        Ok(found.is_some())
    }

    /// 즐겨찾기 추가 (이미 있으면 `ConflictError`)
    pub async fn add(&self, user_id: i64, recipe_id: i64) -> Result<(), AppError> {
        if self.exists(user_id, recipe_id).await? {
            return Err(AppError::ConflictError("이미 즐겨찾기에 있는 레시피입니다".to_string()));
        }

        self.collection::<Favorite>()
            .insert_one(Favorite::new(user_id, recipe_id))
            .await
            .map_err(|e| AppError::from_write_error(e, "이미 즐겨찾기에 있는 레시피입니다"))?;

        Ok(())
    }

    /// 즐겨찾기 제거, 제거됐으면 true
    pub async fn remove(&self, user_id: i64, recipe_id: i64) -> Result<bool, AppError> {
        let result = self.collection::<Favorite>()
            .delete_one(doc! { "user_id": user_id, "recipe_id": recipe_id })
            .await?;

        Ok(result.deleted_count > 0)
    }

    pub async fn recipe_ids_for_user(&self, user_id: i64) -> Result<Vec<i64>, AppError> {
        let cursor = self.collection::<Favorite>()
            .find(doc! { "user_id": user_id })
            .await?;
        let favorites: Vec<Favorite> = cursor.try_collect().await?;

        Ok(favorites.into_iter().map(|favorite| favorite.recipe_id).collect())
    }

    /// 주어진 레시피 중 사용자가 즐겨찾기한 것
    pub async fn recipe_ids_among(&self, user_id: i64, recipe_ids: &[i64]) -> Result<HashSet<i64>, AppError> {
        if recipe_ids.is_empty() {
            return Ok(HashSet::new());
        }

        let cursor = self.collection::<Favorite>()
            .find(doc! { "user_id": user_id, "recipe_id": { "$in": recipe_ids } })
            .await?;
        let favorites: Vec<Favorite> = cursor.try_collect().await?;

        Ok(favorites.into_iter().map(|favorite| favorite.recipe_id).collect())
    }

    /// 레시피 삭제 시 관련 즐겨찾기 정리
    pub async fn delete_by_recipe(&self, recipe_id: i64) -> Result<u64, AppError> {
        let result = self.collection::<Favorite>()
            .delete_many(doc! { "recipe_id": recipe_id })
            .await?;

        Ok(result.deleted_count)
    }

    pub async fn create_indexes(&self) -> Result<(), AppError> {
        let pair_index = IndexModel::builder()
            .keys(doc! { "user_id": 1, "recipe_id": 1 })
            .options(IndexOptions::builder()
                .unique(true)
                .name("user_recipe_unique".to_string())
                .build())
            .build();

        let recipe_index = IndexModel::builder()
            .keys(doc! { "recipe_id": 1 })
            .options(IndexOptions::builder()
                .name("recipe_id".to_string())
                .build())
            .build();

        self.collection::<Favorite>()
            .create_indexes([pair_index, recipe_index])
            .await?;

        Ok(())
    }
}
