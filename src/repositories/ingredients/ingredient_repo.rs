//! 재료 리포지토리
//!
//! `(name, measurement_unit)` 복합 유니크 인덱스를 가지며, 이름 검색은
//! 대소문자를 무시한 부분 일치(`$regex`)입니다.

use std::sync::Arc;
use futures_util::TryStreamExt;
use mongodb::{
    IndexModel,
    bson::{Document, Regex, doc},
    options::IndexOptions,
};
use crate::{
    caching::{ENTITY_CACHE_TTL_SECONDS, redis::RedisClient},
    core::errors::AppError,
    core::registry::Repository,
    db::Database,
    domain::entities::ingredients::Ingredient,
    utils::string_utils::escape_regex,
};
use singleton_macro::repository;

#[repository(name = "ingredient", collection = "ingredients")]
pub struct IngredientRepository {
    db: Arc<Database>,
    redis: Arc<RedisClient>,
}

/// 이름 검색 필터 (검색어가 없으면 전체)
pub fn name_filter(name: Option<&str>) -> Document {
    match name.map(str::trim).filter(|name| !name.is_empty()) {
        Some(name) => doc! {
            "name": Regex {
                pattern: escape_regex(name),
                options: "i".to_string(),
            }
        },
        None => doc! {},
    }
}

impl IngredientRepository {
    pub async fn next_id(&self) -> Result<i64, AppError> {
        self.db.next_sequence("ingredients").await
    }

    /// 이름 검색 (이름순)
    pub async fn search(&self, name: Option<&str>) -> Result<Vec<Ingredient>, AppError> {
        let cursor = self.collection::<Ingredient>()
            .find(name_filter(name))
            .sort(doc! { "name": 1, "measurement_unit": 1 })
            .await?;

        Ok(cursor.try_collect().await?)
    }

    pub async fn find_by_id(&self, id: i64) -> Result<Option<Ingredient>, AppError> {
        let cache_key = self.cache_key(&id.to_string());

        if let Ok(Some(cached)) = self.redis.get::<Ingredient>(&cache_key).await {
            return Ok(Some(cached));
        }

        let ingredient = self.collection::<Ingredient>()
            .find_one(doc! { "_id": id })
            .await?;

        if let Some(ref ingredient) = ingredient {
            let _ = self.redis
                .set_with_expiry(&cache_key, ingredient, ENTITY_CACHE_TTL_SECONDS)
                .await;
        }

        Ok(ingredient)
    }

    /// ID 목록에 해당하는 재료 (없는 ID는 빠짐)
    pub async fn find_by_ids(&self, ids: &[i64]) -> Result<Vec<Ingredient>, AppError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let cursor = self.collection::<Ingredient>()
            .find(doc! { "_id": { "$in": ids } })
            .await?;

        Ok(cursor.try_collect().await?)
    }

    /// 재료 추가 (일괄 가져오기용)
    pub async fn insert(&self, ingredient: &Ingredient) -> Result<(), AppError> {
        self.collection::<Ingredient>()
            .insert_one(ingredient)
            .await
            .map_err(|e| AppError::from_write_error(e, "이미 존재하는 재료입니다"))?;

        let _ = self.invalidate_collection_cache(None).await;
        Ok(())
    }

    pub async fn create_indexes(&self) -> Result<(), AppError> {
        let name_unit_index = IndexModel::builder()
            .keys(doc! { "name": 1, "measurement_unit": 1 })
            .options(IndexOptions::builder()
                .unique(true)
                .name("name_unit_unique".to_string())
                .build())
            .build();

        self.collection::<Ingredient>()
            .create_indexes([name_unit_index])
            .await?;

        Ok(())
    }
}
