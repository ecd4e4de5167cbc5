//! 태그 리포지토리
//!
//! 태그는 읽기 위주이므로 단건 조회만 Redis에 캐시합니다.

use std::sync::Arc;
use futures_util::TryStreamExt;
use mongodb::{IndexModel, bson::doc, options::IndexOptions};
use crate::{
    caching::{ENTITY_CACHE_TTL_SECONDS, redis::RedisClient},
    core::errors::AppError,
    core::registry::Repository,
    db::Database,
    domain::entities::tags::Tag,
};
use singleton_macro::repository;

#[repository(name = "tag", collection = "tags")]
pub struct TagRepository {
    db: Arc<Database>,
    redis: Arc<RedisClient>,
}

impl TagRepository {
    pub async fn next_id(&self) -> Result<i64, AppError> {
        self.db.next_sequence("tags").await
    }

    /// 전체 태그 (이름순)
    pub async fn find_all(&self) -> Result<Vec<Tag>, AppError> {
        let cursor = self.collection::<Tag>()
            .find(doc! {})
            .sort(doc! { "name": 1 })
            .await?;

        Ok(cursor.try_collect().await?)
    }

    pub async fn find_by_id(&self, id: i64) -> Result<Option<Tag>, AppError> {
        let cache_key = self.cache_key(&id.to_string());

        if let Ok(Some(cached)) = self.redis.get::<Tag>(&cache_key).await {
            return Ok(Some(cached));
        }

        let tag = self.collection::<Tag>()
            .find_one(doc! { "_id": id })
            .await?;

        if let Some(ref tag) = tag {
            let _ = self.redis
                .set_with_expiry(&cache_key, tag, ENTITY_CACHE_TTL_SECONDS)
                .await;
        }

        Ok(tag)
    }

    /// ID 목록에 해당하는 태그 (이름순, 없는 ID는 빠짐)
    pub async fn find_by_ids(&self, ids: &[i64]) -> Result<Vec<Tag>, AppError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let cursor = self.collection::<Tag>()
            .find(doc! { "_id": { "$in": ids } })
            .sort(doc! { "name": 1 })
            .await?;

        Ok(cursor.try_collect().await?)
    }

    /// slug 목록에 해당하는 태그 ID (없는 slug는 무시)
    pub async fn find_ids_by_slugs(&self, slugs: &[String]) -> Result<Vec<i64>, AppError> {
        if slugs.is_empty() {
            return Ok(Vec::new());
        }

        let cursor = self.collection::<Tag>()
            .find(doc! { "slug": { "$in": slugs } })
            .await?;
        let tags: Vec<Tag> = cursor.try_collect().await?;

        Ok(tags.into_iter().map(|tag| tag.id).collect())
    }

    /// 태그 추가 (일괄 가져오기용)
    pub async fn insert(&self, tag: &Tag) -> Result<(), AppError> {
        self.collection::<Tag>()
            .insert_one(tag)
            .await
            .map_err(|e| AppError::from_write_error(e, "이미 존재하는 태그입니다"))?;

        let _ = self.invalidate_collection_cache(None).await;
        Ok(())
    }

    pub async fn create_indexes(&self) -> Result<(), AppError> {
        let name_index = IndexModel::builder()
            .keys(doc! { "name": 1 })
            .options(IndexOptions::builder()
                .unique(true)
                .name("name_unique".to_string())
                .build())
            .build();

        let slug_index = IndexModel::builder()
            .keys(doc! { "slug": 1 })
            .options(IndexOptions::builder()
                .unique(true)
                .name("slug_unique".to_string())
                .build())
            .build();

        self.collection::<Tag>()
            .create_indexes([name_index, slug_index])
            .await?;

        Ok(())
    }
}
