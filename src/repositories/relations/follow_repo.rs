//! 구독 리포지토리
//!
//! `user_id`가 구독자, `author_id`가 구독 대상입니다. 자기 자신 구독 금지는
//! 서비스 계층에서 확인합니다.

use std::collections::HashSet;
use std::sync::Arc;
use futures_util::TryStreamExt;
use mongodb::{IndexModel, bson::doc, options::IndexOptions};
use crate::{
    caching::redis::RedisClient,
    core::errors::AppError,
    core::registry::Repository,
    db::Database,
    domain::entities::relations::Follow,
};
use singleton_macro::repository;

#[repository(name = "follow", collection = "follows")]
pub struct FollowRepository {
    db: Arc<Database>,
    redis: Arc<RedisClient>,
}

impl FollowRepository {
    pub async fn exists(&self, user_id: i64, author_id: i64) -> Result<bool, AppError> {
        let found = self.collection::<Follow>()
            .find_one(doc! { "user_id": user_id, "author_id": author_id })
            .await?;

        Ok(found.is_some())
    }

    /// 구독 추가 (이미 구독 중이면 `ConflictError`)
    pub async fn add(&self, user_id: i64, author_id: i64) -> Result<(), AppError> {
        if self.exists(user_id, author_id).await? {
            return Err(AppError::ConflictError("이미 구독 중인 사용자입니다".to_string()));
        }

        self.collection::<Follow>()
            .insert_one(Follow::new(user_id, author_id))
            .await
            .map_err(|e| AppError::from_write_error(e, "이미 구독 중인 사용자입니다"))?;

        Ok(())
    }

    /// 구독 해제, 해제됐으면 true
    pub async fn remove(&self, user_id: i64, author_id: i64) -> Result<bool, AppError> {
        let result = self.collection::<Follow>()
            .delete_one(doc! { "user_id": user_id, "author_id": author_id })
            .await?;

        Ok(result.deleted_count > 0)
    }

    /// 구독 중인 작성자 ID (작성자 ID 순 페이지)
    pub async fn find_author_ids(&self, user_id: i64, skip: u64, limit: i64) -> Result<Vec<i64>, AppError> {
        let cursor = self.collection::<Follow>()
            .find(doc! { "user_id": user_id })
            .sort(doc! { "author_id": 1 })
            .skip(skip)
            .limit(limit)
            .await?;
        let follows: Vec<Follow> = cursor.try_collect().await?;

        Ok(follows.into_iter().map(|follow| follow.author_id).collect())
    }

    pub async fn count_by_user(&self, user_id: i64) -> Result<u64, AppError> {
        Ok(self.collection::<Follow>()
            .count_documents(doc! { "user_id": user_id })
            .await?)
    }

    /// 주어진 작성자 중 사용자가 구독한 것
    pub async fn followed_among(&self, user_id: i64, author_ids: &[i64]) -> Result<HashSet<i64>, AppError> {
        if author_ids.is_empty() {
            return Ok(HashSet::new());
        }

        let cursor = self.collection::<Follow>()
            .find(doc! { "user_id": user_id, "author_id": { "$in": author_ids } })
            .await?;
        let follows: Vec<Follow> = cursor.try_collect().await?;

        Ok(follows.into_iter().map(|follow| follow.author_id).collect())
    }

    pub async fn create_indexes(&self) -> Result<(), AppError> {
        let pair_index = IndexModel::builder()
            .keys(doc! { "user_id": 1, "author_id": 1 })
            .options(IndexOptions::builder()
                .unique(true)
                .name("user_author_unique".to_string())
                .build())
            .build();

        self.collection::<Follow>()
            .create_indexes([pair_index])
            .await?;

        Ok(())
    }
}
