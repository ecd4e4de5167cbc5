//! # 사용자 리포지토리 구현
//!
//! `users` 컬렉션의 데이터 액세스 계층입니다. MongoDB를 주 저장소로,
//! Redis를 ID/이메일 단건 조회 캐시로 사용합니다.

use std::sync::Arc;
use futures_util::TryStreamExt;
use mongodb::{
    IndexModel,
    bson::{Document, doc},
    options::{FindOneAndUpdateOptions, IndexOptions, ReturnDocument},
};
use crate::{
    caching::{ENTITY_CACHE_TTL_SECONDS, redis::RedisClient},
    core::errors::AppError,
    core::registry::Repository,
    db::Database,
    domain::entities::users::user::User,
};
use singleton_macro::repository;

/// 사용자 데이터 액세스 리포지토리
///
/// ## 캐싱 전략
///
/// - **TTL**: 10분
/// - **키 패턴**: `user:{id}`, `user:email:{email}`
/// - **무효화**: 수정 시 두 키 모두 삭제
///
/// ## 인덱스
///
/// - `email` (unique), `username` (unique), `created_at` (desc)
///
/// ```rust,ignore
/// let repo = UserRepository::instance();
///
/// let created = repo.create(user).await?;
/// let found = repo.find_by_email("cook@example.com").await?;
/// let by_id = repo.find_by_id(created.id).await?;
/// ```
#[repository(name = "user", collection = "users")]
pub struct UserRepository {
    db: Arc<Database>,
    redis: Arc<RedisClient>,
}

fn email_cache_key(email: &str) -> String {
    format!("user:email:{}", email)
}

impl UserRepository {
    /// 새 사용자 ID 발급
    pub async fn next_id(&self) -> Result<i64, AppError> {
        self.db.next_sequence("users").await
    }

    /// 이메일 주소로 사용자 조회 (캐시 우선)
    pub async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        let cache_key = email_cache_key(email);

        if let Ok(Some(cached)) = self.redis.get::<User>(&cache_key).await {
            return Ok(Some(cached));
        }

        let user = self.collection::<User>()
            .find_one(doc! { "email": email })
            .await?;

        if let Some(ref user) = user {
            let _ = self.redis
                .set_with_expiry(&cache_key, user, ENTITY_CACHE_TTL_SECONDS)
                .await;
        }

        Ok(user)
    }

    /// 사용자명으로 조회 (캐시 없음)
    pub async fn find_by_username(&self, username: &str) -> Result<Option<User>, AppError> {
        Ok(self.collection::<User>()
            .find_one(doc! { "username": username })
            .await?)
    }

    /// ID로 사용자 조회 (캐시 우선)
    pub async fn find_by_id(&self, id: i64) -> Result<Option<User>, AppError> {
        let cache_key = self.cache_key(&id.to_string());

        if let Ok(Some(cached)) = self.redis.get::<User>(&cache_key).await {
            return Ok(Some(cached));
        }

        let user = self.collection::<User>()
            .find_one(doc! { "_id": id })
            .await?;

        if let Some(ref user) = user {
            let _ = self.redis
                .set_with_expiry(&cache_key, user, ENTITY_CACHE_TTL_SECONDS)
                .await;
        }

        Ok(user)
    }

    /// 여러 사용자 일괄 조회 (순서 보장 없음)
    pub async fn find_by_ids(&self, ids: &[i64]) -> Result<Vec<User>, AppError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let cursor = self.collection::<User>()
            .find(doc! { "_id": { "$in": ids } })
            .await?;

        Ok(cursor.try_collect().await?)
    }

    pub async fn exists(&self, id: i64) -> Result<bool, AppError> {
        Ok(self.find_by_id(id).await?.is_some())
    }

    /// ID 순 페이지 조회
    pub async fn find_page(&self, skip: u64, limit: i64) -> Result<Vec<User>, AppError> {
        let cursor = self.collection::<User>()
            .find(doc! {})
            .sort(doc! { "_id": 1 })
            .skip(skip)
            .limit(limit)
            .await?;

        Ok(cursor.try_collect().await?)
    }

    pub async fn count(&self) -> Result<u64, AppError> {
        Ok(self.collection::<User>().count_documents(doc! {}).await?)
    }

    /// 새 사용자 생성
    ///
    /// 이메일, 사용자명 중복은 사전 확인 후 `ConflictError`로 거절하며,
    /// 동시에 들어온 요청은 유니크 인덱스가 막습니다.
    pub async fn create(&self, user: User) -> Result<User, AppError> {
        if self.find_by_email(&user.email).await?.is_some() {
            return Err(AppError::ConflictError("이미 사용 중인 이메일입니다".to_string()));
        }

        if self.find_by_username(&user.username).await?.is_some() {
            return Err(AppError::ConflictError("이미 사용 중인 사용자명입니다".to_string()));
        }

        self.collection::<User>()
            .insert_one(&user)
            .await
            .map_err(|e| AppError::from_write_error(e, "이미 사용 중인 이메일 또는 사용자명입니다"))?;

        let _ = self.invalidate_collection_cache(None).await;

        Ok(user)
    }

    /// 필드 부분 업데이트 (`$set`), 갱신된 사용자 반환
    pub async fn update(&self, id: i64, mut update_doc: Document) -> Result<Option<User>, AppError> {
        update_doc.insert("updated_at", mongodb::bson::DateTime::now());

        let options = FindOneAndUpdateOptions::builder()
            .return_document(ReturnDocument::After)
            .build();

        let updated_user = self.collection::<User>()
            .find_one_and_update(doc! { "_id": id }, doc! { "$set": update_doc })
            .with_options(options)
            .await?;

        if let Some(ref user) = updated_user {
            self.evict(user).await;
        }

        Ok(updated_user)
    }

    /// 필드 제거 (`$unset`), 갱신된 사용자 반환
    pub async fn unset_field(&self, id: i64, field: &str) -> Result<Option<User>, AppError> {
        let options = FindOneAndUpdateOptions::builder()
            .return_document(ReturnDocument::After)
            .build();

        let mut unset = Document::new();
        unset.insert(field, "");

        let updated_user = self.collection::<User>()
            .find_one_and_update(
                doc! { "_id": id },
                doc! {
                    "$unset": unset,
                    "$set": { "updated_at": mongodb::bson::DateTime::now() },
                },
            )
            .with_options(options)
            .await?;

        if let Some(ref user) = updated_user {
            self.evict(user).await;
        }

        Ok(updated_user)
    }

    /// ID 키와 이메일 키를 한 번에 삭제
    async fn evict(&self, user: &User) {
        let keys = [self.cache_key(&user.id.to_string()), email_cache_key(&user.email)];
        if let Err(e) = self.redis.del_multiple(&keys).await {
            log::warn!("사용자 캐시 삭제 실패 - {}: {}", user.id, e);
        }
    }

    /// 인덱스 생성 (기동 시 1회)
    pub async fn create_indexes(&self) -> Result<(), AppError> {
        let email_index = IndexModel::builder()
            .keys(doc! { "email": 1 })
            .options(IndexOptions::builder()
                .unique(true)
                .name("email_unique".to_string())
                .build())
            .build();

        let username_index = IndexModel::builder()
            .keys(doc! { "username": 1 })
            .options(IndexOptions::builder()
                .unique(true)
                .name("username_unique".to_string())
                .build())
            .build();

        let created_at_index = IndexModel::builder()
            .keys(doc! { "created_at": -1 })
            .options(IndexOptions::builder()
                .name("created_at_desc".to_string())
                .build())
            .build();

        self.collection::<User>()
            .create_indexes([email_index, username_index, created_at_index])
            .await?;

        Ok(())
    }
}
