//! # 레시피 리포지토리
//!
//! `recipes` 컬렉션을 관리합니다. 재료 행과 태그 ID를 문서 안에 포함하므로
//! 레시피 저장과 수정은 단일 문서 쓰기입니다.
//!
//! 목록 조회 필터는 서비스 계층이 [`recipe_filter`]로 만들어 넘깁니다.

use std::sync::Arc;
use futures_util::TryStreamExt;
use mongodb::{
    IndexModel,
    bson::{Document, doc},
    options::IndexOptions,
};
use crate::{
    caching::{ENTITY_CACHE_TTL_SECONDS, redis::RedisClient},
    core::errors::AppError,
    core::registry::Repository,
    db::Database,
    domain::entities::recipes::Recipe,
};
use singleton_macro::repository;

#[repository(name = "recipe", collection = "recipes")]
pub struct RecipeRepository {
    db: Arc<Database>,
    redis: Arc<RedisClient>,
}

/// 목록 조회 조건
///
/// `recipe_ids`가 `Some`이면 해당 ID 안에서만 찾습니다 (즐겨찾기, 장바구니 필터).
#[derive(Debug, Clone, Default)]
pub struct RecipeCriteria {
    pub author_id: Option<i64>,
    pub tag_ids: Option<Vec<i64>>,
    pub recipe_ids: Option<Vec<i64>>,
}

/// 조회 조건을 MongoDB 필터로 변환
pub fn recipe_filter(criteria: &RecipeCriteria) -> Document {
    let mut filter = Document::new();

    if let Some(author_id) = criteria.author_id {
        filter.insert("author_id", author_id);
    }
    if let Some(ref tag_ids) = criteria.tag_ids {
        filter.insert("tags", doc! { "$in": tag_ids.clone() });
    }
    if let Some(ref recipe_ids) = criteria.recipe_ids {
        filter.insert("_id", doc! { "$in": recipe_ids.clone() });
    }

    filter
}

fn newest_first() -> Document {
    doc! { "pub_date": -1, "_id": -1 }
}

impl RecipeRepository {
    pub async fn next_id(&self) -> Result<i64, AppError> {
        self.db.next_sequence("recipes").await
    }

    /// 레시피 저장 (같은 작성자의 같은 이름은 `ConflictError`)
    pub async fn create(&self, recipe: Recipe) -> Result<Recipe, AppError> {
        self.collection::<Recipe>()
            .insert_one(&recipe)
            .await
            .map_err(|e| AppError::from_write_error(e, "같은 이름의 레시피가 이미 있습니다"))?;

        log::debug!("레시피 저장 - ID: {}, 작성자: {}", recipe.id, recipe.author_id);
        Ok(recipe)
    }

    /// ID로 레시피 조회 (캐시 우선)
    pub async fn find_by_id(&self, id: i64) -> Result<Option<Recipe>, AppError> {
        let cache_key = self.cache_key(&id.to_string());

        if let Ok(Some(cached)) = self.redis.get::<Recipe>(&cache_key).await {
            return Ok(Some(cached));
        }

        let recipe = self.collection::<Recipe>()
            .find_one(doc! { "_id": id })
            .await?;

        if let Some(ref recipe) = recipe {
            let _ = self.redis
                .set_with_expiry(&cache_key, recipe, ENTITY_CACHE_TTL_SECONDS)
                .await;
        }

        Ok(recipe)
    }

    /// 캐시를 거치는 존재 확인
    pub async fn exists(&self, id: i64) -> Result<bool, AppError> {
        Ok(self.find_by_id(id).await?.is_some())
    }

    /// 문서 전체 교체
    pub async fn replace(&self, recipe: &Recipe) -> Result<(), AppError> {
        let result = self.collection::<Recipe>()
            .replace_one(doc! { "_id": recipe.id }, recipe)
            .await
            .map_err(|e| AppError::from_write_error(e, "같은 이름의 레시피가 이미 있습니다"))?;

        if result.matched_count == 0 {
            return Err(AppError::NotFound(format!("레시피를 찾을 수 없습니다: {}", recipe.id)));
        }

        let _ = self.invalidate_cache(&recipe.id.to_string()).await;
        Ok(())
    }

    /// 레시피 삭제, 삭제됐으면 true
    pub async fn delete(&self, id: i64) -> Result<bool, AppError> {
        let result = self.collection::<Recipe>()
            .delete_one(doc! { "_id": id })
            .await?;

        let _ = self.invalidate_cache(&id.to_string()).await;
        Ok(result.deleted_count > 0)
    }

    /// 최신순 페이지 조회
    pub async fn find_page(&self, filter: Document, skip: u64, limit: i64) -> Result<Vec<Recipe>, AppError> {
        let cursor = self.collection::<Recipe>()
            .find(filter)
            .sort(newest_first())
            .skip(skip)
            .limit(limit)
            .await?;

        Ok(cursor.try_collect().await?)
    }

    pub async fn count(&self, filter: Document) -> Result<u64, AppError> {
        Ok(self.collection::<Recipe>().count_documents(filter).await?)
    }

    /// 작성자의 최신 레시피 (`limit`이 없으면 전체)
    pub async fn find_by_author(&self, author_id: i64, limit: Option<i64>) -> Result<Vec<Recipe>, AppError> {
        let collection = self.collection::<Recipe>();
        let mut find = collection
            .find(doc! { "author_id": author_id })
            .sort(newest_first());

        if let Some(limit) = limit {
            find = find.limit(limit);
        }

        Ok(find.await?.try_collect().await?)
    }

    pub async fn count_by_author(&self, author_id: i64) -> Result<u64, AppError> {
        self.count(doc! { "author_id": author_id }).await
    }

    pub async fn create_indexes(&self) -> Result<(), AppError> {
        let name_author_index = IndexModel::builder()
            .keys(doc! { "name": 1, "author_id": 1 })
            .options(IndexOptions::builder()
                .unique(true)
                .name("name_author_unique".to_string())
                .build())
            .build();

        let pub_date_index = IndexModel::builder()
            .keys(doc! { "pub_date": -1 })
            .options(IndexOptions::builder()
                .name("pub_date_desc".to_string())
                .build())
            .build();

        let tags_index = IndexModel::builder()
            .keys(doc! { "tags": 1 })
            .options(IndexOptions::builder()
                .name("tags".to_string())
                .build())
            .build();

        let author_index = IndexModel::builder()
            .keys(doc! { "author_id": 1, "pub_date": -1 })
            .options(IndexOptions::builder()
                .name("author_pub_date".to_string())
                .build())
            .build();

        self.collection::<Recipe>()
            .create_indexes([name_author_index, pub_date_index, tags_index, author_index])
            .await?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_criteria_matches_everything() {
        assert_eq!(recipe_filter(&RecipeCriteria::default()), doc! {});
    }

    #[test]
    fn test_full_criteria() {
        let criteria = RecipeCriteria {
            author_id: Some(3),
            tag_ids: Some(vec![1, 2]),
            recipe_ids: Some(vec![10]),
        };

        assert_eq!(
            recipe_filter(&criteria),
            doc! {
                "author_id": 3_i64,
                "tags": { "$in": [1_i64, 2_i64] },
                "_id": { "$in": [10_i64] },
            }
        );
    }

    #[test]
    fn test_empty_id_set_matches_nothing() {
        let criteria = RecipeCriteria {
            recipe_ids: Some(Vec::new()),
            ..Default::default()
        };

        assert_eq!(recipe_filter(&criteria), doc! { "_id": { "$in": [] } });
    }
}
