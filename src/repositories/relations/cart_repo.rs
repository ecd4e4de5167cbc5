//! # 장바구니 리포지토리
//!
//! `shopping_carts` 컬렉션의 추가/제거와 장보기 목록 집계를 담당합니다.
//!
//! 집계는 MongoDB 파이프라인 한 번으로 처리합니다.
//!
//! ```text
//! shopping_carts ──$lookup──▶ recipes ──$unwind ingredients──▶ $lookup ingredients
//!        ──$group (name, measurement_unit), $sum amount──▶ $sort name, unit
//! ```

use std::collections::HashSet;
use std::sync::Arc;
use futures_util::TryStreamExt;
use mongodb::{
    IndexModel,
    bson::{self, Document, doc},
    options::IndexOptions,
};
use crate::{
    caching::redis::RedisClient,
    core::errors::AppError,
    core::registry::Repository,
    db::Database,
    domain::entities::relations::CartItem,
    domain::models::recipes::ShoppingListItem,
};
use singleton_macro::repository;

#[repository(name = "cart", collection = "shopping_carts")]
pub struct CartRepository {
    db: Arc<Database>,
    redis: Arc<RedisClient>,
}

/// 사용자 장바구니의 재료를 (이름, 단위)별로 합산하는 파이프라인
pub fn shopping_list_pipeline(user_id: i64) -> Vec<Document> {
    vec![
        doc! { "$match": { "user_id": user_id } },
        doc! {
            "$lookup": {
                "from": "recipes",
                "localField": "recipe_id",
                "foreignField": "_id",
                "as": "recipe",
            }
        },
        doc! { "$unwind": "$recipe" },
        doc! { "$unwind": "$recipe.ingredients" },
        doc! {
            "$lookup": {
                "from": "ingredients",
                "localField": "recipe.ingredients.ingredient_id",
                "foreignField": "_id",
                "as": "ingredient",
            }
        },
        doc! { "$unwind": "$ingredient" },
        doc! {
            "$group": {
                "_id": {
                    "name": "$ingredient.name",
                    "measurement_unit": "$ingredient.measurement_unit",
                },
                "amount": { "$sum": "$recipe.ingredients.amount" },
            }
        },
        doc! {
            "$project": {
                "_id": 0,
                "name": "$_id.name",
                "measurement_unit": "$_id.measurement_unit",
                "amount": 1,
            }
        },
        doc! { "$sort": { "name": 1, "measurement_unit": 1 } },
    ]
}

impl CartRepository {
    pub async fn exists(&self, user_id: i64, recipe_id: i64) -> Result<bool, AppError> {
        let found = self.collection::<CartItem>()
            .find_one(doc! { "user_id": user_id, "recipe_id": recipe_id })
            .await?;

        Ok(found.is_some())
    }

    /// 장바구니 추가 (이미 있으면 `ConflictError`)
    pub async fn add(&self, user_id: i64, recipe_id: i64) -> Result<(), AppError> {
        if self.exists(user_id, recipe_id).await? {
            return Err(AppError::ConflictError("이미 장바구니에 있는 레시피입니다".to_string()));
        }

        self.collection::<CartItem>()
            .insert_one(CartItem::new(user_id, recipe_id))
            .await
            .map_err(|e| AppError::from_write_error(e, "이미 장바구니에 있는 레시피입니다"))?;

        Ok(())
    }

    /// 장바구니에서 제거, 제거됐으면 true
    pub async fn remove(&self, user_id: i64, recipe_id: i64) -> Result<bool, AppError> {
        let result = self.collection::<CartItem>()
            .delete_one(doc! { "user_id": user_id, "recipe_id": recipe_id })
            .await?;

        Ok(result.deleted_count > 0)
    }

    pub async fn recipe_ids_for_user(&self, user_id: i64) -> Result<Vec<i64>, AppError> {
        let cursor = self.collection::<CartItem>()
            .find(doc! { "user_id": user_id })
            .await?;
        let items: Vec<CartItem> = cursor.try_collect().await?;

        Ok(items.into_iter().map(|item| item.recipe_id).collect())
    }

    /// 주어진 레시피 중 사용자 장바구니에 있는 것
    pub async fn recipe_ids_among(&self, user_id: i64, recipe_ids: &[i64]) -> Result<HashSet<i64>, AppError> {
        if recipe_ids.is_empty() {
            return Ok(HashSet::new());
        }

        let cursor = self.collection::<CartItem>()
            .find(doc! { "user_id": user_id, "recipe_id": { "$in": recipe_ids } })
            .await?;
        let items: Vec<CartItem> = cursor.try_collect().await?;

        Ok(items.into_iter().map(|item| item.recipe_id).collect())
    }

    /// 레시피 삭제 시 관련 장바구니 항목 정리
    pub async fn delete_by_recipe(&self, recipe_id: i64) -> Result<u64, AppError> {
        let result = self.collection::<CartItem>()
            .delete_many(doc! { "recipe_id": recipe_id })
            .await?;

        Ok(result.deleted_count)
    }

    /// 장보기 목록 집계 (이름, 단위 순)
    pub async fn aggregate_shopping_list(&self, user_id: i64) -> Result<Vec<ShoppingListItem>, AppError> {
        let cursor = self.collection::<CartItem>()
            .aggregate(shopping_list_pipeline(user_id))
            .await?;
        let rows: Vec<Document> = cursor.try_collect().await?;

        rows.into_iter()
            .map(|row| {
                bson::from_document::<ShoppingListItem>(row).map_err(|e| {
                    AppError::InternalError(format!("장보기 목록 변환 실패: {}", e))
                })
            })
            .collect()
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

        self.collection::<CartItem>()
            .create_indexes([pair_index, recipe_index])
            .await?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pipeline_stage_order() {
        let pipeline = shopping_list_pipeline(7);
        let stages: Vec<&str> = pipeline
            .iter()
            .map(|stage| stage.keys().next().unwrap().as_str())
            .collect();

        assert_eq!(
            stages,
            vec!["$match", "$lookup", "$unwind", "$unwind", "$lookup", "$unwind", "$group", "$project", "$sort"]
        );
        assert_eq!(pipeline[0], doc! { "$match": { "user_id": 7_i64 } });
    }

    #[test]
    fn test_group_key_is_name_and_unit() {
        let pipeline = shopping_list_pipeline(1);
        let group = pipeline[6].get_document("$group").unwrap();

        assert_eq!(
            group.get_document("_id").unwrap(),
            &doc! { "name": "$ingredient.name", "measurement_unit": "$ingredient.measurement_unit" }
        );
        assert_eq!(
            group.get_document("amount").unwrap(),
            &doc! { "$sum": "$recipe.ingredients.amount" }
        );
    }

    #[test]
    fn test_projected_row_deserializes() {
        let row = doc! { "amount": 15_i64, "name": "Salt", "measurement_unit": "g" };
        let item: ShoppingListItem = bson::from_document(row).unwrap();

        assert_eq!(item.name, "Salt");
        assert_eq!(item.amount, 15);
    }
}
