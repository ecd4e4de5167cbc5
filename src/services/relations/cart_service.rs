//! 장바구니 서비스
//!
//! 장바구니 추가/제거와 장보기 목록 문서 생성을 담당합니다.

use std::sync::Arc;
use singleton_macro::service;
use crate::{
    core::errors::AppError,
    domain::dto::recipes::RecipeShortResponse,
    domain::models::recipes::ShoppingList,
    repositories::{recipes::RecipeRepository, relations::CartRepository},
};

#[service(name = "cart")]
pub struct CartService {
    cart_repo: Arc<CartRepository>,
    recipe_repo: Arc<RecipeRepository>,
}

impl CartService {
    /// 장바구니 추가 후 레시피 요약 반환
    ///
    /// # Errors
    ///
    /// * `NotFound` - 레시피 없음
    /// * `ConflictError` - 이미 장바구니에 있음
    pub async fn add_to_cart(&self, user_id: i64, recipe_id: i64) -> Result<RecipeShortResponse, AppError> {
        let recipe = self.recipe_repo
            .find_by_id(recipe_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("레시피를 찾을 수 없습니다: {}", recipe_id)))?;

        self.cart_repo.add(user_id, recipe_id).await?;

        log::debug!("장바구니 추가 - 사용자: {}, 레시피: {}", user_id, recipe_id);
        Ok(RecipeShortResponse::from(&recipe))
    }

    /// 장바구니에서 제거 (없으면 `NotFound`)
    pub async fn remove_from_cart(&self, user_id: i64, recipe_id: i64) -> Result<(), AppError> {
        if !self.recipe_repo.exists(recipe_id).await? {
            return Err(AppError::NotFound(format!("레시피를 찾을 수 없습니다: {}", recipe_id)));
        }

        if !self.cart_repo.remove(user_id, recipe_id).await? {
            return Err(AppError::NotFound("장바구니에 없는 레시피입니다".to_string()));
        }

        log::debug!("장바구니 제거 - 사용자: {}, 레시피: {}", user_id, recipe_id);
        Ok(())
    }

    /// 장보기 목록 (빈 장바구니면 머리글만)
    pub async fn shopping_list(&self, user_id: i64) -> Result<ShoppingList, AppError> {
        let rows = self.cart_repo.aggregate_shopping_list(user_id).await?;
        let list = ShoppingList::from_items(rows);

        log::info!("장보기 목록 생성 - 사용자: {}, 항목 {}개", user_id, list.items().len());
        Ok(list)
    }
}
