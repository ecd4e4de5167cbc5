//! 즐겨찾기 서비스

use std::sync::Arc;
use singleton_macro::service;
use crate::{
    core::errors::AppError,
    domain::dto::recipes::RecipeShortResponse,
    repositories::{recipes::RecipeRepository, relations::FavoriteRepository},
};

#[service(name = "favorite")]
pub struct FavoriteService {
    favorite_repo: Arc<FavoriteRepository>,
    recipe_repo: Arc<RecipeRepository>,
}

impl FavoriteService {
    /// 즐겨찾기 추가 후 레시피 요약 반환
    ///
    /// # Errors
    ///
    /// * `NotFound` - 레시피 없음
    /// * `ConflictError` - 이미 즐겨찾기에 있음
    pub async fn add_favorite(&self, user_id: i64, recipe_id: i64) -> Result<RecipeShortResponse, AppError> {
        let recipe = self.recipe_repo
            .find_by_id(recipe_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("레시피를 찾을 수 없습니다: {}", recipe_id)))?;

        self.favorite_repo.add(user_id, recipe_id).await?;

        log::debug!("즐겨찾기 추가 - 사용자: {}, 레시피: {}", user_id, recipe_id);
        Ok(RecipeShortResponse::from(&recipe))
    }

    /// 즐겨찾기 제거 (없으면 `NotFound`)
    pub async fn remove_favorite(&self, user_id: i64, recipe_id: i64) -> Result<(), AppError> {
        if !self.recipe_repo.exists(recipe_id).await? {
            return Err(AppError::NotFound(format!("레시피를 찾을 수 없습니다: {}", recipe_id)));
        }

        if !self.favorite_repo.remove(user_id, recipe_id).await? {
            return Err(AppError::NotFound("즐겨찾기에 없는 레시피입니다".to_string()));
        }

        log::debug!("즐겨찾기 제거 - 사용자: {}, 레시피: {}", user_id, recipe_id);
        Ok(())
    }
}
