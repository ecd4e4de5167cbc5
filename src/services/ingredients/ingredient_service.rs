//! 재료 조회 서비스

use std::sync::Arc;
use singleton_macro::service;
use crate::{
    core::errors::AppError,
    domain::dto::catalog::IngredientResponse,
    repositories::ingredients::IngredientRepository,
};

#[service(name = "ingredient")]
pub struct IngredientService {
    ingredient_repo: Arc<IngredientRepository>,
}

impl IngredientService {
    /// 재료 검색 (이름 부분 일치, 대소문자 무시, 이름순)
    pub async fn search_ingredients(&self, name: Option<&str>) -> Result<Vec<IngredientResponse>, AppError> {
        let ingredients = self.ingredient_repo.search(name).await?;
        Ok(ingredients.into_iter().map(IngredientResponse::from).collect())
    }

    pub async fn get_ingredient(&self, id: i64) -> Result<IngredientResponse, AppError> {
        self.ingredient_repo
            .find_by_id(id)
            .await?
            .map(IngredientResponse::from)
            .ok_or_else(|| AppError::NotFound(format!("재료를 찾을 수 없습니다: {}", id)))
    }
}
