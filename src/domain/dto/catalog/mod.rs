//! 태그, 재료 조회 DTO
//!
//! 두 목록 모두 페이지네이션 없이 이름순으로 반환합니다.

use serde::{Deserialize, Serialize};

use crate::domain::entities::ingredients::Ingredient;
use crate::domain::entities::tags::Tag;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TagResponse {
    pub id: i64,
    pub name: String,
    pub slug: String,
}

impl From<Tag> for TagResponse {
    fn from(tag: Tag) -> Self {
        Self {
            id: tag.id,
            name: tag.name,
            slug: tag.slug,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IngredientResponse {
    pub id: i64,
    pub name: String,
    pub measurement_unit: String,
}

impl From<Ingredient> for IngredientResponse {
    fn from(ingredient: Ingredient) -> Self {
        Self {
            id: ingredient.id,
            name: ingredient.name,
            measurement_unit: ingredient.measurement_unit,
        }
    }
}

/// `GET /api/ingredients?name=소` 검색어 (대소문자 무시, 부분 일치)
#[derive(Debug, Clone, Default, Deserialize)]
pub struct IngredientQuery {
    pub name: Option<String>,
}
