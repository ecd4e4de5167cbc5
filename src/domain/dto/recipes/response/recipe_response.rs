use serde::{Deserialize, Serialize};

use crate::config::MediaConfig;
use crate::domain::dto::catalog::TagResponse;
use crate::domain::dto::users::response::UserResponse;
use crate::domain::entities::ingredients::Ingredient;
use crate::domain::entities::recipes::{Recipe, RecipeIngredient};

/// 레시피에 포함된 재료 (재료 정보 + 수량)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecipeIngredientResponse {
    pub id: i64,
    pub name: String,
    pub measurement_unit: String,
    pub amount: i64,
}

impl RecipeIngredientResponse {
    pub fn new(ingredient: &Ingredient, row: &RecipeIngredient) -> Self {
        Self {
            id: ingredient.id,
            name: ingredient.name.clone(),
            measurement_unit: ingredient.measurement_unit.clone(),
            amount: row.amount,
        }
    }
}

/// 레시피 상세 응답
///
/// `is_favorited`, `is_in_shopping_cart`, `author.is_subscribed`는 요청한 사용자 기준이며
/// 익명 요청이면 false입니다.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecipeResponse {
    pub id: i64,
    pub tags: Vec<TagResponse>,
    pub author: UserResponse,
    pub ingredients: Vec<RecipeIngredientResponse>,
    pub is_favorited: bool,
    pub is_in_shopping_cart: bool,
    pub name: String,
    /// 이미지 URL
    pub image: String,
    pub text: String,
    pub cooking_time: i64,
}

/// 즐겨찾기, 장바구니, 구독 목록에서 쓰는 요약 응답
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecipeShortResponse {
    pub id: i64,
    pub name: String,
    pub image: String,
    pub cooking_time: i64,
}

impl From<&Recipe> for RecipeShortResponse {
    fn from(recipe: &Recipe) -> Self {
        Self {
            id: recipe.id,
            name: recipe.name.clone(),
            image: MediaConfig::url_for(&recipe.image),
            cooking_time: recipe.cooking_time,
        }
    }
}

/// `GET /api/recipes/{id}/get-link` 응답
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShortLinkResponse {
    #[serde(rename = "short-link")]
    pub short_link: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use mongodb::bson::DateTime;

    #[test]
    fn test_short_response_uses_media_url() {
        let recipe = Recipe {
            id: 5,
            author_id: 1,
            name: "된장찌개".to_string(),
            text: "끓인다".to_string(),
            cooking_time: 20,
            image: "recipes/images/abc.png".to_string(),
            ingredients: Vec::new(),
            tags: Vec::new(),
            pub_date: DateTime::now(),
        };

        let short = RecipeShortResponse::from(&recipe);
        assert_eq!(short.id, 5);
        assert!(short.image.ends_with("recipes/images/abc.png"));
    }

    #[test]
    fn test_short_link_field_name() {
        let json = serde_json::to_value(ShortLinkResponse {
            short_link: "http://localhost/s/5".to_string(),
        })
        .unwrap();

        assert_eq!(json["short-link"], "http://localhost/s/5");
    }
}
