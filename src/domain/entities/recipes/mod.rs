//! 레시피 엔티티
//!
//! 재료 행과 태그 ID를 문서 안에 포함합니다.
//!
//! ```json
//! {
//!   "_id": 12,
//!   "author_id": 3,
//!   "name": "김치찌개",
//!   "text": "...",
//!   "cooking_time": 30,
//!   "image": "recipes/images/3f2a9c1b7d4e.png",
//!   "ingredients": [ { "ingredient_id": 7, "amount": 200 } ],
//!   "tags": [1, 2],
//!   "pub_date": { "$date": "2024-01-15T10:30:00Z" }
//! }
//! ```

use mongodb::bson::DateTime;
use serde::{Deserialize, Serialize};

/// 레시피에 포함된 재료 행 (레시피 안에서 `ingredient_id`는 유일)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecipeIngredient {
    pub ingredient_id: i64,
    /// 양의 정수
    pub amount: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Recipe {
    #[serde(rename = "_id")]
    pub id: i64,
    pub author_id: i64,
    pub name: String,
    pub text: String,
    /// 조리 시간 (분)
    pub cooking_time: i64,
    /// 미디어 상대 경로
    pub image: String,
    pub ingredients: Vec<RecipeIngredient>,
    pub tags: Vec<i64>,
    pub pub_date: DateTime,
}

impl Recipe {
    pub fn is_authored_by(&self, user_id: i64) -> bool {
        self.author_id == user_id
    }
}
