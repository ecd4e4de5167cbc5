//! 사용자-레시피, 사용자-사용자 관계 엔티티
//!
//! 각 컬렉션은 관계 쌍에 유니크 인덱스를 가집니다.
//!
//! | 엔티티 | 컬렉션 | 유니크 키 |
//! |--------|--------|-----------|
//! | [`Favorite`] | `favorites` | `(user_id, recipe_id)` |
//! | [`CartItem`] | `shopping_carts` | `(user_id, recipe_id)` |
//! | [`Follow`] | `follows` | `(user_id, author_id)` |
//!
//! 문서의 `_id`는 MongoDB가 부여하는 ObjectId이며 애플리케이션에서는 쓰지 않습니다.

use mongodb::bson::DateTime;
use serde::{Deserialize, Serialize};

/// 즐겨찾기
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Favorite {
    pub user_id: i64,
    pub recipe_id: i64,
    pub created_at: DateTime,
}

/// 장바구니 항목
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CartItem {
    pub user_id: i64,
    pub recipe_id: i64,
    pub created_at: DateTime,
}

/// 구독 (`user_id`가 `author_id`를 구독)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Follow {
    pub user_id: i64,
    pub author_id: i64,
    pub created_at: DateTime,
}

impl Favorite {
    pub fn new(user_id: i64, recipe_id: i64) -> Self {
        Self { user_id, recipe_id, created_at: DateTime::now() }
    }
}

impl CartItem {
    pub fn new(user_id: i64, recipe_id: i64) -> Self {
        Self { user_id, recipe_id, created_at: DateTime::now() }
    }
}

impl Follow {
    pub fn new(user_id: i64, author_id: i64) -> Self {
        Self { user_id, author_id, created_at: DateTime::now() }
    }
}
