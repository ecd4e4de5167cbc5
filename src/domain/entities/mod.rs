//! # Domain Entities Module
//!
//! MongoDB 컬렉션과 1:1로 대응하는 엔티티들입니다.
//!
//! ```text
//! entities/
//! ├── users/        ← User
//! ├── tags/         ← Tag
//! ├── ingredients/  ← Ingredient
//! ├── recipes/      ← Recipe, RecipeIngredient (포함 문서)
//! └── relations/    ← Favorite, CartItem, Follow
//! ```
//!
//! ## 식별자
//!
//! 모든 엔티티는 `counters` 시퀀스에서 발급한 `i64`를 `_id`로 사용합니다.
//! 레시피 ID는 짧은 링크 토큰으로 인코딩되므로 ObjectId 대신 정수를 씁니다.
//! 관계 문서만 예외로, 관계 쌍 자체가 식별자 역할을 합니다.
//!
//! ## 리포지토리와의 관계
//!
//! ```rust,ignore
//! #[repository(name = "recipe", collection = "recipes")]
//! pub struct RecipeRepository {
//!     db: Arc<Database>,
//!     redis: Arc<RedisClient>,
//! }
//!
//! let recipe = self.collection::<Recipe>()
//!     .find_one(doc! { "_id": id })
//!     .await?;
//! ```

pub mod users;
pub mod tags;
pub mod ingredients;
pub mod recipes;
pub mod relations;
