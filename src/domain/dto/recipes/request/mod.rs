pub mod recipe_request;

pub use recipe_request::{IngredientAmountRequest, RecipeCreateRequest, RecipeImageRequest, RecipeUpdateRequest};
