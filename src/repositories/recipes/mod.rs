pub mod recipe_repo;

pub use recipe_repo::{RecipeCriteria, RecipeRepository, recipe_filter};
