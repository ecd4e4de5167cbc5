//! 레시피 서비스 모듈

pub mod recipe_service;

pub use recipe_service::{RecipeLookup, RecipeService};
