pub mod recipe_response;

pub use recipe_response::{
    RecipeIngredientResponse, RecipeResponse, RecipeShortResponse, ShortLinkResponse,
};
