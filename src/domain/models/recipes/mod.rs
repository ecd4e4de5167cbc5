//! 레시피 부가 모델
//!
//! - [`short_link`] - 레시피 ID ↔ 짧은 링크 토큰
//! - [`shopping_list`] - 장바구니 재료 합산 문서

pub mod short_link;
pub mod shopping_list;

pub use shopping_list::{ShoppingList, ShoppingListItem};
