//! 레시피 목록 필터
//!
//! `tags`는 여러 번 올 수 있으므로(`?tags=breakfast&tags=dinner`) serde 기반
//! `web::Query` 대신 `url::form_urlencoded`로 쿼리 문자열을 직접 해석합니다.
//!
//! | 파라미터 | 의미 |
//! |----------|------|
//! | `author` | 작성자 ID |
//! | `tags` | 태그 slug, 하나라도 일치하면 포함 |
//! | `is_favorited` | `1`이면 내 즐겨찾기만 (로그인 시) |
//! | `is_in_shopping_cart` | `1`이면 내 장바구니만 (로그인 시) |

use url::form_urlencoded;

use crate::core::errors::AppError;
use crate::utils::string_utils::parse_bool_flag;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecipeFilter {
    pub author: Option<i64>,
    pub tags: Vec<String>,
    pub is_favorited: bool,
    pub is_in_shopping_cart: bool,
}

impl RecipeFilter {
    pub fn from_query(query: &str) -> Result<Self, AppError> {
        let mut filter = RecipeFilter::default();

        for (key, value) in form_urlencoded::parse(query.as_bytes()) {
            match key.as_ref() {
                "author" if !value.is_empty() => {
                    let author = value.parse::<i64>().map_err(|_| {
                        AppError::ValidationError(format!("잘못된 작성자 ID입니다: {}", value))
                    })?;
                    filter.author = Some(author);
                }
                "tags" if !value.is_empty() => {
                    if !filter.tags.iter().any(|slug| slug == value.as_ref()) {
                        filter.tags.push(value.into_owned());
                    }
                }
                "is_favorited" => filter.is_favorited = parse_bool_flag(&value),
                "is_in_shopping_cart" => filter.is_in_shopping_cart = parse_bool_flag(&value),
                _ => {}
            }
        }

        Ok(filter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_repeated_tags_and_flags() {
        let filter = RecipeFilter::from_query(
            "page=2&tags=breakfast&tags=dinner&tags=breakfast&author=3&is_favorited=1&is_in_shopping_cart=0",
        )
        .unwrap();

        assert_eq!(filter.author, Some(3));
        assert_eq!(filter.tags, vec!["breakfast".to_string(), "dinner".to_string()]);
        assert!(filter.is_favorited);
        assert!(!filter.is_in_shopping_cart);
    }

    #[test]
    fn test_empty_query_is_default() {
        assert_eq!(RecipeFilter::from_query("").unwrap(), RecipeFilter::default());
    }

    #[test]
    fn test_invalid_author_rejected() {
        assert!(matches!(
            RecipeFilter::from_query("author=abc"),
            Err(AppError::ValidationError(_))
        ));
    }

    #[test]
    fn test_percent_encoded_slug() {
        let filter = RecipeFilter::from_query("tags=%EC%95%84%EC%B9%A8").unwrap();
        assert_eq!(filter.tags, vec!["아침".to_string()]);
    }
}
