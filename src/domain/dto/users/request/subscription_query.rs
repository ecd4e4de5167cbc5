//! 구독 목록/구독 요청의 `recipes_limit` 쿼리

use url::form_urlencoded;

use crate::core::errors::AppError;

/// `?recipes_limit=3` (없으면 작성자의 레시피 전체)
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RecipesLimitQuery {
    pub recipes_limit: Option<i64>,
}

impl RecipesLimitQuery {
    pub fn from_query(query: &str) -> Result<Self, AppError> {
        let raw = form_urlencoded::parse(query.as_bytes())
            .find(|(key, _)| key == "recipes_limit")
            .map(|(_, value)| value.into_owned());

        let recipes_limit = match raw.as_deref() {
            None | Some("") => None,
            Some(value) => {
                let limit = value
                    .parse::<i64>()
                    .ok()
                    .filter(|limit| *limit > 0)
                    .ok_or_else(|| {
                        AppError::ValidationError(format!("recipes_limit는 양의 정수여야 합니다: {}", value))
                    })?;
                Some(limit)
            }
        };

        Ok(Self { recipes_limit })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recipes_limit() {
        assert_eq!(RecipesLimitQuery::from_query("page=2").unwrap().recipes_limit, None);
        assert_eq!(RecipesLimitQuery::from_query("recipes_limit=3").unwrap().recipes_limit, Some(3));
        assert!(RecipesLimitQuery::from_query("recipes_limit=0").is_err());
        assert!(RecipesLimitQuery::from_query("recipes_limit=abc").is_err());
    }
}
