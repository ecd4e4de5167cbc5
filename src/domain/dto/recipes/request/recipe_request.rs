//! 레시피 생성/수정 요청 DTO와 검증 규칙
//!
//! 필드별로 처음 발견된 위반 하나만 보고합니다.
//!
//! | 필드 | 규칙 (검사 순서) |
//! |------|------------------|
//! | `ingredients` | 비어 있음 → 중복 ID → 수량이 1..=2147483647 밖 |
//! | `tags` | 비어 있음 → 중복 ID |
//! | `name` | 1-256자 |
//! | `text` | 1자 이상 |
//! | `cooking_time` | 1 이상 |
//!
//! 존재하지 않는 재료/태그 ID는 저장소 조회가 필요하므로 `RecipeService`가 확인합니다.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use crate::domain::entities::recipes::RecipeIngredient;

/// 재료 수량 상한 (32비트 양의 정수)
pub const MAX_INGREDIENT_AMOUNT: i64 = 2_147_483_647;

/// 재료 ID와 수량
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct IngredientAmountRequest {
    pub id: i64,
    #[validate(range(min = 1, max = 2_147_483_647, message = "재료 수량은 1 이상 2147483647 이하여야 합니다"))]
    pub amount: i64,
}

impl From<&IngredientAmountRequest> for RecipeIngredient {
    fn from(request: &IngredientAmountRequest) -> Self {
        Self {
            ingredient_id: request.id,
            amount: request.amount,
        }
    }
}

/// 레시피 생성 요청
///
/// ```json
/// {
///   "ingredients": [ { "id": 1123, "amount": 10 } ],
///   "tags": [1, 2],
///   "image": "data:image/png;base64,iVBORw0KGgoAAAANSUhEUgAAAAEAAAABAgMAAABieywaAAAACVBMVEUAAAD///9fX1/S0ecCAAAACXBIWXMAAA7EAAAOxAGVKw4bAAAACklEQVQImWNoAAAAggCByxOyYQAAAABJRU5ErkJggg==",
///   "name": "김치찌개",
///   "text": "김치를 볶고 물을 붓는다",
///   "cooking_time": 30
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RecipeCreateRequest {
    #[validate(custom(function = "validate_ingredients"))]
    pub ingredients: Vec<IngredientAmountRequest>,

    #[validate(custom(function = "validate_tags"))]
    pub tags: Vec<i64>,

    #[validate(length(min = 1, message = "이미지가 필요합니다"))]
    pub image: String,

    #[validate(length(
        min = 1,
        max = 256,
        message = "레시피 이름은 1-256자 사이여야 합니다"
    ))]
    pub name: String,

    #[validate(length(min = 1, message = "레시피 설명을 입력해주세요"))]
    pub text: String,

    #[validate(range(min = 1, message = "조리 시간은 1분 이상이어야 합니다"))]
    pub cooking_time: i64,
}

/// 레시피 수정 요청 (PATCH)
///
/// 재료와 태그는 항상 전체 목록으로 교체하므로 필수입니다.
/// 나머지 필드는 보낸 것만 변경됩니다.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RecipeUpdateRequest {
    #[validate(custom(function = "validate_ingredients"))]
    pub ingredients: Vec<IngredientAmountRequest>,

    #[validate(custom(function = "validate_tags"))]
    pub tags: Vec<i64>,

    #[validate(length(min = 1, message = "이미지가 필요합니다"))]
    pub image: Option<String>,

    #[validate(length(
        min = 1,
        max = 256,
        message = "레시피 이름은 1-256자 사이여야 합니다"
    ))]
    pub name: Option<String>,

    #[validate(length(min = 1, message = "레시피 설명을 입력해주세요"))]
    pub text: Option<String>,

    #[validate(range(min = 1, message = "조리 시간은 1분 이상이어야 합니다"))]
    pub cooking_time: Option<i64>,
}

/// 이미지 교체 요청 (`PUT /api/recipes/{id}/image`의 JSON 형태)
///
/// 원본 파일을 `Content-Type: image/*` 본문으로 보내면 이 DTO는 쓰이지 않습니다.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RecipeImageRequest {
    #[validate(length(min = 1, message = "이미지가 필요합니다"))]
    pub image: String,
}

fn rule(code: &'static str, message: &'static str) -> ValidationError {
    ValidationError::new(code).with_message(message.into())
}

/// 재료 목록 검증: 비어 있음 → 중복 → 수량
pub fn validate_ingredients(ingredients: &[IngredientAmountRequest]) -> Result<(), ValidationError> {
    if ingredients.is_empty() {
        return Err(rule("empty_ingredients", "재료를 하나 이상 추가해주세요"));
    }

    let mut seen = HashSet::with_capacity(ingredients.len());
    if !ingredients.iter().all(|ingredient| seen.insert(ingredient.id)) {
        return Err(rule("duplicate_ingredient", "같은 재료를 두 번 추가할 수 없습니다"));
    }

    if ingredients.iter().any(|ingredient| ingredient.validate().is_err()) {
        return Err(rule("invalid_amount", "재료 수량은 1 이상 2147483647 이하여야 합니다"));
    }

    Ok(())
}

/// 태그 목록 검증: 비어 있음 → 중복
pub fn validate_tags(tags: &[i64]) -> Result<(), ValidationError> {
    if tags.is_empty() {
        return Err(rule("empty_tags", "태그를 하나 이상 선택해주세요"));
    }

    let mut seen = HashSet::with_capacity(tags.len());
    if !tags.iter().all(|tag| seen.insert(*tag)) {
        return Err(rule("duplicate_tag", "같은 태그를 두 번 선택할 수 없습니다"));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ingredient(id: i64, amount: i64) -> IngredientAmountRequest {
        IngredientAmountRequest { id, amount }
    }

    fn create_request(ingredients: Vec<IngredientAmountRequest>, tags: Vec<i64>) -> RecipeCreateRequest {
        RecipeCreateRequest {
            ingredients,
            tags,
            image: "data:image/png;base64,aGVsbG8=".to_string(),
            name: "김치찌개".to_string(),
            text: "김치를 볶는다".to_string(),
            cooking_time: 30,
        }
    }

    fn error_code(result: Result<(), ValidationError>) -> String {
        result.unwrap_err().code.to_string()
    }

    #[test]
    fn test_valid_payload_passes() {
        let request = create_request(vec![ingredient(1, 5), ingredient(2, 10)], vec![1, 2]);
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_ingredient_rules_in_order() {
        assert_eq!(error_code(validate_ingredients(&[])), "empty_ingredients");
        // 중복과 잘못된 수량이 함께 있으면 중복이 먼저 보고됩니다.
        assert_eq!(
            error_code(validate_ingredients(&[ingredient(1, 0), ingredient(1, 3)])),
            "duplicate_ingredient"
        );
        assert_eq!(
            error_code(validate_ingredients(&[ingredient(1, 0)])),
            "invalid_amount"
        );
        assert_eq!(
            error_code(validate_ingredients(&[ingredient(1, -4)])),
            "invalid_amount"
        );
    }

    #[test]
    fn test_positive_amounts_accepted() {
        for amount in [1, 2, 500, MAX_INGREDIENT_AMOUNT] {
            assert!(validate_ingredients(&[ingredient(1, amount)]).is_ok());
        }
    }

    #[test]
    fn test_amount_above_upper_bound_rejected() {
        for amount in [MAX_INGREDIENT_AMOUNT + 1, i64::MAX] {
            assert_eq!(
                error_code(validate_ingredients(&[ingredient(1, amount)])),
                "invalid_amount"
            );
        }

        let request = create_request(vec![ingredient(1, i64::MAX)], vec![1]);
        assert!(request.validate().unwrap_err().field_errors().contains_key("ingredients"));
    }

    #[test]
    fn test_tag_rules() {
        assert_eq!(error_code(validate_tags(&[])), "empty_tags");
        assert_eq!(error_code(validate_tags(&[3, 1, 3])), "duplicate_tag");
        assert!(validate_tags(&[1, 2, 3]).is_ok());
    }

    #[test]
    fn test_create_request_rejects_duplicates() {
        let duplicate_ingredient = create_request(vec![ingredient(1, 5), ingredient(1, 5)], vec![1]);
        let duplicate_tag = create_request(vec![ingredient(1, 5)], vec![2, 2]);

        let errors = duplicate_ingredient.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("ingredients"));

        let errors = duplicate_tag.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("tags"));
    }

    #[test]
    fn test_create_request_field_rules() {
        let mut request = create_request(vec![ingredient(1, 5)], vec![1]);
        request.cooking_time = 0;
        request.name = "a".repeat(257);

        let errors = request.validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("cooking_time"));
        assert!(fields.contains_key("name"));
    }

    #[test]
    fn test_update_request_optional_fields() {
        let request = RecipeUpdateRequest {
            ingredients: vec![ingredient(1, 5)],
            tags: vec![1],
            image: None,
            name: None,
            text: None,
            cooking_time: Some(0),
        };

        let errors = request.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("cooking_time"));
    }
}
