use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

/// 회원가입 요청 DTO
///
/// # JSON 예제
///
/// ```json
/// {
///   "email": "cook@example.com",
///   "username": "home.cook",
///   "first_name": "Gordon",
///   "last_name": "Ramsay",
///   "password": "Secret1234"
/// }
/// ```
///
/// 이메일, 사용자명 중복은 서비스 계층과 유니크 인덱스가 확인합니다.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateUserRequest {
    #[validate(email(message = "유효한 이메일 주소를 입력해주세요"))]
    #[validate(length(max = 254, message = "이메일은 254자를 넘을 수 없습니다"))]
    pub email: String,

    /// 사용자명 (문자, 숫자, `_` `.` `@` `+` `-` 만 허용)
    #[validate(length(
        min = 1,
        max = 150,
        message = "사용자명은 1-150자 사이여야 합니다"
    ))]
    #[validate(custom(function = "validate_username"))]
    pub username: String,

    #[validate(length(
        min = 1,
        max = 150,
        message = "이름은 1-150자 사이여야 합니다"
    ))]
    pub first_name: String,

    #[validate(length(
        min = 1,
        max = 150,
        message = "성은 1-150자 사이여야 합니다"
    ))]
    pub last_name: String,

    #[validate(length(
        min = 8,
        max = 128,
        message = "비밀번호는 8-128자 사이여야 합니다"
    ))]
    pub password: String,
}

/// 사용자명 형식 검증
pub fn validate_username(username: &str) -> Result<(), ValidationError> {
    let allowed = |c: char| c.is_alphanumeric() || matches!(c, '_' | '.' | '@' | '+' | '-');

    if !username.chars().all(allowed) {
        return Err(ValidationError::new("invalid_username")
            .with_message("사용자명에는 문자, 숫자, _ . @ + - 만 사용할 수 있습니다".into()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(username: &str, password: &str) -> CreateUserRequest {
        CreateUserRequest {
            email: "cook@example.com".to_string(),
            username: username.to_string(),
            first_name: "Gordon".to_string(),
            last_name: "Ramsay".to_string(),
            password: password.to_string(),
        }
    }

    #[test]
    fn test_valid_request() {
        assert!(request("home.cook+1@kitchen", "Secret1234").validate().is_ok());
        assert!(request("요리사_김", "Secret1234").validate().is_ok());
    }

    #[test]
    fn test_rejects_bad_username() {
        assert!(request("bad name", "Secret1234").validate().is_err());
        assert!(request("bad/name", "Secret1234").validate().is_err());
        assert!(request("", "Secret1234").validate().is_err());
    }

    #[test]
    fn test_rejects_short_password() {
        assert!(request("cook", "short").validate().is_err());
    }
}
