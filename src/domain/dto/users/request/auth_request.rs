use serde::Deserialize;
use validator::Validate;

/// 로그인 요청 구조체
#[derive(Debug, Deserialize, Validate)]
pub struct LocalLoginRequest {
    #[validate(email(message = "유효한 이메일 주소를 입력해주세요"))]
    pub email: String,

    #[validate(length(min = 1, message = "비밀번호를 입력해주세요"))]
    pub password: String,
}

/// 비밀번호 변경 요청 구조체
#[derive(Debug, Deserialize, Validate)]
pub struct SetPasswordRequest {
    #[validate(length(min = 1, message = "현재 비밀번호를 입력해주세요"))]
    pub current_password: String,

    #[validate(length(
        min = 8,
        max = 128,
        message = "비밀번호는 8-128자 사이여야 합니다"
    ))]
    pub new_password: String,
}

/// 아바타 변경 요청 구조체 (`data:image/...;base64,...`)
#[derive(Debug, Deserialize, Validate)]
pub struct AvatarRequest {
    #[validate(length(min = 1, message = "아바타 이미지가 필요합니다"))]
    pub avatar: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_login_request_validation() {
        let ok = LocalLoginRequest { email: "a@b.com".to_string(), password: "x".to_string() };
        let bad = LocalLoginRequest { email: "not-an-email".to_string(), password: String::new() };

        assert!(ok.validate().is_ok());
        assert!(bad.validate().is_err());
    }

    #[test]
    fn test_set_password_requires_long_new_password() {
        let req = SetPasswordRequest {
            current_password: "old".to_string(),
            new_password: "short".to_string(),
        };

        assert!(req.validate().is_err());
    }
}
