//! # 문자열 유틸리티
//!
//! 필수 값 정리, 쿼리 파라미터 해석, MongoDB 정규식 이스케이프 등
//! 여러 계층에서 쓰는 작은 문자열 함수들입니다.

use crate::core::errors::AppError;

/// 필수 문자열 필드 검증 및 정리
///
/// 공백만 있는 값은 `ValidationError`, 그 외에는 앞뒤 공백을 제거한 값을 돌려줍니다.
///
/// ```rust,ignore
/// assert_eq!(validate_required_string("  소금  ", "name").unwrap(), "소금");
/// assert!(validate_required_string("   ", "name").is_err());
/// ```
pub fn validate_required_string(value: &str, field_name: &str) -> Result<String, AppError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(AppError::ValidationError(format!(
            "{}은(는) 필수입니다",
            field_name
        )));
    }
    Ok(trimmed.to_string())
}

/// 불리언 쿼리 파라미터 해석 (`1`, `true`, `yes` → true)
///
/// 필터 값으로 들어오는 `is_favorited=1` 형태를 처리합니다. 알 수 없는 값은 false입니다.
pub fn parse_bool_flag(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

/// MongoDB `$regex`에 사용자 입력을 그대로 넣기 위한 이스케이프
pub fn escape_regex(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());

    for c in value.chars() {
        if matches!(
            c,
            '\\' | '.' | '+' | '*' | '?' | '(' | ')' | '|' | '[' | ']' | '{' | '}' | '^' | '$'
        ) {
            escaped.push('\\');
        }
        escaped.push(c);
    }

    escaped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_required_string() {
        assert_eq!(validate_required_string("  소금  ", "name").unwrap(), "소금");
        assert!(validate_required_string("", "name").is_err());
        assert!(validate_required_string("   ", "name").is_err());
    }

    #[test]
    fn test_parse_bool_flag() {
        assert!(parse_bool_flag("1"));
        assert!(parse_bool_flag("True"));
        assert!(!parse_bool_flag("0"));
        assert!(!parse_bool_flag("false"));
        assert!(!parse_bool_flag("maybe"));
    }

    #[test]
    fn test_escape_regex() {
        assert_eq!(escape_regex("salt"), "salt");
        assert_eq!(escape_regex("a.b*c"), "a\\.b\\*c");
        assert_eq!(escape_regex("(g)"), "\\(g\\)");
    }
}
