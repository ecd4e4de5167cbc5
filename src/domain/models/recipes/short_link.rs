//! # 짧은 링크 토큰
//!
//! 레시피 ID를 64진수 토큰으로 바꿔 `/s/<token>` 형태의 공유 링크를 만듭니다.
//!
//! - 알파벳: `0-9`, `A-Z`, `a-z`, `-`, `_` (64자, 패딩 없음)
//! - 최상위 자리부터 기록하며 `0`은 `"0"`입니다.
//! - 알파벳 밖의 문자, 빈 토큰, `u64` 범위를 넘는 토큰은 `ValidationError`입니다.
//!
//! ```rust,ignore
//! use crate::domain::models::recipes::short_link::{encode, decode};
//!
//! let token = encode(4095);        // "__"
//! assert_eq!(decode(&token)?, 4095);
//! ```

use crate::core::errors::AppError;

pub const ALPHABET: &[u8; 64] =
    b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz-_";

const BASE: u64 = 64;

/// 짧은 링크 리다이렉트 경로 접두사
pub const SHORT_LINK_PREFIX: &str = "/s/";

pub fn encode(mut value: u64) -> String {
    if value == 0 {
        return "0".to_string();
    }

    let mut digits = Vec::new();
    while value > 0 {
        digits.push(ALPHABET[(value % BASE) as usize]);
        value /= BASE;
    }
    digits.reverse();

    digits.into_iter().map(char::from).collect()
}

pub fn decode(token: &str) -> Result<u64, AppError> {
    if token.is_empty() {
        return Err(AppError::ValidationError("빈 링크 토큰입니다".to_string()));
    }

    // 에러 메시지에는 토큰 대신 위치만 남깁니다
    token.bytes().enumerate().try_fold(0u64, |acc, (index, byte)| {
        let digit = digit_value(byte).ok_or_else(|| {
            AppError::ValidationError(format!("링크 토큰의 {}번째 문자가 허용되지 않습니다", index + 1))
        })?;

        acc.checked_mul(BASE)
            .and_then(|shifted| shifted.checked_add(digit))
            .ok_or_else(|| AppError::ValidationError("링크 토큰 범위를 벗어났습니다".to_string()))
    })
}

fn digit_value(byte: u8) -> Option<u64> {
    let value = match byte {
        b'0'..=b'9' => byte - b'0',
        b'A'..=b'Z' => byte - b'A' + 10,
        b'a'..=b'z' => byte - b'a' + 36,
        b'-' => 62,
        b'_' => 63,
        _ => return None,
    };
    Some(u64::from(value))
}

/// 레시피 ID로 짧은 링크 경로를 만듭니다 (`/s/<token>`).
pub fn short_path(recipe_id: i64) -> Result<String, AppError> {
    let id = u64::try_from(recipe_id)
        .map_err(|_| AppError::ValidationError(format!("잘못된 레시피 ID: {}", recipe_id)))?;
    Ok(format!("{}{}", SHORT_LINK_PREFIX, encode(id)))
}

/// 토큰을 레시피 ID로 되돌립니다. `i64` 범위를 넘으면 `ValidationError`.
pub fn recipe_id_from_token(token: &str) -> Result<i64, AppError> {
    let value = decode(token)?;
    i64::try_from(value)
        .map_err(|_| AppError::ValidationError("링크 토큰 범위를 벗어났습니다".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_known_values() {
        assert_eq!(encode(0), "0");
        assert_eq!(encode(9), "9");
        assert_eq!(encode(10), "A");
        assert_eq!(encode(63), "_");
        assert_eq!(encode(64), "10");
        assert_eq!(encode(4095), "__");
    }

    #[test]
    fn test_round_trip_samples() {
        let samples = [0, 1, 63, 64, 65, 1_000, 123_456_789, u32::MAX as u64, u64::MAX - 1, u64::MAX];

        for n in samples {
            assert_eq!(decode(&encode(n)).unwrap(), n, "round trip failed for {}", n);
        }
    }

    #[test]
    fn test_decode_rejects_characters_outside_alphabet() {
        assert!(matches!(decode("ab+c"), Err(AppError::ValidationError(_))));
        assert!(matches!(decode("a/b"), Err(AppError::ValidationError(_))));
        assert!(matches!(decode("한글"), Err(AppError::ValidationError(_))));
    }

    #[test]
    fn test_decode_error_does_not_echo_token() {
        let token = format!("{}<script>", "0".repeat(4096));

        match decode(&token) {
            Err(AppError::ValidationError(msg)) => {
                assert!(msg.contains("4097"));
                assert!(!msg.contains("<script>"));
                assert!(msg.len() < 100);
            }
            other => panic!("Expected ValidationError, got {:?}", other),
        }
    }

    #[test]
    fn test_decode_rejects_empty_and_overflow() {
        assert!(matches!(decode(""), Err(AppError::ValidationError(_))));
        // 64^11 > u64::MAX
        assert!(matches!(decode("100000000000"), Err(AppError::ValidationError(_))));
    }

    #[test]
    fn test_short_path_and_back() {
        let path = short_path(4095).unwrap();
        assert_eq!(path, "/s/__");
        assert_eq!(recipe_id_from_token("__").unwrap(), 4095);
        assert!(short_path(-1).is_err());
        assert!(recipe_id_from_token(&encode(u64::MAX)).is_err());
    }
}
