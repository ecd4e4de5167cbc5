//! # Authentication Configuration Module
//!
//! JWT 토큰 서명 키와 만료 시간을 관리합니다.
//!
//! ```bash
//! export JWT_SECRET="your-super-secret-jwt-key"
//! export JWT_EXPIRATION_HOURS="24"
//! ```
//!
//! 로그인 토큰은 하나만 발급합니다(리프레시 토큰 없음). 로그아웃 시 토큰의 `jti`가
//! Redis에 폐기 목록으로 남고, 만료 시각이 지나면 자동으로 사라집니다.

use std::env;

pub struct JwtConfig;

impl JwtConfig {
    pub fn secret() -> String {
        env::var("JWT_SECRET").unwrap_or_else(|_| {
            log::warn!("JWT_SECRET not set, using default (not secure for production!)");
            "your-secret-key".to_string()
        })
    }

    pub fn expiration_hours() -> i64 {
        env::var("JWT_EXPIRATION_HOURS")
            .ok()
            .and_then(|hours| hours.parse().ok())
            .filter(|hours| *hours > 0)
            .unwrap_or(24)
    }

    /// 토큰을 받을 Authorization 헤더 접두사
    ///
    /// `Bearer`가 기본이고, 기존 프론트엔드가 보내는 `Token` 접두사도 허용합니다.
    pub fn accepted_schemes() -> &'static [&'static str] {
        &["Bearer ", "Token "]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expiration_default() {
        if env::var("JWT_EXPIRATION_HOURS").is_err() {
            assert_eq!(JwtConfig::expiration_hours(), 24);
        }
    }

    #[test]
    fn test_accepted_schemes() {
        assert!(JwtConfig::accepted_schemes().contains(&"Bearer "));
        assert!(JwtConfig::accepted_schemes().contains(&"Token "));
    }
}
