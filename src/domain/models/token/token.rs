//! JWT 인증 토큰 클레임
use serde::{Deserialize, Serialize};

/// JWT 토큰의 클레임(Payload) 구조체
///
/// - `sub`: 사용자 ID (정수의 문자열 표현)
/// - `roles`: 사용자 역할 목록
/// - `iat` / `exp`: 발급, 만료 시각 (Unix timestamp)
/// - `jti`: 토큰 고유 ID. 로그아웃 시 폐기 목록에 기록됩니다.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenClaims {
    pub sub: String,
    pub roles: Vec<String>,
    pub iat: i64,
    pub exp: i64,
    pub jti: String,
}

impl TokenClaims {
    /// `sub`를 사용자 ID로 해석. 숫자가 아니면 `None`.
    pub fn user_id(&self) -> Option<i64> {
        self.sub.parse().ok()
    }
}
