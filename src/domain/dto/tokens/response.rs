use serde::{Deserialize, Serialize};

/// 로그인 응답 (`{"auth_token": "..."}`)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenResponse {
    pub auth_token: String,
}
