use std::sync::Arc;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use singleton_macro::repository;
use crate::caching::redis::RedisClient;
use crate::core::errors::AppError;
use crate::core::registry::Repository;

/// 폐기된 액세스 토큰 저장소
///
/// 토큰의 `jti`를 키로 삼아 원래 만료 시각까지만 Redis에 남겨 둡니다.
#[repository(name = "token", collection = "tokens")]
pub struct TokenRepository {
    redis: Arc<RedisClient>,
}

/// 폐기 기록
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RevokedToken {
    pub jti: String,
    pub user_id: i64,
    /// 폐기 시각 (Unix timestamp)
    pub revoked_at: i64,
    /// 원래 만료 시각 (Unix timestamp)
    pub expires_at: i64,
}

fn blacklist_key(jti: &str) -> String {
    format!("blacklist_token:{}", jti)
}

/// 만료까지 남은 초 (이미 만료됐으면 0)
pub fn remaining_ttl(expires_at: i64, now: i64) -> u64 {
    u64::try_from(expires_at - now).unwrap_or(0)
}

impl TokenRepository {
    /// 토큰 폐기
    ///
    /// 이미 만료된 토큰은 검증 단계에서 걸러지므로 저장하지 않습니다.
    pub async fn blacklist(&self, jti: &str, user_id: i64, expires_at: i64) -> Result<(), AppError> {
        let now = Utc::now().timestamp();
        let ttl = remaining_ttl(expires_at, now);

        if ttl == 0 {
            log::debug!("이미 만료된 토큰 폐기 요청 무시 - JTI: {}", jti);
            return Ok(());
        }

        let record = RevokedToken {
            jti: jti.to_string(),
            user_id,
            revoked_at: now,
            expires_at,
        };

        self.redis.set_with_expiry(&blacklist_key(jti), &record, ttl).await?;

        log::info!("토큰 폐기 - JTI: {}, 사용자: {}, TTL: {}초", jti, user_id, ttl);
        Ok(())
    }

    pub async fn is_blacklisted(&self, jti: &str) -> Result<bool, AppError> {
        Ok(self.redis.exists(&blacklist_key(jti)).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_remaining_ttl() {
        assert_eq!(remaining_ttl(1_000, 400), 600);
        assert_eq!(remaining_ttl(1_000, 1_000), 0);
        assert_eq!(remaining_ttl(1_000, 2_000), 0);
    }

    #[test]
    fn test_blacklist_key() {
        assert_eq!(blacklist_key("abc"), "blacklist_token:abc");
    }
}
