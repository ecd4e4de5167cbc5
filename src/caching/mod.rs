//! 캐싱 계층 모듈
//!
//! Redis를 백엔드로 하는 캐시와 JSON 직렬화를 제공합니다.
//!
//! - 태그, 재료, 사용자 단건 조회 캐시 (TTL 10분)
//! - 로그아웃된 토큰의 `jti` 폐기 목록
//!
//! ```rust,ignore
//! use crate::caching::redis::RedisClient;
//!
//! let cache = RedisClient::new().await?;
//! cache.set_with_expiry("ingredient:12", &ingredient, 600).await?;
//! let cached: Option<Ingredient> = cache.get("ingredient:12").await?;
//! ```
//!
//! ```bash
//! REDIS_URL=redis://localhost:6379  # 기본값
//! ```

pub mod redis;

/// 엔티티 단건 캐시 TTL (초)
pub const ENTITY_CACHE_TTL_SECONDS: u64 = 600;
