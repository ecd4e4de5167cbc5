//! User Entity Implementation
//!
//! 레시피 작성자이자 즐겨찾기, 장바구니, 구독의 주체가 되는 사용자 엔티티입니다.

use mongodb::bson::DateTime;
use serde::{Deserialize, Serialize};

/// 기본 역할
pub const DEFAULT_ROLE: &str = "user";

/// 사용자 엔티티
///
/// `users` 컬렉션 문서와 1:1로 대응합니다. `_id`는 `counters` 시퀀스에서
/// 발급한 정수입니다.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    #[serde(rename = "_id")]
    pub id: i64,
    /// 로그인 식별자 (unique)
    pub email: String,
    /// 사용자명 (unique)
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub password_hash: String,
    /// 아바타 이미지의 미디어 상대 경로
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    pub roles: Vec<String>,
    pub is_active: bool,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

impl User {
    /// 새 로컬 사용자 생성
    pub fn new(
        id: i64,
        email: String,
        username: String,
        first_name: String,
        last_name: String,
        password_hash: String,
    ) -> Self {
        let now = DateTime::now();

        Self {
            id,
            email,
            username,
            first_name,
            last_name,
            password_hash,
            avatar: None,
            roles: vec![DEFAULT_ROLE.to_string()],
            is_active: true,
            created_at: now,
            updated_at: now,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_user_defaults() {
        let user = User::new(
            1,
            "cook@example.com".to_string(),
            "cook".to_string(),
            "Gordon".to_string(),
            "Ramsay".to_string(),
            "hash".to_string(),
        );

        assert!(user.is_active);
        assert!(user.avatar.is_none());
        assert_eq!(user.roles, vec![DEFAULT_ROLE.to_string()]);
        assert_eq!(user.created_at, user.updated_at);
    }
}
