use serde::{Deserialize, Serialize};

use crate::config::MediaConfig;
use crate::domain::dto::recipes::response::RecipeShortResponse;
use crate::domain::entities::users::user::User;

/// 사용자 응답 DTO
///
/// `is_subscribed`는 요청한 사용자 기준 값이며 익명 요청이면 항상 false입니다.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserResponse {
    pub email: String,
    pub id: i64,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub is_subscribed: bool,
    /// 아바타 URL (없으면 null)
    pub avatar: Option<String>,
}

impl UserResponse {
    pub fn from_user(user: &User, is_subscribed: bool) -> Self {
        Self {
            email: user.email.clone(),
            id: user.id,
            username: user.username.clone(),
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
            is_subscribed,
            avatar: user.avatar.as_deref().map(MediaConfig::url_for),
        }
    }
}

/// 회원가입 응답 DTO
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateUserResponse {
    pub email: String,
    pub id: i64,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
}

impl From<User> for CreateUserResponse {
    fn from(user: User) -> Self {
        let User {
            id,
            email,
            username,
            first_name,
            last_name,
            ..
        } = user;

        Self {
            email,
            id,
            username,
            first_name,
            last_name,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AvatarResponse {
    pub avatar: String,
}

/// 구독 목록 항목: 작성자 정보와 작성자의 레시피 일부
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubscriptionResponse {
    #[serde(flatten)]
    pub user: UserResponse,
    pub recipes: Vec<RecipeShortResponse>,
    pub recipes_count: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user() -> User {
        User::new(
            3,
            "cook@example.com".to_string(),
            "cook".to_string(),
            "Gordon".to_string(),
            "Ramsay".to_string(),
            "hash".to_string(),
        )
    }

    #[test]
    fn test_user_response_hides_password() {
        let json = serde_json::to_value(UserResponse::from_user(&user(), true)).unwrap();

        assert_eq!(json["id"], 3);
        assert_eq!(json["is_subscribed"], true);
        assert!(json["avatar"].is_null());
        assert!(json.get("password_hash").is_none());
    }

    #[test]
    fn test_subscription_response_is_flat() {
        let response = SubscriptionResponse {
            user: UserResponse::from_user(&user(), true),
            recipes: Vec::new(),
            recipes_count: 0,
        };
        let json = serde_json::to_value(response).unwrap();

        assert_eq!(json["username"], "cook");
        assert_eq!(json["recipes_count"], 0);
    }
}
