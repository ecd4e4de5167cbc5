//! # 구독 서비스
//!
//! 작성자 구독/해제와 구독 목록을 담당합니다. 구독 목록의 각 항목은 작성자 정보,
//! 최신 레시피 일부(`recipes_limit`), 전체 레시피 수를 포함합니다.

use std::collections::HashMap;
use std::sync::Arc;
use singleton_macro::service;
use url::Url;
use crate::{
    core::errors::AppError,
    domain::{
        dto::common::{Page, PageQuery},
        dto::recipes::RecipeShortResponse,
        dto::users::response::{SubscriptionResponse, UserResponse},
        entities::users::user::User,
    },
    repositories::{
        recipes::RecipeRepository,
        relations::FollowRepository,
        users::UserRepository,
    },
};

#[service(name = "follow")]
pub struct FollowService {
    follow_repo: Arc<FollowRepository>,
    user_repo: Arc<UserRepository>,
    recipe_repo: Arc<RecipeRepository>,
}

/// 자기 자신 구독 금지 (저장소 조회 전에 확인)
pub fn ensure_not_self(user_id: i64, author_id: i64) -> Result<(), AppError> {
    if user_id == author_id {
        return Err(AppError::ValidationError("자기 자신은 구독할 수 없습니다".to_string()));
    }
    Ok(())
}

impl FollowService {
    async fn subscription_of(&self, author: &User, recipes_limit: Option<i64>) -> Result<SubscriptionResponse, AppError> {
        let recipes = self.recipe_repo
            .find_by_author(author.id, recipes_limit)
            .await?;
        let recipes_count = self.recipe_repo.count_by_author(author.id).await?;

        Ok(SubscriptionResponse {
            user: UserResponse::from_user(author, true),
            recipes: recipes.iter().map(RecipeShortResponse::from).collect(),
            recipes_count,
        })
    }

    /// 작성자 구독
    ///
    /// # Errors
    ///
    /// * `ValidationError` - 자기 자신
    /// * `NotFound` - 작성자 없음
    /// * `ConflictError` - 이미 구독 중
    pub async fn subscribe(
        &self,
        user_id: i64,
        author_id: i64,
        recipes_limit: Option<i64>,
    ) -> Result<SubscriptionResponse, AppError> {
        ensure_not_self(user_id, author_id)?;

        let author = self.user_repo
            .find_by_id(author_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("사용자를 찾을 수 없습니다: {}", author_id)))?;

        self.follow_repo.add(user_id, author_id).await?;

        log::info!("구독 - 사용자: {}, 작성자: {}", user_id, author_id);
        self.subscription_of(&author, recipes_limit).await
    }

    /// 구독 해제
    ///
    /// # Errors
    ///
    /// * `ValidationError` - 자기 자신
    /// * `NotFound` - 작성자 없음, 구독 중이 아님
    pub async fn unsubscribe(&self, user_id: i64, author_id: i64) -> Result<(), AppError> {
        ensure_not_self(user_id, author_id)?;

        if !self.user_repo.exists(author_id).await? {
            return Err(AppError::NotFound(format!("사용자를 찾을 수 없습니다: {}", author_id)));
        }

        if !self.follow_repo.remove(user_id, author_id).await? {
            return Err(AppError::NotFound("구독 중인 사용자가 아닙니다".to_string()));
        }

        log::info!("구독 해제 - 사용자: {}, 작성자: {}", user_id, author_id);
        Ok(())
    }

    /// 구독 목록 (작성자 ID 순 페이지)
    pub async fn subscriptions(
        &self,
        user_id: i64,
        query: &PageQuery,
        recipes_limit: Option<i64>,
        request_url: &Url,
    ) -> Result<Page<SubscriptionResponse>, AppError> {
        let count = self.follow_repo.count_by_user(user_id).await?;
        query.ensure_in_range(count)?;

        let author_ids = self.follow_repo
            .find_author_ids(user_id, query.skip(), query.limit() as i64)
            .await?;

        let mut authors: HashMap<i64, User> = self.user_repo
            .find_by_ids(&author_ids)
            .await?
            .into_iter()
            .map(|user| (user.id, user))
            .collect();

        let mut results = Vec::with_capacity(author_ids.len());
        for author_id in author_ids {
            // 구독 후 탈퇴한 작성자는 건너뜀
            if let Some(author) = authors.remove(&author_id) {
                results.push(self.subscription_of(&author, recipes_limit).await?);
            }
        }

        Ok(Page::new(results, count, query, request_url))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_self_follow_rejected() {
        assert!(matches!(ensure_not_self(3, 3), Err(AppError::ValidationError(_))));
        assert!(ensure_not_self(3, 4).is_ok());
    }
}
