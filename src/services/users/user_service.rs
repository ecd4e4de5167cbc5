//! # 사용자 관리 서비스 구현
//!
//! 회원가입, 로그인 검증, 프로필 조회, 비밀번호 변경, 아바타 관리를 담당합니다.
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                       UserService                        │
//! │  • 회원가입 (bcrypt 해싱)     • 로그인 검증               │
//! │  • 목록/단건 조회 (is_subscribed)                          │
//! │  • 비밀번호 변경              • 아바타 저장/삭제          │
//! └──────────────────────────────────────────────────────────┘
//!               │                         │
//!               ▼                         ▼
//!        UserRepository            FollowRepository
//! ```
//!
//! ## 비밀번호 보안
//!
//! - bcrypt cost는 환경별로 다릅니다 (`PasswordConfig::bcrypt_cost`).
//! - 로그인 실패는 이메일이 없는 경우와 비밀번호가 틀린 경우를 같은 메시지로 보고합니다.

use std::sync::Arc;
use bcrypt::hash;
use mongodb::bson::doc;
use singleton_macro::service;
use url::Url;
use crate::{
    config::{MediaConfig, PasswordConfig},
    core::errors::{AppError, AppResult, ErrorContext},
    domain::{
        dto::common::{Page, PageQuery},
        dto::users::{
            request::{CreateUserRequest, SetPasswordRequest},
            response::{AvatarResponse, CreateUserResponse, UserResponse},
        },
        entities::users::user::User,
        models::media::ImageData,
    },
    repositories::{relations::FollowRepository, users::UserRepository},
    services::media::ImageService,
};

/// 사용자 관리 비즈니스 로직 서비스
///
/// ```rust,ignore
/// let user_service = UserService::instance();
///
/// let created = user_service.create_user(request).await?;
/// let user = user_service.verify_password("cook@example.com", "secret-pass").await?;
/// let me = user_service.get_me(user.id).await?;
/// ```
#[service(name = "user")]
pub struct UserService {
    user_repo: Arc<UserRepository>,
    follow_repo: Arc<FollowRepository>,
}

impl UserService {
    /// 새 사용자 계정 생성
    ///
    /// # Errors
    ///
    /// * `ConflictError` - 이메일 또는 사용자명 중복
    /// * `InternalError` - 해싱 실패
    pub async fn create_user(&self, request: CreateUserRequest) -> Result<CreateUserResponse, AppError> {
        let start_time = std::time::Instant::now();

        let bcrypt_cost = PasswordConfig::bcrypt_cost();

        let hash_start = std::time::Instant::now();
        let password_hash = hash(&request.password, bcrypt_cost)
            .context("비밀번호 해싱 실패")?;
        log::debug!("Password hashing took: {:?}", hash_start.elapsed());

        let user = User::new(
            self.user_repo.next_id().await?,
            request.email.trim().to_lowercase(),
            request.username,
            request.first_name,
            request.last_name,
            password_hash,
        );

        let created_user = self.user_repo.create(user).await?;

        log::info!(
            "사용자 생성 - ID: {}, 사용자명: {}, 소요: {:?}",
            created_user.id,
            created_user.username,
            start_time.elapsed()
        );

        Ok(CreateUserResponse::from(created_user))
    }

    /// 이메일/비밀번호 검증
    ///
    /// # Errors
    ///
    /// * `AuthenticationError` - 계정 없음, 비밀번호 불일치, 비활성 계정
    pub async fn verify_password(&self, email: &str, password: &str) -> AppResult<User> {
        let user = self.user_repo
            .find_by_email(&email.trim().to_lowercase())
            .await?
            .ok_or_else(|| AppError::AuthenticationError("잘못된 이메일 또는 비밀번호입니다".to_string()))?;

        let verify_start = std::time::Instant::now();
        let is_valid = bcrypt::verify(password, &user.password_hash)
            .context("비밀번호 검증 실패")?;
        log::debug!("Password verification took: {:?}", verify_start.elapsed());

        if !is_valid {
            log::warn!("로그인 실패 - 이메일: {}", email);
            return Err(AppError::AuthenticationError("잘못된 이메일 또는 비밀번호입니다".to_string()));
        }

        if !user.is_active {
            return Err(AppError::AuthenticationError("비활성화된 계정입니다".to_string()));
        }

        Ok(user)
    }

    async fn find_user(&self, id: i64) -> Result<User, AppError> {
        self.user_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("사용자를 찾을 수 없습니다: {}", id)))
    }

    async fn is_subscribed(&self, viewer_id: Option<i64>, author_id: i64) -> Result<bool, AppError> {
        match viewer_id {
            Some(viewer_id) if viewer_id != author_id => self.follow_repo.exists(viewer_id, author_id).await,
            _ => Ok(false),
        }
    }

    /// 사용자 목록 (ID 순 페이지)
    pub async fn list_users(
        &self,
        query: &PageQuery,
        viewer_id: Option<i64>,
        request_url: &Url,
    ) -> Result<Page<UserResponse>, AppError> {
        let count = self.user_repo.count().await?;
        query.ensure_in_range(count)?;

        let users = self.user_repo
            .find_page(query.skip(), query.limit() as i64)
            .await?;

        let ids: Vec<i64> = users.iter().map(|user| user.id).collect();
        let followed = match viewer_id {
            Some(viewer_id) => self.follow_repo.followed_among(viewer_id, &ids).await?,
            None => Default::default(),
        };

        let results = users
            .iter()
            .map(|user| UserResponse::from_user(user, followed.contains(&user.id)))
            .collect();

        Ok(Page::new(results, count, query, request_url))
    }

    /// 사용자 단건 조회
    pub async fn get_user(&self, id: i64, viewer_id: Option<i64>) -> Result<UserResponse, AppError> {
        let user = self.find_user(id).await?;
        let is_subscribed = self.is_subscribed(viewer_id, user.id).await?;

        Ok(UserResponse::from_user(&user, is_subscribed))
    }

    /// 현재 사용자 (`/users/me`)
    pub async fn get_me(&self, user_id: i64) -> Result<UserResponse, AppError> {
        let user = self.find_user(user_id).await?;
        Ok(UserResponse::from_user(&user, false))
    }

    /// 비밀번호 변경
    ///
    /// 현재 비밀번호가 틀리면 `ValidationError`입니다.
    pub async fn set_password(&self, user_id: i64, request: SetPasswordRequest) -> AppResult<()> {
        let user = self.find_user(user_id).await?;

        let is_valid = bcrypt::verify(&request.current_password, &user.password_hash)
            .context("비밀번호 검증 실패")?;
        if !is_valid {
            return Err(AppError::ValidationError("현재 비밀번호가 올바르지 않습니다".to_string()));
        }

        let password_hash = hash(&request.new_password, PasswordConfig::bcrypt_cost())
            .context("비밀번호 해싱 실패")?;

        self.user_repo
            .update(user_id, doc! { "password_hash": password_hash })
            .await?;

        log::info!("비밀번호 변경 - 사용자: {}", user_id);
        Ok(())
    }

    /// 아바타 설정 (이전 이미지는 삭제)
    ///
    /// 사용자 문서 갱신이 실패하면 새로 저장한 파일도 지웁니다.
    pub async fn set_avatar(&self, user_id: i64, image: ImageData) -> Result<AvatarResponse, AppError> {
        let user = self.find_user(user_id).await?;
        let image_service = ImageService::instance();

        let (path, _) = image_service
            .save_and_persist(image, MediaConfig::AVATAR_DIR, |path| async move {
                self.user_repo
                    .update(user_id, doc! { "avatar": path })
                    .await?
                    .ok_or_else(|| AppError::NotFound(format!("사용자를 찾을 수 없습니다: {}", user_id)))
            })
            .await?;

        if let Some(previous) = user.avatar {
            image_service.remove(&previous).await;
        }

        Ok(AvatarResponse { avatar: MediaConfig::url_for(&path) })
    }

    /// 아바타 삭제 (없어도 성공)
    pub async fn delete_avatar(&self, user_id: i64) -> Result<(), AppError> {
        let user = self.find_user(user_id).await?;

        if let Some(previous) = user.avatar {
            self.user_repo.unset_field(user_id, "avatar").await?;
            ImageService::instance().remove(&previous).await;
        }

        Ok(())
    }
}
