//! # 사용자 HTTP 핸들러
//!
//! | 메서드 | 경로 | 설명 | 상태 코드 |
//! |--------|------|------|-----------|
//! | `POST` | `/api/users` | 회원가입 | 201 Created |
//! | `GET` | `/api/users` | 사용자 목록 (페이지) | 200 OK |
//! | `GET` | `/api/users/me` | 현재 사용자 | 200 OK |
//! | `PUT` | `/api/users/me/avatar` | 아바타 설정 (JSON data-URI 또는 `image/*` 파일) | 200 OK |
//! | `DELETE` | `/api/users/me/avatar` | 아바타 삭제 | 204 No Content |
//! | `POST` | `/api/users/set_password` | 비밀번호 변경 | 204 No Content |
//! | `GET` | `/api/users/subscriptions` | 구독 목록 (페이지) | 200 OK |
//! | `POST` | `/api/users/{id}/subscribe` | 구독 | 201 Created |
//! | `DELETE` | `/api/users/{id}/subscribe` | 구독 해제 | 204 No Content |
//! | `GET` | `/api/users/{id}` | 사용자 조회 | 200 OK |
//!
//! 고정 경로(`me`, `subscriptions`, `set_password`)는 `{id}`보다 먼저 등록해야 합니다.

use actix_web::{delete, get, post, put, web, HttpRequest, HttpResponse};
use validator::Validate;
use crate::{
    core::errors::AppError,
    domain::dto::common::PageQuery,
    domain::dto::users::request::{AvatarRequest, CreateUserRequest, RecipesLimitQuery, SetPasswordRequest},
    domain::models::auth::{AuthenticatedUser, OptionalUser},
    domain::models::media::ImageData,
    handlers::{json_body, request_url, uploaded_image},
    services::{relations::FollowService, users::UserService},
};

/// 회원가입
///
/// ```bash
/// curl -X POST http://localhost:8080/api/users \
///   -H "Content-Type: application/json" \
///   -d '{
///     "email": "cook@example.com",
///     "username": "cook",
///     "first_name": "Gordon",
///     "last_name": "Ramsay",
///     "password": "secret-pass"
///   }'
/// ```
#[post("")]
pub async fn create_user(
    payload: web::Json<CreateUserRequest>,
) -> Result<HttpResponse, AppError> {
    payload.validate()
        .map_err(|e| AppError::ValidationError(e.to_string()))?;

    let response = UserService::instance()
        .create_user(payload.into_inner())
        .await?;

    Ok(HttpResponse::Created().json(response))
}

#[get("")]
pub async fn list_users(
    req: HttpRequest,
    viewer: OptionalUser,
) -> Result<HttpResponse, AppError> {
    let query = PageQuery::from_query(req.query_string())?;
    let page = UserService::instance()
        .list_users(&query, viewer.user_id(), &request_url(&req)?)
        .await?;

    Ok(HttpResponse::Ok().json(page))
}

#[get("/me")]
pub async fn get_me(
    user: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let response = UserService::instance().get_me(user.user_id).await?;
    Ok(HttpResponse::Ok().json(response))
}

/// 아바타 설정
///
/// `{"avatar": "data:image/png;base64,..."}` JSON이나 `Content-Type: image/*` 원본 파일을 받습니다.
#[put("/me/avatar")]
pub async fn set_avatar(
    user: AuthenticatedUser,
    req: HttpRequest,
    body: web::Bytes,
) -> Result<HttpResponse, AppError> {
    let image = match uploaded_image(&req, &body)? {
        Some(image) => image,
        None => {
            let payload: AvatarRequest = json_body(&body)?;
            payload.validate()
                .map_err(|e| AppError::ValidationError(e.to_string()))?;
            ImageData::from_data_uri(&payload.avatar)?
        }
    };

    let response = UserService::instance()
        .set_avatar(user.user_id, image)
        .await?;

    Ok(HttpResponse::Ok().json(response))
}

#[delete("/me/avatar")]
pub async fn delete_avatar(
    user: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    UserService::instance().delete_avatar(user.user_id).await?;
    Ok(HttpResponse::NoContent().finish())
}

#[post("/set_password")]
pub async fn set_password(
    user: AuthenticatedUser,
    payload: web::Json<SetPasswordRequest>,
) -> Result<HttpResponse, AppError> {
    payload.validate()
        .map_err(|e| AppError::ValidationError(e.to_string()))?;

    UserService::instance()
        .set_password(user.user_id, payload.into_inner())
        .await?;

    Ok(HttpResponse::NoContent().finish())
}

/// 구독 목록 (`?page=1&limit=6&recipes_limit=3`)
#[get("/subscriptions")]
pub async fn subscriptions(
    req: HttpRequest,
    user: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let query = PageQuery::from_query(req.query_string())?;
    let limit = RecipesLimitQuery::from_query(req.query_string())?;

    let page = FollowService::instance()
        .subscriptions(user.user_id, &query, limit.recipes_limit, &request_url(&req)?)
        .await?;

    Ok(HttpResponse::Ok().json(page))
}

#[post("/{user_id}/subscribe")]
pub async fn subscribe(
    req: HttpRequest,
    user: AuthenticatedUser,
    path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    let limit = RecipesLimitQuery::from_query(req.query_string())?;

    let response = FollowService::instance()
        .subscribe(user.user_id, path.into_inner(), limit.recipes_limit)
        .await?;

    Ok(HttpResponse::Created().json(response))
}

#[delete("/{user_id}/subscribe")]
pub async fn unsubscribe(
    user: AuthenticatedUser,
    path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    FollowService::instance()
        .unsubscribe(user.user_id, path.into_inner())
        .await?;

    Ok(HttpResponse::NoContent().finish())
}

#[get("/{user_id}")]
pub async fn get_user(
    viewer: OptionalUser,
    path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    let response = UserService::instance()
        .get_user(path.into_inner(), viewer.user_id())
        .await?;

    Ok(HttpResponse::Ok().json(response))
}
