//! 태그, 재료 조회 핸들러
//!
//! 두 목록 모두 페이지네이션 없이 배열을 반환합니다.

use actix_web::{get, web, HttpResponse};
use crate::{
    core::errors::AppError,
    domain::dto::catalog::IngredientQuery,
    services::{ingredients::IngredientService, tags::TagService},
};

#[get("")]
pub async fn list_tags() -> Result<HttpResponse, AppError> {
    let tags = TagService::instance().list_tags().await?;
    Ok(HttpResponse::Ok().json(tags))
}

#[get("/{tag_id}")]
pub async fn get_tag(path: web::Path<i64>) -> Result<HttpResponse, AppError> {
    let tag = TagService::instance().get_tag(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(tag))
}

/// `GET /api/ingredients?name=소` (대소문자 무시 부분 일치)
#[get("")]
pub async fn list_ingredients(query: web::Query<IngredientQuery>) -> Result<HttpResponse, AppError> {
    let ingredients = IngredientService::instance()
        .search_ingredients(query.name.as_deref())
        .await?;

    Ok(HttpResponse::Ok().json(ingredients))
}

#[get("/{ingredient_id}")]
pub async fn get_ingredient(path: web::Path<i64>) -> Result<HttpResponse, AppError> {
    let ingredient = IngredientService::instance()
        .get_ingredient(path.into_inner())
        .await?;

    Ok(HttpResponse::Ok().json(ingredient))
}
