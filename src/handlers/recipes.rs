//! # 레시피 HTTP 핸들러
//!
//! | 메서드 | 경로 | 설명 | 상태 코드 |
//! |--------|------|------|-----------|
//! | `GET` | `/api/recipes` | 목록 (페이지, 필터) | 200 OK |
//! | `POST` | `/api/recipes` | 생성 | 201 Created |
//! | `GET` | `/api/recipes/download_shopping_cart` | 장보기 목록 파일 | 200 OK |
//! | `GET` | `/api/recipes/{id}` | 조회 | 200 OK |
//! | `PATCH` | `/api/recipes/{id}` | 수정 (작성자) | 200 OK |
//! | `DELETE` | `/api/recipes/{id}` | 삭제 (작성자) | 204 No Content |
//! | `PUT` | `/api/recipes/{id}/image` | 이미지 교체 (작성자, JSON data-URI 또는 `image/*` 파일) | 200 OK |
//! | `GET` | `/api/recipes/{id}/get-link` | 짧은 링크 | 200 OK |
//! | `POST`/`DELETE` | `/api/recipes/{id}/favorite` | 즐겨찾기 | 201 / 204 |
//! | `POST`/`DELETE` | `/api/recipes/{id}/shopping_cart` | 장바구니 | 201 / 204 |
//!
//! 목록 필터: `?author=3&tags=breakfast&tags=dinner&is_favorited=1&is_in_shopping_cart=1&page=2&limit=6`

use actix_web::{delete, get, http::header, patch, post, put, web, HttpRequest, HttpResponse};
use validator::Validate;
use crate::{
    core::errors::AppError,
    domain::dto::common::PageQuery,
    domain::dto::recipes::{RecipeCreateRequest, RecipeFilter, RecipeImageRequest, RecipeUpdateRequest, ShortLinkResponse},
    domain::models::auth::{AuthenticatedUser, OptionalUser},
    domain::models::media::ImageData,
    domain::models::recipes::shopping_list::SHOPPING_LIST_FILENAME,
    handlers::{absolute_url, json_body, request_url, uploaded_image},
    services::{
        recipes::RecipeService,
        relations::{CartService, FavoriteService},
    },
};

#[get("")]
pub async fn list_recipes(
    req: HttpRequest,
    viewer: OptionalUser,
) -> Result<HttpResponse, AppError> {
    let filter = RecipeFilter::from_query(req.query_string())?;
    let query = PageQuery::from_query(req.query_string())?;

    let page = RecipeService::instance()
        .list_recipes(&filter, &query, viewer.user_id(), &request_url(&req)?)
        .await?;

    Ok(HttpResponse::Ok().json(page))
}

#[post("")]
pub async fn create_recipe(
    user: AuthenticatedUser,
    payload: web::Json<RecipeCreateRequest>,
) -> Result<HttpResponse, AppError> {
    payload.validate()
        .map_err(|e| AppError::ValidationError(e.to_string()))?;

    let response = RecipeService::instance()
        .create_recipe(user.user_id, payload.into_inner())
        .await?;

    Ok(HttpResponse::Created().json(response))
}

/// 장보기 목록 다운로드 (`text/plain` 첨부 파일)
#[get("/download_shopping_cart")]
pub async fn download_shopping_cart(
    user: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let list = CartService::instance().shopping_list(user.user_id).await?;

    Ok(HttpResponse::Ok()
        .content_type("text/plain; charset=utf-8")
        .insert_header((
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{}\"", SHOPPING_LIST_FILENAME),
        ))
        .body(list.render()))
}

#[get("/{recipe_id}")]
pub async fn get_recipe(
    viewer: OptionalUser,
    path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    let response = RecipeService::instance()
        .get_recipe(path.into_inner(), viewer.user_id())
        .await?;

    Ok(HttpResponse::Ok().json(response))
}

#[patch("/{recipe_id}")]
pub async fn update_recipe(
    user: AuthenticatedUser,
    path: web::Path<i64>,
    payload: web::Json<RecipeUpdateRequest>,
) -> Result<HttpResponse, AppError> {
    payload.validate()
        .map_err(|e| AppError::ValidationError(e.to_string()))?;

    let response = RecipeService::instance()
        .update_recipe(user.user_id, path.into_inner(), payload.into_inner())
        .await?;

    Ok(HttpResponse::Ok().json(response))
}

#[delete("/{recipe_id}")]
pub async fn delete_recipe(
    user: AuthenticatedUser,
    path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    RecipeService::instance()
        .delete_recipe(user.user_id, path.into_inner())
        .await?;

    Ok(HttpResponse::NoContent().finish())
}

/// 이미지 교체
///
/// ```bash
/// curl -X PUT http://localhost:8080/api/recipes/12/image \
///   -H "Authorization: Token <token>" \
///   -H "Content-Type: image/jpeg" \
///   --data-binary @pancakes.jpg
/// ```
#[put("/{recipe_id}/image")]
pub async fn replace_recipe_image(
    user: AuthenticatedUser,
    path: web::Path<i64>,
    req: HttpRequest,
    body: web::Bytes,
) -> Result<HttpResponse, AppError> {
    let image = match uploaded_image(&req, &body)? {
        Some(image) => image,
        None => {
            let payload: RecipeImageRequest = json_body(&body)?;
            payload.validate()
                .map_err(|e| AppError::ValidationError(e.to_string()))?;
            ImageData::from_data_uri(&payload.image)?
        }
    };

    let response = RecipeService::instance()
        .replace_image(user.user_id, path.into_inner(), image)
        .await?;

    Ok(HttpResponse::Ok().json(response))
}

/// 짧은 링크 (`{"short-link": "http://host/s/3F"}`)
#[get("/{recipe_id}/get-link")]
pub async fn get_short_link(
    req: HttpRequest,
    path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    let short_path = RecipeService::instance()
        .short_link_path(path.into_inner())
        .await?;

    Ok(HttpResponse::Ok().json(ShortLinkResponse {
        short_link: absolute_url(&req, &short_path),
    }))
}

#[post("/{recipe_id}/favorite")]
pub async fn add_favorite(
    user: AuthenticatedUser,
    path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    let response = FavoriteService::instance()
        .add_favorite(user.user_id, path.into_inner())
        .await?;

    Ok(HttpResponse::Created().json(response))
}

#[delete("/{recipe_id}/favorite")]
pub async fn remove_favorite(
    user: AuthenticatedUser,
    path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    FavoriteService::instance()
        .remove_favorite(user.user_id, path.into_inner())
        .await?;

    Ok(HttpResponse::NoContent().finish())
}

#[post("/{recipe_id}/shopping_cart")]
pub async fn add_to_shopping_cart(
    user: AuthenticatedUser,
    path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    let response = CartService::instance()
        .add_to_cart(user.user_id, path.into_inner())
        .await?;

    Ok(HttpResponse::Created().json(response))
}

#[delete("/{recipe_id}/shopping_cart")]
pub async fn remove_from_shopping_cart(
    user: AuthenticatedUser,
    path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    CartService::instance()
        .remove_from_cart(user.user_id, path.into_inner())
        .await?;

    Ok(HttpResponse::NoContent().finish())
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{http::StatusCode, test, App};

    #[actix_web::test]
    async fn test_write_endpoints_require_login() {
        let app = test::init_service(
            App::new().service(
                web::scope("/api/recipes")
                    .service(create_recipe)
                    .service(download_shopping_cart)
                    .service(replace_recipe_image)
                    .service(add_favorite)
                    .service(remove_from_shopping_cart),
            ),
        )
        .await;

        let requests = vec![
            test::TestRequest::post().uri("/api/recipes").set_json(serde_json::json!({})),
            test::TestRequest::get().uri("/api/recipes/download_shopping_cart"),
            test::TestRequest::put()
                .uri("/api/recipes/3/image")
                .insert_header(("Content-Type", "image/png"))
                .set_payload("png"),
            test::TestRequest::post().uri("/api/recipes/3/favorite"),
            test::TestRequest::delete().uri("/api/recipes/3/shopping_cart"),
        ];

        for req in requests {
            let resp = test::call_service(&app, req.to_request()).await;
            assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
        }
    }
}
