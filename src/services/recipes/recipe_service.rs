//! # 레시피 서비스
//!
//! 레시피 생성, 수정, 삭제, 조회와 목록 필터링을 담당합니다.
//!
//! ## 응답 조립
//!
//! 레시피 응답에는 태그, 재료, 작성자와 요청한 사용자 기준 플래그
//! (`is_favorited`, `is_in_shopping_cart`, `author.is_subscribed`)가 들어갑니다.
//! 목록 한 페이지를 만들 때 레시피마다 조회하지 않고 [`RecipeLookup`]에 한 번에
//! 모아 둔 뒤 조립합니다.
//!
//! ```text
//! recipes (page) ─┬─ tags.find_by_ids(모든 태그 ID)
//!                 ├─ ingredients.find_by_ids(모든 재료 ID)
//!                 ├─ users.find_by_ids(작성자 ID)
//!                 └─ favorites / carts / follows (뷰어 기준)
//! ```

use std::collections::{BTreeSet, HashMap, HashSet};
use std::sync::Arc;
use mongodb::bson::DateTime;
use singleton_macro::service;
use url::Url;
use crate::{
    config::MediaConfig,
    core::errors::AppError,
    domain::{
        dto::catalog::TagResponse,
        dto::common::{Page, PageQuery},
        dto::recipes::{
            IngredientAmountRequest, RecipeCreateRequest, RecipeFilter, RecipeIngredientResponse,
            RecipeResponse, RecipeUpdateRequest,
        },
        dto::users::response::UserResponse,
        entities::ingredients::Ingredient,
        entities::recipes::{Recipe, RecipeIngredient},
        entities::tags::Tag,
        entities::users::user::User,
        models::media::ImageData,
        models::recipes::short_link,
    },
    repositories::{
        ingredients::IngredientRepository,
        recipes::{RecipeCriteria, RecipeRepository, recipe_filter},
        relations::{CartRepository, FavoriteRepository, FollowRepository},
        tags::TagRepository,
        users::UserRepository,
    },
    services::media::ImageService,
};

#[service(name = "recipe")]
pub struct RecipeService {
    recipe_repo: Arc<RecipeRepository>,
    user_repo: Arc<UserRepository>,
    tag_repo: Arc<TagRepository>,
    ingredient_repo: Arc<IngredientRepository>,
    favorite_repo: Arc<FavoriteRepository>,
    cart_repo: Arc<CartRepository>,
    follow_repo: Arc<FollowRepository>,
}

/// 레시피 응답 조립에 필요한 조회 결과 묶음
#[derive(Debug, Default)]
pub struct RecipeLookup {
    pub tags: HashMap<i64, Tag>,
    pub ingredients: HashMap<i64, Ingredient>,
    pub authors: HashMap<i64, User>,
    pub favorited: HashSet<i64>,
    pub in_cart: HashSet<i64>,
    pub followed: HashSet<i64>,
}

impl RecipeLookup {
    /// 레시피 하나를 응답으로 변환
    ///
    /// 삭제된 태그/재료는 건너뜁니다. 작성자가 없으면 데이터 정합성 오류입니다.
    pub fn build(&self, recipe: &Recipe) -> Result<RecipeResponse, AppError> {
        let author = self.authors.get(&recipe.author_id).ok_or_else(|| {
            AppError::InternalError(format!(
                "레시피 {}의 작성자 {}를 찾을 수 없습니다",
                recipe.id, recipe.author_id
            ))
        })?;

        let mut tags: Vec<TagResponse> = recipe.tags
            .iter()
            .filter_map(|id| self.tags.get(id))
            .cloned()
            .map(TagResponse::from)
            .collect();
        tags.sort_by(|a, b| a.name.cmp(&b.name));

        let ingredients = recipe.ingredients
            .iter()
            .filter_map(|row| {
                self.ingredients
                    .get(&row.ingredient_id)
                    .map(|ingredient| RecipeIngredientResponse::new(ingredient, row))
            })
            .collect();

        Ok(RecipeResponse {
            id: recipe.id,
            tags,
            author: UserResponse::from_user(author, self.followed.contains(&author.id)),
            ingredients,
            is_favorited: self.favorited.contains(&recipe.id),
            is_in_shopping_cart: self.in_cart.contains(&recipe.id),
            name: recipe.name.clone(),
            image: MediaConfig::url_for(&recipe.image),
            text: recipe.text.clone(),
            cooking_time: recipe.cooking_time,
        })
    }
}

/// 요청한 ID 중 저장소에 없는 것 (요청 순서 유지)
pub fn missing_ids(requested: &[i64], found: &HashSet<i64>) -> Vec<i64> {
    requested.iter().copied().filter(|id| !found.contains(id)).collect()
}

fn intersect(current: Option<Vec<i64>>, ids: Vec<i64>) -> Vec<i64> {
    match current {
        Some(existing) => {
            let allowed: HashSet<i64> = ids.into_iter().collect();
            existing.into_iter().filter(|id| allowed.contains(id)).collect()
        }
        None => ids,
    }
}

fn to_rows(ingredients: &[IngredientAmountRequest]) -> Vec<RecipeIngredient> {
    ingredients.iter().map(RecipeIngredient::from).collect()
}

impl RecipeService {
    async fn find_recipe(&self, id: i64) -> Result<Recipe, AppError> {
        self.recipe_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("레시피를 찾을 수 없습니다: {}", id)))
    }

    async fn find_own_recipe(&self, user_id: i64, id: i64) -> Result<Recipe, AppError> {
        let recipe = self.find_recipe(id).await?;

        if !recipe.is_authored_by(user_id) {
            log::warn!("레시피 권한 없음 - 레시피: {}, 요청자: {}", id, user_id);
            return Err(AppError::AuthorizationError(
                "다른 사용자의 레시피는 수정하거나 삭제할 수 없습니다".to_string(),
            ));
        }

        Ok(recipe)
    }

    /// 재료/태그 ID가 모두 존재하는지 확인
    async fn ensure_references(&self, ingredients: &[IngredientAmountRequest], tags: &[i64]) -> Result<(), AppError> {
        let ingredient_ids: Vec<i64> = ingredients.iter().map(|row| row.id).collect();
        let found: HashSet<i64> = self.ingredient_repo
            .find_by_ids(&ingredient_ids)
            .await?
            .into_iter()
            .map(|ingredient| ingredient.id)
            .collect();

        let missing = missing_ids(&ingredient_ids, &found);
        if !missing.is_empty() {
            return Err(AppError::ValidationError(format!("존재하지 않는 재료입니다: {:?}", missing)));
        }

        let found: HashSet<i64> = self.tag_repo
            .find_by_ids(tags)
            .await?
            .into_iter()
            .map(|tag| tag.id)
            .collect();

        let missing = missing_ids(tags, &found);
        if !missing.is_empty() {
            return Err(AppError::ValidationError(format!("존재하지 않는 태그입니다: {:?}", missing)));
        }

        Ok(())
    }

    /// 레시피 목록에 필요한 조회를 한 번에 수행
    async fn lookup(&self, recipes: &[Recipe], viewer_id: Option<i64>) -> Result<RecipeLookup, AppError> {
        let recipe_ids: Vec<i64> = recipes.iter().map(|recipe| recipe.id).collect();
        let tag_ids: Vec<i64> = recipes
            .iter()
            .flat_map(|recipe| recipe.tags.iter().copied())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();
        let ingredient_ids: Vec<i64> = recipes
            .iter()
            .flat_map(|recipe| recipe.ingredients.iter().map(|row| row.ingredient_id))
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();
        let author_ids: Vec<i64> = recipes
            .iter()
            .map(|recipe| recipe.author_id)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();

        let mut lookup = RecipeLookup {
            tags: self.tag_repo.find_by_ids(&tag_ids).await?
                .into_iter()
                .map(|tag| (tag.id, tag))
                .collect(),
            ingredients: self.ingredient_repo.find_by_ids(&ingredient_ids).await?
                .into_iter()
                .map(|ingredient| (ingredient.id, ingredient))
                .collect(),
            authors: self.user_repo.find_by_ids(&author_ids).await?
                .into_iter()
                .map(|user| (user.id, user))
                .collect(),
            ..Default::default()
        };

        if let Some(viewer_id) = viewer_id {
            lookup.favorited = self.favorite_repo.recipe_ids_among(viewer_id, &recipe_ids).await?;
            lookup.in_cart = self.cart_repo.recipe_ids_among(viewer_id, &recipe_ids).await?;
            lookup.followed = self.follow_repo.followed_among(viewer_id, &author_ids).await?;
        }

        Ok(lookup)
    }

    async fn present(&self, recipe: &Recipe, viewer_id: Option<i64>) -> Result<RecipeResponse, AppError> {
        let lookup = self.lookup(std::slice::from_ref(recipe), viewer_id).await?;
        lookup.build(recipe)
    }

    /// 레시피 생성
    ///
    /// # Errors
    ///
    /// * `ValidationError` - 없는 재료/태그, 잘못된 이미지
    /// * `ConflictError` - 같은 작성자의 같은 이름
    pub async fn create_recipe(&self, author_id: i64, request: RecipeCreateRequest) -> Result<RecipeResponse, AppError> {
        self.ensure_references(&request.ingredients, &request.tags).await?;

        let id = self.recipe_repo.next_id().await?;
        let image = ImageData::from_data_uri(&request.image)?;

        let (_, recipe) = ImageService::instance()
            .save_and_persist(image, MediaConfig::RECIPE_IMAGE_DIR, move |image| async move {
                self.recipe_repo
                    .create(Recipe {
                        id,
                        author_id,
                        name: request.name.trim().to_string(),
                        text: request.text,
                        cooking_time: request.cooking_time,
                        image,
                        ingredients: to_rows(&request.ingredients),
                        tags: request.tags,
                        pub_date: DateTime::now(),
                    })
                    .await
            })
            .await?;

        log::info!("레시피 생성 - ID: {}, 작성자: {}", recipe.id, author_id);
        self.present(&recipe, Some(author_id)).await
    }

    /// 레시피 수정 (작성자만)
    pub async fn update_recipe(
        &self,
        user_id: i64,
        id: i64,
        request: RecipeUpdateRequest,
    ) -> Result<RecipeResponse, AppError> {
        let mut recipe = self.find_own_recipe(user_id, id).await?;
        self.ensure_references(&request.ingredients, &request.tags).await?;

        let image_service = ImageService::instance();
        let previous_image = match request.image {
            Some(ref data_uri) => {
                let image = image_service
                    .save_data_uri(data_uri, MediaConfig::RECIPE_IMAGE_DIR)
                    .await?;
                Some(std::mem::replace(&mut recipe.image, image))
            }
            None => None,
        };

        recipe.ingredients = to_rows(&request.ingredients);
        recipe.tags = request.tags;
        if let Some(name) = request.name {
            recipe.name = name.trim().to_string();
        }
        if let Some(text) = request.text {
            recipe.text = text;
        }
        if let Some(cooking_time) = request.cooking_time {
            recipe.cooking_time = cooking_time;
        }

        if let Err(e) = self.recipe_repo.replace(&recipe).await {
            if previous_image.is_some() {
                image_service.remove(&recipe.image).await;
            }
            return Err(e);
        }

        if let Some(previous) = previous_image {
            image_service.remove(&previous).await;
        }

        log::info!("레시피 수정 - ID: {}", id);
        self.present(&recipe, Some(user_id)).await
    }

    /// 레시피 이미지만 교체 (작성자만)
    ///
    /// 원본 파일 업로드와 data-URI 모두 이 경로를 탑니다. 새 이미지 기록이
    /// 실패하면 새 파일을 지우고, 성공하면 이전 파일을 지웁니다.
    pub async fn replace_image(&self, user_id: i64, id: i64, image: ImageData) -> Result<RecipeResponse, AppError> {
        let recipe = self.find_own_recipe(user_id, id).await?;
        let previous = recipe.image.clone();
        let image_service = ImageService::instance();

        let (_, recipe) = image_service
            .save_and_persist(image, MediaConfig::RECIPE_IMAGE_DIR, move |path| async move {
                let mut recipe = recipe;
                recipe.image = path;
                self.recipe_repo.replace(&recipe).await?;
                Ok(recipe)
            })
            .await?;

        image_service.remove(&previous).await;

        log::info!("레시피 이미지 교체 - ID: {}", id);
        self.present(&recipe, Some(user_id)).await
    }

    /// 레시피 삭제 (작성자만), 즐겨찾기와 장바구니 항목도 함께 정리
    pub async fn delete_recipe(&self, user_id: i64, id: i64) -> Result<(), AppError> {
        let recipe = self.find_own_recipe(user_id, id).await?;

        if !self.recipe_repo.delete(id).await? {
            return Err(AppError::NotFound(format!("레시피를 찾을 수 없습니다: {}", id)));
        }

        let favorites = self.favorite_repo.delete_by_recipe(id).await?;
        let cart_items = self.cart_repo.delete_by_recipe(id).await?;
        ImageService::instance().remove(&recipe.image).await;

        log::info!(
            "레시피 삭제 - ID: {}, 즐겨찾기 {}건, 장바구니 {}건 정리",
            id, favorites, cart_items
        );
        Ok(())
    }

    pub async fn get_recipe(&self, id: i64, viewer_id: Option<i64>) -> Result<RecipeResponse, AppError> {
        let recipe = self.find_recipe(id).await?;
        self.present(&recipe, viewer_id).await
    }

    /// 필터를 조회 조건으로 변환
    ///
    /// `is_favorited`, `is_in_shopping_cart`는 로그인한 경우에만 적용됩니다.
    async fn criteria_for(&self, filter: &RecipeFilter, viewer_id: Option<i64>) -> Result<RecipeCriteria, AppError> {
        let mut criteria = RecipeCriteria {
            author_id: filter.author,
            ..Default::default()
        };

        if !filter.tags.is_empty() {
            criteria.tag_ids = Some(self.tag_repo.find_ids_by_slugs(&filter.tags).await?);
        }

        if let Some(viewer_id) = viewer_id {
            if filter.is_favorited {
                let ids = self.favorite_repo.recipe_ids_for_user(viewer_id).await?;
                criteria.recipe_ids = Some(intersect(criteria.recipe_ids.take(), ids));
            }
            if filter.is_in_shopping_cart {
                let ids = self.cart_repo.recipe_ids_for_user(viewer_id).await?;
                criteria.recipe_ids = Some(intersect(criteria.recipe_ids.take(), ids));
            }
        }

        Ok(criteria)
    }

    /// 레시피 목록 (최신순 페이지)
    pub async fn list_recipes(
        &self,
        filter: &RecipeFilter,
        query: &PageQuery,
        viewer_id: Option<i64>,
        request_url: &Url,
    ) -> Result<Page<RecipeResponse>, AppError> {
        let criteria = self.criteria_for(filter, viewer_id).await?;
        let filter_doc = recipe_filter(&criteria);

        let count = self.recipe_repo.count(filter_doc.clone()).await?;
        query.ensure_in_range(count)?;

        let recipes = self.recipe_repo
            .find_page(filter_doc, query.skip(), query.limit() as i64)
            .await?;

        let lookup = self.lookup(&recipes, viewer_id).await?;
        let results = recipes
            .iter()
            .map(|recipe| lookup.build(recipe))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Page::new(results, count, query, request_url))
    }

    /// 짧은 링크 경로 (`/s/<token>`)
    pub async fn short_link_path(&self, id: i64) -> Result<String, AppError> {
        let recipe = self.find_recipe(id).await?;
        short_link::short_path(recipe.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tag(id: i64, name: &str) -> Tag {
        Tag { id, name: name.to_string(), slug: name.to_lowercase() }
    }

    fn recipe() -> Recipe {
        Recipe {
            id: 10,
            author_id: 1,
            name: "Soup".to_string(),
            text: "Boil".to_string(),
            cooking_time: 15,
            image: "recipes/images/soup.png".to_string(),
            ingredients: vec![
                RecipeIngredient { ingredient_id: 5, amount: 200 },
                RecipeIngredient { ingredient_id: 6, amount: 3 },
            ],
            tags: vec![2, 1],
            pub_date: DateTime::now(),
        }
    }

    fn lookup() -> RecipeLookup {
        let author = User::new(
            1,
            "cook@example.com".to_string(),
            "cook".to_string(),
            "Gordon".to_string(),
            "Ramsay".to_string(),
            "hash".to_string(),
        );

        RecipeLookup {
            tags: HashMap::from([(1, tag(1, "Lunch")), (2, tag(2, "Breakfast"))]),
            ingredients: HashMap::from([(
                5,
                Ingredient { id: 5, name: "Water".to_string(), measurement_unit: "ml".to_string() },
            )]),
            authors: HashMap::from([(1, author)]),
            favorited: HashSet::from([10]),
            in_cart: HashSet::new(),
            followed: HashSet::from([1]),
        }
    }

    #[test]
    fn test_build_response() {
        let response = lookup().build(&recipe()).unwrap();

        assert_eq!(response.id, 10);
        assert!(response.is_favorited);
        assert!(!response.is_in_shopping_cart);
        assert!(response.author.is_subscribed);
        assert!(response.image.ends_with("recipes/images/soup.png"));

        let tag_names: Vec<&str> = response.tags.iter().map(|tag| tag.name.as_str()).collect();
        assert_eq!(tag_names, vec!["Breakfast", "Lunch"]);

        // 6번 재료는 삭제된 것으로 보고 건너뜀
        assert_eq!(response.ingredients.len(), 1);
        assert_eq!(response.ingredients[0].name, "Water");
        assert_eq!(response.ingredients[0].amount, 200);
    }

    #[test]
    fn test_build_without_author_fails() {
        let mut lookup = lookup();
        lookup.authors.clear();

        assert!(matches!(lookup.build(&recipe()), Err(AppError::InternalError(_))));
    }

    #[test]
    fn test_missing_ids_keeps_request_order() {
        let found = HashSet::from([2, 4]);
        assert_eq!(missing_ids(&[5, 2, 3, 4], &found), vec![5, 3]);
        assert!(missing_ids(&[2], &found).is_empty());
    }

    #[test]
    fn test_intersect() {
        assert_eq!(intersect(None, vec![1, 2]), vec![1, 2]);
        assert_eq!(intersect(Some(vec![1, 2, 3]), vec![3, 1]), vec![1, 3]);
        assert!(intersect(Some(vec![1]), Vec::new()).is_empty());
    }
}
