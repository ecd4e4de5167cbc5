//! 태그 조회 서비스

use std::sync::Arc;
use singleton_macro::service;
use crate::{
    core::errors::AppError,
    domain::dto::catalog::TagResponse,
    repositories::tags::TagRepository,
};

#[service(name = "tag")]
pub struct TagService {
    tag_repo: Arc<TagRepository>,
}

impl TagService {
    /// 전체 태그 (이름순, 페이지네이션 없음)
    pub async fn list_tags(&self) -> Result<Vec<TagResponse>, AppError> {
        let tags = self.tag_repo.find_all().await?;
        Ok(tags.into_iter().map(TagResponse::from).collect())
    }

    pub async fn get_tag(&self, id: i64) -> Result<TagResponse, AppError> {
        self.tag_repo
            .find_by_id(id)
            .await?
            .map(TagResponse::from)
            .ok_or_else(|| AppError::NotFound(format!("태그를 찾을 수 없습니다: {}", id)))
    }
}
