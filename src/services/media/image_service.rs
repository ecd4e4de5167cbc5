//! 업로드 이미지 저장 서비스
//!
//! data-URI 문자열이나 업로드된 원본 파일을 미디어 루트 아래에 씁니다. 파일 입출력은
//! `web::block`으로 actix 워커 밖의 블로킹 스레드에서 처리합니다.

use std::future::Future;
use std::io;
use std::path::Path;
use actix_web::web;
use singleton_macro::service;
use crate::{
    config::MediaConfig,
    core::errors::{AppResult, ErrorContext},
    domain::models::media::ImageData,
};

#[service(name = "image")]
pub struct ImageService {
    // 외부 의존성 없음
}

/// `root/relative`에 바이트 기록 (상위 디렉터리 생성 포함)
pub fn write_media_file(root: &Path, relative: &str, bytes: &[u8]) -> io::Result<()> {
    let path = root.join(relative);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, bytes)
}

/// `root/relative` 삭제 (없는 파일은 성공으로 취급)
pub fn remove_media_file(root: &Path, relative: &str) -> io::Result<()> {
    match std::fs::remove_file(root.join(relative)) {
        Err(e) if e.kind() != io::ErrorKind::NotFound => Err(e),
        _ => Ok(()),
    }
}

impl ImageService {
    /// data-URI 이미지를 `dir` 아래에 저장하고 미디어 상대 경로를 반환
    ///
    /// ```rust,ignore
    /// let path = ImageService::instance()
    ///     .save_data_uri(&request.image, MediaConfig::RECIPE_IMAGE_DIR)
    ///     .await?;
    /// // "recipes/images/3f2a9c1b7d4e.png"
    /// ```
    pub async fn save_data_uri(&self, data_uri: &str, dir: &str) -> AppResult<String> {
        self.save(ImageData::from_data_uri(data_uri)?, dir).await
    }

    /// 정규화된 이미지를 `dir` 아래 새 파일명으로 저장
    pub async fn save(&self, image: ImageData, dir: &str) -> AppResult<String> {
        let relative = format!("{}/{}", dir, image.generated_file_name());
        let root = MediaConfig::root();

        let target = relative.clone();
        web::block(move || write_media_file(&root, &target, &image.bytes))
            .await
            .context("이미지 저장 작업 실패")?
            .with_context(|| format!("이미지 저장 실패 ({})", relative))?;

        log::debug!("이미지 저장: {}", relative);
        Ok(relative)
    }

    /// 이미지를 저장한 뒤 `persist`로 경로를 기록합니다.
    ///
    /// 기록이 실패하면 방금 쓴 파일을 지우고 에러를 그대로 돌려줍니다.
    ///
    /// ```rust,ignore
    /// let (path, _) = image_service
    ///     .save_and_persist(image, MediaConfig::AVATAR_DIR, |path| {
    ///         user_repo.update(user_id, doc! { "avatar": path })
    ///     })
    ///     .await?;
    /// ```
    pub async fn save_and_persist<T, F, Fut>(&self, image: ImageData, dir: &str, persist: F) -> AppResult<(String, T)>
    where
        F: FnOnce(String) -> Fut,
        Fut: Future<Output = AppResult<T>>,
    {
        let path = self.save(image, dir).await?;

        match persist(path.clone()).await {
            Ok(value) => Ok((path, value)),
            Err(e) => {
                self.remove(&path).await;
                Err(e)
            }
        }
    }

    /// 저장된 이미지 삭제. 실패해도 요청은 계속 진행하며 경고만 남깁니다.
    pub async fn remove(&self, relative: &str) {
        let root = MediaConfig::root();
        let target = relative.to_string();

        match web::block(move || remove_media_file(&root, &target)).await {
            Ok(Ok(())) => log::debug!("이미지 삭제: {}", relative),
            Ok(Err(e)) => log::warn!("이미지 삭제 실패 - {}: {}", relative, e),
            Err(e) => log::warn!("이미지 삭제 작업 실패 - {}: {}", relative, e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use uuid::Uuid;
    use crate::core::errors::AppError;

    const TEST_DIR: &str = "tests/persist";

    fn png() -> ImageData {
        ImageData::from_data_uri("data:image/png;base64,aGVsbG8=").unwrap()
    }

    #[test]
    fn test_write_and_remove_media_file() {
        let root = std::env::temp_dir().join(format!("media-{}", Uuid::new_v4()));

        write_media_file(&root, "recipes/images/a.png", b"png").unwrap();
        assert_eq!(std::fs::read(root.join("recipes/images/a.png")).unwrap(), b"png");

        remove_media_file(&root, "recipes/images/a.png").unwrap();
        assert!(!root.join("recipes/images/a.png").exists());

        // 두 번째 삭제도 성공
        remove_media_file(&root, "recipes/images/a.png").unwrap();

        std::fs::remove_dir_all(&root).unwrap();
    }

    #[actix_web::test]
    async fn test_persisted_image_is_kept() {
        let service = ImageService::instance();

        let (path, id) = service
            .save_and_persist(png(), TEST_DIR, |_| async { Ok::<_, AppError>(7) })
            .await
            .unwrap();

        assert_eq!(id, 7);
        assert!(path.starts_with(TEST_DIR) && path.ends_with(".png"));
        assert!(MediaConfig::root().join(&path).exists());

        service.remove(&path).await;
    }

    #[actix_web::test]
    async fn test_failed_persist_removes_saved_image() {
        let service = ImageService::instance();
        let written = RefCell::new(None);

        let result = service
            .save_and_persist(png(), TEST_DIR, |path| {
                *written.borrow_mut() = Some(path);
                async { Err::<(), _>(AppError::DatabaseError("write failed".to_string())) }
            })
            .await;

        assert!(matches!(result, Err(AppError::DatabaseError(_))));

        let path = written.into_inner().unwrap();
        assert!(!MediaConfig::root().join(path).exists());
    }
}
