//! # 업로드 이미지
//!
//! 레시피 이미지와 아바타는 두 가지 형태로 들어옵니다.
//!
//! | 형태 | 예시 | 생성자 |
//! |------|------|--------|
//! | data-URI 문자열 (JSON 본문) | `data:image/png;base64,iVBORw0...` | [`ImageData::from_data_uri`] |
//! | 원본 파일 (요청 본문) | `Content-Type: image/png` + 바이너리 | [`ImageData::from_upload`] |
//!
//! 어느 쪽이든 바이트와 확장자로 정규화하고, 저장용 파일명을 만듭니다.
//! 파일 쓰기는 `ImageService`가 담당합니다.

use actix_web::mime::{self, Mime};
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use uuid::Uuid;

use crate::core::errors::AppError;

const DATA_URI_PREFIX: &str = "data:image/";
const BASE64_MARKER: &str = ";base64,";
const GENERATED_NAME_LEN: usize = 12;

/// 정규화된 이미지
#[derive(Debug, Clone, PartialEq)]
pub struct ImageData {
    /// 소문자 확장자 (`png`, `jpeg` 등)
    pub extension: String,
    pub bytes: Vec<u8>,
}

/// 확장자는 영숫자만 허용 (`svg+xml`, `../x` 등 거부)
fn checked_extension(extension: &str) -> Result<String, AppError> {
    if extension.is_empty() || !extension.chars().all(|c| c.is_ascii_alphanumeric()) {
        return Err(AppError::ValidationError(format!(
            "지원하지 않는 이미지 형식입니다: {}",
            extension
        )));
    }
    Ok(extension.to_ascii_lowercase())
}

fn checked_bytes(bytes: Vec<u8>) -> Result<Vec<u8>, AppError> {
    if bytes.is_empty() {
        return Err(AppError::ValidationError("이미지 데이터가 비어 있습니다".to_string()));
    }
    Ok(bytes)
}

impl ImageData {
    /// `data:image/<확장자>;base64,<본문>` 문자열 해석
    pub fn from_data_uri(value: &str) -> Result<Self, AppError> {
        let rest = value.trim().strip_prefix(DATA_URI_PREFIX).ok_or_else(|| {
            AppError::ValidationError("이미지는 data:image/<ext>;base64,<data> 형식이어야 합니다".to_string())
        })?;

        let (extension, payload) = rest.split_once(BASE64_MARKER).ok_or_else(|| {
            AppError::ValidationError("이미지 데이터가 base64로 인코딩되어 있지 않습니다".to_string())
        })?;

        let extension = checked_extension(extension)?;
        let bytes = STANDARD
            .decode(payload.trim())
            .map_err(|e| AppError::ValidationError(format!("이미지 디코딩 실패: {}", e)))?;

        Ok(Self { extension, bytes: checked_bytes(bytes)? })
    }

    /// 요청 본문으로 올라온 원본 파일. `Content-Type`은 `image/*`여야 합니다.
    ///
    /// ```rust,ignore
    /// let image = ImageData::from_upload(&"image/jpeg".parse()?, body.to_vec())?;
    /// assert_eq!(image.extension, "jpeg");
    /// ```
    pub fn from_upload(content_type: &Mime, bytes: Vec<u8>) -> Result<Self, AppError> {
        if content_type.type_() != mime::IMAGE {
            return Err(AppError::ValidationError(format!(
                "이미지 파일이 아닙니다: {}",
                content_type.essence_str()
            )));
        }

        // subtype()은 `+xml` 같은 접미사를 떼므로 essence에서 직접 자릅니다
        let subtype = content_type.essence_str().strip_prefix("image/").unwrap_or_default();

        Ok(Self {
            extension: checked_extension(subtype)?,
            bytes: checked_bytes(bytes)?,
        })
    }

    /// `<uuid 앞 12자>.<확장자>` 형태의 새 파일명
    pub fn generated_file_name(&self) -> String {
        let id = Uuid::new_v4().to_string();
        format!("{}.{}", &id[..GENERATED_NAME_LEN], self.extension)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_png_data_uri() {
        let image = ImageData::from_data_uri("data:image/png;base64,aGVsbG8=").unwrap();

        assert_eq!(image.extension, "png");
        assert_eq!(image.bytes, b"hello");
    }

    #[test]
    fn test_parse_rejects_non_image_values() {
        assert!(ImageData::from_data_uri("https://example.com/a.png").is_err());
        assert!(ImageData::from_data_uri("data:text/plain;base64,aGVsbG8=").is_err());
        assert!(ImageData::from_data_uri("data:image/png,aGVsbG8=").is_err());
        assert!(ImageData::from_data_uri("data:image/../x;base64,aGVsbG8=").is_err());
        assert!(ImageData::from_data_uri("data:image/png;base64,!!!").is_err());
        assert!(ImageData::from_data_uri("data:image/png;base64,").is_err());
    }

    #[test]
    fn test_upload_takes_extension_from_content_type() {
        let content_type: Mime = "image/JPEG".parse().unwrap();
        let image = ImageData::from_upload(&content_type, b"\xff\xd8\xff".to_vec()).unwrap();

        assert_eq!(image.extension, "jpeg");
        assert_eq!(image.bytes, b"\xff\xd8\xff");
    }

    #[test]
    fn test_upload_rejects_non_image_or_empty_files() {
        let text: Mime = "text/plain".parse().unwrap();
        let svg: Mime = "image/svg+xml".parse().unwrap();
        let png: Mime = "image/png".parse().unwrap();

        assert!(ImageData::from_upload(&text, b"hello".to_vec()).is_err());
        assert!(ImageData::from_upload(&svg, b"<svg/>".to_vec()).is_err());
        assert!(ImageData::from_upload(&png, Vec::new()).is_err());
    }

    #[test]
    fn test_generated_file_name_shape() {
        let image = ImageData::from_data_uri("data:image/JPEG;base64,aGVsbG8=").unwrap();
        let name = image.generated_file_name();

        let (stem, ext) = name.split_once('.').unwrap();
        assert_eq!(stem.len(), 12);
        assert_eq!(ext, "jpeg");
        assert_ne!(name, image.generated_file_name());
    }
}
