//! 데이터 및 서버 설정 관리 모듈
//!
//! 실행 환경, 서버 바인딩과 CORS, 속도 제한, 비밀번호 해싱 비용, 페이지네이션, 미디어 저장 위치를
//! 환경 변수에서 읽어 옵니다. 값이 없거나 잘못되면 개발용 기본값을 사용합니다.

use std::env;
use std::path::PathBuf;

/// 애플리케이션 실행 환경
#[derive(Debug, Clone, PartialEq)]
pub enum Environment {
    Development,
    Test,
    Staging,
    Production,
}

impl Environment {
    /// `ENVIRONMENT` 환경 변수 기준 현재 환경 (기본값: Production)
    pub fn current() -> Self {
        Self::parse(&env::var("ENVIRONMENT").unwrap_or_else(|_| "production".to_string()))
    }

    pub fn parse(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "development" | "dev" => Environment::Development,
            "test" | "testing" => Environment::Test,
            "staging" | "stage" => Environment::Staging,
            _ => Environment::Production,
        }
    }
}

/// 비밀번호 해싱 설정
pub struct PasswordConfig;

impl PasswordConfig {
    /// bcrypt cost. `BCRYPT_COST`가 4-15 범위면 그 값을, 아니면 환경별 기본값을 씁니다.
    pub fn bcrypt_cost() -> u32 {
        env::var("BCRYPT_COST")
            .ok()
            .and_then(|cost| cost.parse::<u32>().ok())
            .filter(|cost| (4..=15).contains(cost))
            .unwrap_or_else(|| Self::bcrypt_cost_for_env(&Environment::current()))
    }

    pub fn bcrypt_cost_for_env(env: &Environment) -> u32 {
        match env {
            Environment::Development => 4,
            Environment::Test => 4,
            Environment::Staging => 10,
            Environment::Production => 12,
        }
    }
}

/// HTTP 서버 설정
pub struct ServerConfig;

impl ServerConfig {
    pub fn port() -> u16 {
        env::var("PORT")
            .ok()
            .and_then(|port| port.parse().ok())
            .unwrap_or(8080)
    }

    pub fn host() -> String {
        env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string())
    }

    pub fn workers() -> usize {
        env::var("SERVER_WORKERS")
            .ok()
            .and_then(|workers| workers.parse().ok())
            .filter(|workers| *workers > 0)
            .unwrap_or(4)
    }

    /// `CORS_ALLOWED_ORIGINS` (쉼표 구분, 기본값은 로컬 프론트엔드)
    pub fn allowed_origins() -> Vec<String> {
        let raw = env::var("CORS_ALLOWED_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:3000,http://127.0.0.1:3000".to_string());
        split_origins(&raw)
    }
}

fn split_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|origin| !origin.is_empty())
        .map(str::to_string)
        .collect()
}

/// 요청 속도 제한 (actix-governor)
///
/// 잘못된 값은 경고 후 기본값을 씁니다.
pub struct RateLimitConfig;

impl RateLimitConfig {
    pub const DEFAULT_PER_SECOND: u64 = 100;
    pub const DEFAULT_BURST_SIZE: u32 = 200;

    pub fn per_second() -> u64 {
        parse_or_default("RATE_LIMIT_PER_SECOND", Self::DEFAULT_PER_SECOND)
    }

    pub fn burst_size() -> u32 {
        parse_or_default("RATE_LIMIT_BURST_SIZE", Self::DEFAULT_BURST_SIZE)
    }
}

fn parse_or_default<T>(key: &str, default: T) -> T
where
    T: std::str::FromStr + std::fmt::Display,
    T::Err: std::fmt::Display,
{
    match env::var(key) {
        Ok(raw) => raw.trim().parse().unwrap_or_else(|e| {
            log::warn!("{} 파싱 실패: {}. 기본값 {} 사용", key, e, default);
            default
        }),
        Err(_) => default,
    }
}

/// 목록 페이지네이션 설정
///
/// 클라이언트는 `?page=2&limit=10` 으로 조회합니다. `limit`이 없으면 기본 크기,
/// 최대 크기를 넘으면 최대 크기로 잘립니다.
pub struct PaginationConfig;

impl PaginationConfig {
    pub const DEFAULT_PAGE_SIZE: u64 = 6;
    pub const MAX_PAGE_SIZE: u64 = 100;

    pub fn page_size() -> u64 {
        env::var("PAGE_SIZE")
            .ok()
            .and_then(|size| size.parse().ok())
            .filter(|size| *size > 0)
            .unwrap_or(Self::DEFAULT_PAGE_SIZE)
    }
}

/// 업로드 이미지 저장 설정
///
/// - `MEDIA_ROOT`: 파일이 저장되는 디렉터리 (기본값: `media`)
/// - `MEDIA_URL`: 응답에 노출되는 URL 접두사 (기본값: `/media/`)
pub struct MediaConfig;

impl MediaConfig {
    pub const RECIPE_IMAGE_DIR: &'static str = "recipes/images";
    pub const AVATAR_DIR: &'static str = "users/avatars";
    /// JSON(data-URI)과 원본 파일 본문 공통 상한
    pub const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

    pub fn root() -> PathBuf {
        PathBuf::from(env::var("MEDIA_ROOT").unwrap_or_else(|_| "media".to_string()))
    }

    pub fn base_url() -> String {
        let url = env::var("MEDIA_URL").unwrap_or_else(|_| "/media/".to_string());
        if url.ends_with('/') { url } else { format!("{}/", url) }
    }

    /// 저장된 상대 경로를 응답용 URL로 변환
    pub fn url_for(path: &str) -> String {
        format!("{}{}", Self::base_url(), path.trim_start_matches('/'))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_environment_parse() {
        assert_eq!(Environment::parse("development"), Environment::Development);
        assert_eq!(Environment::parse("dev"), Environment::Development);
        assert_eq!(Environment::parse("test"), Environment::Test);
        assert_eq!(Environment::parse("production"), Environment::Production);
        assert_eq!(Environment::parse("unknown"), Environment::Production);
    }

    #[test]
    fn test_bcrypt_cost_for_each_environment() {
        assert_eq!(PasswordConfig::bcrypt_cost_for_env(&Environment::Development), 4);
        assert_eq!(PasswordConfig::bcrypt_cost_for_env(&Environment::Test), 4);
        assert_eq!(PasswordConfig::bcrypt_cost_for_env(&Environment::Staging), 10);
        assert_eq!(PasswordConfig::bcrypt_cost_for_env(&Environment::Production), 12);
    }

    #[test]
    fn test_server_config_defaults() {
        if env::var("PORT").is_err() {
            assert_eq!(ServerConfig::port(), 8080);
        }

        if env::var("HOST").is_err() {
            assert_eq!(ServerConfig::host(), "0.0.0.0");
        }
    }

    #[test]
    fn test_split_origins() {
        assert_eq!(
            split_origins(" http://a.test , ,http://b.test"),
            vec!["http://a.test".to_string(), "http://b.test".to_string()]
        );
        assert!(split_origins("").is_empty());
    }

    #[test]
    fn test_rate_limit_defaults() {
        if env::var("RATE_LIMIT_PER_SECOND").is_err() {
            assert_eq!(RateLimitConfig::per_second(), RateLimitConfig::DEFAULT_PER_SECOND);
        }
        if env::var("RATE_LIMIT_BURST_SIZE").is_err() {
            assert_eq!(RateLimitConfig::burst_size(), RateLimitConfig::DEFAULT_BURST_SIZE);
        }
    }

    #[test]
    fn test_media_url_for() {
        if env::var("MEDIA_URL").is_err() {
            assert_eq!(
                MediaConfig::url_for("recipes/images/abc.png"),
                "/media/recipes/images/abc.png"
            );
        }
    }

    #[test]
    fn test_page_size_default() {
        if env::var("PAGE_SIZE").is_err() {
            assert_eq!(PaginationConfig::page_size(), PaginationConfig::DEFAULT_PAGE_SIZE);
        }
    }
}
