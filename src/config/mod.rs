//! # Configuration Module
//!
//! 환경 변수 기반 설정값을 타입이 있는 접근자로 모아 둔 모듈입니다.
//!
//! - [`data_config`] - 실행 환경, 서버, 비밀번호, 페이지네이션, 미디어 설정
//! - [`auth_config`] - JWT 설정
//!
//! `PROFILE` 값에 따라 `main`에서 `.env.dev` / `.env.prod`를 먼저 읽어 들입니다.
//!
//! ## 환경 변수
//!
//! ```bash
//! # 서버
//! export HOST="0.0.0.0"
//! export PORT="8080"
//! export SERVER_WORKERS="4"
//!
//! # 저장소
//! export MONGODB_URI="mongodb://localhost:27017"
//! export DATABASE_NAME="recipe_service_dev"
//! export REDIS_URL="redis://localhost:6379"
//!
//! # 인증
//! export JWT_SECRET="your-super-secret-key"
//! export JWT_EXPIRATION_HOURS="24"
//! export BCRYPT_COST="12"
//!
//! # 목록, 미디어
//! export PAGE_SIZE="6"
//! export MEDIA_ROOT="media"
//! export MEDIA_URL="/media/"
//! ```

pub mod data_config;
pub mod auth_config;

pub use data_config::*;
pub use auth_config::*;
