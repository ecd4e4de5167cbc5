//! 레시피 공유 서비스 메인 애플리케이션
//!
//! MongoDB, Redis 연결을 준비하고 싱글톤 레지스트리와 인덱스를 초기화한 뒤
//! Actix-web HTTP 서버를 구동합니다.

use std::sync::Arc;
use actix_cors::Cors;
use actix_web::http::header;
use actix_web::{error, middleware, web, App, HttpServer, ResponseError};
use actix_governor::{Governor, GovernorConfigBuilder};
use dotenv::dotenv;
use env_logger::Env;
use log::{error, info};
use recipe_service_backend::caching::redis::RedisClient;
use recipe_service_backend::config::{MediaConfig, RateLimitConfig, ServerConfig};
use recipe_service_backend::core::errors::AppError;
use recipe_service_backend::core::registry::ServiceLocator;
use recipe_service_backend::db::Database;
use recipe_service_backend::repositories::ensure_indexes;
use recipe_service_backend::routes::configure_all_routes;
use recipe_service_backend::utils::display_terminal::print_index_summary;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    load_env_file();
    init_logging();

    info!("🍳 레시피 서비스 시작중...");

    let (database, redis_client) = initialize_data_stores().await?;

    ServiceLocator::set(database);
    ServiceLocator::set(redis_client);

    ServiceLocator::initialize_all()
        .await
        .map_err(|e| std::io::Error::other(format!("서비스 초기화 실패: {}", e)))?;

    info!("✅ 모든 서비스가 성공적으로 초기화되었습니다!");

    print_index_summary(&ensure_indexes().await);

    start_http_server().await
}

/// HTTP 서버를 구성하고 실행합니다
///
/// `HOST`, `PORT`, `SERVER_WORKERS` 환경변수로 바인딩 주소와 워커 수를 정합니다.
async fn start_http_server() -> std::io::Result<()> {
    let bind_address = format!("{}:{}", ServerConfig::host(), ServerConfig::port());

    info!("🌐 서버가 http://{} 에서 실행중입니다", bind_address);
    info!("📍 Health check: http://{}/health", bind_address);
    info!("📍 API: http://{}/api", bind_address);

    let (per_second, burst_size) = (RateLimitConfig::per_second(), RateLimitConfig::burst_size());
    let governor_conf = GovernorConfigBuilder::default()
        .requests_per_second(per_second)
        .burst_size(burst_size)
        .use_headers()
        .finish()
        .ok_or_else(|| std::io::Error::other("Rate Limiting 설정이 잘못되었습니다"))?;

    info!("🛡️ Rate Limiting 활성화: 초당 {}요청, 버스트 {}개", per_second, burst_size);

    let allowed_origins = ServerConfig::allowed_origins();
    info!("🔓 CORS 허용 출처: {:?}", allowed_origins);

    HttpServer::new(move || {
        let cors = configure_cors(&allowed_origins);

        App::new()
            .wrap(Governor::new(&governor_conf))
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .wrap(middleware::NormalizePath::trim())
            .app_data(json_config())
            .app_data(payload_config())
            .app_data(query_config())
            .app_data(path_config())
            .configure(configure_all_routes)
    })
        .bind(bind_address)?
        .workers(ServerConfig::workers())
        .run()
        .await
}

/// 잘못된 JSON 본문을 `{"error": ...}` 400으로 응답
fn json_config() -> web::JsonConfig {
    web::JsonConfig::default()
        .limit(MediaConfig::MAX_UPLOAD_BYTES)
        .error_handler(|err, _req| {
            let message = format!("잘못된 요청 본문입니다: {}", err);
            error::InternalError::from_response(err, AppError::ValidationError(message).error_response()).into()
        })
}

/// 원본 이미지 업로드(`web::Bytes`) 본문 상한
fn payload_config() -> web::PayloadConfig {
    web::PayloadConfig::new(MediaConfig::MAX_UPLOAD_BYTES)
}

fn query_config() -> web::QueryConfig {
    web::QueryConfig::default().error_handler(|err, _req| {
        let message = format!("잘못된 쿼리 파라미터입니다: {}", err);
        error::InternalError::from_response(err, AppError::ValidationError(message).error_response()).into()
    })
}

/// 숫자가 아닌 경로 ID는 404
fn path_config() -> web::PathConfig {
    web::PathConfig::default().error_handler(|err, _req| {
        let message = format!("리소스를 찾을 수 없습니다: {}", err);
        error::InternalError::from_response(err, AppError::NotFound(message).error_response()).into()
    })
}

/// 환경별 설정 파일을 로드합니다
///
/// * `PROFILE=dev` - .env.dev 파일 로드 (기본값)
/// * `PROFILE=prod` - .env.prod 파일 로드
/// * 기타 - 기본 .env 파일 로드
fn load_env_file() {
    let profile = std::env::var("PROFILE").unwrap_or_else(|_| "dev".to_string());

    info!("Current profile: {}", profile);

    match profile.as_str() {
        "prod" => match dotenv::from_filename(".env.prod") {
            Ok(_) => info!(".env.prod 파일 로드 됨"),
            Err(e) => error!(".env.prod 파일 로드 실패: {}", e),
        },
        "dev" => match dotenv::from_filename(".env.dev") {
            Ok(_) => info!(".env.dev 파일 로드 됨"),
            Err(e) => error!(".env.dev 파일 로드 실패: {}", e),
        },
        _ => {
            dotenv().ok();
            info!("기본 .env 파일 로드");
        }
    }
}

/// `RUST_LOG` 기본값: `info,actix_web=debug`
fn init_logging() {
    env_logger::init_from_env(Env::default().default_filter_or("info,actix_web=debug"));
}

/// MongoDB와 Redis 연결을 초기화합니다
async fn initialize_data_stores() -> std::io::Result<(Arc<Database>, Arc<RedisClient>)> {
    info!("📡 데이터베이스 연결 중...");

    let database = Database::new()
        .await
        .map_err(|e| std::io::Error::other(format!("데이터베이스 연결 실패: {}", e)))?;

    info!("✅ MongoDB 연결 성공");

    let redis_client = RedisClient::new()
        .await
        .map_err(|e| std::io::Error::other(format!("Redis 연결 실패: {}", e)))?;

    info!("✅ Redis 연결 성공");

    Ok((Arc::new(database), Arc::new(redis_client)))
}

/// 허용 출처별 CORS 설정 (다운로드 파일명을 위해 `Content-Disposition` 노출)
fn configure_cors(allowed_origins: &[String]) -> Cors {
    allowed_origins
        .iter()
        .fold(Cors::default(), |cors, origin| cors.allowed_origin(origin))
        .allowed_methods(vec!["GET", "POST", "PUT", "DELETE", "PATCH", "OPTIONS"])
        .allowed_headers(vec![
            header::AUTHORIZATION,
            header::ACCEPT,
            header::CONTENT_TYPE,
        ])
        .expose_headers(vec![header::CONTENT_DISPOSITION])
        .supports_credentials()
        .max_age(3600)
}
