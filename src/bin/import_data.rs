//! 재료/태그 일괄 가져오기
//!
//! ```bash
//! import-data data/ingredients.json
//! import-data data/tags.json --model tags
//! ```
//!
//! 파일은 JSON 배열입니다.
//!
//! ```json
//! [ { "name": "소금", "measurement_unit": "g" } ]
//! [ { "name": "아침", "slug": "breakfast" } ]
//! ```
//!
//! 파일이 없거나 JSON이 잘못됐거나 일부 행 저장에 실패해도 로그만 남기고 정상 종료합니다.
//! 저장은 서버와 같은 리포지토리를 거치므로 ID 시퀀스와 목록 캐시 무효화가 그대로 적용됩니다.

use std::path::PathBuf;
use std::sync::Arc;
use clap::{Parser, ValueEnum};
use dotenv::dotenv;
use env_logger::Env;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use recipe_service_backend::caching::redis::RedisClient;
use recipe_service_backend::core::errors::AppResult;
use recipe_service_backend::core::registry::ServiceLocator;
use recipe_service_backend::db::Database;
use recipe_service_backend::domain::entities::ingredients::Ingredient;
use recipe_service_backend::domain::entities::tags::Tag;
use recipe_service_backend::repositories::{ingredients::IngredientRepository, tags::TagRepository};
use recipe_service_backend::utils::string_utils::validate_required_string;

#[derive(Debug, Clone, Copy, PartialEq, ValueEnum)]
enum Model {
    Ingredients,
    Tags,
}

impl Model {
    fn collection(self) -> &'static str {
        match self {
            Model::Ingredients => "ingredients",
            Model::Tags => "tags",
        }
    }
}

#[derive(Debug, Parser)]
#[command(name = "import-data", about = "재료 또는 태그 JSON 파일을 가져옵니다")]
struct Cli {
    /// JSON 파일 경로
    filepath: PathBuf,

    /// 가져올 대상
    #[arg(long, value_enum, default_value = "ingredients")]
    model: Model,
}

#[derive(Debug, Deserialize)]
struct IngredientRow {
    name: String,
    measurement_unit: String,
}

#[derive(Debug, Deserialize)]
struct TagRow {
    name: String,
    slug: String,
}

fn parse_rows<T: DeserializeOwned>(content: &str) -> Result<Vec<T>, serde_json::Error> {
    serde_json::from_str(content)
}

fn required(value: &str, field: &str) -> Result<String, String> {
    validate_required_string(value, field).map_err(|e| e.to_string())
}

/// 검증을 마친 행. ID는 저장 직전에 발급합니다.
#[derive(Debug, PartialEq)]
enum Record {
    Ingredient(Ingredient),
    Tag(Tag),
}

impl Record {
    async fn save(self) -> AppResult<i64> {
        match self {
            Record::Ingredient(mut ingredient) => {
                let repo = IngredientRepository::instance();
                ingredient.id = repo.next_id().await?;
                repo.insert(&ingredient).await?;
                Ok(ingredient.id)
            }
            Record::Tag(mut tag) => {
                let repo = TagRepository::instance();
                tag.id = repo.next_id().await?;
                repo.insert(&tag).await?;
                Ok(tag.id)
            }
        }
    }
}

fn to_record(model: Model, row: &serde_json::Value) -> Result<Record, String> {
    match model {
        Model::Ingredients => {
            let row: IngredientRow = serde_json::from_value(row.clone()).map_err(|e| e.to_string())?;
            Ok(Record::Ingredient(Ingredient {
                id: 0,
                name: required(&row.name, "name")?,
                measurement_unit: required(&row.measurement_unit, "measurement_unit")?,
            }))
        }
        Model::Tags => {
            let row: TagRow = serde_json::from_value(row.clone()).map_err(|e| e.to_string())?;
            Ok(Record::Tag(Tag {
                id: 0,
                name: required(&row.name, "name")?,
                slug: required(&row.slug, "slug")?,
            }))
        }
    }
}

async fn import(model: Model, rows: Vec<serde_json::Value>) -> (usize, usize) {
    let (mut imported, mut failed) = (0, 0);

    for row in rows {
        let record = match to_record(model, &row) {
            Ok(record) => record,
            Err(e) => {
                log::warn!("잘못된 행 건너뜀 {}: {}", row, e);
                failed += 1;
                continue;
            }
        };

        match record.save().await {
            Ok(id) => {
                log::debug!("저장 - ID: {}, {}", id, row);
                imported += 1;
            }
            Err(e) => {
                log::warn!("행 저장 실패 {}: {}", row, e);
                failed += 1;
            }
        }
    }

    (imported, failed)
}

/// 리포지토리가 주입받을 MongoDB와 Redis 등록
async fn register_storage() -> Result<(), Box<dyn std::error::Error>> {
    let database = Database::new().await?;
    let redis = RedisClient::new().await?;

    ServiceLocator::set(Arc::new(database));
    ServiceLocator::set(Arc::new(redis));
    Ok(())
}

fn read_rows(cli: &Cli) -> Option<Vec<serde_json::Value>> {
    let content = match std::fs::read_to_string(&cli.filepath) {
        Ok(content) => content,
        Err(e) => {
            log::error!("파일을 읽을 수 없습니다 {}: {}", cli.filepath.display(), e);
            return None;
        }
    };

    match parse_rows(&content) {
        Ok(rows) => Some(rows),
        Err(e) => {
            log::error!("JSON 형식이 잘못되었습니다 {}: {}", cli.filepath.display(), e);
            None
        }
    }
}

#[actix_web::main]
async fn main() {
    dotenv().ok();
    env_logger::init_from_env(Env::default().default_filter_or("info"));

    let cli = Cli::parse();

    let Some(rows) = read_rows(&cli) else {
        return;
    };

    if let Err(e) = register_storage().await {
        log::error!("저장소 연결 실패: {}", e);
        return;
    }

    let total = rows.len();
    let (imported, failed) = import(cli.model, rows).await;

    log::info!(
        "{} 가져오기 완료: 전체 {}, 성공 {}, 실패 {}",
        cli.model.collection(),
        total,
        imported,
        failed
    );
}
