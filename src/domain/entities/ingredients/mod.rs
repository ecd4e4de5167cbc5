//! 재료 엔티티
//!
//! `(name, measurement_unit)` 쌍이 유일합니다. 같은 이름이라도 단위가 다르면
//! 별도 재료입니다 (예: 소금/g, 소금/스푼).

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ingredient {
    #[serde(rename = "_id")]
    pub id: i64,
    pub name: String,
    pub measurement_unit: String,
}
