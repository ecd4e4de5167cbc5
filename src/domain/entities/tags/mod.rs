//! 태그 엔티티
//!
//! 관리자 또는 `import-data`로만 생성되며 API로는 조회만 가능합니다.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tag {
    #[serde(rename = "_id")]
    pub id: i64,
    /// 표시 이름 (unique)
    pub name: String,
    /// 필터에 쓰이는 식별자 (unique)
    pub slug: String,
}
