//! # 장보기 목록
//!
//! 장바구니에 담긴 레시피들의 재료를 `(이름, 단위)`로 묶어 수량을 합산한
//! 텍스트 문서입니다.
//!
//! ```text
//! 장보기 목록:
//! 설탕 - 20 g
//! 소금 - 15 g
//! ```
//!
//! 집계 자체는 MongoDB 파이프라인(`CartRepository::aggregate_shopping_list`)이
//! 수행하고, 이 모듈은 결과 행을 정렬, 병합해 문서로 만듭니다.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

pub const SHOPPING_LIST_HEADER: &str = "장보기 목록:";
pub const SHOPPING_LIST_FILENAME: &str = "Shopping_List.txt";

/// 집계 결과 한 행
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShoppingListItem {
    pub name: String,
    pub measurement_unit: String,
    pub amount: i64,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ShoppingList {
    items: Vec<ShoppingListItem>,
}

impl ShoppingList {
    /// 행 목록으로 장보기 목록 생성
    ///
    /// 같은 `(이름, 단위)` 행은 합산되고 결과는 이름, 단위 순으로 정렬됩니다.
    pub fn from_items<I>(rows: I) -> Self
    where
        I: IntoIterator<Item = ShoppingListItem>,
    {
        let mut grouped: BTreeMap<(String, String), i64> = BTreeMap::new();

        for row in rows {
            let total = grouped.entry((row.name, row.measurement_unit)).or_insert(0);
            *total = total.saturating_add(row.amount);
        }

        let items = grouped
            .into_iter()
            .map(|((name, measurement_unit), amount)| ShoppingListItem {
                name,
                measurement_unit,
                amount,
            })
            .collect();

        Self { items }
    }

    pub fn items(&self) -> &[ShoppingListItem] {
        &self.items
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// 다운로드용 본문 (헤더 포함, 모든 줄은 `\n`으로 끝남)
    pub fn render(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for ShoppingList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", SHOPPING_LIST_HEADER)?;
        for item in &self.items {
            writeln!(f, "{} - {} {}", item.name, item.amount, item.measurement_unit)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(name: &str, unit: &str, amount: i64) -> ShoppingListItem {
        ShoppingListItem {
            name: name.to_string(),
            measurement_unit: unit.to_string(),
            amount,
        }
    }

    #[test]
    fn test_sums_same_ingredient_across_recipes() {
        let list = ShoppingList::from_items(vec![item("Salt", "g", 5), item("Salt", "g", 10)]);

        assert_eq!(list.items(), &[item("Salt", "g", 15)]);
        assert!(list.render().contains("Salt - 15 g\n"));
    }

    #[test]
    fn test_same_name_different_unit_kept_apart() {
        let list = ShoppingList::from_items(vec![
            item("Salt", "tsp", 1),
            item("Salt", "g", 5),
            item("Flour", "g", 200),
        ]);

        assert_eq!(
            list.render(),
            "장보기 목록:\nFlour - 200 g\nSalt - 5 g\nSalt - 1 tsp\n"
        );
    }

    #[test]
    fn test_large_amounts_saturate() {
        let list = ShoppingList::from_items(vec![item("Salt", "g", i64::MAX), item("Salt", "g", 10)]);

        assert_eq!(list.items(), &[item("Salt", "g", i64::MAX)]);
    }

    #[test]
    fn test_aggregated_row_deserializes() {
        let row = mongodb::bson::doc! { "name": "Salt", "measurement_unit": "g", "amount": 15_i64 };
        let item: ShoppingListItem = mongodb::bson::from_document(row).unwrap();

        assert_eq!(item.amount, 15);
    }

    #[test]
    fn test_empty_cart_renders_header_only() {
        let list = ShoppingList::from_items(Vec::new());

        assert!(list.is_empty());
        assert_eq!(list.render(), "장보기 목록:\n");
    }
}
