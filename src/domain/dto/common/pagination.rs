//! # 페이지네이션
//!
//! 목록 응답 envelope과 `page`/`limit` 쿼리를 정의합니다.
//!
//! ```json
//! {
//!   "count": 123,
//!   "next": "http://localhost/api/recipes?page=4&limit=6",
//!   "previous": "http://localhost/api/recipes?page=2&limit=6",
//!   "results": [ ... ]
//! }
//! ```
//!
//! `next`/`previous` 링크는 요청 URL을 기준으로 `page`만 바꾸고 나머지 쿼리 파라미터는
//! 그대로 유지합니다. 첫 페이지로 가는 링크에는 `page`를 넣지 않습니다.

use serde::{Deserialize, Serialize};
use url::{Url, form_urlencoded};

use crate::config::PaginationConfig;
use crate::core::errors::AppError;

/// `?page=2&limit=10`
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct PageQuery {
    pub page: Option<u64>,
    pub limit: Option<u64>,
}

impl PageQuery {
    /// 쿼리 문자열에서 직접 해석 (반복 키가 있는 목록 필터와 함께 쓸 때)
    pub fn from_query(query: &str) -> Result<Self, AppError> {
        let mut page_query = PageQuery::default();

        for (key, value) in form_urlencoded::parse(query.as_bytes()) {
            let target = match key.as_ref() {
                "page" => &mut page_query.page,
                "limit" => &mut page_query.limit,
                _ => continue,
            };
            let number = value.parse::<u64>().map_err(|_| {
                AppError::ValidationError(format!("{}는 양의 정수여야 합니다: {}", key, value))
            })?;
            *target = Some(number);
        }

        Ok(page_query)
    }

    /// 1부터 시작하는 페이지 번호
    pub fn page(&self) -> u64 {
        self.page.unwrap_or(1).max(1)
    }

    pub fn limit(&self) -> u64 {
        self.limit
            .filter(|limit| *limit > 0)
            .unwrap_or_else(PaginationConfig::page_size)
            .min(PaginationConfig::MAX_PAGE_SIZE)
    }

    pub fn skip(&self) -> u64 {
        (self.page() - 1).saturating_mul(self.limit())
    }

    /// 첫 페이지가 아닌데 범위를 벗어나면 `NotFound`
    pub fn ensure_in_range(&self, count: u64) -> Result<(), AppError> {
        if self.page() > 1 && self.skip() >= count {
            return Err(AppError::NotFound(format!("잘못된 페이지입니다: {}", self.page())));
        }
        Ok(())
    }
}

/// 목록 응답 envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Page<T> {
    pub count: u64,
    pub next: Option<String>,
    pub previous: Option<String>,
    pub results: Vec<T>,
}

impl<T> Page<T> {
    pub fn new(results: Vec<T>, count: u64, query: &PageQuery, request_url: &Url) -> Self {
        let page = query.page();
        let has_next = page.saturating_mul(query.limit()) < count;

        Self {
            count,
            next: has_next.then(|| page_link(request_url, page + 1)),
            previous: (page > 1).then(|| page_link(request_url, page - 1)),
            results,
        }
    }
}

fn page_link(request_url: &Url, page: u64) -> String {
    let mut url = request_url.clone();
    let mut pairs: Vec<(String, String)> = request_url
        .query_pairs()
        .filter(|(key, _)| key != "page")
        .map(|(key, value)| (key.into_owned(), value.into_owned()))
        .collect();

    if page > 1 {
        pairs.push(("page".to_string(), page.to_string()));
    }

    if pairs.is_empty() {
        url.set_query(None);
    } else {
        url.query_pairs_mut().clear().extend_pairs(pairs);
    }

    url.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn url(s: &str) -> Url {
        Url::parse(s).unwrap()
    }

    #[test]
    fn test_page_query_defaults() {
        let query = PageQuery::default();

        assert_eq!(query.page(), 1);
        assert_eq!(query.skip(), 0);
    }

    #[test]
    fn test_limit_is_clamped() {
        let query = PageQuery { page: Some(3), limit: Some(1_000) };

        assert_eq!(query.limit(), PaginationConfig::MAX_PAGE_SIZE);
        assert_eq!(query.skip(), 2 * PaginationConfig::MAX_PAGE_SIZE);
    }

    #[test]
    fn test_from_query() {
        let query = PageQuery::from_query("tags=a&page=2&limit=10").unwrap();

        assert_eq!(query, PageQuery { page: Some(2), limit: Some(10) });
        assert!(PageQuery::from_query("page=two").is_err());
    }

    #[test]
    fn test_links_keep_other_parameters() {
        let query = PageQuery { page: Some(2), limit: Some(2) };
        let page = Page::new(
            vec![1, 2],
            5,
            &query,
            &url("http://localhost/api/recipes?tags=lunch&page=2&limit=2"),
        );

        assert_eq!(
            page.next.as_deref(),
            Some("http://localhost/api/recipes?tags=lunch&limit=2&page=3")
        );
        assert_eq!(
            page.previous.as_deref(),
            Some("http://localhost/api/recipes?tags=lunch&limit=2")
        );
    }

    #[test]
    fn test_last_page_has_no_next() {
        let query = PageQuery { page: Some(3), limit: Some(2) };
        let page = Page::new(vec![5], 5, &query, &url("http://localhost/api/users?page=3&limit=2"));

        assert!(page.next.is_none());
        assert!(page.previous.is_some());
    }

    #[test]
    fn test_first_page_without_other_params() {
        let query = PageQuery { page: Some(2), limit: None };
        let page: Page<i32> = Page::new(Vec::new(), 7, &query, &url("http://localhost/api/users?page=2"));

        assert_eq!(page.previous.as_deref(), Some("http://localhost/api/users"));
    }

    #[test]
    fn test_out_of_range_page() {
        assert!(PageQuery { page: Some(5), limit: Some(2) }.ensure_in_range(3).is_err());
        assert!(PageQuery { page: Some(1), limit: Some(2) }.ensure_in_range(0).is_ok());
        assert!(PageQuery { page: Some(2), limit: Some(2) }.ensure_in_range(3).is_ok());
    }
}
