//! Paging types and response payloads.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use search_query::SearchStrategy;

use crate::error::{ServiceError, ServiceResult};

/// A validated, 1-based page request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    number: u32,
    size: u32,
}

impl PageRequest {
    /// Validates `number >= 1` and `1 <= size <= max_size`.
    pub fn new(number: u32, size: u32, max_size: u32) -> ServiceResult<Self> {
        if number < 1 {
            return Err(ServiceError::InvalidPage(format!(
                "page must be at least 1, got {number}"
            )));
        }
        if size < 1 || size > max_size {
            return Err(ServiceError::InvalidPage(format!(
                "size must be between 1 and {max_size}, got {size}"
            )));
        }
        Ok(Self { number, size })
    }

    pub fn number(&self) -> u32 {
        self.number
    }

    pub fn size(&self) -> u32 {
        self.size
    }

    /// Index of the first item on this page.
    pub fn offset(&self) -> usize {
        (self.number as usize - 1) * self.size as usize
    }
}

/// One page of matches plus totals over the full match set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total_pages: u32,
    pub total_elements: u64,
}

impl<T> Page<T> {
    /// Cuts the requested page out of the full, ordered match set.
    pub fn paginate(matches: Vec<T>, request: PageRequest) -> Self {
        let total_elements = matches.len() as u64;
        let total_pages = total_elements.div_ceil(u64::from(request.size())) as u32;
        let items = matches
            .into_iter()
            .skip(request.offset())
            .take(request.size() as usize)
            .collect();
        Self {
            items,
            total_pages,
            total_elements,
        }
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            total_pages: self.total_pages,
            total_elements: self.total_elements,
        }
    }
}

// ---------------------------------------------------------------------------
// Response payloads
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResponse {
    pub search_query: String,
    pub page_info: PageInfo,
    pub books: Vec<BookSummary>,
    pub search_metadata: SearchMetadata,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageInfo {
    pub current_page: u32,
    pub page_size: u32,
    pub total_pages: u32,
    pub total_elements: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookSummary {
    pub id: String,
    pub title: String,
    pub subtitle: Option<String>,
    pub image: Option<String>,
    pub author: String,
    pub isbn: String,
    pub published: Option<NaiveDate>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookDetail {
    pub id: String,
    pub title: String,
    pub subtitle: Option<String>,
    pub image: Option<String>,
    pub author: String,
    pub isbn: String,
    pub publisher: Option<String>,
    pub published: Option<NaiveDate>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchMetadata {
    /// Wall-clock milliseconds spent serving the search.
    pub execution_time: u64,
    pub strategy: SearchStrategy,
}

/// A popular search term with its hit count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchKeyword {
    pub keyword: String,
    pub count: u64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn page_request_bounds() {
        assert!(PageRequest::new(1, 1, 100).is_ok());
        assert!(PageRequest::new(3, 100, 100).is_ok());
        assert!(matches!(
            PageRequest::new(0, 20, 100),
            Err(ServiceError::InvalidPage(_))
        ));
        assert!(matches!(
            PageRequest::new(1, 0, 100),
            Err(ServiceError::InvalidPage(_))
        ));
        assert!(matches!(
            PageRequest::new(1, 101, 100),
            Err(ServiceError::InvalidPage(_))
        ));
    }

    #[test]
    fn paginates_with_totals() {
        let request = PageRequest::new(2, 2, 100).unwrap();
        let page = Page::paginate(vec![1, 2, 3, 4, 5], request);
        assert_eq!(page.items, vec![3, 4]);
        assert_eq!(page.total_pages, 3);
        assert_eq!(page.total_elements, 5);
    }

    #[test]
    fn page_past_the_end_is_empty() {
        let request = PageRequest::new(4, 2, 100).unwrap();
        let page = Page::paginate(vec!["a", "b", "c"], request);
        assert!(page.items.is_empty());
        assert_eq!(page.total_pages, 2);
        assert_eq!(page.total_elements, 3);
    }

    #[test]
    fn empty_match_set_has_no_pages() {
        let page = Page::<u8>::paginate(Vec::new(), PageRequest::new(1, 20, 100).unwrap());
        assert_eq!(page.total_pages, 0);
        assert_eq!(page.total_elements, 0);
    }

    #[test]
    fn metadata_serializes_strategy_wire_name() {
        let metadata = SearchMetadata {
            execution_time: 3,
            strategy: SearchStrategy::Not,
        };
        assert_eq!(
            serde_json::to_value(metadata).unwrap(),
            json!({ "executionTime": 3, "strategy": "NOT_OPERATION" })
        );
    }
}
