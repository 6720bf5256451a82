//! Page/sort query normalization and the page envelope.
//!
//! Listing endpoints accept `page`, `size`, `sortBy` and `sortDir` query
//! parameters. The engine never fetches data itself: handlers normalize the
//! query into a [`PageRequest`], the repository returns a slice plus the
//! total count, and [`PageResponse::new`] assembles the envelope.

use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

fn default_size() -> u64 {
    10
}

fn default_sort_by() -> String {
    "id".to_string()
}

fn default_sort_dir() -> String {
    "asc".to_string()
}

/// Raw listing query parameters, with the platform-wide defaults.
#[derive(Debug, Clone, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PageQuery {
    /// Zero-based page number (default 0)
    #[serde(default)]
    pub page: u64,
    /// Page size (default 10)
    #[serde(default = "default_size")]
    pub size: u64,
    /// Sort field (default "id")
    #[serde(default = "default_sort_by", rename = "sortBy")]
    pub sort_by: String,
    /// "asc" or "desc", case-insensitive (default "asc")
    #[serde(default = "default_sort_dir", rename = "sortDir")]
    pub sort_dir: String,
}

impl Default for PageQuery {
    fn default() -> Self {
        Self {
            page: 0,
            size: default_size(),
            sort_by: default_sort_by(),
            sort_dir: default_sort_dir(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Ascending,
    Descending,
}

/// Normalized page/sort request forwarded to the repository.
#[derive(Debug, Clone)]
pub struct PageRequest {
    pub page: u64,
    pub size: u64,
    pub sort_by: String,
    pub direction: SortDirection,
}

impl PageRequest {
    /// Number of rows to skip for this page. Saturates, since page and size
    /// arrive on the query string.
    pub fn offset(&self) -> u64 {
        self.page.saturating_mul(self.size)
    }
}

impl From<PageQuery> for PageRequest {
    fn from(query: PageQuery) -> Self {
        // Anything other than "asc" sorts descending; a zero size would
        // break the page-count formula, so it is bumped to one row.
        let direction = if query.sort_dir.eq_ignore_ascii_case("asc") {
            SortDirection::Ascending
        } else {
            SortDirection::Descending
        };

        Self {
            page: query.page,
            size: query.size.max(1),
            sort_by: query.sort_by,
            direction,
        }
    }
}

/// The structured result of a listing operation.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PageResponse<T> {
    pub content: Vec<T>,
    pub page_number: u64,
    pub page_size: u64,
    pub total_elements: u64,
    pub total_pages: u64,
    pub last: bool,
    pub first: bool,
    pub empty: bool,
}

impl<T> PageResponse<T> {
    /// Assemble the envelope from a fetched slice and the total count.
    ///
    /// A page beyond the end yields an empty, `last = true` envelope rather
    /// than an error.
    pub fn new(content: Vec<T>, request: &PageRequest, total_elements: u64) -> Self {
        let total_pages = total_elements.div_ceil(request.size);

        Self {
            first: request.page == 0,
            last: request.page.saturating_add(1) >= total_pages,
            empty: content.is_empty(),
            page_number: request.page,
            page_size: request.size,
            total_elements,
            total_pages,
            content,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(page: u64, size: u64) -> PageRequest {
        PageRequest::from(PageQuery {
            page,
            size,
            ..PageQuery::default()
        })
    }

    #[test]
    fn test_query_defaults() {
        let query: PageQuery = serde_json::from_value(serde_json::json!({})).unwrap();
        assert_eq!(query.page, 0);
        assert_eq!(query.size, 10);
        assert_eq!(query.sort_by, "id");
        assert_eq!(query.sort_dir, "asc");
    }

    #[test]
    fn test_sort_direction_is_case_insensitive() {
        for dir in ["asc", "ASC", "Asc"] {
            let req = PageRequest::from(PageQuery {
                sort_dir: dir.to_string(),
                ..PageQuery::default()
            });
            assert_eq!(req.direction, SortDirection::Ascending);
        }

        // Anything that is not "asc" sorts descending
        for dir in ["desc", "DESC", "downwards", ""] {
            let req = PageRequest::from(PageQuery {
                sort_dir: dir.to_string(),
                ..PageQuery::default()
            });
            assert_eq!(req.direction, SortDirection::Descending);
        }
    }

    #[test]
    fn test_zero_size_is_normalized() {
        let req = request(0, 0);
        assert_eq!(req.size, 1);
    }

    #[test]
    fn test_total_pages_is_ceiling_of_total_over_size() {
        assert_eq!(PageResponse::new(vec![1], &request(0, 10), 1).total_pages, 1);
        assert_eq!(PageResponse::new(vec![0; 10], &request(0, 10), 10).total_pages, 1);
        assert_eq!(PageResponse::new(vec![0; 10], &request(0, 10), 11).total_pages, 2);
        assert_eq!(PageResponse::<i32>::new(vec![], &request(0, 10), 0).total_pages, 0);
    }

    #[test]
    fn test_first_and_last_flags() {
        let envelope = PageResponse::new(vec![0; 10], &request(0, 10), 25);
        assert!(envelope.first);
        assert!(!envelope.last);

        let envelope = PageResponse::new(vec![0; 5], &request(2, 10), 25);
        assert!(!envelope.first);
        assert!(envelope.last);
    }

    #[test]
    fn test_page_beyond_range_is_empty_and_last() {
        let envelope = PageResponse::<i32>::new(vec![], &request(5, 10), 3);
        assert!(envelope.empty);
        assert!(envelope.last);
        assert!(!envelope.first);
        assert_eq!(envelope.total_pages, 1);
        assert_eq!(envelope.total_elements, 3);
    }

    #[test]
    fn test_empty_table_first_page_is_both_first_and_last() {
        let envelope = PageResponse::<i32>::new(vec![], &request(0, 10), 0);
        assert!(envelope.first);
        assert!(envelope.last);
        assert!(envelope.empty);
        assert_eq!(envelope.total_pages, 0);
    }

    #[test]
    fn test_offset() {
        assert_eq!(request(0, 10).offset(), 0);
        assert_eq!(request(3, 25).offset(), 75);
    }

    #[test]
    fn test_extreme_page_number_saturates_instead_of_overflowing() {
        let req = request(u64::MAX, 10);
        assert_eq!(req.offset(), u64::MAX);

        let envelope = PageResponse::<i32>::new(vec![], &req, 3);
        assert!(envelope.last);
        assert!(envelope.empty);
        assert!(!envelope.first);
        assert_eq!(envelope.total_pages, 1);
    }
}
