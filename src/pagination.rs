//! Pagination utilities for pretix API responses.

use serde::{Deserialize, Serialize};

/// A page of results from the pretix API.
///
/// pretix wraps every list response in `{count, next, previous, results}`;
/// `next` is an absolute URL or null on the last page.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(bound(serialize = "T: Serialize", deserialize = "T: Deserialize<'de>"))]
pub struct Page<T> {
    /// The items on this page.
    #[serde(rename = "results")]
    pub items: Vec<T>,
    /// Total number of items across all pages (if known).
    #[serde(default)]
    pub count: Option<u64>,
    /// URL of the following page.
    #[serde(default)]
    pub next: Option<String>,
    /// URL of the preceding page.
    #[serde(default)]
    pub previous: Option<String>,
}

impl<T> Page<T> {
    /// Whether there are more pages.
    #[must_use]
    pub fn has_more(&self) -> bool {
        self.next.is_some()
    }
}

/// Options for collection requests.
///
/// `fetch_all` only takes effect on endpoints that support following
/// `next` links; elsewhere the first page is returned.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListOptions {
    /// Follow `next` links until the last page.
    pub fetch_all: bool,
    /// Query parameters for the first request.
    pub query: Vec<(String, String)>,
}

impl ListOptions {
    /// Options requesting every page.
    #[must_use]
    pub fn all_pages() -> Self {
        Self {
            fetch_all: true,
            ..Self::default()
        }
    }

    /// Add a query parameter.
    #[must_use]
    pub fn with_query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((key.into(), value.into()));
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_page_from_envelope() {
        let page: Page<i32> = serde_json::from_value(json!({
            "count": 3,
            "next": "https://pretix.eu/api/v1/organizers/?page=2",
            "previous": null,
            "results": [1, 2],
        }))
        .unwrap();

        assert_eq!(page.items, vec![1, 2]);
        assert_eq!(page.count, Some(3));
        assert!(page.has_more());
    }

    #[test]
    fn test_last_page_has_no_more() {
        let page: Page<i32> = serde_json::from_value(json!({"results": [], "next": null})).unwrap();
        assert!(!page.has_more());
        assert!(page.items.is_empty());
    }

    #[test]
    fn test_envelope_requires_results() {
        let page = serde_json::from_value::<Page<i32>>(json!({"id": 1}));
        assert!(page.is_err());
    }

    #[test]
    fn test_list_options_builder() {
        let options = ListOptions::all_pages().with_query("subevent", "3");
        assert!(options.fetch_all);
        assert_eq!(options.query, vec![("subevent".to_string(), "3".to_string())]);
    }
}
