//! Paging Metadata
//!
//! Shared by every paginated collection the API returns.

use serde::{Deserialize, Serialize};

/// Paging metadata attached to collection responses
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Metadata {
    /// Total items across all pages
    pub total: u64,

    /// Page this response holds (1-indexed)
    pub page: u64,

    /// Items the service places on one page
    pub items_per_page: u64,
}

impl Metadata {
    /// Number of pages needed to cover `total`
    ///
    /// A zero `items_per_page` is treated as a single page so aggregation
    /// never divides by zero.
    pub fn page_count(&self) -> u64 {
        if self.items_per_page == 0 {
            return 1;
        }
        self.total.div_ceil(self.items_per_page)
    }
}

/// A page of items plus its metadata
pub trait Paginated {
    type Item;

    fn metadata(&self) -> &Metadata;

    fn into_items(self) -> Vec<Self::Item>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_count() {
        let meta = |total, items_per_page| Metadata {
            total,
            page: 1,
            items_per_page,
        };

        assert_eq!(meta(0, 100).page_count(), 0);
        assert_eq!(meta(1, 100).page_count(), 1);
        assert_eq!(meta(100, 100).page_count(), 1);
        assert_eq!(meta(101, 100).page_count(), 2);
        assert_eq!(meta(250, 14).page_count(), 18);
        assert_eq!(meta(30, 0).page_count(), 1);
    }

    #[test]
    fn test_deserialize_camel_case() {
        let meta: Metadata =
            serde_json::from_str(r#"{"total": 12, "page": 2, "itemsPerPage": 8}"#).unwrap();
        assert_eq!(meta.items_per_page, 8);
        assert_eq!(meta.page_count(), 2);
    }
}
