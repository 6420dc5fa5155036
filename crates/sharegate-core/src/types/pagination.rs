//! Offset pagination types for directory queries.
//!
//! The principal directory is paged with `from`/`size` offsets rather
//! than page numbers, matching the search backend it fronts.

use serde::{Deserialize, Serialize};

/// Default page size.
pub const DEFAULT_PAGE_SIZE: u64 = 10;
/// Maximum page size.
pub const MAX_PAGE_SIZE: u64 = 100;

/// Request parameters for paginated queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRequest {
    /// Zero-based offset of the first item.
    #[serde(default)]
    pub from: u64,
    /// Number of items to return.
    #[serde(default = "default_size")]
    pub size: u64,
}

impl PageRequest {
    /// Create a new page request, clamping `size` into `1..=max_size`.
    pub fn new(from: u64, size: u64, max_size: u64) -> Self {
        Self {
            from,
            size: size.clamp(1, max_size.max(1)),
        }
    }

    /// The request for the page following this one.
    pub fn next(&self) -> Self {
        Self {
            from: self.from + self.size,
            size: self.size,
        }
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            from: 0,
            size: DEFAULT_PAGE_SIZE,
        }
    }
}

/// Paginated response wrapper.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageResponse<T> {
    /// The items on this page.
    pub items: Vec<T>,
    /// Offset of the first item on this page.
    pub from: u64,
    /// Requested page size.
    pub size: u64,
    /// Total number of items matching the query.
    pub total: u64,
}

impl<T> PageResponse<T> {
    /// Create a new paginated response.
    pub fn new(items: Vec<T>, page: PageRequest, total: u64) -> Self {
        Self {
            items,
            from: page.from,
            size: page.size,
            total,
        }
    }

    /// Create an empty response.
    pub fn empty(page: PageRequest) -> Self {
        Self::new(Vec::new(), page, 0)
    }

    /// Whether more items exist after this page.
    pub fn has_next(&self) -> bool {
        self.from + (self.items.len() as u64) < self.total
    }

    /// Map every item on the page, keeping the paging metadata.
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> PageResponse<U> {
        PageResponse {
            items: self.items.into_iter().map(f).collect(),
            from: self.from,
            size: self.size,
            total: self.total,
        }
    }
}

fn default_size() -> u64 {
    DEFAULT_PAGE_SIZE
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_size_is_clamped() {
        assert_eq!(PageRequest::new(0, 0, 100).size, 1);
        assert_eq!(PageRequest::new(0, 500, 100).size, 100);
        assert_eq!(PageRequest::new(20, 10, 100).next().from, 30);
    }

    #[test]
    fn test_has_next() {
        let page = PageRequest::new(0, 2, 100);
        let resp = PageResponse::new(vec![1, 2], page, 3);
        assert!(resp.has_next());
        let resp = PageResponse::new(vec![3], page.next(), 3);
        assert!(!resp.has_next());
    }
}
