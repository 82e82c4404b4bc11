//! Pagination utilities for list endpoints.
//!
//! List endpoints are paged with two query-string parameters:
//!
//! - `page`: page number (1-indexed, default: 1)
//! - `limit`: items per page (default: 100, capped at [`MAX_PAGE_SIZE`])
//!
//! Parsing is lenient. A value that is missing, non-numeric or below 1 falls
//! back to its default instead of rejecting the request.
//!
//! # Example
//!
//! ```ignore
//! use campus_core::pagination::{PageRequest, PaginationMeta};
//!
//! // GET /api/schools?page=3&limit=20
//! let page = PageRequest::parse(Some("3"), Some("20"));
//! assert_eq!(page.skip(), 40);
//!
//! let meta = PaginationMeta::new(&page, 95);
//! assert!(meta.has_more);
//! ```

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Page size used when `limit` is absent or unusable.
pub const DEFAULT_PAGE_SIZE: i64 = 100;

/// Upper bound applied to any requested `limit`.
pub const MAX_PAGE_SIZE: i64 = 1000;

/// A resolved page request: both values are always >= 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: i64,
    pub limit: i64,
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: 1,
            limit: DEFAULT_PAGE_SIZE,
        }
    }
}

impl PageRequest {
    /// Resolves raw `page` / `limit` query-string values.
    #[must_use]
    pub fn parse(page: Option<&str>, limit: Option<&str>) -> Self {
        let page = parse_positive(page).unwrap_or(1);
        let limit = parse_positive(limit)
            .unwrap_or(DEFAULT_PAGE_SIZE)
            .min(MAX_PAGE_SIZE);

        Self { page, limit }
    }

    /// Number of rows to skip: `(page - 1) * limit`.
    #[must_use]
    pub fn skip(&self) -> i64 {
        (self.page - 1).saturating_mul(self.limit)
    }
}

fn parse_positive(raw: Option<&str>) -> Option<i64> {
    raw.and_then(|s| s.trim().parse::<i64>().ok())
        .filter(|n| *n >= 1)
}

/// Metadata about a paginated response.
///
/// # Example JSON
///
/// ```json
/// { "total": 100, "limit": 10, "page": 3, "has_more": true }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct PaginationMeta {
    /// Total number of matching rows across all pages
    pub total: i64,
    /// Page size that was applied
    pub limit: i64,
    /// Current page number
    pub page: i64,
    /// Whether rows exist beyond this page
    pub has_more: bool,
}

impl PaginationMeta {
    pub fn new(request: &PageRequest, total: i64) -> Self {
        Self {
            total,
            limit: request.limit,
            page: request.page,
            has_more: request.skip().saturating_add(request.limit) < total,
        }
    }
}
