//! Pagination parameters and response metadata.

use serde::Serialize;

/// Default number of search results per page.
pub const DEFAULT_PER_PAGE: i64 = 20;

/// Maximum number of search results per page.
pub const MAX_PER_PAGE: i64 = 50;

/// Clamp a raw 1-based page number to >= 1. Unparseable input falls back
/// to the first page.
pub fn clamp_page(raw: Option<&str>) -> i64 {
    raw.and_then(|p| p.trim().parse::<i64>().ok())
        .unwrap_or(1)
        .max(1)
}

/// Clamp a raw page size into `[1, MAX_PER_PAGE]`, defaulting to
/// [`DEFAULT_PER_PAGE`] on absent or unparseable input.
pub fn clamp_per_page(raw: Option<&str>) -> i64 {
    raw.and_then(|p| p.trim().parse::<i64>().ok())
        .unwrap_or(DEFAULT_PER_PAGE)
        .max(1)
        .min(MAX_PER_PAGE)
}

/// Pagination metadata returned alongside every search result page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PaginationInfo {
    pub current_page: i64,
    pub per_page: i64,
    pub total_results: i64,
    pub total_pages: i64,
    pub has_next: bool,
    pub has_previous: bool,
}

impl PaginationInfo {
    /// Compute pagination metadata for a result set of `total_results` rows.
    ///
    /// `total_pages` is a ceiling division; `has_next` holds iff
    /// `page * per_page < total_results` and `has_previous` iff `page > 1`.
    pub fn new(current_page: i64, per_page: i64, total_results: i64) -> Self {
        let total_pages = (total_results + per_page - 1) / per_page;
        Self {
            current_page,
            per_page,
            total_results,
            total_pages,
            has_next: current_page < total_pages,
            has_previous: current_page > 1,
        }
    }
}
