//! Typed response envelopes for API handlers.
//!
//! Every success body carries `"success": true`; error bodies (built by
//! [`crate::error::AppError`]) carry `"success": false`. Use these structs
//! instead of ad-hoc `serde_json::json!` to get compile-time type safety
//! and consistent serialization.

use serde::Serialize;

use cineteca_core::filters::SearchFilters;
use cineteca_core::pagination::PaginationInfo;
use cineteca_db::models::movie::{MovieDetail, MovieListItem, Suggestion};

/// Envelope for `GET /api/movies/search`.
#[derive(Debug, Serialize)]
pub struct SearchResponse {
    pub success: bool,
    pub movies: Vec<MovieListItem>,
    pub pagination: PaginationInfo,
    /// Echo of the validated filter set actually applied, so callers can
    /// see which of their inputs survived validation.
    pub filters_applied: SearchFilters,
}

/// Envelope for `GET /api/movies/{id}`.
#[derive(Debug, Serialize)]
pub struct MovieResponse {
    pub success: bool,
    pub movie: MovieDetail,
}

/// Envelope for `GET /api/movies/suggestions`.
#[derive(Debug, Serialize)]
pub struct SuggestionsResponse {
    pub success: bool,
    pub suggestions: Vec<Suggestion>,
}
