//! Handlers for the `/api/movies` resource.
//!
//! Read-only catalog queries: filtered search, detail aggregation, and
//! typeahead suggestions. Filter input is validated leniently (bad values
//! are dropped, never rejected), so the search handlers return 400 only for
//! a malformed movie id.

use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::Json;
// axum's plain Query cannot deserialize repeated parameters
// (`?genre=a&genre=b`) into a Vec; axum-extra's can.
use axum_extra::extract::Query;
use serde::Deserialize;

use cineteca_core::error::CoreError;
use cineteca_core::filters::{RawSearchParams, SearchFilters};
use cineteca_core::pagination::{clamp_page, clamp_per_page, PaginationInfo};
use cineteca_core::types::DbId;
use cineteca_db::repositories::MovieRepo;

use crate::error::{AppError, AppResult};
use crate::response::{MovieResponse, SearchResponse, SuggestionsResponse};
use crate::state::AppState;

/// Query parameters for the suggestions endpoint. All-optional strings so
/// extraction never rejects; a bad `limit` falls back to the default.
#[derive(Debug, Default, Deserialize)]
pub struct SuggestionParams {
    pub q: Option<String>,
    pub limit: Option<String>,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/movies/search
///
/// Filtered, sorted, paginated search. An impossible filter combination is
/// a success with an empty page, not an error. The response echoes the
/// validated filter set so callers can see which inputs were dropped.
pub async fn search(
    State(state): State<AppState>,
    Query(raw): Query<RawSearchParams>,
) -> AppResult<impl IntoResponse> {
    let filters = SearchFilters::from_raw(&raw);
    let page = clamp_page(raw.page.as_deref());
    let per_page = clamp_per_page(raw.per_page.as_deref());

    let (movies, total_results) = MovieRepo::search(&state.pool, &filters, page, per_page).await?;

    Ok(Json(SearchResponse {
        success: true,
        movies,
        pagination: PaginationInfo::new(page, per_page, total_results),
        filters_applied: filters,
    }))
}

/// GET /api/movies/{id}
///
/// Full movie detail aggregated from all child tables. The id is extracted
/// as a raw string so a non-numeric or non-positive value gets the endpoint's
/// own 400 body (with the offending id echoed) instead of a generic
/// extraction failure.
pub async fn detail(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> AppResult<impl IntoResponse> {
    let id: DbId = raw_id
        .parse()
        .ok()
        .filter(|id| *id > 0)
        .ok_or_else(|| AppError::InvalidMovieId(raw_id.clone()))?;

    let movie = MovieRepo::find_detail(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Movie",
            id,
        }))?;

    Ok(Json(MovieResponse {
        success: true,
        movie,
    }))
}

/// GET /api/movies/suggestions?q=&limit=
///
/// Typeahead suggestions. A missing or too-short query is a success with an
/// empty list so clients can call this on every keystroke.
pub async fn suggestions(
    State(state): State<AppState>,
    Query(params): Query<SuggestionParams>,
) -> AppResult<impl IntoResponse> {
    let query = params.q.as_deref().unwrap_or("");
    let limit = params
        .limit
        .as_deref()
        .and_then(|l| l.trim().parse::<i64>().ok());

    let suggestions = MovieRepo::suggestions(&state.pool, query, limit).await?;

    Ok(Json(SuggestionsResponse {
        success: true,
        suggestions,
    }))
}
