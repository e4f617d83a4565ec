//! Route definitions for the movie catalog.

use axum::routing::get;
use axum::Router;

use crate::handlers::movies;
use crate::state::AppState;

/// Routes mounted at `/movies`.
///
/// ```text
/// GET /search        -> search
/// GET /suggestions   -> suggestions
/// GET /{id}          -> detail
/// ```
///
/// Static segments are registered alongside the `{id}` capture; axum
/// prefers the static match, so `/search` never parses as an id.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/search", get(movies::search))
        .route("/suggestions", get(movies::suggestions))
        .route("/{id}", get(movies::detail))
}
