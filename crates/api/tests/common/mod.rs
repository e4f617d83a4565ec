#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::Request;
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;

use cineteca_api::config::ServerConfig;
use cineteca_api::router::build_app_router;
use cineteca_api::state::AppState;

/// Build a test `ServerConfig` with safe defaults.
///
/// Uses `http://localhost:5173` as CORS origin (matching the dev default)
/// and a 30-second request timeout.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
    }
}

/// Build the full application router with all middleware layers, using the
/// given database pool.
///
/// Delegates to the same `build_app_router` that `main.rs` uses, so
/// integration tests exercise the production middleware stack (CORS,
/// request ID, timeout, tracing, panic recovery).
pub fn build_test_app(pool: PgPool) -> Router {
    let config = test_config();
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
    };
    build_app_router(state, &config)
}

/// Send a GET request to the app and return the raw response.
pub async fn get(app: Router, uri: &str) -> Response {
    app.oneshot(
        Request::builder()
            .uri(uri)
            .body(Body::empty())
            .expect("failed to build request"),
    )
    .await
    .expect("request failed")
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response) -> serde_json::Value {
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("failed to read body")
        .to_bytes();
    serde_json::from_slice(&bytes).expect("body is not valid JSON")
}

// ---------------------------------------------------------------------------
// Seed helpers
// ---------------------------------------------------------------------------

/// Insert a movie row. `date` and `minute` must be set for the movie to be
/// searchable: the default search branches (`date <= cutoff`,
/// `minute <= threshold`) exclude NULL values.
pub async fn seed_movie(
    pool: &PgPool,
    id: i64,
    name: &str,
    date: i32,
    rating: Option<f64>,
    minute: i32,
) {
    sqlx::query(
        "INSERT INTO movies (id, name, date, rating, minute) VALUES ($1, $2, $3, $4, $5)",
    )
    .bind(id)
    .bind(name)
    .bind(date)
    .bind(rating)
    .bind(minute)
    .execute(pool)
    .await
    .expect("failed to seed movie");
}

pub async fn add_genre(pool: &PgPool, id_movie: i64, genre: &str) {
    sqlx::query("INSERT INTO genres (id_movie, genre) VALUES ($1, $2)")
        .bind(id_movie)
        .bind(genre)
        .execute(pool)
        .await
        .expect("failed to seed genre");
}

pub async fn add_poster(pool: &PgPool, id_movie: i64, link: &str) {
    sqlx::query("INSERT INTO posters (id_movie, link) VALUES ($1, $2)")
        .bind(id_movie)
        .bind(link)
        .execute(pool)
        .await
        .expect("failed to seed poster");
}

pub async fn add_actor(pool: &PgPool, id_movie: i64, actor: &str, role: Option<&str>) {
    sqlx::query("INSERT INTO actors (id_movie, actor, role) VALUES ($1, $2, $3)")
        .bind(id_movie)
        .bind(actor)
        .bind(role)
        .execute(pool)
        .await
        .expect("failed to seed actor");
}
