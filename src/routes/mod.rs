//! Router assembly: HTTP endpoints, static files, CORS, and HTTP tracing.

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    services::{ServeDir, ServeFile},
    trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

use crate::state::AppState;

pub mod http;

/// Build the application router with:
/// - REST-ish API under `/api/v1/...`
/// - Static SPA from `./static` with index fallback
/// - CORS (allow any origin/method/headers); tighten for production
/// - HTTP trace layer (per-request spans w/ method, path, status, latency)
pub fn build_router(state: Arc<AppState>) -> Router {
    // Static files with SPA fallback
    let static_service = ServeDir::new("./static")
        .append_index_html_on_directories(true)
        .not_found_service(ServeFile::new("./static/index.html"));

    Router::new()
        .route("/api/v1/health", get(http::http_health))
        .route("/api/v1/catalogue", get(http::http_get_catalogue))
        .route("/api/v1/score", post(http::http_post_score))
        .route(
            "/api/v1/assessments",
            get(http::http_list_assessments).post(http::http_post_assessment),
        )
        .route(
            "/api/v1/assessments/:id",
            get(http::http_get_assessment).delete(http::http_delete_assessment),
        )
        .route(
            "/api/v1/assessments/:id/categories/:category",
            get(http::http_get_category_detail),
        )
        .route("/api/v1/compare", get(http::http_get_compare))
        .route("/api/v1/import/preview", post(http::http_post_import_preview))
        .route("/api/v1/import", post(http::http_post_import))
        // State + CORS + HTTP tracing
        .with_state(state)
        .layer(
            ServiceBuilder::new()
                .layer(
                    TraceLayer::new_for_http()
                        .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                        .on_request(DefaultOnRequest::new().level(Level::INFO))
                        .on_response(DefaultOnResponse::new().level(Level::INFO)),
                )
                .layer(
                    CorsLayer::new()
                        .allow_origin(Any)
                        .allow_methods(Any)
                        .allow_headers(Any),
                ),
        )
        // Frontend fallback
        .fallback_service(static_service)
}
