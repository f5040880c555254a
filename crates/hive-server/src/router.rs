//! Router assembly.

use axum::routing::{get, post};
use axum::{Json, Router};
use metrics_exporter_prometheus::PrometheusHandle;
use serde_json::json;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::handlers::{generate, projects};
use crate::state::AppState;

async fn health() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

/// Build the full application router.
///
/// `metrics` is optional so tests can skip installing the global recorder.
pub fn build_router(state: AppState, metrics: Option<PrometheusHandle>) -> Router {
    Router::new()
        .route("/health", get(health))
        .route(
            "/metrics",
            get(move || {
                let handle = metrics.clone();
                async move { handle.map(|h| h.render()).unwrap_or_default() }
            }),
        )
        .route(
            "/api/projects",
            post(projects::create).get(projects::list),
        )
        .route("/api/projects/{id}", get(projects::snapshot))
        .route("/api/projects/{id}/generate", post(generate::generate))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
