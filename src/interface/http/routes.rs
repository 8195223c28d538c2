use axum::{routing::get, Router};
use tower_http::trace::TraceLayer;

use super::handlers::{health_handler, index_handler, metrics_handler, AppState};

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route(&state.telemetry_path, get(metrics_handler))
        .route("/api/health", get(health_handler))
        .route("/", get(index_handler))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
