use std::sync::Arc;

use axum::{
    extract::State,
    http::{header, StatusCode},
    response::{Html, IntoResponse, Response},
    Json,
};
use prometheus::{Encoder, Registry, TextEncoder};
use tracing::error;

use crate::ports::BucketStore;

/// Custom error type that implements IntoResponse
#[derive(Debug)]
pub struct AppError(String);

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        (StatusCode::INTERNAL_SERVER_ERROR, self.0).into_response()
    }
}

impl From<prometheus::Error> for AppError {
    fn from(err: prometheus::Error) -> Self {
        AppError(err.to_string())
    }
}

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub registry: Registry,
    pub store: Arc<dyn BucketStore>,
    pub telemetry_path: String,
}

/// Handler for GET <telemetry path>
pub async fn metrics_handler(State(state): State<AppState>) -> Result<Response, AppError> {
    let encoder = TextEncoder::new();
    let families = state.registry.gather();

    let mut buffer = Vec::with_capacity(64 * 1024);
    if let Err(e) = encoder.encode(&families, &mut buffer) {
        error!("Failed to encode metrics: {}", e);
        return Err(e.into());
    }

    Ok((
        StatusCode::OK,
        [(header::CONTENT_TYPE, encoder.format_type().to_string())],
        buffer,
    )
        .into_response())
}

/// Handler for GET /
pub async fn index_handler(State(state): State<AppState>) -> Html<String> {
    Html(format!(
        r#"<html>
<head><title>Couchbase Exporter</title></head>
<body>
    <h1>Couchbase Exporter</h1>
    <p><a href="{path}">Metrics</a></p>
</body>
</html>
"#,
        path = state.telemetry_path
    ))
}

/// Handler for GET /api/health
pub async fn health_handler(
    State(state): State<AppState>,
) -> (StatusCode, Json<serde_json::Value>) {
    let names = state.store.list_names();
    let entries: Vec<_> = names
        .iter()
        .filter_map(|name| state.store.get(name))
        .filter(|entry| entry.is_fetched())
        .collect();
    let last_fetch = entries.iter().filter_map(|entry| entry.fetched_at).max();

    (
        StatusCode::OK,
        Json(serde_json::json!({
            "status": "healthy",
            "service": "couchbase-exporter",
            "tracked_buckets": names.len(),
            "fetched_buckets": entries.len(),
            "last_fetch": last_fetch.map(|t| t.to_rfc3339()),
        })),
    )
}
