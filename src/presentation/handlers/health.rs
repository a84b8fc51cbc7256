use axum::Json;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde::Serialize;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
}

pub async fn health_handler() -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(HealthResponse {
            status: "healthy".to_string(),
        }),
    )
}

/// Cheap endpoint for keep-alive pings from hosts that idle the process.
pub async fn wakeup_handler() -> impl IntoResponse {
    tracing::debug!("Wakeup ping");
    (StatusCode::OK, "awake")
}
