//! Liveness endpoint.

use axum::Json;
use chrono::Utc;
use serde_json::{Value, json};

/// Health check with timestamp
#[utoipa::path(
    get,
    path = "/health",
    tag = "system",
    responses((status = 200, description = "Service is up")),
)]
pub async fn health() -> Json<Value> {
    Json(json!({
        "status": "healthy",
        "timestamp": Utc::now(),
    }))
}
