use axum::Json;
use serde::Serialize;
use serde_json::{Value, json};

use crate::response::ApiResponse;

pub const SERVICE_NAME: &str = "weather-gateway";

#[derive(Debug, Serialize)]
pub struct HealthStatus {
    pub status: &'static str,
    pub service: &'static str,
    pub version: &'static str,
}

/// Liveness probe: no upstream call, always succeeds.
pub async fn health() -> Json<ApiResponse<HealthStatus>> {
    Json(ApiResponse::ok(HealthStatus {
        status: "ok",
        service: SERVICE_NAME,
        version: env!("CARGO_PKG_VERSION"),
    }))
}

/// Root welcome payload pointing at the health endpoint.
pub async fn index() -> Json<Value> {
    Json(json!({
        "message": "Welcome to the weather gateway",
        "version": env!("CARGO_PKG_VERSION"),
        "docs": "/health",
    }))
}
