//! Health check handler

use axum::response::Json;
use serde::{Deserialize, Serialize};
use tracing::instrument;
use utoipa_axum::{router::OpenApiRouter, routes};

use crate::state::DemoState;

/// Health check response
#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

/// Health check endpoint
#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Service is healthy", body = HealthResponse)
    ),
    tag = "health"
)]
#[instrument(name = "health_check")]
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
    })
}

/// Add health routes
pub fn add_routes(router: OpenApiRouter<DemoState>) -> OpenApiRouter<DemoState> {
    router.routes(routes!(health_check))
}
