use axum::{routing::get, Json, Router};

use crate::models::HealthStatus;

pub fn routes() -> Router {
    Router::new().route("/api/health", get(health_check))
}

async fn health_check() -> Json<HealthStatus> {
    Json(HealthStatus {
        status: "healthy".to_string(),
        message: "Git log API is running".to_string(),
    })
}
