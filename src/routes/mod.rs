//! API route handlers - maps HTTP endpoints to the history service.
//!
//! Each submodule defines routes for a feature area:
//! - `git_log`: Parsed history with statistics (POST /api/git-log)
//! - `repository`: Basic repo info (POST /api/repository-info)
//! - `health`: Liveness probe (GET /api/health)

pub mod git_log;
pub mod health;
pub mod repository;

use axum::extract::rejection::JsonRejection;
use axum::{Json, Router};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

use crate::error::AppError;
use crate::service::HistoryService;

/// State shared by every handler.
///
/// `shutdown` is cancelled when the server stops; handlers hand a child token
/// to git so in-flight commands are killed.
#[derive(Clone)]
pub struct AppState {
    pub service: Arc<HistoryService>,
    pub shutdown: CancellationToken,
}

impl AppState {
    pub fn new(service: HistoryService) -> Self {
        Self {
            service: Arc::new(service),
            shutdown: CancellationToken::new(),
        }
    }
}

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .merge(git_log::routes(state.clone()))
        .merge(repository::routes(state))
        .merge(health::routes())
}

/// Turn a body rejection into the JSON failure shape instead of axum's plain text.
fn json_body<T>(payload: Result<Json<T>, JsonRejection>) -> Result<T, AppError> {
    payload
        .map(|Json(body)| body)
        .map_err(|e| AppError::InvalidRequest(e.body_text()))
}
