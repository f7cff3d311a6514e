use axum::{extract::rejection::JsonRejection, extract::State, routing::post, Json, Router};

use super::{json_body, AppState};
use crate::error::Result;
use crate::models::{ApiResponse, RepositoryInfo, RepositoryInfoRequest};

pub fn routes(state: AppState) -> Router {
    Router::new()
        .route("/api/repository-info", post(get_repository_info))
        .with_state(state)
}

async fn get_repository_info(
    State(state): State<AppState>,
    payload: std::result::Result<Json<RepositoryInfoRequest>, JsonRejection>,
) -> Result<Json<ApiResponse<RepositoryInfo>>> {
    let request = json_body(payload)?;
    let info = state.service.repository_info(&request.repo_path)?;
    Ok(Json(ApiResponse::ok(info)))
}
