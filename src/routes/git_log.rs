use axum::{extract::rejection::JsonRejection, extract::State, routing::post, Json, Router};

use super::{json_body, AppState};
use crate::error::Result;
use crate::models::{ApiResponse, GitLogData, GitLogRequest};

pub fn routes(state: AppState) -> Router {
    Router::new()
        .route("/api/git-log", post(get_git_log))
        .with_state(state)
}

async fn get_git_log(
    State(state): State<AppState>,
    payload: std::result::Result<Json<GitLogRequest>, JsonRejection>,
) -> Result<Json<ApiResponse<GitLogData>>> {
    let request = json_body(payload)?;
    let cancel = state.shutdown.child_token();
    let data = state
        .service
        .git_log(&request.repo_path, request.max_count, &cancel)
        .await?;
    Ok(Json(ApiResponse::ok(data)))
}
