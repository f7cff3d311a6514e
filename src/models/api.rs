//! Request bodies and response envelopes for the JSON API.
//!
//! Responses keep the `{ success, data }` shape existing clients expect;
//! failures are produced by `AppError`.

use serde::{Deserialize, Serialize};

use super::{CommitRecord, RepositoryInfo, Statistics};

#[derive(Debug, Clone, Default, Deserialize)]
pub struct GitLogRequest {
    #[serde(default)]
    pub repo_path: String,
    #[serde(default)]
    pub max_count: Option<u32>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RepositoryInfoRequest {
    #[serde(default)]
    pub repo_path: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GitLogData {
    pub repository: RepositoryInfo,
    pub commits: Vec<CommitRecord>,
    pub statistics: Statistics,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: T,
}

impl<T> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    pub message: String,
}
