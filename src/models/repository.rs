use serde::{Deserialize, Serialize};

pub const UNKNOWN_BRANCH: &str = "unknown";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepositoryInfo {
    pub name: String,
    #[serde(rename = "path")]
    pub absolute_path: String,
    pub current_branch: String,
    pub remote_url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl RepositoryInfo {
    /// Info with every field at its sentinel value and the failure attached.
    pub fn degraded(name: String, absolute_path: String, error: String) -> Self {
        Self {
            name,
            absolute_path,
            current_branch: UNKNOWN_BRANCH.to_string(),
            remote_url: String::new(),
            error: Some(error),
        }
    }
}
