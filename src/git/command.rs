//! Runs `git log --graph` as a subprocess.
//!
//! The child is spawned with `kill_on_drop`, and the future that owns it is
//! raced against the configured timeout and a cancellation token. Whichever
//! side loses is dropped, so the subprocess is killed on every exit path
//! other than normal completion.

use std::path::Path;
use std::process::Stdio;
use std::time::Duration;

use tokio::process::Command;
use tokio_util::sync::CancellationToken;

use crate::error::{AppError, Result};

/// One line per commit: hash, decoration, subject, relative author date, author.
pub const LOG_FORMAT: &str =
    "%Cred%h%Creset -%C(yellow)%d%Creset %s %Cgreen(%ar) %C(bold blue)<%an>%Creset";

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Clone)]
pub struct GitLogCommand {
    git_bin: String,
    timeout: Duration,
}

impl Default for GitLogCommand {
    fn default() -> Self {
        Self::new("git", DEFAULT_TIMEOUT)
    }
}

impl GitLogCommand {
    pub fn new(git_bin: impl Into<String>, timeout: Duration) -> Self {
        Self {
            git_bin: git_bin.into(),
            timeout,
        }
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Arguments for the log invocation. `None` or `Some(0)` means unbounded.
    pub fn args(max_count: Option<u32>) -> Vec<String> {
        let mut args = vec![
            "log".to_string(),
            "--all".to_string(),
            "--graph".to_string(),
            format!("--pretty=format:{LOG_FORMAT}"),
            "--abbrev-commit".to_string(),
        ];
        if let Some(n) = max_count.filter(|n| *n > 0) {
            args.push("-n".to_string());
            args.push(n.to_string());
        }
        args
    }

    /// Fetch the rendered history of the repository at `repo_dir`.
    pub async fn fetch_log(
        &self,
        repo_dir: &Path,
        max_count: Option<u32>,
        cancel: &CancellationToken,
    ) -> Result<String> {
        let args = Self::args(max_count);
        tracing::debug!(repo = %repo_dir.display(), ?max_count, "running git log");

        let child = Command::new(&self.git_bin)
            .args(&args)
            .current_dir(repo_dir)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| AppError::Internal(format!("failed to spawn {}: {}", self.git_bin, e)))?;

        let output = tokio::select! {
            res = tokio::time::timeout(self.timeout, child.wait_with_output()) => match res {
                Ok(output) => output?,
                Err(_) => {
                    tracing::warn!(repo = %repo_dir.display(), timeout = ?self.timeout, "git log timed out");
                    return Err(AppError::Timeout(self.timeout));
                }
            },
            _ = cancel.cancelled() => {
                tracing::info!(repo = %repo_dir.display(), "git log cancelled");
                return Err(AppError::Cancelled);
            }
        };

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            return Err(AppError::CommandFailed { stderr });
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}
