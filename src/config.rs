//! Server configuration.
//!
//! Every option can be given as a flag or through a `GITLOG_*` environment
//! variable; flags win. `AccessPolicy` carries the per-request limits
//! (commit ceiling and path allowlist) into the service.

use anyhow::{bail, Context};
use axum::http::{header, HeaderValue, Method};
use clap::Args;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tower_http::cors::{AllowOrigin, CorsLayer};

use crate::error::{AppError, Result};

#[derive(Debug, Clone, Args)]
pub struct ServerArgs {
    /// Address to bind the HTTP server to
    #[arg(long, env = "GITLOG_HOST", default_value = "127.0.0.1")]
    pub host: String,

    /// Port to run the server on
    #[arg(short, long, env = "GITLOG_PORT", default_value_t = 5000)]
    pub port: u16,

    /// Upper bound on commits per request (0 disables the ceiling)
    #[arg(long, env = "GITLOG_MAX_COMMITS", default_value_t = 1000)]
    pub max_commits: u32,

    /// Seconds before a running git command is killed
    #[arg(
        long = "git-timeout",
        env = "GITLOG_GIT_TIMEOUT",
        value_name = "SECONDS",
        default_value_t = 30
    )]
    pub git_timeout_secs: u64,

    /// Directories repositories must live under (comma separated, empty allows all)
    #[arg(long, env = "GITLOG_ALLOWED_PATHS", value_delimiter = ',')]
    pub allowed_paths: Vec<PathBuf>,

    /// Origins allowed by CORS (comma separated)
    #[arg(
        long,
        env = "GITLOG_CORS_ORIGINS",
        value_delimiter = ',',
        default_values = ["http://localhost:3000", "http://127.0.0.1:3000"]
    )]
    pub cors_origins: Vec<String>,

    /// git executable used to render the log
    #[arg(long, env = "GITLOG_GIT_BIN", default_value = "git")]
    pub git_bin: String,
}

impl ServerArgs {
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.git_timeout_secs == 0 {
            bail!("git timeout must be at least one second");
        }
        self.cors_layer().map(drop)?;
        Ok(())
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn git_timeout(&self) -> Duration {
        Duration::from_secs(self.git_timeout_secs)
    }

    pub fn cors_layer(&self) -> anyhow::Result<CorsLayer> {
        let origins = self
            .cors_origins
            .iter()
            .map(|s| s.trim())
            .filter(|s| !s.is_empty())
            .map(|s| {
                HeaderValue::from_str(s).with_context(|| format!("invalid CORS origin: {s:?}"))
            })
            .collect::<anyhow::Result<Vec<_>>>()?;

        Ok(CorsLayer::new()
            .allow_origin(AllowOrigin::list(origins))
            .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
            .allow_headers([header::CONTENT_TYPE]))
    }

    pub fn access_policy(&self) -> AccessPolicy {
        let allowed_roots = self
            .allowed_paths
            .iter()
            .filter(|p| !p.as_os_str().is_empty())
            .map(|p| match std::fs::canonicalize(p) {
                Ok(root) => root,
                Err(e) => {
                    tracing::warn!(path = %p.display(), error = %e, "allowed path cannot be resolved");
                    p.clone()
                }
            })
            .collect();

        AccessPolicy {
            max_commits: self.max_commits,
            allowed_roots,
        }
    }
}

/// Limits applied to every request before git is invoked.
#[derive(Debug, Clone, Default)]
pub struct AccessPolicy {
    /// 0 means no ceiling.
    pub max_commits: u32,
    /// Empty means every path is allowed.
    pub allowed_roots: Vec<PathBuf>,
}

impl AccessPolicy {
    /// Combine a requested count with the ceiling. `None` means unbounded.
    pub fn effective_max_count(&self, requested: Option<u32>) -> Option<u32> {
        let requested = requested.filter(|n| *n > 0);
        match (requested, self.max_commits) {
            (requested, 0) => requested,
            (Some(n), ceiling) => Some(n.min(ceiling)),
            (None, ceiling) => Some(ceiling),
        }
    }

    /// `path` must already be canonical.
    pub fn check_path(&self, path: &Path) -> Result<()> {
        if self.allowed_roots.is_empty()
            || self.allowed_roots.iter().any(|root| path.starts_with(root))
        {
            return Ok(());
        }
        Err(AppError::PathNotAllowed(path.display().to_string()))
    }
}
