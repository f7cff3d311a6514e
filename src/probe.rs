//! `check` subcommand: exercises a running server's endpoints and prints a
//! short report for each.

use anyhow::{bail, Result};
use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::models::{GitLogData, HealthStatus, RepositoryInfo};

pub struct ApiClient {
    agent: ureq::Agent,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let agent = ureq::config::Config::builder()
            .http_status_as_error(false)
            .timeout_global(Some(Duration::from_secs(300)))
            .build()
            .new_agent();
        Self {
            agent,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn health(&self) -> Result<HealthStatus> {
        let response = self.agent.get(&format!("{}/api/health", self.base_url)).call()?;
        let status = response.status().as_u16();
        if status != 200 {
            bail!("HTTP {}", status);
        }
        Ok(response.into_body().read_json()?)
    }

    pub fn repository_info(&self, repo_path: &str) -> Result<RepositoryInfo> {
        self.post("/api/repository-info", json!({ "repo_path": repo_path }))
    }

    pub fn git_log(&self, repo_path: &str, max_count: Option<u32>) -> Result<GitLogData> {
        let mut body = json!({ "repo_path": repo_path });
        if let Some(n) = max_count {
            body["max_count"] = json!(n);
        }
        self.post("/api/git-log", body)
    }

    fn post<T: DeserializeOwned>(&self, path: &str, body: Value) -> Result<T> {
        let response = self
            .agent
            .post(&format!("{}{}", self.base_url, path))
            .send_json(&body)?;
        let status = response.status().as_u16();
        let mut envelope: Value = response.into_body().read_json()?;

        if status >= 400 || envelope["success"] != json!(true) {
            let message = envelope["error"].as_str().unwrap_or("unknown error");
            bail!("HTTP {}: {}", status, message);
        }
        Ok(serde_json::from_value(envelope["data"].take())?)
    }
}

/// Pick the repository to probe: the given path, or the current directory if
/// it is a working copy.
pub fn resolve_repo(repo: Option<PathBuf>) -> Option<PathBuf> {
    match repo {
        Some(path) => Some(path),
        None => {
            let cwd = std::env::current_dir().ok()?;
            cwd.join(".git").exists().then_some(cwd)
        }
    }
}

/// Run every probe, print the results, and report whether all passed.
pub fn run(base_url: &str, repo: Option<PathBuf>, max_count: Option<u32>) -> bool {
    let client = ApiClient::new(base_url);
    println!("Checking {}", base_url);
    println!();

    match client.health() {
        Ok(health) => println!("✓ health: {} ({})", health.status, health.message),
        Err(e) => {
            println!("✗ health: {}", e);
            println!("  Is the server running?");
            return false;
        }
    }

    let Some(repo) = resolve_repo(repo) else {
        println!("✗ no repository given and the current directory is not a git repository");
        return false;
    };
    let repo_path = repo.to_string_lossy().to_string();

    let info_ok = report_repository_info(&client, &repo_path);
    let log_ok = report_git_log(&client, &repo_path, max_count);

    let passed = 1 + usize::from(info_ok) + usize::from(log_ok);
    println!();
    println!("{}/3 checks passed", passed);
    passed == 3
}

fn report_repository_info(client: &ApiClient, repo_path: &str) -> bool {
    match client.repository_info(repo_path) {
        Ok(info) => {
            println!("✓ repository-info: {}", info.name);
            println!("  Branch: {}", info.current_branch);
            println!("  Remote: {}", display_or_none(&info.remote_url));
            if let Some(error) = info.error {
                println!("  Warning: {}", error);
            }
            true
        }
        Err(e) => {
            println!("✗ repository-info: {}", e);
            false
        }
    }
}

fn report_git_log(client: &ApiClient, repo_path: &str, max_count: Option<u32>) -> bool {
    match client.git_log(repo_path, max_count) {
        Ok(data) => {
            let stats = &data.statistics;
            println!("✓ git-log: {}", Path::new(repo_path).display());
            println!("  Lines:    {}", stats.total_lines);
            println!("  Commits:  {}", stats.total_commits);
            println!("  Authors:  {}", stats.authors.len());
            println!("  Branches: {}", stats.branches.len());
            for commit in data.commits.iter().filter(|c| !c.is_graph_only).take(3) {
                let message: String = commit.message.chars().take(50).collect();
                println!(
                    "    {} {} ({}, {})",
                    commit.hash, message, commit.author, commit.relative_time
                );
            }
            true
        }
        Err(e) => {
            println!("✗ git-log: {}", e);
            false
        }
    }
}

fn display_or_none(value: &str) -> &str {
    if value.is_empty() { "(none)" } else { value }
}
