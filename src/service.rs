//! Request pipeline shared by the HTTP handlers.
//!
//! `HistoryService` is built once at startup and holds the compiled parser
//! and aggregator, the git command runner, and the access policy. Every call
//! is self-contained: nothing is cached between requests.

use tokio_util::sync::CancellationToken;

use crate::config::AccessPolicy;
use crate::error::{AppError, Result};
use crate::git::{GitLogCommand, GitRepository};
use crate::log::{LogParser, StatsAggregator};
use crate::models::{GitLogData, RepositoryInfo};

#[derive(Debug)]
pub struct HistoryService {
    parser: LogParser,
    aggregator: StatsAggregator,
    command: GitLogCommand,
    policy: AccessPolicy,
}

impl HistoryService {
    pub fn new(command: GitLogCommand, policy: AccessPolicy) -> std::result::Result<Self, regex::Error> {
        Ok(Self {
            parser: LogParser::new()?,
            aggregator: StatsAggregator::new()?,
            command,
            policy,
        })
    }

    pub fn parser(&self) -> &LogParser {
        &self.parser
    }

    pub fn aggregator(&self) -> &StatsAggregator {
        &self.aggregator
    }

    /// Validate the path and apply the allowlist.
    pub fn open(&self, repo_path: &str) -> Result<GitRepository> {
        if repo_path.trim().is_empty() {
            return Err(AppError::InvalidRequest(
                "repository path is required".to_string(),
            ));
        }
        let repo = GitRepository::open(repo_path)?;
        self.policy.check_path(&repo.path)?;
        Ok(repo)
    }

    pub fn repository_info(&self, repo_path: &str) -> Result<RepositoryInfo> {
        Ok(self.open(repo_path)?.info())
    }

    pub async fn git_log(
        &self,
        repo_path: &str,
        max_count: Option<u32>,
        cancel: &CancellationToken,
    ) -> Result<GitLogData> {
        let repo = self.open(repo_path)?;
        let repository = repo.info();

        let max_count = self.policy.effective_max_count(max_count);
        let raw = self.command.fetch_log(&repo.path, max_count, cancel).await?;

        let commits = self.parser.parse(&raw);
        let statistics = self.aggregator.aggregate(&commits);
        tracing::info!(
            repo = %repo.path.display(),
            ?max_count,
            lines = statistics.total_lines,
            commits = statistics.total_commits,
            "parsed git log"
        );

        Ok(GitLogData {
            repository,
            commits,
            statistics,
        })
    }
}
