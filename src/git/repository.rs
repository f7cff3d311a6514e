use git2::Repository;
use std::path::{Path, PathBuf};

use crate::error::{AppError, Result};
use crate::log::stats::TRACKED_REMOTE;
use crate::models::{RepositoryInfo, UNKNOWN_BRANCH};

/// A validated working copy: an existing directory with `.git` at its root.
#[derive(Debug, Clone)]
pub struct GitRepository {
    pub path: PathBuf,
}

impl GitRepository {
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        Ok(Self {
            path: validate(path)?,
        })
    }

    pub fn name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| self.path.to_string_lossy().to_string())
    }

    /// Best-effort metadata. Never fails: lookups that go wrong fall back to
    /// sentinels, and a repository that cannot be opened at all is reported
    /// through `RepositoryInfo::error`.
    pub fn info(&self) -> RepositoryInfo {
        let name = self.name();
        let absolute_path = self.path.to_string_lossy().to_string();

        let repo = match Repository::open(&self.path) {
            Ok(repo) => repo,
            Err(e) => {
                tracing::warn!(repo = %absolute_path, error = %e, "failed to open repository for info");
                return RepositoryInfo::degraded(name, absolute_path, e.message().to_string());
            }
        };

        let current_branch = match repo.head() {
            Ok(head) => head
                .shorthand()
                .map(|s| s.to_string())
                .unwrap_or_else(|| UNKNOWN_BRANCH.to_string()),
            Err(e) => {
                tracing::warn!(repo = %absolute_path, error = %e, "could not resolve HEAD");
                UNKNOWN_BRANCH.to_string()
            }
        };

        let remote_url = match repo.find_remote(TRACKED_REMOTE) {
            Ok(remote) => remote.url().unwrap_or_default().to_string(),
            Err(e) => {
                tracing::debug!(repo = %absolute_path, error = %e, "no origin remote");
                String::new()
            }
        };

        RepositoryInfo {
            name,
            absolute_path,
            current_branch,
            remote_url,
            error: None,
        }
    }
}

/// Resolve `path` to an absolute path and check it is a working copy.
pub fn validate<P: AsRef<Path>>(path: P) -> Result<PathBuf> {
    let path = path.as_ref();
    let display = path.to_string_lossy().to_string();

    if !path.exists() {
        return Err(AppError::InvalidRepository(format!(
            "path does not exist: {}",
            display
        )));
    }
    let absolute = std::fs::canonicalize(path)?;
    if !absolute.is_dir() {
        return Err(AppError::InvalidRepository(format!(
            "path is not a directory: {}",
            absolute.display()
        )));
    }
    if !absolute.join(".git").exists() {
        return Err(AppError::InvalidRepository(format!(
            "not a git repository: {}",
            absolute.display()
        )));
    }

    Ok(absolute)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_missing_path() {
        let err = validate("/nonexistent/path/for/gitlog-api").unwrap_err();
        assert!(matches!(err, AppError::InvalidRepository(_)));
        assert!(err.to_string().contains("does not exist"));
    }

    #[test]
    fn rejects_regular_file() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("notes.txt");
        std::fs::write(&file, "hello").unwrap();

        let err = validate(&file).unwrap_err();
        assert!(err.to_string().contains("not a directory"));
    }

    #[test]
    fn rejects_directory_without_metadata() {
        let dir = tempfile::tempdir().unwrap();
        let err = validate(dir.path()).unwrap_err();
        assert!(err.to_string().contains("not a git repository"));
    }

    #[test]
    fn relative_paths_become_absolute() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join(".git")).unwrap();
        std::fs::create_dir(dir.path().join("sub")).unwrap();
        let nested = dir.path().join("sub").join("..");

        let resolved = validate(&nested).unwrap();
        assert!(resolved.is_absolute());
        assert_eq!(resolved, std::fs::canonicalize(dir.path()).unwrap());
    }

    #[test]
    fn info_degrades_when_metadata_is_unreadable() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join(".git")).unwrap();

        // an empty .git directory passes validation but git2 cannot open it
        let repo = GitRepository::open(dir.path()).unwrap();
        let info = repo.info();

        assert!(info.error.is_some());
        assert_eq!(info.current_branch, UNKNOWN_BRANCH);
        assert_eq!(info.remote_url, "");
        assert_eq!(info.name, repo.name());
    }

    #[test]
    fn info_reads_branch_and_remote() {
        let dir = tempfile::tempdir().unwrap();
        let repo = Repository::init(dir.path()).unwrap();
        repo.remote("origin", "https://example.com/demo.git").unwrap();

        let info = GitRepository::open(dir.path()).unwrap().info();

        assert_eq!(info.error, None);
        assert_eq!(info.remote_url, "https://example.com/demo.git");
        // HEAD of a fresh repository is unborn
        assert_eq!(info.current_branch, UNKNOWN_BRANCH);
    }
}
