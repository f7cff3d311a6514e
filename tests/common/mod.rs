#![allow(dead_code)]

use std::path::Path;
use std::process::Command;

pub fn has_git() -> bool {
    Command::new("git").arg("--version").output().is_ok()
}

/// Run git in `dir` as `author`, panicking on failure. Returns trimmed stdout.
pub fn git_as(dir: &Path, author: &str, args: &[&str]) -> String {
    let email = format!("{}@example.com", author.to_lowercase().replace(' ', "."));
    let output = Command::new("git")
        .args(["-c", "commit.gpgsign=false", "-c", "core.autocrlf=false"])
        .args(args)
        .current_dir(dir)
        .env("GIT_AUTHOR_NAME", author)
        .env("GIT_AUTHOR_EMAIL", &email)
        .env("GIT_COMMITTER_NAME", author)
        .env("GIT_COMMITTER_EMAIL", &email)
        .output()
        .unwrap();
    assert!(
        output.status.success(),
        "git {:?} failed: {}",
        args,
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8_lossy(&output.stdout).trim().to_string()
}

pub fn git(dir: &Path, args: &[&str]) -> String {
    git_as(dir, "Test User", args)
}

pub fn init_repo(dir: &Path) {
    git(dir, &["init", "-q"]);
    git(dir, &["symbolic-ref", "HEAD", "refs/heads/main"]);
}

pub fn commit_file(dir: &Path, author: &str, file: &str, content: &str, message: &str) {
    std::fs::write(dir.join(file), content).unwrap();
    git_as(dir, author, &["add", file]);
    git_as(dir, author, &["commit", "-q", "-m", message]);
}

/// main: Initial commit (Alice) → Fix <bug> (Alice) → Merge feature (Alice)
/// feature: Add feature (part 1) (Bob)
///
/// `origin/main` and `origin/feature` point at the merge and the feature tip.
pub fn build_history(dir: &Path) {
    init_repo(dir);
    git(dir, &["remote", "add", "origin", "https://example.com/demo.git"]);

    commit_file(dir, "Alice", "README.md", "hello\n", "Initial commit");

    git(dir, &["checkout", "-q", "-b", "feature"]);
    commit_file(dir, "Bob", "feature.txt", "feature\n", "Add feature (part 1)");

    git(dir, &["checkout", "-q", "main"]);
    commit_file(dir, "Alice", "README.md", "hello world\n", "Fix <bug> in greeting");
    git_as(dir, "Alice", &["merge", "-q", "--no-ff", "feature", "-m", "Merge feature"]);

    git(dir, &["update-ref", "refs/remotes/origin/main", "main"]);
    git(dir, &["update-ref", "refs/remotes/origin/feature", "feature"]);
}
