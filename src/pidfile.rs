//! PID file backing the `status` and `kill` subcommands.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PidInfo {
    pub pid: u32,
    pub addr: String,
}

impl PidInfo {
    pub fn current(addr: impl Into<String>) -> Self {
        Self {
            pid: std::process::id(),
            addr: addr.into(),
        }
    }

    pub fn url(&self) -> String {
        format!("http://{}", self.addr)
    }
}

pub fn default_path() -> PathBuf {
    std::env::temp_dir().join("gitlog-api.pid")
}

pub fn read(path: &Path) -> Option<PidInfo> {
    let contents = fs::read_to_string(path).ok()?;
    serde_json::from_str(&contents).ok()
}

pub fn write(path: &Path, info: &PidInfo) -> anyhow::Result<()> {
    fs::write(path, serde_json::to_string(info)?)?;
    Ok(())
}

pub fn remove(path: &Path) {
    let _ = fs::remove_file(path);
}

#[cfg(unix)]
pub fn is_process_running(pid: u32) -> bool {
    // signal 0 only checks that the process exists
    unsafe { libc::kill(pid as libc::pid_t, 0) == 0 }
}

#[cfg(unix)]
pub fn terminate(pid: u32) -> bool {
    unsafe { libc::kill(pid as libc::pid_t, libc::SIGTERM) == 0 }
}

#[cfg(windows)]
pub fn is_process_running(pid: u32) -> bool {
    std::process::Command::new("tasklist")
        .args(["/FI", &format!("PID eq {pid}"), "/NH"])
        .output()
        .map(|output| String::from_utf8_lossy(&output.stdout).contains(&pid.to_string()))
        .unwrap_or(false)
}

#[cfg(windows)]
pub fn terminate(pid: u32) -> bool {
    std::process::Command::new("taskkill")
        .args(["/PID", &pid.to_string(), "/F"])
        .status()
        .map(|status| status.success())
        .unwrap_or(false)
}
