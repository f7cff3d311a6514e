//! Git log API - serves `git log --graph` history as structured JSON.
//!
//! A request names a working copy; the service renders its history with
//! `git log --all --graph`, parses every line into a `CommitRecord`, and
//! reduces the records to author and branch statistics.

pub mod config;
pub mod error;
pub mod git;
pub mod log;
pub mod models;
pub mod pidfile;
pub mod probe;
pub mod routes;
pub mod service;

pub use error::{AppError, Result};
pub use routes::{create_router, AppState};
pub use service::HistoryService;
