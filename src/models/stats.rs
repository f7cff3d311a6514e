use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthorCount {
    pub name: String,
    pub count: usize,
}

/// Aggregates over a parsed log.
///
/// `authors` is ordered by count descending, ties in first-seen order.
/// `branches` is a set; it serializes as a plain list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Statistics {
    pub total_commits: usize,
    pub total_lines: usize,
    pub authors: Vec<AuthorCount>,
    pub branches: BTreeSet<String>,
}
