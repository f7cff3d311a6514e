use serde::{Deserialize, Serialize};

/// One line of graph-decorated log output.
///
/// `line_number` is the 1-based position in the raw output, so gaps appear
/// wherever blank or unrecognised lines were skipped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitRecord {
    pub line_number: usize,
    #[serde(rename = "graph")]
    pub graph_prefix: String,
    pub hash: String,
    pub refs: String,
    pub message: String,
    #[serde(rename = "time")]
    pub relative_time: String,
    pub author: String,
    pub raw_line: String,
    pub is_graph_only: bool,
}

impl CommitRecord {
    /// A connector-only line: no hash, message, time or author.
    pub fn graph_only(line_number: usize, graph_prefix: String, raw_line: &str) -> Self {
        Self {
            line_number,
            graph_prefix,
            hash: String::new(),
            refs: String::new(),
            message: String::new(),
            relative_time: String::new(),
            author: String::new(),
            raw_line: raw_line.to_string(),
            is_graph_only: true,
        }
    }
}
