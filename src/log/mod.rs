//! Parsing and aggregation of `git log --graph` output.
//!
//! - `ansi`: strips terminal escape sequences before matching
//! - `parser`: classifies each line as a commit, a graph connector, or noise
//! - `stats`: reduces parsed records to author and branch statistics
//!
//! Both `LogParser` and `StatsAggregator` compile their patterns once and are
//! immutable afterwards, so a single instance is shared across requests.

pub mod ansi;
pub mod parser;
pub mod stats;

pub use ansi::AnsiStripper;
pub use parser::LogParser;
pub use stats::StatsAggregator;
