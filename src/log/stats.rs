use regex::Regex;
use std::collections::{BTreeSet, HashMap};

use crate::models::{AuthorCount, CommitRecord, Statistics};

/// Remote whose tracking branches are reported in `Statistics::branches`.
///
/// Local branches and tags in a decoration are not extracted.
pub const TRACKED_REMOTE: &str = "origin";

#[derive(Debug, Clone)]
pub struct StatsAggregator {
    remote_branch: Regex,
}

impl StatsAggregator {
    pub fn new() -> Result<Self, regex::Error> {
        let pattern = format!(r"{}/([^,)]+)", regex::escape(TRACKED_REMOTE));
        Ok(Self {
            remote_branch: Regex::new(&pattern)?,
        })
    }

    pub fn aggregate(&self, records: &[CommitRecord]) -> Statistics {
        let mut authors: Vec<AuthorCount> = Vec::new();
        let mut author_index: HashMap<&str, usize> = HashMap::new();
        let mut branches = BTreeSet::new();
        let mut total_commits = 0;

        for record in records {
            if !record.refs.is_empty() {
                branches.extend(self.remote_branches(&record.refs));
            }

            if record.is_graph_only {
                continue;
            }
            total_commits += 1;

            if record.author.is_empty() {
                continue;
            }
            match author_index.get(record.author.as_str()) {
                Some(&idx) => authors[idx].count += 1,
                None => {
                    author_index.insert(&record.author, authors.len());
                    authors.push(AuthorCount {
                        name: record.author.clone(),
                        count: 1,
                    });
                }
            }
        }

        // stable: equal counts stay in first-seen order
        authors.sort_by(|a, b| b.count.cmp(&a.count));

        Statistics {
            total_commits,
            total_lines: records.len(),
            authors,
            branches,
        }
    }

    fn remote_branches<'a>(&'a self, refs: &'a str) -> impl Iterator<Item = String> + 'a {
        self.remote_branch
            .captures_iter(refs)
            .filter_map(|caps| caps.get(1).map(|m| m.as_str().to_string()))
    }
}
