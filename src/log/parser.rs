use regex::Regex;

use crate::log::ansi::AnsiStripper;
use crate::models::CommitRecord;

/// `<graph><hash> - (<refs>) <message> (<relative time>) <<author>>`
///
/// The message is lazy so that parentheses or angle brackets inside a
/// subject are not mistaken for the trailing time and author groups.
const COMMIT_LINE: &str = r"^(?P<graph>[*|\\/ ]+)(?P<hash>[a-f0-9]+)\s*-\s*(?P<refs>\([^)]*\))?\s*(?P<message>.+?)\s+\((?P<time>[^)]+)\)\s+<(?P<author>[^>]+)>$";

const GRAPH_LINE: &str = r"^[*|\\/ ]+$";

/// Line-oriented parser for `git log --graph` output.
///
/// Each line is classified on its own: a commit line, a connector-only line,
/// or noise, which is dropped.
#[derive(Debug, Clone)]
pub struct LogParser {
    ansi: AnsiStripper,
    commit_line: Regex,
    graph_line: Regex,
}

impl LogParser {
    pub fn new() -> Result<Self, regex::Error> {
        Ok(Self {
            ansi: AnsiStripper::new()?,
            commit_line: Regex::new(COMMIT_LINE)?,
            graph_line: Regex::new(GRAPH_LINE)?,
        })
    }

    /// Parse a complete log into records, in output order.
    pub fn parse(&self, raw: &str) -> Vec<CommitRecord> {
        if raw.trim().is_empty() {
            return Vec::new();
        }

        raw.lines()
            .enumerate()
            .filter(|(_, line)| !line.trim().is_empty())
            .filter_map(|(idx, line)| self.parse_line(idx + 1, line))
            .collect()
    }

    /// Classify a single non-blank line. Returns `None` for unrecognised lines.
    pub fn parse_line(&self, line_number: usize, line: &str) -> Option<CommitRecord> {
        let clean = self.ansi.strip(line);

        if let Some(caps) = self.commit_line.captures(&clean) {
            let field = |name: &str| caps.name(name).map_or("", |m| m.as_str());
            return Some(CommitRecord {
                line_number,
                graph_prefix: field("graph").trim_end().to_string(),
                hash: field("hash").trim().to_string(),
                refs: field("refs")
                    .trim_matches(|c| matches!(c, '(' | ')' | ' '))
                    .to_string(),
                message: field("message").trim().to_string(),
                relative_time: field("time").trim().to_string(),
                author: field("author").trim().to_string(),
                raw_line: line.to_string(),
                is_graph_only: false,
            });
        }

        if self.graph_line.is_match(clean.trim()) {
            return Some(CommitRecord::graph_only(
                line_number,
                clean.trim_end().to_string(),
                line,
            ));
        }

        tracing::trace!(line_number, line = %clean, "dropping unrecognised log line");
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn parser() -> LogParser {
        LogParser::new().unwrap()
    }

    #[test]
    fn empty_and_whitespace_input_yield_nothing() {
        let parser = parser();
        assert!(parser.parse("").is_empty());
        assert!(parser.parse("  \n\t\n   ").is_empty());
    }

    #[test]
    fn parses_decorated_commit_line() {
        let record = parser()
            .parse_line(
                1,
                "* 1a2b3c4 - (HEAD -> main, origin/main, origin/feature-x) Add parser (3 hours ago) <Alice Smith>",
            )
            .unwrap();

        assert_eq!(
            record,
            CommitRecord {
                line_number: 1,
                graph_prefix: "*".to_string(),
                hash: "1a2b3c4".to_string(),
                refs: "HEAD -> main, origin/main, origin/feature-x".to_string(),
                message: "Add parser".to_string(),
                relative_time: "3 hours ago".to_string(),
                author: "Alice Smith".to_string(),
                raw_line: "* 1a2b3c4 - (HEAD -> main, origin/main, origin/feature-x) Add parser (3 hours ago) <Alice Smith>".to_string(),
                is_graph_only: false,
            }
        );
    }

    #[test]
    fn parses_undecorated_commit_with_nested_graph() {
        let record = parser()
            .parse_line(4, "| | * deadbee - Fix typo (2 weeks ago) <Bob>")
            .unwrap();

        assert_eq!(record.graph_prefix, "| | *");
        assert_eq!(record.hash, "deadbee");
        assert_eq!(record.refs, "");
        assert_eq!(record.message, "Fix typo");
        assert_eq!(record.relative_time, "2 weeks ago");
        assert_eq!(record.author, "Bob");
    }

    #[test]
    fn message_may_contain_parentheses_and_brackets() {
        let record = parser()
            .parse_line(
                1,
                "* abc1234 - fix(parser): handle <T> in (nested) types (5 minutes ago) <Carol>",
            )
            .unwrap();

        assert_eq!(record.message, "fix(parser): handle <T> in (nested) types");
        assert_eq!(record.relative_time, "5 minutes ago");
        assert_eq!(record.author, "Carol");
    }

    #[test]
    fn graph_only_line() {
        let record = parser().parse_line(2, "| | *").unwrap();

        assert!(record.is_graph_only);
        assert_eq!(record.hash, "");
        assert_eq!(record.graph_prefix, "| | *");
        assert_eq!(record.raw_line, "| | *");
    }

    #[test]
    fn merge_connectors_are_graph_only() {
        let parser = parser();
        for line in ["|\\  ", "| |/", "|/|", "/ /"] {
            let record = parser.parse_line(1, line).unwrap();
            assert!(record.is_graph_only, "{line:?}");
            assert_eq!(record.graph_prefix, line.trim_end());
        }
    }

    #[test]
    fn colored_line_keeps_raw_text() {
        let raw = "* \x1b[31m0f0f0f0\x1b[m - Initial commit \x1b[32m(1 year ago) \x1b[1;34m<Dana>\x1b[m";
        let record = parser().parse_line(1, raw).unwrap();

        assert_eq!(record.hash, "0f0f0f0");
        assert_eq!(record.author, "Dana");
        assert_eq!(record.raw_line, raw);
    }

    #[test]
    fn unrecognised_lines_are_dropped() {
        let parser = parser();
        assert!(parser.parse_line(1, "fatal: your current branch has no commits").is_none());
        assert!(parser.parse_line(1, "| ~ something odd").is_none());
    }

    #[test]
    fn numbering_counts_blank_and_dropped_lines() {
        let raw = "* aaaaaaa - one (1 day ago) <A>\n\
                   \n\
                   warning: noise\n\
                   |\\\n\
                   | * bbbbbbb - two (2 days ago) <B>\n";
        let records = parser().parse(raw);

        let numbers: Vec<usize> = records.iter().map(|r| r.line_number).collect();
        assert_eq!(numbers, vec![1, 4, 5]);
        assert!(records[1].is_graph_only);
        assert!(records.windows(2).all(|w| w[0].line_number < w[1].line_number));
    }

    #[test]
    fn raw_lines_are_substrings_of_input() {
        let raw = "* aaaaaaa - (tag: v1.0) one (1 day ago) <A>\r\n|/\r\n* ccccccc - three (3 days ago) <C>";
        let records = parser().parse(raw);

        assert_eq!(records.len(), 3);
        for record in &records {
            assert!(raw.contains(&record.raw_line));
        }
        assert!(records.len() <= raw.lines().filter(|l| !l.trim().is_empty()).count());
    }
}
