use regex::Regex;
use std::borrow::Cow;

/// CSI sequences (`ESC [ params intermediates final`) and two-byte Fe escapes.
const ANSI_ESCAPE: &str = r"\x1B(?:[@-Z\\-_]|\[[0-?]*[ -/]*[@-~])";

/// Removes terminal escape sequences before a line is matched.
///
/// An `ESC` that does not start a complete sequence is left in place.
#[derive(Debug, Clone)]
pub struct AnsiStripper {
    escape: Regex,
}

impl AnsiStripper {
    pub fn new() -> Result<Self, regex::Error> {
        Ok(Self {
            escape: Regex::new(ANSI_ESCAPE)?,
        })
    }

    /// Borrows `line` unchanged when it holds no escape sequence.
    pub fn strip<'a>(&self, line: &'a str) -> Cow<'a, str> {
        self.escape.replace_all(line, "")
    }
}
