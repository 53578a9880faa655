//! Tag extraction for raw task text.
//!
//! A task line may carry one `<project>` tag and one `[context]` tag anywhere
//! in the text. These functions are pure: they never touch storage.

use once_cell::sync::Lazy;
use regex::Regex;

static PROJECT_TAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"<([^>]*)>").expect("project tag pattern"));
static CONTEXT_TAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"\[([^\]]*)\]").expect("context tag pattern"));
// Greedy, and `.` stops at a newline, so each line loses its own tag region.
static TAG_REGION: Lazy<Regex> = Lazy::new(|| Regex::new(r"[<\[].*[>\]]").expect("tag region pattern"));

/// The pieces extracted from one line of task text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedTask {
    pub description: String,
    pub project: Option<String>,
    pub context: Option<String>,
}

impl ParsedTask {
    pub fn parse(text: &str) -> Self {
        Self {
            description: parse_task(text),
            project: parse_project(text),
            context: parse_context(text),
        }
    }
}

/// Trimmed content of the first `<...>` span, if any.
pub fn parse_project(text: &str) -> Option<String> {
    first_capture(&PROJECT_TAG, text)
}

/// Trimmed content of the first `[...]` span, if any.
pub fn parse_context(text: &str) -> Option<String> {
    first_capture(&CONTEXT_TAG, text)
}

/// Description with the tag region removed and surrounding whitespace trimmed.
///
/// The removed region runs from the first `<` or `[` to the last `>` or `]`
/// on the same line, so any text sitting between two tags goes with them.
pub fn parse_task(text: &str) -> String {
    TAG_REGION.replace_all(text, "").trim().to_string()
}

fn first_capture(pattern: &Regex, text: &str) -> Option<String> {
    pattern
        .captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim().to_string())
}
