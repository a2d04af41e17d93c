//! Path and file name helpers

use once_cell::sync::Lazy;
use regex::Regex;

static NON_ALNUM: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^a-z0-9]+").expect("static regex"));

const MAX_NAME_LEN: usize = 50;

/// Turn a free-form topic into a safe file name fragment.
///
/// Lowercases, collapses runs of anything non-alphanumeric into `-`, trims
/// dashes, and caps the length at 50. Falls back to `session` when nothing
/// usable remains.
pub fn sanitize_filename(topic: &str) -> String {
    let lower = topic.to_lowercase();
    let dashed = NON_ALNUM.replace_all(&lower, "-");
    let trimmed = dashed.trim_matches('-');
    let capped: String = trimmed.chars().take(MAX_NAME_LEN).collect();
    let result = capped.trim_matches('-');
    if result.is_empty() {
        "session".to_string()
    } else {
        result.to_string()
    }
}
