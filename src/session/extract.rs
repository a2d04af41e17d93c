//! Heuristic extraction of decisions and learnings from assistant messages.

use super::transcript::parse_entries;
use crate::utils::read_text;
use anyhow::Result;
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashSet;
use std::path::Path;

const INSIGHT_MAX: usize = 150;

fn patterns(sources: &[&str]) -> Vec<Regex> {
    sources
        .iter()
        .map(|p| Regex::new(p).expect("static regex"))
        .collect()
}

// Capture group 1 is always the insight text.
static DECISION_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    patterns(&[
        r"(?i)decided to\s+(.{20,100})",
        r"(?i)decision:\s*(.{20,100})",
        r"(?i)we(?:'ll| will) use\s+(.{10,80})",
        r"(?i)going with\s+(.{10,80})",
        r"(?i)chose\s+(.{10,80})\s+(?:over|instead)",
    ])
});

static LEARNING_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    patterns(&[
        r"(?i)learned that\s+(.{20,100})",
        r"(?i)gotcha:\s*(.{20,100})",
        r"(?i)lesson:\s*(.{20,100})",
        r"(?i)TIL:?\s*(.{20,100})",
        r"(?i)turns out\s+(.{20,100})",
        r"(?i)important to (?:note|remember):\s*(.{20,100})",
    ])
});

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Insights {
    pub decisions: Vec<String>,
    pub learnings: Vec<String>,
}

/// Scan the assistant messages of a JSONL transcript.
pub fn extract_insights(path: &Path) -> Result<Insights> {
    Ok(extract_from_jsonl(&read_text(path)?))
}

/// Insights are deduplicated across both lists; first occurrence wins.
pub fn extract_from_jsonl(content: &str) -> Insights {
    let mut insights = Insights::default();
    let mut seen = HashSet::new();

    let entries = parse_entries(content);
    for entry in entries.iter().filter(|e| e.kind == "assistant") {
        for text in entry.texts() {
            collect(&DECISION_PATTERNS, text, &mut seen, &mut insights.decisions);
            collect(&LEARNING_PATTERNS, text, &mut seen, &mut insights.learnings);
        }
    }
    insights
}

fn collect(patterns: &[Regex], text: &str, seen: &mut HashSet<String>, out: &mut Vec<String>) {
    for pattern in patterns {
        for caps in pattern.captures_iter(text) {
            let insight = clean_insight(&caps[1]);
            if !insight.is_empty() && seen.insert(insight.clone()) {
                out.push(insight);
            }
        }
    }
}

/// Trim trailing punctuation and cap the length, preferring a word boundary.
pub fn clean_insight(raw: &str) -> String {
    let trimmed = raw.trim().trim_end_matches(['.', ',', ';', ':', '!', '?']);
    let chars: Vec<char> = trimmed.chars().collect();
    if chars.len() <= INSIGHT_MAX {
        return trimmed.to_string();
    }

    let head = &chars[..INSIGHT_MAX - 3];
    let cut = match head.iter().rposition(|c| *c == ' ') {
        Some(space) if space > 100 => space,
        _ => INSIGHT_MAX - 3,
    };
    let mut out: String = chars[..cut].iter().collect();
    out.push_str("...");
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assistant(text: &str) -> String {
        serde_json::json!({
            "type": "assistant",
            "message": {"role": "assistant", "content": [{"type": "text", "text": text}]}
        })
        .to_string()
    }

    #[test]
    fn finds_decisions_and_learnings() {
        let content = [
            assistant(
                "We decided to store sessions in Redis for horizontal scaling.",
            ),
            assistant("Gotcha: the SDK silently drops events larger than 256KB."),
            serde_json::json!({
                "type": "user",
                "message": {"role": "user", "content": "decided to ignore users entirely please"}
            })
            .to_string(),
        ]
        .join("\n");

        let insights = extract_from_jsonl(&content);
        assert_eq!(
            insights.decisions,
            vec!["store sessions in Redis for horizontal scaling"]
        );
        assert_eq!(
            insights.learnings,
            vec!["the SDK silently drops events larger than 256KB"]
        );
    }

    #[test]
    fn duplicates_are_reported_once() {
        let line = assistant("Turns out the cache key must include the tenant id.");
        let content = format!("{line}\n{line}\n");
        assert_eq!(extract_from_jsonl(&content).learnings.len(), 1);
    }

    #[test]
    fn we_will_use_captures_the_choice() {
        let line = assistant("For now we'll use SQLite with WAL mode enabled.");
        let insights = extract_from_jsonl(&line);
        assert_eq!(insights.decisions, vec!["SQLite with WAL mode enabled"]);
    }

    #[test]
    fn clean_insight_trims_and_caps() {
        assert_eq!(clean_insight("  use sqlite.  "), "use sqlite");
        let long = "word ".repeat(40);
        let cleaned = clean_insight(&long);
        assert!(cleaned.ends_with("..."));
        assert!(cleaned.chars().count() <= INSIGHT_MAX);
        assert!(!cleaned.trim_end_matches("...").ends_with(' '));

        let unbroken = "x".repeat(200);
        assert_eq!(clean_insight(&unbroken).chars().count(), INSIGHT_MAX);
    }
}
