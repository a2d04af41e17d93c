//! Markdown rendering of entries.

use super::{Entry, EntryKind};
use crate::utils::time::entry_timestamp;
use chrono::NaiveDateTime;

const CONTEXT_PLACEHOLDER: &str = "[Add context here]";
const RATIONALE_PLACEHOLDER: &str = "[Add rationale here]";
const CONSEQUENCES_PLACEHOLDER: &str = "[Add consequences here]";

/// Render `entry` as it will appear in its file, stamped with `now`.
pub fn format_entry(entry: &Entry, now: NaiveDateTime) -> String {
    let ts = entry_timestamp(now);
    match entry.kind {
        EntryKind::Task => format_task(&entry.content, entry.priority.as_deref(), &ts),
        EntryKind::Decision => format_decision(entry, &ts),
        EntryKind::Learning => format_learning(entry, &ts),
        EntryKind::Convention => format!("- {}\n", entry.content),
    }
}

fn format_task(content: &str, priority: Option<&str>, ts: &str) -> String {
    let priority_tag = priority.map(|p| format!(" #priority:{p}")).unwrap_or_default();
    format!("- [ ] {content}{priority_tag} #added:{ts}\n")
}

fn format_decision(entry: &Entry, ts: &str) -> String {
    let field = |v: &Option<String>, placeholder: &'static str| -> String {
        v.as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .unwrap_or(placeholder)
            .to_string()
    };
    format!(
        "## [{ts}] {content}\n\n\
         **Status**: Accepted\n\n\
         **Context**: {context}\n\n\
         **Decision**: {content}\n\n\
         **Rationale**: {rationale}\n\n\
         **Consequences**: {consequences}\n",
        content = entry.content,
        context = field(&entry.context, CONTEXT_PLACEHOLDER),
        rationale = field(&entry.rationale, RATIONALE_PLACEHOLDER),
        consequences = field(&entry.consequences, CONSEQUENCES_PLACEHOLDER),
    )
}

fn format_learning(entry: &Entry, ts: &str) -> String {
    let mut out = format!("- **[{ts}]** {}\n", entry.content);
    let details = [
        ("Context", &entry.context),
        ("Lesson", &entry.lesson),
        ("Application", &entry.application),
    ];
    for (label, value) in details {
        if let Some(v) = value.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
            out.push_str(&format!("  - **{label}**: {v}\n"));
        }
    }
    out
}
