//! Token-budgeted context packet.

use crate::context::ContextSnapshot;
use crate::utils::text::file_title;

/// Assembled packet plus what went into it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Packet {
    pub text: String,
    pub included: Vec<String>,
    /// First file that did not fit, when the budget ran out.
    pub truncated_at: Option<String>,
    pub tokens_used: usize,
}

/// Assemble non-empty files in priority order until `budget` is exhausted.
///
/// Only file sections are charged against the budget. The truncation notice
/// names the first file that would have overflowed it.
pub fn assemble_packet(snapshot: &ContextSnapshot, budget: usize) -> Packet {
    let mut text = String::new();
    text.push_str("# Context\n\n");
    text.push_str(&format!(
        "Token Budget: {} | Available: {}\n\n",
        budget, snapshot.total_tokens
    ));
    text.push_str("---\n\n");

    let mut included = Vec::new();
    let mut truncated_at = None;
    let mut tokens_used = 0usize;

    for file in snapshot.in_priority_order() {
        if file.is_empty {
            continue;
        }
        if tokens_used + file.tokens > budget {
            // Every section already ends with a rule.
            text.push_str(&format!(
                "*[Truncated: {} and remaining files excluded due to token budget]*\n",
                file.name
            ));
            truncated_at = Some(file.name.clone());
            break;
        }

        text.push_str(&format!("## {}\n\n", file_title(&file.name)));
        text.push_str(&file.content);
        if !file.content.ends_with('\n') {
            text.push('\n');
        }
        text.push_str("\n---\n\n");

        tokens_used += file.tokens;
        included.push(file.name.clone());
    }

    Packet {
        text,
        included,
        truncated_at,
        tokens_used,
    }
}

/// Every file verbatim in priority order, separated by a blank line.
pub fn render_raw(snapshot: &ContextSnapshot) -> String {
    snapshot
        .in_priority_order()
        .iter()
        .map(|f| f.content.as_str())
        .collect::<Vec<_>>()
        .join("\n")
}
