//! Concise context packet for AI agents (`ctx agent`).
//!
//! Where `ctx load` inlines whole files, the agent packet lists the files to
//! read and lifts out the lines an agent acts on first: constitution rules,
//! open tasks, the leading conventions and the most recent decisions.

use anyhow::Result;
use chrono::{DateTime, Local, SecondsFormat};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

use crate::context::ContextSnapshot;
use crate::domain::{
    FILE_CONSTITUTION, FILE_CONVENTIONS, FILE_DECISIONS, FILE_READ_ORDER, FILE_TASKS,
};
use crate::markdown::strip_comments;
use crate::utils::estimate_tokens;

/// Conventions lifted into the packet.
pub const CONVENTION_LIMIT: usize = 5;
/// Decisions lifted into the packet.
pub const DECISION_LIMIT: usize = 3;

static CHECKBOX_RULE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)^-\s*\[[ x]]\s*(.+)$").expect("static regex"));
static OPEN_TASK: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)^-\s*\[\s*]\s*(.+)$").expect("static regex"));
static BULLET: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?m)^-\s+(.+)$").expect("static regex"));
static DECISION_TITLE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)^##\s+\[[\d-]+]\s*(.+)$").expect("static regex"));

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AgentPacket {
    pub generated_at: String,
    pub budget: usize,
    pub tokens_used: usize,
    /// Context files to read, in priority order.
    pub read_order: Vec<String>,
    pub constitution: Vec<String>,
    /// Open tasks, rendered as `- [ ] text`.
    pub tasks: Vec<String>,
    pub conventions: Vec<String>,
    /// Decision titles, newest first.
    pub decisions: Vec<String>,
    pub truncated: bool,
}

/// Build the packet from a snapshot.
///
/// Items are charged against `budget` in priority order (constitution,
/// tasks, conventions, decisions). The first item that does not fit stops
/// the fill and marks the packet truncated. The header and read list are
/// not charged.
pub fn build_agent_packet(
    snapshot: &ContextSnapshot,
    context_dir: &str,
    budget: usize,
    now: DateTime<Local>,
) -> AgentPacket {
    let content = |name: &str| {
        snapshot
            .file(name)
            .map(|f| f.content.as_str())
            .unwrap_or_default()
    };

    let read_order = FILE_READ_ORDER
        .iter()
        .filter(|name| snapshot.file(name).is_some())
        .map(|name| format!("{context_dir}/{name}"))
        .collect();

    let mut packet = AgentPacket {
        generated_at: now.to_rfc3339_opts(SecondsFormat::Secs, false),
        budget,
        tokens_used: 0,
        read_order,
        constitution: Vec::new(),
        tasks: Vec::new(),
        conventions: Vec::new(),
        decisions: Vec::new(),
        truncated: false,
    };

    let candidates = [
        constitution_rules(content(FILE_CONSTITUTION)),
        open_tasks(content(FILE_TASKS)),
        conventions(content(FILE_CONVENTIONS), CONVENTION_LIMIT),
        recent_decisions(content(FILE_DECISIONS), DECISION_LIMIT),
    ];
    'fill: for (section, items) in candidates.into_iter().enumerate() {
        for item in items {
            let cost = estimate_tokens(&item);
            if packet.tokens_used + cost > budget {
                packet.truncated = true;
                break 'fill;
            }
            packet.tokens_used += cost;
            match section {
                0 => packet.constitution.push(item),
                1 => packet.tasks.push(item),
                2 => packet.conventions.push(item),
                _ => packet.decisions.push(item),
            }
        }
    }
    packet
}

/// Checkbox rules, checked or not.
pub fn constitution_rules(content: &str) -> Vec<String> {
    captures(&CHECKBOX_RULE, content)
}

/// Unchecked tasks as `- [ ] text`.
pub fn open_tasks(content: &str) -> Vec<String> {
    captures(&OPEN_TASK, content)
        .into_iter()
        .map(|t| format!("- [ ] {t}"))
        .collect()
}

/// Plain bullets from the first `limit` matches; empty and `#` items are dropped.
pub fn conventions(content: &str, limit: usize) -> Vec<String> {
    captures(&BULLET, content)
        .into_iter()
        .take(limit)
        .filter(|item| !item.is_empty() && !item.starts_with('#'))
        .collect()
}

/// Titles of the last `limit` decisions, newest first.
pub fn recent_decisions(content: &str, limit: usize) -> Vec<String> {
    let mut titles = captures(&DECISION_TITLE, content);
    titles.reverse();
    titles.truncate(limit);
    titles
}

fn captures(re: &Regex, content: &str) -> Vec<String> {
    let visible = strip_comments(content);
    re.captures_iter(&visible)
        .filter_map(|c| c.get(1))
        .map(|m| m.as_str().trim().to_string())
        .collect()
}

pub fn agent_markdown(packet: &AgentPacket) -> String {
    let mut out = String::from("# Context Packet\n\n");
    out.push_str(&format!(
        "Generated: {} | Budget: {} tokens | Used: {}\n\n",
        packet.generated_at, packet.budget, packet.tokens_used
    ));

    out.push_str("## Read These Files (in order)\n\n");
    for (i, path) in packet.read_order.iter().enumerate() {
        out.push_str(&format!("{}. {}\n", i + 1, path));
    }
    out.push('\n');

    push_section(
        &mut out,
        "Constitution (never violate)",
        &packet.constitution,
        "- ",
    );
    push_section(&mut out, "Current Tasks", &packet.tasks, "");
    push_section(&mut out, "Key Conventions", &packet.conventions, "- ");
    push_section(&mut out, "Recent Decisions", &packet.decisions, "- ");

    if packet.truncated {
        out.push_str("*[Truncated to fit token budget]*\n");
    }
    out
}

pub fn agent_json(packet: &AgentPacket) -> Result<String> {
    Ok(serde_json::to_string_pretty(packet)?)
}

fn push_section(out: &mut String, title: &str, items: &[String], prefix: &str) {
    if items.is_empty() {
        return;
    }
    out.push_str(&format!("## {title}\n\n"));
    for item in items {
        out.push_str(&format!("{prefix}{item}\n"));
    }
    out.push('\n');
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::load_context;
    use chrono::TimeZone;
    use serde_json::Value;
    use std::fs;
    use tempfile::TempDir;

    const CONSTITUTION: &str = "# Constitution\n\n\
        <!--\n- [ ] Example rule inside a comment\n-->\n\n\
        ## Security\n\n- [ ] Never commit secrets\n- [x] Tests pass before merge\n";
    const TASKS: &str = "# Tasks\n\n## Next Up\n\n\
        - [ ] Ship the release #added:2026-01-02-0900\n- [x] Write docs\n-   [ ] Tag v1\n";
    const DECISIONS: &str = "# Decisions\n\n\
        ## [2026-01-01-1200] Use Rust\n\nbody\n\n\
        ## [2026-01-02-1200] Use clap\n\n\
        ## [2026-01-03-1200] Use serde\n\n\
        ## [2026-01-04-1200] Use regex\n";

    fn fixed_now() -> DateTime<Local> {
        Local
            .with_ymd_and_hms(2026, 1, 15, 9, 30, 0)
            .single()
            .expect("time")
    }

    fn snapshot(files: &[(&str, &str)]) -> (TempDir, ContextSnapshot) {
        let tmp = TempDir::new().expect("tmp");
        for (name, content) in files {
            fs::write(tmp.path().join(name), content).expect("write");
        }
        let snap = load_context(tmp.path()).expect("load");
        (tmp, snap)
    }

    #[test]
    fn constitution_rules_skip_comment_examples() {
        assert_eq!(
            constitution_rules(CONSTITUTION),
            vec!["Never commit secrets", "Tests pass before merge"]
        );
    }

    #[test]
    fn open_tasks_keep_only_unchecked_items() {
        assert_eq!(
            open_tasks(TASKS),
            vec![
                "- [ ] Ship the release #added:2026-01-02-0900",
                "- [ ] Tag v1",
            ]
        );
    }

    #[test]
    fn convention_limit_counts_skipped_items() {
        let content = "- #heading-like\n- one\n- two\n- three\n- four\n- five\n- six\n";
        assert_eq!(
            conventions(content, CONVENTION_LIMIT),
            vec!["one", "two", "three", "four"]
        );
    }

    #[test]
    fn recent_decisions_are_newest_first() {
        assert_eq!(
            recent_decisions(DECISIONS, DECISION_LIMIT),
            vec!["Use regex", "Use serde", "Use clap"]
        );
        assert!(recent_decisions("# Decisions\n", DECISION_LIMIT).is_empty());
    }

    #[test]
    fn packet_lists_existing_files_in_read_order() {
        let (_tmp, snap) = snapshot(&[
            ("TASKS.md", TASKS),
            ("CONSTITUTION.md", CONSTITUTION),
            ("DECISIONS.md", DECISIONS),
        ]);
        let packet = build_agent_packet(&snap, ".context", 8000, fixed_now());
        assert_eq!(
            packet.read_order,
            vec![
                ".context/CONSTITUTION.md",
                ".context/TASKS.md",
                ".context/DECISIONS.md",
            ]
        );
        assert_eq!(packet.constitution.len(), 2);
        assert_eq!(packet.tasks.len(), 2);
        assert_eq!(packet.decisions.len(), 3);
        assert!(!packet.truncated);

        let text = agent_markdown(&packet);
        let header = "# Context Packet\n\nGenerated: 2026-01-15T09:30:00";
        assert!(text.starts_with(header));
        let rules = "## Constitution (never violate)\n\n- Never commit secrets\n";
        assert!(text.contains(rules));
        assert!(text.contains("## Current Tasks\n\n- [ ] Ship the release"));
        assert!(!text.contains("## Key Conventions"));
        assert!(!text.contains("Truncated"));
    }

    #[test]
    fn budget_stops_the_fill_in_priority_order() {
        let (_tmp, snap) = snapshot(&[("CONSTITUTION.md", CONSTITUTION), ("TASKS.md", TASKS)]);
        let rules_cost: usize = constitution_rules(CONSTITUTION)
            .iter()
            .map(|r| estimate_tokens(r))
            .sum();

        let packet = build_agent_packet(&snap, ".context", rules_cost, fixed_now());
        assert_eq!(packet.constitution.len(), 2);
        assert!(packet.tasks.is_empty());
        assert!(packet.truncated);
        assert_eq!(packet.tokens_used, rules_cost);
        let text = agent_markdown(&packet);
        assert!(text.ends_with("*[Truncated to fit token budget]*\n"));

        let empty = build_agent_packet(&snap, ".context", 0, fixed_now());
        assert!(empty.constitution.is_empty());
        assert_eq!(empty.tokens_used, 0);
        assert!(empty.truncated);
    }

    #[test]
    fn json_document_carries_every_section() {
        let (_tmp, snap) = snapshot(&[("TASKS.md", TASKS)]);
        let packet = build_agent_packet(&snap, ".context", 8000, fixed_now());
        let value: Value =
            serde_json::from_str(&agent_json(&packet).expect("json")).expect("parse");
        assert_eq!(value["budget"], 8000);
        assert_eq!(value["read_order"][0], ".context/TASKS.md");
        assert_eq!(value["tasks"][1], "- [ ] Tag v1");
        assert_eq!(value["constitution"], serde_json::json!([]));
        assert_eq!(value["truncated"], false);
    }
}
