//! Session file content assembled from the current context files.

use super::{session_file_name, write_session};
use crate::domain::{FILE_DECISIONS, FILE_LEARNINGS, FILE_TASKS};
use crate::utils::{read_text, sanitize_filename};
use crate::utils::time::entry_timestamp;
use crate::workspace::Workspace;
use anyhow::Result;
use chrono::{DateTime, Local, NaiveDateTime};
use once_cell::sync::Lazy;
use regex::Regex;
use std::path::PathBuf;

static DECISION_HEADING: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)^## \[\d{4}-\d{2}-\d{2}].*$").expect("static regex"));
static LEARNING_LINE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)^- \*\*\[\d{4}-\d{2}-\d{2}]\*\*.*$").expect("static regex"));

const RECENT_DECISIONS: usize = 3;
const RECENT_LEARNINGS: usize = 5;

/// Render a session file for `topic`.
///
/// `start` defaults to `now` and is written as `start_time`.
pub fn build_session_content(
    workspace: &Workspace,
    topic: &str,
    kind: &str,
    start: Option<NaiveDateTime>,
    now: DateTime<Local>,
) -> String {
    let start = start.unwrap_or_else(|| now.naive_local());
    let mut out = String::new();

    out.push_str(&format!("# Session: {topic}\n\n"));
    out.push_str(&format!("**Date**: {}\n", now.format("%Y-%m-%d")));
    out.push_str(&format!("**Time**: {}\n", now.format("%H:%M:%S")));
    out.push_str(&format!("**Type**: {kind}\n"));
    out.push_str(&format!("**start_time**: {}\n", entry_timestamp(start)));
    out.push_str(&format!(
        "**end_time**: {}\n",
        entry_timestamp(now.naive_local())
    ));
    out.push_str("\n---\n\n");

    out.push_str("## Summary\n\n");
    out.push_str("[Describe what was accomplished in this session]\n\n");
    out.push_str("---\n\n");

    out.push_str("## Current Tasks\n\n");
    let tasks = read_context(workspace, FILE_TASKS);
    let sections = [
        ("In Progress", "## In Progress", "## Next Up"),
        ("Next Up", "## Next Up", "## Completed"),
    ];
    for (title, from, to) in sections {
        if let Some(section) = tasks.as_deref().and_then(|t| section_between(t, from, to)) {
            out.push_str(&format!("### {title}\n\n{section}\n"));
        }
    }
    out.push_str("---\n\n");

    out.push_str("## Recent Decisions\n\n");
    match read_context(workspace, FILE_DECISIONS).map(|d| recent_decisions(&d)) {
        Some(decisions) if !decisions.is_empty() => out.push_str(&decisions),
        _ => out.push_str("[No recent decisions found]\n"),
    }
    out.push_str("\n---\n\n");

    out.push_str("## Recent Learnings\n\n");
    match read_context(workspace, FILE_LEARNINGS).map(|l| recent_learnings(&l)) {
        Some(learnings) if !learnings.is_empty() => out.push_str(&learnings),
        _ => out.push_str("[No recent learnings found]\n"),
    }
    out.push_str("\n---\n\n");

    out.push_str("## Tasks for Next Session\n\n");
    out.push_str("[List tasks to continue in the next session]\n\n");
    out
}

/// Write a session file named `<stamp>-<sanitized topic>.md`.
pub fn save_session(
    workspace: &Workspace,
    topic: &str,
    kind: &str,
    start: Option<NaiveDateTime>,
    now: DateTime<Local>,
) -> Result<PathBuf> {
    let topic = sanitize_filename(topic);
    let content = build_session_content(workspace, &topic, kind, start, now);
    write_session(workspace, &session_file_name(now, &topic), &content)
}

/// Snapshot of TASKS.md taken before `compact` rewrites anything.
pub fn save_pre_compact(workspace: &Workspace, now: DateTime<Local>) -> Result<PathBuf> {
    let mut out = String::from("# Pre-Compact Snapshot\n\n");
    out.push_str(&format!("**Date**: {}\n", now.format("%Y-%m-%d")));
    out.push_str(&format!("**Time**: {}\n", now.format("%H:%M:%S")));
    out.push_str("**Type**: pre-compact\n\n---\n\n");
    out.push_str("## Purpose\n\n");
    out.push_str(
        "This snapshot was automatically created before running `ctx compact`.\n\
         It preserves the state of context files before any cleanup operations.\n\n---\n\n",
    );
    if let Some(tasks) = read_context(workspace, FILE_TASKS) {
        out.push_str(&format!(
            "## Tasks (Before Compact)\n\n```markdown\n{tasks}\n```\n\n"
        ));
    }
    write_session(workspace, &session_file_name(now, "pre-compact"), &out)
}

fn read_context(workspace: &Workspace, name: &str) -> Option<String> {
    let path = workspace.context_file(name);
    if !path.is_file() {
        return None;
    }
    match read_text(&path) {
        Ok(content) => Some(content),
        Err(e) => {
            tracing::warn!("skipping {}: {e:#}", path.display());
            None
        }
    }
}

/// Trimmed text between `start` and the next occurrence of `end` (or EOF).
///
/// `None` when `start` is absent or the section is blank.
pub fn section_between(content: &str, start: &str, end: &str) -> Option<String> {
    let from = content.find(start)? + start.len();
    let rest = &content[from..];
    let to = rest.find(end).unwrap_or(rest.len());
    let section = rest[..to].trim();
    (!section.is_empty()).then(|| section.to_string())
}

/// The last few decision headings as a bullet list.
pub fn recent_decisions(content: &str) -> String {
    let headings: Vec<&str> = DECISION_HEADING
        .find_iter(content)
        .map(|m| m.as_str().trim_end())
        .collect();
    let skip = headings.len().saturating_sub(RECENT_DECISIONS);
    headings[skip..]
        .iter()
        .map(|h| format!("- {h}"))
        .collect::<Vec<_>>()
        .join("\n")
}

/// The last few dated learning bullets.
pub fn recent_learnings(content: &str) -> String {
    let lines: Vec<&str> = LEARNING_LINE
        .find_iter(content)
        .map(|m| m.as_str().trim_end())
        .collect();
    let skip = lines.len().saturating_sub(RECENT_LEARNINGS);
    lines[skip..].join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Config;
    use chrono::TimeZone;
    use std::fs;
    use tempfile::TempDir;

    fn now() -> DateTime<Local> {
        Local
            .with_ymd_and_hms(2026, 1, 15, 9, 30, 5)
            .single()
            .expect("time")
    }

    #[test]
    fn section_between_headers() {
        let tasks =
            "# Tasks\n\n## In Progress\n\n- [ ] a\n\n## Next Up\n\n- [ ] b\n\n## Completed\n";
        assert_eq!(
            section_between(tasks, "## In Progress", "## Next Up").as_deref(),
            Some("- [ ] a")
        );
        assert_eq!(
            section_between(tasks, "## Next Up", "## Completed").as_deref(),
            Some("- [ ] b")
        );
        assert_eq!(section_between(tasks, "## Blocked", "## Next Up"), None);
        assert_eq!(
            section_between("## Completed\n\n", "## Completed", "## Other"),
            None
        );
    }

    #[test]
    fn keeps_last_three_decisions() {
        let content: String = (1..=5)
            .map(|i| format!("## [2026-01-0{i}-1200] Decision {i}\n\nbody\n\n"))
            .collect();
        similar_asserts::assert_eq!(
            recent_decisions(&content),
            "- ## [2026-01-03-1200] Decision 3\n\
             - ## [2026-01-04-1200] Decision 4\n\
             - ## [2026-01-05-1200] Decision 5"
        );
    }

    #[test]
    fn keeps_last_five_learnings() {
        let content: String = (1..=7)
            .map(|i| format!("- **[2026-01-0{i}-1200]** learning {i}\n"))
            .collect();
        let recent = recent_learnings(&content);
        assert_eq!(recent.lines().count(), 5);
        assert!(recent.starts_with("- **[2026-01-03-1200]** learning 3"));
    }

    #[test]
    fn session_content_includes_context() {
        let tmp = TempDir::new().expect("tmp");
        let ws = Workspace::with_config(tmp.path().to_path_buf(), Config::default());
        fs::create_dir_all(&ws.context_dir).expect("mkdir");
        fs::write(
            ws.context_file(FILE_TASKS),
            "## In Progress\n\n- [ ] Wire auth\n\n## Next Up\n\n## Completed\n",
        )
        .expect("write");
        fs::write(
            ws.context_file(FILE_DECISIONS),
            "## [2026-01-10-1000] Use JWT\n\nx\n",
        )
        .expect("write");

        let start =
            NaiveDateTime::parse_from_str("2026-01-15-0800", "%Y-%m-%d-%H%M").expect("start");
        let content = build_session_content(&ws, "auth", "feature", Some(start), now());

        assert!(content.starts_with(
            "# Session: auth\n\n**Date**: 2026-01-15\n**Time**: 09:30:05\n**Type**: feature\n"
        ));
        let window = "**start_time**: 2026-01-15-0800\n**end_time**: 2026-01-15-0930\n";
        assert!(content.contains(window));
        assert!(content.contains("### In Progress\n\n- [ ] Wire auth\n"));
        assert!(!content.contains("### Next Up"));
        assert!(content.contains("- ## [2026-01-10-1000] Use JWT"));
        assert!(content.contains("[No recent learnings found]"));
    }

    #[test]
    fn save_uses_sanitized_topic() {
        let tmp = TempDir::new().expect("tmp");
        let ws = Workspace::with_config(tmp.path().to_path_buf(), Config::default());
        let path = save_session(&ws, "Auth Refactor!", "session", None, now()).expect("save");
        assert_eq!(
            path.file_name().and_then(|n| n.to_str()),
            Some("2026-01-15-093005-auth-refactor.md")
        );
        let written = fs::read_to_string(&path).expect("read");
        assert!(written.starts_with("# Session: auth-refactor\n"));
    }

    #[test]
    fn pre_compact_embeds_tasks() {
        let tmp = TempDir::new().expect("tmp");
        let ws = Workspace::with_config(tmp.path().to_path_buf(), Config::default());
        fs::create_dir_all(&ws.context_dir).expect("mkdir");
        fs::write(ws.context_file(FILE_TASKS), "- [x] done\n").expect("write");
        let path = save_pre_compact(&ws, now()).expect("save");
        assert!(path.ends_with("sessions/2026-01-15-093005-pre-compact.md"));
        let written = fs::read_to_string(&path).expect("read");
        assert!(written.contains("```markdown\n- [x] done\n\n```"));
    }
}
