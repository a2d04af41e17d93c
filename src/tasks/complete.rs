//! Marking a pending task as done.

use crate::domain::FILE_TASKS;
use crate::error::ContextError;
use crate::markdown::Document;
use crate::utils::read_text;
use crate::workspace::Workspace;
use anyhow::{Context, Result};
use once_cell::sync::Lazy;
use regex::Regex;
use std::fs;

static PENDING_LINE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\s*)-\s*\[\s*\]\s*(.+)$").expect("static regex"));

/// Mark the task selected by `query` complete in `content`.
///
/// A numeric query selects the n-th pending checkbox (1-based, nested ones
/// included). Any other query is a case-insensitive substring that must
/// match exactly one pending task. Returns the new content and the task text.
pub fn complete_in_content(
    content: &str,
    query: &str,
) -> Result<(String, String), ContextError> {
    let mut doc = Document::parse(content);
    let number = query.trim().parse::<usize>().ok();
    let needle = query.to_lowercase();

    let mut matches: Vec<(usize, String)> = Vec::new();
    let mut seen = 0usize;
    for (idx, line) in doc.lines().iter().enumerate() {
        let Some(caps) = PENDING_LINE.captures(line) else {
            continue;
        };
        seen += 1;
        let text = caps[2].to_string();
        match number {
            Some(n) if n == seen => {
                matches.push((idx, text));
                break;
            }
            Some(_) => {}
            None if text.to_lowercase().contains(&needle) => matches.push((idx, text)),
            None => {}
        }
    }

    let (idx, text) = match (matches.len(), number) {
        (0, Some(n)) => return Err(ContextError::TaskNumberNotFound(n)),
        (0, None) => return Err(ContextError::TaskNotFound(query.to_string())),
        (1, _) => matches.remove(0),
        _ => {
            return Err(ContextError::AmbiguousTask {
                query: query.to_string(),
                matches: matches.into_iter().map(|(_, t)| t).collect(),
            })
        }
    };

    let replaced = PENDING_LINE
        .replace(&doc.lines()[idx], "$1- [x] $2")
        .into_owned();
    doc.set(idx, replaced);
    Ok((doc.render(), text))
}

/// Complete a task in TASKS.md, returning the completed task's text.
pub fn complete_task(workspace: &Workspace, query: &str) -> Result<String> {
    let path = workspace.require_file(FILE_TASKS)?;
    let content = read_text(&path)?;
    let (updated, text) = complete_in_content(&content, query)?;
    fs::write(&path, updated).with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    const TASKS: &str = concat!(
        "# Tasks\n\n- [ ] Implement auth\n- [x] Set up CI\n",
        "  - [ ] Write auth tests\n- [ ] Deploy\n",
    );

    #[test]
    fn completes_by_number() {
        let (out, text) = complete_in_content(TASKS, "3").expect("complete");
        assert_eq!(text, "Deploy");
        assert!(out.contains("- [x] Deploy"));
        assert!(out.contains("- [ ] Implement auth"));
    }

    #[test]
    fn completes_nested_task_keeping_indent() {
        let (out, _) = complete_in_content(TASKS, "tests").expect("complete");
        assert!(out.contains("\n  - [x] Write auth tests\n"));
    }

    #[test]
    fn substring_match_is_case_insensitive() {
        let (_, text) = complete_in_content(TASKS, "DEPLOY").expect("complete");
        assert_eq!(text, "Deploy");
    }

    #[test]
    fn ambiguous_query_lists_all_matches() {
        let err = complete_in_content(TASKS, "auth").expect_err("ambiguous");
        match err {
            ContextError::AmbiguousTask { matches, .. } => {
                assert_eq!(matches, vec!["Implement auth", "Write auth tests"]);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn missing_tasks_are_reported() {
        assert!(matches!(
            complete_in_content(TASKS, "9"),
            Err(ContextError::TaskNumberNotFound(9))
        ));
        assert!(matches!(
            complete_in_content(TASKS, "0"),
            Err(ContextError::TaskNumberNotFound(0))
        ));
        assert!(matches!(
            complete_in_content(TASKS, "refactor"),
            Err(ContextError::TaskNotFound(_))
        ));
    }

    #[test]
    fn content_outside_the_task_is_untouched() {
        let (out, _) = complete_in_content(TASKS, "1").expect("complete");
        assert_eq!(
            out.replacen("- [x] Implement auth", "- [ ] Implement auth", 1),
            TASKS
        );
    }
}
