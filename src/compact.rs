//! Context cleanup: completed tasks consolidated under `## Completed` (or
//! archived) and empty `## ` sections removed.

use crate::context::ContextSnapshot;
use crate::domain::FILE_TASKS;
use crate::markdown::Document;
use crate::tasks::archive::append_to_archive;
use crate::tasks::line::TaskLine;
use crate::workspace::Workspace;
use anyhow::{Context, Result};
use chrono::{DateTime, Local};
use std::fs;
use std::path::PathBuf;

const COMPLETED_HEADER: &str = "## Completed";

/// TASKS.md after completed tasks outside `## Completed` were pulled out.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskCompaction {
    pub content: String,
    /// Moved top-level tasks, each followed by its sub-task lines.
    pub moved: Vec<Vec<String>>,
}

/// Pull completed tasks out of every section except `## Completed`.
///
/// Without `archive` they are re-inserted at the end of the first block of
/// `## Completed` (created at the end of the file when absent). With
/// `archive` they are left out entirely for the caller to archive.
pub fn compact_tasks(content: &str, archive: bool) -> TaskCompaction {
    let doc = Document::parse(content);
    let mut kept: Vec<String> = Vec::with_capacity(doc.len());
    let mut moved: Vec<Vec<String>> = Vec::new();
    let mut in_completed_section = false;
    let mut carrying = false;

    for line in doc.lines() {
        if line.starts_with(COMPLETED_HEADER) {
            in_completed_section = true;
        } else if line.starts_with("## ") {
            in_completed_section = false;
        }

        match TaskLine::classify(line) {
            TaskLine::Completed if !in_completed_section => {
                moved.push(vec![line.clone()]);
                carrying = true;
                continue;
            }
            TaskLine::SubTask if carrying => {
                if let Some(group) = moved.last_mut() {
                    group.push(line.clone());
                }
                continue;
            }
            _ => carrying = false,
        }
        kept.push(line.clone());
    }

    if moved.is_empty() {
        return TaskCompaction {
            content: content.to_string(),
            moved,
        };
    }

    let mut doc = Document::from_lines(kept);
    if !archive {
        let lines: Vec<String> = moved.iter().flatten().cloned().collect();
        match doc.find_header(COMPLETED_HEADER) {
            Some(header) => {
                let mut at = header + 1;
                while at < doc.len() && doc.lines()[at].is_empty() {
                    at += 1;
                }
                if at >= doc.len() || doc.lines()[at].starts_with("## ") {
                    let mut block = vec![String::new()];
                    block.extend(lines);
                    doc.insert(header + 1, block);
                } else {
                    while at < doc.len()
                        && !doc.lines()[at].is_empty()
                        && !doc.lines()[at].starts_with("## ")
                    {
                        at += 1;
                    }
                    doc.insert(at, lines);
                }
            }
            None => {
                let mut tail = doc.len();
                if doc.lines().last().is_some_and(|l| l.is_empty()) {
                    tail -= 1;
                }
                let mut section = vec![
                    String::new(),
                    COMPLETED_HEADER.to_string(),
                    String::new(),
                ];
                section.extend(lines);
                doc.insert(tail, section);
            }
        }
    }

    TaskCompaction {
        content: doc.render(),
        moved,
    }
}

/// Drop `## ` sections that contain nothing but blank lines.
///
/// Returns the new content and the number of sections removed.
pub fn remove_empty_sections(content: &str) -> (String, usize) {
    let lines: Vec<&str> = content.split('\n').collect();
    let mut out: Vec<&str> = Vec::with_capacity(lines.len());
    let mut removed = 0;
    let mut i = 0;

    while i < lines.len() {
        if !lines[i].starts_with("## ") {
            out.push(lines[i]);
            i += 1;
            continue;
        }
        let start = i;
        i += 1;
        while i < lines.len() && lines[i].trim().is_empty() {
            i += 1;
        }
        if i >= lines.len() || lines[i].starts_with("## ") || lines[i].starts_with("# ") {
            removed += 1;
        } else {
            out.extend_from_slice(&lines[start..i]);
        }
    }

    (out.join("\n"), removed)
}

#[derive(Debug, Clone, Default)]
pub struct CompactReport {
    /// First line of each task moved out of its section.
    pub moved_tasks: Vec<String>,
    pub archive_path: Option<PathBuf>,
    /// `(file, sections removed)` for every rewritten non-task file.
    pub cleaned: Vec<(String, usize)>,
}

impl CompactReport {
    pub fn changes(&self) -> usize {
        self.moved_tasks.len() + self.cleaned.iter().map(|(_, n)| n).sum::<usize>()
    }
}

/// Compact every file of `snapshot` in place.
///
/// TASKS.md is never passed through [`remove_empty_sections`] so its
/// standard section skeleton survives.
pub fn compact_context(
    workspace: &Workspace,
    snapshot: &ContextSnapshot,
    archive: bool,
    now: DateTime<Local>,
) -> Result<CompactReport> {
    let mut report = CompactReport::default();

    if let Some(tasks) = snapshot.file(FILE_TASKS) {
        let compacted = compact_tasks(&tasks.content, archive);
        report.moved_tasks = compacted
            .moved
            .iter()
            .filter_map(|g| g.first().cloned())
            .collect();
        if archive && !compacted.moved.is_empty() {
            let mut archived = compacted
                .moved
                .iter()
                .flatten()
                .cloned()
                .collect::<Vec<_>>()
                .join("\n");
            archived.push('\n');
            report.archive_path = Some(append_to_archive(workspace, &archived, now)?);
        }
        if compacted.content != tasks.content {
            fs::write(&tasks.path, &compacted.content)
                .with_context(|| format!("Failed to update {}", tasks.path.display()))?;
        }
    }

    for file in snapshot.files.iter().filter(|f| f.name != FILE_TASKS) {
        let (cleaned, removed) = remove_empty_sections(&file.content);
        if removed == 0 {
            continue;
        }
        fs::write(&file.path, cleaned)
            .with_context(|| format!("Failed to update {}", file.path.display()))?;
        report.cleaned.push((file.name.clone(), removed));
    }

    tracing::debug!("compact: {} changes", report.changes());
    Ok(report)
}
