//! Splicing formatted entries into context files.

use super::{format_entry, Entry, EntryKind};
use crate::error::ContextError;
use crate::markdown::{is_heading, Document};
use crate::utils::read_text;
use crate::utils::text::ensure_trailing_newline;
use crate::workspace::Workspace;
use anyhow::{Context, Result};
use chrono::NaiveDateTime;
use std::fs;
use std::path::PathBuf;

const DEFAULT_TASK_SECTION: &str = "## Next Up";

/// Validate, format and write `entry` into its context file.
///
/// Returns the path of the file that was modified.
pub fn add_entry(workspace: &Workspace, entry: &Entry, now: NaiveDateTime) -> Result<PathBuf> {
    require_content(entry)?;
    let missing = entry.missing_fields();
    if !missing.is_empty() {
        return Err(ContextError::MissingFields {
            kind: entry.kind.to_string(),
            missing,
        }
        .into());
    }
    write_entry(workspace, entry, now)
}

/// Write `entry` without the required-field check; absent decision fields
/// are rendered as placeholders. Used for updates streamed by `watch`.
pub fn append_entry(workspace: &Workspace, entry: &Entry, now: NaiveDateTime) -> Result<PathBuf> {
    require_content(entry)?;
    write_entry(workspace, entry, now)
}

fn require_content(entry: &Entry) -> Result<(), ContextError> {
    if entry.content.trim().is_empty() {
        return Err(ContextError::EmptyContent {
            kind: entry.kind.to_string(),
            examples: entry.kind.examples().to_string(),
        });
    }
    Ok(())
}

fn write_entry(workspace: &Workspace, entry: &Entry, now: NaiveDateTime) -> Result<PathBuf> {
    let path = workspace.require_file(entry.kind.file_name())?;
    let existing = read_text(&path)?;
    let formatted = format_entry(entry, now);
    let updated = splice_entry(&existing, &formatted, entry.kind, entry.section.as_deref());

    fs::write(&path, updated).with_context(|| format!("Failed to write {}", path.display()))?;
    tracing::debug!("appended {} entry to {}", entry.kind, path.display());
    Ok(path)
}

/// Place `formatted` into `existing`.
///
/// Tasks become the first item of their section when the section header is
/// present. Everything else is appended after a blank line.
pub fn splice_entry(
    existing: &str,
    formatted: &str,
    kind: EntryKind,
    section: Option<&str>,
) -> String {
    if kind == EntryKind::Task {
        if let Some(spliced) = splice_into_section(existing, formatted, section) {
            return spliced;
        }
    }

    let mut out = existing.to_string();
    ensure_trailing_newline(&mut out);
    out.push('\n');
    out.push_str(formatted);
    out
}

fn splice_into_section(existing: &str, formatted: &str, section: Option<&str>) -> Option<String> {
    let header = match section.map(str::trim).filter(|s| !s.is_empty()) {
        None => DEFAULT_TASK_SECTION.to_string(),
        Some(s) if s.starts_with("##") => s.to_string(),
        Some(s) => format!("## {s}"),
    };

    let mut doc = Document::parse(existing);
    let header_idx = doc.find_header(&header)?;

    let mut insert_at = header_idx + 1;
    if doc.lines().get(insert_at).is_some_and(|l| l.trim().is_empty())
        && insert_at + 1 < doc.len()
    {
        insert_at += 1;
    }

    let mut new_lines: Vec<String> = formatted
        .trim_end_matches('\n')
        .split('\n')
        .map(str::to_string)
        .collect();
    match doc.lines().get(insert_at) {
        Some(next) if is_heading(next) => new_lines.push(String::new()),
        None => new_lines.push(String::new()),
        _ => {}
    }
    doc.insert(insert_at, new_lines);
    Some(doc.render())
}
