//! Reads every top-level Markdown file of the context directory.

use super::{ContextSnapshot, FileRecord};
use crate::domain::{
    FILE_CONSTITUTION, FILE_DECISIONS, FILE_GLOSSARY, FILE_LEARNINGS, FILE_TASKS,
};
use crate::error::ContextError;
use crate::markdown::is_effectively_empty;
use crate::tasks::line::count_tasks;
use crate::utils::{estimate_tokens, read_text};
use anyhow::{Context, Result};
use chrono::{DateTime, Local};
use once_cell::sync::Lazy;
use regex::Regex;
use std::fs;
use std::path::Path;

static DECISION_HEADER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)^## \[").expect("static regex"));
static BULLET: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)^[-*]\s+\S").expect("static regex"));

/// Load a snapshot of `dir`.
///
/// Fails with [`ContextError::NotInitialized`] when the directory is absent.
/// Subdirectories (`archive/`, `sessions/`) are not descended into.
pub fn load_context(dir: &Path) -> Result<ContextSnapshot> {
    if !dir.is_dir() {
        return Err(ContextError::NotInitialized(dir.to_path_buf()).into());
    }

    let mut files = Vec::new();
    let entries = fs::read_dir(dir)
        .with_context(|| format!("Failed to read directory: {}", dir.display()))?;
    for entry in entries {
        let entry =
            entry.with_context(|| format!("Failed to read directory: {}", dir.display()))?;
        let path = entry.path();
        let is_md = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case("md"));
        if !is_md || !path.is_file() {
            continue;
        }
        files.push(load_file(&path)?);
    }
    files.sort_by(|a, b| a.name.cmp(&b.name));

    let total_tokens = files.iter().map(|f| f.tokens).sum();
    let total_size = files.iter().map(|f| f.size).sum();
    tracing::debug!(
        "loaded {} context files ({} tokens) from {}",
        files.len(),
        total_tokens,
        dir.display()
    );

    Ok(ContextSnapshot {
        dir: dir.to_path_buf(),
        files,
        total_tokens,
        total_size,
    })
}

fn load_file(path: &Path) -> Result<FileRecord> {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let content = read_text(path)?;
    let meta = fs::metadata(path)
        .with_context(|| format!("Failed to stat file: {}", path.display()))?;
    let modified: DateTime<Local> = meta
        .modified()
        .map(DateTime::from)
        .unwrap_or_else(|_| Local::now());
    let is_empty = is_effectively_empty(&content);
    let summary = summarize(&name, &content, is_empty);

    Ok(FileRecord {
        tokens: estimate_tokens(&content),
        size: meta.len(),
        name,
        path: path.to_path_buf(),
        content,
        modified,
        is_empty,
        summary,
    })
}

/// One-line description of a file shown by `ctx status`.
pub(crate) fn summarize(name: &str, content: &str, is_empty: bool) -> String {
    if is_empty {
        return "empty".to_string();
    }
    match name {
        FILE_TASKS => {
            let (pending, completed) = count_tasks(content);
            format!("{pending} active, {completed} completed")
        }
        FILE_DECISIONS => format!("{} decisions", DECISION_HEADER.find_iter(content).count()),
        FILE_LEARNINGS => format!("{} learnings", BULLET.find_iter(content).count()),
        FILE_CONSTITUTION => format!("{} rules", BULLET.find_iter(content).count()),
        FILE_GLOSSARY => format!("{} terms", BULLET.find_iter(content).count()),
        _ => "loaded".to_string(),
    }
}
