//! Point-in-time copies of TASKS.md.

use crate::domain::FILE_TASKS;
use crate::utils::{read_text, sanitize_filename};
use crate::workspace::Workspace;
use anyhow::{Context, Result};
use chrono::{DateTime, Local, SecondsFormat};
use std::fs;
use std::path::PathBuf;

/// Copy TASKS.md to `archive/tasks-<name>-YYYY-MM-DD-HHMM.md`.
pub fn snapshot_tasks(
    workspace: &Workspace,
    name: Option<&str>,
    now: DateTime<Local>,
) -> Result<PathBuf> {
    let tasks_path = workspace.require_file(FILE_TASKS)?;
    let content = read_text(&tasks_path)?;

    let archive_dir = workspace.archive_dir();
    fs::create_dir_all(&archive_dir).with_context(|| {
        format!(
            "Failed to create archive directory: {}",
            archive_dir.display()
        )
    })?;

    let name = name
        .map(sanitize_filename)
        .unwrap_or_else(|| "snapshot".to_string());
    let stamp = now.format("%Y-%m-%d-%H%M");
    let path = archive_dir.join(format!("tasks-{name}-{stamp}.md"));
    let body = format!(
        "# TASKS.md Snapshot - {}\n\nCreated: {}\n\n---\n\n{}",
        name,
        now.to_rfc3339_opts(SecondsFormat::Secs, false),
        content
    );
    fs::write(&path, body)
        .with_context(|| format!("Failed to write snapshot: {}", path.display()))?;
    Ok(path)
}
