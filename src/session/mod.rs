//! Session files under `.context/sessions/`: saving, listing, lookup and
//! transcript conversion.

pub mod build;
pub mod extract;
pub mod parse;
pub mod transcript;

pub use build::{build_session_content, save_session};
pub use extract::{extract_insights, Insights};
pub use parse::{parse_session_info, SessionInfo};
pub use transcript::render_transcript;

use crate::error::ContextError;
use crate::workspace::Workspace;
use anyhow::{Context, Result};
use chrono::{DateTime, Local};
use std::fs;
use std::path::PathBuf;

/// Prefix shared by every session file name.
pub const SESSION_STAMP_FORMAT: &str = "%Y-%m-%d-%H%M%S";

/// `YYYY-MM-DD-HHMMSS-<suffix>.md`
pub fn session_file_name(now: DateTime<Local>, suffix: &str) -> String {
    format!("{}-{}.md", now.format(SESSION_STAMP_FORMAT), suffix)
}

/// Write `content` into the sessions directory, creating it if needed.
pub fn write_session(workspace: &Workspace, file_name: &str, content: &str) -> Result<PathBuf> {
    let dir = workspace.sessions_dir();
    fs::create_dir_all(&dir)
        .with_context(|| format!("Failed to create sessions directory: {}", dir.display()))?;
    let path = dir.join(file_name);
    fs::write(&path, content)
        .with_context(|| format!("Failed to write session file: {}", path.display()))?;
    tracing::debug!("wrote session {}", path.display());
    Ok(path)
}

/// Session file names, newest first. `-summary.md` companions are skipped.
///
/// A missing sessions directory yields an empty list.
pub fn list_session_files(workspace: &Workspace) -> Result<Vec<String>> {
    let dir = workspace.sessions_dir();
    if !dir.is_dir() {
        return Ok(Vec::new());
    }
    let mut names = Vec::new();
    let entries = fs::read_dir(&dir)
        .with_context(|| format!("Failed to read sessions directory: {}", dir.display()))?;
    for entry in entries {
        let entry = entry?;
        if !entry.file_type()?.is_file() {
            continue;
        }
        let name = entry.file_name().to_string_lossy().into_owned();
        if name.ends_with(".md") && !name.ends_with("-summary.md") {
            names.push(name);
        }
    }
    names.sort();
    names.reverse();
    Ok(names)
}

/// Resolve `query` to a session file: a 1-based index into the newest-first
/// list, an exact file name, or a unique case-insensitive substring.
pub fn find_session(workspace: &Workspace, query: &str) -> Result<PathBuf> {
    let names = list_session_files(workspace)?;
    let name = select_session(&names, query)?;
    Ok(workspace.sessions_dir().join(name))
}

fn select_session<'a>(names: &'a [String], query: &str) -> Result<&'a str, ContextError> {
    if names.is_empty() {
        return Err(ContextError::NoSessions);
    }

    if let Ok(index) = query.trim().parse::<usize>() {
        return names
            .get(index.wrapping_sub(1))
            .map(String::as_str)
            .ok_or(ContextError::InvalidIndex {
                index,
                max: names.len(),
            });
    }

    if let Some(exact) = names.iter().find(|n| n.as_str() == query) {
        return Ok(exact);
    }

    let needle = query.to_lowercase();
    let matches: Vec<&String> = names
        .iter()
        .filter(|n| n.to_lowercase().contains(&needle))
        .collect();
    match matches.as_slice() {
        [] => Err(ContextError::SessionNotFound(query.to_string())),
        [only] => Ok(only.as_str()),
        many => Err(ContextError::AmbiguousSession {
            query: query.to_string(),
            matches: many.iter().map(|s| s.to_string()).collect(),
        }),
    }
}
