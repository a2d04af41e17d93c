//! Metadata read back from a saved session file.

use crate::utils::read_text;
use anyhow::Result;
use serde::Serialize;
use std::path::Path;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SessionInfo {
    pub filename: String,
    pub topic: String,
    pub date: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub summary: String,
}

/// Topic, date, type and first summary line of a session file.
///
/// Missing fields stay empty; placeholder lines (`[...]`) are not summaries.
pub fn parse_session_info(content: &str) -> SessionInfo {
    let mut info = SessionInfo::default();

    if let Some(first) = content.lines().next() {
        if let Some(topic) = first.strip_prefix("# Session:") {
            info.topic = topic.trim().to_string();
        } else if let Some(title) = first.strip_prefix("# ") {
            info.topic = title.trim().to_string();
        }
    }

    info.date = field(content, "**Date**:").unwrap_or_default();
    info.kind = field(content, "**Type**:").unwrap_or_default();

    if let Some(idx) = content.find("## Summary") {
        info.summary = content[idx + "## Summary".len()..]
            .lines()
            .map(str::trim)
            .take_while(|l| !l.starts_with("## "))
            .find(|l| {
                !l.is_empty() && !l.starts_with('#') && !l.starts_with("---") && !l.starts_with('[')
            })
            .unwrap_or_default()
            .to_string();
    }

    info
}

/// Parse the session at `path`, recording its file name.
pub fn read_session_info(path: &Path) -> Result<SessionInfo> {
    let content = read_text(path)?;
    let mut info = parse_session_info(&content);
    info.filename = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    Ok(info)
}

fn field(content: &str, marker: &str) -> Option<String> {
    let idx = content.find(marker)?;
    let rest = &content[idx + marker.len()..];
    rest.lines().next().map(|v| v.trim().to_string())
}
