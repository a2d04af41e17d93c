//! Applying `<context-update>` tags found in an AI output stream.
//!
//! ```text
//! <context-update type="learning">Mocks hide driver timeouts</context-update>
//! ```
//!
//! `task`, `decision`, `learning` and `convention` updates go through the
//! same append path as `ctx add`; `complete` goes through `ctx complete`.

use crate::domain::FILE_TASKS;
use crate::entry::{append_entry, Entry, EntryKind};
use crate::session::{session_file_name, write_session};
use crate::tasks::complete_task;
use crate::utils::read_text;
use crate::workspace::Workspace;
use anyhow::{anyhow, Context, Result};
use chrono::Local;
use once_cell::sync::Lazy;
use regex::Regex;
use std::io::BufRead;
use std::path::PathBuf;

static UPDATE_TAG: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"<context-update\s+type="([^"]+)"[^>]*>([^<]+)</context-update>"#)
        .expect("static regex")
});

pub const UPDATE_COMPLETE: &str = "complete";

const TYPE_ORDER: &[&str] = &[
    "task",
    "decision",
    "learning",
    "convention",
    UPDATE_COMPLETE,
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContextUpdate {
    /// Lower-cased `type` attribute.
    pub kind: String,
    pub content: String,
}

/// Every well-formed update tag on `line`, in order.
pub fn parse_updates(line: &str) -> Vec<ContextUpdate> {
    UPDATE_TAG
        .captures_iter(line)
        .map(|caps| ContextUpdate {
            kind: caps[1].to_lowercase(),
            content: caps[2].trim().to_string(),
        })
        .collect()
}

/// Apply one update to the context files.
pub fn apply_update(workspace: &Workspace, update: &ContextUpdate) -> Result<()> {
    if update.kind == UPDATE_COMPLETE {
        complete_task(workspace, &update.content)?;
        return Ok(());
    }
    let kind: EntryKind = update
        .kind
        .parse()
        .map_err(|_| anyhow!("unknown update type: {}", update.kind))?;
    let entry = Entry::new(kind, update.content.clone());
    append_entry(workspace, &entry, Local::now().naive_local())?;
    Ok(())
}

#[derive(Debug, Clone, Copy, Default)]
pub struct WatchOptions {
    pub dry_run: bool,
    pub auto_save: bool,
    /// Applied updates between auto-saves.
    pub auto_save_interval: usize,
}

/// Progress reported while the stream is processed.
#[derive(Debug)]
pub enum WatchEvent<'a> {
    WouldApply(&'a ContextUpdate),
    Applied(&'a ContextUpdate),
    Failed(&'a ContextUpdate, anyhow::Error),
    AutoSaved { updates: usize, path: PathBuf },
    AutoSaveFailed(anyhow::Error),
    FinalSave {
        updates: usize,
        result: Result<PathBuf>,
    },
}

/// Read `reader` to the end, applying (or previewing) every update tag.
///
/// A failing update is reported and skipped. Returns the number of updates
/// applied.
pub fn process_stream<R: BufRead>(
    workspace: &Workspace,
    reader: R,
    options: WatchOptions,
    mut on_event: impl FnMut(WatchEvent<'_>),
) -> Result<usize> {
    let interval = options.auto_save_interval.max(1);
    let mut applied: Vec<ContextUpdate> = Vec::new();

    for line in reader.lines() {
        let line = line.context("Error reading input")?;
        for update in parse_updates(&line) {
            if options.dry_run {
                on_event(WatchEvent::WouldApply(&update));
                continue;
            }
            if let Err(e) = apply_update(workspace, &update) {
                tracing::warn!("failed to apply [{}]: {e:#}", update.kind);
                on_event(WatchEvent::Failed(&update, e));
                continue;
            }
            on_event(WatchEvent::Applied(&update));
            applied.push(update);

            if options.auto_save && applied.len() % interval == 0 {
                match save_watch_session(workspace, &applied) {
                    Ok(path) => on_event(WatchEvent::AutoSaved {
                        updates: applied.len(),
                        path,
                    }),
                    Err(e) => on_event(WatchEvent::AutoSaveFailed(e)),
                }
            }
        }
    }

    if options.auto_save && !applied.is_empty() && applied.len() % interval != 0 {
        let result = save_watch_session(workspace, &applied);
        on_event(WatchEvent::FinalSave {
            updates: applied.len(),
            result,
        });
    }

    Ok(applied.len())
}

/// Write `sessions/<stamp>-watch.md` listing `updates` by type.
pub fn save_watch_session(workspace: &Workspace, updates: &[ContextUpdate]) -> Result<PathBuf> {
    let now = Local::now();
    let mut out = String::from("# Watch Mode Session\n\n");
    out.push_str(&format!("**Date**: {}\n", now.format("%Y-%m-%d")));
    out.push_str(&format!("**Time**: {}\n", now.format("%H:%M:%S")));
    out.push_str("**Type**: watch-auto-save\n\n---\n\n## Applied Updates\n\n");

    for kind in TYPE_ORDER {
        let contents: Vec<&str> = updates
            .iter()
            .filter(|u| u.kind == *kind)
            .map(|u| u.content.as_str())
            .collect();
        if contents.is_empty() {
            continue;
        }
        out.push_str(&format!(
            "### {}{}s\n\n",
            kind[..1].to_uppercase(),
            &kind[1..]
        ));
        for c in contents {
            out.push_str(&format!("- {c}\n"));
        }
        out.push('\n');
    }

    out.push_str("---\n\n## Context Snapshot\n\n");
    let tasks_path = workspace.context_file(FILE_TASKS);
    if tasks_path.is_file() {
        let tasks = read_text(&tasks_path)?;
        out.push_str(&format!(
            "### Current Tasks\n\n```markdown\n{tasks}\n```\n\n"
        ));
    }

    write_session(workspace, &session_file_name(now, "watch"), &out)
}
