//! Moving completed tasks out of TASKS.md into dated archive files.

use super::line::TaskLine;
use crate::domain::FILE_TASKS;
use crate::utils::read_text;
use crate::workspace::Workspace;
use anyhow::{Context, Result};
use chrono::{DateTime, Local};
use std::fs;
use std::path::PathBuf;

/// Result of partitioning TASKS.md content.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Separation {
    pub remaining: String,
    pub archived: String,
    pub completed: usize,
    pub pending: usize,
}

#[derive(Default)]
struct PhaseGroup {
    header: Option<String>,
    buffer: String,
}

impl PhaseGroup {
    fn flush_into(&self, archived: &mut String) {
        if self.buffer.is_empty() {
            return;
        }
        if !archived.is_empty() {
            archived.push('\n');
        }
        if let Some(header) = &self.header {
            archived.push_str(header);
            archived.push('\n');
        }
        archived.push_str(&self.buffer);
    }
}

/// Split `content` into what stays in TASKS.md and what gets archived.
///
/// Completed top-level tasks move to the archive together with the sub-tasks
/// that follow them, grouped under their phase header. Phase headers always
/// stay in the remaining content so pending work keeps its structure.
pub fn separate_tasks(content: &str) -> Separation {
    let mut sep = Separation::default();
    let mut group = PhaseGroup::default();
    let mut in_completed = false;

    for line in content.lines() {
        match TaskLine::classify(line) {
            TaskLine::PhaseHeader => {
                group.flush_into(&mut sep.archived);
                group = PhaseGroup {
                    header: Some(line.to_string()),
                    buffer: String::new(),
                };
                push_line(&mut sep.remaining, line);
                in_completed = false;
            }
            TaskLine::SubTask => {
                if in_completed {
                    push_line(&mut group.buffer, line);
                } else {
                    push_line(&mut sep.remaining, line);
                }
            }
            TaskLine::Completed => {
                sep.completed += 1;
                push_line(&mut group.buffer, line);
                in_completed = true;
            }
            TaskLine::Pending => {
                sep.pending += 1;
                push_line(&mut sep.remaining, line);
                in_completed = false;
            }
            TaskLine::Heading => {
                push_line(&mut sep.remaining, line);
                in_completed = false;
            }
            TaskLine::Other => push_line(&mut sep.remaining, line),
        }
    }
    group.flush_into(&mut sep.archived);

    sep
}

fn push_line(buf: &mut String, line: &str) {
    buf.push_str(line);
    buf.push('\n');
}

/// What `archive_completed` did (or would do on a dry run).
#[derive(Debug, Clone)]
pub struct ArchiveOutcome {
    pub separation: Separation,
    /// Archive file written, `None` on dry runs or when nothing was archived.
    pub archive_path: Option<PathBuf>,
}

/// Archive completed tasks from TASKS.md into `archive/tasks-YYYY-MM-DD.md`.
///
/// The archive is written before TASKS.md is rewritten; there is no rollback
/// if the second write fails.
pub fn archive_completed(
    workspace: &Workspace,
    now: DateTime<Local>,
    dry_run: bool,
) -> Result<ArchiveOutcome> {
    let tasks_path = workspace.require_file(FILE_TASKS)?;
    let content = read_text(&tasks_path)?;
    let separation = separate_tasks(&content);

    if separation.completed == 0 || dry_run {
        return Ok(ArchiveOutcome {
            separation,
            archive_path: None,
        });
    }

    let archive_path = append_to_archive(workspace, &separation.archived, now)?;
    fs::write(&tasks_path, &separation.remaining)
        .with_context(|| format!("Failed to update {}", tasks_path.display()))?;
    tracing::debug!(
        "archived {} tasks to {}",
        separation.completed,
        archive_path.display()
    );

    Ok(ArchiveOutcome {
        separation,
        archive_path: Some(archive_path),
    })
}

/// Append `archived` to today's archive file, creating it with a header.
pub fn append_to_archive(
    workspace: &Workspace,
    archived: &str,
    now: DateTime<Local>,
) -> Result<PathBuf> {
    let archive_dir = workspace.archive_dir();
    fs::create_dir_all(&archive_dir).with_context(|| {
        format!(
            "Failed to create archive directory: {}",
            archive_dir.display()
        )
    })?;

    let date = now.format("%Y-%m-%d").to_string();
    let path = archive_dir.join(format!("tasks-{date}.md"));
    let content = if path.exists() {
        let existing = read_text(&path)?;
        format!("{existing}\n{archived}")
    } else {
        format!(
            "# Task Archive - {date}\n\nArchived from TASKS.md\n\n{archived}"
        )
    };

    fs::write(&path, content)
        .with_context(|| format!("Failed to write archive: {}", path.display()))?;
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Config;
    use chrono::TimeZone;
    use tempfile::TempDir;

    #[test]
    fn archives_completed_task_with_its_subtasks() {
        let content = "### Phase 1\n- [x] A\n  - [x] A.1\n- [ ] B\n";
        let sep = separate_tasks(content);
        assert_eq!(sep.completed, 1);
        assert_eq!(sep.pending, 1);
        assert_eq!(sep.archived, "### Phase 1\n- [x] A\n  - [x] A.1\n");
        assert_eq!(sep.remaining, "### Phase 1\n- [ ] B\n");
    }

    #[test]
    fn subtasks_follow_their_parent() {
        let content = "- [ ] Parent\n  - [x] Done child\n- [x] Other\n  - [ ] Open child\n";
        let sep = separate_tasks(content);
        assert_eq!(sep.remaining, "- [ ] Parent\n  - [x] Done child\n");
        assert_eq!(sep.archived, "- [x] Other\n  - [ ] Open child\n");
    }

    #[test]
    fn groups_by_phase_with_blank_line_between() {
        let content = "# Tasks\n\n### Phase 1\n- [x] a\n- [ ] b\n\n### Phase 2\n- [x] c\n";
        let sep = separate_tasks(content);
        similar_asserts::assert_eq!(
            sep.archived,
            "### Phase 1\n- [x] a\n\n### Phase 2\n- [x] c\n"
        );
        similar_asserts::assert_eq!(
            sep.remaining,
            "# Tasks\n\n### Phase 1\n- [ ] b\n\n### Phase 2\n"
        );
    }

    #[test]
    fn phase_without_completed_tasks_is_not_archived() {
        let sep = separate_tasks("### Phase 1\n- [ ] a\n### Phase 2\n- [x] b\n");
        assert_eq!(sep.archived, "### Phase 2\n- [x] b\n");
    }

    #[test]
    fn heading_ends_completed_block() {
        let sep = separate_tasks("- [x] a\n## Notes\n  - [ ] stray\n");
        assert_eq!(sep.archived, "- [x] a\n");
        assert_eq!(sep.remaining, "## Notes\n  - [ ] stray\n");
    }

    #[test]
    fn counts_match_top_level_checkboxes() {
        let content = "- [ ] a\n- [x] b\n  - [x] b.1\n- [x] c\n- [ ] d\n### Phase 9\n- [ ] e\n";
        let sep = separate_tasks(content);
        assert_eq!(sep.completed + sep.pending, 5);
        assert_eq!(
            super::super::line::count_tasks(content),
            (sep.pending, sep.completed)
        );
    }

    #[test]
    fn archive_writes_dated_file_and_rewrites_tasks() {
        let tmp = TempDir::new().expect("tmp");
        let ws = Workspace::with_config(tmp.path().to_path_buf(), Config::default());
        fs::create_dir_all(&ws.context_dir).expect("mkdir");
        fs::write(
            ws.context_file("TASKS.md"),
            "### Phase 1\n- [x] A\n  - [x] A.1\n- [ ] B\n",
        )
        .expect("write");

        let now = Local
            .with_ymd_and_hms(2026, 1, 15, 10, 0, 0)
            .single()
            .expect("now");
        let outcome = archive_completed(&ws, now, false).expect("archive");
        let path = outcome.archive_path.expect("archive path");
        assert_eq!(path, ws.archive_dir().join("tasks-2026-01-15.md"));

        let archived = fs::read_to_string(&path).expect("read");
        similar_asserts::assert_eq!(
            archived,
            "# Task Archive - 2026-01-15\n\nArchived from TASKS.md\n\n\
             ### Phase 1\n- [x] A\n  - [x] A.1\n"
        );
        let tasks = fs::read_to_string(ws.context_file("TASKS.md")).expect("read");
        assert_eq!(tasks, "### Phase 1\n- [ ] B\n");

        fs::write(ws.context_file("TASKS.md"), "- [x] C\n").expect("write");
        archive_completed(&ws, now, false).expect("archive again");
        let archived = fs::read_to_string(&path).expect("read");
        assert!(archived.ends_with("  - [x] A.1\n\n- [x] C\n"));
    }

    #[test]
    fn dry_run_and_nothing_to_archive_write_nothing() {
        let tmp = TempDir::new().expect("tmp");
        let ws = Workspace::with_config(tmp.path().to_path_buf(), Config::default());
        fs::create_dir_all(&ws.context_dir).expect("mkdir");
        fs::write(ws.context_file("TASKS.md"), "- [x] done\n").expect("write");

        let now = Local::now();
        let outcome = archive_completed(&ws, now, true).expect("dry run");
        assert_eq!(outcome.separation.completed, 1);
        assert!(outcome.archive_path.is_none());
        assert!(!ws.archive_dir().exists());

        fs::write(ws.context_file("TASKS.md"), "- [ ] open\n").expect("write");
        let outcome = archive_completed(&ws, now, false).expect("nothing");
        assert!(outcome.archive_path.is_none());
        assert!(!ws.archive_dir().exists());
    }
}
