//! In-memory snapshot of the context directory.
//!
//! A [`ContextSnapshot`] is built fresh by every command that needs one and
//! is never written back; commands mutate files on disk and reload.

mod loader;

pub use loader::load_context;

use crate::domain::file_priority;
use chrono::{DateTime, Local};
use std::path::PathBuf;

/// One Markdown file of the context directory.
#[derive(Debug, Clone)]
pub struct FileRecord {
    pub name: String,
    pub path: PathBuf,
    pub content: String,
    pub size: u64,
    pub modified: DateTime<Local>,
    pub tokens: usize,
    pub is_empty: bool,
    pub summary: String,
}

#[derive(Debug, Clone)]
pub struct ContextSnapshot {
    pub dir: PathBuf,
    /// Sorted by file name.
    pub files: Vec<FileRecord>,
    pub total_tokens: usize,
    pub total_size: u64,
}

impl ContextSnapshot {
    pub fn file(&self, name: &str) -> Option<&FileRecord> {
        self.files.iter().find(|f| f.name == name)
    }

    /// Files in read-priority order; unknown files follow by name.
    pub fn in_priority_order(&self) -> Vec<&FileRecord> {
        let mut files: Vec<&FileRecord> = self.files.iter().collect();
        files.sort_by(|a, b| {
            file_priority(&a.name)
                .cmp(&file_priority(&b.name))
                .then_with(|| a.name.cmp(&b.name))
        });
        files
    }

    /// The `n` most recently modified files, newest first.
    pub fn recent(&self, n: usize) -> Vec<&FileRecord> {
        let mut files: Vec<&FileRecord> = self.files.iter().collect();
        files.sort_by(|a, b| b.modified.cmp(&a.modified));
        files.truncate(n);
        files
    }
}
