//! Classification of TASKS.md lines.

use crate::markdown::is_heading;
use once_cell::sync::Lazy;
use regex::Regex;

static PHASE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^###\s+Phase").expect("static regex"));
static SUB_TASK: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\s{2,}-\s*\[").expect("static regex"));
static COMPLETED: Lazy<Regex> = Lazy::new(|| Regex::new(r"^-\s*\[x\]").expect("static regex"));
static PENDING: Lazy<Regex> = Lazy::new(|| Regex::new(r"^-\s*\[\s*\]").expect("static regex"));

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskLine {
    /// `### Phase ...`
    PhaseHeader,
    /// Top-level `- [x]`.
    Completed,
    /// Top-level `- [ ]`.
    Pending,
    /// Checkbox indented by two or more spaces.
    SubTask,
    /// Any other Markdown heading.
    Heading,
    Other,
}

impl TaskLine {
    /// Classify in the order phase, sub-task, completed, pending.
    pub fn classify(line: &str) -> Self {
        if PHASE.is_match(line) {
            Self::PhaseHeader
        } else if SUB_TASK.is_match(line) {
            Self::SubTask
        } else if COMPLETED.is_match(line) {
            Self::Completed
        } else if PENDING.is_match(line) {
            Self::Pending
        } else if is_heading(line) {
            Self::Heading
        } else {
            Self::Other
        }
    }
}

/// Count top-level `(pending, completed)` checkboxes in `content`.
pub fn count_tasks(content: &str) -> (usize, usize) {
    content.lines().fold((0, 0), |(pending, completed), line| match TaskLine::classify(line) {
        TaskLine::Pending => (pending + 1, completed),
        TaskLine::Completed => (pending, completed + 1),
        _ => (pending, completed),
    })
}
