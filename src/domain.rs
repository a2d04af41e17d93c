//! Core domain constants and configuration types.

use serde::{Deserialize, Serialize};

pub const DIR_CONTEXT: &str = ".context";
pub const DIR_ARCHIVE: &str = "archive";
pub const DIR_SESSIONS: &str = "sessions";
pub const DIR_TEMPLATES: &str = "templates";

pub const FILE_CONSTITUTION: &str = "CONSTITUTION.md";
pub const FILE_TASKS: &str = "TASKS.md";
pub const FILE_CONVENTIONS: &str = "CONVENTIONS.md";
pub const FILE_ARCHITECTURE: &str = "ARCHITECTURE.md";
pub const FILE_DECISIONS: &str = "DECISIONS.md";
pub const FILE_LEARNINGS: &str = "LEARNINGS.md";
pub const FILE_GLOSSARY: &str = "GLOSSARY.md";
pub const FILE_DRIFT: &str = "DRIFT.md";
pub const FILE_AGENT_PLAYBOOK: &str = "AGENT_PLAYBOOK.md";
pub const FILE_DEPENDENCIES: &str = "DEPENDENCIES.md";

/// Timestamp layout used in entries (`#added:`, decision and learning headers).
pub const ENTRY_TIMESTAMP_FORMAT: &str = "%Y-%m-%d-%H%M";

/// Files every context directory must contain; checked by drift detection.
pub const REQUIRED_FILES: &[&str] = &[FILE_CONSTITUTION, FILE_TASKS, FILE_DECISIONS];

/// Priority order for reading context files.
///
/// Constitution first so hard rules are known before anything else, then the
/// current work, how to write code, system structure, the history behind it,
/// reference material, and finally the meta playbook for the system itself.
pub const FILE_READ_ORDER: &[&str] = &[
    FILE_CONSTITUTION,
    FILE_TASKS,
    FILE_CONVENTIONS,
    FILE_ARCHITECTURE,
    FILE_DECISIONS,
    FILE_LEARNINGS,
    FILE_GLOSSARY,
    FILE_DRIFT,
    FILE_AGENT_PLAYBOOK,
];

/// Priority of a context file: 1 is highest, unknown files get 100.
pub fn file_priority(name: &str) -> usize {
    FILE_READ_ORDER
        .iter()
        .position(|n| *n == name)
        .map_or(100, |idx| idx + 1)
}

/// Resolved configuration for a ctx invocation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Context directory, relative to the project root.
    pub context_dir: String,
    /// Default token budget for `ctx load`.
    pub token_budget: usize,
    /// Completed tasks in TASKS.md above this count raise a staleness warning.
    pub stale_task_threshold: usize,
    /// Applied updates between auto-saves in `ctx watch --auto-save`.
    pub watch_auto_save_interval: usize,
    /// Context files scanned for dead path references.
    pub path_check_files: Vec<String>,
    /// Default number of sessions shown by `ctx session list`.
    pub session_list_limit: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            context_dir: DIR_CONTEXT.to_string(),
            token_budget: 8000,
            stale_task_threshold: 10,
            watch_auto_save_interval: 5,
            path_check_files: vec![FILE_ARCHITECTURE.to_string(), FILE_CONVENTIONS.to_string()],
            session_list_limit: 10,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn priority_follows_read_order() {
        assert_eq!(file_priority(FILE_CONSTITUTION), 1);
        assert_eq!(file_priority(FILE_TASKS), 2);
        assert_eq!(file_priority(FILE_AGENT_PLAYBOOK), 9);
        assert_eq!(file_priority("NOTES.md"), 100);
    }

    #[test]
    fn required_files_are_in_read_order() {
        for name in REQUIRED_FILES {
            assert!(FILE_READ_ORDER.contains(name));
        }
    }
}
