//! Domain errors surfaced to the user.
//!
//! I/O failures are not listed here; they travel as `anyhow` errors with the
//! offending path attached.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ContextError {
    #[error("no context directory found at {}. Run 'ctx init' first", .0.display())]
    NotInitialized(PathBuf),

    #[error("context file {} not found. Run 'ctx init' first", .0.display())]
    MissingFile(PathBuf),

    #[error("unknown type {0:?}. Valid types: decision, task, learning, convention")]
    UnknownEntryType(String),

    #[error(
        "no content provided\n\n\
         Usage:\n  ctx add {kind} \"your content here\"\n  ctx add {kind} \
         --file /path/to/content.md\n  echo \"content\" | ctx add {kind}\n\n\
         Examples:\n{examples}"
    )]
    EmptyContent { kind: String, examples: String },

    #[error("{kind} entries require {}", .missing.join(", "))]
    MissingFields { kind: String, missing: Vec<String> },

    #[error("task #{0} not found. Use 'ctx status' to see tasks")]
    TaskNumberNotFound(usize),

    #[error("no task matching {0:?} found. Use 'ctx status' to see tasks")]
    TaskNotFound(String),

    #[error(
        "multiple tasks match {query:?}. Be more specific or use the task number:\n{}",
        format_matches(.matches)
    )]
    AmbiguousTask { query: String, matches: Vec<String> },

    #[error("no sessions found. Run 'ctx session save' first")]
    NoSessions,

    #[error("index {index} out of range (1-{max})")]
    InvalidIndex { index: usize, max: usize },

    #[error("no session found matching {0:?}")]
    SessionNotFound(String),

    #[error("multiple sessions match {query:?}:\n{}", format_matches(.matches))]
    AmbiguousSession { query: String, matches: Vec<String> },

    #[error("drift detection found violations")]
    DriftViolations,
}

fn format_matches(matches: &[String]) -> String {
    matches
        .iter()
        .map(|m| format!("  - {m}"))
        .collect::<Vec<_>>()
        .join("\n")
}
