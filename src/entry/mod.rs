//! Typed context entries: formatting and splicing into their files.

mod append;
mod format;

pub use append::{add_entry, append_entry, splice_entry};
pub use format::format_entry;

use crate::domain::{FILE_CONVENTIONS, FILE_DECISIONS, FILE_LEARNINGS, FILE_TASKS};
use crate::error::ContextError;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntryKind {
    Task,
    Decision,
    Learning,
    Convention,
}

impl EntryKind {
    pub const ALL: [EntryKind; 4] = [Self::Task, Self::Decision, Self::Learning, Self::Convention];

    pub fn file_name(self) -> &'static str {
        match self {
            Self::Task => FILE_TASKS,
            Self::Decision => FILE_DECISIONS,
            Self::Learning => FILE_LEARNINGS,
            Self::Convention => FILE_CONVENTIONS,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Task => "task",
            Self::Decision => "decision",
            Self::Learning => "learning",
            Self::Convention => "convention",
        }
    }

    /// Example invocations shown when `ctx add` gets no content.
    pub fn examples(self) -> &'static str {
        match self {
            Self::Decision => concat!(
                "  ctx add decision \"Use PostgreSQL for primary database\" \\\n",
                "    --context \"Need a reliable database\" ",
                "--rationale \"ACID and JSON support\" \\\n",
                "    --consequences \"Team needs PostgreSQL training\"",
            ),
            Self::Task => concat!(
                "  ctx add task \"Implement user authentication\"\n",
                "  ctx add task \"Fix login bug\" --priority high",
            ),
            Self::Learning => concat!(
                "  ctx add learning \"Vitest mocks must be hoisted above imports\"\n",
                "  ctx add learning \"Go embed requires files in same package directory\"",
            ),
            Self::Convention => concat!(
                "  ctx add convention \"Use camelCase for function names\"\n",
                "  ctx add convention \"All API responses use JSON\"",
            ),
        }
    }
}

impl fmt::Display for EntryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EntryKind {
    type Err = ContextError;

    /// Accepts singular or plural names, case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "task" | "tasks" => Ok(Self::Task),
            "decision" | "decisions" => Ok(Self::Decision),
            "learning" | "learnings" => Ok(Self::Learning),
            "convention" | "conventions" => Ok(Self::Convention),
            _ => Err(ContextError::UnknownEntryType(s.to_string())),
        }
    }
}

/// A new entry with its type-specific fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub kind: EntryKind,
    pub content: String,
    pub priority: Option<String>,
    /// Target section header for tasks (default `## Next Up`).
    pub section: Option<String>,
    pub context: Option<String>,
    pub rationale: Option<String>,
    pub consequences: Option<String>,
    pub lesson: Option<String>,
    pub application: Option<String>,
}

impl Entry {
    pub fn new(kind: EntryKind, content: impl Into<String>) -> Self {
        Self {
            kind,
            content: content.into(),
            priority: None,
            section: None,
            context: None,
            rationale: None,
            consequences: None,
            lesson: None,
            application: None,
        }
    }

    pub fn with_priority(mut self, priority: Option<String>) -> Self {
        self.priority = priority.filter(|p| !p.trim().is_empty());
        self
    }

    pub fn with_section(mut self, section: Option<String>) -> Self {
        self.section = section.filter(|s| !s.trim().is_empty());
        self
    }

    pub fn with_decision_fields(
        mut self,
        context: Option<String>,
        rationale: Option<String>,
        consequences: Option<String>,
    ) -> Self {
        self.context = context;
        self.rationale = rationale;
        self.consequences = consequences;
        self
    }

    pub fn with_learning_fields(
        mut self,
        context: Option<String>,
        lesson: Option<String>,
        application: Option<String>,
    ) -> Self {
        self.context = context;
        self.lesson = lesson;
        self.application = application;
        self
    }

    /// Fields that must be present before the entry can be written.
    ///
    /// Decisions need context, rationale and consequences.
    pub fn missing_fields(&self) -> Vec<String> {
        if self.kind != EntryKind::Decision {
            return Vec::new();
        }
        let blank = |v: &Option<String>| v.as_deref().map_or(true, |s| s.trim().is_empty());
        let mut missing = Vec::new();
        if blank(&self.context) {
            missing.push("--context".to_string());
        }
        if blank(&self.rationale) {
            missing.push("--rationale".to_string());
        }
        if blank(&self.consequences) {
            missing.push("--consequences".to_string());
        }
        missing
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_singular_and_plural_names() {
        assert_eq!("task".parse::<EntryKind>().ok(), Some(EntryKind::Task));
        assert_eq!(
            "Decisions".parse::<EntryKind>().ok(),
            Some(EntryKind::Decision)
        );
        assert_eq!(
            "LEARNING".parse::<EntryKind>().ok(),
            Some(EntryKind::Learning)
        );
        assert_eq!(
            "conventions".parse::<EntryKind>().ok(),
            Some(EntryKind::Convention)
        );
        assert!(matches!(
            "note".parse::<EntryKind>(),
            Err(ContextError::UnknownEntryType(_))
        ));
    }

    #[test]
    fn decision_requires_all_fields() {
        let entry = Entry::new(EntryKind::Decision, "Use SQLite").with_decision_fields(
            Some("Need storage".to_string()),
            None,
            Some("  ".to_string()),
        );
        assert_eq!(
            entry.missing_fields(),
            vec!["--rationale", "--consequences"]
        );
    }

    #[test]
    fn tasks_have_no_required_fields() {
        assert!(Entry::new(EntryKind::Task, "x").missing_fields().is_empty());
    }

    #[test]
    fn kinds_map_to_files() {
        let files: Vec<&str> = EntryKind::ALL.iter().map(|k| k.file_name()).collect();
        assert_eq!(
            files,
            vec!["TASKS.md", "DECISIONS.md", "LEARNINGS.md", "CONVENTIONS.md"]
        );
    }
}
