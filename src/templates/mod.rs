//! Starter content for context files, embedded at build time.

use crate::domain::{
    FILE_AGENT_PLAYBOOK, FILE_ARCHITECTURE, FILE_CONSTITUTION, FILE_CONVENTIONS, FILE_DECISIONS,
    FILE_DRIFT, FILE_GLOSSARY, FILE_LEARNINGS, FILE_TASKS, REQUIRED_FILES,
};
use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

const TEMPLATES: &[(&str, &str)] = &[
    (FILE_CONSTITUTION, include_str!("CONSTITUTION.md")),
    (FILE_TASKS, include_str!("TASKS.md")),
    (FILE_CONVENTIONS, include_str!("CONVENTIONS.md")),
    (FILE_ARCHITECTURE, include_str!("ARCHITECTURE.md")),
    (FILE_DECISIONS, include_str!("DECISIONS.md")),
    (FILE_LEARNINGS, include_str!("LEARNINGS.md")),
    (FILE_GLOSSARY, include_str!("GLOSSARY.md")),
    (FILE_DRIFT, include_str!("DRIFT.md")),
    (FILE_AGENT_PLAYBOOK, include_str!("AGENT_PLAYBOOK.md")),
];

/// Skeletons for rich entries, copied into `<context>/templates/`.
const ENTRY_TEMPLATES: &[(&str, &str)] = &[
    ("decision.md", include_str!("entry/decision.md")),
    ("learning.md", include_str!("entry/learning.md")),
];

/// Template for a context file name, if one ships with ctx.
pub fn template_for(name: &str) -> Option<&'static str> {
    TEMPLATES
        .iter()
        .find(|(n, _)| *n == name)
        .map(|(_, body)| *body)
}

/// Every template in read order.
pub fn all() -> impl Iterator<Item = (&'static str, &'static str)> {
    TEMPLATES.iter().copied()
}

/// What happened to one template during [`write_templates`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemplateWrite {
    Created(&'static str),
    Skipped(&'static str),
}

/// Materialize templates into `dir`, creating it if needed.
///
/// `minimal` limits the set to the required files. Existing files are left
/// alone unless `force` is set.
pub fn write_templates(dir: &Path, minimal: bool, force: bool) -> Result<Vec<TemplateWrite>> {
    let selected = all().filter(|(name, _)| !minimal || REQUIRED_FILES.contains(name));
    write_all(dir, selected, force)
}

/// Materialize the entry templates into `dir` (normally `<context>/templates`).
pub fn write_entry_templates(dir: &Path, force: bool) -> Result<Vec<TemplateWrite>> {
    write_all(dir, ENTRY_TEMPLATES.iter().copied(), force)
}

fn write_all(
    dir: &Path,
    templates: impl Iterator<Item = (&'static str, &'static str)>,
    force: bool,
) -> Result<Vec<TemplateWrite>> {
    fs::create_dir_all(dir).with_context(|| format!("Failed to create {}", dir.display()))?;
    let mut outcome = Vec::new();
    for (name, body) in templates {
        let path = dir.join(name);
        if path.exists() && !force {
            outcome.push(TemplateWrite::Skipped(name));
            continue;
        }
        fs::write(&path, body).with_context(|| format!("Failed to write {}", path.display()))?;
        outcome.push(TemplateWrite::Created(name));
    }
    Ok(outcome)
}
