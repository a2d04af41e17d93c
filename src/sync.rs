//! Reconciling context files with the project tree.
//!
//! Suggestions only: nothing here writes to disk.

use crate::context::ContextSnapshot;
use crate::domain::{FILE_ARCHITECTURE, FILE_CONVENTIONS, FILE_DEPENDENCIES};
use anyhow::Result;
use globset::{Glob, GlobSet, GlobSetBuilder};
use ignore::WalkBuilder;
use serde::Serialize;
use std::fmt;
use std::path::Path;

/// Dependency manifests and what they describe.
const PACKAGE_FILES: &[(&str, &str)] = &[
    ("package.json", "Node.js dependencies"),
    ("go.mod", "Go module dependencies"),
    ("Cargo.toml", "Rust dependencies"),
    ("requirements.txt", "Python dependencies"),
    ("Gemfile", "Ruby dependencies"),
];

/// `(glob, topic, keyword)`: a config file whose topic should appear in
/// CONVENTIONS.md, detected by `keyword`.
const CONFIG_PATTERNS: &[(&str, &str, &str)] = &[
    (".eslintrc*", "linting conventions", "lint"),
    (".prettierrc*", "formatting conventions", "format"),
    ("tsconfig.json", "TypeScript configuration", "typescript"),
    (".editorconfig", "editor configuration", "editorconfig"),
    ("Makefile", "build commands", "make"),
    ("Dockerfile", "containerization", "docker"),
];

/// Directories that never need an architecture entry.
const SKIP_DIRS: &[&str] = &[
    "node_modules",
    "vendor",
    "target",
    "dist",
    "build",
    "__pycache__",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ActionKind {
    NewDir,
    Deps,
    Config,
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::NewDir => "NEW_DIR",
            Self::Deps => "DEPS",
            Self::Config => "CONFIG",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SyncAction {
    #[serde(rename = "type")]
    pub kind: ActionKind,
    pub file: String,
    pub description: String,
    pub suggestion: String,
}

/// Every suggested update, directories first.
pub fn detect_sync_actions(
    project_root: &Path,
    snapshot: &ContextSnapshot,
) -> Result<Vec<SyncAction>> {
    let architecture = lowercase_content(snapshot, FILE_ARCHITECTURE);
    let conventions = lowercase_content(snapshot, FILE_CONVENTIONS);
    let has_dependencies_doc = snapshot
        .file(FILE_DEPENDENCIES)
        .is_some_and(|f| !f.is_empty);

    let entries = top_level_entries(project_root, snapshot)?;
    let mut actions = Vec::new();

    for (name, is_dir) in &entries {
        if *is_dir && !architecture.contains(&name.to_lowercase()) {
            actions.push(SyncAction {
                kind: ActionKind::NewDir,
                file: FILE_ARCHITECTURE.to_string(),
                description: format!("Directory '{name}/' is not documented"),
                suggestion: format!("Add a description of {name}/ to {FILE_ARCHITECTURE}"),
            });
        }
    }

    if !has_dependencies_doc {
        for (manifest, topic) in PACKAGE_FILES {
            let present = entries.iter().any(|(n, is_dir)| !is_dir && n == manifest);
            if present
                && !architecture.contains(&manifest.to_lowercase())
                && !architecture.contains("dependencies")
            {
                actions.push(SyncAction {
                    kind: ActionKind::Deps,
                    file: manifest.to_string(),
                    description: format!("Found {manifest} ({topic})"),
                    suggestion: format!(
                        "Document key dependencies in {FILE_DEPENDENCIES} or {FILE_ARCHITECTURE}"
                    ),
                });
            }
        }
    }

    let globs = config_globset()?;
    for (name, _) in entries.iter().filter(|(_, is_dir)| !is_dir) {
        for idx in globs.matches(name) {
            let (_, topic, keyword) = CONFIG_PATTERNS[idx];
            if !conventions.contains(keyword) {
                actions.push(SyncAction {
                    kind: ActionKind::Config,
                    file: name.clone(),
                    description: format!("Found {name} ({topic})"),
                    suggestion: format!("Document {topic} in {FILE_CONVENTIONS}"),
                });
            }
        }
    }

    tracing::debug!("sync: {} actions", actions.len());
    Ok(actions)
}

fn lowercase_content(snapshot: &ContextSnapshot, name: &str) -> String {
    snapshot
        .file(name)
        .map(|f| f.content.to_lowercase())
        .unwrap_or_default()
}

fn config_globset() -> Result<GlobSet> {
    let mut builder = GlobSetBuilder::new();
    for (pattern, _, _) in CONFIG_PATTERNS {
        builder.add(Glob::new(pattern)?);
    }
    Ok(builder.build()?)
}

/// `(name, is_dir)` for the immediate children of `root`, sorted by name.
///
/// Honors `.gitignore` even outside a git repository. Dot-files are kept so
/// config files such as `.eslintrc.json` are seen; dot-directories and the
/// context directory are not.
fn top_level_entries(root: &Path, snapshot: &ContextSnapshot) -> Result<Vec<(String, bool)>> {
    let mut builder = WalkBuilder::new(root);
    builder
        .max_depth(Some(1))
        .hidden(false)
        .require_git(false)
        .git_global(false);

    let mut entries = Vec::new();
    for result in builder.build() {
        let entry = match result {
            Ok(entry) => entry,
            Err(e) => {
                tracing::warn!("sync: skipping unreadable entry: {e}");
                continue;
            }
        };
        if entry.depth() == 0 || entry.path() == snapshot.dir {
            continue;
        }
        let name = entry.file_name().to_string_lossy().into_owned();
        let is_dir = entry.file_type().is_some_and(|t| t.is_dir());
        if is_dir && (name.starts_with('.') || SKIP_DIRS.contains(&name.as_str())) {
            continue;
        }
        entries.push((name, is_dir));
    }
    entries.sort();
    Ok(entries)
}
