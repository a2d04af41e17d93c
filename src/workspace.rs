//! Resolved project paths and configuration shared by every command.

use crate::config::load_config;
use crate::domain::{Config, DIR_ARCHIVE, DIR_SESSIONS, DIR_TEMPLATES};
use crate::error::ContextError;
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone)]
pub struct Workspace {
    pub project_root: PathBuf,
    pub context_dir: PathBuf,
    pub config: Config,
}

impl Workspace {
    /// Resolve the workspace for `project_dir` (current directory when `None`).
    pub fn resolve(project_dir: Option<&Path>, config_path: Option<&Path>) -> Result<Self> {
        let project_root = match project_dir {
            Some(dir) => dir.to_path_buf(),
            None => std::env::current_dir()
                .context("Failed to determine current directory")?,
        };
        let config = load_config(&project_root, config_path)?;
        Ok(Self::with_config(project_root, config))
    }

    pub fn with_config(project_root: PathBuf, config: Config) -> Self {
        let context_dir = project_root.join(&config.context_dir);
        Self {
            project_root,
            context_dir,
            config,
        }
    }

    pub fn context_file(&self, name: &str) -> PathBuf {
        self.context_dir.join(name)
    }

    pub fn archive_dir(&self) -> PathBuf {
        self.context_dir.join(DIR_ARCHIVE)
    }

    pub fn sessions_dir(&self) -> PathBuf {
        self.context_dir.join(DIR_SESSIONS)
    }

    /// Entry templates for `ctx add --file`.
    pub fn templates_dir(&self) -> PathBuf {
        self.context_dir.join(DIR_TEMPLATES)
    }

    pub fn is_initialized(&self) -> bool {
        self.context_dir.is_dir()
    }

    /// Fail with [`ContextError::NotInitialized`] when the context directory is missing.
    pub fn require_initialized(&self) -> Result<()> {
        if self.is_initialized() {
            Ok(())
        } else {
            let dir = self.context_dir.clone();
            Err(ContextError::NotInitialized(dir).into())
        }
    }

    /// Path of `name` inside the context directory, or [`ContextError::MissingFile`].
    pub fn require_file(&self, name: &str) -> Result<PathBuf> {
        let path = self.context_file(name);
        if path.is_file() {
            Ok(path)
        } else {
            Err(ContextError::MissingFile(path).into())
        }
    }

    /// Context directory relative to the project root, for display.
    pub fn display_context_dir(&self) -> String {
        self.context_dir
            .strip_prefix(&self.project_root)
            .unwrap_or(&self.context_dir)
            .display()
            .to_string()
    }
}
