//! Config file loading

use crate::domain::Config;
use anyhow::{Context, Result};
use figment::providers::{Env, Serialized};
use figment::Figment;
use std::fs;
use std::path::{Path, PathBuf};

/// Environment variables (with the `CTX_` prefix) that override file values.
const ENV_KEYS: &[&str] = &[
    "context_dir",
    "token_budget",
    "stale_task_threshold",
    "watch_auto_save_interval",
    "session_list_limit",
];

/// Load the configuration for `project_root`.
///
/// An explicit `config_path` that cannot be parsed is an error. A discovered
/// file that cannot be parsed logs a warning and falls back to defaults.
/// `CTX_*` environment variables are layered on top of either.
pub fn load_config(project_root: &Path, config_path: Option<&Path>) -> Result<Config> {
    let file_config = load_file_config(project_root, config_path)?;
    apply_env_overrides(file_config)
}

fn load_file_config(project_root: &Path, config_path: Option<&Path>) -> Result<Config> {
    let explicit = config_path.is_some();

    let discovered = match config_path {
        Some(path) => Some(path.to_path_buf()),
        None => discover_config(project_root),
    };

    let Some(config_file) = discovered else {
        return Ok(Config::default());
    };

    let content = fs::read_to_string(&config_file)
        .with_context(|| format!("Failed reading config file: {}", config_file.display()))?;

    let ext = config_file
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let parsed = match ext.as_str() {
        "toml" => parse_toml_config(&content, &config_file),
        "yaml" | "yml" => parse_yaml_config(&content, &config_file),
        other => Err(anyhow::anyhow!(
            "Unsupported config extension '.{}' for file {}",
            other,
            config_file.display()
        )),
    };

    match parsed {
        Ok(cfg) => {
            tracing::debug!("loaded config from {}", config_file.display());
            Ok(cfg)
        }
        Err(e) if explicit => Err(e),
        Err(e) => {
            tracing::warn!(
                "Failed to parse discovered config {}: {:#}",
                config_file.display(),
                e
            );
            Ok(Config::default())
        }
    }
}

fn apply_env_overrides(config: Config) -> Result<Config> {
    Figment::from(Serialized::defaults(config))
        .merge(Env::prefixed("CTX_").only(ENV_KEYS))
        .extract()
        .context("Invalid CTX_* environment override")
}

/// Parse TOML config, supporting a nested `[ctx]` table.
fn parse_toml_config(content: &str, config_file: &Path) -> Result<Config> {
    let raw: toml::Value = toml::from_str(content)
        .with_context(|| format!("Invalid TOML syntax: {}", config_file.display()))?;

    let config_val = match raw.get("ctx") {
        Some(nested) => nested.clone(),
        None => raw,
    };

    config_val
        .try_into()
        .with_context(|| format!("Invalid TOML config: {}", config_file.display()))
}

/// Parse YAML config, supporting a nested `ctx:` mapping.
fn parse_yaml_config(content: &str, config_file: &Path) -> Result<Config> {
    let raw: serde_yaml::Value = serde_yaml::from_str(content)
        .with_context(|| format!("Invalid YAML syntax: {}", config_file.display()))?;

    let config_val = match raw.get("ctx") {
        Some(nested) => nested.clone(),
        None => raw,
    };

    serde_yaml::from_value(config_val)
        .with_context(|| format!("Invalid YAML config: {}", config_file.display()))
}

fn discover_config(project_root: &Path) -> Option<PathBuf> {
    let candidates = [".ctxrc.toml", "ctx.toml", ".ctxrc.yml", ".ctxrc.yaml"];

    candidates
        .iter()
        .map(|c| project_root.join(c))
        .find(|p| p.exists())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn defaults_when_no_config_file() {
        let tmp = TempDir::new().expect("tmp");
        let cfg = load_file_config(tmp.path(), None).expect("config");
        assert_eq!(cfg, Config::default());
    }

    #[test]
    fn discovers_toml_config() {
        let tmp = TempDir::new().expect("tmp");
        fs::write(
            tmp.path().join(".ctxrc.toml"),
            "token_budget = 2000\nstale_task_threshold = 3\n",
        )
        .expect("write");

        let cfg = load_file_config(tmp.path(), None).expect("config");
        assert_eq!(cfg.token_budget, 2000);
        assert_eq!(cfg.stale_task_threshold, 3);
        assert_eq!(cfg.context_dir, ".context");
    }

    #[test]
    fn honors_nested_ctx_table() {
        let tmp = TempDir::new().expect("tmp");
        fs::write(
            tmp.path().join("ctx.toml"),
            "[ctx]\ncontext_dir = \"notes\"\n",
        )
        .expect("write");

        let cfg = load_file_config(tmp.path(), None).expect("config");
        assert_eq!(cfg.context_dir, "notes");
    }

    #[test]
    fn discovers_yaml_config() {
        let tmp = TempDir::new().expect("tmp");
        fs::write(
            tmp.path().join(".ctxrc.yml"),
            "ctx:\n  session_list_limit: 4\n  path_check_files: [ARCHITECTURE.md]\n",
        )
        .expect("write");

        let cfg = load_file_config(tmp.path(), None).expect("config");
        assert_eq!(cfg.session_list_limit, 4);
        assert_eq!(cfg.path_check_files, vec!["ARCHITECTURE.md".to_string()]);
    }

    #[test]
    fn explicit_invalid_config_is_an_error() {
        let tmp = TempDir::new().expect("tmp");
        let path = tmp.path().join("bad.toml");
        fs::write(&path, "token_budget = \"lots\"\n").expect("write");

        assert!(load_file_config(tmp.path(), Some(&path)).is_err());
    }

    #[test]
    fn discovered_invalid_config_falls_back_to_defaults() {
        let tmp = TempDir::new().expect("tmp");
        fs::write(tmp.path().join(".ctxrc.toml"), "token_budget = [1, 2]\n").expect("write");

        let cfg = load_file_config(tmp.path(), None).expect("soft fail");
        assert_eq!(cfg, Config::default());
    }

    #[test]
    fn explicit_unsupported_extension_is_an_error() {
        let tmp = TempDir::new().expect("tmp");
        let path = tmp.path().join("ctx.ini");
        fs::write(&path, "token_budget=1\n").expect("write");

        assert!(load_file_config(tmp.path(), Some(&path)).is_err());
    }
}
