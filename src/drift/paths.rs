//! Dead path references in inline code spans.

use super::{Issue, IssueKind};
use crate::markdown::fenced_lines;
use once_cell::sync::Lazy;
use regex::Regex;
use std::path::Path;

static INLINE_CODE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"`([^`\n]+)`").expect("static regex"));

const NON_PATH_CHARS: &[char] = &[
    '*', '?', '<', '>', '{', '}', '$', '(', ')', '[', ']', '=', '|', '"', '\'', ',', ';', '@',
];

/// Whether an inline-code token should be treated as a file system path.
pub fn looks_like_path(token: &str) -> bool {
    token.contains('/')
        && !token.contains("://")
        && !token.starts_with("//")
        && !token.starts_with('~')
        && !token.chars().any(char::is_whitespace)
        && !token.contains(NON_PATH_CHARS)
        && token.chars().any(|c| c.is_alphanumeric())
}

/// Report every path-like inline-code token in `content` that does not exist
/// under `project_root`. Fenced code blocks are skipped.
pub fn find_dead_paths(file: &str, content: &str, project_root: &Path) -> Vec<Issue> {
    let fenced = fenced_lines(content);
    let mut issues = Vec::new();

    for (idx, line) in content.lines().enumerate() {
        if fenced.get(idx).copied().unwrap_or(false) {
            continue;
        }
        for caps in INLINE_CODE.captures_iter(line) {
            let token = caps[1].trim();
            if !looks_like_path(token) {
                continue;
            }
            let relative = token.trim_start_matches("./");
            if project_root.join(relative).exists() {
                continue;
            }
            issues.push(Issue {
                kind: IssueKind::DeadPath,
                file: file.to_string(),
                line: Some(idx + 1),
                path: Some(token.to_string()),
                rule: None,
                message: format!("references '{token}' (not found)"),
            });
        }
    }
    issues
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn path_shapes() {
        assert!(looks_like_path("src/main.rs"));
        assert!(looks_like_path("./docs/"));
        assert!(!looks_like_path("main.rs"));
        assert!(!looks_like_path("https://example.com/x"));
        assert!(!looks_like_path("src/**/*.rs"));
        assert!(!looks_like_path("and / or"));
        assert!(!looks_like_path("{dir}/file"));
        assert!(!looks_like_path("/"));
    }

    #[test]
    fn reports_missing_paths_with_line_numbers() {
        let tmp = TempDir::new().expect("tmp");
        fs::create_dir_all(tmp.path().join("src")).expect("mkdir");
        fs::write(tmp.path().join("src/main.rs"), "fn main() {}").expect("write");

        let content =
            "# Architecture\n\nEntry point `src/main.rs`.\nHandlers live in `src/handlers/`.\n";
        let issues = find_dead_paths("ARCHITECTURE.md", content, tmp.path());
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].line, Some(4));
        assert_eq!(issues[0].path.as_deref(), Some("src/handlers/"));
        assert_eq!(issues[0].kind, IssueKind::DeadPath);
    }

    #[test]
    fn fenced_blocks_are_ignored() {
        let tmp = TempDir::new().expect("tmp");
        let content = "```\n`missing/file.rs`\n```\n";
        let issues = find_dead_paths("CONVENTIONS.md", content, tmp.path());
        assert!(issues.is_empty());
    }
}
