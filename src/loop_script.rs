//! Shell script that re-runs an AI tool on a prompt until it signals completion.

use anyhow::{Context, Result};
use clap::ValueEnum;
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LoopTool {
    Claude,
    Aider,
    Generic,
}

impl LoopTool {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Claude => "claude",
            Self::Aider => "aider",
            Self::Generic => "generic",
        }
    }

    /// Shell command that runs one iteration with the prompt in `$PROMPT_FILE`.
    fn command(self) -> &'static str {
        match self {
            Self::Claude => r#"claude --print "$(cat "$PROMPT_FILE")""#,
            Self::Aider => r#"aider --yes --message-file "$PROMPT_FILE""#,
            Self::Generic => {
                r#"${AI_COMMAND:?set AI_COMMAND to your assistant command} < "$PROMPT_FILE""#
            }
        }
    }
}

#[derive(Debug, Clone)]
pub struct LoopOptions {
    pub prompt_file: String,
    pub tool: LoopTool,
    /// 0 means unlimited.
    pub max_iterations: usize,
    pub completion_signal: String,
}

pub fn generate_loop_script(options: &LoopOptions) -> String {
    format!(
        r#"#!/usr/bin/env bash
# Generated by ctx loop. Re-runs {tool} on {prompt} until "{signal}" appears.
set -euo pipefail

PROMPT_FILE={prompt_q}
COMPLETION_SIGNAL={signal_q}
MAX_ITERATIONS={max}
OUTPUT_LOG=".context/loop.log"

if [ ! -f "$PROMPT_FILE" ]; then
  echo "Prompt file not found: $PROMPT_FILE" >&2
  exit 1
fi

mkdir -p "$(dirname "$OUTPUT_LOG")"
iteration=0

while true; do
  iteration=$((iteration + 1))
  if [ "$MAX_ITERATIONS" -gt 0 ] && [ "$iteration" -gt "$MAX_ITERATIONS" ]; then
    echo "Reached max iterations ($MAX_ITERATIONS)"
    exit 0
  fi

  echo "=== Iteration $iteration ==="
  output=$({command} 2>&1 | tee -a "$OUTPUT_LOG") || true

  if printf '%s' "$output" | grep -q "$COMPLETION_SIGNAL"; then
    echo "Completion signal detected after $iteration iteration(s)"
    exit 0
  fi

  sleep 1
done
"#,
        tool = options.tool.as_str(),
        prompt = options.prompt_file,
        signal = options.completion_signal,
        prompt_q = shell_quote(&options.prompt_file),
        signal_q = shell_quote(&options.completion_signal),
        max = options.max_iterations,
        command = options.tool.command(),
    )
}

/// Write the script to `path` and mark it executable.
pub fn write_loop_script(path: &Path, options: &LoopOptions) -> Result<()> {
    fs::write(path, generate_loop_script(options))
        .with_context(|| format!("Failed to write {}", path.display()))?;
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(path, fs::Permissions::from_mode(0o755))
            .with_context(|| format!("Failed to make {} executable", path.display()))?;
    }
    Ok(())
}

fn shell_quote(s: &str) -> String {
    format!("'{}'", s.replace('\'', r"'\''"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn options(tool: LoopTool) -> LoopOptions {
        LoopOptions {
            prompt_file: "PROMPT.md".to_string(),
            tool,
            max_iterations: 0,
            completion_signal: "SYSTEM_CONVERGED".to_string(),
        }
    }

    #[test]
    fn script_embeds_tool_and_settings() {
        let script = generate_loop_script(&LoopOptions {
            max_iterations: 10,
            ..options(LoopTool::Aider)
        });
        assert!(script.starts_with("#!/usr/bin/env bash\n"));
        assert!(script.contains("PROMPT_FILE='PROMPT.md'\n"));
        assert!(script.contains("COMPLETION_SIGNAL='SYSTEM_CONVERGED'\n"));
        assert!(script.contains("MAX_ITERATIONS=10\n"));
        assert!(script.contains("aider --yes --message-file"));
    }

    #[test]
    fn quotes_awkward_values() {
        assert_eq!(shell_quote("it's done"), r"'it'\''s done'");
    }

    #[cfg(unix)]
    #[test]
    fn written_script_is_executable() {
        use std::os::unix::fs::PermissionsExt;
        let tmp = TempDir::new().expect("tmp");
        let path = tmp.path().join("loop.sh");
        write_loop_script(&path, &options(LoopTool::Generic)).expect("write");
        let mode = fs::metadata(&path).expect("meta").permissions().mode();
        assert_eq!(mode & 0o777, 0o755);
    }
}
