//! Integration instructions for AI coding tools. Text only; nothing is written.

use clap::ValueEnum;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum HookTool {
    ClaudeCode,
    Cursor,
    Aider,
    Copilot,
    Windsurf,
}

impl HookTool {
    pub fn display_name(self) -> &'static str {
        match self {
            Self::ClaudeCode => "Claude Code",
            Self::Cursor => "Cursor IDE",
            Self::Aider => "Aider",
            Self::Copilot => "GitHub Copilot",
            Self::Windsurf => "Windsurf IDE",
        }
    }
}

const LOAD_STEP: &str =
    "Load the agent packet at the start of every session:\n\n  ctx agent --budget 4000";

/// Setup instructions for `tool`.
pub fn instructions(tool: HookTool) -> String {
    let body = match tool {
        HookTool::ClaudeCode => format!(
            "{LOAD_STEP}\n\n\
             Reference the context directory from CLAUDE.md:\n\n\
             \x20 Read .context/AGENT_PLAYBOOK.md before starting work.\n\n\
             Pipe a session through watch to apply <context-update> tags:\n\n\
             \x20 claude --print \"...\" | ctx watch --auto-save"
        ),
        HookTool::Cursor => format!(
            "{LOAD_STEP}\n\n\
             Add to .cursorrules:\n\n\
             \x20 Always read .context/CONSTITUTION.md, .context/TASKS.md and\n\
             \x20 .context/CONVENTIONS.md before making changes.\n\
             \x20 Record decisions with `ctx add decision`."
        ),
        HookTool::Aider => format!(
            "{LOAD_STEP}\n\n\
             Add to .aider.conf.yml:\n\n\
             \x20 read:\n\
             \x20   - .context/CONSTITUTION.md\n\
             \x20   - .context/TASKS.md\n\
             \x20   - .context/CONVENTIONS.md\n\
             \x20   - .context/ARCHITECTURE.md"
        ),
        HookTool::Copilot => format!(
            "{LOAD_STEP}\n\n\
             Add to .github/copilot-instructions.md:\n\n\
             \x20 This project keeps its working memory in .context/.\n\
             \x20 Follow .context/CONSTITUTION.md and .context/CONVENTIONS.md.\n\
             \x20 Check .context/TASKS.md for the current work item."
        ),
        HookTool::Windsurf => format!(
            "{LOAD_STEP}\n\n\
             Add to .windsurfrules:\n\n\
             \x20 Read .context/ in priority order: CONSTITUTION, TASKS,\n\
             \x20 CONVENTIONS, ARCHITECTURE, DECISIONS, LEARNINGS."
        ),
    };
    let title = format!("{} Integration", tool.display_name());
    let rule = "=".repeat(title.len());
    format!("{title}\n{rule}\n\n{body}\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_tool_has_instructions() {
        for tool in HookTool::value_variants() {
            let text = instructions(*tool);
            assert!(text.starts_with(tool.display_name()));
            assert!(text.contains("ctx agent --budget 4000"));
        }
    }

    #[test]
    fn cli_names_are_kebab_case() {
        let names: Vec<String> = HookTool::value_variants()
            .iter()
            .filter_map(|t| t.to_possible_value().map(|v| v.get_name().to_string()))
            .collect();
        assert_eq!(
            names,
            vec!["claude-code", "cursor", "aider", "copilot", "windsurf"]
        );
    }

    #[test]
    fn underline_matches_title() {
        let text = instructions(HookTool::Cursor);
        let mut lines = text.lines();
        let title = lines.next().unwrap_or_default();
        assert_eq!(lines.next().unwrap_or_default().len(), title.len());
    }
}
