//! JSONL conversation transcripts rendered as Markdown.
//!
//! Each line is one JSON object. Only `user` and `assistant` entries are
//! rendered; lines that fail to decode are skipped.

use crate::utils::read_text;
use anyhow::Result;
use chrono::DateTime;
use serde::Deserialize;
use serde_json::Value;
use std::path::Path;

const TOOL_INPUT_MAX: usize = 100;
const TOOL_RESULT_MAX: usize = 500;

#[derive(Debug, Deserialize)]
pub struct TranscriptEntry {
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub message: Option<Message>,
    #[serde(default)]
    pub timestamp: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct Message {
    #[serde(default)]
    pub role: String,
    #[serde(default)]
    pub content: MessageContent,
}

#[derive(Debug, Default, Deserialize)]
#[serde(untagged)]
pub enum MessageContent {
    Text(String),
    Blocks(Vec<ContentBlock>),
    #[default]
    Empty,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ContentBlock {
    Text {
        #[serde(default)]
        text: String,
    },
    Thinking {
        #[serde(default)]
        thinking: String,
    },
    ToolUse {
        #[serde(default)]
        name: String,
        #[serde(default)]
        input: Value,
    },
    ToolResult {
        #[serde(default)]
        content: Value,
    },
    #[serde(other)]
    Unknown,
}

impl TranscriptEntry {
    pub fn is_message(&self) -> bool {
        self.kind == "user" || self.kind == "assistant"
    }

    /// Plain text carried by the entry: strings, text blocks and thinking blocks.
    pub fn texts(&self) -> Vec<&str> {
        match self.message.as_ref().map(|m| &m.content) {
            Some(MessageContent::Text(text)) => vec![text.as_str()],
            Some(MessageContent::Blocks(blocks)) => blocks
                .iter()
                .filter_map(|b| match b {
                    ContentBlock::Text { text } => Some(text.as_str()),
                    ContentBlock::Thinking { thinking } => Some(thinking.as_str()),
                    _ => None,
                })
                .collect(),
            _ => Vec::new(),
        }
    }
}

/// Decode every well-formed line of a JSONL transcript.
pub fn parse_entries(content: &str) -> Vec<TranscriptEntry> {
    content
        .lines()
        .filter(|l| !l.trim().is_empty())
        .filter_map(|l| match serde_json::from_str::<TranscriptEntry>(l) {
            Ok(entry) => Some(entry),
            Err(e) => {
                tracing::debug!("skipping transcript line: {e}");
                None
            }
        })
        .collect()
}

/// Read the transcript at `path` and render it.
pub fn render_transcript(path: &Path) -> Result<String> {
    let content = read_text(path)?;
    let source = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    Ok(render_entries(&source, &parse_entries(&content)))
}

pub fn render_entries(source: &str, entries: &[TranscriptEntry]) -> String {
    let mut out = format!(
        "# Conversation Transcript\n\n**Source**: {source}\n\n---\n\n"
    );
    let mut count = 0;
    for entry in entries.iter().filter(|e| e.is_message()) {
        count += 1;
        let formatted = format_entry(entry);
        if !formatted.is_empty() {
            out.push_str(&formatted);
            out.push_str("\n---\n\n");
        }
    }
    out.push_str(&format!("*Total messages: {count}*\n"));
    out
}

fn format_entry(entry: &TranscriptEntry) -> String {
    let Some(message) = &entry.message else {
        return String::new();
    };
    let role = if message.role.is_empty() {
        &entry.kind
    } else {
        &message.role
    };
    let mut out = format!("## {}\n\n", capitalize(role));

    let timestamp = entry
        .timestamp
        .as_deref()
        .and_then(|t| DateTime::parse_from_rfc3339(t).ok());
    if let Some(ts) = timestamp {
        out.push_str(&format!("*{}*\n\n", ts.format("%Y-%m-%d %H:%M:%S")));
    }

    match &message.content {
        MessageContent::Text(text) => {
            out.push_str(text);
            out.push('\n');
        }
        MessageContent::Blocks(blocks) => {
            for block in blocks {
                format_block(block, &mut out);
            }
        }
        MessageContent::Empty => {}
    }
    out
}

fn format_block(block: &ContentBlock, out: &mut String) {
    match block {
        ContentBlock::Text { text } => {
            out.push_str(text);
            out.push('\n');
        }
        ContentBlock::Thinking { thinking } => {
            out.push_str("<details>\n<summary>💭 Thinking</summary>\n\n");
            out.push_str(thinking);
            out.push_str("\n</details>\n\n");
        }
        ContentBlock::ToolUse { name, input } => {
            out.push_str(&format!("**🔧 Tool: {name}**\n"));
            if let Value::Object(fields) = input {
                for (key, value) in fields {
                    let rendered = match value {
                        Value::String(s) => s.clone(),
                        other => other.to_string(),
                    };
                    let shown = clip(&rendered, TOOL_INPUT_MAX, "...");
                    out.push_str(&format!("- {key}: `{shown}`\n"));
                }
            }
            out.push('\n');
        }
        ContentBlock::ToolResult { content } => {
            out.push_str("**📋 Tool Result**\n");
            if let Some(result) = tool_result_text(content) {
                let shown = clip(&result, TOOL_RESULT_MAX, "...(truncated)");
                out.push_str(&format!("```\n{shown}\n```\n\n"));
            }
        }
        ContentBlock::Unknown => {}
    }
}

fn tool_result_text(content: &Value) -> Option<String> {
    match content {
        Value::String(s) => Some(s.clone()),
        Value::Array(parts) => {
            let texts: Vec<&str> = parts
                .iter()
                .filter_map(|p| p.get("text").and_then(Value::as_str))
                .collect();
            (!texts.is_empty()).then(|| texts.join("\n"))
        }
        _ => None,
    }
}

/// First `max` characters of `text`, followed by `suffix` when cut.
fn clip(text: &str, max: usize, suffix: &str) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let mut out: String = text.chars().take(max).collect();
    out.push_str(suffix);
    out
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
