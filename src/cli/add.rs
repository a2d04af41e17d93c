//! Add command implementation

use anyhow::{Context, Result};
use chrono::Local;
use clap::Args;
use console::style;
use std::io::{IsTerminal, Read};
use std::path::PathBuf;

use crate::entry::{add_entry, Entry, EntryKind};
use crate::markdown::strip_comments;
use crate::utils::read_text;
use crate::workspace::Workspace;

#[derive(Args)]
pub struct AddArgs {
    /// Entry type: task, decision, learning or convention
    #[arg(value_name = "TYPE")]
    pub kind: String,

    /// Entry text (read from --file or stdin when omitted)
    #[arg(value_name = "CONTENT")]
    pub content: Vec<String>,

    /// Task priority (high, medium, low)
    #[arg(short, long)]
    pub priority: Option<String>,

    /// Target section for tasks (default "## Next Up")
    #[arg(short, long)]
    pub section: Option<String>,

    /// Read content from a file
    #[arg(short, long, value_name = "FILE")]
    pub file: Option<PathBuf>,

    /// Decision or learning context
    #[arg(short, long)]
    pub context: Option<String>,

    /// Why the decision was made
    #[arg(short, long)]
    pub rationale: Option<String>,

    /// What changes because of the decision
    #[arg(long)]
    pub consequences: Option<String>,

    /// Lesson learned
    #[arg(short, long)]
    pub lesson: Option<String>,

    /// How to apply the learning
    #[arg(short, long)]
    pub application: Option<String>,
}

pub fn run(args: AddArgs, ws: &Workspace) -> Result<()> {
    let kind: EntryKind = args.kind.parse()?;
    let content = read_content(args.file.as_deref(), &args.content)?;

    let entry = Entry::new(kind, content)
        .with_priority(args.priority)
        .with_section(args.section);
    let entry = match kind {
        EntryKind::Decision => {
            entry.with_decision_fields(args.context, args.rationale, args.consequences)
        }
        EntryKind::Learning => {
            entry.with_learning_fields(args.context, args.lesson, args.application)
        }
        _ => entry,
    };

    add_entry(ws, &entry, Local::now().naive_local())?;
    println!("{} Added to {}", style("✓").green(), kind.file_name());
    Ok(())
}

/// Content precedence: file, then positional words, then piped stdin.
///
/// Comment blocks in a file are dropped, so entry templates can carry usage notes.
fn read_content(file: Option<&std::path::Path>, words: &[String]) -> Result<String> {
    if let Some(path) = file {
        return Ok(strip_comments(&read_text(path)?).trim().to_string());
    }
    if !words.is_empty() {
        return Ok(words.join(" "));
    }
    let stdin = std::io::stdin();
    if stdin.is_terminal() {
        return Ok(String::new());
    }
    let mut buf = String::new();
    stdin
        .lock()
        .read_to_string(&mut buf)
        .context("Failed to read stdin")?;
    Ok(buf.trim().to_string())
}
