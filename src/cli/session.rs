//! Session subcommands

use anyhow::{Context, Result};
use chrono::Local;
use clap::{Args, Subcommand};
use console::style;
use std::fs;
use std::path::PathBuf;

use crate::session::parse::read_session_info;
use crate::session::{
    extract_insights, find_session, list_session_files, render_transcript, save_session,
};
use crate::utils::read_text;
use crate::utils::text::truncate_chars;
use crate::utils::time::parse_entry_timestamp;
use crate::workspace::Workspace;

#[derive(Subcommand)]
pub enum SessionCommand {
    /// Save a snapshot of the current context as a session file
    Save(SaveArgs),

    /// List saved sessions, newest first
    List(ListArgs),

    /// Print a saved session
    Load(LoadArgs),

    /// Convert a JSONL transcript to Markdown
    Parse(ParseArgs),
}

#[derive(Args)]
pub struct SaveArgs {
    /// Session topic, used in the file name
    #[arg(value_name = "TOPIC")]
    pub topic: Vec<String>,

    /// Session type (feature, bugfix, refactor, session, ...)
    #[arg(short = 't', long = "type", default_value = "session")]
    pub kind: String,

    /// Session start time (YYYY-MM-DD-HHMM)
    #[arg(long, env = "CTX_SESSION_START", value_name = "STAMP")]
    pub start: Option<String>,
}

#[derive(Args)]
pub struct ListArgs {
    /// Maximum number of sessions to show (defaults to the configured limit)
    #[arg(short = 'n', long)]
    pub limit: Option<usize>,
}

#[derive(Args)]
pub struct LoadArgs {
    /// 1-based index from `session list`, a file name, or part of one
    #[arg(value_name = "QUERY")]
    pub query: String,
}

#[derive(Args)]
pub struct ParseArgs {
    /// JSONL transcript to read
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Write the Markdown to this file instead of stdout
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Extract potential decisions and learnings instead of converting
    #[arg(long)]
    pub extract: bool,
}

pub fn run(cmd: SessionCommand, ws: &Workspace) -> Result<()> {
    match cmd {
        SessionCommand::Save(args) => save(args, ws),
        SessionCommand::List(args) => list(args, ws),
        SessionCommand::Load(args) => load(args, ws),
        SessionCommand::Parse(args) => parse(args),
    }
}

fn save(args: SaveArgs, ws: &Workspace) -> Result<()> {
    ws.require_initialized()?;
    let topic = match args.topic.join(" ") {
        t if t.trim().is_empty() => "manual-save".to_string(),
        t => t,
    };
    let start = args.start.as_deref().and_then(|s| {
        let parsed = parse_entry_timestamp(s);
        if parsed.is_none() {
            tracing::warn!("ignoring unparseable session start {s:?}");
        }
        parsed
    });

    let path = save_session(ws, &topic, &args.kind, start, Local::now())?;
    println!("{} Session saved to {}", style("✓").green(), path.display());
    Ok(())
}

fn list(args: ListArgs, ws: &Workspace) -> Result<()> {
    let names = list_session_files(ws)?;
    if names.is_empty() {
        println!("No sessions found. Use 'ctx session save' to create one.");
        return Ok(());
    }

    let limit = args.limit.unwrap_or(ws.config.session_list_limit);
    let dir = ws.sessions_dir();
    println!("Sessions in {}:", dir.display());
    println!();

    let shown: Vec<_> = if limit == 0 {
        names.iter().collect()
    } else {
        names.iter().take(limit).collect()
    };
    for name in &shown {
        let info = match read_session_info(&dir.join(name.as_str())) {
            Ok(info) => info,
            Err(e) => {
                tracing::debug!("skipping unreadable session {name}: {e:#}");
                continue;
            }
        };
        let topic = if info.topic.is_empty() {
            name.as_str()
        } else {
            info.topic.as_str()
        };
        println!("{} {}", style("●").cyan(), topic);
        println!("  Date: {} | Type: {}", info.date, info.kind);
        if !info.summary.is_empty() {
            println!("  Summary: {}", truncate_chars(&info.summary, 60, "..."));
        }
        println!("  File: {name}");
        println!();
    }
    println!("Total: {} session(s)", names.len());
    Ok(())
}

fn load(args: LoadArgs, ws: &Workspace) -> Result<()> {
    let path = find_session(ws, &args.query)?;
    let content = read_text(&path)?;
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    println!("{} Loading: {}", style("●").cyan(), name);
    println!();
    print!("{content}");
    Ok(())
}

fn parse(args: ParseArgs) -> Result<()> {
    if args.extract {
        let insights = extract_insights(&args.file)?;
        let source = args
            .file
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        println!("# Extracted Insights");
        println!();
        println!("**Source**: {source}");
        println!();
        print_list(
            "Potential Decisions",
            &insights.decisions,
            "No decisions detected.",
        );
        print_list(
            "Potential Learnings",
            &insights.learnings,
            "No learnings detected.",
        );
        println!(
            "\n*Found {} potential decisions and {} potential learnings*",
            insights.decisions.len(),
            insights.learnings.len()
        );
        return Ok(());
    }

    let markdown = render_transcript(&args.file)?;
    match args.output {
        Some(out) => {
            fs::write(&out, markdown)
                .with_context(|| format!("Failed to write {}", out.display()))?;
            println!(
                "{} Parsed transcript saved to {}",
                style("✓").green(),
                out.display()
            );
        }
        None => print!("{markdown}"),
    }
    Ok(())
}

fn print_list(title: &str, items: &[String], empty: &str) {
    println!("## {title}");
    println!();
    if items.is_empty() {
        println!("{empty}");
    } else {
        for item in items {
            println!("- {item}");
        }
    }
    println!();
}
