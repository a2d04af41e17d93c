//! Watch command implementation

use anyhow::{Context, Result};
use clap::Args;
use console::style;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::PathBuf;

use crate::watch::{process_stream, WatchEvent, WatchOptions};
use crate::workspace::Workspace;

#[derive(Args)]
pub struct WatchArgs {
    /// Read AI output from this file instead of stdin
    #[arg(long, value_name = "FILE")]
    pub log: Option<PathBuf>,

    /// Show updates without applying them
    #[arg(long)]
    pub dry_run: bool,

    /// Save a session file periodically and when the stream ends
    #[arg(long)]
    pub auto_save: bool,
}

pub fn run(args: WatchArgs, ws: &Workspace) -> Result<()> {
    ws.require_initialized()?;
    let options = WatchOptions {
        dry_run: args.dry_run,
        auto_save: args.auto_save,
        auto_save_interval: ws.config.watch_auto_save_interval,
    };

    let reader: Box<dyn BufRead> = match &args.log {
        Some(path) => {
            let file = File::open(path)
                .with_context(|| format!("Failed to open log file: {}", path.display()))?;
            Box::new(BufReader::new(file))
        }
        None => Box::new(std::io::stdin().lock()),
    };

    println!("{}", style("Watching for context updates...").cyan());
    if args.dry_run {
        println!("{}", style("DRY RUN - No changes will be made").yellow());
    }
    println!();

    let applied = process_stream(ws, reader, options, print_event)?;
    tracing::debug!("watch finished with {applied} applied updates");
    Ok(())
}

fn print_event(event: WatchEvent<'_>) {
    match event {
        WatchEvent::WouldApply(u) => println!(
            "{} Would apply: [{}] {}",
            style("○").yellow(),
            u.kind,
            u.content
        ),
        WatchEvent::Applied(u) => println!(
            "{} Applied: [{}] {}",
            style("✓").green(),
            u.kind,
            u.content
        ),
        WatchEvent::Failed(u, e) => {
            println!("{} Failed to apply [{}]: {e:#}", style("✗").red(), u.kind)
        }
        WatchEvent::AutoSaved { updates, .. } => {
            println!("📸 Auto-saved session after {updates} updates")
        }
        WatchEvent::AutoSaveFailed(e) => {
            println!("{} Auto-save failed: {e:#}", style("⚠").yellow())
        }
        WatchEvent::FinalSave { updates, result: Ok(_) } => {
            println!("📸 Final auto-save completed ({updates} total updates)")
        }
        WatchEvent::FinalSave { result: Err(e), .. } => {
            println!("{} Final auto-save failed: {e:#}", style("⚠").yellow())
        }
    }
}
