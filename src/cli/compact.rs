//! Compact command implementation

use anyhow::Result;
use chrono::Local;
use clap::Args;
use console::style;

use crate::compact::compact_context;
use crate::context::load_context;
use crate::session::build::save_pre_compact;
use crate::utils::text::truncate_chars;
use crate::workspace::Workspace;

#[derive(Args)]
pub struct CompactArgs {
    /// Move completed tasks to the dated archive instead of "## Completed"
    #[arg(long)]
    pub archive: bool,

    /// Skip the pre-compact session snapshot
    #[arg(long)]
    pub no_auto_save: bool,
}

pub fn run(args: CompactArgs, ws: &Workspace) -> Result<()> {
    ws.require_initialized()?;
    let now = Local::now();

    if !args.no_auto_save {
        match save_pre_compact(ws, now) {
            Ok(path) => println!(
                "{} Auto-saved pre-compact snapshot to {}\n",
                style("✓").green(),
                path.display()
            ),
            Err(e) => {
                tracing::warn!("pre-compact snapshot failed: {e:#}");
                println!(
                    "{} Auto-save failed: {e:#} (continuing anyway)",
                    style("⚠").yellow()
                );
            }
        }
    }

    let snapshot = load_context(&ws.context_dir)?;

    println!("{}", style("Compact Analysis").cyan());
    println!("{}", style("================").cyan());
    println!();

    let report = compact_context(ws, &snapshot, args.archive, now)?;
    for task in &report.moved_tasks {
        println!(
            "{} Moving completed task: {}",
            style("✓").green(),
            truncate_chars(task.trim(), 50, "...")
        );
    }
    if let Some(path) = &report.archive_path {
        println!(
            "{} Archived {} tasks to {}",
            style("✓").green(),
            report.moved_tasks.len(),
            path.display()
        );
    }
    for (file, removed) in &report.cleaned {
        println!(
            "{} Removed {} empty sections from {}",
            style("✓").green(),
            removed,
            file
        );
    }

    match report.changes() {
        0 => println!(
            "{} Nothing to compact - context is already clean",
            style("✓").green()
        ),
        n => println!("\n{} Compacted {} items", style("✓").green(), n),
    }
    Ok(())
}
