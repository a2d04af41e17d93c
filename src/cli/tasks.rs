//! Tasks subcommands

use anyhow::Result;
use chrono::Local;
use clap::{Args, Subcommand};
use console::style;

use crate::tasks::{archive_completed, snapshot_tasks};
use crate::workspace::Workspace;

#[derive(Subcommand)]
pub enum TasksCommand {
    /// Move completed tasks to archive/tasks-YYYY-MM-DD.md
    Archive(ArchiveArgs),

    /// Save a point-in-time copy of TASKS.md
    Snapshot(SnapshotArgs),
}

#[derive(Args)]
pub struct ArchiveArgs {
    /// Preview what would be archived without writing
    #[arg(long)]
    pub dry_run: bool,
}

#[derive(Args)]
pub struct SnapshotArgs {
    /// Snapshot name (defaults to "snapshot")
    #[arg(value_name = "NAME")]
    pub name: Option<String>,
}

pub fn run(cmd: TasksCommand, ws: &Workspace) -> Result<()> {
    match cmd {
        TasksCommand::Archive(args) => archive(args, ws),
        TasksCommand::Snapshot(args) => {
            let path = snapshot_tasks(ws, args.name.as_deref(), Local::now())?;
            println!(
                "{} Snapshot saved to {}",
                style("✓").green(),
                path.display()
            );
            Ok(())
        }
    }
}

fn archive(args: ArchiveArgs, ws: &Workspace) -> Result<()> {
    let outcome = archive_completed(ws, Local::now(), args.dry_run)?;
    let stats = &outcome.separation;

    if stats.completed == 0 {
        println!("No completed tasks to archive.");
        return Ok(());
    }

    match &outcome.archive_path {
        Some(path) => {
            println!(
                "{} Archived {} completed tasks to {}",
                style("✓").green(),
                stats.completed,
                path.display()
            );
            println!("  {} pending tasks remain in TASKS.md", stats.pending);
        }
        None => {
            println!("{}", style("Dry run - no files modified").yellow());
            println!();
            println!(
                "Would archive {} completed tasks (keeping {} pending)",
                stats.completed, stats.pending
            );
            println!();
            println!("Archived content preview:");
            println!("---");
            println!("{}", stats.archived);
            println!("---");
        }
    }
    Ok(())
}
