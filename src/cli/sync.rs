//! Sync command implementation

use anyhow::Result;
use clap::Args;
use console::style;

use crate::context::load_context;
use crate::sync::detect_sync_actions;
use crate::workspace::Workspace;

#[derive(Args)]
pub struct SyncArgs {
    /// Only report what would be updated
    #[arg(long)]
    pub dry_run: bool,
}

pub fn run(args: SyncArgs, ws: &Workspace) -> Result<()> {
    ws.require_initialized()?;
    let snapshot = load_context(&ws.context_dir)?;
    let actions = detect_sync_actions(&ws.project_root, &snapshot)?;

    if actions.is_empty() {
        println!("{} Context is in sync with codebase", style("✓").green());
        return Ok(());
    }

    println!("{}", style("Sync Analysis").cyan());
    println!("{}", style("=============").cyan());
    println!();
    if args.dry_run {
        println!("{}", style("DRY RUN - No changes will be made").yellow());
        println!();
    }

    for (i, action) in actions.iter().enumerate() {
        println!("{}. [{}] {}", i + 1, action.kind, action.description);
        println!("   Suggestion: {}", action.suggestion);
        println!();
    }

    if args.dry_run {
        println!(
            "Found {} items to sync. Run without --dry-run to apply suggestions.",
            actions.len()
        );
    } else {
        println!(
            "Found {} items. Review and update context files manually.",
            actions.len()
        );
    }
    Ok(())
}
