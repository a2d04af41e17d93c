//! Status command implementation

use anyhow::Result;
use chrono::Local;
use clap::Args;

use crate::context::load_context;
use crate::render::{status_json, status_text};
use crate::workspace::Workspace;

#[derive(Args)]
pub struct StatusArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,

    /// Show token counts, sizes and the first lines of each file
    #[arg(short, long)]
    pub preview: bool,
}

pub fn run(args: StatusArgs, ws: &Workspace) -> Result<()> {
    ws.require_initialized()?;
    let snapshot = load_context(&ws.context_dir)?;
    let dir = ws.display_context_dir();

    if args.json {
        println!("{}", status_json(&snapshot, &dir, args.preview)?);
    } else {
        let text = status_text(&snapshot, &dir, args.preview, Local::now());
        print!("{text}");
    }
    Ok(())
}
