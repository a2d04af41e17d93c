//! Load command implementation

use anyhow::Result;
use clap::Args;

use crate::context::load_context;
use crate::render::{assemble_packet, render_raw};
use crate::workspace::Workspace;

#[derive(Args)]
pub struct LoadArgs {
    /// Token budget for the packet (defaults to the configured budget)
    #[arg(short, long, value_name = "TOKENS")]
    pub budget: Option<usize>,

    /// Print files verbatim without headers or budgeting
    #[arg(long)]
    pub raw: bool,
}

pub fn run(args: LoadArgs, ws: &Workspace) -> Result<()> {
    ws.require_initialized()?;
    let snapshot = load_context(&ws.context_dir)?;

    if args.raw {
        print!("{}", render_raw(&snapshot));
        return Ok(());
    }

    let budget = args.budget.unwrap_or(ws.config.token_budget);
    let packet = assemble_packet(&snapshot, budget);
    tracing::debug!(
        "packet: {} files, {} of {} tokens",
        packet.included.len(),
        packet.tokens_used,
        budget
    );
    print!("{}", packet.text);
    Ok(())
}
