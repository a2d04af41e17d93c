//! Agent command implementation

use anyhow::Result;
use chrono::Local;
use clap::{Args, ValueEnum};

use crate::context::load_context;
use crate::render::{agent_json, agent_markdown, build_agent_packet};
use crate::workspace::Workspace;

#[derive(Args)]
pub struct AgentArgs {
    /// Token budget for the packet (defaults to the configured budget)
    #[arg(short, long, value_name = "TOKENS")]
    pub budget: Option<usize>,

    /// Output format
    #[arg(long, value_enum, default_value_t = AgentFormat::Markdown)]
    pub format: AgentFormat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum AgentFormat {
    Markdown,
    Json,
}

pub fn run(args: AgentArgs, ws: &Workspace) -> Result<()> {
    ws.require_initialized()?;
    let snapshot = load_context(&ws.context_dir)?;
    let budget = args.budget.unwrap_or(ws.config.token_budget);

    let packet = build_agent_packet(&snapshot, &ws.display_context_dir(), budget, Local::now());
    tracing::debug!(
        "agent packet: {} of {} tokens, truncated: {}",
        packet.tokens_used,
        budget,
        packet.truncated
    );

    match args.format {
        AgentFormat::Markdown => print!("{}", agent_markdown(&packet)),
        AgentFormat::Json => println!("{}", agent_json(&packet)?),
    }
    Ok(())
}
