//! Complete command implementation

use anyhow::Result;
use clap::Args;
use console::style;

use crate::tasks::complete_task;
use crate::workspace::Workspace;

#[derive(Args)]
pub struct CompleteArgs {
    /// Task number (as listed among pending tasks) or part of its text
    #[arg(value_name = "TASK", required = true)]
    pub query: Vec<String>,
}

pub fn run(args: CompleteArgs, ws: &Workspace) -> Result<()> {
    let text = complete_task(ws, &args.query.join(" "))?;
    println!("{} Completed: {}", style("✓").green(), text);
    Ok(())
}
