//! Hook command implementation

use anyhow::Result;
use clap::Args;

use crate::hook::{instructions, HookTool};

#[derive(Args)]
pub struct HookArgs {
    /// AI tool to integrate with
    #[arg(value_enum)]
    pub tool: HookTool,
}

pub fn run(args: HookArgs) -> Result<()> {
    print!("{}", instructions(args.tool));
    Ok(())
}
