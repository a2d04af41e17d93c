//! Loop command implementation

use anyhow::Result;
use clap::Args;
use console::style;
use std::path::PathBuf;

use crate::loop_script::{write_loop_script, LoopOptions, LoopTool};
use crate::workspace::Workspace;

#[derive(Args)]
pub struct LoopArgs {
    /// Prompt file fed to the tool on every iteration
    #[arg(short, long, default_value = "PROMPT.md")]
    pub prompt: String,

    /// AI tool to run
    #[arg(short, long, value_enum, default_value = "claude")]
    pub tool: LoopTool,

    /// Stop after this many iterations (0 for unlimited)
    #[arg(short = 'n', long, default_value_t = 0)]
    pub max_iterations: usize,

    /// Text that signals the work is finished
    #[arg(short, long, default_value = "SYSTEM_CONVERGED")]
    pub completion: String,

    /// Script to write, relative to the project root
    #[arg(short, long, default_value = "loop.sh")]
    pub output: PathBuf,
}

pub fn run(args: LoopArgs, ws: &Workspace) -> Result<()> {
    let options = LoopOptions {
        prompt_file: args.prompt,
        tool: args.tool,
        max_iterations: args.max_iterations,
        completion_signal: args.completion,
    };
    let path = ws.project_root.join(&args.output);
    write_loop_script(&path, &options)?;

    println!("{} Generated {}", style("✓").green(), args.output.display());
    println!();
    println!("To start the loop:");
    println!("  ./{}", args.output.display());
    println!();
    println!("Tool: {}", options.tool.as_str());
    println!("Prompt: {}", options.prompt_file);
    match options.max_iterations {
        0 => println!("Max iterations: unlimited"),
        n => println!("Max iterations: {n}"),
    }
    println!("Completion signal: {}", options.completion_signal);
    Ok(())
}
