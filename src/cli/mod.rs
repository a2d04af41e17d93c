//! Command-line interface for ctx
//!
//! One module per subcommand. Every handler receives the resolved
//! [`Workspace`] instead of reading global flag state.

use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use std::path::PathBuf;
use tracing::Level;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::workspace::Workspace;

mod add;
mod agent;
mod compact;
mod complete;
mod drift;
mod hook;
mod init;
mod load;
mod loop_cmd;
mod session;
mod status;
mod sync;
mod tasks;
mod watch;

/// Persistent project context for AI coding assistants
#[derive(Parser)]
#[command(name = "ctx")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Project root (defaults to the current directory)
    #[arg(long, global = true, value_name = "DIR")]
    project_dir: Option<PathBuf>,

    /// Config file (overrides .ctxrc.toml discovery)
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Enable verbose logging (sets log level to DEBUG)
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Create the context directory with template files
    Init(init::InitArgs),

    /// Show a summary of every context file
    Status(status::StatusArgs),

    /// Append a task, decision, learning or convention
    Add(add::AddArgs),

    /// Mark a task as done by number or text
    Complete(complete::CompleteArgs),

    /// Move completed tasks and drop empty sections
    Compact(compact::CompactArgs),

    /// Check context files for stale or broken content
    Drift(drift::DriftArgs),

    /// Print integration instructions for an AI tool
    Hook(hook::HookArgs),

    /// Print the context packet for an AI prompt
    Load(load::LoadArgs),

    /// Print a concise, token-budgeted packet for an AI agent
    Agent(agent::AgentArgs),

    /// Generate a shell script that loops an AI tool until done
    Loop(loop_cmd::LoopArgs),

    /// Save, list, load and parse sessions
    #[command(subcommand)]
    Session(session::SessionCommand),

    /// Compare context files with the codebase
    Sync(sync::SyncArgs),

    /// Archive or snapshot TASKS.md
    #[command(subcommand)]
    Tasks(tasks::TasksCommand),

    /// Apply <context-update> tags from AI output
    Watch(watch::WatchArgs),

    /// Generate shell completion scripts
    Completions {
        /// Target shell
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();

    // RUST_LOG in the environment always takes precedence; --verbose falls back to DEBUG.
    let filter = if cli.verbose {
        EnvFilter::from_default_env().add_directive(Level::DEBUG.into())
    } else {
        EnvFilter::from_default_env().add_directive(Level::WARN.into())
    };
    let _ = tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .try_init();

    if let Commands::Completions { shell } = cli.command {
        clap_complete::generate(shell, &mut Cli::command(), "ctx", &mut std::io::stdout());
        return Ok(());
    }

    let ws = Workspace::resolve(cli.project_dir.as_deref(), cli.config.as_deref())?;
    tracing::debug!("context directory: {}", ws.context_dir.display());

    match cli.command {
        Commands::Init(args) => init::run(args, &ws),
        Commands::Status(args) => status::run(args, &ws),
        Commands::Add(args) => add::run(args, &ws),
        Commands::Complete(args) => complete::run(args, &ws),
        Commands::Compact(args) => compact::run(args, &ws),
        Commands::Drift(args) => drift::run(args, &ws),
        Commands::Hook(args) => hook::run(args),
        Commands::Load(args) => load::run(args, &ws),
        Commands::Agent(args) => agent::run(args, &ws),
        Commands::Loop(args) => loop_cmd::run(args, &ws),
        Commands::Session(cmd) => session::run(cmd, &ws),
        Commands::Sync(args) => sync::run(args, &ws),
        Commands::Tasks(cmd) => tasks::run(cmd, &ws),
        Commands::Watch(args) => watch::run(args, &ws),
        Commands::Completions { .. } => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn command_tree_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn global_flags_parse_after_subcommand() {
        let cli = Cli::try_parse_from(["ctx", "status", "--project-dir", "/tmp/p", "-v"])
            .expect("parse");
        assert!(cli.verbose);
        assert_eq!(cli.project_dir, Some(PathBuf::from("/tmp/p")));
    }

    #[test]
    fn agent_format_parses_as_value_enum() {
        let cli = Cli::try_parse_from(["ctx", "agent", "--budget", "4000", "--format", "json"])
            .expect("parse");
        match cli.command {
            Commands::Agent(args) => {
                assert_eq!(args.budget, Some(4000));
                assert_eq!(args.format, agent::AgentFormat::Json);
            }
            _ => panic!("expected agent command"),
        }
        let yaml = Cli::try_parse_from(["ctx", "agent", "--format", "yaml"]);
        assert!(yaml.is_err());
    }
}
