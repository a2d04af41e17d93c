//! Init command implementation

use anyhow::Result;
use clap::Args;
use console::style;
use dialoguer::{theme::ColorfulTheme, Confirm};
use std::io::IsTerminal;

use crate::domain::DIR_TEMPLATES;
use crate::templates::{write_entry_templates, write_templates, TemplateWrite};
use crate::workspace::Workspace;

#[derive(Args)]
pub struct InitArgs {
    /// Overwrite existing context files
    #[arg(short, long)]
    pub force: bool,

    /// Only create essential files (CONSTITUTION.md, TASKS.md, DECISIONS.md)
    #[arg(short, long)]
    pub minimal: bool,
}

pub fn run(args: InitArgs, ws: &Workspace) -> Result<()> {
    let dir = ws.display_context_dir();

    if ws.is_initialized() && !args.force && std::io::stdin().is_terminal() {
        let proceed = Confirm::with_theme(&ColorfulTheme::default())
            .with_prompt(format!(
                "{dir} already exists. Continue? Existing files are kept"
            ))
            .default(false)
            .interact()?;
        if !proceed {
            println!("Aborted.");
            return Ok(());
        }
    }

    let outcome = write_templates(&ws.context_dir, args.minimal, args.force)?;
    print_outcome(&outcome, "");

    println!("\n{} initialized in {}/", style("Context").green(), dir);

    // Entry templates are a convenience; failing to write them does not fail init.
    match write_entry_templates(&ws.templates_dir(), args.force) {
        Ok(outcome) => print_outcome(&outcome, &format!("{DIR_TEMPLATES}/")),
        Err(e) => println!("  {} Entry templates: {e:#}", style("⚠").yellow()),
    }

    println!("\nNext steps:");
    println!("  1. Edit {dir}/TASKS.md to add your current tasks");
    println!("  2. Run 'ctx status' to see context summary");
    println!("  3. Run 'ctx agent' to get an AI-ready context packet");
    Ok(())
}

fn print_outcome(outcome: &[TemplateWrite], prefix: &str) {
    for write in outcome {
        match write {
            TemplateWrite::Created(name) => println!("  {} {prefix}{name}", style("✓").green()),
            TemplateWrite::Skipped(name) => println!(
                "  {} {prefix}{name} (exists, skipped)",
                style("○").yellow()
            ),
        }
    }
}
