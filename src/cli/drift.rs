//! Drift command implementation

use anyhow::Result;
use chrono::{Local, Utc};
use clap::Args;
use console::style;

use crate::context::load_context;
use crate::drift::fix::FixStep;
use crate::drift::{apply_fixes, detect, DriftOptions, Report, Status};
use crate::error::ContextError;
use crate::render::{drift_json, drift_text};
use crate::workspace::Workspace;

#[derive(Args)]
pub struct DriftArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,

    /// Archive stale tasks and recreate missing files, then re-check
    #[arg(long)]
    pub fix: bool,
}

pub fn run(args: DriftArgs, ws: &Workspace) -> Result<()> {
    ws.require_initialized()?;
    let options = DriftOptions::from_config(ws.project_root.clone(), &ws.config);
    let mut report = check(ws, &options)?;

    if args.fix && report.has_issues() {
        println!("Applying fixes...");
        println!();
        let outcome = apply_fixes(ws, &report, Local::now());
        for step in &outcome.steps {
            match step {
                FixStep::Fixed(msg) => println!("{} {}", style("✓").green(), msg),
                FixStep::Skipped(msg) => println!("{} {}", style("○").yellow(), msg),
                FixStep::Failed(_) => {}
            }
        }

        println!();
        if outcome.fixed() > 0 {
            println!("{} Fixed {} issue(s)", style("✓").green(), outcome.fixed());
        }
        if outcome.skipped() > 0 {
            println!(
                "{} Skipped {} issue(s) (cannot auto-fix)",
                style("○").yellow(),
                outcome.skipped()
            );
        }
        for err in outcome.errors() {
            println!("{} Error: {}", style("⚠").yellow(), err);
        }

        if outcome.fixed() > 0 {
            println!();
            println!("Re-checking after fixes...");
            report = check(ws, &options)?;
        }
    }

    if args.json {
        println!("{}", drift_json(&report, Utc::now())?);
    } else {
        print!("{}", drift_text(&report));
    }

    if report.status() == Status::Violation {
        return Err(ContextError::DriftViolations.into());
    }
    Ok(())
}

fn check(ws: &Workspace, options: &DriftOptions) -> Result<Report> {
    let snapshot = load_context(&ws.context_dir)?;
    Ok(detect(&snapshot, options))
}
