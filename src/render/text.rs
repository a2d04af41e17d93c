//! Console renderings for `status` and `drift`.

use crate::context::ContextSnapshot;
use crate::drift::{
    IssueKind, Report, Status, CHECK_CONSTITUTION, CHECK_PATH_REFERENCES, CHECK_REQUIRED_FILES,
    CHECK_STALENESS,
};
use crate::utils::text::{format_bytes, format_number, truncate_display};
use crate::utils::time::format_time_ago;
use chrono::{DateTime, Local};
use console::style;

const PREVIEW_WIDTH: usize = 60;
const TEXT_PREVIEW_LINES: usize = 3;
const RECENT_FILES: usize = 3;

/// First `n` meaningful lines of `content`.
///
/// Blank lines, a leading `---` frontmatter block, other `---` rules and HTML
/// comment lines are skipped; long lines are cut to the preview width.
pub fn content_preview(content: &str, n: usize) -> Vec<String> {
    let mut preview = Vec::new();
    let mut seen_text = false;
    let mut in_frontmatter = false;

    for line in content.lines() {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        if trimmed == "---" {
            if !seen_text {
                in_frontmatter = !in_frontmatter;
            }
            continue;
        }
        if in_frontmatter || trimmed.starts_with("<!--") {
            continue;
        }
        seen_text = true;
        preview.push(truncate_display(trimmed, PREVIEW_WIDTH));
        if preview.len() >= n {
            break;
        }
    }
    preview
}

pub fn status_text(
    snapshot: &ContextSnapshot,
    context_dir: &str,
    preview: bool,
    now: DateTime<Local>,
) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "{}\n{}\n\n",
        style("Context Status").cyan(),
        style("====================").cyan()
    ));
    out.push_str(&format!("Context Directory: {context_dir}\n"));
    out.push_str(&format!("Total Files: {}\n", snapshot.files.len()));
    out.push_str(&format!(
        "Token Estimate: {} tokens\n\n",
        format_number(snapshot.total_tokens)
    ));

    out.push_str("Files:\n");
    for f in snapshot.in_priority_order() {
        let (indicator, summary) = if f.is_empty {
            (
                style("○").yellow().to_string(),
                style("empty").yellow().to_string(),
            )
        } else {
            (style("✓").green().to_string(), f.summary.clone())
        };
        if !preview {
            out.push_str(&format!("  {indicator} {} ({summary})\n", f.name));
            continue;
        }
        out.push_str(&format!(
            "  {indicator} {} ({summary}) [{} tokens, {}]\n",
            f.name,
            format_number(f.tokens),
            format_bytes(f.size)
        ));
        if !f.is_empty {
            for line in content_preview(&f.content, TEXT_PREVIEW_LINES) {
                out.push_str(&format!("      {}\n", style(line).dim()));
            }
        }
    }

    out.push_str("\nRecent Activity:\n");
    for f in snapshot.recent(RECENT_FILES) {
        out.push_str(&format!(
            "  - {} modified {}\n",
            f.name,
            format_time_ago(f.modified, now)
        ));
    }
    out
}

/// Human label for a drift check name.
pub fn check_label(name: &str) -> &str {
    match name {
        CHECK_PATH_REFERENCES => "Path references are valid",
        CHECK_STALENESS => "No staleness indicators",
        CHECK_CONSTITUTION => "Constitution rules respected",
        CHECK_REQUIRED_FILES => "All required files present",
        other => other,
    }
}

pub fn drift_text(report: &Report) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "{}\n{}\n\n",
        style("Drift Detection Report").cyan(),
        style("======================").cyan()
    ));

    if !report.violations.is_empty() {
        out.push_str(&format!(
            "{} VIOLATIONS ({})\n\n",
            style("❌").red(),
            report.violations.len()
        ));
        for v in &report.violations {
            match v.line {
                Some(line) => out.push_str(&format!("  - {}:{} {}", v.file, line, v.message)),
                None => out.push_str(&format!("  - {}: {}", v.file, v.message)),
            }
            if let Some(rule) = &v.rule {
                out.push_str(&format!(" (rule: {rule})"));
            }
            out.push('\n');
        }
        out.push('\n');
    }

    if !report.warnings.is_empty() {
        out.push_str(&format!(
            "{} WARNINGS ({})\n\n",
            style("⚠️ ").yellow(),
            report.warnings.len()
        ));
        let of_kind = |kind: IssueKind| {
            report
                .warnings
                .iter()
                .filter(move |w| w.kind == kind)
        };

        let paths: Vec<_> = of_kind(IssueKind::DeadPath).collect();
        if !paths.is_empty() {
            out.push_str("  Path References:\n");
            for w in paths {
                out.push_str(&format!(
                    "  - {}:{} references '{}' (not found)\n",
                    w.file,
                    w.line.unwrap_or(0),
                    w.path.as_deref().unwrap_or("")
                ));
            }
            out.push('\n');
        }

        let stale: Vec<_> = of_kind(IssueKind::Staleness).collect();
        if !stale.is_empty() {
            out.push_str("  Staleness:\n");
            for w in stale {
                out.push_str(&format!("  - {} {}\n", w.file, w.message));
            }
            out.push('\n');
        }

        let other: Vec<_> = report
            .warnings
            .iter()
            .filter(|w| !matches!(w.kind, IssueKind::DeadPath | IssueKind::Staleness))
            .collect();
        if !other.is_empty() {
            out.push_str("  Other:\n");
            for w in other {
                out.push_str(&format!("  - {}: {}\n", w.file, w.message));
            }
            out.push('\n');
        }
    }

    if !report.passed.is_empty() {
        out.push_str(&format!(
            "{} PASSED ({})\n",
            style("✅").green(),
            report.passed.len()
        ));
        for p in &report.passed {
            out.push_str(&format!("  - {}\n", check_label(p)));
        }
        out.push('\n');
    }

    let status_line = match report.status() {
        Status::Violation => format!(
            "{} - Constitution violations detected",
            style("VIOLATION").red()
        ),
        Status::Warning => format!(
            "{} - Issues detected that should be addressed",
            style("WARNING").yellow()
        ),
        Status::Ok => format!("{} - No drift detected", style("OK").green()),
    };
    out.push_str(&format!("\nStatus: {status_line}\n"));
    out
}
