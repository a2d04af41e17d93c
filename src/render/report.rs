//! JSON documents for `drift --json` and `status --json`.

use crate::context::ContextSnapshot;
use crate::drift::Report;
use anyhow::Result;
use chrono::{DateTime, SecondsFormat, Utc};
use serde_json::{json, Map, Value};

use super::text::content_preview;

const JSON_PREVIEW_LINES: usize = 5;

pub fn drift_json(report: &Report, now: DateTime<Utc>) -> Result<String> {
    let mut doc = Map::new();
    doc.insert(
        "timestamp".to_string(),
        Value::String(now.to_rfc3339_opts(SecondsFormat::Secs, true)),
    );
    doc.insert(
        "status".to_string(),
        Value::String(report.status().as_str().to_string()),
    );
    doc.insert(
        "warnings".to_string(),
        serde_json::to_value(&report.warnings)?,
    );
    doc.insert(
        "violations".to_string(),
        serde_json::to_value(&report.violations)?,
    );
    doc.insert("passed".to_string(), serde_json::to_value(&report.passed)?);
    Ok(serde_json::to_string_pretty(&Value::Object(doc))?)
}

/// Status document; `preview` adds the first lines of every non-empty file.
pub fn status_json(snapshot: &ContextSnapshot, context_dir: &str, preview: bool) -> Result<String> {
    let files = snapshot
        .files
        .iter()
        .map(|f| {
            let mut entry = json!({
                "name": f.name,
                "tokens": f.tokens,
                "size": f.size,
                "is_empty": f.is_empty,
                "summary": f.summary,
                "mod_time": f.modified.to_rfc3339_opts(SecondsFormat::Secs, false),
            });
            if preview && !f.is_empty {
                entry["preview"] = json!(content_preview(&f.content, JSON_PREVIEW_LINES));
            }
            entry
        })
        .collect::<Vec<_>>();

    let doc = json!({
        "context_dir": context_dir,
        "total_files": snapshot.files.len(),
        "total_tokens": snapshot.total_tokens,
        "total_size": snapshot.total_size,
        "files": files,
    });
    Ok(serde_json::to_string_pretty(&doc)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::load_context;
    use crate::drift::{Issue, IssueKind};
    use chrono::TimeZone;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn drift_document_shape() {
        let report = Report {
            warnings: vec![Issue {
                kind: IssueKind::MissingFile,
                file: "DECISIONS.md".to_string(),
                line: None,
                path: None,
                rule: None,
                message: "required context file is missing".to_string(),
            }],
            violations: Vec::new(),
            passed: vec!["path_references".to_string()],
        };
        let now = Utc
            .with_ymd_and_hms(2026, 1, 15, 9, 30, 0)
            .single()
            .expect("time");
        let value: Value =
            serde_json::from_str(&drift_json(&report, now).expect("json")).expect("parse");
        assert_eq!(value["timestamp"], "2026-01-15T09:30:00Z");
        assert_eq!(value["status"], "warning");
        assert_eq!(value["warnings"][0]["type"], "missing_file");
        assert_eq!(value["violations"], json!([]));
        assert_eq!(value["passed"], json!(["path_references"]));
    }

    #[test]
    fn status_document_lists_files() {
        let tmp = TempDir::new().expect("tmp");
        fs::write(
            tmp.path().join("TASKS.md"),
            "# Tasks\n\n- [ ] a\n- [x] b\n",
        )
        .expect("write");
        fs::write(tmp.path().join("DECISIONS.md"), "# Decisions\n").expect("write");
        let snapshot = load_context(tmp.path()).expect("load");

        let json = status_json(&snapshot, ".context", true).expect("json");
        let value: Value = serde_json::from_str(&json).expect("parse");
        assert_eq!(value["context_dir"], ".context");
        assert_eq!(value["total_files"], 2);
        let files = value["files"].as_array().expect("files");
        assert_eq!(files[0]["name"], "DECISIONS.md");
        assert_eq!(files[0]["is_empty"], true);
        assert!(files[0].get("preview").is_none());
        assert_eq!(files[1]["summary"], "1 active, 1 completed");
        assert_eq!(
            files[1]["preview"],
            json!(["# Tasks", "- [ ] a", "- [x] b"])
        );
    }
}
