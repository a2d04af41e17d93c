//! Secret-shaped content detection.
//!
//! Rules are checked in order and the first match on a line wins, so the
//! provider-specific patterns come before the generic keyword assignment and
//! the entropy heuristic runs last.

use super::entropy::find_high_entropy_token;
use super::{Issue, IssueKind};
use once_cell::sync::Lazy;
use regex::Regex;

pub struct SecretRule {
    pub name: &'static str,
    pub pattern: Regex,
}

fn rule(name: &'static str, pattern: &str) -> SecretRule {
    SecretRule {
        name,
        pattern: Regex::new(pattern).expect("static regex"),
    }
}

pub static SECRET_RULES: Lazy<Vec<SecretRule>> = Lazy::new(|| {
    vec![
        // ── Cloud and SaaS providers ──
        rule("aws_access_key", r"\bAKIA[0-9A-Z]{16}\b"),
        rule(
            "aws_secret_key",
            concat!(
                "(?i)aws[_\\-]?secret[_\\-]?(?:access[_\\-]?)?key",
                "['\"]?\\s*[:=]\\s*['\"]?[A-Za-z0-9/+=]{40}",
            ),
        ),
        rule("github_token", r"\bgh[pousr]_[A-Za-z0-9]{36}\b"),
        rule("gitlab_token", r"\bglpat-[A-Za-z0-9\-_]{20,}"),
        rule("slack_token", r"\bxox[baprs]-[0-9A-Za-z\-]{10,}"),
        rule(
            "slack_webhook",
            r"https://hooks\.slack\.com/services/T[A-Z0-9]+/B[A-Z0-9]+/[A-Za-z0-9]+",
        ),
        rule("stripe_key", r"\b[sr]k_(?:live|test)_[A-Za-z0-9]{24,}\b"),
        rule(
            "sendgrid_key",
            r"\bSG\.[A-Za-z0-9\-_]{22,}\.[A-Za-z0-9\-_]{22,}",
        ),
        rule("google_api_key", r"\bAIza[0-9A-Za-z\-_]{35}"),
        rule("npm_token", r"\bnpm_[A-Za-z0-9]{36}\b"),
        rule("pypi_token", r"\bpypi-[A-Za-z0-9\-_]{50,}"),
        rule("openai_key", r"\bsk-[A-Za-z0-9\-_]{20,}"),
        // ── Key material and bearer credentials ──
        rule(
            "private_key",
            r"-----BEGIN\s+(?:RSA\s+|DSA\s+|EC\s+|OPENSSH\s+|ENCRYPTED\s+)?PRIVATE\s+KEY-----",
        ),
        rule(
            "jwt_token",
            r"\beyJ[A-Za-z0-9\-_]+\.eyJ[A-Za-z0-9\-_]+\.[A-Za-z0-9\-_]+",
        ),
        rule(
            "connection_string",
            r"(?:postgres|mysql|mongodb|redis|amqp)(?:ql|\+srv)?://[^:\s/]+:[^@\s]+@",
        ),
        rule(
            "auth_header",
            r"(?i)Authorization:\s*(?:Bearer|Basic)\s+[A-Za-z0-9\-_./+=]{20,}",
        ),
        // ── Generic credential assignment ──
        rule(
            "credential_assignment",
            concat!(
                "(?i)(?:api[_\\-]?key|apikey|secret[_\\-]?key|secretkey|auth[_\\-]?token|authtoken",
                "|access[_\\-]?token|accesstoken|password|passwd|pwd|client[_\\-]?secret)",
                "['\"]?\\s*[:=]\\s*['\"]?[A-Za-z0-9\\-_./+=!@#%^&*]{8,}",
            ),
        ),
    ]
});

pub const HIGH_ENTROPY_RULE: &str = "high_entropy_string";

/// Name of the first rule matching `line`, if any.
pub fn match_line(line: &str) -> Option<&'static str> {
    SECRET_RULES
        .iter()
        .find(|r| r.pattern.is_match(line))
        .map(|r| r.name)
        .or_else(|| find_high_entropy_token(line).map(|_| HIGH_ENTROPY_RULE))
}

/// One `potential_secret` issue per matching line of `content`.
pub fn scan_secrets(file: &str, content: &str) -> Vec<Issue> {
    content
        .lines()
        .enumerate()
        .filter_map(|(idx, line)| {
            match_line(line).map(|rule| Issue {
                kind: IssueKind::PotentialSecret,
                file: file.to_string(),
                line: Some(idx + 1),
                path: None,
                rule: Some(rule.to_string()),
                message: "contains potential secret".to_string(),
            })
        })
        .collect()
}
