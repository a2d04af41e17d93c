//! High-entropy token heuristic for secret detection

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashMap;

pub const ENTROPY_THRESHOLD: f64 = 4.5;
pub const ENTROPY_MIN_LEN: usize = 32;

static CANDIDATE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(r"[A-Za-z0-9+=_\-]{{{ENTROPY_MIN_LEN},}}")).expect("static regex")
});

/// Shapes that look random but are not secrets.
static SAFE_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    vec![
        // UUID
        Regex::new(r"(?i)^[0-9a-f]{8}-[0-9a-f]{4}-[0-9a-f]{4}-[0-9a-f]{4}-[0-9a-f]{12}$")
            .expect("static regex"),
        // git SHA-1, MD5, SHA-256
        Regex::new(r"(?i)^[0-9a-f]{40}$").expect("static regex"),
        Regex::new(r"(?i)^[0-9a-f]{32}$").expect("static regex"),
        Regex::new(r"(?i)^[0-9a-f]{64}$").expect("static regex"),
    ]
});

/// Shannon entropy in bits per character.
pub fn calculate_entropy(s: &str) -> f64 {
    if s.is_empty() {
        return 0.0;
    }

    let mut counts: HashMap<char, usize> = HashMap::new();
    for ch in s.chars() {
        *counts.entry(ch).or_insert(0) += 1;
    }

    let len = s.chars().count() as f64;
    counts
        .values()
        .map(|count| {
            let p = *count as f64 / len;
            -(p * p.log2())
        })
        .sum()
}

fn mixes_character_classes(s: &str) -> bool {
    s.chars().any(|c| c.is_ascii_uppercase())
        && s.chars().any(|c| c.is_ascii_lowercase())
        && s.chars().any(|c| c.is_ascii_digit())
}

fn is_safe_value(s: &str) -> bool {
    SAFE_PATTERNS.iter().any(|p| p.is_match(s))
}

/// First token in `line` that looks like a random credential.
pub fn find_high_entropy_token(line: &str) -> Option<&str> {
    CANDIDATE.find_iter(line).map(|m| m.as_str()).find(|token| {
        mixes_character_classes(token)
            && !is_safe_value(token)
            && calculate_entropy(token) >= ENTROPY_THRESHOLD
    })
}
