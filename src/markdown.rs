//! Line-oriented model of a Markdown context file.
//!
//! Every mutation of a context file (splicing entries, completing tasks,
//! moving sections) goes through [`Document`] so that splitting and joining
//! happen in exactly one place. Splitting on `\n` and joining with `\n` keeps
//! a trailing newline intact because it becomes a final empty line.

use once_cell::sync::Lazy;
use regex::Regex;

static HTML_COMMENT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)<!--.*?-->").expect("static regex"));

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    lines: Vec<String>,
}

impl Document {
    pub fn parse(content: &str) -> Self {
        Self {
            lines: content.split('\n').map(str::to_string).collect(),
        }
    }

    pub fn from_lines(lines: Vec<String>) -> Self {
        Self { lines }
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.iter().all(|l| l.is_empty())
    }

    /// Index of the first line that is exactly `header` (ignoring trailing whitespace).
    pub fn find_header(&self, header: &str) -> Option<usize> {
        self.lines.iter().position(|l| l.trim_end() == header)
    }

    /// Index of the next heading line of level ≤ `level` after `from`.
    pub fn next_heading(&self, from: usize, level: usize) -> Option<usize> {
        self.lines
            .iter()
            .enumerate()
            .skip(from + 1)
            .find(|(_, l)| heading_level(l).is_some_and(|lvl| lvl <= level))
            .map(|(i, _)| i)
    }

    pub fn set(&mut self, idx: usize, line: String) {
        if let Some(slot) = self.lines.get_mut(idx) {
            *slot = line;
        }
    }

    pub fn insert(&mut self, idx: usize, new_lines: Vec<String>) {
        let idx = idx.min(self.lines.len());
        self.lines.splice(idx..idx, new_lines);
    }

    pub fn render(&self) -> String {
        self.lines.join("\n")
    }
}

/// Heading level of `line` (`## Foo` → 2), `None` when it is not a heading.
pub fn heading_level(line: &str) -> Option<usize> {
    let hashes = line.chars().take_while(|c| *c == '#').count();
    if hashes == 0 || hashes > 6 {
        return None;
    }
    match line[hashes..].chars().next() {
        None => Some(hashes),
        Some(c) if c == ' ' || c == '\t' => Some(hashes),
        _ => None,
    }
}

pub fn is_heading(line: &str) -> bool {
    heading_level(line.trim_start()).is_some()
}

/// True when `content` has nothing besides blank lines, headings, HTML
/// comments and `---` rules.
pub fn is_effectively_empty(content: &str) -> bool {
    let mut in_comment = false;
    for line in content.lines() {
        let t = line.trim();
        if in_comment {
            if t.contains("-->") {
                in_comment = false;
            }
            continue;
        }
        if t.is_empty() || t == "---" || is_heading(t) {
            continue;
        }
        if t.starts_with("<!--") {
            in_comment = !t.contains("-->");
            continue;
        }
        return false;
    }
    true
}

/// `content` with every `<!-- ... -->` block removed.
pub fn strip_comments(content: &str) -> String {
    HTML_COMMENT.replace_all(content, "").into_owned()
}

/// Per-line flags marking fenced code blocks, fence lines included.
pub fn fenced_lines(content: &str) -> Vec<bool> {
    let mut inside = false;
    content
        .lines()
        .map(|line| {
            let t = line.trim_start();
            if t.starts_with("```") || t.starts_with("~~~") {
                inside = !inside;
                true
            } else {
                inside
            }
        })
        .collect()
}
