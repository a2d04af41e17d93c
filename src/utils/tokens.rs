//! Token estimation

/// Estimate tokens using a simple heuristic (chars / 4, rounded up).
///
/// Counts Unicode code points rather than bytes, so multi-byte content
/// (CJK text, emoji) is not over-counted. Any non-empty text costs at least
/// one token.
pub fn estimate_tokens(text: &str) -> usize {
    text.chars().count().div_ceil(4)
}

#[cfg(test)]
mod tests {
    use super::estimate_tokens;

    #[test]
    fn counts_code_points_not_bytes() {
        assert_eq!(estimate_tokens(""), 0);
        assert_eq!(estimate_tokens("ok"), 1);
        assert_eq!(estimate_tokens("abcd"), 1);
        assert_eq!(estimate_tokens("abcde"), 2);
        assert_eq!(estimate_tokens("日本語テキスト"), 2);
        assert_eq!(estimate_tokens(&"x".repeat(4000)), 1000);
    }

    #[test]
    fn longer_text_never_estimates_fewer_tokens() {
        let short = "- [ ] task";
        let long = format!("{short} with more words");
        assert!(estimate_tokens(&long) >= estimate_tokens(short));
    }
}
