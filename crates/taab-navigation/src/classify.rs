//! URL-shaped token detection
//!
//! A cheap heuristic, not RFC validation: anything containing a
//! `domain.tld` run (TLD of 2-6 lowercase letters) and no space counts.

use regex::Regex;
use std::sync::OnceLock;

const URL_PATTERN: &str =
    r"(https?://.)?(www\.)?[-a-zA-Z0-9@:%._+~#=]{2,256}\.[a-z]{2,6}\b([-a-zA-Z0-9@:%_+.~#?&/=]*)";

fn url_regex() -> &'static Regex {
    static URL_REGEX: OnceLock<Regex> = OnceLock::new();
    URL_REGEX.get_or_init(|| Regex::new(URL_PATTERN).expect("URL pattern compiles"))
}

/// Returns true when `token` looks like a destination rather than a word.
pub fn is_url(token: &str) -> bool {
    !token.contains(' ') && url_regex().is_match(token)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_domains_with_and_without_scheme() {
        assert!(is_url("example.com"));
        assert!(is_url("www.example.com"));
        assert!(is_url("http://example.com"));
        assert!(is_url("https://news.ycombinator.com/item?id=1"));
        assert!(is_url("github.com/rust-lang/rust"));
        assert!(is_url("localhost.dev:8080/path"));
    }

    #[test]
    fn test_rejects_words_and_phrases() {
        assert!(!is_url("rust"));
        assert!(!is_url("g"));
        assert!(!is_url(""));
        // dotted token inside a search phrase
        assert!(!is_url("what is example.com"));
        // TLD too long / numeric
        assert!(!is_url("version.1234"));
        assert!(!is_url("file.abcdefgh1"));
    }

    #[test]
    fn test_tld_must_be_lowercase() {
        assert!(!is_url("EXAMPLE.COM"));
        assert!(is_url("EXAMPLE.com"));
    }
}
