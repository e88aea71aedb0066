//! Destination URL composition

use std::borrow::Cow;

/// Prepends `http://` unless the base already carries an http(s) scheme.
pub fn with_protocol(base: &str) -> Cow<'_, str> {
    let lower = base.get(..8).unwrap_or(base).to_ascii_lowercase();
    if lower.starts_with("http://") || lower.starts_with("https://") {
        Cow::Borrowed(base)
    } else {
        Cow::Owned(format!("http://{base}"))
    }
}

/// `base` (protocol-defaulted) + `search` verbatim + `query` percent-encoded.
pub fn build_url(base: &str, search: &str, query: &str) -> String {
    let mut url = with_protocol(base).into_owned();
    url.push_str(search);
    url.push_str(&urlencoding::encode(query));
    url
}

/// Like [`build_url`], with the words joined by single spaces before encoding.
pub fn build_url_words<S: AsRef<str>>(base: &str, search: &str, words: &[S]) -> String {
    let query = words
        .iter()
        .map(AsRef::as_ref)
        .collect::<Vec<_>>()
        .join(" ");
    build_url(base, search, &query)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_protocol_defaulting() {
        assert_eq!(build_url("example.com", "", ""), "http://example.com");
        assert_eq!(build_url("http://example.com", "", ""), "http://example.com");
        assert_eq!(build_url("https://example.com", "", ""), "https://example.com");
        assert_eq!(build_url("HTTPS://example.com", "", ""), "HTTPS://example.com");
        assert_eq!(build_url("", "", ""), "http://");
    }

    #[test]
    fn test_query_is_encoded_search_is_not() {
        assert_eq!(
            build_url("https://example.com", "/s?q=", "a b"),
            "https://example.com/s?q=a%20b"
        );
        assert_eq!(
            build_url("https://example.com", "/s?q=", "c++ & rust"),
            "https://example.com/s?q=c%2B%2B%20%26%20rust"
        );
    }

    #[test]
    fn test_words_join_with_single_space() {
        let words = vec!["foo bar".to_string(), "baz".to_string()];
        assert_eq!(
            build_url_words("https://duckduckgo.com", "/?q=", &words),
            "https://duckduckgo.com/?q=foo%20bar%20baz"
        );
        let none: [&str; 0] = [];
        assert_eq!(build_url_words("example.com", "/?q=", &none), "http://example.com/?q=");
    }
}
