//! Low-level string scanning for route patterns and incoming URIs.
//!
//! Two operations live here: splitting a pattern/URI into its next segment
//! (the text up to and including the path separator) and extracting a
//! parameter value out of a segment given the node's literal prefix and
//! suffix. Both return borrowed subslices of the input.

/// The path separator. A parameter value never spans one.
pub const PATH_SEPARATOR: char = '/';

/// Result of extracting one parameter value from the head of a URI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedUriParam<'a> {
    /// The value with prefix and suffix stripped
    pub value: &'a str,
    /// Unconsumed remainder of the URI, after the separator if one was hit
    pub rest: &'a str,
}

/// Split off the next segment of `s`.
///
/// The head includes the separator when one is present, so `"catalog/books"`
/// splits into `("catalog/", "books")` and a separator-free tail like
/// `"books"` splits into `("books", "")`.
pub fn split_by_separator(s: &str) -> (&str, &str) {
    match s.find(PATH_SEPARATOR) {
        Some(i) => (&s[..=i], &s[i + 1..]),
        None => (s, ""),
    }
}

/// Extract a parameter value from the head of `uri`.
///
/// The URI must start with `prefix` (otherwise `None`). Scanning then treats
/// each character as part of the value while tracking tentative progress
/// through `suffix`; a mismatch flushes that progress back into the value
/// and resets it. Scanning stops after a path separator or at end of input,
/// and the suffix must be fully matched at that point.
///
/// With an empty suffix the separator, when present, is part of the value;
/// intermediate trie nodes carry the separator as their suffix, so this only
/// shows up for terminal segments where no input follows anyway.
pub fn extract_uri_param<'a>(
    uri: &'a str,
    prefix: &str,
    suffix: &str,
) -> Option<ExtractedUriParam<'a>> {
    if !uri.starts_with(prefix) {
        return None;
    }
    let body = &uri[prefix.len()..];
    let suffix_chars: Vec<char> = suffix.chars().collect();

    // Tentatively matched suffix progress; flushed into the value on mismatch.
    let mut matched = 0usize;
    let mut matched_bytes = 0usize;
    let mut consumed = 0usize;

    for ch in body.chars() {
        if matched < suffix_chars.len() && ch == suffix_chars[matched] {
            matched += 1;
            matched_bytes += ch.len_utf8();
        } else {
            matched = 0;
            matched_bytes = 0;
        }
        consumed += ch.len_utf8();
        if ch == PATH_SEPARATOR {
            break;
        }
    }

    if matched != suffix_chars.len() {
        return None;
    }

    Some(ExtractedUriParam {
        value: &body[..consumed - matched_bytes],
        rest: &body[consumed..],
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_keeps_separator_in_head() {
        let (head, tail) = split_by_separator("catalog/category/books");
        assert_eq!(head, "catalog/");
        assert_eq!(tail, "category/books");
    }

    #[test]
    fn split_without_separator_returns_whole_head() {
        let (head, tail) = split_by_separator("books");
        assert_eq!(head, "books");
        assert_eq!(tail, "");
    }

    #[test]
    fn split_leading_separator() {
        let (head, tail) = split_by_separator("/catalog");
        assert_eq!(head, "/");
        assert_eq!(tail, "catalog");
    }

    #[test]
    fn extract_without_affixes_consumes_through_separator() {
        let res = extract_uri_param("catalog/category/books", "", "").unwrap();
        assert_eq!(res.value, "catalog/");
        assert_eq!(res.rest, "category/books");
    }

    #[test]
    fn extract_with_prefix_and_separator_suffix() {
        let res = extract_uri_param("isbn-1234/info", "isbn-", "/").unwrap();
        assert_eq!(res.value, "1234");
        assert_eq!(res.rest, "info");
    }

    #[test]
    fn extract_fails_when_uri_shorter_than_prefix() {
        assert_eq!(extract_uri_param("isp", "isbn-", "/"), None);
    }

    #[test]
    fn extract_fails_when_suffix_not_fully_matched() {
        assert_eq!(extract_uri_param("isbn-1234/info", "isbn-", "-book/"), None);
    }

    #[test]
    fn extract_terminal_segment_without_separator() {
        let res = extract_uri_param("order-12345.html", "order-", ".html").unwrap();
        assert_eq!(res.value, "12345");
        assert_eq!(res.rest, "");
    }

    #[test]
    fn suffix_progress_does_not_reseed_after_flush() {
        // "aab" ends with "ab" but the scanner flushes at the second 'a'
        // without re-testing it as a fresh suffix start.
        assert_eq!(extract_uri_param("aab", "", "ab"), None);
    }

    #[test]
    fn extract_empty_input_with_empty_affixes() {
        let res = extract_uri_param("", "", "").unwrap();
        assert_eq!(res.value, "");
        assert_eq!(res.rest, "");
    }
}
