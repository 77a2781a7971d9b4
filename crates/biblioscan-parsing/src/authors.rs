use once_cell::sync::Lazy;
use regex::Regex;

/// `by`, optional whitespace, then a run that starts with a letter and
/// continues through ASCII letters, whitespace and commas. Case-insensitive,
/// so the leading `[A-Z]` also accepts lowercase letters.
static AUTHOR_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)by\s*([A-Z][a-zA-Z\s,]+)").unwrap());

/// Extract the author run following the first `by` in single-line text.
///
/// Only the first match is considered, even when `by` sits inside a longer
/// word. Characters outside the class (periods, digits, hyphens) end the run,
/// so `by Jane A. Doe` yields `Jane A`. The run needs at least two characters,
/// so a lone initial such as `by J. Smith` yields nothing. Returns an empty
/// string when nothing matches.
pub fn extract_author(text: &str) -> String {
    AUTHOR_RE
        .captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim().to_string())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn simple_author() {
        assert_eq!(
            extract_author("A Study by John Smith, 2001 titled"),
            "John Smith,"
        );
    }

    #[test]
    fn multiple_authors_with_commas() {
        assert_eq!(
            extract_author("Written by Alice Brown, Bob Green, Carol White 1999"),
            "Alice Brown, Bob Green, Carol White"
        );
    }

    #[test]
    fn period_ends_the_run() {
        assert_eq!(extract_author("Notes by J. Smith"), "");
        assert_eq!(extract_author("by Jane A. Doe, 2010"), "Jane A");
    }

    #[test]
    fn case_insensitive_keyword_and_initial() {
        assert_eq!(extract_author("BY MARY SHELLEY"), "MARY SHELLEY");
        assert_eq!(extract_author("by mary shelley"), "mary shelley");
    }

    #[test]
    fn no_space_after_keyword() {
        assert_eq!(extract_author("byLovelace"), "Lovelace");
    }

    #[test]
    fn first_match_even_inside_word() {
        // "Ruby" contains "by"; the first match wins.
        assert_eq!(
            extract_author("Ruby programming by Ann Lee"),
            "programming by Ann Lee"
        );
    }

    #[test]
    fn digit_after_keyword_is_not_an_author() {
        assert_eq!(extract_author("increased by 50 percent"), "");
    }

    #[test]
    fn no_match_is_empty() {
        assert_eq!(extract_author("An anonymous pamphlet, 1851"), "");
        assert_eq!(extract_author(""), "");
    }
}
