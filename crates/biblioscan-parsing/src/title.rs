use once_cell::sync::Lazy;
use regex::Regex;

/// English typographic double quotes, “…” (U+201C/U+201D).
static QUOTED_TITLE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\u{201c}([^\u{201d}]+)\u{201d}").unwrap());

/// Extract the text inside the first pair of typographic double quotes.
///
/// Only the “…” pair is recognized; straight ASCII quotes and low-high „…“
/// quotes are not. Returns an empty string when no quoted span is found.
pub fn extract_title(text: &str) -> String {
    QUOTED_TITLE_RE
        .captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim().to_string())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn curly_quotes() {
        assert_eq!(
            extract_title("A Study by John Smith, 2001 titled “Systems Design”"),
            "Systems Design"
        );
    }

    #[test]
    fn low_high_quotes_are_not_a_pair() {
        assert_eq!(extract_title("Aufsatz „Die Verwandlung“ 1915"), "");
    }

    #[test]
    fn mixed_quote_styles_match_from_first_left_quote() {
        // The closing mark of „A“ is U+201C, which opens the only real pair.
        assert_eq!(extract_title("„A“ and “B”"), "and “B");
    }

    #[test]
    fn first_quoted_span_wins() {
        assert_eq!(extract_title("“First” and then “Second”"), "First");
    }

    #[test]
    fn inner_whitespace_trimmed() {
        assert_eq!(extract_title("“  Padded Title ”"), "Padded Title");
    }

    #[test]
    fn straight_quotes_ignored() {
        assert_eq!(extract_title("an essay \"Plain Quotes\" here"), "");
    }

    #[test]
    fn unclosed_quote_is_empty() {
        assert_eq!(extract_title("“Never closed"), "");
        assert_eq!(extract_title(""), "");
    }
}
