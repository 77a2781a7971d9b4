use once_cell::sync::Lazy;
use regex::Regex;

static YEAR_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b(\d{4})\b").unwrap());

/// Extract the first standalone run of exactly four digits.
///
/// Not anchored to any publication context: page numbers, counts and other
/// incidental four-digit numbers match too. Returns an empty string when
/// there is no such run.
pub fn extract_year(text: &str) -> String {
    YEAR_RE
        .captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
        .unwrap_or_default()
}
