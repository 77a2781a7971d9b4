pub mod authors;
pub mod identifiers;
pub mod text_processing;
pub mod title;

pub use authors::extract_author;
pub use identifiers::extract_year;
pub use text_processing::normalize_single_line;
pub use title::extract_title;
// Re-export domain types from core (canonical definitions live there)
pub use biblioscan_core::{BibliographyRecord, ExtractedText};

/// Pattern-based title/author/year detection.
///
/// Stateless: the same input always yields the same record.
#[derive(Debug, Clone, Copy, Default)]
pub struct BibliographyExtractor;

impl BibliographyExtractor {
    pub fn new() -> Self {
        Self
    }

    /// Extract a [`BibliographyRecord`] from acquired text.
    ///
    /// Pipeline:
    /// 1. Collapse the text onto one line
    /// 2. Author: first `by <Name, Name>` run
    /// 3. Year: first standalone four-digit number
    /// 4. Title: first typographically quoted span
    ///
    /// Each rule runs independently; a missing field never blocks the others.
    pub fn extract(&self, text: &ExtractedText) -> BibliographyRecord {
        extract_bibliography(text.as_str())
    }
}

/// Extract a [`BibliographyRecord`] from raw text.
pub fn extract_bibliography(text: &str) -> BibliographyRecord {
    let line = normalize_single_line(text);

    let author = extract_author(&line);
    let year = extract_year(&line);
    let title = extract_title(&line);

    tracing::debug!(
        chars = line.len(),
        has_title = !title.is_empty(),
        has_author = !author.is_empty(),
        has_year = !year.is_empty(),
        "bibliography fields extracted"
    );

    BibliographyRecord {
        title,
        author,
        year,
    }
}
