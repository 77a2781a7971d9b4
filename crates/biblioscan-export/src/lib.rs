//! Export boundary.
//!
//! The actual Word/PDF/PowerPoint/Excel/image writers live outside this
//! workspace; they plug in through [`ExportFormatter`]. This crate owns what
//! every formatter shares: the plain-text payload, format tags, MIME types
//! and the output file name.

mod types;

use std::path::{Path, PathBuf};

use thiserror::Error;

pub use biblioscan_core::BibliographyRecord;
pub use types::{ExportFormat, RenderedExport};

/// Download name used when the caller supplies none.
pub const DEFAULT_FILE_NAME: &str = "bibliography_content";

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("failed to render {format}: {message}")]
    Render {
        format: ExportFormat,
        message: String,
    },
    #[error("failed to write {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// Renders a plain-text payload into a document of the requested format.
pub trait ExportFormatter {
    fn render(&self, payload: &str, format: ExportFormat) -> Result<RenderedExport, ExportError>;
}

/// Serialize a record as the export payload.
///
/// All three labels are always present; a missing field renders as an empty
/// value after its label.
pub fn format_bibliography(record: &BibliographyRecord) -> String {
    format!(
        "Title: {}\n\nAuthor: {}\n\nYear: {}",
        record.title, record.author, record.year
    )
}

/// `<base>.<ext>`, falling back to [`DEFAULT_FILE_NAME`] for a blank base.
pub fn export_file_name(base: &str, format: ExportFormat) -> String {
    let base = base.trim();
    let base = if base.is_empty() {
        DEFAULT_FILE_NAME
    } else {
        base
    };
    format!("{}.{}", base, format.extension())
}

/// Render `payload` and write it into `dir`. Returns the written path.
pub fn write_export(
    formatter: &dyn ExportFormatter,
    payload: &str,
    format: ExportFormat,
    dir: &Path,
    base: &str,
) -> Result<PathBuf, ExportError> {
    let rendered = formatter.render(payload, format)?;
    if rendered.mime != format.mime() {
        tracing::warn!(
            format = %format,
            expected = format.mime(),
            actual = %rendered.mime,
            "formatter returned unexpected MIME type"
        );
    }

    let path = dir.join(export_file_name(base, format));
    std::fs::write(&path, &rendered.bytes).map_err(|source| ExportError::Io {
        path: path.display().to_string(),
        source,
    })?;
    tracing::debug!(path = %path.display(), bytes = rendered.bytes.len(), "export written");
    Ok(path)
}
