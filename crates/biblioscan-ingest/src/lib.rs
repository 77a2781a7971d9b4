use std::path::Path;
use std::sync::Arc;

use thiserror::Error;

// Re-export domain types for convenience
pub use biblioscan_core::{
    BackendError, ExtractedText, MediaKind, OcrBackend, Outcome, PdfBackend, PipelineError,
    SourceDocument, TextAcquirer,
};

#[derive(Error, Debug)]
pub enum IngestError {
    /// Rejected before acquisition; nothing was read or processed.
    #[error(transparent)]
    UnsupportedMediaKind(PipelineError),
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// Language the OCR engine uses when none is configured.
#[cfg(feature = "ocr")]
pub use biblioscan_ocr_tesseract::DEFAULT_LANGUAGE as DEFAULT_OCR_LANGUAGE;
#[cfg(not(feature = "ocr"))]
pub const DEFAULT_OCR_LANGUAGE: &str = "eng";

/// Settings for the OCR engine, resolved by the caller from flags, env and config.
#[derive(Debug, Clone, Default)]
pub struct OcrSettings {
    pub language: Option<String>,
    pub tessdata_path: Option<String>,
}

/// Determine the media kind of a file from its extension.
///
/// - `.pdf` → PDF text layer
/// - `.png`, `.jpg`, `.jpeg` → OCR
/// - anything else → [`PipelineError::UnsupportedMediaKind`]
pub fn media_kind_for_path(path: &Path) -> Result<MediaKind, IngestError> {
    let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");
    MediaKind::from_extension(ext).map_err(|_| {
        IngestError::UnsupportedMediaKind(PipelineError::UnsupportedMediaKind(
            path.display().to_string(),
        ))
    })
}

/// Read a file into a [`SourceDocument`], rejecting unsupported kinds before
/// touching the file contents.
pub fn load_document(path: &Path) -> Result<SourceDocument, IngestError> {
    let kind = media_kind_for_path(path)?;
    let bytes = std::fs::read(path).map_err(|source| IngestError::Io {
        path: path.display().to_string(),
        source,
    })?;
    tracing::debug!(path = %path.display(), kind = %kind, bytes = bytes.len(), "document loaded");
    Ok(SourceDocument::new(bytes, kind))
}

/// Wrap uploaded bytes tagged with a MIME type.
pub fn document_from_upload(bytes: Vec<u8>, mime: &str) -> Result<SourceDocument, IngestError> {
    let kind = MediaKind::from_mime(mime).map_err(IngestError::UnsupportedMediaKind)?;
    Ok(SourceDocument::new(bytes, kind))
}

/// Build the process-wide [`TextAcquirer`] with the compiled-in backends.
///
/// Call once at startup and share the result. A backend that cannot start
/// (missing native library data, feature compiled out) is replaced by one
/// that fails every call, so documents of that kind degrade to empty text
/// with a notice while the other kind keeps working.
pub fn default_acquirer(ocr: &OcrSettings) -> TextAcquirer {
    TextAcquirer::new(pdf_backend(), ocr_backend(ocr))
}

#[cfg(feature = "pdf")]
fn pdf_backend() -> Arc<dyn PdfBackend> {
    Arc::new(biblioscan_pdf_mupdf::MupdfBackend::new())
}

#[cfg(not(feature = "pdf"))]
fn pdf_backend() -> Arc<dyn PdfBackend> {
    Arc::new(Unavailable::new(
        "PDF support not compiled in (enable the `pdf` feature of biblioscan-ingest)",
    ))
}

#[cfg(feature = "ocr")]
fn ocr_backend(settings: &OcrSettings) -> Arc<dyn OcrBackend> {
    match biblioscan_ocr_tesseract::TesseractBackend::new(
        settings.language.as_deref(),
        settings.tessdata_path.as_deref(),
    ) {
        Ok(backend) => Arc::new(backend),
        Err(e) => {
            tracing::warn!(error = %e, "OCR backend unavailable");
            Arc::new(Unavailable::new(e.to_string()))
        }
    }
}

#[cfg(not(feature = "ocr"))]
fn ocr_backend(_settings: &OcrSettings) -> Arc<dyn OcrBackend> {
    Arc::new(Unavailable::new(
        "OCR support not compiled in (enable the `ocr` feature of biblioscan-ingest)",
    ))
}

/// Stand-in for a backend that could not be started.
#[derive(Debug, Clone)]
pub struct Unavailable {
    reason: String,
}

impl Unavailable {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

impl PdfBackend for Unavailable {
    fn name(&self) -> &str {
        "unavailable"
    }

    fn page_texts(&self, _bytes: &[u8]) -> Result<Vec<String>, BackendError> {
        Err(BackendError::OpenError(self.reason.clone()))
    }
}

impl OcrBackend for Unavailable {
    fn name(&self) -> &str {
        "unavailable"
    }

    fn recognize(&self, _bytes: &[u8]) -> Result<String, BackendError> {
        Err(BackendError::OpenError(self.reason.clone()))
    }
}
