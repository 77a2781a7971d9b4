use thiserror::Error;

#[derive(Error, Debug)]
pub enum BackendError {
    #[error("failed to open document: {0}")]
    OpenError(String),
    #[error("failed to extract text: {0}")]
    ExtractionError(String),
    #[error("failed to decode image: {0}")]
    DecodeError(String),
}

/// Trait for PDF text-layer extraction backends.
///
/// Implementors return the text of every page, in page order. Joining the
/// pages is left to [`crate::TextAcquirer`]. Scanned pages without a text
/// layer simply yield empty strings; there is no OCR fallback.
pub trait PdfBackend: Send + Sync {
    /// Short backend name used in log fields.
    fn name(&self) -> &str;

    /// Extract the text of each page of an in-memory PDF.
    fn page_texts(&self, bytes: &[u8]) -> Result<Vec<String>, BackendError>;
}

/// Trait for optical character recognition backends.
pub trait OcrBackend: Send + Sync {
    /// Short backend name used in log fields.
    fn name(&self) -> &str;

    /// Decode an encoded raster image (PNG or JPEG) and return the recognized
    /// text exactly as the engine emits it.
    fn recognize(&self, bytes: &[u8]) -> Result<String, BackendError>;
}
