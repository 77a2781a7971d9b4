//! Text acquisition from PDFs (text layer) and images (OCR).

use std::panic::{AssertUnwindSafe, catch_unwind};
use std::sync::Arc;

use crate::backend::{BackendError, OcrBackend, PdfBackend};
use crate::{ExtractedText, MediaKind, Outcome, PipelineError, SourceDocument};

/// Routes a [`SourceDocument`] to the PDF or OCR backend and degrades every
/// failure to an empty [`ExtractedText`].
///
/// Both backends are loaded once by the caller and shared read-only.
#[derive(Clone)]
pub struct TextAcquirer {
    pdf: Arc<dyn PdfBackend>,
    ocr: Arc<dyn OcrBackend>,
}

impl std::fmt::Debug for TextAcquirer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TextAcquirer")
            .field("pdf", &self.pdf.name())
            .field("ocr", &self.ocr.name())
            .finish()
    }
}

impl TextAcquirer {
    pub fn new(pdf: Arc<dyn PdfBackend>, ocr: Arc<dyn OcrBackend>) -> Self {
        Self { pdf, ocr }
    }

    /// Extract all text from `document`.
    ///
    /// PDF pages are concatenated in ascending page order with nothing
    /// inserted between them. Image text is returned as the OCR engine emits
    /// it. On any failure the value is empty and `failure` carries an
    /// [`PipelineError::AcquisitionFailure`].
    pub fn extract_text(&self, document: SourceDocument) -> Outcome<ExtractedText> {
        let kind = document.kind();
        tracing::debug!(kind = %kind, bytes = document.len(), "acquiring text");

        let result = guarded(|| match kind {
            MediaKind::Pdf => self.pdf_text(document.bytes()),
            MediaKind::Png | MediaKind::Jpeg => self.ocr.recognize(document.bytes()),
        });

        match result {
            Ok(text) => {
                tracing::debug!(kind = %kind, chars = text.chars().count(), "text acquired");
                Outcome::ok(ExtractedText::new(text))
            }
            Err(source) => {
                let backend = if kind.is_image() {
                    self.ocr.name()
                } else {
                    self.pdf.name()
                };
                tracing::warn!(kind = %kind, backend, error = %source, "text acquisition failed");
                Outcome::degraded(
                    ExtractedText::default(),
                    PipelineError::AcquisitionFailure { kind, source },
                )
            }
        }
    }

    fn pdf_text(&self, bytes: &[u8]) -> Result<String, BackendError> {
        let pages = self.pdf.page_texts(bytes)?;
        tracing::debug!(backend = self.pdf.name(), pages = pages.len(), "pdf pages read");
        Ok(pages.concat())
    }
}

/// Run a backend call, turning a panic inside a native binding into an error.
fn guarded(f: impl FnOnce() -> Result<String, BackendError>) -> Result<String, BackendError> {
    catch_unwind(AssertUnwindSafe(f)).unwrap_or_else(|payload| {
        let msg = payload
            .downcast_ref::<&str>()
            .map(|s| s.to_string())
            .or_else(|| payload.downcast_ref::<String>().cloned())
            .unwrap_or_else(|| "unknown panic".to_string());
        Err(BackendError::ExtractionError(format!("backend panicked: {msg}")))
    })
}
