use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub mod acquire;
pub mod backend;
pub mod config_file;
pub mod model;
pub mod summarize;

// Re-export for convenience
pub use acquire::TextAcquirer;
pub use backend::{BackendError, OcrBackend, PdfBackend};
pub use model::{ModelError, SummarizationModel, SummaryRequest};
pub use summarize::Summarizer;

/// Environment variable that must be set before any request is served.
pub const REQUIRED_CREDENTIAL: &str = "OPENAI_API_KEY";

/// Media kinds accepted for text acquisition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    Pdf,
    Png,
    Jpeg,
}

impl MediaKind {
    /// Parse an upload MIME type. `image/jpg` is accepted as an alias of `image/jpeg`.
    pub fn from_mime(mime: &str) -> Result<Self, PipelineError> {
        // Drop parameters such as "; charset=binary"
        let essence = mime.split(';').next().unwrap_or("").trim().to_lowercase();
        match essence.as_str() {
            "application/pdf" => Ok(MediaKind::Pdf),
            "image/png" => Ok(MediaKind::Png),
            "image/jpeg" | "image/jpg" => Ok(MediaKind::Jpeg),
            _ => Err(PipelineError::UnsupportedMediaKind(mime.to_string())),
        }
    }

    /// Parse a file extension (without the dot), case-insensitively.
    pub fn from_extension(ext: &str) -> Result<Self, PipelineError> {
        match ext.to_lowercase().as_str() {
            "pdf" => Ok(MediaKind::Pdf),
            "png" => Ok(MediaKind::Png),
            "jpg" | "jpeg" => Ok(MediaKind::Jpeg),
            _ => Err(PipelineError::UnsupportedMediaKind(ext.to_string())),
        }
    }

    pub fn mime(&self) -> &'static str {
        match self {
            MediaKind::Pdf => "application/pdf",
            MediaKind::Png => "image/png",
            MediaKind::Jpeg => "image/jpeg",
        }
    }

    /// Raster kinds go through OCR; PDFs go through the text layer.
    pub fn is_image(&self) -> bool {
        matches!(self, MediaKind::Png | MediaKind::Jpeg)
    }
}

impl fmt::Display for MediaKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            MediaKind::Pdf => "pdf",
            MediaKind::Png => "png",
            MediaKind::Jpeg => "jpeg",
        };
        f.write_str(s)
    }
}

impl FromStr for MediaKind {
    type Err = PipelineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.contains('/') {
            Self::from_mime(s)
        } else {
            Self::from_extension(s)
        }
    }
}

/// An uploaded document: raw bytes plus their declared media kind.
///
/// Consumed by value by [`TextAcquirer::extract_text`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceDocument {
    bytes: Vec<u8>,
    kind: MediaKind,
}

impl SourceDocument {
    pub fn new(bytes: Vec<u8>, kind: MediaKind) -> Self {
        Self { bytes, kind }
    }

    pub fn kind(&self) -> MediaKind {
        self.kind
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

/// All text recognized in a document. Empty is a valid, non-error state.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct ExtractedText(String);

impl ExtractedText {
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// True when the text has no non-whitespace characters.
    pub fn is_blank(&self) -> bool {
        self.0.trim().is_empty()
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl From<String> for ExtractedText {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for ExtractedText {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl fmt::Display for ExtractedText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Heuristically recovered title/author/year. Unmatched fields are empty strings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BibliographyRecord {
    pub title: String,
    pub author: String,
    pub year: String,
}

impl BibliographyRecord {
    /// True when no field matched.
    pub fn is_empty(&self) -> bool {
        self.title.is_empty() && self.author.is_empty() && self.year.is_empty()
    }
}

/// Condensed text produced by a [`Summarizer`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct SummaryText(String);

impl SummaryText {
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Length in whitespace-delimited tokens.
    pub fn token_count(&self) -> usize {
        self.0.split_whitespace().count()
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for SummaryText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Minimum and maximum summary length, in model tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryBounds {
    pub min_length: usize,
    pub max_length: usize,
}

impl SummaryBounds {
    pub const DEFAULT_MIN_LENGTH: usize = 30;
    pub const DEFAULT_MAX_LENGTH: usize = 150;

    pub fn new(min_length: usize, max_length: usize) -> Self {
        Self {
            min_length,
            max_length,
        }
    }

    pub fn validate(&self) -> Result<(), ModelError> {
        if self.max_length == 0 || self.min_length > self.max_length {
            return Err(ModelError::InvalidBounds {
                min: self.min_length,
                max: self.max_length,
            });
        }
        Ok(())
    }
}

impl Default for SummaryBounds {
    fn default() -> Self {
        Self::new(Self::DEFAULT_MIN_LENGTH, Self::DEFAULT_MAX_LENGTH)
    }
}

/// A per-request result: always carries a usable value, plus the failure
/// that forced it to be empty, if any.
#[derive(Debug)]
pub struct Outcome<T> {
    pub value: T,
    pub failure: Option<PipelineError>,
}

impl<T> Outcome<T> {
    pub fn ok(value: T) -> Self {
        Self {
            value,
            failure: None,
        }
    }

    pub fn degraded(value: T, failure: PipelineError) -> Self {
        Self {
            value,
            failure: Some(failure),
        }
    }

    pub fn is_ok(&self) -> bool {
        self.failure.is_none()
    }

    pub fn into_parts(self) -> (T, Option<PipelineError>) {
        (self.value, self.failure)
    }
}

#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("could not extract text from {kind} document: {source}")]
    AcquisitionFailure {
        kind: MediaKind,
        #[source]
        source: BackendError,
    },
    #[error("summarization failed: {0}")]
    SummarizationFailure(#[from] ModelError),
    #[error("unsupported media kind: {0} (expected pdf, png or jpeg)")]
    UnsupportedMediaKind(String),
    #[error("required credential {0} is not set")]
    MissingCredential(String),
}

impl PipelineError {
    /// Only the startup credential check may halt the process.
    pub fn is_fatal(&self) -> bool {
        matches!(self, PipelineError::MissingCredential(_))
    }
}

/// Check that the startup credential is present in the process environment.
pub fn require_credential(var: &str) -> Result<String, PipelineError> {
    require_credential_from(var, |name| std::env::var(name).ok())
}

/// Like [`require_credential`] with an injectable lookup. Blank values count as missing.
pub fn require_credential_from(
    var: &str,
    lookup: impl Fn(&str) -> Option<String>,
) -> Result<String, PipelineError> {
    match lookup(var) {
        Some(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(PipelineError::MissingCredential(var.to_string())),
    }
}
