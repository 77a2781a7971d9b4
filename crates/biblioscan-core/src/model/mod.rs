//! Summarization model trait and implementations.

pub mod huggingface;
pub mod mock;

use thiserror::Error;

pub use huggingface::HuggingFaceModel;

#[derive(Error, Debug)]
pub enum ModelError {
    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("model endpoint returned HTTP {status}: {body}")]
    Status { status: u16, body: String },
    #[error("model reported an error: {0}")]
    Api(String),
    #[error("model returned no summary")]
    EmptyResponse,
    #[error("invalid summary bounds: min_length {min}, max_length {max}")]
    InvalidBounds { min: usize, max: usize },
}

/// One summarization call. Decoding is greedy when `do_sample` is false.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryRequest<'a> {
    pub text: &'a str,
    pub min_length: usize,
    pub max_length: usize,
    pub do_sample: bool,
}

/// A pretrained abstractive summarization model.
///
/// Loaded once and shared read-only; implementations must not keep
/// per-request state.
pub trait SummarizationModel: Send + Sync {
    /// The model identifier (e.g., "sshleifer/distilbart-cnn-12-6").
    fn name(&self) -> &str;

    /// Return the single best condensation of `request.text`, between
    /// `min_length` and `max_length` model tokens.
    fn summarize(&self, request: &SummaryRequest<'_>) -> Result<String, ModelError>;
}
