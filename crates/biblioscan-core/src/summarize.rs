use std::sync::Arc;

use crate::model::{SummarizationModel, SummaryRequest};
use crate::{ExtractedText, Outcome, PipelineError, SummaryBounds, SummaryText};

/// Stateless front for a [`SummarizationModel`].
///
/// Every failure is absorbed: the caller always gets a [`SummaryText`],
/// empty when no summary could be produced.
#[derive(Clone)]
pub struct Summarizer {
    model: Arc<dyn SummarizationModel>,
}

impl std::fmt::Debug for Summarizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Summarizer")
            .field("model", &self.model.name())
            .finish()
    }
}

impl Summarizer {
    pub fn new(model: Arc<dyn SummarizationModel>) -> Self {
        Self { model }
    }

    /// Summarize with the default 30..=150 token bounds.
    pub fn summarize_default(&self, text: &ExtractedText) -> Outcome<SummaryText> {
        self.summarize(text, SummaryBounds::default())
    }

    /// Summarize `text` with greedy decoding within `bounds`.
    ///
    /// Blank input returns an empty summary without calling the model.
    pub fn summarize(&self, text: &ExtractedText, bounds: SummaryBounds) -> Outcome<SummaryText> {
        if text.is_blank() {
            return Outcome::ok(SummaryText::default());
        }

        if let Err(e) = bounds.validate() {
            tracing::warn!(error = %e, "rejecting summary request");
            return Outcome::degraded(SummaryText::default(), PipelineError::SummarizationFailure(e));
        }

        let request = SummaryRequest {
            text: text.as_str(),
            min_length: bounds.min_length,
            max_length: bounds.max_length,
            do_sample: false,
        };
        tracing::debug!(
            model = self.model.name(),
            min_length = bounds.min_length,
            max_length = bounds.max_length,
            input_chars = text.as_str().len(),
            "summarizing"
        );

        match self.model.summarize(&request) {
            Ok(raw) => Outcome::ok(SummaryText::new(clamp_tokens(
                raw.trim(),
                bounds.max_length,
            ))),
            Err(e) => {
                tracing::warn!(model = self.model.name(), error = %e, "summarization failed");
                Outcome::degraded(SummaryText::default(), PipelineError::SummarizationFailure(e))
            }
        }
    }
}

/// Keep at most `max_tokens` whitespace-delimited tokens, cutting at the end
/// of the last kept token so the model's own line breaks survive.
fn clamp_tokens(text: &str, max_tokens: usize) -> &str {
    if max_tokens == 0 {
        return "";
    }
    let mut tokens = 0;
    let mut in_token = false;
    for (i, c) in text.char_indices() {
        if c.is_whitespace() {
            if in_token && tokens == max_tokens {
                return &text[..i];
            }
            in_token = false;
        } else if !in_token {
            in_token = true;
            tokens += 1;
        }
    }
    text
}
