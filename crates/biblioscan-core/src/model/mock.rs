//! Mock summarization model for testing.

use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use super::{ModelError, SummarizationModel, SummaryRequest};

/// A configurable mock response for [`MockModel`].
#[derive(Clone, Debug)]
pub enum MockResponse {
    /// Return this text as the summary.
    Summary(String),
    /// Echo the first `n` words of the input.
    EchoWords(usize),
    /// Fail with a model-side error.
    Error(String),
}

/// What the mock was asked to do on one call.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RecordedRequest {
    pub text: String,
    pub min_length: usize,
    pub max_length: usize,
    pub do_sample: bool,
}

/// A hand-rolled mock implementing [`SummarizationModel`] for tests.
///
/// Supports a fixed response, or a sequence of responses (one per call,
/// repeating the last when exhausted), and records every request.
pub struct MockModel {
    responses: Mutex<Vec<MockResponse>>,
    fallback: MockResponse,
    calls: Mutex<Vec<RecordedRequest>>,
    call_count: AtomicUsize,
}

impl MockModel {
    /// Create a mock that always returns `response`.
    pub fn new(response: MockResponse) -> Self {
        Self {
            responses: Mutex::new(Vec::new()),
            fallback: response,
            calls: Mutex::new(Vec::new()),
            call_count: AtomicUsize::new(0),
        }
    }

    /// Create a mock that returns responses in order, repeating the last one.
    pub fn with_sequence(mut responses: Vec<MockResponse>) -> Self {
        assert!(
            !responses.is_empty(),
            "sequence must have at least one response"
        );
        // Reverse so we can pop() the next response off the end.
        responses.reverse();
        let fallback = responses[0].clone();
        Self {
            responses: Mutex::new(responses),
            fallback,
            calls: Mutex::new(Vec::new()),
            call_count: AtomicUsize::new(0),
        }
    }

    /// How many times `summarize()` has been called.
    pub fn call_count(&self) -> usize {
        self.call_count.load(Ordering::SeqCst)
    }

    /// Every request received so far, oldest first.
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.calls.lock().map(|c| c.clone()).unwrap_or_default()
    }

    fn next_response(&self) -> MockResponse {
        match self.responses.lock() {
            Ok(mut seq) => seq.pop().unwrap_or_else(|| self.fallback.clone()),
            Err(_) => self.fallback.clone(),
        }
    }
}

impl SummarizationModel for MockModel {
    fn name(&self) -> &str {
        "mock"
    }

    fn summarize(&self, request: &SummaryRequest<'_>) -> Result<String, ModelError> {
        self.call_count.fetch_add(1, Ordering::SeqCst);
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(RecordedRequest {
                text: request.text.to_string(),
                min_length: request.min_length,
                max_length: request.max_length,
                do_sample: request.do_sample,
            });
        }

        match self.next_response() {
            MockResponse::Summary(text) => Ok(text),
            MockResponse::EchoWords(n) => Ok(request
                .text
                .split_whitespace()
                .take(n)
                .collect::<Vec<_>>()
                .join(" ")),
            MockResponse::Error(msg) => Err(ModelError::Api(msg)),
        }
    }
}
