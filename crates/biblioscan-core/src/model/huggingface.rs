use std::time::Duration;

use serde_json::{Value, json};

use super::{ModelError, SummarizationModel, SummaryRequest};

pub const DEFAULT_ENDPOINT: &str = "https://api-inference.huggingface.co/models";
/// Default checkpoint of the transformers `summarization` pipeline.
pub const DEFAULT_MODEL: &str = "sshleifer/distilbart-cnn-12-6";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

/// Summarization through the Hugging Face Inference API.
///
/// Holds one blocking HTTP client for the life of the process.
pub struct HuggingFaceModel {
    client: reqwest::blocking::Client,
    endpoint: String,
    model: String,
    api_token: Option<String>,
}

impl std::fmt::Debug for HuggingFaceModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HuggingFaceModel")
            .field("endpoint", &self.endpoint)
            .field("model", &self.model)
            .field("api_token", &self.api_token.as_ref().map(|_| "***"))
            .finish()
    }
}

impl HuggingFaceModel {
    pub fn new(model: impl Into<String>, timeout: Duration) -> Result<Self, ModelError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("biblioscan/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self {
            client,
            endpoint: DEFAULT_ENDPOINT.to_string(),
            model: model.into(),
            api_token: None,
        })
    }

    /// Override the inference endpoint (e.g. a self-hosted text-generation server).
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    pub fn with_api_token(mut self, token: Option<String>) -> Self {
        self.api_token = token.filter(|t| !t.trim().is_empty());
        self
    }

    pub fn url(&self) -> String {
        format!(
            "{}/{}",
            self.endpoint.trim_end_matches('/'),
            self.model.trim_start_matches('/')
        )
    }
}

/// JSON payload for the inference API.
pub(crate) fn request_body(request: &SummaryRequest<'_>) -> Value {
    json!({
        "inputs": request.text,
        "parameters": {
            "min_length": request.min_length,
            "max_length": request.max_length,
            "do_sample": request.do_sample,
        },
        "options": {
            "wait_for_model": true,
        },
    })
}

/// Pull the summary out of an inference API response.
///
/// Success is `[{"summary_text": "..."}]`; failures come back as
/// `{"error": "..."}`.
pub(crate) fn parse_response(body: &Value) -> Result<String, ModelError> {
    if let Some(err) = body["error"].as_str() {
        return Err(ModelError::Api(err.to_string()));
    }

    let first = match body.as_array() {
        Some(items) => items.first().cloned().unwrap_or(Value::Null),
        None => body.clone(),
    };

    first["summary_text"]
        .as_str()
        .map(|s| s.to_string())
        .ok_or(ModelError::EmptyResponse)
}

impl SummarizationModel for HuggingFaceModel {
    fn name(&self) -> &str {
        &self.model
    }

    fn summarize(&self, request: &SummaryRequest<'_>) -> Result<String, ModelError> {
        let mut builder = self.client.post(self.url()).json(&request_body(request));
        if let Some(ref token) = self.api_token {
            builder = builder.bearer_auth(token);
        }

        let resp = builder.send()?;
        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().unwrap_or_default();
            // The API wraps most failures in {"error": ...}; surface that message when present.
            if let Ok(value) = serde_json::from_str::<Value>(&body)
                && let Some(err) = value["error"].as_str()
            {
                return Err(ModelError::Api(format!("HTTP {}: {}", status.as_u16(), err)));
            }
            return Err(ModelError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let data: Value = resp.json()?;
        parse_response(&data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(text: &str) -> SummaryRequest<'_> {
        SummaryRequest {
            text,
            min_length: 30,
            max_length: 150,
            do_sample: false,
        }
    }

    #[test]
    fn body_carries_bounds_and_greedy_decoding() {
        let body = request_body(&request("Some long article."));
        assert_eq!(body["inputs"], "Some long article.");
        assert_eq!(body["parameters"]["min_length"], 30);
        assert_eq!(body["parameters"]["max_length"], 150);
        assert_eq!(body["parameters"]["do_sample"], false);
    }

    #[test]
    fn parses_summary_array() {
        let body = json!([{"summary_text": "A short summary."}]);
        assert_eq!(parse_response(&body).unwrap(), "A short summary.");
    }

    #[test]
    fn parses_bare_object() {
        let body = json!({"summary_text": "Bare."});
        assert_eq!(parse_response(&body).unwrap(), "Bare.");
    }

    #[test]
    fn api_error_is_reported() {
        let body = json!({"error": "Model is currently loading"});
        match parse_response(&body) {
            Err(ModelError::Api(msg)) => assert!(msg.contains("loading")),
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn missing_summary_is_empty_response() {
        assert!(matches!(
            parse_response(&json!([])),
            Err(ModelError::EmptyResponse)
        ));
        assert!(matches!(
            parse_response(&json!([{"generated": "x"}])),
            Err(ModelError::EmptyResponse)
        ));
    }

    #[test]
    fn url_joins_endpoint_and_model() {
        let model = HuggingFaceModel::new("facebook/bart-large-cnn", DEFAULT_TIMEOUT)
            .unwrap()
            .with_endpoint("http://localhost:8080/models/");
        assert_eq!(model.url(), "http://localhost:8080/models/facebook/bart-large-cnn");
    }

    #[test]
    fn blank_token_is_dropped() {
        let model = HuggingFaceModel::new(DEFAULT_MODEL, DEFAULT_TIMEOUT)
            .unwrap()
            .with_api_token(Some("   ".into()));
        assert!(format!("{model:?}").contains("api_token: None"));
    }
}
