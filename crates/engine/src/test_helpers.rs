//! Shared test helpers for engine tests.

use std::sync::Mutex;

use promptloom_core::error::ProviderError;
use promptloom_core::provider::{Provider, ProviderRequest, ProviderResponse, Usage};

/// A mock provider that returns a scripted outcome and records the
/// requests it receives.
pub struct MockProvider {
    outcome: std::result::Result<ProviderResponse, ProviderError>,
    requests: Mutex<Vec<ProviderRequest>>,
}

impl MockProvider {
    /// Create a provider that returns a single text response.
    pub fn text(text: &str) -> Self {
        Self {
            outcome: Ok(ProviderResponse {
                text: text.to_string(),
                model: "mock-model".into(),
                stop_reason: Some("end_turn".into()),
                usage: Some(Usage {
                    input_tokens: 10,
                    output_tokens: 5,
                }),
            }),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Create a provider that fails every call with the given error.
    pub fn failing(error: ProviderError) -> Self {
        Self {
            outcome: Err(error),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn call_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    pub fn last_request(&self) -> Option<ProviderRequest> {
        self.requests.lock().unwrap().last().cloned()
    }
}

#[async_trait::async_trait]
impl Provider for MockProvider {
    fn name(&self) -> &str {
        "mock"
    }

    async fn complete(
        &self,
        request: ProviderRequest,
    ) -> std::result::Result<ProviderResponse, ProviderError> {
        self.requests.lock().unwrap().push(request);
        self.outcome.clone()
    }
}
