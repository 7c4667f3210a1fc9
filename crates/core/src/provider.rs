//! Provider trait — the abstraction over model backends.
//!
//! A Provider knows how to send an assembled message sequence to a model
//! backend and get a response back. Each backend family shapes the request
//! differently (some take the system message as a distinct field, some
//! inline it), so request shaping lives inside the implementations.
//!
//! Implementations: Anthropic native, OpenAI-compatible endpoints.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::ProviderError;
use crate::message::Message;

/// Configuration for a provider request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderRequest {
    /// The model to use (alias or canonical backend identifier)
    pub model: String,

    /// The assembled message sequence
    pub messages: Vec<Message>,

    /// Temperature (0.0 = deterministic, 1.0 = creative)
    pub temperature: f32,

    /// Maximum tokens to generate
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,

    /// Stop sequences
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub stop: Vec<String>,
}

/// A complete response from a provider.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderResponse {
    /// The generated text (first content entry of the backend payload)
    pub text: String,

    /// Which model actually responded (may differ from requested)
    pub model: String,

    /// Backend-reported stop/finish reason
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stop_reason: Option<String>,

    /// Token usage statistics
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub usage: Option<Usage>,
}

/// Token usage information.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Usage {
    pub input_tokens: u32,
    pub output_tokens: u32,
}

/// An embedding request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmbeddingRequest {
    /// The model to use for embeddings (e.g., "text-embedding-3-small")
    pub model: String,

    /// The raw text to embed
    pub input: String,
}

/// An embedding response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmbeddingResponse {
    /// The fixed-length embedding vector
    pub embedding: Vec<f32>,

    /// Which model was used
    pub model: String,
}

/// The core Provider trait.
///
/// Every model backend implements this trait. The engine calls `complete()`
/// without knowing which backend is being used — pure polymorphism.
#[async_trait]
pub trait Provider: Send + Sync {
    /// A human-readable name for this provider (e.g., "anthropic").
    fn name(&self) -> &str;

    /// Send a request and get a complete response.
    async fn complete(
        &self,
        request: ProviderRequest,
    ) -> std::result::Result<ProviderResponse, ProviderError>;

    /// Generate an embedding for the given text.
    ///
    /// Unlike `complete`, callers get no degraded substitute: failures
    /// propagate directly. Default implementation reports that embeddings
    /// aren't supported by this backend.
    async fn embed(
        &self,
        _request: EmbeddingRequest,
    ) -> std::result::Result<EmbeddingResponse, ProviderError> {
        Err(ProviderError::NotConfigured(format!(
            "Provider '{}' does not support embeddings",
            self.name()
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn provider_request_serialization_skips_empty_stop() {
        let req = ProviderRequest {
            model: "sonnet".into(),
            messages: vec![Message::user("hi")],
            temperature: 1.0,
            max_tokens: None,
            stop: vec![],
        };
        let json = serde_json::to_string(&req).unwrap();
        assert!(!json.contains("stop"));
        assert!(!json.contains("max_tokens"));
    }

    #[test]
    fn embed_default_not_supported() {
        struct Bare;

        #[async_trait]
        impl Provider for Bare {
            fn name(&self) -> &str {
                "bare"
            }
            async fn complete(
                &self,
                _request: ProviderRequest,
            ) -> std::result::Result<ProviderResponse, ProviderError> {
                unreachable!()
            }
        }

        let rt = tokio::runtime::Runtime::new().unwrap();
        let err = rt
            .block_on(Bare.embed(EmbeddingRequest {
                model: "none".into(),
                input: "text".into(),
            }))
            .unwrap_err();
        assert!(matches!(err, ProviderError::NotConfigured(_)));
    }
}
