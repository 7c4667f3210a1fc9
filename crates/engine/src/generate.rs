//! Resilient generation — one node's message sequence to one model call.
//!
//! Backend failures never surface as errors here: a failed call produces a
//! sentinel result with the failure captured in its debug metadata, so a
//! batch caller processing many nodes can keep going and inspect degraded
//! results uniformly. The only raised error is a configuration error (a
//! sequence with no user turn), which indicates malformed content rather
//! than a transient condition — it is detected before any network call.

use promptloom_core::content::Content;
use promptloom_core::error::{Error, Result};
use promptloom_core::message::{Message, Role};
use promptloom_core::provider::{Provider, ProviderRequest, Usage};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Fixed placeholder returned in place of a failed generation.
pub const SENTINEL_RESPONSE: &str = "💩";

/// Options for a single generation call.
#[derive(Debug, Clone)]
pub struct GenerateOptions {
    /// Model alias or canonical id
    pub model: String,

    /// Maximum tokens to generate
    pub max_tokens: Option<u32>,
}

/// The outcome of a generation call: always a well-formed response string,
/// even when the backend failed.
#[derive(Debug, Clone)]
pub struct GenerateResult {
    /// Generated text, trimmed — or the sentinel placeholder on failure
    pub message: String,

    /// Structured metadata about the call
    pub debug: GenerateDebug,
}

/// Structured metadata carried alongside every generation result.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateDebug {
    /// The model that handled the call. On success this is the backend's
    /// canonical id; on failure no backend answered, so it is the model
    /// identifier as requested (alias resolution happens inside the
    /// provider).
    pub model: String,

    /// Backend-reported stop/finish reason, or "failed"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub finish: Option<String>,

    /// Token usage, when the backend reported it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub usage: Option<Usage>,

    /// The triggering error's message, present only on failure
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl GenerateDebug {
    fn failed(model: String, error: impl std::fmt::Display) -> Self {
        Self {
            model,
            finish: Some("failed".into()),
            usage: None,
            error: Some(error.to_string()),
        }
    }

    /// Whether this result stands in for a failed generation.
    pub fn is_failure(&self) -> bool {
        self.finish.as_deref() == Some("failed")
    }
}

/// Derive a fence language tag from a file's extension ("" when there is
/// no extension).
pub fn fence_tag(file: &str) -> &str {
    match file.rsplit_once('.') {
        Some((_, ext)) => ext,
        None => "",
    }
}

/// Generate a response for one content node.
///
/// Uses the node's assembled `meta.messages`. In edit mode an assistant
/// prefill opens a fenced code block and the closing fence becomes the
/// stop sequence, steering the backend to continue the block rather than
/// write prose. Temperature follows the node override when present, else
/// 0.0 for edit mode and 1.0 otherwise.
pub async fn generate(
    provider: &dyn Provider,
    content: &Content,
    options: &GenerateOptions,
) -> Result<GenerateResult> {
    let mut messages = content.meta.messages.clone().unwrap_or_default();

    if !messages.iter().any(|m| m.role == Role::User) {
        return Err(Error::Config {
            message: format!(
                "Node '{}' must have at least one message with role: user",
                content.name
            ),
        });
    }

    // The backend produces the next assistant turn; never send it one
    // already completed. Edit mode re-appends a deliberate prefill below.
    if messages.last().is_some_and(|m| m.role == Role::Assistant) {
        messages.pop();
    }

    let mut stop: Vec<String> = Vec::new();
    if let Some(edit) = &content.context.edit {
        let fence = format!("```{}", fence_tag(&edit.file));
        messages.push(Message::assistant(fence));
        stop.push("```".into());
    }

    let temperature = content
        .meta
        .temperature
        .unwrap_or(if content.is_edit() { 0.0 } else { 1.0 });

    let request = ProviderRequest {
        model: options.model.clone(),
        messages,
        temperature,
        max_tokens: options.max_tokens,
        stop,
    };

    debug!(node = %content.name, model = %request.model, temperature, "Sending generation request");

    match provider.complete(request).await {
        Ok(response) => {
            debug!(node = %content.name, finish = ?response.stop_reason, "Generation complete");
            // In edit mode the backend returns neither the prefill nor the
            // stop sequence, so the trimmed text is the edit itself.
            Ok(GenerateResult {
                message: response.text.trim().to_string(),
                debug: GenerateDebug {
                    model: response.model,
                    finish: response.stop_reason,
                    usage: response.usage,
                    error: None,
                },
            })
        }
        Err(error) => {
            warn!(node = %content.name, %error, "Generation failed, returning sentinel");
            Ok(GenerateResult {
                message: SENTINEL_RESPONSE.into(),
                debug: GenerateDebug::failed(options.model.clone(), error),
            })
        }
    }
}
