//! Model backend implementations for Promptloom.
//!
//! All backends implement the `promptloom_core::Provider` trait. Each one
//! owns the translation from the assembled message sequence into the shape
//! its model family expects — the Anthropic backend lifts the leading
//! system message into a top-level field, the OpenAI-compatible backend
//! keeps it inline.

pub mod anthropic;
pub mod openai_compat;

pub use anthropic::AnthropicProvider;
pub use openai_compat::OpenAiCompatProvider;

use std::sync::Arc;

use promptloom_core::Provider;
use promptloom_config::AppConfig;

/// Build the configured default provider.
pub fn build_from_config(config: &AppConfig) -> Arc<dyn Provider> {
    let name = config.default_provider.as_str();
    let api_key = config.api_key_for(name).unwrap_or_default();
    let api_url = config.providers.get(name).and_then(|p| p.api_url.clone());

    if name == "anthropic" {
        let mut provider = AnthropicProvider::new(api_key);
        if let Some(url) = api_url {
            provider = provider.with_base_url(url);
        }
        Arc::new(provider)
    } else {
        let base_url = api_url.unwrap_or_else(|| default_base_url(name));
        Arc::new(OpenAiCompatProvider::new(name, base_url, api_key))
    }
}

/// Get the default base URL for well-known OpenAI-compatible providers.
fn default_base_url(provider_name: &str) -> String {
    match provider_name {
        "openai" => "https://api.openai.com/v1".into(),
        "openrouter" => "https://openrouter.ai/api/v1".into(),
        "ollama" => "http://localhost:11434/v1".into(),
        _ => format!("https://{provider_name}.api.example.com/v1"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_builds_anthropic() {
        let config = AppConfig::default();
        let provider = build_from_config(&config);
        assert_eq!(provider.name(), "anthropic");
    }

    #[test]
    fn openai_provider_from_config() {
        let config = AppConfig {
            default_provider: "openai".into(),
            ..Default::default()
        };
        let provider = build_from_config(&config);
        assert_eq!(provider.name(), "openai");
    }

    #[test]
    fn known_base_urls() {
        assert!(default_base_url("openai").contains("api.openai.com"));
        assert!(default_base_url("ollama").contains("localhost:11434"));
    }
}
