use crate::config::{default_max_tokens, default_temperature, AiConfig, ProviderConfig};
use crate::providers::{AnthropicProvider, GoogleProvider, LlmProvider, OpenAIProvider};
use std::error::Error;
use std::time::Duration;

pub struct ProviderFactory;

impl ProviderFactory {
    /// Create a provider instance from configuration
    pub fn create(
        provider_name: &str,
        config: &ProviderConfig,
        timeout: Option<Duration>,
    ) -> Result<Box<dyn LlmProvider>, Box<dyn Error + Send + Sync>> {
        // Validate that provider is enabled
        if !config.enabled {
            return Err(format!(
                "Provider '{}' is not enabled in configuration",
                provider_name
            )
            .into());
        }

        match provider_name {
            "google" => Ok(Box::new(GoogleProvider::new(config, timeout)?)),
            "openai" => Ok(Box::new(OpenAIProvider::new(config, timeout)?)),
            "anthropic" => Ok(Box::new(AnthropicProvider::new(config, timeout)?)),
            _ => Err(format!("Unknown provider: {}", provider_name).into()),
        }
    }

    /// Get the default provider from configuration
    pub fn get_default_provider(
        config: &AiConfig,
    ) -> Result<Box<dyn LlmProvider>, Box<dyn Error + Send + Sync>> {
        let provider_name = &config.default_provider;
        // Without a table the provider still runs on its default model and env key
        let provider_config = match config.providers.get(provider_name) {
            Some(provider_config) => provider_config.clone(),
            None => Self::default_config(provider_name).ok_or_else(|| {
                format!(
                    "Default provider '{}' not found in configuration",
                    provider_name
                )
            })?,
        };

        Self::create(
            provider_name,
            &provider_config,
            Some(Duration::from_secs(config.timeout)),
        )
    }

    /// Enabled config on the provider's default model, key left to the environment
    pub fn default_config(provider_name: &str) -> Option<ProviderConfig> {
        Self::default_model(provider_name).map(|model| ProviderConfig {
            enabled: true,
            model: model.to_string(),
            temperature: default_temperature(),
            max_tokens: default_max_tokens(),
            api_key: None,
            base_url: None,
        })
    }

    /// List all available provider names
    pub fn available_providers() -> Vec<&'static str> {
        vec!["google", "openai", "anthropic"]
    }

    /// Model used when none is configured
    pub fn default_model(provider_name: &str) -> Option<&'static str> {
        match provider_name {
            "google" => Some("gemini-1.5-flash"),
            "openai" => Some("gpt-4o-mini"),
            "anthropic" => Some("claude-3-5-haiku-latest"),
            _ => None,
        }
    }
}
