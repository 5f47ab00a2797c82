use crate::config::ProviderConfig;
use crate::providers::{ensure_success, http_client, LlmProvider};
use async_trait::async_trait;
use log::{debug, warn};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::time::Duration;

const DEFAULT_BASE_URL: &str = "https://api.openai.com";

pub struct OpenAIProvider {
    client: Client,
    api_key: String,
    base_url: String,
    model: String,
    temperature: f32,
    max_tokens: u32,
}

#[derive(Serialize)]
struct CompletionRequest<'a> {
    model: &'a str,
    messages: [Message<'a>; 1],
    temperature: f32,
    max_tokens: u32,
}

#[derive(Serialize)]
struct Message<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct Completion {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

impl OpenAIProvider {
    /// Create a new OpenAI provider from configuration
    pub fn new(
        config: &ProviderConfig,
        timeout: Option<Duration>,
    ) -> Result<Self, Box<dyn Error + Send + Sync>> {
        let api_key = config
            .api_key
            .clone()
            .or_else(|| std::env::var("OPENAI_API_KEY").ok())
            .ok_or("OPENAI_API_KEY not found in config or environment")?;

        Ok(OpenAIProvider {
            client: http_client(timeout)?,
            api_key,
            base_url: config
                .base_url
                .clone()
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            model: config.model.clone(),
            temperature: config.temperature,
            max_tokens: config.max_tokens,
        })
    }

    #[doc(hidden)]
    pub fn with_base_url(api_key: String, base_url: String, model: String) -> Self {
        OpenAIProvider {
            client: Client::new(),
            api_key,
            base_url,
            model,
            temperature: 0.7,
            max_tokens: 2000,
        }
    }
}

#[async_trait]
impl LlmProvider for OpenAIProvider {
    fn provider_name(&self) -> &str {
        "openai"
    }

    async fn generate_text(&self, prompt: &str) -> Result<String, Box<dyn Error + Send + Sync>> {
        let request = CompletionRequest {
            model: &self.model,
            messages: [Message {
                role: "user",
                content: prompt,
            }],
            temperature: self.temperature,
            max_tokens: self.max_tokens,
        };

        let response = self
            .client
            .post(format!("{}/v1/chat/completions", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await?;

        let completion: Completion = ensure_success("OpenAI", response).await?.json().await?;
        debug!("{:?}", completion);

        let choice = completion
            .choices
            .into_iter()
            .next()
            .ok_or("OpenAI response has no choices")?;

        if choice.finish_reason.as_deref() == Some("length") {
            warn!("OpenAI completion hit max_tokens ({})", self.max_tokens);
        }

        choice
            .message
            .content
            .ok_or_else(|| "OpenAI response has no message content".into())
    }
}
