mod anthropic;
mod factory;
mod google;
mod open_ai;
mod prompt;

pub use anthropic::AnthropicProvider;
pub use factory::ProviderFactory;
pub use google::GoogleProvider;
pub use open_ai::OpenAIProvider;
pub use prompt::{
    chat_prompt, meal_plan_prompt, modify_prompt, recipe_prompt, NUTRITION_FORMAT_RULES,
};

use async_trait::async_trait;
use reqwest::{Client, Response};
use serde_json::Value;
use std::error::Error;
use std::time::Duration;

/// Unified trait for all LLM providers
///
/// This is the only capability the generation pipelines need from a model:
/// one prompt in, one completion out.
#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// Get the provider name (e.g., "google", "openai")
    fn provider_name(&self) -> &str;

    /// Generate a completion for `prompt`
    async fn generate_text(&self, prompt: &str) -> Result<String, Box<dyn Error + Send + Sync>>;
}

fn http_client(timeout: Option<Duration>) -> Result<Client, reqwest::Error> {
    let builder = Client::builder();
    match timeout {
        Some(timeout) => builder.timeout(timeout).build(),
        None => builder.build(),
    }
}

/// Turn a non-2xx response into an error carrying the API's own message
async fn ensure_success(
    label: &str,
    response: Response,
) -> Result<Response, Box<dyn Error + Send + Sync>> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<Value>(&body)
        .ok()
        .and_then(|v| v["error"]["message"].as_str().map(str::to_string))
        .unwrap_or(body);

    Err(format!("{} request failed with status {}: {}", label, status, message.trim()).into())
}
