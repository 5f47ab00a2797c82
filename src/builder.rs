use std::sync::Arc;
use std::time::Duration;

use crate::config::{default_max_tokens, default_temperature, AiConfig, ProviderConfig};
use crate::error::AssistantError;
use crate::fallback;
use crate::model::{
    ChatMessage, Generated, MealPlan, MealPlanRequest, ModifyRequest, Recipe, RecipeRequest,
};
use crate::pipelines;
use crate::providers::{LlmProvider, ProviderFactory};

/// Number of recipes asked for when nothing else is configured
const DEFAULT_RECIPE_COUNT: usize = 3;

/// Which hosted model backs the assistant
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderKind {
    Google,
    OpenAI,
    Anthropic,
}

impl ProviderKind {
    /// Convert to provider name string used by the factory
    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderKind::Google => "google",
            ProviderKind::OpenAI => "openai",
            ProviderKind::Anthropic => "anthropic",
        }
    }
}

/// The recipe assistant: five operations over one model capability.
///
/// Generation operations never fail because of the model. They return a
/// [`Generated`] value whose provenance says whether the model or the
/// built-in corpus produced it.
#[derive(Clone)]
pub struct KitchenAssistant {
    provider: Arc<dyn LlmProvider>,
    recipe_count: usize,
}

impl KitchenAssistant {
    /// Wrap an existing provider
    pub fn new(provider: Arc<dyn LlmProvider>) -> Self {
        KitchenAssistant {
            provider,
            recipe_count: DEFAULT_RECIPE_COUNT,
        }
    }

    /// Build the assistant around the configured default provider
    pub fn from_config(config: &AiConfig) -> Result<Self, AssistantError> {
        let provider = ProviderFactory::get_default_provider(config)
            .map_err(|e| AssistantError::ProviderError(e.to_string()))?;

        Ok(KitchenAssistant {
            provider: Arc::from(provider),
            recipe_count: config.generation.recipe_count.max(1),
        })
    }

    /// Creates a new builder for the assistant
    ///
    /// # Example
    /// ```
    /// use kitchen_assistant::{KitchenAssistant, ProviderKind};
    ///
    /// let builder = KitchenAssistant::builder()
    ///     .provider(ProviderKind::Anthropic)
    ///     .api_key("your-api-key");
    /// ```
    pub fn builder() -> KitchenAssistantBuilder {
        KitchenAssistantBuilder::default()
    }

    pub fn provider_name(&self) -> &str {
        self.provider.provider_name()
    }

    /// Recipes using the requested ingredients
    pub async fn generate_recipes(&self, request: &RecipeRequest) -> Generated<Vec<Recipe>> {
        pipelines::recipes::generate(self.provider.as_ref(), request, self.recipe_count).await
    }

    /// A meal plan of `request.days_count` days
    ///
    /// # Errors
    /// Returns [`AssistantError::InvalidRequest`] when `days_count` is zero or
    /// above [`fallback::MAX_MEAL_PLAN_DAYS`].
    pub async fn generate_meal_plan(
        &self,
        request: &MealPlanRequest,
    ) -> Result<Generated<MealPlan>, AssistantError> {
        pipelines::meal_plan::generate(self.provider.as_ref(), request).await
    }

    /// A corpus recipe rewritten for a dietary preference or serving size
    ///
    /// # Errors
    /// Returns [`AssistantError::InvalidRequest`] when `serving_size` is zero.
    pub async fn modify_recipe(
        &self,
        request: &ModifyRequest,
    ) -> Result<Generated<Recipe>, AssistantError> {
        pipelines::modify::generate(self.provider.as_ref(), request).await
    }

    /// Reply to the latest user message of a conversation
    pub async fn chat_with_assistant(&self, messages: &[ChatMessage]) -> Generated<String> {
        pipelines::chat::reply(self.provider.as_ref(), messages).await
    }

    /// Look a recipe up in the built-in corpus. No model call.
    pub fn get_recipe_by_id(&self, id: &str) -> Option<Recipe> {
        fallback::find_recipe(id)
    }
}

/// Builder for configuring a [`KitchenAssistant`]
#[derive(Default)]
pub struct KitchenAssistantBuilder {
    provider: Option<ProviderKind>,
    llm: Option<Arc<dyn LlmProvider>>,
    timeout: Option<Duration>,
    api_key: Option<String>,
    model: Option<String>,
    base_url: Option<String>,
    recipe_count: Option<usize>,
}

impl KitchenAssistantBuilder {
    /// Select a hosted provider
    pub fn provider(mut self, provider: ProviderKind) -> Self {
        self.provider = Some(provider);
        self
    }

    /// Use an already constructed provider, bypassing configuration
    pub fn llm(mut self, llm: Arc<dyn LlmProvider>) -> Self {
        self.llm = Some(llm);
        self
    }

    /// Set a timeout for HTTP requests to the provider
    ///
    /// # Example
    /// ```
    /// use kitchen_assistant::KitchenAssistant;
    /// use std::time::Duration;
    ///
    /// let builder = KitchenAssistant::builder()
    ///     .timeout(Duration::from_secs(30));
    /// ```
    pub fn timeout(mut self, duration: Duration) -> Self {
        self.timeout = Some(duration);
        self
    }

    /// Set the API key for the provider
    ///
    /// This allows passing the API key directly instead of relying on
    /// environment variables or config files.
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// Set the model name for the provider
    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    /// Point the provider at a proxy or compatible endpoint
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Number of recipes to ask the model for
    pub fn recipe_count(mut self, count: usize) -> Self {
        self.recipe_count = Some(count);
        self
    }

    /// Build the assistant
    ///
    /// Without an explicit provider, key or model, the default provider from
    /// `config.toml` / `KITCHEN__*` environment variables is used.
    ///
    /// # Errors
    /// Returns `AssistantError` if:
    /// - The recipe count is zero
    /// - The configuration cannot be loaded
    /// - The provider cannot be created (e.g. missing API key)
    pub fn build(self) -> Result<KitchenAssistant, AssistantError> {
        if self.recipe_count == Some(0) {
            return Err(AssistantError::BuilderError(
                "Recipe count must be positive".to_string(),
            ));
        }

        if let Some(llm) = self.llm {
            return Ok(KitchenAssistant {
                provider: llm,
                recipe_count: self.recipe_count.unwrap_or(DEFAULT_RECIPE_COUNT),
            });
        }

        let explicit = self.provider.is_some()
            || self.api_key.is_some()
            || self.model.is_some()
            || self.base_url.is_some();

        if !explicit {
            let mut config = AiConfig::load()?;
            if let Some(timeout) = self.timeout {
                config.timeout = timeout.as_secs().max(1);
            }
            let mut assistant = KitchenAssistant::from_config(&config)?;
            if let Some(count) = self.recipe_count {
                assistant.recipe_count = count;
            }
            return Ok(assistant);
        }

        let name = self.provider.unwrap_or(ProviderKind::Google).as_str();
        let model = match self.model {
            Some(model) => model,
            None => ProviderFactory::default_model(name)
                .map(str::to_string)
                .ok_or_else(|| {
                    AssistantError::BuilderError(format!("No default model for {}", name))
                })?,
        };

        let provider_config = ProviderConfig {
            enabled: true,
            model,
            temperature: default_temperature(),
            max_tokens: default_max_tokens(),
            api_key: self.api_key,
            base_url: self.base_url,
        };

        let provider = ProviderFactory::create(name, &provider_config, self.timeout)
            .map_err(|e| AssistantError::ProviderError(e.to_string()))?;

        Ok(KitchenAssistant {
            provider: Arc::from(provider),
            recipe_count: self.recipe_count.unwrap_or(DEFAULT_RECIPE_COUNT),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::error::Error;

    struct EchoProvider;

    #[async_trait]
    impl LlmProvider for EchoProvider {
        fn provider_name(&self) -> &str {
            "echo"
        }

        async fn generate_text(
            &self,
            prompt: &str,
        ) -> Result<String, Box<dyn Error + Send + Sync>> {
            Ok(prompt.to_string())
        }
    }

    #[test]
    fn test_provider_kind_names() {
        for kind in [ProviderKind::Google, ProviderKind::OpenAI, ProviderKind::Anthropic] {
            assert!(ProviderFactory::available_providers().contains(&kind.as_str()));
        }
    }

    #[test]
    fn test_build_with_injected_llm() {
        let assistant = KitchenAssistant::builder()
            .llm(Arc::new(EchoProvider))
            .recipe_count(5)
            .build()
            .unwrap();

        assert_eq!(assistant.provider_name(), "echo");
        assert_eq!(assistant.recipe_count, 5);
    }

    #[test]
    fn test_build_with_explicit_provider() {
        let assistant = KitchenAssistant::builder()
            .provider(ProviderKind::OpenAI)
            .api_key("test-key")
            .timeout(Duration::from_secs(5))
            .build()
            .unwrap();

        assert_eq!(assistant.provider_name(), "openai");
        assert_eq!(assistant.recipe_count, DEFAULT_RECIPE_COUNT);
    }

    #[test]
    fn test_from_config_without_provider_table() {
        std::env::set_var("ANTHROPIC_API_KEY", "env-key");
        let config = AiConfig {
            default_provider: "anthropic".to_string(),
            ..AiConfig::default()
        };

        let assistant = KitchenAssistant::from_config(&config).unwrap();
        assert_eq!(assistant.provider_name(), "anthropic");
        assert_eq!(assistant.recipe_count, 3);
    }

    #[test]
    fn test_zero_recipe_count_is_rejected() {
        let result = KitchenAssistant::builder()
            .llm(Arc::new(EchoProvider))
            .recipe_count(0)
            .build();

        assert!(matches!(result, Err(AssistantError::BuilderError(_))));
    }

    #[test]
    fn test_get_recipe_by_id() {
        let assistant = KitchenAssistant::new(Arc::new(EchoProvider));
        let recipe = assistant.get_recipe_by_id("recipe-salad-002").unwrap();
        assert_eq!(recipe.id, "recipe-salad-002");
        assert!(assistant.get_recipe_by_id("recipe-unknown-999").is_none());
    }
}
