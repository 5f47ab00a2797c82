use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::collections::HashMap;

/// Main AI configuration structure
#[derive(Debug, Deserialize, Clone)]
pub struct AiConfig {
    /// Default provider to use when not specified
    #[serde(default = "default_provider")]
    pub default_provider: String,
    /// Map of provider name to provider configuration
    #[serde(default)]
    pub providers: HashMap<String, ProviderConfig>,
    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout: u64,
    /// Generation settings
    #[serde(default)]
    pub generation: GenerationConfig,
}

/// Configuration for a specific AI provider
#[derive(Debug, Deserialize, Clone)]
pub struct ProviderConfig {
    /// Whether this provider is enabled
    pub enabled: bool,
    /// Model identifier (e.g., "gemini-1.5-flash", "gpt-4o-mini")
    pub model: String,
    /// Temperature for generation (0.0-1.0)
    #[serde(default = "default_temperature")]
    pub temperature: f32,
    /// Maximum tokens to generate
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,

    /// API key for authentication (can also be set via environment variable)
    pub api_key: Option<String>,
    /// Base URL for API endpoint (for custom or proxy endpoints)
    pub base_url: Option<String>,
}

/// Settings shaping what the pipelines ask the model for
#[derive(Debug, Deserialize, Clone)]
pub struct GenerationConfig {
    /// Number of recipes requested per generation call
    #[serde(default = "default_recipe_count")]
    pub recipe_count: usize,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            recipe_count: default_recipe_count(),
        }
    }
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            default_provider: default_provider(),
            providers: HashMap::new(),
            timeout: default_timeout(),
            generation: GenerationConfig::default(),
        }
    }
}

// Default value functions
fn default_provider() -> String {
    "google".to_string()
}

pub(crate) fn default_temperature() -> f32 {
    0.7
}

pub(crate) fn default_max_tokens() -> u32 {
    2000
}

fn default_timeout() -> u64 {
    30
}

fn default_recipe_count() -> usize {
    3
}

impl AiConfig {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded with the following priority (highest to lowest):
    /// 1. Environment variables with KITCHEN__ prefix
    /// 2. config.toml file in current directory
    /// 3. Default values
    ///
    /// Environment variable format: KITCHEN__PROVIDERS__GOOGLE__API_KEY
    pub fn load() -> Result<Self, ConfigError> {
        load_config()
    }
}

/// Load configuration from file and environment variables
///
/// Configuration is loaded with the following priority (highest to lowest):
/// 1. Environment variables with KITCHEN__ prefix
/// 2. config.toml file in current directory
/// 3. Default values
///
/// Environment variable format: KITCHEN__PROVIDERS__GOOGLE__API_KEY
pub fn load_config() -> Result<AiConfig, ConfigError> {
    let settings = Config::builder()
        // Optional config file (can be missing)
        .add_source(File::with_name("config").required(false))
        // Use double underscore for nested: KITCHEN__PROVIDERS__GOOGLE__API_KEY
        .add_source(
            Environment::with_prefix("KITCHEN")
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    settings.try_deserialize()
}
