use crate::pipelines::Stage;
use thiserror::Error;

/// Errors returned by the public assistant operations
///
/// Generation failures never surface here; they degrade to the fallback
/// corpus instead. What remains are caller mistakes and setup problems.
#[derive(Error, Debug)]
pub enum AssistantError {
    /// The request violates the operation's contract (e.g. zero days)
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Builder configuration error
    #[error("Builder error: {0}")]
    BuilderError(String),

    /// The model provider could not be constructed
    #[error("Provider error: {0}")]
    ProviderError(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(#[from] config::ConfigError),
}

/// Failures of the primary (model-backed) generation path
#[derive(Error, Debug)]
pub enum PipelineError {
    /// The text-generation capability failed or returned nothing
    #[error("Model call failed: {0}")]
    Model(String),

    /// No JSON-shaped region was found in the model text
    #[error("No JSON-shaped region found in model output")]
    Extraction,

    /// The candidate still failed to parse after repair
    #[error("Repaired text is not valid JSON: {0}")]
    RepairedParse(#[from] serde_json::Error),

    /// The parsed value lacks the expected shape or wrapper
    #[error("Unexpected response shape: {0}")]
    Schema(String),
}

impl PipelineError {
    /// The state the request was in when this error aborted it
    pub fn stage(&self) -> Stage {
        match self {
            PipelineError::Model(_) => Stage::AwaitingModel,
            PipelineError::Extraction => Stage::Extracting,
            PipelineError::RepairedParse(_) => Stage::Parsing,
            PipelineError::Schema(_) => Stage::Normalizing,
        }
    }
}
