//! Recipe, meal-plan and chat generation on top of a hosted LLM.
//!
//! Model output is free text. Each use case pulls the JSON region out of it,
//! repairs common formatting mistakes, parses it and maps it onto the
//! canonical schema in [`model`]. When any of that fails, a small built-in
//! corpus answers instead, so callers always get a result.
//!
//! ```no_run
//! use kitchen_assistant::{KitchenAssistant, RecipeRequest};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let assistant = KitchenAssistant::builder().build()?;
//! let request = RecipeRequest {
//!     ingredients: vec!["chickpeas".to_string(), "spinach".to_string()],
//!     ..Default::default()
//! };
//! let recipes = assistant.generate_recipes(&request).await;
//! println!("{} recipes ({:?})", recipes.value.len(), recipes.provenance);
//! # Ok(())
//! # }
//! ```

pub mod builder;
pub mod config;
pub mod error;
pub mod extractors;
pub mod fallback;
pub mod model;
pub mod normalize;
pub mod pipelines;
pub mod providers;
pub mod repair;

pub use builder::{KitchenAssistant, KitchenAssistantBuilder, ProviderKind};
pub use config::{load_config, AiConfig, GenerationConfig, ProviderConfig};
pub use error::{AssistantError, PipelineError};
pub use model::{
    ChatMessage, Generated, MealPlan, MealPlanDay, MealPlanRequest, ModifyRequest,
    NutritionalInfo, Provenance, Recipe, RecipeRequest, Role,
};
pub use pipelines::Stage;
pub use providers::{LlmProvider, ProviderFactory};
