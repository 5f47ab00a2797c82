use clap::{Parser, Subcommand};
use kitchen_assistant::{
    ChatMessage, KitchenAssistant, MealPlanRequest, ModifyRequest, ProviderKind, RecipeRequest,
};
use log::debug;
use serde::Serialize;
use std::time::Duration;

#[derive(Parser, Debug)]
#[command(author, version, about = "Generate recipes and meal plans with an LLM", long_about = None)]
struct Cli {
    /// Provider to use instead of the configured default (google, openai, anthropic)
    #[arg(short, long, global = true)]
    provider: Option<String>,

    /// Model name for the provider
    #[arg(short, long, global = true)]
    model: Option<String>,

    /// HTTP timeout in seconds
    #[arg(long, global = true)]
    timeout: Option<u64>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Generate recipes from ingredients
    Recipes {
        /// Ingredients to cook with, comma separated
        #[arg(short, long, value_delimiter = ',', required = true)]
        ingredients: Vec<String>,
        /// Dietary preferences, comma separated
        #[arg(short, long, value_delimiter = ',')]
        diet: Vec<String>,
        /// Meal type (breakfast, lunch, dinner, snack)
        #[arg(long)]
        meal_type: Option<String>,
        /// Ingredients to avoid, comma separated
        #[arg(short, long, value_delimiter = ',')]
        exclude: Vec<String>,
    },
    /// Generate a multi-day meal plan
    MealPlan {
        /// Number of days (1 to 31)
        #[arg(long, default_value_t = 3)]
        days: u32,
        /// Daily calorie goal
        #[arg(long)]
        calories: Option<u32>,
        #[arg(short, long, value_delimiter = ',')]
        diet: Vec<String>,
        #[arg(short, long, value_delimiter = ',')]
        exclude: Vec<String>,
    },
    /// Modify a built-in recipe
    Modify {
        /// Recipe id, e.g. recipe-pasta-001
        recipe_id: String,
        /// Dietary preference to apply, e.g. Vegan
        #[arg(short, long)]
        diet: Option<String>,
        /// Target number of servings
        #[arg(short, long)]
        servings: Option<u32>,
    },
    /// Ask the cooking assistant; prefix earlier replies with "assistant:"
    Chat {
        #[arg(required = true)]
        messages: Vec<String>,
    },
    /// Look up a built-in recipe by id
    Get { id: String },
}

fn provider_kind(name: &str) -> Result<ProviderKind, String> {
    match name {
        "google" => Ok(ProviderKind::Google),
        "openai" => Ok(ProviderKind::OpenAI),
        "anthropic" => Ok(ProviderKind::Anthropic),
        other => Err(format!("Unknown provider: {}", other)),
    }
}

fn chat_message(arg: &str) -> ChatMessage {
    match arg.strip_prefix("assistant:") {
        Some(content) => ChatMessage::assistant(content.trim()),
        None => ChatMessage::user(arg.strip_prefix("user:").unwrap_or(arg).trim()),
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<(), Box<dyn std::error::Error>> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let cli = Cli::parse();
    debug!("{:?}", cli);

    let mut builder = KitchenAssistant::builder();
    if let Some(name) = cli.provider.as_deref() {
        builder = builder.provider(provider_kind(name)?);
    }
    if let Some(model) = cli.model {
        builder = builder.model(model);
    }
    if let Some(seconds) = cli.timeout {
        builder = builder.timeout(Duration::from_secs(seconds));
    }

    // Lookups never touch the model, so they work without credentials
    if let Command::Get { id } = &cli.command {
        return match kitchen_assistant::fallback::find_recipe(id) {
            Some(recipe) => print_json(&recipe),
            None => Err(format!("No recipe with id {}", id).into()),
        };
    }

    let assistant = builder.build()?;

    match cli.command {
        Command::Recipes {
            ingredients,
            diet,
            meal_type,
            exclude,
        } => {
            let request = RecipeRequest {
                ingredients,
                dietary_preferences: diet,
                meal_type,
                exclude_ingredients: exclude,
            };
            print_json(&assistant.generate_recipes(&request).await)
        }
        Command::MealPlan {
            days,
            calories,
            diet,
            exclude,
        } => {
            let request = MealPlanRequest {
                days_count: days,
                calorie_goal: calories,
                dietary_preferences: diet,
                exclude_ingredients: exclude,
            };
            print_json(&assistant.generate_meal_plan(&request).await?)
        }
        Command::Modify {
            recipe_id,
            diet,
            servings,
        } => {
            let request = ModifyRequest {
                recipe_id,
                dietary_preference: diet,
                serving_size: servings,
            };
            print_json(&assistant.modify_recipe(&request).await?)
        }
        Command::Chat { messages } => {
            let messages: Vec<ChatMessage> = messages.iter().map(|m| chat_message(m)).collect();
            print_json(&assistant.chat_with_assistant(&messages).await)
        }
        Command::Get { .. } => Ok(()),
    }
}
