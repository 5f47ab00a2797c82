use serde::{Deserialize, Serialize};

/// Image shown for every recipe that does not carry its own
pub const DEFAULT_IMAGE_URL: &str =
    "https://images.unsplash.com/photo-1546069901-ba9599a7e63c?q=80&w=300&auto=format&fit=crop";

pub const DEFAULT_DURATION: &str = "0 minutes";
pub const DEFAULT_SERVINGS: u32 = 4;
pub const DEFAULT_DIFFICULTY: &str = "Medium";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recipe {
    #[serde(default)]
    pub id: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub ingredients: Vec<String>,
    #[serde(default)]
    pub instructions: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nutritional_info: Option<NutritionalInfo>,
    #[serde(default = "default_duration")]
    pub prep_time: String,
    #[serde(default = "default_duration")]
    pub cook_time: String,
    #[serde(default = "default_servings")]
    pub servings: u32,
    #[serde(default = "default_difficulty")]
    pub difficulty: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default = "default_image_url")]
    pub image_url: String,
}

impl Recipe {
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t.eq_ignore_ascii_case(tag))
    }

    /// True when any ingredient line mentions `term`, ignoring case
    pub fn mentions_ingredient(&self, term: &str) -> bool {
        let term = term.to_lowercase();
        self.ingredients
            .iter()
            .any(|i| i.to_lowercase().contains(&term))
    }
}

/// Per-serving nutrition, unit-free
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NutritionalInfo {
    pub calories: u32,
    pub protein: u32,
    pub carbs: u32,
    pub fat: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fiber: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sugar: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MealPlan {
    pub id: String,
    pub name: String,
    pub days: Vec<MealPlanDay>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub calorie_goal: Option<u32>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub dietary_preferences: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MealPlanDay {
    /// "Day N", 1-based
    pub day: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub breakfast: Option<Recipe>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lunch: Option<Recipe>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dinner: Option<Recipe>,
    #[serde(default)]
    pub snacks: Vec<Recipe>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

impl Role {
    /// Label used when replaying a conversation into a prompt
    pub fn label(&self) -> &'static str {
        match self {
            Role::User => "User",
            Role::Assistant => "Assistant",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    pub fn user(content: impl Into<String>) -> Self {
        ChatMessage {
            role: Role::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        ChatMessage {
            role: Role::Assistant,
            content: content.into(),
        }
    }
}

/// Parameters for recipe generation
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipeRequest {
    #[serde(default)]
    pub ingredients: Vec<String>,
    #[serde(default)]
    pub dietary_preferences: Vec<String>,
    #[serde(default)]
    pub meal_type: Option<String>,
    #[serde(default)]
    pub exclude_ingredients: Vec<String>,
}

/// Parameters for meal-plan generation
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MealPlanRequest {
    pub days_count: u32,
    #[serde(default)]
    pub calorie_goal: Option<u32>,
    #[serde(default)]
    pub dietary_preferences: Vec<String>,
    #[serde(default)]
    pub exclude_ingredients: Vec<String>,
}

/// Parameters for modifying a corpus recipe
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModifyRequest {
    pub recipe_id: String,
    #[serde(default)]
    pub dietary_preference: Option<String>,
    #[serde(default)]
    pub serving_size: Option<u32>,
}

/// Which stage produced a result
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Provenance {
    /// Parsed and normalized from model output
    Generated,
    /// Served from the built-in corpus after the model path failed
    Fallback,
}

impl Provenance {
    /// Prefix stamped onto every id produced on this path
    pub fn id_prefix(&self) -> &'static str {
        match self {
            Provenance::Generated => "generated",
            Provenance::Fallback => "fallback",
        }
    }
}

/// A result together with the path that produced it
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Generated<T> {
    pub value: T,
    pub provenance: Provenance,
}

impl<T> Generated<T> {
    pub fn generated(value: T) -> Self {
        Generated {
            value,
            provenance: Provenance::Generated,
        }
    }

    pub fn fallback(value: T) -> Self {
        Generated {
            value,
            provenance: Provenance::Fallback,
        }
    }

    pub fn is_fallback(&self) -> bool {
        self.provenance == Provenance::Fallback
    }

    pub fn into_inner(self) -> T {
        self.value
    }
}

fn default_duration() -> String {
    DEFAULT_DURATION.to_string()
}

fn default_servings() -> u32 {
    DEFAULT_SERVINGS
}

fn default_difficulty() -> String {
    DEFAULT_DIFFICULTY.to_string()
}

fn default_image_url() -> String {
    DEFAULT_IMAGE_URL.to_string()
}
