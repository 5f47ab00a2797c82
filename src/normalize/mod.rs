//! Mapping parsed model output onto the canonical schema.
//!
//! Models name the same field several ways. Every canonical field has a
//! prioritized alias list below; the first alias holding a usable value
//! wins and everything else takes the schema default.

use serde_json::{Map, Value};

mod ids;
mod meal_plan;
mod recipe;

pub use self::ids::IdStamp;
pub use self::meal_plan::{meal_plan_name, normalize_meal_plan};
pub use self::recipe::{normalize_modified_recipe, normalize_recipe, normalize_recipes};

pub const TITLE: &[&str] = &["title", "name", "recipeName"];
pub const DESCRIPTION: &[&str] = &["description", "summary"];
pub const INGREDIENTS: &[&str] = &["ingredients", "ingredientList"];
pub const INSTRUCTIONS: &[&str] = &["instructions", "steps", "directions", "method"];
pub const NUTRITION: &[&str] = &["nutritionalInfo", "nutritionalInformation", "nutrition"];
pub const PREP_TIME: &[&str] = &["prepTime", "preparationTime"];
pub const COOK_TIME: &[&str] = &["cookTime", "cookingTime"];
pub const SERVINGS: &[&str] = &["servings", "numberOfServings", "serves"];
pub const DIFFICULTY: &[&str] = &["difficulty", "difficultyLevel"];
pub const TAGS: &[&str] = &["tags", "categories"];
pub const IMAGE_URL: &[&str] = &["imageUrl", "image"];

/// Wrappers a recipe list may arrive under, after the raw value itself
pub const RECIPE_LIST_WRAPPERS: &[&str] = &["recipes", "recipeList"];
/// Wrappers a modified recipe may arrive under, after the raw value itself
pub const RECIPE_WRAPPERS: &[&str] = &["recipe", "modifiedRecipe"];
/// Wrappers the day list of a meal plan may arrive under
pub const MEAL_PLAN_WRAPPERS: &[&str] = &["mealPlan", "days", "plan"];
pub const SNACKS: &[&str] = &["snacks", "snack"];

/// First alias whose value is present, non-null and not an empty string
pub fn lookup<'a>(object: &'a Map<String, Value>, aliases: &[&str]) -> Option<&'a Value> {
    aliases
        .iter()
        .filter_map(|alias| object.get(*alias))
        .find(|value| is_present(value))
}

fn is_present(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::String(s) => !s.trim().is_empty(),
        _ => true,
    }
}

/// Coerce a nutrition value to a non-negative integer.
///
/// Numbers are kept (fractions truncated, clamped at zero). Strings yield their first
/// run of digits, so `"300g"` and `"about 300 kcal"` both give 300. Anything
/// else is 0.
pub fn coerce_count(value: Option<&Value>) -> u32 {
    match value {
        Some(Value::Number(n)) => {
            if let Some(u) = n.as_u64() {
                u.min(u32::MAX as u64) as u32
            } else {
                n.as_f64()
                    .map(|f| f.trunc().clamp(0.0, u32::MAX as f64) as u32)
                    .unwrap_or(0)
            }
        }
        Some(Value::String(s)) => leading_digits(s),
        _ => 0,
    }
}

fn leading_digits(s: &str) -> u32 {
    let digits: String = s
        .chars()
        .skip_while(|c| !c.is_ascii_digit())
        .take_while(|c| c.is_ascii_digit())
        .collect();
    digits
        .parse::<u64>()
        .map(|n| n.min(u32::MAX as u64) as u32)
        .unwrap_or(0)
}

/// A scalar rendered as trimmed text
pub fn text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.trim().to_string()).filter(|s| !s.is_empty()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}
