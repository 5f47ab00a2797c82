use crate::error::PipelineError;
use crate::model::{MealPlan, MealPlanDay, MealPlanRequest, Recipe};
use crate::normalize::{lookup, normalize_recipe, IdStamp, MEAL_PLAN_WRAPPERS, SNACKS};
use serde_json::{Map, Value};

/// `"3-Day Meal Plan"`, or `"3-Day Meal Plan (Vegan, Keto)"` with preferences
pub fn meal_plan_name(days: u32, dietary_preferences: &[String]) -> String {
    if dietary_preferences.is_empty() {
        format!("{}-Day Meal Plan", days)
    } else {
        format!(
            "{}-Day Meal Plan ({})",
            days,
            dietary_preferences.join(", ")
        )
    }
}

/// Normalize a parsed meal-plan response.
///
/// The day list may be the raw value or sit under one of
/// [`MEAL_PLAN_WRAPPERS`] (a wrapper object holding `days` is unwrapped).
/// Extra days are dropped; fewer days than requested is a schema error.
pub fn normalize_meal_plan(
    parsed: &Value,
    request: &MealPlanRequest,
    stamp: &IdStamp,
) -> Result<MealPlan, PipelineError> {
    let entries = day_entries(parsed).ok_or_else(|| {
        PipelineError::Schema("expected a day array or a `mealPlan` wrapper".to_string())
    })?;

    let wanted = request.days_count as usize;
    if entries.len() < wanted {
        return Err(PipelineError::Schema(format!(
            "expected {} days, got {}",
            wanted,
            entries.len()
        )));
    }

    let days = entries
        .iter()
        .take(wanted)
        .enumerate()
        .map(|(index, entry)| {
            let object = entry.as_object().ok_or_else(|| {
                PipelineError::Schema(format!("day {} is not an object", index + 1))
            })?;
            Ok(normalize_day(object, index + 1, stamp))
        })
        .collect::<Result<Vec<_>, PipelineError>>()?;

    Ok(MealPlan {
        id: stamp.meal_plan(),
        name: meal_plan_name(request.days_count, &request.dietary_preferences),
        days,
        calorie_goal: request.calorie_goal,
        dietary_preferences: request.dietary_preferences.clone(),
    })
}

fn day_entries(parsed: &Value) -> Option<&Vec<Value>> {
    if let Value::Array(entries) = parsed {
        return Some(entries);
    }

    let object = parsed.as_object()?;
    MEAL_PLAN_WRAPPERS
        .iter()
        .find_map(|wrapper| match object.get(*wrapper) {
            Some(Value::Array(entries)) => Some(entries),
            Some(Value::Object(inner)) => inner.get("days").and_then(Value::as_array),
            _ => None,
        })
}

fn normalize_day(object: &Map<String, Value>, day: usize, stamp: &IdStamp) -> MealPlanDay {
    let meal = |slot: &str| {
        object
            .get(slot)
            .and_then(|value| meal_recipe(value, stamp.meal(slot, day)))
    };

    let snacks = match lookup(object, SNACKS) {
        Some(Value::Array(items)) => items.iter().collect::<Vec<_>>(),
        Some(single) => vec![single],
        None => Vec::new(),
    };
    let snacks = snacks
        .into_iter()
        .filter_map(|value| meal_recipe(value, String::new()))
        .enumerate()
        .map(|(index, mut recipe)| {
            recipe.id = stamp.snack(day, index);
            recipe
        })
        .collect();

    MealPlanDay {
        day: format!("Day {}", day),
        breakfast: meal("breakfast"),
        lunch: meal("lunch"),
        dinner: meal("dinner"),
        snacks,
    }
}

/// A meal is either a recipe object or just its name
fn meal_recipe(value: &Value, id: String) -> Option<Recipe> {
    match value {
        Value::Object(object) => Some(normalize_recipe(object, id, None)),
        Value::String(title) if !title.trim().is_empty() => {
            let mut object = Map::new();
            object.insert("title".to_string(), Value::String(title.clone()));
            Some(normalize_recipe(&object, id, None))
        }
        _ => None,
    }
}
