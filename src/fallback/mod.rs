//! Hand-authored recipes served when generation fails.
//!
//! Everything here is pure and in-memory. Returned entities are re-stamped
//! with `fallback-` ids so they can be told apart from model output.

use crate::error::AssistantError;
use crate::model::{MealPlan, MealPlanDay, ModifyRequest, Provenance, Recipe, DEFAULT_IMAGE_URL};
use crate::normalize::{meal_plan_name, IdStamp};
use lazy_static::lazy_static;
use serde::Deserialize;

mod chat;

pub use self::chat::{canned_reply, DEFAULT_GREETING};

/// Calorie goal reported by the fallback plan when the request has none
pub const FALLBACK_CALORIE_GOAL: u32 = 1800;

/// Longest plan a caller may ask for
pub const MAX_MEAL_PLAN_DAYS: u32 = 31;

/// Ingredient terms that rule a recipe out for vegans
pub const NON_VEGAN_TERMS: &[&str] = &["cheese", "milk", "butter", "salmon"];

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Corpus {
    recipes: Vec<Recipe>,
    meal_slots: MealSlots,
}

/// Candidates per meal slot, in preference order
#[derive(Debug, Deserialize)]
struct MealSlots {
    breakfast: Vec<Recipe>,
    lunch: Vec<Recipe>,
    dinner: Vec<Recipe>,
    snacks: Vec<Recipe>,
}

lazy_static! {
    static ref CORPUS: Corpus = serde_json::from_str(include_str!("corpus.json"))
        .expect("Embedded fallback corpus should be valid");
}

fn wants(dietary_preferences: &[String], preference: &str) -> bool {
    dietary_preferences
        .iter()
        .any(|p| p.trim().eq_ignore_ascii_case(preference))
}

/// Whether `recipe` survives the dietary filter.
///
/// Vegetarian drops seafood unless the recipe is also tagged vegetarian;
/// vegan drops anything whose ingredients mention [`NON_VEGAN_TERMS`].
pub fn allows(recipe: &Recipe, dietary_preferences: &[String]) -> bool {
    if wants(dietary_preferences, "Vegetarian")
        && recipe.has_tag("Seafood")
        && !recipe.has_tag("Vegetarian")
    {
        return false;
    }

    if wants(dietary_preferences, "Vegan")
        && NON_VEGAN_TERMS
            .iter()
            .any(|term| recipe.mentions_ingredient(term))
    {
        return false;
    }

    true
}

fn restamp(recipe: &Recipe, id: String) -> Recipe {
    Recipe {
        id,
        image_url: DEFAULT_IMAGE_URL.to_string(),
        ..recipe.clone()
    }
}

/// Corpus recipes compatible with the preferences, freshly stamped
pub fn recipes(dietary_preferences: &[String]) -> Vec<Recipe> {
    let stamp = IdStamp::now(Provenance::Fallback);
    CORPUS
        .recipes
        .iter()
        .filter(|recipe| allows(recipe, dietary_preferences))
        .enumerate()
        .map(|(index, recipe)| restamp(recipe, stamp.recipe(index)))
        .collect()
}

/// A plan of `days` days built from the slot candidates.
///
/// Candidates that pass the dietary filter are rotated across days; if none
/// passes, the first candidate is used so no slot is ever empty.
pub fn meal_plan(
    days: u32,
    calorie_goal: Option<u32>,
    dietary_preferences: &[String],
) -> Result<MealPlan, AssistantError> {
    validate_days(days)?;

    let stamp = IdStamp::now(Provenance::Fallback);
    let slots = &CORPUS.meal_slots;
    let plan_days = (1..=days as usize)
        .map(|day| MealPlanDay {
            day: format!("Day {}", day),
            breakfast: Some(restamp(
                pick(&slots.breakfast, day, dietary_preferences),
                stamp.meal("breakfast", day),
            )),
            lunch: Some(restamp(
                pick(&slots.lunch, day, dietary_preferences),
                stamp.meal("lunch", day),
            )),
            dinner: Some(restamp(
                pick(&slots.dinner, day, dietary_preferences),
                stamp.meal("dinner", day),
            )),
            snacks: vec![restamp(
                pick(&slots.snacks, day, dietary_preferences),
                stamp.snack(day, 0),
            )],
        })
        .collect();

    Ok(MealPlan {
        id: stamp.meal_plan(),
        name: meal_plan_name(days, dietary_preferences),
        days: plan_days,
        calorie_goal: Some(calorie_goal.unwrap_or(FALLBACK_CALORIE_GOAL)),
        dietary_preferences: dietary_preferences.to_vec(),
    })
}

/// A day count must be in `1..=MAX_MEAL_PLAN_DAYS`
pub fn validate_days(days: u32) -> Result<(), AssistantError> {
    if days == 0 || days > MAX_MEAL_PLAN_DAYS {
        return Err(AssistantError::InvalidRequest(format!(
            "days count must be between 1 and {}, got {}",
            MAX_MEAL_PLAN_DAYS, days
        )));
    }
    Ok(())
}

fn pick<'a>(candidates: &'a [Recipe], day: usize, dietary_preferences: &[String]) -> &'a Recipe {
    let allowed: Vec<&Recipe> = candidates
        .iter()
        .filter(|recipe| allows(recipe, dietary_preferences))
        .collect();

    if allowed.is_empty() {
        &candidates[0]
    } else {
        allowed[(day - 1) % allowed.len()]
    }
}

/// Look a corpus recipe up by its catalog id
pub fn find_recipe(id: &str) -> Option<Recipe> {
    CORPUS
        .recipes
        .iter()
        .find(|recipe| recipe.id == id)
        .map(|recipe| restamp(recipe, recipe.id.clone()))
}

/// The recipe a modification starts from: the requested one, else the first
pub fn base_recipe(id: &str) -> Recipe {
    find_recipe(id).unwrap_or_else(|| CORPUS.recipes[0].clone())
}

/// The modification applied without a model: preference prefixed to the
/// title and servings replaced.
pub fn modified_recipe(base: &Recipe, request: &ModifyRequest) -> Recipe {
    let stamp = IdStamp::now(Provenance::Fallback);
    let title = match request.dietary_preference.as_deref().map(str::trim) {
        Some(preference) if !preference.is_empty() => format!("{} {}", preference, base.title),
        _ => base.title.clone(),
    };

    Recipe {
        title,
        servings: request.serving_size.unwrap_or(base.servings),
        ..restamp(base, stamp.modified(&base.id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn prefs(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[test]
    fn test_corpus_loads() {
        assert!(!CORPUS.recipes.is_empty());
        assert!(!CORPUS.meal_slots.breakfast.is_empty());
        assert!(!CORPUS.meal_slots.lunch.is_empty());
        assert!(!CORPUS.meal_slots.dinner.is_empty());
        assert!(!CORPUS.meal_slots.snacks.is_empty());
    }

    #[test]
    fn test_recipes_without_preferences() {
        let all = recipes(&[]);
        assert_eq!(all.len(), CORPUS.recipes.len());
        for (index, recipe) in all.iter().enumerate() {
            assert!(recipe.id.starts_with("fallback-recipe-"));
            assert!(recipe.id.ends_with(&format!("-{}", index + 1)));
            assert_eq!(recipe.image_url, DEFAULT_IMAGE_URL);
        }
    }

    #[test]
    fn test_vegetarian_drops_seafood() {
        let vegetarian = recipes(&prefs(&["vegetarian"]));
        assert!(!vegetarian.is_empty());
        assert!(vegetarian.iter().all(|r| !r.has_tag("Seafood")));
    }

    #[test]
    fn test_vegan_drops_animal_ingredients() {
        let vegan = recipes(&prefs(&["Vegan"]));
        assert!(!vegan.is_empty());
        for recipe in &vegan {
            for term in NON_VEGAN_TERMS {
                assert!(!recipe.mentions_ingredient(term), "{} mentions {}", recipe.title, term);
            }
        }
    }

    #[test]
    fn test_seafood_tagged_vegetarian_is_kept() {
        let recipe: Recipe = serde_json::from_str(
            r#"{"title": "Seaweed Salad", "tags": ["Seafood", "Vegetarian"]}"#,
        )
        .unwrap();
        assert!(allows(&recipe, &prefs(&["Vegetarian"])));
    }

    #[test]
    fn test_meal_plan_shape() {
        let plan = meal_plan(3, None, &[]).unwrap();
        assert_eq!(plan.days.len(), 3);
        assert!(plan.id.starts_with("fallback-meal-plan-"));
        assert_eq!(plan.name, "3-Day Meal Plan");
        assert_eq!(plan.calorie_goal, Some(FALLBACK_CALORIE_GOAL));

        for (index, day) in plan.days.iter().enumerate() {
            assert_eq!(day.day, format!("Day {}", index + 1));
            assert!(day.breakfast.is_some());
            assert!(day.lunch.is_some());
            assert!(day.dinner.is_some());
            assert!(!day.snacks.is_empty());
        }
    }

    #[test]
    fn test_meal_plan_ids_are_unique() {
        let plan = meal_plan(4, Some(2200), &[]).unwrap();
        let mut ids: Vec<String> = plan
            .days
            .iter()
            .flat_map(|day| {
                let mut ids = vec![
                    day.breakfast.as_ref().unwrap().id.clone(),
                    day.lunch.as_ref().unwrap().id.clone(),
                    day.dinner.as_ref().unwrap().id.clone(),
                ];
                ids.extend(day.snacks.iter().map(|s| s.id.clone()));
                ids
            })
            .collect();
        let total = ids.len();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), total);
        assert_eq!(plan.calorie_goal, Some(2200));
    }

    #[test]
    fn test_vegan_meal_plan_respects_filter() {
        let plan = meal_plan(5, None, &prefs(&["Vegan"])).unwrap();
        assert_eq!(plan.name, "5-Day Meal Plan (Vegan)");
        for day in &plan.days {
            let mut meals: Vec<&Recipe> = vec![
                day.breakfast.as_ref().unwrap(),
                day.lunch.as_ref().unwrap(),
                day.dinner.as_ref().unwrap(),
            ];
            meals.extend(day.snacks.iter());
            for meal in meals {
                for term in NON_VEGAN_TERMS {
                    assert!(!meal.mentions_ingredient(term), "{} mentions {}", meal.title, term);
                }
            }
        }
    }

    #[test]
    fn test_zero_days_is_invalid() {
        let result = meal_plan(0, None, &[]);
        assert!(matches!(result, Err(AssistantError::InvalidRequest(_))));
    }

    #[test]
    fn test_day_count_upper_bound() {
        assert!(meal_plan(MAX_MEAL_PLAN_DAYS, None, &[]).is_ok());
        for days in [MAX_MEAL_PLAN_DAYS + 1, u32::MAX] {
            let result = meal_plan(days, None, &[]);
            assert!(matches!(result, Err(AssistantError::InvalidRequest(_))));
        }
    }

    #[test]
    fn test_find_recipe() {
        let recipe = find_recipe("recipe-salmon-003").unwrap();
        assert_eq!(recipe.title, "Honey Soy Glazed Salmon");
        assert_eq!(recipe.image_url, DEFAULT_IMAGE_URL);
        assert!(find_recipe("recipe-missing-999").is_none());
    }

    #[test]
    fn test_base_recipe_defaults_to_first() {
        assert_eq!(base_recipe("unknown").id, "recipe-pasta-001");
        assert_eq!(base_recipe("recipe-salad-002").id, "recipe-salad-002");
    }

    #[test]
    fn test_modified_recipe() {
        let base = base_recipe("recipe-pasta-001");
        let request = ModifyRequest {
            recipe_id: base.id.clone(),
            dietary_preference: Some("Vegan".to_string()),
            serving_size: Some(6),
        };
        let modified = modified_recipe(&base, &request);
        assert_eq!(modified.title, "Vegan Garlic Butter Pasta with Herbs");
        assert_eq!(modified.servings, 6);
        assert!(modified.id.starts_with("fallback-modified-recipe-pasta-001-"));
        assert_eq!(modified.ingredients, base.ingredients);

        let unchanged = modified_recipe(&base, &ModifyRequest::default());
        assert_eq!(unchanged.title, base.title);
        assert_eq!(unchanged.servings, base.servings);
    }
}
