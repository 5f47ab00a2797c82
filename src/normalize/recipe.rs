use crate::error::PipelineError;
use crate::model::{
    ModifyRequest, NutritionalInfo, Recipe, DEFAULT_DIFFICULTY, DEFAULT_DURATION,
    DEFAULT_IMAGE_URL, DEFAULT_SERVINGS,
};
use crate::normalize::{
    coerce_count, lookup, text, IdStamp, COOK_TIME, DESCRIPTION, DIFFICULTY, IMAGE_URL,
    INGREDIENTS, INSTRUCTIONS, NUTRITION, PREP_TIME, RECIPE_LIST_WRAPPERS, RECIPE_WRAPPERS,
    SERVINGS, TAGS, TITLE,
};
use log::{debug, warn};
use serde_json::{Map, Value};

const UNTITLED: &str = "Untitled Recipe";

/// Normalize a parsed recipe-list response.
///
/// Accepts a bare array, an object wrapping the array under one of
/// [`RECIPE_LIST_WRAPPERS`], or a single recipe-shaped object. Items that
/// are not objects are skipped; an empty result is a schema error.
pub fn normalize_recipes(parsed: &Value, stamp: &IdStamp) -> Result<Vec<Recipe>, PipelineError> {
    let items = recipe_items(parsed).ok_or_else(|| {
        PipelineError::Schema("expected a recipe array or a `recipes` wrapper".to_string())
    })?;

    let recipes: Vec<Recipe> = items
        .iter()
        .filter_map(|item| match item.as_object() {
            Some(object) => Some(object),
            None => {
                warn!("Skipping non-object recipe entry: {}", item);
                None
            }
        })
        .enumerate()
        .map(|(index, object)| normalize_recipe(object, stamp.recipe(index), None))
        .collect();

    if recipes.is_empty() {
        return Err(PipelineError::Schema(
            "response contained no recipes".to_string(),
        ));
    }

    debug!("Normalized {} recipes", recipes.len());
    Ok(recipes)
}

fn recipe_items(parsed: &Value) -> Option<Vec<Value>> {
    if let Value::Array(items) = parsed {
        return Some(items.clone());
    }

    let object = parsed.as_object()?;
    for wrapper in RECIPE_LIST_WRAPPERS {
        match object.get(*wrapper) {
            Some(Value::Array(items)) => return Some(items.clone()),
            Some(Value::Object(single)) => return Some(vec![Value::Object(single.clone())]),
            _ => {}
        }
    }

    // A lone recipe object
    lookup(object, TITLE).map(|_| vec![parsed.clone()])
}

/// Map one recipe object onto the canonical [`Recipe`].
///
/// With a `base`, absent fields are taken from it instead of the schema
/// defaults.
pub fn normalize_recipe(object: &Map<String, Value>, id: String, base: Option<&Recipe>) -> Recipe {
    let title = lookup(object, TITLE)
        .and_then(text)
        .or_else(|| base.map(|b| b.title.clone()))
        .unwrap_or_else(|| UNTITLED.to_string());

    let description = lookup(object, DESCRIPTION)
        .and_then(text)
        .or_else(|| base.and_then(|b| b.description.clone()));

    let ingredients = lookup(object, INGREDIENTS)
        .map(ingredient_lines)
        .filter(|lines| !lines.is_empty())
        .or_else(|| base.map(|b| b.ingredients.clone()))
        .unwrap_or_default();

    let instructions = lookup(object, INSTRUCTIONS)
        .map(instruction_lines)
        .filter(|lines| !lines.is_empty())
        .or_else(|| base.map(|b| b.instructions.clone()))
        .unwrap_or_default();

    let nutritional_info = match lookup(object, NUTRITION) {
        Some(value) => Some(nutrition(value)),
        None => base
            .and_then(|b| b.nutritional_info)
            .or(Some(NutritionalInfo::default())),
    };

    let prep_time = lookup(object, PREP_TIME)
        .and_then(duration)
        .or_else(|| base.map(|b| b.prep_time.clone()))
        .unwrap_or_else(|| DEFAULT_DURATION.to_string());

    let cook_time = lookup(object, COOK_TIME)
        .and_then(duration)
        .or_else(|| base.map(|b| b.cook_time.clone()))
        .unwrap_or_else(|| DEFAULT_DURATION.to_string());

    let servings = servings(object)
        .or_else(|| base.map(|b| b.servings))
        .unwrap_or(DEFAULT_SERVINGS);

    let difficulty = lookup(object, DIFFICULTY)
        .and_then(text)
        .or_else(|| base.map(|b| b.difficulty.clone()))
        .unwrap_or_else(|| DEFAULT_DIFFICULTY.to_string());

    let tags = lookup(object, TAGS)
        .map(tag_set)
        .or_else(|| base.map(|b| b.tags.clone()))
        .unwrap_or_default();

    let image_url = lookup(object, IMAGE_URL)
        .and_then(Value::as_str)
        .map(|s| s.trim().to_string())
        .unwrap_or_else(|| DEFAULT_IMAGE_URL.to_string());

    Recipe {
        id,
        title,
        description,
        ingredients,
        instructions,
        nutritional_info,
        prep_time,
        cook_time,
        servings,
        difficulty,
        tags,
        image_url,
    }
}

/// Normalize a parsed modification response against the recipe it modifies.
///
/// Servings come from the response, else the requested serving size, else
/// the base recipe.
pub fn normalize_modified_recipe(
    parsed: &Value,
    base: &Recipe,
    request: &ModifyRequest,
    stamp: &IdStamp,
) -> Result<Recipe, PipelineError> {
    let object = modified_object(parsed).ok_or_else(|| {
        PipelineError::Schema("expected a recipe object or a `recipe` wrapper".to_string())
    })?;

    let mut recipe = normalize_recipe(object, stamp.modified(&base.id), Some(base));
    if servings(object).is_none() {
        if let Some(requested) = request.serving_size {
            recipe.servings = requested;
        }
    }

    Ok(recipe)
}

fn modified_object(parsed: &Value) -> Option<&Map<String, Value>> {
    match parsed {
        Value::Object(object) => {
            let wrapped = RECIPE_WRAPPERS
                .iter()
                .find_map(|wrapper| object.get(*wrapper).and_then(Value::as_object));
            Some(wrapped.unwrap_or(object))
        }
        Value::Array(items) => items.first().and_then(Value::as_object),
        _ => None,
    }
}

fn nutrition(value: &Value) -> NutritionalInfo {
    let Some(object) = value.as_object() else {
        return NutritionalInfo::default();
    };

    NutritionalInfo {
        calories: coerce_count(object.get("calories")),
        protein: coerce_count(object.get("protein")),
        carbs: coerce_count(object.get("carbs")),
        fat: coerce_count(object.get("fat")),
        fiber: object.get("fiber").map(|v| coerce_count(Some(v))),
        sugar: object.get("sugar").map(|v| coerce_count(Some(v))),
    }
}

fn servings(object: &Map<String, Value>) -> Option<u32> {
    lookup(object, SERVINGS)
        .map(|value| coerce_count(Some(value)))
        .filter(|&n| n > 0)
}

fn duration(value: &Value) -> Option<String> {
    match value {
        Value::Number(n) => Some(format!("{} minutes", n)),
        other => text(other),
    }
}

fn ingredient_lines(value: &Value) -> Vec<String> {
    match value {
        Value::Array(items) => items.iter().filter_map(ingredient_line).collect(),
        Value::String(s) => split_lines(s),
        _ => Vec::new(),
    }
}

/// `{"quantity": "2", "unit": "cups", "name": "rice"}` becomes `2 cups rice`
fn ingredient_line(item: &Value) -> Option<String> {
    match item {
        Value::Object(object) => {
            let parts: Vec<String> = [
                &["quantity", "amount"][..],
                &["unit"][..],
                &["name", "item", "ingredient"][..],
            ]
            .iter()
            .filter_map(|aliases| lookup(object, aliases).and_then(text))
            .collect();
            Some(parts.join(" ")).filter(|line| !line.is_empty())
        }
        other => text(other),
    }
}

fn instruction_lines(value: &Value) -> Vec<String> {
    match value {
        Value::Array(items) => items
            .iter()
            .filter_map(|item| match item {
                Value::Object(object) => {
                    lookup(object, &["text", "step", "description", "instruction"])
                        .and_then(text)
                }
                other => text(other),
            })
            .collect(),
        Value::String(s) => split_lines(s),
        _ => Vec::new(),
    }
}

fn tag_set(value: &Value) -> Vec<String> {
    let raw: Vec<String> = match value {
        Value::Array(items) => items.iter().filter_map(text).collect(),
        Value::String(s) => s.split(',').map(|t| t.trim().to_string()).collect(),
        _ => Vec::new(),
    };

    let mut tags: Vec<String> = Vec::with_capacity(raw.len());
    for tag in raw {
        if !tag.is_empty() && !tags.iter().any(|t| t.eq_ignore_ascii_case(&tag)) {
            tags.push(tag);
        }
    }
    tags
}

fn split_lines(s: &str) -> Vec<String> {
    s.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(String::from)
        .collect()
}
