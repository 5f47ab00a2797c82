use crate::model::{ChatMessage, MealPlanRequest, ModifyRequest, Recipe, RecipeRequest, Role};

/// Formatting rules appended to every structured prompt.
///
/// Loaded from `nutrition_rules.txt` at compile time using the
/// `include_str!` macro, making it easy to edit without dealing with
/// Rust string syntax.
pub const NUTRITION_FORMAT_RULES: &str = include_str!("nutrition_rules.txt");

const ASSISTANT_PERSONA: &str = "You are a helpful culinary assistant that can answer questions about cooking techniques, ingredient substitutions, and general food knowledge. Keep your answers concise and focused on cooking-related topics. Respond to the user's last message.";

fn optional_line(lines: &mut Vec<String>, label: &str, values: &[String]) {
    let values: Vec<&str> = values
        .iter()
        .map(|v| v.trim())
        .filter(|v| !v.is_empty())
        .collect();
    if !values.is_empty() {
        lines.push(format!("{}: {}.", label, values.join(", ")));
    }
}

/// Prompt asking for `count` recipes as a JSON array
pub fn recipe_prompt(request: &RecipeRequest, count: usize) -> String {
    let mut lines = vec![format!(
        "Generate {} recipes using these ingredients: {}.",
        count,
        request.ingredients.join(", ")
    )];
    optional_line(&mut lines, "Dietary preferences", &request.dietary_preferences);
    if let Some(meal_type) = request.meal_type.as_deref().filter(|m| !m.trim().is_empty()) {
        lines.push(format!("Meal type: {}.", meal_type.trim()));
    }
    optional_line(
        &mut lines,
        "Exclude these ingredients",
        &request.exclude_ingredients,
    );

    format!(
        "{}\n\nFor each recipe, include:\n\
         - Title\n\
         - List of ingredients with measurements\n\
         - Step-by-step instructions\n\
         - Nutritional information (calories, protein, carbs, fat)\n\
         - Preparation time\n\
         - Cooking time\n\
         - Number of servings\n\n\
         {}\n\
         Format the response as a JSON array of recipe objects. Ensure the JSON is valid and properly formatted.",
        lines.join("\n"),
        NUTRITION_FORMAT_RULES.trim_end()
    )
}

/// Prompt asking for a JSON object with a `mealPlan` day array
pub fn meal_plan_prompt(request: &MealPlanRequest) -> String {
    let mut lines = vec![format!("Generate a {}-day meal plan.", request.days_count)];
    if let Some(goal) = request.calorie_goal {
        lines.push(format!("Daily calorie goal: {} calories.", goal));
    }
    optional_line(&mut lines, "Dietary preferences", &request.dietary_preferences);
    optional_line(
        &mut lines,
        "Exclude these ingredients",
        &request.exclude_ingredients,
    );

    format!(
        "{}\n\nFor each day, provide:\n\
         1. Breakfast recipe\n\
         2. Lunch recipe\n\
         3. Dinner recipe\n\
         4. Optional snack\n\n\
         For each recipe, include:\n\
         - Title\n\
         - Ingredients list with measurements\n\
         - Brief instructions\n\
         - Nutritional information (calories, protein, carbs, fat)\n\n\
         {}\n\
         Format the response as a JSON object with a 'mealPlan' property containing an array of days. Ensure the JSON is valid and properly formatted.",
        lines.join("\n"),
        NUTRITION_FORMAT_RULES.trim_end()
    )
}

/// Prompt asking for `base` rewritten per the request, as a JSON object
pub fn modify_prompt(base: &Recipe, request: &ModifyRequest) -> String {
    let mut lines = vec![
        "Modify this recipe:".to_string(),
        format!("Title: {}", base.title),
        format!("Ingredients: {}", base.ingredients.join(", ")),
        format!("Instructions: {}", base.instructions.join(" ")),
        String::new(),
    ];
    if let Some(preference) = request
        .dietary_preference
        .as_deref()
        .filter(|p| !p.trim().is_empty())
    {
        lines.push(format!("Make it {}.", preference.trim()));
    }
    if let Some(servings) = request.serving_size {
        lines.push(format!("Adjust for {} servings.", servings));
    }

    format!(
        "{}\n\n{}\n\
         Return the modified recipe as a JSON object with the same structure as the original. Ensure the JSON is valid and properly formatted.",
        lines.join("\n"),
        NUTRITION_FORMAT_RULES.trim_end()
    )
}

/// Prompt replaying the conversation before the latest user message.
///
/// Every message except the final one becomes labeled context; the latest
/// user message is asked last.
pub fn chat_prompt(messages: &[ChatMessage], last_user: &ChatMessage) -> String {
    let mut prompt = String::new();

    if messages.len() > 1 {
        prompt.push_str("Previous conversation:\n");
        for message in &messages[..messages.len() - 1] {
            prompt.push_str(&format!("{}: {}\n", message.role.label(), message.content));
        }
    }

    prompt.push_str(&format!(
        "{}: {}\n{}",
        Role::User.label(),
        last_user.content,
        ASSISTANT_PERSONA
    ));
    prompt
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rules_are_embedded() {
        assert!(!NUTRITION_FORMAT_RULES.is_empty());
        assert!(NUTRITION_FORMAT_RULES.contains("WITHOUT any units"));
    }

    #[test]
    fn test_recipe_prompt_optional_lines() {
        let request = RecipeRequest {
            ingredients: vec!["rice".to_string(), "beans".to_string()],
            dietary_preferences: vec!["Vegan".to_string()],
            meal_type: Some("Dinner".to_string()),
            exclude_ingredients: vec![],
        };
        let prompt = recipe_prompt(&request, 3);

        assert!(prompt.starts_with("Generate 3 recipes using these ingredients: rice, beans."));
        assert!(prompt.contains("Dietary preferences: Vegan."));
        assert!(prompt.contains("Meal type: Dinner."));
        assert!(!prompt.contains("Exclude these ingredients"));
        assert!(prompt.contains("JSON array of recipe objects"));
        assert!(prompt.contains(NUTRITION_FORMAT_RULES.trim_end()));
    }

    #[test]
    fn test_meal_plan_prompt() {
        let request = MealPlanRequest {
            days_count: 5,
            calorie_goal: Some(1800),
            dietary_preferences: vec![],
            exclude_ingredients: vec!["peanuts".to_string()],
        };
        let prompt = meal_plan_prompt(&request);

        assert!(prompt.starts_with("Generate a 5-day meal plan."));
        assert!(prompt.contains("Daily calorie goal: 1800 calories."));
        assert!(!prompt.contains("Dietary preferences"));
        assert!(prompt.contains("Exclude these ingredients: peanuts."));
        assert!(prompt.contains("'mealPlan' property"));
    }

    #[test]
    fn test_modify_prompt() {
        let base: Recipe = serde_json::from_str(
            r#"{"title": "Pasta", "ingredients": ["pasta", "butter"], "instructions": ["Boil.", "Toss."]}"#,
        )
        .unwrap();
        let request = ModifyRequest {
            recipe_id: "recipe-pasta-001".to_string(),
            dietary_preference: Some("Vegan".to_string()),
            serving_size: Some(6),
        };
        let prompt = modify_prompt(&base, &request);

        assert!(prompt.contains("Title: Pasta"));
        assert!(prompt.contains("Ingredients: pasta, butter"));
        assert!(prompt.contains("Instructions: Boil. Toss."));
        assert!(prompt.contains("Make it Vegan."));
        assert!(prompt.contains("Adjust for 6 servings."));
    }

    #[test]
    fn test_chat_prompt_with_history() {
        let messages = vec![
            ChatMessage::user("How do I roast garlic?"),
            ChatMessage::assistant("Wrap it in foil and bake."),
            ChatMessage::user("For how long?"),
        ];
        let prompt = chat_prompt(&messages, &messages[2]);

        assert!(prompt.starts_with(
            "Previous conversation:\nUser: How do I roast garlic?\nAssistant: Wrap it in foil and bake.\nUser: For how long?\n"
        ));
        assert!(prompt.ends_with(ASSISTANT_PERSONA));
    }

    #[test]
    fn test_chat_prompt_single_message() {
        let messages = vec![ChatMessage::user("Hi")];
        let prompt = chat_prompt(&messages, &messages[0]);
        assert_eq!(prompt, format!("User: Hi\n{}", ASSISTANT_PERSONA));
    }
}
