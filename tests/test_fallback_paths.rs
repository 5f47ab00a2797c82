use async_trait::async_trait;
use kitchen_assistant::fallback::{self, NON_VEGAN_TERMS};
use kitchen_assistant::{
    AssistantError, ChatMessage, KitchenAssistant, LlmProvider, MealPlanRequest, ModifyRequest,
    Provenance, RecipeRequest,
};
use std::error::Error;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// Replies with a fixed text, or fails, and counts invocations
struct StubProvider {
    reply: Option<&'static str>,
    calls: AtomicUsize,
}

impl StubProvider {
    fn replying(reply: &'static str) -> Arc<Self> {
        Arc::new(StubProvider {
            reply: Some(reply),
            calls: AtomicUsize::new(0),
        })
    }

    fn failing() -> Arc<Self> {
        Arc::new(StubProvider {
            reply: None,
            calls: AtomicUsize::new(0),
        })
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl LlmProvider for StubProvider {
    fn provider_name(&self) -> &str {
        "stub"
    }

    async fn generate_text(&self, _prompt: &str) -> Result<String, Box<dyn Error + Send + Sync>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match self.reply {
            Some(reply) => Ok(reply.to_string()),
            None => Err("rate limit exceeded".into()),
        }
    }
}

fn recipe_request(prefs: &[&str]) -> RecipeRequest {
    RecipeRequest {
        ingredients: vec!["chickpeas".to_string(), "rice".to_string()],
        dietary_preferences: prefs.iter().map(|p| p.to_string()).collect(),
        ..Default::default()
    }
}

#[tokio::test]
async fn test_recipes_fall_back_when_model_fails() {
    let stub = StubProvider::failing();
    let assistant = KitchenAssistant::new(stub.clone());

    let result = assistant.generate_recipes(&recipe_request(&[])).await;

    assert_eq!(result.provenance, Provenance::Fallback);
    assert!(!result.value.is_empty());
    assert_eq!(stub.calls(), 1);
}

#[tokio::test]
async fn test_recipes_fall_back_when_output_has_no_brackets() {
    let stub = StubProvider::replying("Sorry, I can't help with recipes today.");
    let assistant = KitchenAssistant::new(stub.clone());

    let result = assistant.generate_recipes(&recipe_request(&[])).await;

    assert!(result.is_fallback());
    assert!(!result.value.is_empty());
    assert_eq!(stub.calls(), 1);
}

#[tokio::test]
async fn test_recipes_fall_back_when_repair_cannot_fix_json() {
    let stub = StubProvider::replying(r#"[{"title": "Soup", "ingredients": [}]"#);
    let assistant = KitchenAssistant::new(stub.clone());

    let result = assistant.generate_recipes(&recipe_request(&[])).await;

    assert!(result.is_fallback());
    assert!(!result.value.is_empty());
    assert_eq!(stub.calls(), 1);
}

#[tokio::test]
async fn test_vegan_fallback_excludes_animal_products() {
    let assistant = KitchenAssistant::new(StubProvider::failing());

    let result = assistant.generate_recipes(&recipe_request(&["Vegan"])).await;
    assert!(result.is_fallback());
    for recipe in &result.value {
        for term in NON_VEGAN_TERMS {
            assert!(
                !recipe.mentions_ingredient(term),
                "{} mentions {}",
                recipe.title,
                term
            );
        }
    }

    let request = MealPlanRequest {
        days_count: 4,
        dietary_preferences: vec!["Vegan".to_string()],
        ..Default::default()
    };
    let plan = assistant.generate_meal_plan(&request).await.unwrap().value;
    for day in &plan.days {
        let meals = [
            day.breakfast.as_ref(),
            day.lunch.as_ref(),
            day.dinner.as_ref(),
        ];
        for recipe in meals.into_iter().flatten().chain(day.snacks.iter()) {
            for term in NON_VEGAN_TERMS {
                assert!(!recipe.mentions_ingredient(term));
            }
        }
    }
}

#[tokio::test]
async fn test_three_day_fallback_meal_plan_is_complete() {
    let assistant = KitchenAssistant::new(StubProvider::failing());
    let request = MealPlanRequest {
        days_count: 3,
        ..Default::default()
    };

    let result = assistant.generate_meal_plan(&request).await.unwrap();

    assert!(result.is_fallback());
    let plan = result.value;
    assert_eq!(plan.days.len(), 3);
    assert_eq!(plan.name, "3-Day Meal Plan");
    assert_eq!(plan.calorie_goal, Some(fallback::FALLBACK_CALORIE_GOAL));
    assert!(plan.id.starts_with("fallback-meal-plan-"));
    for (index, day) in plan.days.iter().enumerate() {
        assert_eq!(day.day, format!("Day {}", index + 1));
        assert!(day.breakfast.is_some());
        assert!(day.lunch.is_some());
        assert!(day.dinner.is_some());
        assert!(!day.snacks.is_empty());
    }
}

#[tokio::test]
async fn test_zero_day_meal_plan_is_invalid() {
    let stub = StubProvider::failing();
    let assistant = KitchenAssistant::new(stub.clone());
    let request = MealPlanRequest::default();

    let result = assistant.generate_meal_plan(&request).await;

    assert!(matches!(result, Err(AssistantError::InvalidRequest(_))));
    assert_eq!(stub.calls(), 0);
}

#[tokio::test]
async fn test_modify_unknown_recipe_uses_first_corpus_recipe() {
    let assistant = KitchenAssistant::new(StubProvider::failing());
    let request = ModifyRequest {
        recipe_id: "recipe-unknown-999".to_string(),
        dietary_preference: Some("Gluten-Free".to_string()),
        serving_size: Some(2),
    };

    let recipe = assistant.modify_recipe(&request).await.unwrap().value;

    assert!(recipe.title.starts_with("Gluten-Free "));
    assert_eq!(recipe.servings, 2);
    assert!(recipe.id.starts_with("fallback-modified-recipe-pasta-001-"));
}

#[tokio::test]
async fn test_chat_falls_back_to_keyword_reply() {
    let stub = StubProvider::failing();
    let assistant = KitchenAssistant::new(stub.clone());
    let messages = vec![
        ChatMessage::user("Hi"),
        ChatMessage::assistant("Hello! What are we cooking?"),
        ChatMessage::user("What technique gives a good sear?"),
    ];

    let reply = assistant.chat_with_assistant(&messages).await;

    assert!(reply.is_fallback());
    assert!(reply.value.contains("sear"));
    assert_eq!(stub.calls(), 1);
}

#[tokio::test]
async fn test_chat_redirects_off_topic_questions() {
    let assistant = KitchenAssistant::new(StubProvider::failing());
    let messages = vec![ChatMessage::user("Who won the match yesterday?")];

    let reply = assistant.chat_with_assistant(&messages).await;

    assert!(reply.is_fallback());
    assert!(reply.value.contains("Could you ask about recipes"));
}
