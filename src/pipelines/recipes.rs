use crate::extractors::ExtractTarget;
use crate::fallback;
use crate::model::{Generated, Provenance, Recipe, RecipeRequest};
use crate::normalize::{normalize_recipes, IdStamp};
use crate::pipelines::{run_primary, settle, Trace};
use crate::providers::{recipe_prompt, LlmProvider};

/// Generate recipes for the request, or serve corpus recipes matching its
/// dietary preferences.
pub async fn generate(
    provider: &dyn LlmProvider,
    request: &RecipeRequest,
    count: usize,
) -> Generated<Vec<Recipe>> {
    let mut trace = Trace::new("recipes");
    let prompt = recipe_prompt(request, count);
    let stamp = IdStamp::now(Provenance::Generated);

    let primary = run_primary(&mut trace, provider, &prompt, ExtractTarget::Array, |parsed| {
        normalize_recipes(parsed, &stamp)
    })
    .await;

    settle(trace, primary, || {
        fallback::recipes(&request.dietary_preferences)
    })
}
