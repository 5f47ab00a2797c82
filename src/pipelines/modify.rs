use crate::error::AssistantError;
use crate::extractors::ExtractTarget;
use crate::fallback;
use crate::model::{Generated, ModifyRequest, Provenance, Recipe};
use crate::normalize::{normalize_modified_recipe, IdStamp};
use crate::pipelines::{run_primary, settle, Trace};
use crate::providers::{modify_prompt, LlmProvider};

/// Rewrite a corpus recipe per the request.
///
/// Unknown ids modify the first corpus recipe. On failure the preference is
/// prefixed to the base title and the servings replaced.
pub async fn generate(
    provider: &dyn LlmProvider,
    request: &ModifyRequest,
) -> Result<Generated<Recipe>, AssistantError> {
    if request.serving_size == Some(0) {
        return Err(AssistantError::InvalidRequest(
            "serving size must be positive".to_string(),
        ));
    }

    let base = fallback::base_recipe(&request.recipe_id);
    let mut trace = Trace::new("modify");
    let prompt = modify_prompt(&base, request);
    let stamp = IdStamp::now(Provenance::Generated);

    let primary = run_primary(&mut trace, provider, &prompt, ExtractTarget::Object, |parsed| {
        normalize_modified_recipe(parsed, &base, request, &stamp)
    })
    .await;

    Ok(settle(trace, primary, || {
        fallback::modified_recipe(&base, request)
    }))
}
