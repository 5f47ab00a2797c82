use crate::error::AssistantError;
use crate::extractors::ExtractTarget;
use crate::fallback;
use crate::model::{Generated, MealPlan, MealPlanRequest, Provenance};
use crate::normalize::{normalize_meal_plan, IdStamp};
use crate::pipelines::{run_primary, Stage, Trace};
use crate::providers::{meal_plan_prompt, LlmProvider};
use log::{info, warn};

/// Generate a meal plan of `days_count` days, or assemble one from the
/// corpus meal slots.
///
/// A day count outside `1..=MAX_MEAL_PLAN_DAYS` is rejected before the
/// model is called.
pub async fn generate(
    provider: &dyn LlmProvider,
    request: &MealPlanRequest,
) -> Result<Generated<MealPlan>, AssistantError> {
    fallback::validate_days(request.days_count)?;

    let mut trace = Trace::new("meal_plan");
    let prompt = meal_plan_prompt(request);
    let stamp = IdStamp::now(Provenance::Generated);

    let primary = run_primary(&mut trace, provider, &prompt, ExtractTarget::Object, |parsed| {
        normalize_meal_plan(parsed, request, &stamp)
    })
    .await;

    match primary {
        Ok(plan) => {
            info!("meal_plan: generated by model");
            Ok(Generated::generated(plan))
        }
        Err(e) => {
            warn!(
                "meal_plan: failed while {} ({}), falling back to built-in data",
                e.stage(),
                e
            );
            trace.advance(Stage::FallbackDone);
            let plan = fallback::meal_plan(
                request.days_count,
                request.calorie_goal,
                &request.dietary_preferences,
            )?;
            Ok(Generated::fallback(plan))
        }
    }
}
