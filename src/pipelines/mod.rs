//! Two-stage generation: the model path first, the fallback corpus on any
//! failure.
//!
//! A request moves through
//! `Building -> AwaitingModel -> Extracting -> Repairing -> Parsing -> Normalizing -> Done`.
//! A failure in any state from `AwaitingModel` on jumps straight to
//! `FallbackDone`. There is exactly one model call per request and no retry.

pub mod chat;
pub mod meal_plan;
pub mod modify;
pub mod recipes;

use crate::error::PipelineError;
use crate::extractors::{extract_for, ExtractTarget};
use crate::model::Generated;
use crate::providers::LlmProvider;
use crate::repair::repair;
use log::{debug, info, warn};
use serde_json::Value;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Building,
    AwaitingModel,
    Extracting,
    Repairing,
    Parsing,
    Normalizing,
    Done,
    FallbackDone,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Building => "building",
            Stage::AwaitingModel => "awaiting_model",
            Stage::Extracting => "extracting",
            Stage::Repairing => "repairing",
            Stage::Parsing => "parsing",
            Stage::Normalizing => "normalizing",
            Stage::Done => "done",
            Stage::FallbackDone => "fallback_done",
        };
        f.write_str(name)
    }
}

/// Tracks the state of one request for logging
pub(crate) struct Trace {
    use_case: &'static str,
    stage: Stage,
}

impl Trace {
    pub(crate) fn new(use_case: &'static str) -> Self {
        Trace {
            use_case,
            stage: Stage::Building,
        }
    }

    pub(crate) fn advance(&mut self, next: Stage) {
        debug!("{}: {} -> {}", self.use_case, self.stage, next);
        self.stage = next;
    }

    #[cfg(test)]
    pub(crate) fn stage(&self) -> Stage {
        self.stage
    }
}

/// Invoke the model once. Errors and blank completions are both model failures.
pub(crate) async fn call_model(
    provider: &dyn LlmProvider,
    prompt: &str,
) -> Result<String, PipelineError> {
    let text = provider
        .generate_text(prompt)
        .await
        .map_err(|e| PipelineError::Model(e.to_string()))?;

    if text.trim().is_empty() {
        return Err(PipelineError::Model(format!(
            "{} returned no content",
            provider.provider_name()
        )));
    }

    Ok(text)
}

/// Stage A: model call, extraction, repair, parse and normalization.
pub(crate) async fn run_primary<T, F>(
    trace: &mut Trace,
    provider: &dyn LlmProvider,
    prompt: &str,
    target: ExtractTarget,
    normalize: F,
) -> Result<T, PipelineError>
where
    F: FnOnce(&Value) -> Result<T, PipelineError>,
{
    info!(
        "{}: requesting completion from {}",
        trace.use_case,
        provider.provider_name()
    );

    trace.advance(Stage::AwaitingModel);
    let text = call_model(provider, prompt).await?;
    debug!("{}: model response: {}", trace.use_case, text);

    trace.advance(Stage::Extracting);
    let extraction = extract_for(&text, target)?;

    trace.advance(Stage::Repairing);
    let repaired = repair(extraction.candidate);
    debug!("{}: repaired JSON: {}", trace.use_case, repaired);

    trace.advance(Stage::Parsing);
    let parsed: Value = serde_json::from_str(&repaired)?;

    trace.advance(Stage::Normalizing);
    let value = normalize(&parsed)?;

    trace.advance(Stage::Done);
    Ok(value)
}

/// Resolve a request: keep the Stage A result, or run the fallback.
pub(crate) fn settle<T>(
    mut trace: Trace,
    primary: Result<T, PipelineError>,
    fallback: impl FnOnce() -> T,
) -> Generated<T> {
    match primary {
        Ok(value) => {
            info!("{}: generated by model", trace.use_case);
            Generated::generated(value)
        }
        Err(e) => {
            warn!(
                "{}: failed while {} ({}), falling back to built-in data",
                trace.use_case,
                e.stage(),
                e
            );
            trace.advance(Stage::FallbackDone);
            Generated::fallback(fallback())
        }
    }
}
