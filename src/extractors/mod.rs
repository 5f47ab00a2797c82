//! Locating the JSON-shaped part of a model completion.
//!
//! Models wrap their JSON in prose, markdown fences or both. Each
//! [`Extractor`] recognizes one of those shapes; they are tried in priority
//! order and the first hit wins.

use crate::error::PipelineError;
use log::debug;

mod bracketed;
mod fenced;

pub use self::bracketed::{ArraySpanExtractor, ObjectSpanExtractor};
pub use self::fenced::{FencedBlockExtractor, LabeledFenceExtractor};

pub trait Extractor: Sync {
    fn name(&self) -> &'static str;
    /// Returns the candidate slice, or `None` when this shape is absent
    fn find<'a>(&self, raw: &'a str) -> Option<&'a str>;
}

/// The outer shape the caller expects to parse
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtractTarget {
    /// A JSON array (or an object wrapping one)
    Array,
    /// A single JSON object; bare arrays inside it are never selected
    Object,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Extraction<'a> {
    /// Name of the extractor that matched
    pub pattern: &'static str,
    pub candidate: &'a str,
}

static ARRAY_EXTRACTORS: [&dyn Extractor; 4] = [
    &LabeledFenceExtractor,
    &FencedBlockExtractor,
    &ArraySpanExtractor,
    &ObjectSpanExtractor,
];

static OBJECT_EXTRACTORS: [&dyn Extractor; 3] = [
    &LabeledFenceExtractor,
    &FencedBlockExtractor,
    &ObjectSpanExtractor,
];

impl ExtractTarget {
    fn extractors(&self) -> &'static [&'static dyn Extractor] {
        match self {
            ExtractTarget::Array => &ARRAY_EXTRACTORS,
            ExtractTarget::Object => &OBJECT_EXTRACTORS,
        }
    }
}

/// Run every pattern in priority order and return the first match
pub fn extract(raw: &str) -> Result<Extraction<'_>, PipelineError> {
    extract_for(raw, ExtractTarget::Array)
}

pub fn extract_for(raw: &str, target: ExtractTarget) -> Result<Extraction<'_>, PipelineError> {
    for extractor in target.extractors() {
        if let Some(candidate) = extractor.find(raw) {
            debug!(
                "Extracted {} bytes with {}",
                candidate.len(),
                extractor.name()
            );
            return Ok(Extraction {
                pattern: extractor.name(),
                candidate,
            });
        }
    }

    Err(PipelineError::Extraction)
}
