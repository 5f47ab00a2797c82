use crate::extractors::Extractor;
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref LABELED_FENCE: Regex = Regex::new(r"(?is)```json[ \t]*\r?\n(.*?)\r?\n[ \t]*```")
        .expect("Labeled fence pattern should be valid");
    static ref ANY_FENCE: Regex = Regex::new(r"(?s)```[ \t]*\r?\n(.*?)\r?\n[ \t]*```")
        .expect("Fence pattern should be valid");
}

/// A markdown fence labeled `json`
pub struct LabeledFenceExtractor;

/// A markdown fence with no language label
pub struct FencedBlockExtractor;

fn first_capture<'a>(pattern: &Regex, raw: &'a str) -> Option<&'a str> {
    pattern
        .captures(raw)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
        .filter(|body| !body.trim().is_empty())
}

impl Extractor for LabeledFenceExtractor {
    fn name(&self) -> &'static str {
        "labeled_fence"
    }

    fn find<'a>(&self, raw: &'a str) -> Option<&'a str> {
        first_capture(&LABELED_FENCE, raw)
    }
}

impl Extractor for FencedBlockExtractor {
    fn name(&self) -> &'static str {
        "fenced_block"
    }

    fn find<'a>(&self, raw: &'a str) -> Option<&'a str> {
        first_capture(&ANY_FENCE, raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_labeled_fence() {
        let raw = "Here are your recipes:\n```json\n[{\"title\": \"T\"}]\n```\nEnjoy!";
        assert_eq!(
            LabeledFenceExtractor.find(raw),
            Some("[{\"title\": \"T\"}]")
        );
    }

    #[test]
    fn test_labeled_fence_uppercase_and_crlf() {
        let raw = "```JSON\r\n{\"a\": 1}\r\n```";
        assert_eq!(LabeledFenceExtractor.find(raw), Some("{\"a\": 1}"));
    }

    #[test]
    fn test_first_fence_wins() {
        let raw = "```json\n{\"first\": true}\n```\n\n```json\n{\"second\": true}\n```";
        assert_eq!(
            LabeledFenceExtractor.find(raw),
            Some("{\"first\": true}")
        );
    }

    #[test]
    fn test_unlabeled_fence_ignores_other_languages() {
        assert_eq!(FencedBlockExtractor.find("```python\nprint(1)\n```"), None);
        assert_eq!(
            FencedBlockExtractor.find("```\n{\"a\": 1}\n```"),
            Some("{\"a\": 1}")
        );
    }

    #[test]
    fn test_empty_fence_is_not_a_match() {
        assert_eq!(LabeledFenceExtractor.find("```json\n  \n```"), None);
    }
}
