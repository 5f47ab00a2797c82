use crate::extractors::Extractor;

/// From the first `[` to the last `]`
pub struct ArraySpanExtractor;

/// From the first `{` to the last `}`
pub struct ObjectSpanExtractor;

fn outermost_span(raw: &str, open: char, close: char) -> Option<&str> {
    let start = raw.find(open)?;
    let end = raw.rfind(close)?;
    if end <= start {
        return None;
    }
    Some(&raw[start..=end])
}

impl Extractor for ArraySpanExtractor {
    fn name(&self) -> &'static str {
        "array_span"
    }

    fn find<'a>(&self, raw: &'a str) -> Option<&'a str> {
        outermost_span(raw, '[', ']')
    }
}

impl Extractor for ObjectSpanExtractor {
    fn name(&self) -> &'static str {
        "object_span"
    }

    fn find<'a>(&self, raw: &'a str) -> Option<&'a str> {
        outermost_span(raw, '{', '}')
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_array_span_is_outermost() {
        let raw = "Result: [[1], [2]] trailing";
        assert_eq!(ArraySpanExtractor.find(raw), Some("[[1], [2]]"));
    }

    #[test]
    fn test_object_span_is_outermost() {
        let raw = "{\"a\": {\"b\": 1}} and then }";
        assert_eq!(
            ObjectSpanExtractor.find(raw),
            Some("{\"a\": {\"b\": 1}} and then }")
        );
    }

    #[test]
    fn test_reversed_brackets_do_not_match() {
        assert_eq!(ArraySpanExtractor.find("] nothing ["), None);
        assert_eq!(ObjectSpanExtractor.find("no braces here"), None);
    }
}
