//! Heuristic rewrites that turn near-valid model JSON into valid JSON.
//!
//! [`repair`] runs [`REPAIR_STEPS`] in order. Each step is a pure
//! `&str -> String` function and may rely on the steps before it: quote
//! normalization must run before escaped quotes are collapsed, and
//! concatenation joining only sees double-quoted literals.

use lazy_static::lazy_static;
use regex::Regex;

pub type RepairFn = fn(&str) -> String;

/// The fixed repair order
pub const REPAIR_STEPS: [(&str, RepairFn); 6] = [
    ("trim", trim),
    ("normalize_quotes", normalize_quotes),
    ("strip_trailing_commas", strip_trailing_commas),
    ("collapse_escaped_quotes", collapse_escaped_quotes),
    ("join_concatenated_strings", join_concatenated_strings),
    ("strip_nutrition_units", strip_nutrition_units),
];

lazy_static! {
    static ref TRAILING_COMMA: Regex =
        Regex::new(r",(\s*[\]}])").expect("Trailing comma pattern should be valid");
    static ref QUOTED_NUTRITION: Regex = Regex::new(
        r#""(calories|protein|carbs|fat)"(\s*):\s*"(\d+)(?:\.\d+)?\s*(?:kcal|cal|mg|g)?""#
    )
    .expect("Quoted nutrition pattern should be valid");
    static ref BARE_NUTRITION: Regex = Regex::new(
        r#""(calories|protein|carbs|fat)"(\s*):\s*(\d+)(?:\.\d+)?\s*(?:kcal|cal|mg|g)\b"#
    )
    .expect("Bare nutrition pattern should be valid");
}

/// Apply every repair step in order. Never fails.
pub fn repair(candidate: &str) -> String {
    REPAIR_STEPS
        .iter()
        .fold(candidate.to_string(), |text, (_, step)| step(&text))
}

pub fn trim(text: &str) -> String {
    text.trim().to_string()
}

/// Turn single quotes used as string delimiters into double quotes.
///
/// A quote sitting between two alphanumerics (`don't`, `chef's`) is an
/// apostrophe and is left alone.
pub fn normalize_quotes(text: &str) -> String {
    let chars: Vec<char> = text.chars().collect();
    let mut out = String::with_capacity(text.len());

    for (i, &c) in chars.iter().enumerate() {
        if c != '\'' {
            out.push(c);
            continue;
        }
        let before = i.checked_sub(1).and_then(|j| chars.get(j));
        let after = chars.get(i + 1);
        let is_apostrophe = matches!(
            (before, after),
            (Some(b), Some(a)) if b.is_alphanumeric() && a.is_alphanumeric()
        );
        out.push(if is_apostrophe { '\'' } else { '"' });
    }

    out
}

/// `[1, 2,]` becomes `[1, 2]`
pub fn strip_trailing_commas(text: &str) -> String {
    TRAILING_COMMA.replace_all(text, "$1").into_owned()
}

/// `it\"s` becomes `it's`
pub fn collapse_escaped_quotes(text: &str) -> String {
    text.replace("\\\"", "'")
}

/// `"Cauliflower " + "Rice"` becomes `"Cauliflower Rice"`
///
/// Only a `+` outside any string literal joins; `["a","+","b"]` is untouched.
pub fn join_concatenated_strings(text: &str) -> String {
    let chars: Vec<char> = text.chars().collect();
    let mut out = String::with_capacity(text.len());
    let mut i = 0;

    while i < chars.len() {
        if chars[i] != '"' {
            out.push(chars[i]);
            i += 1;
            continue;
        }

        let Some((mut body, mut end)) = string_literal(&chars, i) else {
            // Unterminated literal: leave the rest for the parser to reject
            out.extend(&chars[i..]);
            break;
        };

        while let Some(next) = concatenated_literal(&chars, end) {
            match string_literal(&chars, next) {
                Some((more, more_end)) => {
                    body.push_str(&more);
                    end = more_end;
                }
                None => break,
            }
        }

        out.push('"');
        out.push_str(&body);
        out.push('"');
        i = end;
    }

    out
}

/// Raw body of the literal opening at `start` and the index past its closing quote
fn string_literal(chars: &[char], start: usize) -> Option<(String, usize)> {
    let mut body = String::new();
    let mut i = start + 1;
    while i < chars.len() {
        match chars[i] {
            '"' => return Some((body, i + 1)),
            '\\' if i + 1 < chars.len() => {
                body.push('\\');
                body.push(chars[i + 1]);
                i += 2;
            }
            c => {
                body.push(c);
                i += 1;
            }
        }
    }
    None
}

/// Index of the next literal's opening quote when `chars[from..]` continues with `+ "`
fn concatenated_literal(chars: &[char], from: usize) -> Option<usize> {
    let skip_ws = |mut i: usize| {
        while i < chars.len() && chars[i].is_whitespace() {
            i += 1;
        }
        i
    };

    let plus = skip_ws(from);
    if chars.get(plus) != Some(&'+') {
        return None;
    }
    let quote = skip_ws(plus + 1);
    (chars.get(quote) == Some(&'"')).then_some(quote)
}

/// `"protein": "5g"` and `"protein": 5g` both become `"protein": 5`
pub fn strip_nutrition_units(text: &str) -> String {
    let unquoted = QUOTED_NUTRITION.replace_all(text, "\"$1\"$2: $3");
    BARE_NUTRITION
        .replace_all(&unquoted, "\"$1\"$2: $3")
        .into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_quotes_become_double() {
        assert_eq!(
            normalize_quotes("{'title': 'Soup'}"),
            r#"{"title": "Soup"}"#
        );
    }

    #[test]
    fn test_apostrophes_survive_quote_normalization() {
        assert_eq!(
            normalize_quotes("{'title': 'Grandma's Soup', 'note': 'don't stir'}"),
            r#"{"title": "Grandma's Soup", "note": "don't stir"}"#
        );
    }

    #[test]
    fn test_trailing_commas() {
        assert_eq!(
            strip_trailing_commas("{\"a\": [1, 2, ],\n}"),
            "{\"a\": [1, 2 ]\n}"
        );
    }

    #[test]
    fn test_escaped_quotes_collapse() {
        assert_eq!(
            collapse_escaped_quotes(r#"{"note": "ensure it\"s vegan"}"#),
            r#"{"note": "ensure it's vegan"}"#
        );
    }

    #[test]
    fn test_concatenation_chain() {
        assert_eq!(
            join_concatenated_strings(r#"{"title": "Cauliflower " + "Fried " + "Rice"}"#),
            r#"{"title": "Cauliflower Fried Rice"}"#
        );
    }

    #[test]
    fn test_nutrition_units_quoted_and_bare() {
        let text = r#"{"calories": "300kcal", "protein": "12g", "carbs": 40g, "fat": 9.5g, "fiber": "3g"}"#;
        assert_eq!(
            strip_nutrition_units(text),
            r#"{"calories": 300, "protein": 12, "carbs": 40, "fat": 9, "fiber": "3g"}"#
        );
    }

    #[test]
    fn test_nutrition_units_only_for_known_fields() {
        let text = r#"{"servings": "4g", "prepTime": "10 minutes"}"#;
        assert_eq!(strip_nutrition_units(text), text);
    }

    #[test]
    fn test_repair_full_pipeline() {
        let candidate = "  [{'title': 'Tofu ' + 'Bowl', 'nutritionalInfo': {'calories': '450g', 'protein': 20g,},},]  ";
        let repaired = repair(candidate);
        let value: serde_json::Value = serde_json::from_str(&repaired).unwrap();
        assert_eq!(value[0]["title"], "Tofu Bowl");
        assert_eq!(value[0]["nutritionalInfo"]["calories"], 450);
        assert_eq!(value[0]["nutritionalInfo"]["protein"], 20);
    }

    #[test]
    fn test_repair_is_identity_on_valid_json() {
        let valid = r#"[{"title":"T","ingredients":["rice","beans"],"nutritionalInfo":{"calories":300,"protein":10}}]"#;
        assert_eq!(repair(valid), valid);
        assert_eq!(repair(&repair(valid)), valid);
    }

    #[test]
    fn test_plus_inside_strings_is_not_concatenation() {
        let valid = r#"{"title":"Calc","tags":["a","+","b"]}"#;
        assert_eq!(repair(valid), valid);
        assert!(serde_json::from_str::<serde_json::Value>(&repair(valid)).is_ok());

        let spaced = r#"{"note": "1 + 1", "ops": ["+", "-"]}"#;
        assert_eq!(join_concatenated_strings(spaced), spaced);
    }

    #[test]
    fn test_concatenation_keeps_escapes() {
        assert_eq!(
            join_concatenated_strings(r#"["a \"b\" " + "c"]"#),
            r#"["a \"b\" c"]"#
        );
    }

    #[test]
    fn test_step_order_is_fixed() {
        let names: Vec<&str> = REPAIR_STEPS.iter().map(|(name, _)| *name).collect();
        assert_eq!(
            names,
            vec![
                "trim",
                "normalize_quotes",
                "strip_trailing_commas",
                "collapse_escaped_quotes",
                "join_concatenated_strings",
                "strip_nutrition_units",
            ]
        );
    }
}
