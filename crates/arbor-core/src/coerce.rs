//! Conversions between cell text and typed JSON values.
//!
//! Display direction ([`display_text`]) is lossy on purpose: arrays render as
//! their elements joined by `", "` without brackets. The reverse direction
//! ([`coerce_text`]) reads text according to a row's type tag and fails with a
//! [`CoercionError`] instead of guessing.
//!
//! Array text contract: a childless array row is read back by stripping
//! brackets and surrounding whitespace, splitting on commas, trimming each
//! piece, and dropping empty pieces. Every piece becomes a JSON string.

use serde_json::Value;
use thiserror::Error;

use crate::value_type::ValueType;

/// Text that cannot be read as the type its row declares.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("cannot read '{text}' as {expected}")]
pub struct CoercionError {
    pub text: String,
    pub expected: ValueType,
}

/// Read `text` as a JSON value of `value_type`.
///
/// Empty text is stored as-is (an empty string), except for arrays where it
/// becomes an empty sequence. Unknown type tags (`None`) keep the raw string.
///
/// # Errors
///
/// Returns [`CoercionError`] when non-empty text does not parse as an
/// `integer`, a finite `number`, or a `boolean` (`true`/`false`, any case).
pub fn coerce_text(text: &str, value_type: Option<ValueType>) -> Result<Value, CoercionError> {
    if text.is_empty() {
        return Ok(match value_type {
            Some(ValueType::Array) => Value::Array(Vec::new()),
            _ => Value::String(String::new()),
        });
    }

    let fail = |expected| CoercionError {
        text: text.to_string(),
        expected,
    };

    match value_type {
        Some(ValueType::Integer) => text
            .trim()
            .parse::<i64>()
            .map(Value::from)
            .map_err(|_| fail(ValueType::Integer)),
        Some(ValueType::Number) => text
            .trim()
            .parse::<f64>()
            .ok()
            .and_then(serde_json::Number::from_f64)
            .map(Value::Number)
            .ok_or_else(|| fail(ValueType::Number)),
        Some(ValueType::Boolean) => parse_bool(text)
            .map(Value::Bool)
            .ok_or_else(|| fail(ValueType::Boolean)),
        Some(ValueType::Array) => Ok(Value::Array(parse_array_text(text))),
        _ => Ok(Value::String(text.to_string())),
    }
}

/// Check that `text` would coerce to `value_type` without building the value.
///
/// # Errors
///
/// Same failure cases as [`coerce_text`].
pub fn validate_text(text: &str, value_type: Option<ValueType>) -> Result<(), CoercionError> {
    coerce_text(text, value_type).map(|_| ())
}

fn parse_bool(text: &str) -> Option<bool> {
    let trimmed = text.trim();
    if trimmed.eq_ignore_ascii_case("true") {
        Some(true)
    } else if trimmed.eq_ignore_ascii_case("false") {
        Some(false)
    } else {
        None
    }
}

/// Split array display text back into string elements.
#[must_use]
pub fn parse_array_text(text: &str) -> Vec<Value> {
    text.trim_matches(|c: char| c == '[' || c == ']' || c.is_whitespace())
        .split(',')
        .map(str::trim)
        .filter(|piece| !piece.is_empty())
        .map(|piece| Value::String(piece.to_string()))
        .collect()
}

/// Render a JSON value as cell text.
///
/// Strings render without quotes, `null` renders empty, arrays render as their
/// elements joined by `", "`. Objects (and objects nested in arrays) render as
/// compact JSON.
#[must_use]
pub fn display_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::Bool(flag) => flag.to_string(),
        Value::Number(number) => number.to_string(),
        Value::String(text) => text.clone(),
        Value::Array(items) => items
            .iter()
            .map(|item| match item {
                Value::Array(_) | Value::Object(_) => compact(item),
                other => display_text(other),
            })
            .collect::<Vec<_>>()
            .join(", "),
        Value::Object(_) => compact(value),
    }
}

fn compact(value: &Value) -> String {
    serde_json::to_string(value).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use serde_json::json;

    #[rstest]
    #[case("5", ValueType::Integer, json!(5))]
    #[case(" 42 ", ValueType::Integer, json!(42))]
    #[case("1.5", ValueType::Number, json!(1.5))]
    #[case("3", ValueType::Number, json!(3.0))]
    #[case("true", ValueType::Boolean, json!(true))]
    #[case("False", ValueType::Boolean, json!(false))]
    #[case("hello", ValueType::String, json!("hello"))]
    #[case("[a, b]", ValueType::Array, json!(["a", "b"]))]
    fn coerces_by_type(#[case] text: &str, #[case] value_type: ValueType, #[case] expected: Value) {
        assert_eq!(coerce_text(text, Some(value_type)), Ok(expected));
    }

    #[rstest]
    #[case("abc", ValueType::Integer)]
    #[case("1.5", ValueType::Integer)]
    #[case("x1", ValueType::Number)]
    #[case("NaN", ValueType::Number)]
    #[case("yes", ValueType::Boolean)]
    fn rejects_mismatched_text(#[case] text: &str, #[case] value_type: ValueType) {
        let error = coerce_text(text, Some(value_type)).unwrap_err();
        assert_eq!(error.text, text);
        assert_eq!(error.expected, value_type);
    }

    #[test]
    fn empty_text_is_kept_except_for_arrays() {
        assert_eq!(coerce_text("", Some(ValueType::Integer)), Ok(json!("")));
        assert_eq!(coerce_text("", Some(ValueType::Array)), Ok(json!([])));
        assert_eq!(coerce_text("", None), Ok(json!("")));
    }

    #[test]
    fn unknown_type_keeps_raw_text() {
        assert_eq!(coerce_text("12", None), Ok(json!("12")));
    }

    #[test]
    fn array_text_drops_brackets_and_blanks() {
        assert_eq!(
            parse_array_text(" [ one,two , , three ] "),
            vec![json!("one"), json!("two"), json!("three")]
        );
        assert!(parse_array_text("[]").is_empty());
    }

    #[test]
    fn display_strips_array_brackets() {
        assert_eq!(display_text(&json!(["a", "b", 3])), "a, b, 3");
        assert_eq!(display_text(&json!("plain")), "plain");
        assert_eq!(display_text(&json!(null)), "");
        assert_eq!(display_text(&json!(0)), "0");
        assert_eq!(display_text(&json!({"a": 1})), r#"{"a":1}"#);
    }

    #[test]
    fn array_display_text_reads_back() {
        let original = json!(["x", "y"]);
        let text = display_text(&original);
        assert_eq!(coerce_text(&text, Some(ValueType::Array)), Ok(original));
    }
}
