//! Schema type tags.
//!
//! The type column of every row holds one of the JSON Schema primitive type
//! names. Tags are stored as text so that rows built from stale or foreign
//! schemas can carry whatever the schema said; [`ValueType::from_tag`] is the
//! typed view.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// A JSON Schema primitive type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValueType {
    String,
    Number,
    Integer,
    Boolean,
    Array,
    Object,
    Null,
}

impl ValueType {
    /// Parse a schema `"type"` tag. Unknown tags return `None`.
    #[must_use]
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "string" => Some(Self::String),
            "number" => Some(Self::Number),
            "integer" => Some(Self::Integer),
            "boolean" => Some(Self::Boolean),
            "array" => Some(Self::Array),
            "object" => Some(Self::Object),
            "null" => Some(Self::Null),
            _ => None,
        }
    }

    /// The tag as written in schemas and in the type column.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Number => "number",
            Self::Integer => "integer",
            Self::Boolean => "boolean",
            Self::Array => "array",
            Self::Object => "object",
            Self::Null => "null",
        }
    }

    /// Value placed in a freshly generated document when the schema declares
    /// no `default`.
    #[must_use]
    pub fn zero_value(self) -> Value {
        match self {
            Self::String => Value::String(String::new()),
            Self::Number => Value::from(0.0_f64),
            Self::Integer => Value::from(0_i64),
            Self::Boolean => Value::Bool(false),
            Self::Array => Value::Array(Vec::new()),
            Self::Object => Value::Object(serde_json::Map::new()),
            Self::Null => Value::Null,
        }
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("string", ValueType::String)]
    #[case("number", ValueType::Number)]
    #[case("integer", ValueType::Integer)]
    #[case("boolean", ValueType::Boolean)]
    #[case("array", ValueType::Array)]
    #[case("object", ValueType::Object)]
    #[case("null", ValueType::Null)]
    fn tag_roundtrip(#[case] tag: &str, #[case] expected: ValueType) {
        let parsed = ValueType::from_tag(tag).expect("known tag");
        assert_eq!(parsed, expected);
        assert_eq!(parsed.as_str(), tag);
    }

    #[test]
    fn unknown_tag_is_none() {
        assert_eq!(ValueType::from_tag("String"), None);
        assert_eq!(ValueType::from_tag(""), None);
    }

    #[test]
    fn zero_values() {
        assert_eq!(ValueType::Integer.zero_value(), serde_json::json!(0));
        assert_eq!(ValueType::Boolean.zero_value(), serde_json::json!(false));
        assert_eq!(ValueType::String.zero_value(), serde_json::json!(""));
        assert_eq!(ValueType::Array.zero_value(), serde_json::json!([]));
        assert!(ValueType::Number.zero_value().is_f64());
    }
}
