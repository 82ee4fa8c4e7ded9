//! Schema walker.
//!
//! Traverses `properties` declarations recursively. Each property branches on
//! its declared `"type"`: objects recurse into their own `properties`, every
//! other type yields one entry whose content depends on the [`WalkMode`].
//! Properties without a `"type"` are logged and skipped so a partially broken
//! schema still produces output for everything else.

use arbor_core::ValueType;
use serde_json::{Map, Value};

use crate::error::SchemaError;

/// What [`walk`] places at each non-object key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WalkMode {
    /// A blank document: `default` when declared, else the type's zero value.
    /// Arrays are always empty.
    Keys,
    /// The property's full schema fragment, verbatim.
    Meta,
    /// One attribute of the property (`"title"`, `"description"`, ...).
    /// Properties lacking the attribute are skipped.
    Field(String),
}

/// Property classification shared by the walker and [`crate::MetadataMap`].
pub(crate) enum Declared<'a> {
    Object(&'a Map<String, Value>),
    Field {
        type_tag: &'a str,
        fragment: &'a Map<String, Value>,
    },
}

/// Declared type tag of a fragment. Union types (`["string", "null"]`) use
/// their first non-null member.
fn type_tag(fragment: &Map<String, Value>) -> Option<&str> {
    match fragment.get("type")? {
        Value::String(tag) => Some(tag),
        Value::Array(tags) => tags
            .iter()
            .filter_map(Value::as_str)
            .find(|tag| *tag != "null")
            .or_else(|| tags.iter().find_map(Value::as_str)),
        _ => None,
    }
}

/// Visit every well-formed property in declaration order.
pub(crate) fn for_each_property<'a>(
    properties: &'a Map<String, Value>,
    mut visit: impl FnMut(&'a str, Declared<'a>),
) {
    static EMPTY: std::sync::LazyLock<Map<String, Value>> = std::sync::LazyLock::new(Map::new);

    for (key, property) in properties {
        let Some(fragment) = property.as_object() else {
            tracing::error!(key = %key, "skipping property: declaration is not an object");
            continue;
        };
        let Some(tag) = type_tag(fragment) else {
            tracing::error!(
                key = %key,
                "skipping property: missing \"type\" tag, documents may no longer validate"
            );
            continue;
        };
        if tag == ValueType::Object.as_str() {
            let nested = fragment
                .get("properties")
                .and_then(Value::as_object)
                .unwrap_or(&*EMPTY);
            visit(key, Declared::Object(nested));
        } else {
            visit(
                key,
                Declared::Field {
                    type_tag: tag,
                    fragment,
                },
            );
        }
    }
}

/// Walk `schema.properties` and build the structure selected by `mode`.
///
/// Output keys follow the schema's declaration order; nested objects appear as
/// nested maps in every mode.
///
/// # Errors
///
/// [`SchemaError::MissingProperties`] when the root declares no `properties`.
pub fn walk(schema: &Value, mode: &WalkMode) -> Result<Map<String, Value>, SchemaError> {
    let properties = schema
        .get("properties")
        .and_then(Value::as_object)
        .ok_or(SchemaError::MissingProperties)?;
    Ok(walk_properties(properties, mode))
}

fn walk_properties(properties: &Map<String, Value>, mode: &WalkMode) -> Map<String, Value> {
    let mut out = Map::new();
    for_each_property(properties, |key, declared| match declared {
        Declared::Object(nested) => {
            out.insert(key.to_string(), Value::Object(walk_properties(nested, mode)));
        }
        Declared::Field { type_tag, fragment } => {
            if let Some(value) = field_value(key, type_tag, fragment, mode) {
                out.insert(key.to_string(), value);
            }
        }
    });
    out
}

fn field_value(
    key: &str,
    type_tag: &str,
    fragment: &Map<String, Value>,
    mode: &WalkMode,
) -> Option<Value> {
    match mode {
        WalkMode::Keys => {
            let value_type = ValueType::from_tag(type_tag);
            if value_type == Some(ValueType::Array) {
                return Some(Value::Array(Vec::new()));
            }
            if let Some(default) = fragment.get("default") {
                return Some(default.clone());
            }
            Some(value_type.map_or_else(|| Value::String(String::new()), ValueType::zero_value))
        }
        WalkMode::Meta => Some(Value::Object(fragment.clone())),
        WalkMode::Field(attribute) => {
            let found = fragment.get(attribute).cloned();
            if found.is_none() {
                tracing::debug!(key, attribute = %attribute, "property lacks attribute, skipped");
            }
            found
        }
    }
}

/// A new document with every declared property set to its default or zero
/// value.
///
/// # Errors
///
/// Same as [`walk`].
pub fn blank_document(schema: &Value) -> Result<Value, SchemaError> {
    walk(schema, &WalkMode::Keys).map(Value::Object)
}
