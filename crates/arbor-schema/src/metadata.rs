//! Typed per-key metadata derived from a schema.
//!
//! The map mirrors the schema's property nesting: every declared property is
//! either a [`MetaEntry::Field`] holding its fragment, or a
//! [`MetaEntry::Object`] holding the nested map. Produced once per schema load
//! and only read afterwards.

use std::collections::BTreeMap;

use arbor_core::ValueType;
use serde_json::{Map, Value};

use crate::error::SchemaError;
use crate::walker::{Declared, for_each_property};

/// Metadata of one non-object property.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FieldMeta {
    pub title: String,
    pub type_tag: String,
    pub description: String,
    pub enumeration: Option<Vec<Value>>,
    pub default: Option<Value>,
    /// The property's full schema fragment, attached to tree nodes.
    pub fragment: Map<String, Value>,
}

impl FieldMeta {
    /// Build from a property fragment. Missing `title` and `description`
    /// default to empty text.
    #[must_use]
    pub fn from_fragment(type_tag: &str, fragment: &Map<String, Value>) -> Self {
        let text = |name: &str| {
            fragment
                .get(name)
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string()
        };
        Self {
            title: text("title"),
            type_tag: type_tag.to_string(),
            description: text("description"),
            enumeration: fragment.get("enum").and_then(Value::as_array).cloned(),
            default: fragment.get("default").cloned(),
            fragment: fragment.clone(),
        }
    }

    #[must_use]
    pub fn value_type(&self) -> Option<ValueType> {
        ValueType::from_tag(&self.type_tag)
    }

    /// Declared type of the elements of an array property.
    #[must_use]
    pub fn items_type(&self) -> Option<ValueType> {
        self.fragment
            .get("items")
            .and_then(|items| items.get("type"))
            .and_then(Value::as_str)
            .and_then(ValueType::from_tag)
    }

    /// Enumerated choices of the property itself, or of its array items.
    #[must_use]
    pub fn choices(&self) -> Option<&[Value]> {
        self.enumeration.as_deref().or_else(|| {
            self.fragment
                .get("items")
                .and_then(|items| items.get("enum"))
                .and_then(Value::as_array)
                .map(Vec::as_slice)
        })
    }
}

/// A declared property: a leaf field or a nested object.
#[derive(Debug, Clone, PartialEq)]
pub enum MetaEntry {
    Field(FieldMeta),
    Object(MetadataMap),
}

/// Schema metadata keyed like the schema's `properties`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct MetadataMap {
    entries: BTreeMap<String, MetaEntry>,
}

impl MetadataMap {
    /// Derive the metadata of every declared property of `schema`.
    ///
    /// # Errors
    ///
    /// [`SchemaError::MissingProperties`] when the root declares no
    /// `properties`. Nested objects without `properties` yield an empty map.
    pub fn from_schema(schema: &Value) -> Result<Self, SchemaError> {
        let properties = schema
            .get("properties")
            .and_then(Value::as_object)
            .ok_or(SchemaError::MissingProperties)?;
        Ok(Self::from_properties(properties))
    }

    fn from_properties(properties: &Map<String, Value>) -> Self {
        let mut entries = BTreeMap::new();
        for_each_property(properties, |key, declared| {
            let entry = match declared {
                Declared::Object(nested) => MetaEntry::Object(Self::from_properties(nested)),
                Declared::Field { type_tag, fragment } => {
                    MetaEntry::Field(FieldMeta::from_fragment(type_tag, fragment))
                }
            };
            entries.insert(key.to_string(), entry);
        });
        Self { entries }
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&MetaEntry> {
        self.entries.get(key)
    }

    /// Field metadata under `key`, skipping nested objects.
    #[must_use]
    pub fn field(&self, key: &str) -> Option<&FieldMeta> {
        match self.entries.get(key) {
            Some(MetaEntry::Field(field)) => Some(field),
            _ => None,
        }
    }

    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &MetaEntry)> {
        self.entries.iter().map(|(key, entry)| (key.as_str(), entry))
    }

    pub fn insert(&mut self, key: impl Into<String>, entry: MetaEntry) {
        self.entries.insert(key.into(), entry);
    }
}
