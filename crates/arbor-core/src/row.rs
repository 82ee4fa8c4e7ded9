//! Row model for tree nodes.
//!
//! Every node carries a [`Row`] of [`Cell`]s. Rows are positional: document
//! trees use the five columns of [`Column`], but the tree itself supports
//! inserting and removing columns, so the row stays a sequence of tagged cells
//! rather than a fixed struct. [`Record`] is the typed five-field view used by
//! the converters.

use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::fmt;

use crate::value_type::ValueType;

/// A single typed slot in a row.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Cell {
    #[default]
    Empty,
    Text(String),
    Integer(i64),
    Number(f64),
    Boolean(bool),
}

/// Ordered cells of one node.
pub type Row = Vec<Cell>;

impl Cell {
    /// True for `Empty` and for empty text.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Empty => true,
            Self::Text(text) => text.is_empty(),
            _ => false,
        }
    }

    /// Text rendering of the cell. `Empty` renders as the empty string.
    #[must_use]
    pub fn as_text(&self) -> Cow<'_, str> {
        match self {
            Self::Empty => Cow::Borrowed(""),
            Self::Text(text) => Cow::Borrowed(text),
            Self::Integer(value) => Cow::Owned(value.to_string()),
            Self::Number(value) => Cow::Owned(value.to_string()),
            Self::Boolean(value) => Cow::Owned(value.to_string()),
        }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.as_text())
    }
}

impl From<&str> for Cell {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for Cell {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<i64> for Cell {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<f64> for Cell {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<bool> for Cell {
    fn from(value: bool) -> Self {
        Self::Boolean(value)
    }
}

/// Column positions of a document tree row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Column {
    Key = 0,
    Title = 1,
    Value = 2,
    Type = 3,
    Description = 4,
}

impl Column {
    /// Number of columns in a document tree.
    pub const COUNT: usize = 5;

    pub const ALL: [Self; Self::COUNT] = [
        Self::Key,
        Self::Title,
        Self::Value,
        Self::Type,
        Self::Description,
    ];

    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Header label shown for this column.
    #[must_use]
    pub const fn header(self) -> &'static str {
        match self {
            Self::Key => "Schema Key",
            Self::Title => "Key Title",
            Self::Value => "Value",
            Self::Type => "Type",
            Self::Description => "Description",
        }
    }

    /// Header row for a document tree root.
    #[must_use]
    pub fn header_row() -> Row {
        Self::ALL.iter().map(|column| Cell::from(column.header())).collect()
    }
}

/// Typed view of a five-column document row.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Record {
    pub key: String,
    pub title: String,
    pub value: Cell,
    #[serde(rename = "type")]
    pub type_tag: String,
    pub description: String,
}

impl Record {
    /// A row carrying an actual value.
    #[must_use]
    pub fn leaf(
        key: impl Into<String>,
        title: impl Into<String>,
        value: impl Into<Cell>,
        type_tag: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            key: key.into(),
            title: title.into(),
            value: value.into(),
            type_tag: type_tag.into(),
            description: description.into(),
        }
    }

    /// A row standing for a nested object: no title, value, or description.
    #[must_use]
    pub fn container(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            type_tag: ValueType::Object.as_str().to_string(),
            ..Self::default()
        }
    }

    /// Parsed type tag, if it is a known schema type.
    #[must_use]
    pub fn value_type(&self) -> Option<ValueType> {
        ValueType::from_tag(&self.type_tag)
    }

    /// Read a record back out of a row. Returns `None` when the row is
    /// narrower than the five document columns.
    #[must_use]
    pub fn from_row(row: &[Cell]) -> Option<Self> {
        if row.len() < Column::COUNT {
            return None;
        }
        Some(Self {
            key: row[Column::Key.index()].as_text().into_owned(),
            title: row[Column::Title.index()].as_text().into_owned(),
            value: row[Column::Value.index()].clone(),
            type_tag: row[Column::Type.index()].as_text().into_owned(),
            description: row[Column::Description.index()].as_text().into_owned(),
        })
    }

    #[must_use]
    pub fn into_row(self) -> Row {
        vec![
            Cell::Text(self.key),
            Cell::Text(self.title),
            self.value,
            Cell::Text(self.type_tag),
            Cell::Text(self.description),
        ]
    }
}
