//! Transaction event model
//!
//! A transaction event is an immutable record supplied by an external event
//! store: a start timestamp, a unique identifier, and an unordered set of
//! named values. Values are kept as text together with their declared type;
//! numeric interpretation happens during extraction.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Declared type of an event value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ValueType {
    #[default]
    Text,
    Double,
    Boolean,
    Timestamp,
}

/// A single named value attached to an event
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventValue {
    /// Value name, e.g. "amount" or "group.0"
    pub name: String,

    /// Declared value type
    #[serde(rename = "type", default)]
    pub value_type: ValueType,

    /// Raw textual value
    pub value: String,
}

impl EventValue {
    /// Create a text value
    pub fn text(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value_type: ValueType::Text,
            value: value.into(),
        }
    }

    /// Create a double value
    pub fn double(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value_type: ValueType::Double,
            value: value.into(),
        }
    }
}

/// A recorded transaction event
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionEvent {
    /// Unique identifier
    pub id: String,

    /// When the transaction happened
    pub start: NaiveDateTime,

    /// Named values (amount, balance, concept, tags)
    #[serde(default)]
    pub values: Vec<EventValue>,
}

impl TransactionEvent {
    /// Create an event with no values
    pub fn new(id: impl Into<String>, start: NaiveDateTime) -> Self {
        Self {
            id: id.into(),
            start,
            values: Vec::new(),
        }
    }

    /// Add a value (builder style)
    pub fn with_value(mut self, value: EventValue) -> Self {
        self.values.push(value);
        self
    }

    /// Get the first value with exactly this name
    pub fn value(&self, name: &str) -> Option<&str> {
        self.values
            .iter()
            .find(|v| v.name == name)
            .map(|v| v.value.as_str())
    }

    /// Get every value whose name equals `name` or starts with `prefix`
    ///
    /// Values are returned in the order they are stored on the event.
    pub fn tag_values<'a, 'b>(&'a self, name: &'b str, prefix: &'b str) -> impl Iterator<Item = &'a str> + 'b
    where
        'a: 'b,
    {
        self.values
            .iter()
            .filter(move |v| v.name == name || (!prefix.is_empty() && v.name.starts_with(prefix)))
            .map(|v| v.value.as_str())
    }

    /// Check whether the event carries a tag with this value
    pub fn has_tag(&self, name: &str, prefix: &str, tag: &str) -> bool {
        self.tag_values(name, prefix).any(|v| v == tag)
    }
}
