//! JSON event import
//!
//! Accepts either a bare array of events or an object with an `events`
//! array. Values may be given as strings, numbers or booleans; they are
//! normalised to text.

use serde::Deserialize;
use serde_json::Value;

use super::{generate_id, parse_timestamp, Ingested};
use crate::error::{SeriesError, SeriesResult};
use crate::models::{EventValue, TransactionEvent, ValueType};

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawDocument {
    List(Vec<RawEvent>),
    Wrapped { events: Vec<RawEvent> },
}

#[derive(Debug, Deserialize)]
struct RawEvent {
    #[serde(default, alias = "event_uuid")]
    id: Option<String>,
    start: String,
    #[serde(default)]
    values: Vec<RawValue>,
}

#[derive(Debug, Deserialize)]
struct RawValue {
    name: String,
    #[serde(rename = "type", default)]
    value_type: ValueType,
    #[serde(default)]
    value: Value,
}

fn value_text(value: Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s),
        Value::Bool(b) => Some(b.to_string()),
        Value::Number(n) => Some(n.to_string()),
        other => Some(other.to_string()),
    }
}

/// Parse events from a JSON document
pub fn parse_json(contents: &str) -> SeriesResult<Ingested> {
    let document: RawDocument = serde_json::from_str(contents)
        .map_err(|e| SeriesError::Import(format!("Invalid event document: {}", e)))?;

    let raw_events = match document {
        RawDocument::List(events) => events,
        RawDocument::Wrapped { events } => events,
    };

    let mut events = Vec::with_capacity(raw_events.len());
    for (index, raw) in raw_events.into_iter().enumerate() {
        let start = parse_timestamp(&raw.start)
            .map_err(|e| SeriesError::import_at_event(index + 1, e.to_string()))?;

        let values = raw
            .values
            .into_iter()
            .filter_map(|v| {
                value_text(v.value).map(|value| EventValue {
                    name: v.name,
                    value_type: v.value_type,
                    value,
                })
            })
            .collect();

        events.push(TransactionEvent {
            id: raw.id.unwrap_or_else(generate_id),
            start,
            values,
        });
    }

    Ok(Ingested { events, skipped: 0 })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_array() {
        let json = r#"[
            {"id": "e1", "start": "2025-01-01T10:00:00",
             "values": [
                {"name": "amount", "type": "double", "value": 100.5},
                {"name": "balance", "type": "double", "value": "1100.5"},
                {"name": "concept", "value": "Salary"},
                {"name": "group.0", "type": "text", "value": "income"}
             ]},
            {"id": "e2", "start": "2025-01-02"}
        ]"#;

        let ingested = parse_json(json).unwrap();
        assert_eq!(ingested.events.len(), 2);

        let first = &ingested.events[0];
        assert_eq!(first.value("amount"), Some("100.5"));
        assert_eq!(first.value("balance"), Some("1100.5"));
        assert_eq!(first.values[2].value_type, ValueType::Text);
        assert!(ingested.events[1].values.is_empty());
    }

    #[test]
    fn test_parse_wrapped_with_generated_ids() {
        let json = r#"{"events": [
            {"event_uuid": "abc", "start": "2025-01-01"},
            {"start": "2025-01-02", "values": [{"name": "note", "value": null}]}
        ]}"#;

        let ingested = parse_json(json).unwrap();
        assert_eq!(ingested.events[0].id, "abc");
        assert_eq!(ingested.events[1].id.len(), 36);
        assert!(ingested.events[1].values.is_empty());
    }

    #[test]
    fn test_bad_timestamp_reports_position() {
        let json = r#"[{"id": "e1", "start": "2025-01-01"}, {"id": "e2", "start": "soon"}]"#;
        let err = parse_json(json).unwrap_err();
        assert!(err.is_import());
        assert!(err.to_string().contains("event 2"));
    }

    #[test]
    fn test_invalid_document() {
        let err = parse_json(r#"{"rows": []}"#).unwrap_err();
        assert!(err.is_import());
    }
}
