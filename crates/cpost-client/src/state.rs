//! One event of a parcel's history.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::history_state::{HistoryState, StateClass};

/// A parcel-history event as reported by the carrier.
///
/// Typed accessors cover the fields Czech Post documents; every other field
/// of the raw record is kept in `extra` untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct State {
    id: String,
    #[serde(default)]
    text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    postcode: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    name: Option<String>,
    #[serde(flatten)]
    extra: Map<String, Value>,
}

impl State {
    pub fn new(id: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
            date: None,
            postcode: None,
            name: None,
            extra: Map::new(),
        }
    }

    /// Build a state from one raw record of the `states.state` array.
    ///
    /// Returns `None` when the record is not an object or has no `id`.
    /// Scalar fields are accepted as strings or numbers; `null` counts as
    /// absent.
    pub fn from_record(record: &Value) -> Option<Self> {
        let object = record.as_object()?;
        let id = scalar_to_string(object.get("id")?)?;

        let mut extra = object.clone();
        for key in ["id", "text", "date", "postcode", "name"] {
            extra.remove(key);
        }

        Some(Self {
            id,
            text: object
                .get("text")
                .and_then(scalar_to_string)
                .unwrap_or_default(),
            date: object.get("date").and_then(scalar_to_string),
            postcode: object.get("postcode").and_then(scalar_to_string),
            name: object.get("name").and_then(scalar_to_string),
            extra,
        })
    }

    /// Carrier status code.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Human-readable description; empty when the carrier sent none.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Event date exactly as sent by the carrier.
    pub fn raw_date(&self) -> Option<&str> {
        self.date.as_deref()
    }

    /// Event date, when present and in `YYYY-MM-DD` form.
    pub fn date(&self) -> Option<NaiveDate> {
        let raw = self.date.as_deref()?;
        NaiveDate::parse_from_str(raw.get(..10).unwrap_or(raw), "%Y-%m-%d").ok()
    }

    /// Postcode of the post office that recorded the event.
    pub fn postcode(&self) -> Option<&str> {
        self.postcode.as_deref()
    }

    /// Name of the post office that recorded the event.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Any other field of the raw record.
    pub fn field(&self, key: &str) -> Option<&Value> {
        self.extra.get(key)
    }

    pub fn extra(&self) -> &Map<String, Value> {
        &self.extra
    }

    /// Class of this state's code, `None` if the code is not in the table.
    pub fn class(&self) -> Option<StateClass> {
        HistoryState::classify(&self.id)
    }

    pub fn is_delivered(&self) -> bool {
        HistoryState::is_delivered_successfully(&self.id)
    }
}

/// Render a JSON scalar the way the carrier's string fields are read.
pub(crate) fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn from_record_reads_id_and_text() {
        let state = State::from_record(&json!({"id": "21", "text": "Parcel posted"})).unwrap();
        assert_eq!(state.id(), "21");
        assert_eq!(state.text(), "Parcel posted");
        assert!(state.extra().is_empty());
    }

    #[test]
    fn missing_text_defaults_to_empty() {
        let state = State::from_record(&json!({"id": "91"})).unwrap();
        assert_eq!(state.text(), "");
    }

    #[test]
    fn null_text_defaults_to_empty() {
        let state = State::from_record(&json!({"id": "91", "text": null})).unwrap();
        assert_eq!(state.text(), "");
    }

    #[test]
    fn from_record_keeps_carrier_fields() {
        let state = State::from_record(&json!({
            "id": "82",
            "date": "2024-03-11",
            "text": "Parcel stored at post office",
            "postcode": "11000",
            "name": "Praha 1",
            "timeDeliveryAttempt": "15:00",
            "latitude": 50.08,
        }))
        .unwrap();
        assert_eq!(state.raw_date(), Some("2024-03-11"));
        assert_eq!(state.date(), NaiveDate::from_ymd_opt(2024, 3, 11));
        assert_eq!(state.postcode(), Some("11000"));
        assert_eq!(state.name(), Some("Praha 1"));
        assert_eq!(state.field("timeDeliveryAttempt"), Some(&json!("15:00")));
        assert_eq!(state.field("latitude"), Some(&json!(50.08)));
        assert!(state.field("id").is_none());
    }

    #[test]
    fn date_accepts_timestamp_suffix() {
        let state = State::from_record(&json!({"id": "21", "date": "2024-03-11T08:15:00"})).unwrap();
        assert_eq!(state.date(), NaiveDate::from_ymd_opt(2024, 3, 11));
    }

    #[test]
    fn malformed_date_is_none() {
        let state = State::from_record(&json!({"id": "21", "date": "11.3.2024"})).unwrap();
        assert_eq!(state.raw_date(), Some("11.3.2024"));
        assert!(state.date().is_none());
    }

    #[test]
    fn numeric_id_is_rendered_as_string() {
        let state = State::from_record(&json!({"id": 91, "postcode": 11000})).unwrap();
        assert_eq!(state.id(), "91");
        assert_eq!(state.postcode(), Some("11000"));
        assert!(state.is_delivered());
    }

    #[test]
    fn record_without_id_is_rejected() {
        assert!(State::from_record(&json!({"text": "orphan"})).is_none());
        assert!(State::from_record(&json!({"id": null})).is_none());
    }

    #[test]
    fn non_object_record_is_rejected() {
        assert!(State::from_record(&json!("21")).is_none());
        assert!(State::from_record(&json!([{"id": "21"}])).is_none());
    }

    #[test]
    fn class_follows_history_table() {
        assert_eq!(State::new("21", "").class(), Some(StateClass::Other));
        assert_eq!(State::new("-F", "").class(), Some(StateClass::Error));
        assert_eq!(State::new("nope", "").class(), None);
    }

    #[test]
    fn serde_keeps_extra_fields_flat() {
        let state = State::from_record(&json!({"id": "21", "text": "posted", "custom": 1})).unwrap();
        let json = serde_json::to_value(&state).unwrap();
        assert_eq!(json, json!({"id": "21", "text": "posted", "custom": 1}));
        let back: State = serde_json::from_value(json).unwrap();
        assert_eq!(back, state);
    }
}
