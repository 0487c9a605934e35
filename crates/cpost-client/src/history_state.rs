//! Czech Post parcel-history state codes.
//!
//! The carrier reports every event in a parcel's history with a short status
//! code (`"21"`, `"91"`, `"-F"`, ...). This module is the single table that
//! gives those codes meaning. Call sites never compare codes directly; they
//! ask the table.
//!
//! | Class | Meaning |
//! |-------|---------|
//! | `DeliveredSuccessfully` | Final state, the parcel reached its recipient |
//! | `Error` | The carrier could not track the parcel at all |
//! | `Other` | Any other recognised event on the way |
//!
//! Adding a carrier code means adding a row to [`KNOWN_STATES`].

use serde::{Deserialize, Serialize};
use std::fmt;

/// Classification tag of a known carrier status code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StateClass {
    /// The parcel was handed over to its recipient.
    DeliveredSuccessfully,
    /// The carrier reports a tracking failure instead of an event.
    Error,
    /// A known, non-final event.
    Other,
}

impl fmt::Display for StateClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DeliveredSuccessfully => write!(f, "delivered-successfully"),
            Self::Error => write!(f, "error"),
            Self::Other => write!(f, "known-other"),
        }
    }
}

/// Carrier status codes recognised by this client, with their class.
const KNOWN_STATES: &[(&str, StateClass)] = &[
    // Tracking failures reported in place of a history.
    ("-F", StateClass::Error),
    ("-B", StateClass::Error),
    ("-I", StateClass::Error),
    // Electronic pre-advice received, parcel not yet handed over.
    ("-3", StateClass::Other),
    ("-1", StateClass::Other),
    // Acceptance and transport. The symbolic code is the B2C event name for
    // an accepted item, sent instead of "21" by some endpoints.
    ("21", StateClass::Other),
    ("EVENT_ITEM_DEPOSITED", StateClass::Other),
    ("22", StateClass::Other),
    ("41", StateClass::Other),
    ("42", StateClass::Other),
    ("43", StateClass::Other),
    ("44", StateClass::Other),
    ("51", StateClass::Other),
    ("52", StateClass::Other),
    ("53", StateClass::Other),
    // Delivery attempts and storage at a post office.
    ("81", StateClass::Other),
    ("82", StateClass::Other),
    ("83", StateClass::Other),
    ("84", StateClass::Other),
    // Returned to sender or handed to a foreign carrier.
    ("95", StateClass::Other),
    ("96", StateClass::Other),
    // Delivery.
    ("91", StateClass::DeliveredSuccessfully),
    ("92", StateClass::DeliveredSuccessfully),
    ("93", StateClass::DeliveredSuccessfully),
];

/// Namespace for lookups against the known-state table.
#[derive(Debug, Clone, Copy)]
pub struct HistoryState;

impl HistoryState {
    /// Classify a carrier status code. `None` for codes outside the table.
    pub fn classify(code: &str) -> Option<StateClass> {
        KNOWN_STATES
            .iter()
            .find(|(known, _)| *known == code)
            .map(|(_, class)| *class)
    }

    /// Whether `code` is a recognised carrier status code.
    pub fn is_known_state(code: &str) -> bool {
        Self::classify(code).is_some()
    }

    /// Whether `code` is a carrier-reported tracking error.
    ///
    /// Meant to be asked only about known codes; unknown codes yield `false`.
    pub fn is_error_state(code: &str) -> bool {
        Self::classify(code) == Some(StateClass::Error)
    }

    /// Whether `code` marks a successful delivery.
    ///
    /// Meant to be asked only about known codes; unknown codes yield `false`.
    pub fn is_delivered_successfully(code: &str) -> bool {
        Self::classify(code) == Some(StateClass::DeliveredSuccessfully)
    }

    /// All known codes, in table order.
    pub fn known_codes() -> impl Iterator<Item = &'static str> {
        KNOWN_STATES.iter().map(|(code, _)| *code)
    }
}
