//! Parcel-history interpretation.
//!
//! [`ParcelHistoryRequestor`] turns the carrier's raw history payload into an
//! ordered list of [`State`]s and answers "what is the current state" and
//! "was it delivered" on top of it.
//!
//! ## Validation pipeline
//!
//! Each step either advances or ends with [`CzechPostError::Response`]:
//!
//! 1. HTTP status must be exactly 200.
//! 2. The body must decode as JSON.
//! 3. `[0].states.state` must be a non-empty array.
//! 4. `[0].states.state[0]` must carry a known, non-error code.
//!
//! Only the first record is content-checked, while [`status`] reports the
//! *last* one. The carrier lists events oldest first, so the two normally
//! differ: the first record is where the carrier puts its "unknown parcel"
//! marker, the last one is the newest event.
//!
//! [`status`]: ParcelHistoryRequestor::status

use serde_json::Value;

use crate::error::CzechPostError;
use crate::history_state::HistoryState;
use crate::http::{HttpClient, HttpResponse, ReqwestHttpClient};
use crate::parcel_history::ParcelHistoryClient;
use crate::state::{scalar_to_string, State};

/// Outcome of a delivery check.
#[derive(Debug, Clone, PartialEq)]
pub enum Delivery {
    /// The newest state is a successful delivery.
    Delivered(State),
    /// The history is valid, but the newest state is not a delivery.
    NotDelivered(State),
    /// The carrier's answer could not be interpreted.
    Unconfirmed { message: String },
}

impl Delivery {
    /// `true` only for [`Delivery::Delivered`]; an unconfirmed answer counts
    /// as not delivered.
    pub fn is_delivered(&self) -> bool {
        matches!(self, Self::Delivered(_))
    }

    /// Newest state, when the history could be read.
    pub fn state(&self) -> Option<&State> {
        match self {
            Self::Delivered(state) | Self::NotDelivered(state) => Some(state),
            Self::Unconfirmed { .. } => None,
        }
    }
}

/// Interprets parcel histories fetched through a [`ParcelHistoryClient`].
#[derive(Debug, Clone)]
pub struct ParcelHistoryRequestor<H = ReqwestHttpClient> {
    client: ParcelHistoryClient<H>,
}

impl<H: HttpClient> ParcelHistoryRequestor<H> {
    pub fn new(client: ParcelHistoryClient<H>) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &ParcelHistoryClient<H> {
        &self.client
    }

    /// Full history of a parcel, in the order the carrier returned it.
    ///
    /// Never empty on success.
    pub async fn history(&self, tracking_number: &str) -> Result<Vec<State>, CzechPostError> {
        let response = self.client.history(tracking_number).await?;

        let states = parse_states(&response)
            .and_then(|raw| to_states(&response, &raw))
            .map_err(|e| {
                tracing::warn!(tracking_number, status = response.status, "{e}");
                e
            })?;

        tracing::debug!(tracking_number, states = states.len(), "parcel history parsed");
        Ok(states)
    }

    /// Newest state of a parcel: the last element of [`history`](Self::history).
    pub async fn status(&self, tracking_number: &str) -> Result<State, CzechPostError> {
        let states = self.history(tracking_number).await?;
        current_state(states)
    }

    /// Whether the parcel has been delivered, as an explicit outcome.
    ///
    /// Response errors become [`Delivery::Unconfirmed`]. Transport and logical
    /// errors are returned as errors.
    pub async fn delivery(&self, tracking_number: &str) -> Result<Delivery, CzechPostError> {
        match self.status(tracking_number).await {
            Ok(state) if HistoryState::is_delivered_successfully(state.id()) => {
                Ok(Delivery::Delivered(state))
            }
            Ok(state) => Ok(Delivery::NotDelivered(state)),
            Err(CzechPostError::Response { message, .. }) => {
                Ok(Delivery::Unconfirmed { message })
            }
            Err(e) => Err(e),
        }
    }

    /// Whether the parcel has been delivered.
    ///
    /// "Could not confirm" and "not delivered" are both `false`.
    pub async fn is_delivered(&self, tracking_number: &str) -> Result<bool, CzechPostError> {
        self.delivery(tracking_number)
            .await
            .map(|delivery| delivery.is_delivered())
    }
}

/// Validate a history response and return its raw state records.
pub fn parse_states(response: &HttpResponse) -> Result<Vec<Value>, CzechPostError> {
    if response.status != 200 {
        return Err(CzechPostError::response(
            response,
            format!("Server responded with status code \"{}\"", response.status),
        ));
    }

    let data: Value = serde_json::from_slice(&response.body)
        .map_err(|_| CzechPostError::response(response, "Cannot decode response json"))?;

    let states = data
        .as_array()
        .and_then(|items| items.first())
        .and_then(|parcel| parcel.get("states"))
        .and_then(|states| states.get("state"))
        .and_then(Value::as_array)
        .filter(|states| !states.is_empty())
        .ok_or_else(|| {
            CzechPostError::response(response, "Response does not contain any parcel state")
        })?;

    let first = &states[0];
    let text = first
        .get("text")
        .and_then(scalar_to_string)
        .unwrap_or_default();

    let id = match first.get("id").and_then(scalar_to_string) {
        Some(id) if HistoryState::is_known_state(&id) => id,
        id => {
            return Err(CzechPostError::response(
                response,
                format!(
                    "Unknown parcel state \"{}\". Description: \"{text}\"",
                    id.unwrap_or_default()
                ),
            ));
        }
    };

    if HistoryState::is_error_state(&id) {
        return Err(CzechPostError::response(
            response,
            format!("Parcel tracking error. State: {id}, Description: \"{text}\""),
        ));
    }

    Ok(states.clone())
}

fn to_states(response: &HttpResponse, raw: &[Value]) -> Result<Vec<State>, CzechPostError> {
    raw.iter()
        .enumerate()
        .map(|(index, record)| {
            State::from_record(record).ok_or_else(|| {
                CzechPostError::response(response, format!("Malformed parcel state at index {index}"))
            })
        })
        .collect()
}

fn current_state(states: Vec<State>) -> Result<State, CzechPostError> {
    states
        .into_iter()
        .last()
        .ok_or_else(|| CzechPostError::logical("No parcel state"))
}
