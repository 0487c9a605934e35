//! # cpost-client -- Typed Rust client for Czech Post parcel tracking
//!
//! Fetches a parcel's tracking history from the Czech Post `ParcelHistory`
//! service and interprets it as an ordered list of delivery states.
//!
//! ## Layers
//!
//! - [`http`]: the transport seam. [`HttpClient`] is injectable;
//!   [`ReqwestHttpClient`] is the default. Transport failures become
//!   [`RequestError`].
//! - [`parcel_history`]: builds the history request for a tracking number.
//! - [`requestor`]: validates the payload and answers `history`, `status`,
//!   `is_delivered`.
//! - [`history_state`]: the table of carrier status codes.
//!
//! ## Example
//!
//! ```no_run
//! # async fn run() -> Result<(), cpost_client::CzechPostError> {
//! use cpost_client::{CzechPostClient, CzechPostConfig};
//!
//! let client = CzechPostClient::new(CzechPostConfig::from_env()?)?;
//! let current = client.parcel_history().status("RR123456789CZ").await?;
//! println!("{}: {}", current.id(), current.text());
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod error;
pub mod history_state;
pub mod http;
pub mod parcel_history;
pub mod requestor;
pub mod state;

pub use config::{ConfigOverrides, CzechPostConfig, Language};
pub use error::{CzechPostError, RequestError};
pub use history_state::{HistoryState, StateClass};
pub use http::{HttpClient, HttpResponse, ReqwestHttpClient, RequestOptions};
pub use parcel_history::ParcelHistoryClient;
pub use requestor::{Delivery, ParcelHistoryRequestor};
pub use state::State;

use std::time::Duration;

/// Top-level Czech Post client. Holds the requestors for each service.
#[derive(Debug, Clone)]
pub struct CzechPostClient<H = ReqwestHttpClient> {
    parcel_history: ParcelHistoryRequestor<H>,
}

impl CzechPostClient {
    /// Create a client backed by `reqwest` from configuration.
    pub fn new(config: CzechPostConfig) -> Result<Self, CzechPostError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(config.user_agent.as_str())
            .build()
            .map_err(|e| config::ConfigError::HttpClient(e.to_string()))?;

        Ok(Self::with_http(ReqwestHttpClient::new(http), config))
    }
}

impl<H: HttpClient> CzechPostClient<H> {
    /// Create a client over an arbitrary transport.
    pub fn with_http(http: H, config: CzechPostConfig) -> Self {
        let client = ParcelHistoryClient::new(http, config.base_url, config.language);
        Self {
            parcel_history: ParcelHistoryRequestor::new(client),
        }
    }

    /// Access the parcel-history requestor.
    pub fn parcel_history(&self) -> &ParcelHistoryRequestor<H> {
        &self.parcel_history
    }
}
