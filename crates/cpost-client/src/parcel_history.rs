//! Raw client for the Czech Post `ParcelHistory` service.
//!
//! Endpoint: `GET {base_url}/services/ParcelHistory/getDataAsJson?idParcel={tn}&language={lang}`
//!
//! This client only fetches. Interpreting the payload is the job of
//! [`ParcelHistoryRequestor`](crate::requestor::ParcelHistoryRequestor).

use reqwest::Method;
use url::Url;

use crate::config::Language;
use crate::error::RequestError;
use crate::http::{HttpClient, HttpResponse, ReqwestHttpClient, RequestOptions};

/// Service path relative to the configured base URL.
pub const HISTORY_PATH: &str = "services/ParcelHistory/getDataAsJson";

/// Client for the parcel-history endpoint.
#[derive(Debug, Clone)]
pub struct ParcelHistoryClient<H = ReqwestHttpClient> {
    http: H,
    base_url: Url,
    language: Language,
}

impl<H: HttpClient> ParcelHistoryClient<H> {
    pub fn new(http: H, base_url: Url, language: Language) -> Self {
        Self {
            http,
            base_url,
            language,
        }
    }

    pub fn language(&self) -> Language {
        self.language
    }

    /// Absolute URL of the history endpoint, without query.
    pub fn history_url(&self) -> Result<Url, RequestError> {
        self.base_url.join(HISTORY_PATH).map_err(RequestError::new)
    }

    /// Fetch the raw tracking history of one parcel.
    ///
    /// Any HTTP status is returned as-is; only transport failures are errors.
    pub async fn history(&self, tracking_number: &str) -> Result<HttpResponse, RequestError> {
        let url = self.history_url()?;
        let options = RequestOptions::default()
            .query("idParcel", tracking_number)
            .query("language", self.language.as_str())
            .header("Accept", "application/json");

        tracing::debug!(tracking_number, url = %url, "requesting parcel history");
        self.http.request(Method::GET, url.as_str(), options).await
    }
}
