//! HTTP transport seam.
//!
//! [`HttpClient`] is the only way the rest of the crate talks to the network.
//! [`ReqwestHttpClient`] is the production implementation; tests inject their
//! own. Every transport failure is translated into [`RequestError`], so callers
//! handle one error kind no matter which implementation is wired in.
//!
//! No retry and no timeout policy lives here beyond what the wrapped client
//! was built with.

use std::future::Future;
use std::time::Duration;

pub use reqwest::Method;

use crate::error::RequestError;

/// Status code and raw body of a completed HTTP exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

impl HttpResponse {
    pub fn new(status: u16, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// Body decoded as UTF-8, with invalid sequences replaced.
    pub fn body_text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

/// Per-request options passed through to the transport.
#[derive(Debug, Clone, Default)]
pub struct RequestOptions {
    /// Query string pairs, appended in order.
    pub query: Vec<(String, String)>,
    /// Extra request headers.
    pub headers: Vec<(String, String)>,
    /// Overrides the client-wide timeout for this request.
    pub timeout: Option<Duration>,
}

impl RequestOptions {
    pub fn query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((key.into(), value.into()));
        self
    }

    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

/// Transport used to reach the carrier API.
///
/// Implementations must be `Send + Sync` so one client can be shared across
/// tasks behind an `Arc` or by cloning.
pub trait HttpClient: Send + Sync {
    /// Perform one request. Any failure below the HTTP layer is a
    /// [`RequestError`]; non-2xx statuses are *not* errors here.
    fn request(
        &self,
        method: Method,
        uri: &str,
        options: RequestOptions,
    ) -> impl Future<Output = Result<HttpResponse, RequestError>> + Send;
}

/// [`HttpClient`] backed by `reqwest`.
#[derive(Debug, Clone)]
pub struct ReqwestHttpClient {
    http: reqwest::Client,
}

impl ReqwestHttpClient {
    pub fn new(http: reqwest::Client) -> Self {
        Self { http }
    }
}

impl HttpClient for ReqwestHttpClient {
    async fn request(
        &self,
        method: Method,
        uri: &str,
        options: RequestOptions,
    ) -> Result<HttpResponse, RequestError> {
        let mut builder = self.http.request(method.clone(), uri);
        if !options.query.is_empty() {
            builder = builder.query(&options.query);
        }
        for (name, value) in &options.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        if let Some(timeout) = options.timeout {
            builder = builder.timeout(timeout);
        }

        let resp = builder.send().await.map_err(|e| {
            tracing::debug!(%method, uri, "transport failure: {e}");
            RequestError::new(e)
        })?;

        let status = resp.status().as_u16();
        let body = resp.bytes().await.map_err(RequestError::new)?;

        Ok(HttpResponse {
            status,
            body: body.to_vec(),
        })
    }
}
