//! Czech Post client error types.

use crate::http::HttpResponse;

type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Transport-level failure raised by an [`HttpClient`](crate::http::HttpClient).
///
/// Whatever HTTP implementation is injected, its failures surface as this one
/// type. The underlying error stays reachable through `source()`.
#[derive(Debug, thiserror::Error)]
#[error("HTTP request failed: {message}")]
pub struct RequestError {
    message: String,
    #[source]
    source: Option<BoxError>,
}

impl RequestError {
    /// Wrap an underlying transport error.
    pub fn new<E>(source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self {
            message: source.to_string(),
            source: Some(Box::new(source)),
        }
    }

    /// A transport failure with no underlying error value.
    pub fn msg(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            source: None,
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Errors from Czech Post parcel-tracking calls.
#[derive(Debug, thiserror::Error)]
pub enum CzechPostError {
    /// The HTTP exchange itself failed.
    #[error(transparent)]
    Request(#[from] RequestError),

    /// The carrier answered, but the payload did not pass validation.
    #[error("{message}")]
    Response {
        response: HttpResponse,
        message: String,
    },

    /// Internal invariant violation.
    #[error("{message}")]
    Logical { message: String },

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(#[from] crate::config::ConfigError),
}

impl CzechPostError {
    pub(crate) fn response(response: &HttpResponse, message: impl Into<String>) -> Self {
        Self::Response {
            response: response.clone(),
            message: message.into(),
        }
    }

    pub(crate) fn logical(message: impl Into<String>) -> Self {
        Self::Logical {
            message: message.into(),
        }
    }

    /// The offending response, for response errors.
    pub fn http_response(&self) -> Option<&HttpResponse> {
        match self {
            Self::Response { response, .. } => Some(response),
            _ => None,
        }
    }
}
