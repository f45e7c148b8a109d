//! Error types for API client operations.
//!
//! Every variant carries the request URL so failures surfaced to the user
//! include the diagnostic detail the list view is required to show.

use thiserror::Error;

/// Errors that can occur talking to the course-resource API.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Network-level error (DNS resolution, connection refused, TLS errors, etc.)
    #[error("network error requesting {url}: {source}")]
    Network {
        /// The URL that failed.
        url: String,
        /// The underlying network error.
        #[source]
        source: reqwest::Error,
    },

    /// Request timed out before completion.
    #[error("timeout requesting {url}")]
    Timeout {
        /// The URL that timed out.
        url: String,
    },

    /// Application-level rejection: non-2xx status with a response body.
    ///
    /// The server uses plain-text bodies for validation and conflict errors;
    /// the body is preserved verbatim so the upload flow can show it raw.
    #[error("HTTP {status} from {url}: {body}")]
    Rejected {
        /// The URL that was rejected.
        url: String,
        /// The HTTP status code.
        status: u16,
        /// The raw response body text.
        body: String,
    },

    /// The server returned 2xx but the body was not the expected JSON.
    #[error("invalid JSON from {url}: {source}")]
    Decode {
        /// The URL whose body failed to decode.
        url: String,
        /// The underlying decode error.
        #[source]
        source: serde_json::Error,
    },

    /// The provided URL is malformed or invalid.
    #[error("invalid URL: {url}")]
    InvalidUrl {
        /// The invalid URL string.
        url: String,
    },
}

impl ApiError {
    /// Creates a network error from a reqwest error, classifying timeouts.
    pub fn from_reqwest(url: impl Into<String>, source: reqwest::Error) -> Self {
        let url = url.into();
        if source.is_timeout() {
            Self::Timeout { url }
        } else {
            Self::Network { url, source }
        }
    }

    /// Creates an application-level rejection.
    pub fn rejected(url: impl Into<String>, status: u16, body: impl Into<String>) -> Self {
        Self::Rejected {
            url: url.into(),
            status,
            body: body.into(),
        }
    }

    /// Creates a decode error for a non-JSON 2xx body.
    pub fn decode(url: impl Into<String>, source: serde_json::Error) -> Self {
        Self::Decode {
            url: url.into(),
            source,
        }
    }

    /// Creates an invalid URL error.
    pub fn invalid_url(url: impl Into<String>) -> Self {
        Self::InvalidUrl { url: url.into() }
    }

    /// The URL this error is about.
    #[must_use]
    pub fn url(&self) -> &str {
        match self {
            Self::Network { url, .. }
            | Self::Timeout { url }
            | Self::Rejected { url, .. }
            | Self::Decode { url, .. }
            | Self::InvalidUrl { url } => url,
        }
    }

    /// Raw response body for application-level rejections, if any.
    #[must_use]
    pub fn response_body(&self) -> Option<&str> {
        match self {
            Self::Rejected { body, .. } => Some(body),
            _ => None,
        }
    }
}

// No From<reqwest::Error>: variants need the request URL for context, which
// the source error does not reliably carry. Callers go through the helper
// constructors instead.
