//! Generic request failures.

use thiserror::Error;

use crate::envelope::ApiErrorBody;

/// Any failure that is not configuration, authentication, rate limiting or
/// input validation: transport errors, timeouts, unexpected statuses and
/// undecodable bodies.
#[derive(Debug, Error)]
pub enum RequestError {
    /// The request could not be sent or the response could not be read.
    #[error("Request failed: {0}")]
    Transport(#[source] reqwest::Error),

    /// The request exceeded the configured timeout.
    #[error("Request timeout after {duration_ms}ms")]
    Timeout {
        /// The configured timeout in milliseconds.
        duration_ms: u64,
    },

    /// The server answered with a non-success status other than 401 or 429.
    #[error("HTTP {status}: {message}")]
    HttpStatus {
        /// The HTTP status code.
        status: u16,
        /// The server's error message, or the raw body when none was given.
        message: String,
        /// The raw response body.
        body: String,
        /// The envelope error, when the body was an envelope.
        error: Option<ApiErrorBody>,
    },

    /// The server answered 2xx with `success: false`.
    #[error("API error {}: {}", .error.code, .error.message)]
    Unsuccessful {
        /// The HTTP status code.
        status: u16,
        /// The envelope error.
        error: ApiErrorBody,
    },

    /// The request path or query could not form a valid URL.
    #[error("Invalid request URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// The request body could not be serialized.
    #[error("Failed to encode request body: {0}")]
    Encode(#[source] serde_json::Error),

    /// The response body did not match the expected shape.
    #[error("Failed to decode response: {0}")]
    Decode(#[source] serde_json::Error),
}

impl RequestError {
    /// Machine-readable error code.
    ///
    /// Unsuccessful envelopes keep the server's own code.
    pub fn code(&self) -> &str {
        match self {
            Self::Unsuccessful { error, .. } => &error.code,
            Self::HttpStatus {
                error: Some(error), ..
            } => &error.code,
            _ => "REQUEST_ERROR",
        }
    }

    /// Builds the error for a non-success status from its raw body.
    pub(crate) fn http_status(status: u16, body: &[u8]) -> Self {
        let text = String::from_utf8_lossy(body).into_owned();
        let error = ApiErrorBody::from_envelope_bytes(body);
        let message = match &error {
            Some(error) => error.message.clone(),
            None if text.trim().is_empty() => reqwest::StatusCode::from_u16(status)
                .ok()
                .and_then(|s| s.canonical_reason())
                .unwrap_or("Request failed")
                .to_string(),
            None => text.clone(),
        };
        Self::HttpStatus {
            status,
            message,
            body: text,
            error,
        }
    }

    /// Returns the HTTP status code, if a response was received.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::HttpStatus { status, .. } | Self::Unsuccessful { status, .. } => Some(*status),
            Self::Transport(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// The envelope error reported by the server, if any.
    pub fn api_error(&self) -> Option<&ApiErrorBody> {
        match self {
            Self::Unsuccessful { error, .. } => Some(error),
            Self::HttpStatus { error, .. } => error.as_ref(),
            _ => None,
        }
    }

    /// Returns `true` if re-issuing the same request may succeed.
    ///
    /// Timeouts, connection failures and 5xx statuses are retryable.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Timeout { .. } => true,
            Self::Transport(e) => e.is_timeout() || e.is_connect(),
            Self::HttpStatus { status, .. } => *status >= 500,
            Self::Unsuccessful { .. }
            | Self::InvalidUrl(_)
            | Self::Encode(_)
            | Self::Decode(_) => false,
        }
    }
}
