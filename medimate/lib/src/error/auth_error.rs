//! Authentication errors.

use thiserror::Error;

use crate::envelope::{ApiErrorBody, LocalizedMessages};

/// The server rejected the credential (HTTP 401).
///
/// Authentication failures are never retried by the client: the same
/// credential will be rejected again.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("Authentication failed: {message}")]
pub struct AuthError {
    message: String,
    cultural_message: Option<LocalizedMessages>,
}

impl AuthError {
    /// Message used when the server does not explain the rejection.
    pub const DEFAULT_MESSAGE: &'static str = "Invalid API key or authentication failed";

    /// Creates an authentication error with the given message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            cultural_message: None,
        }
    }

    /// Builds the error from a 401 response body.
    ///
    /// The body only contributes a message when it is a JSON envelope with an
    /// `error` object; anything else falls back to [`Self::DEFAULT_MESSAGE`].
    pub(crate) fn from_body(body: &[u8]) -> Self {
        match ApiErrorBody::from_envelope_bytes(body) {
            Some(error) => Self {
                message: error.message,
                cultural_message: error.cultural_message,
            },
            None => Self::new(Self::DEFAULT_MESSAGE),
        }
    }

    /// Human-readable message.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Localized variants of the message, keyed by language code.
    pub fn cultural_message(&self) -> Option<&LocalizedMessages> {
        self.cultural_message.as_ref()
    }
}

impl Default for AuthError {
    fn default() -> Self {
        Self::new(Self::DEFAULT_MESSAGE)
    }
}
