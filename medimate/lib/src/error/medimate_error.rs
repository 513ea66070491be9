//! Top-level client error type.

use std::time::Duration;

use serde_json::Value;
use thiserror::Error;

use super::{AuthError, ConfigError, RateLimitError, RequestError, ValidationError};
use crate::envelope::LocalizedMessages;

/// Top-level error type for all client operations.
///
/// Each variant is one error kind; a failed call carries exactly one of them.
/// The accessors expose the uniform error value (message, code, status,
/// localized message, details) regardless of kind.
///
/// ## Examples
///
/// ```rust,ignore
/// use medimate::MediMateError;
///
/// match client.health().send().await {
///     Ok(health) => println!("{health}"),
///     Err(MediMateError::RateLimit(e)) => sleep(e.retry_after()).await,
///     Err(MediMateError::Auth(e)) => eprintln!("check your key: {e}"),
///     Err(other) => eprintln!("{} ({})", other, other.code()),
/// }
/// ```
#[derive(Debug, Error)]
pub enum MediMateError {
    /// Invalid credential or configuration.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The server rejected the credential.
    #[error(transparent)]
    Auth(#[from] AuthError),

    /// The server rate limited the caller.
    #[error(transparent)]
    RateLimit(#[from] RateLimitError),

    /// Malformed caller input.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Any other transport or response failure.
    #[error(transparent)]
    Request(#[from] RequestError),
}

impl MediMateError {
    /// Machine-readable error code.
    pub fn code(&self) -> &str {
        match self {
            Self::Config(e) => e.code(),
            Self::Auth(_) => "AUTHENTICATION_ERROR",
            Self::RateLimit(_) => "RATE_LIMIT_ERROR",
            Self::Validation(_) => ValidationError::CODE,
            Self::Request(e) => e.code(),
        }
    }

    /// Human-readable message.
    pub fn message(&self) -> String {
        match self {
            Self::Auth(e) => e.message().to_string(),
            Self::Validation(e) => e.message().to_string(),
            other => other.to_string(),
        }
    }

    /// HTTP status associated with the error, if any.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::Config(_) => None,
            Self::Auth(_) => Some(401),
            Self::RateLimit(_) => Some(429),
            Self::Validation(_) => Some(400),
            Self::Request(e) => e.status_code(),
        }
    }

    /// Localized variants of the message, keyed by language code.
    pub fn cultural_message(&self) -> Option<&LocalizedMessages> {
        match self {
            Self::Auth(e) => e.cultural_message(),
            Self::Validation(e) => e.cultural_message(),
            Self::Request(e) => e.api_error().and_then(|a| a.cultural_message.as_ref()),
            Self::Config(_) | Self::RateLimit(_) => None,
        }
    }

    /// Structured details, if any.
    pub fn details(&self) -> Option<&Value> {
        match self {
            Self::Validation(e) => e.details(),
            Self::Request(e) => e.api_error().and_then(|a| a.details.as_ref()),
            _ => None,
        }
    }

    /// How long to wait before retrying, for rate limit errors.
    pub fn retry_after(&self) -> Option<Duration> {
        match self {
            Self::RateLimit(e) => Some(e.retry_after()),
            _ => None,
        }
    }

    /// Returns `true` if re-issuing the same request may succeed.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::RateLimit(_) => true,
            Self::Request(e) => e.is_retryable(),
            Self::Config(_) | Self::Auth(_) | Self::Validation(_) => false,
        }
    }
}
