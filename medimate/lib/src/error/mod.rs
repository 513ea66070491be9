//! Layered error types for the MediMate client.
//!
//! Every call resolves to either a typed value or exactly one of these:
//! - [`MediMateError`] - Top-level error returned by all client operations
//! - [`ConfigError`] - Invalid credential or configuration, detected before any request
//! - [`AuthError`] - The server rejected the credential (HTTP 401)
//! - [`RateLimitError`] - The server rate limited the caller (HTTP 429)
//! - [`ValidationError`] - Malformed caller input, local or reported by the server
//! - [`RequestError`] - Transport failures and every other unsuccessful response

mod auth_error;
mod config_error;
mod medimate_error;
mod rate_limit_error;
mod request_error;
mod validation_error;

pub use auth_error::AuthError;
pub use config_error::ConfigError;
pub use medimate_error::MediMateError;
pub use rate_limit_error::{DEFAULT_RETRY_AFTER, RateLimitError};
pub use request_error::RequestError;
pub use validation_error::{FieldViolation, ValidationError};

/// Result alias used throughout the crate.
pub type Result<T, E = MediMateError> = std::result::Result<T, E>;
