//! Client configuration errors.

use thiserror::Error;

/// Errors in client configuration.
///
/// These are raised locally while the client is being constructed and never
/// involve a network round trip.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The credential does not follow the `mk_live_...` / `mk_test_...` convention.
    #[error("Invalid API key format. Expected format: mk_live_... or mk_test_...")]
    InvalidApiKey,

    /// A required setting was not provided.
    #[error("Missing required setting: {name}")]
    MissingSetting {
        /// Name of the missing setting (usually an environment variable).
        name: &'static str,
    },

    /// A setting was provided but could not be interpreted.
    #[error("Invalid value for {name}: {value:?}")]
    InvalidSetting {
        /// Name of the setting.
        name: &'static str,
        /// The rejected value.
        value: String,
    },

    /// The base URL could not be parsed.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// The base URL cannot carry a path (e.g. `mailto:`).
    #[error("Base URL cannot be used as an API root: {url}")]
    UnusableBaseUrl {
        /// The rejected URL.
        url: String,
    },

    /// A configured value cannot be encoded as an HTTP header.
    #[error("Invalid value for header {name}")]
    InvalidHeader {
        /// The header that failed to encode.
        name: &'static str,
    },

    /// The HTTP transport could not be constructed.
    #[error("Failed to build HTTP transport: {0}")]
    Transport(#[source] reqwest::Error),

    /// The thread building the blocking transport panicked.
    #[error("Blocking transport initialization panicked")]
    TransportInitPanicked,
}

impl ConfigError {
    /// Machine-readable error code.
    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidApiKey => "INVALID_API_KEY",
            _ => "CONFIG_ERROR",
        }
    }

    /// Creates an invalid setting error.
    pub fn invalid_setting(name: &'static str, value: impl Into<String>) -> Self {
        Self::InvalidSetting {
            name,
            value: value.into(),
        }
    }
}
