//! Client configuration.
//!
//! A [`ClientConfig`] is assembled once, through [`ClientConfig::builder`] or
//! [`ClientConfig::from_env`], and is read-only after the client takes it.

use std::fmt;
use std::time::Duration;

use url::Url;

use crate::error::ConfigError;
use crate::models::{MalaysianState, SupportedLanguage};
use crate::validation::{redact_api_key, validate_api_key};

/// Production API root.
pub const DEFAULT_BASE_URL: &str = "https://api.medimate.my/v1";

/// Per-request timeout used when none is configured.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Retry budget used when none is configured.
pub const DEFAULT_MAX_RETRIES: u32 = 3;

pub const ENV_API_KEY: &str = "MEDIMATE_API_KEY";
pub const ENV_BASE_URL: &str = "MEDIMATE_BASE_URL";
pub const ENV_TIMEOUT_SECS: &str = "MEDIMATE_TIMEOUT_SECS";
pub const ENV_MAX_RETRIES: &str = "MEDIMATE_MAX_RETRIES";
pub const ENV_DEBUG: &str = "MEDIMATE_DEBUG";
pub const ENV_STATE: &str = "MEDIMATE_STATE";
pub const ENV_LANGUAGE: &str = "MEDIMATE_LANGUAGE";

/// Regional and language preferences sent with every request.
///
/// The default context prefers English and is prayer-time aware, with no
/// state and no halal requirement. [`CulturalContext::none`] sends no
/// cultural headers at all.
///
/// ## Examples
///
/// ```rust
/// use medimate::{CulturalContext, MalaysianState, SupportedLanguage};
///
/// let context = CulturalContext::none()
///     .state(MalaysianState::KualaLumpur)
///     .language(SupportedLanguage::Malay)
///     .prayer_time_aware(true);
/// assert!(!context.halal_requirements);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CulturalContext {
    /// Sent as `X-Malaysian-State`.
    pub state: Option<MalaysianState>,
    /// Sent as `X-Preferred-Language`.
    pub language: Option<SupportedLanguage>,
    /// Sent as `X-Prayer-Time-Aware: true` when set.
    pub prayer_time_aware: bool,
    /// Sent as `X-Halal-Requirements: true` when set.
    pub halal_requirements: bool,
}

impl Default for CulturalContext {
    fn default() -> Self {
        Self {
            state: None,
            language: Some(SupportedLanguage::English),
            prayer_time_aware: true,
            halal_requirements: false,
        }
    }
}

impl CulturalContext {
    /// A context with every field unset.
    pub fn none() -> Self {
        Self {
            state: None,
            language: None,
            prayer_time_aware: false,
            halal_requirements: false,
        }
    }

    pub fn state(mut self, state: MalaysianState) -> Self {
        self.state = Some(state);
        self
    }

    pub fn language(mut self, language: SupportedLanguage) -> Self {
        self.language = Some(language);
        self
    }

    pub fn prayer_time_aware(mut self, enabled: bool) -> Self {
        self.prayer_time_aware = enabled;
        self
    }

    pub fn halal_requirements(mut self, enabled: bool) -> Self {
        self.halal_requirements = enabled;
        self
    }
}

/// Immutable client configuration.
///
/// The credential is validated when the configuration is built and never
/// appears in `Debug` output.
#[derive(Clone)]
pub struct ClientConfig {
    api_key: String,
    base_url: Url,
    timeout: Duration,
    max_retries: u32,
    debug: bool,
    cultural: CulturalContext,
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("api_key", &redact_api_key(&self.api_key))
            .field("base_url", &self.base_url.as_str())
            .field("timeout", &self.timeout)
            .field("max_retries", &self.max_retries)
            .field("debug", &self.debug)
            .field("cultural", &self.cultural)
            .finish()
    }
}

impl ClientConfig {
    /// Starts a configuration for `api_key` with every other setting at its default.
    pub fn builder(api_key: impl Into<String>) -> ClientConfigBuilder {
        ClientConfigBuilder::new(api_key.into())
    }

    /// Default configuration for `api_key`.
    ///
    /// ## Errors
    ///
    /// Returns [`ConfigError::InvalidApiKey`] if the credential is malformed.
    pub fn new(api_key: impl Into<String>) -> Result<Self, ConfigError> {
        Self::builder(api_key).build()
    }

    /// Reads the configuration from `MEDIMATE_*` environment variables.
    ///
    /// `MEDIMATE_API_KEY` is required. `MEDIMATE_BASE_URL`,
    /// `MEDIMATE_TIMEOUT_SECS`, `MEDIMATE_MAX_RETRIES`, `MEDIMATE_DEBUG`,
    /// `MEDIMATE_STATE` and `MEDIMATE_LANGUAGE` override the defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub(crate) fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());

        let api_key = var(ENV_API_KEY).ok_or(ConfigError::MissingSetting { name: ENV_API_KEY })?;
        let mut builder = Self::builder(api_key.trim());

        if let Some(base_url) = var(ENV_BASE_URL) {
            builder = builder.base_url(base_url.trim());
        }
        if let Some(raw) = var(ENV_TIMEOUT_SECS) {
            let secs: u64 = raw
                .trim()
                .parse()
                .map_err(|_| ConfigError::invalid_setting(ENV_TIMEOUT_SECS, raw.clone()))?;
            builder = builder.timeout(Duration::from_secs(secs));
        }
        if let Some(raw) = var(ENV_MAX_RETRIES) {
            let retries: u32 = raw
                .trim()
                .parse()
                .map_err(|_| ConfigError::invalid_setting(ENV_MAX_RETRIES, raw.clone()))?;
            builder = builder.max_retries(retries);
        }
        if let Some(raw) = var(ENV_DEBUG) {
            let debug = parse_flag(&raw)
                .ok_or_else(|| ConfigError::invalid_setting(ENV_DEBUG, raw.clone()))?;
            builder = builder.debug(debug);
        }

        let mut cultural = CulturalContext::default();
        if let Some(raw) = var(ENV_STATE) {
            cultural.state = Some(
                raw.trim()
                    .parse()
                    .map_err(|_| ConfigError::invalid_setting(ENV_STATE, raw.clone()))?,
            );
        }
        if let Some(raw) = var(ENV_LANGUAGE) {
            cultural.language = Some(
                raw.trim()
                    .parse()
                    .map_err(|_| ConfigError::invalid_setting(ENV_LANGUAGE, raw.clone()))?,
            );
        }

        builder.cultural_context(cultural).build()
    }

    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Retry budget available to caller-level retry policies.
    ///
    /// The client itself never retries.
    pub fn max_retries(&self) -> u32 {
        self.max_retries
    }

    /// Whether request bodies are logged at debug level.
    pub fn debug(&self) -> bool {
        self.debug
    }

    pub fn cultural(&self) -> &CulturalContext {
        &self.cultural
    }
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// Builder for [`ClientConfig`].
///
/// ## Examples
///
/// ```rust
/// use std::time::Duration;
/// use medimate::{ClientConfig, CulturalContext, MalaysianState};
///
/// let config = ClientConfig::builder("mk_test_0123456789")
///     .timeout(Duration::from_secs(10))
///     .cultural_context(CulturalContext::default().state(MalaysianState::Penang))
///     .build()
///     .unwrap();
/// assert_eq!(config.base_url().as_str(), "https://api.medimate.my/v1");
/// ```
#[derive(Clone)]
pub struct ClientConfigBuilder {
    api_key: String,
    base_url: String,
    timeout: Duration,
    max_retries: u32,
    debug: bool,
    cultural: CulturalContext,
}

impl fmt::Debug for ClientConfigBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfigBuilder")
            .field("api_key", &redact_api_key(&self.api_key))
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .field("max_retries", &self.max_retries)
            .field("debug", &self.debug)
            .field("cultural", &self.cultural)
            .finish()
    }
}

impl ClientConfigBuilder {
    fn new(api_key: String) -> Self {
        Self {
            api_key,
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
            max_retries: DEFAULT_MAX_RETRIES,
            debug: false,
            cultural: CulturalContext::default(),
        }
    }

    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    pub fn debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    pub fn cultural_context(mut self, cultural: CulturalContext) -> Self {
        self.cultural = cultural;
        self
    }

    /// Validates the credential and base URL.
    ///
    /// ## Errors
    ///
    /// - [`ConfigError::InvalidApiKey`] for a malformed credential
    /// - [`ConfigError::InvalidUrl`] if the base URL does not parse
    /// - [`ConfigError::UnusableBaseUrl`] if it cannot carry a path
    /// - [`ConfigError::InvalidSetting`] for a zero timeout
    pub fn build(self) -> Result<ClientConfig, ConfigError> {
        if !validate_api_key(&self.api_key) {
            return Err(ConfigError::InvalidApiKey);
        }
        if self.timeout.is_zero() {
            return Err(ConfigError::invalid_setting(ENV_TIMEOUT_SECS, "0"));
        }
        let base_url = Url::parse(&self.base_url)?;
        if base_url.cannot_be_a_base() {
            return Err(ConfigError::UnusableBaseUrl { url: self.base_url });
        }

        Ok(ClientConfig {
            api_key: self.api_key,
            base_url,
            timeout: self.timeout,
            max_retries: self.max_retries,
            debug: self.debug,
            cultural: self.cultural,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    const KEY: &str = "mk_test_0123456789";

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| vars.get(name).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = ClientConfig::new(KEY).unwrap();
        assert_eq!(config.base_url().as_str(), DEFAULT_BASE_URL);
        assert_eq!(config.timeout(), Duration::from_secs(30));
        assert_eq!(config.max_retries(), 3);
        assert!(!config.debug());
        assert_eq!(config.cultural(), &CulturalContext::default());
        assert_eq!(config.cultural().language, Some(SupportedLanguage::English));
        assert!(config.cultural().prayer_time_aware);
    }

    #[test]
    fn test_invalid_api_key() {
        for key in ["", "mk_short", "sk_live_0123456789", "mk_live_abcd"] {
            assert!(
                matches!(ClientConfig::new(key), Err(ConfigError::InvalidApiKey)),
                "{key:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_invalid_base_url() {
        let err = ClientConfig::builder(KEY).base_url("not a url").build().unwrap_err();
        assert!(matches!(err, ConfigError::InvalidUrl(_)));

        let err = ClientConfig::builder(KEY)
            .base_url("mailto:ops@medimate.my")
            .build()
            .unwrap_err();
        assert!(matches!(err, ConfigError::UnusableBaseUrl { .. }));
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let err = ClientConfig::builder(KEY)
            .timeout(Duration::ZERO)
            .build()
            .unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidSetting {
                name: "MEDIMATE_TIMEOUT_SECS",
                ..
            }
        ));

        let err = ClientConfig::from_lookup(lookup(&[(ENV_API_KEY, KEY), (ENV_TIMEOUT_SECS, "0")]))
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidSetting { .. }));

        let config = ClientConfig::builder(KEY)
            .timeout(Duration::from_millis(1))
            .build()
            .unwrap();
        assert_eq!(config.timeout(), Duration::from_millis(1));
    }

    #[test]
    fn test_debug_redacts_api_key() {
        let config = ClientConfig::new("mk_live_very_secret_value").unwrap();
        let debug = format!("{config:?}");
        assert!(debug.contains("mk_live_very..."));
        assert!(!debug.contains("secret_value"));
    }

    #[test]
    fn test_from_lookup_requires_api_key() {
        let err = ClientConfig::from_lookup(lookup(&[])).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::MissingSetting {
                name: "MEDIMATE_API_KEY"
            }
        ));

        let err = ClientConfig::from_lookup(lookup(&[(ENV_API_KEY, "  ")])).unwrap_err();
        assert!(matches!(err, ConfigError::MissingSetting { .. }));
    }

    #[test]
    fn test_from_lookup_overrides() {
        let config = ClientConfig::from_lookup(lookup(&[
            (ENV_API_KEY, KEY),
            (ENV_BASE_URL, "http://localhost:8080/v2"),
            (ENV_TIMEOUT_SECS, "5"),
            (ENV_MAX_RETRIES, "0"),
            (ENV_DEBUG, "TRUE"),
            (ENV_STATE, "sgr"),
            (ENV_LANGUAGE, "zh"),
        ]))
        .unwrap();
        assert_eq!(config.base_url().as_str(), "http://localhost:8080/v2");
        assert_eq!(config.timeout(), Duration::from_secs(5));
        assert_eq!(config.max_retries(), 0);
        assert!(config.debug());
        assert_eq!(config.cultural().state, Some(MalaysianState::Selangor));
        assert_eq!(config.cultural().language, Some(SupportedLanguage::Chinese));
        assert!(config.cultural().prayer_time_aware);
    }

    #[test]
    fn test_from_lookup_rejects_bad_values() {
        let err = ClientConfig::from_lookup(lookup(&[(ENV_API_KEY, KEY), (ENV_TIMEOUT_SECS, "soon")]))
            .unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidSetting {
                name: "MEDIMATE_TIMEOUT_SECS",
                ..
            }
        ));

        let err =
            ClientConfig::from_lookup(lookup(&[(ENV_API_KEY, KEY), (ENV_STATE, "XYZ")])).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidSetting {
                name: "MEDIMATE_STATE",
                ..
            }
        ));

        let err =
            ClientConfig::from_lookup(lookup(&[(ENV_API_KEY, KEY), (ENV_DEBUG, "maybe")])).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidSetting { .. }));
    }

    #[test]
    fn test_cultural_context_none() {
        let context = CulturalContext::none();
        assert_eq!(context.state, None);
        assert_eq!(context.language, None);
        assert!(!context.prayer_time_aware);
        assert!(!context.halal_requirements);
    }
}
