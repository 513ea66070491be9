//! Default request headers.

use reqwest::header::{
    AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderName, HeaderValue, USER_AGENT,
};

use crate::config::{ClientConfig, CulturalContext};
use crate::error::ConfigError;

/// `User-Agent` sent with every request.
pub const SDK_USER_AGENT: &str = concat!("MediMate-Malaysia-SDK-Rust/", env!("CARGO_PKG_VERSION"));

pub const SDK_LANGUAGE: &str = "x-sdk-language";
pub const CULTURAL_CONTEXT: &str = "x-cultural-context";
pub const MALAYSIAN_STATE: &str = "x-malaysian-state";
pub const PREFERRED_LANGUAGE: &str = "x-preferred-language";
pub const PRAYER_TIME_AWARE: &str = "x-prayer-time-aware";
pub const HALAL_REQUIREMENTS: &str = "x-halal-requirements";

/// Response header naming the prayer currently in progress.
pub const PRAYER_TIME: &str = "x-prayer-time";
/// Response header naming an ongoing cultural event.
pub const CULTURAL_EVENT: &str = "x-cultural-event";

/// Headers attached to every request made with `config`.
pub(crate) fn default_headers(config: &ClientConfig) -> Result<HeaderMap, ConfigError> {
    let mut headers = HeaderMap::new();

    let mut auth = HeaderValue::try_from(format!("Bearer {}", config.api_key()))
        .map_err(|_| ConfigError::InvalidHeader {
            name: "Authorization",
        })?;
    auth.set_sensitive(true);
    headers.insert(AUTHORIZATION, auth);
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    headers.insert(USER_AGENT, HeaderValue::from_static(SDK_USER_AGENT));
    headers.insert(
        HeaderName::from_static(SDK_LANGUAGE),
        HeaderValue::from_static("rust"),
    );
    headers.insert(
        HeaderName::from_static(CULTURAL_CONTEXT),
        HeaderValue::from_static("Malaysian Healthcare"),
    );

    for (name, value) in cultural_headers(config.cultural()) {
        headers.insert(HeaderName::from_static(name), HeaderValue::from_static(value));
    }

    Ok(headers)
}

/// Header pairs for the fields of `context` that are set.
///
/// Flags are only sent when true.
pub(crate) fn cultural_headers(context: &CulturalContext) -> Vec<(&'static str, &'static str)> {
    let mut headers = Vec::with_capacity(4);
    if let Some(state) = context.state {
        headers.push((MALAYSIAN_STATE, state.code()));
    }
    if let Some(language) = context.language {
        headers.push((PREFERRED_LANGUAGE, language.code()));
    }
    if context.prayer_time_aware {
        headers.push((PRAYER_TIME_AWARE, "true"));
    }
    if context.halal_requirements {
        headers.push((HALAL_REQUIREMENTS, "true"));
    }
    headers
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{MalaysianState, SupportedLanguage};

    fn headers_for(context: CulturalContext) -> HeaderMap {
        let config = ClientConfig::builder("mk_test_0123456789")
            .cultural_context(context)
            .build()
            .unwrap();
        default_headers(&config).unwrap()
    }

    #[test]
    fn test_fixed_headers() {
        let headers = headers_for(CulturalContext::none());
        assert_eq!(headers[AUTHORIZATION], "Bearer mk_test_0123456789");
        assert!(headers[AUTHORIZATION].is_sensitive());
        assert_eq!(headers[CONTENT_TYPE], "application/json");
        assert!(
            headers[USER_AGENT]
                .to_str()
                .unwrap()
                .starts_with("MediMate-Malaysia-SDK-Rust/")
        );
        assert_eq!(headers[SDK_LANGUAGE], "rust");
        assert_eq!(headers[CULTURAL_CONTEXT], "Malaysian Healthcare");
        assert!(!headers.contains_key(MALAYSIAN_STATE));
        assert!(!headers.contains_key(PREFERRED_LANGUAGE));
        assert!(!headers.contains_key(PRAYER_TIME_AWARE));
        assert!(!headers.contains_key(HALAL_REQUIREMENTS));
    }

    #[test]
    fn test_cultural_headers_follow_context() {
        let headers = headers_for(
            CulturalContext::none()
                .state(MalaysianState::KualaLumpur)
                .language(SupportedLanguage::Malay)
                .prayer_time_aware(true),
        );
        assert_eq!(headers[MALAYSIAN_STATE], "KUL");
        assert_eq!(headers[PREFERRED_LANGUAGE], "ms");
        assert_eq!(headers[PRAYER_TIME_AWARE], "true");
        assert!(!headers.contains_key(HALAL_REQUIREMENTS));
    }

    #[test]
    fn test_default_context_headers() {
        let pairs = cultural_headers(&CulturalContext::default());
        assert_eq!(
            pairs,
            vec![(PREFERRED_LANGUAGE, "en"), (PRAYER_TIME_AWARE, "true")]
        );

        let pairs = cultural_headers(&CulturalContext::none().halal_requirements(true));
        assert_eq!(pairs, vec![(HALAL_REQUIREMENTS, "true")]);
    }
}
