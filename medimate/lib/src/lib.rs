//! Rust SDK for the MediMate Malaysia healthcare API.
//!
//! The client attaches Malaysian cultural context (state, preferred language,
//! prayer-time awareness, halal requirements) to every request and maps each
//! response onto exactly one typed value or one typed error.
//!
//! ## Client
//!
//! - [`MediMate`] - Owns the configuration and both transports
//! - [`Call`] - One prepared call, sent with `.send().await` or `.send_blocking()`
//! - [`AsyncSession`] - Releases the async transport when dropped
//! - [`Request`] - Method, path, query and JSON body of a call
//!
//! ## Configuration
//!
//! - [`ClientConfig`] - Credential, base URL, timeout, retry budget, debug flag
//! - [`CulturalContext`] - Regional and language preferences sent as headers
//!
//! ## Services
//!
//! - [`CulturalService`] - Prayer times, translation, halal checks, calendar
//! - [`PatientService`] - Patient registration and lookup
//! - [`AppointmentService`] - Appointment booking
//!
//! ## Errors
//!
//! - [`MediMateError`] - One of [`ConfigError`], [`AuthError`],
//!   [`RateLimitError`], [`ValidationError`] or [`RequestError`]
//!
//! ## Examples
//!
//! ```rust,ignore
//! use medimate::{ClientConfig, CulturalContext, MalaysianState, MediMate, SupportedLanguage};
//!
//! let config = ClientConfig::builder("mk_live_your_key_here")
//!     .cultural_context(
//!         CulturalContext::default()
//!             .state(MalaysianState::KualaLumpur)
//!             .language(SupportedLanguage::Malay),
//!     )
//!     .build()?;
//! let client = MediMate::with_config(config)?;
//!
//! let times = client
//!     .cultural()
//!     .prayer_times(MalaysianState::KualaLumpur, None)
//!     .send()
//!     .await?;
//! for (prayer, time) in &times.prayer_times {
//!     println!("{prayer}: {time}");
//! }
//! ```

mod client;
mod config;
mod envelope;
mod error;
mod method;
pub mod models;
mod services;
pub mod validation;

pub use client::headers;
pub use client::{AsyncSession, Call, MediMate, Request};
pub use config::{
    ClientConfig, ClientConfigBuilder, CulturalContext, DEFAULT_BASE_URL, DEFAULT_MAX_RETRIES,
    DEFAULT_TIMEOUT, ENV_API_KEY, ENV_BASE_URL, ENV_DEBUG, ENV_LANGUAGE, ENV_MAX_RETRIES,
    ENV_STATE, ENV_TIMEOUT_SECS,
};
pub use envelope::{ApiErrorBody, ApiResponse, LocalizedMessages};
pub use error::{
    AuthError, ConfigError, DEFAULT_RETRY_AFTER, FieldViolation, MediMateError, RateLimitError,
    RequestError, Result, ValidationError,
};
pub use method::RestMethod;
pub use models::{
    AppointmentPriority, AppointmentRequest, AppointmentType, HalalStatus,
    HalalValidationRequest, HalalValidationResponse, MalaysianState, PatientRequest, PrayerTimes,
    SupportedLanguage, TranslationRequest, TranslationResponse,
};
pub use services::{
    AppointmentService, CulturalService, DEFAULT_PAGE_LIMIT, MAX_PAGE_LIMIT, PatientService,
};
