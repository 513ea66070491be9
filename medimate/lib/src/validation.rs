//! Local format checks for credentials and request fields.

use std::sync::LazyLock;

use chrono::NaiveTime;
use regex::Regex;

use crate::error::{FieldViolation, ValidationError};

/// Prefix every MediMate credential starts with (`mk_live_`, `mk_test_`).
pub const API_KEY_PREFIX: &str = "mk_";

/// A credential must be strictly longer than this.
pub const API_KEY_MIN_LENGTH: usize = 12;

static MYKAD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{6}-\d{2}-\d{4}$").expect("valid MyKad pattern"));

static MALAYSIAN_PHONE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\+60\d{9,10}$").expect("valid phone pattern"));

static TIME_OF_DAY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{2}:\d{2}$").expect("valid time pattern"));

/// Returns `true` if the credential has the expected prefix and length.
///
/// ## Examples
///
/// ```rust
/// use medimate::validation::validate_api_key;
///
/// assert!(validate_api_key("mk_test_0123456789"));
/// assert!(!validate_api_key("sk_test_0123456789"));
/// assert!(!validate_api_key("mk_test_"));
/// ```
pub fn validate_api_key(api_key: &str) -> bool {
    api_key.starts_with(API_KEY_PREFIX) && api_key.len() > API_KEY_MIN_LENGTH
}

/// Returns `true` for a MyKad number in `YYMMDD-PB-###G` form.
pub fn validate_mykad(mykad: &str) -> bool {
    MYKAD.is_match(mykad)
}

/// Returns `true` for a Malaysian phone number in `+60XXXXXXXXX` form.
pub fn validate_phone(phone: &str) -> bool {
    MALAYSIAN_PHONE.is_match(phone)
}

/// Returns `true` for a 24-hour `HH:MM` time.
pub fn validate_time_of_day(time: &str) -> bool {
    TIME_OF_DAY.is_match(time) && NaiveTime::parse_from_str(time, "%H:%M").is_ok()
}

/// Shortens a credential for logging: the first twelve characters and an ellipsis.
pub fn redact_api_key(api_key: &str) -> String {
    let prefix: String = api_key.chars().take(API_KEY_MIN_LENGTH).collect();
    format!("{prefix}...")
}

/// Collects field violations while a request model checks itself.
#[derive(Debug, Default)]
pub(crate) struct Violations(Vec<FieldViolation>);

impl Violations {
    /// Records a violation for `field` unless `ok` holds.
    pub(crate) fn check(&mut self, ok: bool, field: &str, message: &str) {
        if !ok {
            self.0.push(FieldViolation::new(field, message));
        }
    }

    pub(crate) fn finish(self) -> Result<(), ValidationError> {
        if self.0.is_empty() {
            Ok(())
        } else {
            Err(ValidationError::from_violations(self.0))
        }
    }
}
