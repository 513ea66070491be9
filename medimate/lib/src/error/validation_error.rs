//! Input validation errors.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use crate::envelope::{ApiErrorBody, LocalizedMessages};

/// A single rejected input field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldViolation {
    /// Dotted path of the field, e.g. `personal_info.mykad_number`.
    pub field: String,
    /// Why the value was rejected.
    pub message: String,
}

impl FieldViolation {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Caller input was malformed.
///
/// Raised locally, before any request is sent, when a request model fails
/// its format checks; also raised when the server answers with a
/// `VALIDATION_ERROR` envelope.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{message}")]
pub struct ValidationError {
    message: String,
    violations: Vec<FieldViolation>,
    details: Option<Value>,
    cultural_message: Option<LocalizedMessages>,
}

impl ValidationError {
    /// Envelope error code the server uses for validation failures.
    pub const CODE: &'static str = "VALIDATION_ERROR";

    /// Creates a validation error with a message and no details.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            violations: Vec::new(),
            details: None,
            cultural_message: None,
        }
    }

    /// Attaches structured details.
    pub fn with_details(mut self, details: Value) -> Self {
        self.details = Some(details);
        self
    }

    /// Builds an error listing every rejected field.
    pub fn from_violations(violations: Vec<FieldViolation>) -> Self {
        let summary = violations
            .iter()
            .map(|v| format!("{}: {}", v.field, v.message))
            .collect::<Vec<_>>()
            .join("; ");
        let details = Value::Array(
            violations
                .iter()
                .map(|v| serde_json::json!({ "field": v.field, "message": v.message }))
                .collect(),
        );
        Self {
            message: format!("Validation failed: {summary}"),
            violations,
            details: Some(details),
            cultural_message: None,
        }
    }

    pub(crate) fn from_api(error: ApiErrorBody) -> Self {
        let violations = error
            .details
            .as_ref()
            .and_then(|d| serde_json::from_value::<Vec<FieldViolation>>(d.clone()).ok())
            .unwrap_or_default();
        Self {
            message: error.message,
            violations,
            details: error.details,
            cultural_message: error.cultural_message,
        }
    }

    /// Human-readable message.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Fields that failed validation, when known.
    pub fn violations(&self) -> &[FieldViolation] {
        &self.violations
    }

    /// Structured details.
    pub fn details(&self) -> Option<&Value> {
        self.details.as_ref()
    }

    /// Localized variants of the message, keyed by language code.
    pub fn cultural_message(&self) -> Option<&LocalizedMessages> {
        self.cultural_message.as_ref()
    }
}
