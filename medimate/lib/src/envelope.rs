//! The uniform response envelope every MediMate endpoint returns.

use std::collections::HashMap;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::RequestError;

/// Message text keyed by language code (`ms`, `en`, `zh`, `ta`).
pub type LocalizedMessages = HashMap<String, String>;

/// Response envelope: a success flag plus either a payload or an error.
///
/// ## Examples
///
/// ```rust
/// use medimate::ApiResponse;
///
/// let envelope: ApiResponse = serde_json::from_str(r#"{"success": true, "data": {"x": 1}}"#).unwrap();
/// assert!(envelope.success);
/// assert_eq!(envelope.data.unwrap()["x"], 1);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiResponse<T = Value> {
    /// Whether the server handled the request successfully.
    pub success: bool,
    /// The payload of a successful response.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    /// The error of an unsuccessful response.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ApiErrorBody>,
    /// Response metadata (pagination, rate limit counters, ...).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta: Option<Value>,
    /// Server-side correlation identifier.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_id: Option<String>,
}

impl ApiResponse<Value> {
    /// Decodes the payload into `T`, keeping the rest of the envelope.
    pub fn decode<T: DeserializeOwned>(self) -> Result<ApiResponse<T>, RequestError> {
        let data = self
            .data
            .map(serde_json::from_value)
            .transpose()
            .map_err(RequestError::Decode)?;
        Ok(ApiResponse {
            success: self.success,
            data,
            error: self.error,
            meta: self.meta,
            request_id: self.request_id,
        })
    }

    /// Decodes the payload into `T`, discarding the rest of the envelope.
    ///
    /// A missing payload decodes as JSON `null`, so `T` may be `Option<_>`,
    /// `()` or [`Value`] for endpoints without data.
    pub fn into_data<T: DeserializeOwned>(self) -> Result<T, RequestError> {
        serde_json::from_value(self.data.unwrap_or(Value::Null)).map_err(RequestError::Decode)
    }
}

/// Structured error carried by an unsuccessful envelope.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiErrorBody {
    /// Machine-readable code, e.g. `VALIDATION_ERROR`.
    #[serde(default = "unknown_code")]
    pub code: String,
    /// Human-readable message.
    #[serde(default)]
    pub message: String,
    /// The message in other languages.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cultural_message: Option<LocalizedMessages>,
    /// Structured details.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<Value>,
}

fn unknown_code() -> String {
    "UNKNOWN_ERROR".to_string()
}

impl ApiErrorBody {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            cultural_message: None,
            details: None,
        }
    }

    /// Extracts the `error` object from a raw envelope body, if there is one.
    pub(crate) fn from_envelope_bytes(body: &[u8]) -> Option<Self> {
        serde_json::from_slice::<ApiResponse>(body).ok()?.error
    }
}
