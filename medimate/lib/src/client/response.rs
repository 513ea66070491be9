//! Maps raw HTTP responses onto envelopes and typed errors.

use std::time::Duration;

use reqwest::StatusCode;
use reqwest::header::HeaderMap;
use tracing::{Span, info, warn};

use super::headers::{CULTURAL_EVENT, PRAYER_TIME};
use crate::envelope::{ApiErrorBody, ApiResponse};
use crate::error::{
    AuthError, MediMateError, RateLimitError, RequestError, Result, ValidationError,
};

/// Turns one HTTP exchange into exactly one envelope or one error.
///
/// - 429 becomes [`RateLimitError`] with the `Retry-After` wait
/// - 401 becomes [`AuthError`], whatever the body says
/// - any other non-2xx becomes [`RequestError::HttpStatus`]
/// - a 2xx envelope with `success: false` becomes [`ValidationError`] for
///   `VALIDATION_ERROR` and [`RequestError::Unsuccessful`] otherwise
pub(crate) fn interpret(
    status: StatusCode,
    headers: &HeaderMap,
    body: &[u8],
) -> Result<ApiResponse> {
    let span = Span::current();
    span.record("http.status_code", status.as_u16());

    if status == StatusCode::TOO_MANY_REQUESTS {
        span.record("otel.status_code", "UNSET");
        let err = RateLimitError::from_headers(headers);
        warn!(
            retry_after_secs = err.retry_after().as_secs(),
            "Rate limited by MediMate API"
        );
        return Err(err.into());
    }

    if status == StatusCode::UNAUTHORIZED {
        span.record("otel.status_code", "UNSET");
        warn!("MediMate API rejected the credential");
        return Err(AuthError::from_body(body).into());
    }

    if !status.is_success() {
        let otel_status = if status.is_server_error() {
            "ERROR"
        } else {
            "UNSET"
        };
        span.record("otel.status_code", otel_status);
        let err = RequestError::http_status(status.as_u16(), body);
        warn!(status = status.as_u16(), error = %err, "MediMate request failed");
        return Err(err.into());
    }

    let envelope = if body.iter().all(u8::is_ascii_whitespace) {
        ApiResponse {
            success: true,
            data: None,
            error: None,
            meta: None,
            request_id: None,
        }
    } else {
        serde_json::from_slice::<ApiResponse>(body).map_err(RequestError::Decode)?
    };

    if !envelope.success {
        span.record("otel.status_code", "UNSET");
        let error = envelope.error.unwrap_or_else(|| {
            ApiErrorBody::new("UNKNOWN_ERROR", "The API reported an unsuccessful request")
        });
        warn!(code = %error.code, request_id = ?envelope.request_id, "MediMate request unsuccessful");
        if error.code == ValidationError::CODE {
            return Err(ValidationError::from_api(error).into());
        }
        return Err(RequestError::Unsuccessful {
            status: status.as_u16(),
            error,
        }
        .into());
    }

    span.record("otel.status_code", "OK");
    log_cultural_hints(headers);
    Ok(envelope)
}

/// Logs the prayer-time and cultural-event hints a response may carry.
fn log_cultural_hints(headers: &HeaderMap) {
    if let Some(prayer) = headers.get(PRAYER_TIME).and_then(|v| v.to_str().ok()) {
        info!(prayer, "Current prayer time");
    }
    if let Some(event) = headers.get(CULTURAL_EVENT).and_then(|v| v.to_str().ok()) {
        info!(event, "Cultural event in progress");
    }
}

/// Maps a transport failure, reporting timeouts with the configured duration.
pub(crate) fn transport_error(err: reqwest::Error, timeout: Duration) -> MediMateError {
    Span::current().record("otel.status_code", "ERROR");
    if err.is_timeout() {
        let duration_ms = u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX);
        warn!(duration_ms, "MediMate request timed out");
        RequestError::Timeout { duration_ms }.into()
    } else {
        warn!(error = %err, "MediMate request could not be sent");
        RequestError::Transport(err).into()
    }
}
