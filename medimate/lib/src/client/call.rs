//! A typed call that can be sent blocking or async.

use std::marker::PhantomData;

use serde::de::DeserializeOwned;

use super::{MediMate, Request};
use crate::envelope::ApiResponse;
use crate::error::Result;

/// One prepared API call producing a `T`.
///
/// Nothing is sent until one of the `send*` methods runs. The same call
/// description drives both transports, so the blocking and async paths build
/// identical requests and map responses identically. A call whose request
/// could not be prepared (for example, a request model that failed local
/// validation) fails when sent, before any network traffic.
///
/// ## Examples
///
/// ```rust,ignore
/// let times = client
///     .cultural()
///     .prayer_times(MalaysianState::KualaLumpur, None)
///     .send()
///     .await?;
///
/// // Same call, on the current thread:
/// let times = client
///     .cultural()
///     .prayer_times(MalaysianState::KualaLumpur, None)
///     .send_blocking()?;
/// ```
#[must_use = "a call does nothing until it is sent"]
pub struct Call<'a, T> {
    client: &'a MediMate,
    request: Result<Request>,
    _output: PhantomData<fn() -> T>,
}

impl<T> std::fmt::Debug for Call<'_, T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Call").field("request", &self.request).finish()
    }
}

impl<'a, T: DeserializeOwned> Call<'a, T> {
    pub(crate) fn new(client: &'a MediMate, request: Result<Request>) -> Self {
        Self {
            client,
            request,
            _output: PhantomData,
        }
    }

    /// The request this call will send, if it could be prepared.
    pub fn request(&self) -> Option<&Request> {
        self.request.as_ref().ok()
    }

    /// Sends the call and returns the decoded `data` payload.
    pub async fn send(self) -> Result<T> {
        let envelope = self.client.execute(&self.request?).await?;
        Ok(envelope.into_data()?)
    }

    /// Sends the call and returns the whole envelope with a decoded payload.
    pub async fn send_envelope(self) -> Result<ApiResponse<T>> {
        let envelope = self.client.execute(&self.request?).await?;
        Ok(envelope.decode()?)
    }

    /// Sends the call on the current thread, blocking until it completes.
    ///
    /// Must not be called from within an async runtime.
    pub fn send_blocking(self) -> Result<T> {
        let envelope = self.client.execute_blocking(&self.request?)?;
        Ok(envelope.into_data()?)
    }

    /// Blocking counterpart of [`send_envelope`](Self::send_envelope).
    pub fn send_envelope_blocking(self) -> Result<ApiResponse<T>> {
        let envelope = self.client.execute_blocking(&self.request?)?;
        Ok(envelope.decode()?)
    }
}
