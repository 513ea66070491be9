//! The MediMate client and its request plumbing.
//!
//! [`MediMate`] owns two transports: a blocking one built with the client and
//! an async one created on first async use. Every operation returns a
//! [`Call`], which the caller sends with either transport.

mod call;
pub mod headers;
mod request;
mod response;
mod session;

use reqwest::header::HeaderMap;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tokio::sync::OnceCell;
use tracing::{Span, debug, info, instrument, warn};
use url::Url;

pub use call::Call;
pub use request::Request;
pub use session::AsyncSession;

use response::{interpret, transport_error};

use crate::config::ClientConfig;
use crate::envelope::ApiResponse;
use crate::error::{ConfigError, Result};
use crate::services::{AppointmentService, CulturalService, PatientService};
use crate::validation::redact_api_key;

/// Client for the MediMate Malaysia healthcare API.
///
/// The configuration is fixed at construction. The client is `Send + Sync`;
/// share it behind an `Arc` or by reference for concurrent calls.
///
/// ## Examples
///
/// ```rust,ignore
/// use medimate::{MediMate, MalaysianState};
///
/// let client = MediMate::new("mk_live_your_key_here")?;
/// let status = client
///     .cultural()
///     .current_prayer_status(MalaysianState::Selangor)
///     .send()
///     .await?;
/// println!("{}", status.current_prayer);
/// client.close();
/// ```
#[derive(Debug)]
pub struct MediMate {
    config: ClientConfig,
    headers: HeaderMap,
    blocking: reqwest::blocking::Client,
    transport: OnceCell<reqwest::Client>,
}

impl MediMate {
    /// Creates a client with the default configuration for `api_key`.
    ///
    /// ## Errors
    ///
    /// Returns [`ConfigError::InvalidApiKey`] if the credential does not
    /// start with `mk_` or is too short. No request is made.
    pub fn new(api_key: impl Into<String>) -> Result<Self, ConfigError> {
        Self::with_config(ClientConfig::new(api_key)?)
    }

    /// Creates a client from `MEDIMATE_*` environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::with_config(ClientConfig::from_env()?)
    }

    /// Creates a client from an explicit configuration.
    ///
    /// ## Errors
    ///
    /// Returns an error if a header value cannot be encoded or the blocking
    /// transport cannot be built.
    pub fn with_config(config: ClientConfig) -> Result<Self, ConfigError> {
        let headers = headers::default_headers(&config)?;
        let blocking = build_blocking(&config, headers.clone())?;

        info!(
            api_key = %redact_api_key(config.api_key()),
            base_url = %config.base_url(),
            "MediMate client initialized"
        );

        Ok(Self {
            config,
            headers,
            blocking,
            transport: OnceCell::new(),
        })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Prayer times, translation, halal validation and calendar endpoints.
    pub fn cultural(&self) -> CulturalService<'_> {
        CulturalService::new(self)
    }

    pub fn patients(&self) -> PatientService<'_> {
        PatientService::new(self)
    }

    pub fn appointments(&self) -> AppointmentService<'_> {
        AppointmentService::new(self)
    }

    /// `GET /health`.
    pub fn health(&self) -> Call<'_, Value> {
        self.call(Request::get("health"))
    }

    /// `GET /context`: the cultural context the server resolved for this client.
    pub fn context(&self) -> Call<'_, Value> {
        self.call(Request::get("context"))
    }

    /// Wraps an arbitrary request as a typed call.
    pub fn call<T: DeserializeOwned>(&self, request: Request) -> Call<'_, T> {
        Call::new(self, Ok(request))
    }

    pub(crate) fn prepared<T: DeserializeOwned>(&self, request: Result<Request>) -> Call<'_, T> {
        Call::new(self, request)
    }

    /// Returns `true` once the async transport exists.
    pub fn has_async_transport(&self) -> bool {
        self.transport.initialized()
    }

    /// Releases the async transport; the next async call creates a new one.
    pub fn close_async(&mut self) {
        if self.transport.take().is_some() {
            debug!("Async transport released");
        }
    }

    /// Scopes async work so the async transport is released afterwards.
    pub fn session(&mut self) -> AsyncSession<'_> {
        AsyncSession::new(self)
    }

    /// Releases both transports.
    pub fn close(mut self) {
        self.close_async();
        debug!("MediMate client closed");
    }

    async fn transport(&self) -> Result<&reqwest::Client, ConfigError> {
        self.transport
            .get_or_try_init(|| async {
                debug!("Creating async transport");
                reqwest::Client::builder()
                    .timeout(self.config.timeout())
                    .default_headers(self.headers.clone())
                    .build()
                    .map_err(ConfigError::Transport)
            })
            .await
    }

    /// Resolves the request URL and records it on the current span.
    fn prepare(&self, request: &Request) -> Result<Url> {
        let span = Span::current();
        span.record("http.method", request.method().to_string().as_str());
        let url = request.url(self.config.base_url())?;
        span.record("http.url", url.as_str());

        debug!(
            method = %request.method(),
            url = %url,
            idempotent = request.method().is_idempotent(),
            "Sending MediMate request"
        );
        if request.body().is_some() && !request.method().has_body() {
            warn!(method = %request.method(), "Request body attached to a method without one");
        }
        if self.config.debug() {
            if let Some(body) = request.body() {
                debug!(body = %String::from_utf8_lossy(body), "Request body");
            }
        }
        Ok(url)
    }

    #[instrument(
        name = "medimate_request",
        skip(self, request),
        fields(
            http.method = tracing::field::Empty,
            http.url = tracing::field::Empty,
            http.status_code = tracing::field::Empty,
            otel.kind = "client",
            otel.status_code = tracing::field::Empty,
        )
    )]
    pub(crate) async fn execute(&self, request: &Request) -> Result<ApiResponse> {
        let url = self.prepare(request)?;
        let transport = self.transport().await?;

        let mut builder = transport.request(request.method().to_reqwest(), url);
        if let Some(body) = request.body() {
            builder = builder.body(body.clone());
        }

        let timeout = self.config.timeout();
        let response = builder
            .send()
            .await
            .map_err(|e| transport_error(e, timeout))?;
        let status = response.status();
        let headers = response.headers().clone();
        let body = response
            .bytes()
            .await
            .map_err(|e| transport_error(e, timeout))?;

        interpret(status, &headers, &body)
    }

    #[instrument(
        name = "medimate_request",
        skip(self, request),
        fields(
            http.method = tracing::field::Empty,
            http.url = tracing::field::Empty,
            http.status_code = tracing::field::Empty,
            otel.kind = "client",
            otel.status_code = tracing::field::Empty,
        )
    )]
    pub(crate) fn execute_blocking(&self, request: &Request) -> Result<ApiResponse> {
        let url = self.prepare(request)?;

        let mut builder = self.blocking.request(request.method().to_reqwest(), url);
        if let Some(body) = request.body() {
            builder = builder.body(body.clone());
        }

        let timeout = self.config.timeout();
        let response = builder
            .send()
            .map_err(|e| transport_error(e, timeout))?;
        let status = response.status();
        let headers = response.headers().clone();
        let body = response
            .bytes()
            .map_err(|e| transport_error(e, timeout))?;

        interpret(status, &headers, &body)
    }
}

/// Builds the blocking transport on a helper thread.
///
/// The blocking client starts its own runtime, which cannot happen on a
/// thread that is already inside an async runtime.
fn build_blocking(
    config: &ClientConfig,
    headers: HeaderMap,
) -> Result<reqwest::blocking::Client, ConfigError> {
    let timeout = config.timeout();
    std::thread::scope(|scope| {
        scope
            .spawn(move || {
                reqwest::blocking::Client::builder()
                    .timeout(timeout)
                    .default_headers(headers)
                    .build()
            })
            .join()
    })
    .map_err(|_| ConfigError::TransportInitPanicked)?
    .map_err(ConfigError::Transport)
}
