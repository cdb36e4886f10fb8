//! Request execution with tracing instrumentation.
//!
//! This module provides the [`FabraicClient`] struct, which owns the base URL,
//! the authenticated base headers and the shared HTTP session, and performs
//! every HTTP round trip made by the crate.

use std::fmt;
use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderName, HeaderValue, ACCEPT};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, info, instrument, warn, Span};
use url::Url;

use crate::auth::Credentials;
use crate::error::{ClientError, ConfigError, Result};
use crate::path::{ensure_leading_slash, placeholders, substitute_params};
use crate::request::{merge_headers, RequestOptions};
use crate::response::{decode_body, decode_value};
use crate::service::ServiceClient;

/// Base URL used when none is configured.
pub const DEFAULT_BASE_URL: &str = "https://api.fabraic.co";

/// Environment variable read by [`FabraicClientBuilder::from_env`] for the API key.
pub const ENV_API_KEY: &str = "FABRAIC_API_KEY";
/// Environment variable read by [`FabraicClientBuilder::from_env`] for the access token.
pub const ENV_ACCESS_TOKEN: &str = "FABRAIC_ACCESS_TOKEN";
/// Environment variable read by [`FabraicClientBuilder::from_env`] for the base URL.
pub const ENV_BASE_URL: &str = "FABRAIC_BASE_URL";

/// Builder for configuring a [`FabraicClient`].
#[derive(Default)]
pub struct FabraicClientBuilder {
    api_key: Option<String>,
    access_token: Option<String>,
    base_url: Option<String>,
    http_client: Option<reqwest::Client>,
    timeout: Option<Duration>,
    default_headers: HeaderMap,
}

impl FabraicClientBuilder {
    /// Creates a builder with nothing configured.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a builder seeded from the environment.
    ///
    /// Reads:
    /// - `FABRAIC_API_KEY`: static API key
    /// - `FABRAIC_ACCESS_TOKEN`: bearer access token
    /// - `FABRAIC_BASE_URL`: base URL override
    ///
    /// Unset or empty variables are treated as absent. Nothing is validated
    /// until [`build`](Self::build).
    pub fn from_env() -> Self {
        let read = |name: &str| std::env::var(name).ok().filter(|v| !v.is_empty());

        let builder = Self {
            api_key: read(ENV_API_KEY),
            access_token: read(ENV_ACCESS_TOKEN),
            base_url: read(ENV_BASE_URL),
            ..Self::default()
        };

        info!(
            api_key = builder.api_key.is_some(),
            access_token = builder.access_token.is_some(),
            base_url = builder.base_url.as_deref().unwrap_or(DEFAULT_BASE_URL),
            "Fabraic configuration read from environment"
        );

        builder
    }

    /// Sets the static API key, sent as `x-api-key`.
    #[must_use]
    pub fn api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    /// Sets the access token, sent as `Authorization: Bearer <token>`.
    ///
    /// Takes precedence over [`api_key`](Self::api_key) when both are set.
    #[must_use]
    pub fn access_token(mut self, access_token: impl Into<String>) -> Self {
        self.access_token = Some(access_token.into());
        self
    }

    /// Overrides the base URL (defaults to [`DEFAULT_BASE_URL`]).
    ///
    /// Trailing slashes are stripped.
    #[must_use]
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Uses an existing `reqwest::Client` as the HTTP session.
    ///
    /// Useful for sharing a connection pool or supplying custom transport
    /// settings. The client's own default headers still apply, but the
    /// Fabraic base headers override them on collision.
    #[must_use]
    pub fn http_client(mut self, client: reqwest::Client) -> Self {
        self.http_client = Some(client);
        self
    }

    /// Sets a request timeout on the session the builder creates.
    ///
    /// There is no timeout by default. Ignored when an HTTP client is
    /// supplied through [`http_client`](Self::http_client).
    #[must_use]
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Adds a header sent with every request.
    ///
    /// `Accept` and the auth header always win over headers added here.
    ///
    /// ## Examples
    ///
    /// ```rust,ignore
    /// let client = FabraicClient::builder()
    ///     .api_key("key-123")
    ///     .default_header("x-tenant", "acme")?
    ///     .build()?;
    /// ```
    ///
    /// ## Errors
    ///
    /// Returns an error if the header name or value is invalid.
    pub fn default_header(
        mut self,
        name: impl AsRef<str>,
        value: impl AsRef<str>,
    ) -> Result<Self> {
        let name = name.as_ref();
        let header_name =
            HeaderName::try_from(name).map_err(|e| ConfigError::invalid_header(name, e))?;
        let header_value = HeaderValue::try_from(value.as_ref())
            .map_err(|e| ConfigError::invalid_header(name, e))?;
        self.default_headers.insert(header_name, header_value);
        Ok(self)
    }

    /// Builds the [`FabraicClient`].
    ///
    /// ## Errors
    ///
    /// - [`ConfigError::MissingCredentials`] if neither an API key nor an
    ///   access token was provided
    /// - [`ConfigError::InvalidUrl`] if the base URL does not parse
    /// - [`ConfigError::InvalidHeader`] if a credential cannot be sent as a header
    /// - [`ClientError::Transport`] if the default HTTP client cannot be created
    pub fn build(self) -> Result<FabraicClient> {
        let credentials =
            Credentials::resolve(self.api_key.as_deref(), self.access_token.as_deref())?;

        let base_url = self
            .base_url
            .as_deref()
            .unwrap_or(DEFAULT_BASE_URL)
            .trim_end_matches('/')
            .to_string();
        Url::parse(&base_url).map_err(ConfigError::InvalidUrl)?;

        let mut base_headers = self.default_headers;
        base_headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        credentials.apply(&mut base_headers)?;

        let http = match self.http_client {
            Some(client) => {
                if self.timeout.is_some() {
                    debug!("Timeout ignored for injected HTTP client");
                }
                client
            }
            None => {
                let mut builder = reqwest::Client::builder();
                if let Some(timeout) = self.timeout {
                    builder = builder.timeout(timeout);
                }
                builder.build().map_err(ClientError::Transport)?
            }
        };

        debug!(%base_url, auth = credentials.scheme(), "Fabraic client configured");

        Ok(FabraicClient {
            http,
            base_url,
            base_headers,
            credentials,
        })
    }
}

impl fmt::Debug for FabraicClientBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FabraicClientBuilder")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("access_token", &self.access_token.as_ref().map(|_| "<redacted>"))
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}

/// Authenticated HTTP client for the Fabraic API.
///
/// Holds the base URL, the base headers (`Accept` plus exactly one credential)
/// and the shared `reqwest` session. Base headers are computed once at
/// construction and never change; each request merges its own headers on top.
///
/// Cloning is cheap and every clone shares the same connection pool.
///
/// ## Examples
///
/// ```rust,ignore
/// use fabraic::{FabraicClient, RequestOptions};
///
/// let client = FabraicClient::builder()
///     .access_token("tok-123")
///     .build()?;
///
/// let orders = client.service("orders")?;
/// let order = orders
///     .get("/orders/{id}", RequestOptions::new().path_param("id", 42))
///     .await?;
/// ```
#[derive(Clone)]
pub struct FabraicClient {
    http: reqwest::Client,
    base_url: String,
    base_headers: HeaderMap,
    credentials: Credentials,
}

impl FabraicClient {
    /// Creates a new builder for configuring a client.
    pub fn builder() -> FabraicClientBuilder {
        FabraicClientBuilder::new()
    }

    /// Creates a client authenticating with a static API key.
    ///
    /// ## Errors
    ///
    /// Returns an error if the key is empty or not a valid header value.
    pub fn with_api_key(api_key: impl Into<String>) -> Result<Self> {
        Self::builder().api_key(api_key).build()
    }

    /// Creates a client authenticating with a bearer access token.
    ///
    /// ## Errors
    ///
    /// Returns an error if the token is empty or not a valid header value.
    pub fn with_access_token(access_token: impl Into<String>) -> Result<Self> {
        Self::builder().access_token(access_token).build()
    }

    /// Returns the normalized base URL (no trailing slash).
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Returns the headers sent with every request.
    pub fn base_headers(&self) -> &HeaderMap {
        &self.base_headers
    }

    /// Returns the credential this client authenticates with.
    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    /// Returns a client scoped to `/{service_path}/v1`.
    ///
    /// ## Errors
    ///
    /// Returns [`ConfigError::EmptyServicePath`] if the path is empty after
    /// trimming slashes and whitespace.
    pub fn service(&self, service_path: &str) -> Result<ServiceClient<'_>, ConfigError> {
        ServiceClient::new(self, service_path, None)
    }

    /// Returns a client scoped to `/{service_path}/{version}`.
    ///
    /// An empty version falls back to `v1`.
    ///
    /// ## Errors
    ///
    /// Returns [`ConfigError::EmptyServicePath`] if the path is empty after
    /// trimming slashes and whitespace.
    pub fn service_with_version(
        &self,
        service_path: &str,
        version: &str,
    ) -> Result<ServiceClient<'_>, ConfigError> {
        ServiceClient::new(self, service_path, Some(version))
    }

    /// Sends a request and decodes the JSON response.
    ///
    /// `path` is relative to the base URL and gains a leading `/` if it lacks
    /// one. Any `options.path_params` are substituted into it first.
    ///
    /// Returns [`Value::Null`] when the response body is empty.
    ///
    /// ## Errors
    ///
    /// Returns an error if:
    /// - A per-request header is invalid or the URL does not parse ([`ConfigError`])
    /// - The transport fails ([`ClientError::Transport`])
    /// - The server answers 4xx or 5xx ([`ClientError::HttpStatus`])
    /// - The body is not valid JSON ([`DecodeError`](crate::DecodeError))
    #[instrument(
        name = "fabraic_request",
        skip(self, path, options),
        fields(
            http.method = %options.method,
            http.url = tracing::field::Empty,
            http.status_code = tracing::field::Empty,
            otel.kind = "client",
            otel.status_code = tracing::field::Empty,
        )
    )]
    pub async fn request(&self, path: &str, options: RequestOptions) -> Result<Value> {
        let RequestOptions {
            method,
            query,
            body,
            headers,
            path_params,
        } = options;

        let path = substitute_params(&ensure_leading_slash(path), &path_params);
        let unresolved = placeholders(&path);
        if !unresolved.is_empty() {
            warn!(?unresolved, %path, "Request path has unresolved placeholders");
        }

        let url = Url::parse(&format!("{}{}", self.base_url, path))
            .map_err(ConfigError::InvalidUrl)?;
        Span::current().record("http.url", url.as_str());

        let request_headers = merge_headers(&self.base_headers, &headers)?;

        let mut request = self
            .http
            .request(method.to_reqwest(), url)
            .headers(request_headers);
        if !query.is_empty() {
            request = request.query(&query);
        }
        if let Some(body) = &body {
            request = request.json(body);
        }

        let response = match request.send().await {
            Ok(response) => response,
            Err(e) => {
                warn!(error = %e, "Fabraic request failed");
                return Err(ClientError::Transport(e).into());
            }
        };

        let status = response.status();
        let status_code = status.as_u16();
        Span::current().record("http.status_code", status_code);
        debug!(http.status_code = status_code, "Received API response");

        if status.is_client_error() || status.is_server_error() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| status.to_string());

            let otel_status = if status.is_server_error() {
                "ERROR"
            } else {
                "UNSET"
            };
            Span::current().record("otel.status_code", otel_status);
            warn!(status = status_code, %body, "API returned error status");

            return Err(ClientError::HttpStatus {
                status: status_code,
                body,
            }
            .into());
        }

        Span::current().record("otel.status_code", "OK");

        let bytes = response.bytes().await.map_err(ClientError::Transport)?;
        let value = decode_body(&bytes)?;
        debug!(body.bytes = bytes.len(), "Request completed");

        Ok(value)
    }

    /// Like [`request`](Self::request), then deserializes the JSON into `T`.
    ///
    /// An empty body arrives as JSON `null`, so use `Option<T>` for endpoints
    /// that may answer without content.
    ///
    /// ## Errors
    ///
    /// Everything [`request`](Self::request) can return, plus
    /// [`DecodeError::Json`](crate::DecodeError::Json) if the value does not
    /// match `T`.
    pub async fn request_as<T: DeserializeOwned>(
        &self,
        path: &str,
        options: RequestOptions,
    ) -> Result<T> {
        let value = self.request(path, options).await?;
        Ok(decode_value(value)?)
    }
}

impl fmt::Debug for FabraicClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FabraicClient")
            .field("base_url", &self.base_url)
            .field("credentials", &self.credentials)
            .finish_non_exhaustive()
    }
}
