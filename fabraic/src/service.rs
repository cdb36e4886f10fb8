//! Versioned, path-scoped service clients.
//!
//! A [`ServiceClient`] borrows a [`FabraicClient`] and prefixes every request
//! path with `/{service_path}/{version}`. It owns no connection state of its
//! own, so creating one is cheap and any number can share a root client.

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::client::FabraicClient;
use crate::error::{ConfigError, Result};
use crate::method::RestMethod;
use crate::path::{ensure_leading_slash, substitute_params, PathParams};
use crate::request::RequestOptions;

/// Version used when none (or an empty one) is given.
pub const DEFAULT_SERVICE_VERSION: &str = "v1";

/// Client for one versioned group of API resources.
///
/// ## Examples
///
/// ```rust,ignore
/// use fabraic::{FabraicClient, RequestOptions};
///
/// let client = FabraicClient::with_api_key("key-123")?;
/// let orders = client.service("/orders/")?;
/// assert_eq!(orders.prefix(), "/orders/v1");
///
/// // GET https://api.fabraic.co/orders/v1/orders/A%2F17
/// let order = orders
///     .get("/orders/{id}", RequestOptions::new().path_param("id", "A/17"))
///     .await?;
/// ```
#[derive(Debug, Clone)]
pub struct ServiceClient<'a> {
    client: &'a FabraicClient,
    service_path: String,
    version: String,
}

fn trim_segment(value: &str) -> &str {
    value.trim_matches(|c: char| c == '/' || c.is_whitespace())
}

impl<'a> ServiceClient<'a> {
    /// Creates a service client over `client`.
    ///
    /// Slashes and whitespace are trimmed from both ends of `service_path`
    /// and `version`. A missing or empty version becomes `v1`.
    ///
    /// ## Errors
    ///
    /// Returns [`ConfigError::EmptyServicePath`] if nothing is left of
    /// `service_path` after trimming.
    pub fn new(
        client: &'a FabraicClient,
        service_path: &str,
        version: Option<&str>,
    ) -> Result<Self, ConfigError> {
        let service_path = trim_segment(service_path);
        if service_path.is_empty() {
            return Err(ConfigError::EmptyServicePath);
        }

        let version = version
            .map(trim_segment)
            .filter(|v| !v.is_empty())
            .unwrap_or(DEFAULT_SERVICE_VERSION);

        Ok(Self {
            client,
            service_path: service_path.to_string(),
            version: version.to_string(),
        })
    }

    /// Returns the root client requests are delegated to.
    pub fn client(&self) -> &'a FabraicClient {
        self.client
    }

    pub fn service_path(&self) -> &str {
        &self.service_path
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    /// Returns `/{service_path}/{version}`.
    pub fn prefix(&self) -> String {
        format!("/{}/{}", self.service_path, self.version)
    }

    /// Builds the full request path for a relative path template.
    ///
    /// Each `{key}` in `path` is replaced by the percent-encoded value from
    /// `path_params`. Unknown keys are ignored and unmatched placeholders are
    /// left as they are.
    ///
    /// ```rust
    /// use fabraic::{FabraicClient, PathParams};
    ///
    /// let client = FabraicClient::with_api_key("key").unwrap();
    /// let widgets = client.service("inventory").unwrap();
    ///
    /// let params = PathParams::new().with("id", "a b");
    /// assert_eq!(
    ///     widgets.build_path("/widgets/{id}", &params),
    ///     "/inventory/v1/widgets/a%20b"
    /// );
    /// ```
    pub fn build_path(&self, path: &str, path_params: &PathParams) -> String {
        let relative = substitute_params(&ensure_leading_slash(path), path_params);
        format!("{}{}", self.prefix(), relative)
    }

    /// Sends a request under this service's prefix.
    ///
    /// `options.path_params` are resolved against `path` here; everything
    /// else is handed to [`FabraicClient::request`] unchanged.
    ///
    /// ## Errors
    ///
    /// Same as [`FabraicClient::request`].
    pub async fn request(&self, path: &str, mut options: RequestOptions) -> Result<Value> {
        let path_params = std::mem::take(&mut options.path_params);
        let full_path = self.build_path(path, &path_params);
        self.client.request(&full_path, options).await
    }

    /// Sends a request under this service's prefix and deserializes the
    /// response into `T`.
    ///
    /// ## Errors
    ///
    /// Same as [`FabraicClient::request_as`].
    pub async fn request_as<T: DeserializeOwned>(
        &self,
        path: &str,
        mut options: RequestOptions,
    ) -> Result<T> {
        let path_params = std::mem::take(&mut options.path_params);
        let full_path = self.build_path(path, &path_params);
        self.client.request_as(&full_path, options).await
    }

    /// Sends a `GET` request. Any method set in `options` is replaced.
    pub async fn get(&self, path: &str, options: RequestOptions) -> Result<Value> {
        self.request(path, options.method(RestMethod::Get)).await
    }

    /// Sends a `POST` request. Any method set in `options` is replaced.
    pub async fn post(&self, path: &str, options: RequestOptions) -> Result<Value> {
        self.request(path, options.method(RestMethod::Post)).await
    }

    /// Sends a `PUT` request. Any method set in `options` is replaced.
    pub async fn put(&self, path: &str, options: RequestOptions) -> Result<Value> {
        self.request(path, options.method(RestMethod::Put)).await
    }

    /// Sends a `PATCH` request. Any method set in `options` is replaced.
    pub async fn patch(&self, path: &str, options: RequestOptions) -> Result<Value> {
        self.request(path, options.method(RestMethod::Patch)).await
    }

    /// Sends a `DELETE` request. Any method set in `options` is replaced.
    pub async fn delete(&self, path: &str, options: RequestOptions) -> Result<Value> {
        self.request(path, options.method(RestMethod::Delete)).await
    }
}
