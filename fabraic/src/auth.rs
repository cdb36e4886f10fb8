//! Credentials and their header projection.
//!
//! The Fabraic API accepts either a bearer access token or a static API key.
//! Exactly one of them is attached to every request; when both are supplied,
//! the access token wins.

use std::fmt;

use reqwest::header::{HeaderMap, HeaderName, HeaderValue, AUTHORIZATION};

use crate::error::ConfigError;

/// Header carrying a static API key.
pub const API_KEY_HEADER: &str = "x-api-key";

/// The credential a [`FabraicClient`](crate::FabraicClient) authenticates with.
///
/// ## Examples
///
/// ```rust
/// use fabraic::Credentials;
///
/// let creds = Credentials::resolve(Some("key-123"), Some("tok-456")).unwrap();
/// assert!(matches!(creds, Credentials::BearerToken(_)));
///
/// let creds = Credentials::resolve(Some("key-123"), None).unwrap();
/// assert!(matches!(creds, Credentials::ApiKey(_)));
/// ```
#[derive(Clone, PartialEq, Eq)]
pub enum Credentials {
    /// OAuth-style access token.
    /// Generates: `Authorization: Bearer <token>`
    BearerToken(String),

    /// Static API key.
    /// Generates: `x-api-key: <key>`
    ApiKey(String),
}

impl Credentials {
    /// Picks the credential to use from an optional key and token.
    ///
    /// Empty strings count as absent. A non-empty token always takes
    /// precedence over the key.
    ///
    /// ## Errors
    ///
    /// Returns [`ConfigError::MissingCredentials`] if neither is usable.
    pub fn resolve(api_key: Option<&str>, access_token: Option<&str>) -> Result<Self, ConfigError> {
        let present = |value: Option<&str>| value.filter(|v| !v.is_empty()).map(str::to_string);

        if let Some(token) = present(access_token) {
            return Ok(Self::BearerToken(token));
        }
        if let Some(key) = present(api_key) {
            return Ok(Self::ApiKey(key));
        }
        Err(ConfigError::MissingCredentials)
    }

    /// Short name of the scheme, safe to log.
    pub fn scheme(&self) -> &'static str {
        match self {
            Self::BearerToken(_) => "bearer",
            Self::ApiKey(_) => "api_key",
        }
    }

    /// Returns the header this credential is sent as.
    ///
    /// The value is flagged sensitive so it is redacted from `Debug` output.
    ///
    /// ## Errors
    ///
    /// Returns [`ConfigError::InvalidHeader`] if the secret contains characters
    /// that are not allowed in a header value.
    pub fn header(&self) -> Result<(HeaderName, HeaderValue), ConfigError> {
        let (name, raw) = match self {
            Self::BearerToken(token) => (AUTHORIZATION, format!("Bearer {token}")),
            Self::ApiKey(key) => (HeaderName::from_static(API_KEY_HEADER), key.clone()),
        };

        let mut value = HeaderValue::try_from(raw)
            .map_err(|e| ConfigError::invalid_header(name.as_str(), e))?;
        value.set_sensitive(true);
        Ok((name, value))
    }

    /// Inserts this credential into a header map, replacing any previous value.
    pub(crate) fn apply(&self, headers: &mut HeaderMap) -> Result<(), ConfigError> {
        let (name, value) = self.header()?;
        headers.insert(name, value);
        Ok(())
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BearerToken(_) => f.debug_tuple("BearerToken").field(&"<redacted>").finish(),
            Self::ApiKey(_) => f.debug_tuple("ApiKey").field(&"<redacted>").finish(),
        }
    }
}
