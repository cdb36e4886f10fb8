//! Client and service configuration errors.

use thiserror::Error;

/// Errors in client or service configuration.
///
/// These are raised synchronously while building a [`FabraicClient`](crate::FabraicClient)
/// or deriving a [`ServiceClient`](crate::ServiceClient), and typically point at a
/// programmer error rather than anything the server did.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Neither an API key nor an access token was supplied.
    #[error("Provide either an API key or an access token")]
    MissingCredentials,

    /// The service path was empty after trimming slashes and whitespace.
    #[error("Service path must be a non-empty string")]
    EmptyServicePath,

    /// URL parsing failed.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// A header name or value could not be used in an HTTP request.
    #[error("Invalid header `{name}`: {message}")]
    InvalidHeader {
        /// The offending header name.
        name: String,
        /// Why the header was rejected.
        message: String,
    },
}

impl ConfigError {
    /// Creates an invalid header error.
    pub fn invalid_header(name: impl Into<String>, message: impl ToString) -> Self {
        Self::InvalidHeader {
            name: name.into(),
            message: message.to_string(),
        }
    }
}
