//! HTTP transport and status errors.

use thiserror::Error;

/// Errors from the HTTP layer.
///
/// Transport failures are passed through from `reqwest` untouched. Any response
/// with a 4xx or 5xx status becomes [`ClientError::HttpStatus`], carrying the
/// raw body so callers can inspect the server's explanation.
#[derive(Debug, Error)]
pub enum ClientError {
    /// DNS, connection, TLS or timeout failure in the underlying transport.
    #[error("HTTP request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// Server returned an error status code.
    #[error("HTTP {status}: {body}")]
    HttpStatus {
        /// The HTTP status code returned.
        status: u16,
        /// The raw response body.
        body: String,
    },
}

impl ClientError {
    /// Returns the HTTP status code if this is an HTTP status error.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::HttpStatus { status, .. } => Some(*status),
            Self::Transport(e) => e.status().map(|s| s.as_u16()),
        }
    }

    /// Returns `true` if the server rejected the credentials (401 or 403).
    pub fn is_auth_failure(&self) -> bool {
        matches!(self.status_code(), Some(401 | 403))
    }

    /// Returns `true` if repeating the request could plausibly succeed.
    ///
    /// The client itself never retries; this only classifies the failure.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::HttpStatus { status, .. } => *status >= 500 || *status == 429,
            Self::Transport(e) => e.is_timeout() || e.is_connect(),
        }
    }
}
