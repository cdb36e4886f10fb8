//! Top-level client error type.

use super::{ClientError, ConfigError, DecodeError};
use thiserror::Error;

/// Top-level error type for all Fabraic client operations.
///
/// Each variant wraps one error layer, so callers can either bubble the
/// whole thing up with `?` or match on the layer they care about.
///
/// ## Examples
///
/// ```rust,ignore
/// use fabraic::FabraicError;
///
/// fn handle_error(err: FabraicError) {
///     match err {
///         FabraicError::Config(e) => eprintln!("Misconfigured client: {e}"),
///         FabraicError::Client(e) => eprintln!("Request failed: {e}"),
///         FabraicError::Decode(e) => eprintln!("Unreadable response: {e}"),
///     }
/// }
/// ```
#[derive(Debug, Error)]
pub enum FabraicError {
    /// Client or service configuration errors.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Transport failures and non-success HTTP statuses.
    #[error(transparent)]
    Client(#[from] ClientError),

    /// Response body decoding errors.
    #[error(transparent)]
    Decode(#[from] DecodeError),
}

impl FabraicError {
    /// Returns the HTTP status code if the server answered with an error status.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::Client(e) => e.status_code(),
            _ => None,
        }
    }
}
