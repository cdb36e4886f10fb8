//! Layered error types for the Fabraic client.
//!
//! The error hierarchy is structured for actionable diagnostics:
//! - [`FabraicError`] - Top-level error type for all client operations
//! - [`ConfigError`] - Construction-time configuration errors
//! - [`ClientError`] - Transport failures and non-success HTTP statuses
//! - [`DecodeError`] - Response bodies that are not valid JSON

mod client_error;
mod config_error;
mod decode_error;
mod fabraic_error;

pub use client_error::ClientError;
pub use config_error::ConfigError;
pub use decode_error::DecodeError;
pub use fabraic_error::FabraicError;

/// Result alias defaulting to [`FabraicError`].
pub type Result<T, E = FabraicError> = std::result::Result<T, E>;
