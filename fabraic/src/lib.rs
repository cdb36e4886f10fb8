//! Authenticated, versioned REST client for the Fabraic API.
//!
//! The crate is organized as two layers:
//!
//! - [`FabraicClient`] owns the base URL, the credentials and the shared HTTP
//!   session, and performs the actual round trips.
//! - [`ServiceClient`] scopes a root client to `/{service}/{version}` and
//!   resolves `{param}` placeholders in request paths.
//!
//! ## Features
//!
//! - **Single credential per client**: bearer access token or `x-api-key`,
//!   with the token preferred when both are configured
//! - **Strict path encoding**: substituted values escape everything outside
//!   the RFC 3986 unreserved set
//! - **Async-first HTTP client**: Built on `reqwest`
//! - **Layered error handling**: Configuration, transport/status and decode
//!   failures are separate error types
//! - **Tracing**: Every request runs inside an OpenTelemetry-style span
//!
//! ## Example
//!
//! ```rust,ignore
//! use fabraic::{FabraicClient, RequestOptions};
//! use serde_json::json;
//!
//! let client = FabraicClient::builder()
//!     .api_key("key-123")
//!     .build()?;
//!
//! let inventory = client.service("inventory")?;
//!
//! // GET https://api.fabraic.co/inventory/v1/widgets/a%20b
//! let widget = inventory
//!     .get("/widgets/{id}", RequestOptions::new().path_param("id", "a b"))
//!     .await?;
//!
//! // POST https://api.fabraic.co/inventory/v1/widgets
//! inventory
//!     .post("/widgets", RequestOptions::new().body(json!({ "name": "cog" })))
//!     .await?;
//! ```

pub mod auth;
pub mod client;
pub mod error;
pub mod method;
pub mod path;
pub mod request;
pub mod response;
pub mod service;

// Re-exports for convenience
pub use auth::Credentials;
pub use client::{FabraicClient, FabraicClientBuilder, DEFAULT_BASE_URL};
pub use error::{ClientError, ConfigError, DecodeError, FabraicError, Result};
pub use method::RestMethod;
pub use path::PathParams;
pub use request::RequestOptions;
pub use service::{ServiceClient, DEFAULT_SERVICE_VERSION};
