//! HTTP client module.
//!
//! This module provides the async root client that owns the credentials and
//! the shared HTTP session, with tracing instrumentation on every request.
//!
//! ## Examples
//!
//! ```rust,ignore
//! use fabraic::{FabraicClient, RequestOptions, RestMethod};
//!
//! // Create a client with bearer token auth
//! let client = FabraicClient::builder()
//!     .access_token("tok-xxx")
//!     .base_url("https://staging.fabraic.co")
//!     .build()?;
//!
//! // Raw request against an absolute API path
//! let health = client.request("/health", RequestOptions::new()).await?;
//!
//! // Or go through a versioned service
//! let widgets = client.service_with_version("inventory", "v2")?;
//! let created = widgets
//!     .post("/widgets", RequestOptions::new().body(serde_json::json!({ "name": "cog" })))
//!     .await?;
//! ```

mod executor;

pub use executor::{
    FabraicClient, FabraicClientBuilder, DEFAULT_BASE_URL, ENV_ACCESS_TOKEN, ENV_API_KEY,
    ENV_BASE_URL,
};
