//! Per-request options.

use std::fmt;

use reqwest::header::{HeaderMap, HeaderName, HeaderValue, AUTHORIZATION};
use serde_json::Value;

use crate::auth::API_KEY_HEADER;
use crate::error::ConfigError;
use crate::method::RestMethod;
use crate::path::PathParams;

/// Everything a caller can vary on a single request.
///
/// All fields are optional. `method` defaults to `GET`; the verb helpers on
/// [`ServiceClient`](crate::ServiceClient) overwrite it.
///
/// ## Examples
///
/// ```rust
/// use fabraic::{RequestOptions, RestMethod};
/// use serde_json::json;
///
/// let options = RequestOptions::new()
///     .method(RestMethod::Post)
///     .path_param("id", 42)
///     .query("expand", "parts")
///     .header("x-request-id", "abc-123")
///     .body(json!({ "name": "sprocket" }));
///
/// assert_eq!(options.method, RestMethod::Post);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RequestOptions {
    /// HTTP method.
    pub method: RestMethod,
    /// Query string pairs, sent in order. Keys may repeat.
    pub query: Vec<(String, String)>,
    /// JSON request body.
    pub body: Option<Value>,
    /// Per-request headers; these win over the client's base headers.
    pub headers: Vec<(String, String)>,
    /// Values for `{name}` placeholders in the request path.
    pub path_params: PathParams,
}

impl RequestOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the HTTP method.
    #[must_use]
    pub fn method(mut self, method: RestMethod) -> Self {
        self.method = method;
        self
    }

    /// Appends a query string pair.
    #[must_use]
    pub fn query(mut self, key: impl Into<String>, value: impl fmt::Display) -> Self {
        self.query.push((key.into(), value.to_string()));
        self
    }

    /// Sets the JSON body.
    #[must_use]
    pub fn body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    /// Adds a per-request header.
    ///
    /// Names and values are validated when the request is sent.
    #[must_use]
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Sets a path parameter.
    #[must_use]
    pub fn path_param(mut self, key: impl Into<String>, value: impl fmt::Display) -> Self {
        self.path_params.insert(key, value);
        self
    }

    /// Replaces all path parameters.
    #[must_use]
    pub fn path_params(mut self, params: impl Into<PathParams>) -> Self {
        self.path_params = params.into();
        self
    }
}

/// Merges per-request headers over the base headers.
///
/// Header names are case-insensitive, so `X-Api-Key` overrides `x-api-key`.
/// Overridden credential headers stay marked sensitive.
pub(crate) fn merge_headers(
    base: &HeaderMap,
    overrides: &[(String, String)],
) -> Result<HeaderMap, ConfigError> {
    let mut merged = base.clone();
    for (name, value) in overrides {
        let header_name = HeaderName::try_from(name.as_str())
            .map_err(|e| ConfigError::invalid_header(name.as_str(), e))?;
        let mut header_value = HeaderValue::try_from(value.as_str())
            .map_err(|e| ConfigError::invalid_header(name.as_str(), e))?;
        if header_name == AUTHORIZATION || header_name.as_str() == API_KEY_HEADER {
            header_value.set_sensitive(true);
        }
        merged.insert(header_name, header_value);
    }
    Ok(merged)
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::header::ACCEPT;
    use serde_json::json;

    fn base() -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert("x-api-key", HeaderValue::from_static("base-key"));
        headers
    }

    #[test]
    fn test_defaults() {
        let options = RequestOptions::new();
        assert_eq!(options.method, RestMethod::Get);
        assert!(options.query.is_empty());
        assert!(options.body.is_none());
        assert!(options.headers.is_empty());
        assert!(options.path_params.is_empty());
    }

    #[test]
    fn test_builder_collects_everything() {
        let options = RequestOptions::new()
            .method(RestMethod::Put)
            .query("tag", "a")
            .query("tag", "b")
            .query("limit", 10)
            .body(json!({"a": 1}))
            .header("x-trace", "1")
            .path_param("id", 5);

        assert_eq!(options.method, RestMethod::Put);
        assert_eq!(
            options.query,
            vec![
                ("tag".to_string(), "a".to_string()),
                ("tag".to_string(), "b".to_string()),
                ("limit".to_string(), "10".to_string()),
            ]
        );
        assert_eq!(options.body, Some(json!({"a": 1})));
        assert_eq!(options.path_params.get("id"), Some("5"));
    }

    #[test]
    fn test_path_params_replaces() {
        let options = RequestOptions::new()
            .path_param("old", 1)
            .path_params([("new", 2)]);
        assert_eq!(options.path_params.get("old"), None);
        assert_eq!(options.path_params.get("new"), Some("2"));
    }

    #[test]
    fn test_merge_keeps_base_headers() {
        let merged = merge_headers(&base(), &[]).unwrap();
        assert_eq!(merged, base());
    }

    #[test]
    fn test_merge_override_wins_case_insensitively() {
        let merged = merge_headers(
            &base(),
            &[("X-Api-Key".to_string(), "override".to_string())],
        )
        .unwrap();
        assert_eq!(merged.get("x-api-key").unwrap(), "override");
        assert_eq!(merged.get(ACCEPT).unwrap(), "application/json");
        assert_eq!(merged.len(), 2);
    }

    #[test]
    fn test_merge_marks_credential_overrides_sensitive() {
        let merged = merge_headers(
            &base(),
            &[
                ("X-API-KEY".to_string(), "other-key".to_string()),
                ("Authorization".to_string(), "Bearer other".to_string()),
                ("x-request-id".to_string(), "abc".to_string()),
            ],
        )
        .unwrap();
        assert!(merged.get("x-api-key").unwrap().is_sensitive());
        assert!(merged.get("authorization").unwrap().is_sensitive());
        assert!(!merged.get("x-request-id").unwrap().is_sensitive());
    }

    #[test]
    fn test_merge_does_not_mutate_base() {
        let base = base();
        let _ = merge_headers(&base, &[("x-extra".to_string(), "1".to_string())]).unwrap();
        assert!(base.get("x-extra").is_none());
    }

    #[test]
    fn test_merge_rejects_invalid_name() {
        let err = merge_headers(&base(), &[("bad header".to_string(), "v".to_string())])
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidHeader { .. }));
    }
}
