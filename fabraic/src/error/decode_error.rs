//! Response decoding errors.

use thiserror::Error;

/// Errors while turning a successful response body into a value.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// The body was not valid JSON, or did not match the requested type.
    #[error("JSON decode error: {0}")]
    Json(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_display() {
        let json_err = serde_json::from_str::<serde_json::Value>("not json").unwrap_err();
        let err = DecodeError::Json(json_err);
        assert!(err.to_string().starts_with("JSON decode error:"));
    }
}
