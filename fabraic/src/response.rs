//! Response body decoding.

use bytes::Bytes;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::DecodeError;

/// Decodes a successful response body.
///
/// An empty body decodes to [`Value::Null`], which is what endpoints
/// answering `204 No Content` produce. Anything else must be valid JSON,
/// including a body of bare whitespace.
pub fn decode_body(body: &Bytes) -> Result<Value, DecodeError> {
    if body.is_empty() {
        return Ok(Value::Null);
    }
    serde_json::from_slice(body).map_err(DecodeError::Json)
}

/// Converts a decoded value into a caller-defined type.
pub fn decode_value<T: DeserializeOwned>(value: Value) -> Result<T, DecodeError> {
    serde_json::from_value(value).map_err(DecodeError::Json)
}
