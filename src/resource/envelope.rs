//! Envelope wrapping and unwrapping.

use serde::de::{DeserializeOwned, Error as _};
use serde::{Deserialize, Serialize};

/// Response body of a count request.
#[derive(Debug, Deserialize)]
pub(crate) struct CountEnvelope {
    pub count: u64,
}

/// Decodes the value stored under `key` in a JSON object body.
///
/// # Errors
///
/// Returns a JSON error if the body is not an object, lacks `key`, or the
/// value under `key` does not match `T`.
pub fn decode_envelope<T: DeserializeOwned>(
    body: &[u8],
    key: &'static str,
) -> Result<T, serde_json::Error> {
    let mut object: serde_json::Map<String, serde_json::Value> = serde_json::from_slice(body)?;
    let value = object
        .remove(key)
        .ok_or_else(|| serde_json::Error::missing_field(key))?;
    serde_json::from_value(value)
}

/// Encodes `value` as `{"<key>": value}`.
///
/// # Errors
///
/// Returns a JSON error if `value` cannot be serialized.
pub fn encode_envelope<T: Serialize>(key: &str, value: &T) -> Result<Vec<u8>, serde_json::Error> {
    let mut object = serde_json::Map::new();
    object.insert(key.to_string(), serde_json::to_value(value)?);
    serde_json::to_vec(&object)
}
