//! Canonical JSON digest computation for versioned reference data.
//!
//! Object keys are sorted before hashing so that logically-equal payloads
//! produce the same digest regardless of field order in the source.

use sha2::{Digest, Sha256};

use crate::domain::error::Result;

/// Recursively sort JSON object keys.
fn sort_keys(value: &serde_json::Value) -> serde_json::Value {
    match value {
        serde_json::Value::Object(map) => {
            let mut sorted = serde_json::Map::new();
            let mut keys: Vec<_> = map.keys().collect();
            keys.sort();
            for key in keys {
                if let Some(v) = map.get(key) {
                    sorted.insert(key.to_string(), sort_keys(v));
                }
            }
            serde_json::Value::Object(sorted)
        }
        serde_json::Value::Array(arr) => {
            serde_json::Value::Array(arr.iter().map(sort_keys).collect())
        }
        other => other.clone(),
    }
}

/// Serialize `value` in canonical form and return its SHA-256 hex digest.
pub fn digest_json<T: serde::Serialize>(value: &T) -> Result<String> {
    let raw = serde_json::to_value(value)?;
    let canonical = serde_json::to_vec(&sort_keys(&raw))?;
    let mut hasher = Sha256::new();
    hasher.update(&canonical);
    Ok(hex::encode(hasher.finalize()))
}
