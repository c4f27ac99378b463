//! Deterministic SHA-256 digests over canonical JSON.
//!
//! Fingerprint hashes, collection hashes and record digests all go through
//! these helpers so that the same input always yields the same lowercase
//! hex digest.

use crate::errors::HistoryError;
use serde::Serialize;
use sha2::{Digest, Sha256};

/// Length of a hex-encoded SHA-256 digest
pub const DIGEST_HEX_LEN: usize = 64;

/// Hash raw bytes using SHA256, hex-encoded.
pub fn hash_bytes(input: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(input);
    hex::encode(hasher.finalize())
}

/// Hash a string using SHA256, hex-encoded.
pub fn hash_str(input: &str) -> String {
    hash_bytes(input.as_bytes())
}

/// Hash the canonical JSON form of a value.
///
/// Maps must be `BTreeMap`s so that key order is stable.
///
/// # Errors
///
/// Returns `HistoryError::Serialization` if the value cannot be serialized.
pub fn hash_canonical_json<T: Serialize + ?Sized>(value: &T) -> Result<String, HistoryError> {
    let canonical = serde_json::to_string(value)?;
    Ok(hash_str(&canonical))
}

/// Check that a string is a lowercase hex SHA-256 digest.
pub fn is_sha256_hex(candidate: &str) -> bool {
    candidate.len() == DIGEST_HEX_LEN
        && candidate
            .bytes()
            .all(|b| b.is_ascii_digit() || (b'a'..=b'f').contains(&b))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    #[test]
    fn test_hash_str_deterministic() {
        let hash1 = hash_str("output.jar");
        let hash2 = hash_str("output.jar");
        assert_eq!(hash1, hash2);
        assert_eq!(hash1.len(), DIGEST_HEX_LEN);
    }

    #[test]
    fn test_hash_str_different_inputs() {
        assert_ne!(hash_str("a"), hash_str("b"));
    }

    #[test]
    fn test_canonical_json_ignores_insertion_order() {
        let mut first = BTreeMap::new();
        first.insert("b", 2);
        first.insert("a", 1);
        let mut second = BTreeMap::new();
        second.insert("a", 1);
        second.insert("b", 2);

        assert_eq!(
            hash_canonical_json(&first).unwrap(),
            hash_canonical_json(&second).unwrap()
        );
    }

    #[test]
    fn test_is_sha256_hex() {
        assert!(is_sha256_hex(&hash_str("x")));
        assert!(!is_sha256_hex("abc"));
        assert!(!is_sha256_hex(&hash_str("x").to_uppercase()));
        assert!(!is_sha256_hex(&"g".repeat(DIGEST_HEX_LEN)));
    }
}
