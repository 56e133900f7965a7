use rand::RngCore;
use sha2::{Digest, Sha256};

/// Generate a fresh opaque API key (64 hex chars).
pub fn generate() -> String {
    let mut bytes = [0u8; 32];
    rand::rng().fill_bytes(&mut bytes);
    hex::encode(bytes)
}

/// Hex SHA-256 digest of a raw API key. Only digests hit the database, so
/// a leaked table does not leak usable keys.
pub fn digest(raw: &str) -> String {
    hex::encode(Sha256::digest(raw.as_bytes()))
}
