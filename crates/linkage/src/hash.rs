use sha2::{Digest, Sha256};

/// SHA-256 of the identifier's UTF-8 bytes → 64 lowercase hex chars.
///
/// Must reproduce the registry's precomputed `colorado_id` column exactly;
/// any change to algorithm, encoding, or rendering silently breaks every join.
pub fn colorado_hash(id: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(id.as_bytes());
    let result = hasher.finalize();
    format!("{:x}", result)
}
