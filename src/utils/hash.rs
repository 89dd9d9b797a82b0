use sha2::{Digest, Sha256};

/// Stable SHA-256 fingerprint of a query key, for logs and metrics
pub fn fingerprint(value: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(value.as_bytes());
    let result = hasher.finalize();
    hex::encode(result)
}
