//! Checksum calculation for history snapshots.

use sha2::{Digest, Sha256};

/// Calculate SHA-256 checksum of snapshot content.
///
/// Reported by the health endpoint so operators can tell which export a
/// running process was started from.
pub fn calculate_checksum(content: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(content.as_bytes());
    let result = hasher.finalize();
    hex::encode(result)
}
