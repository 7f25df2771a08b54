use sha2::{Digest, Sha256};

/// Unsalted SHA-256 of `password`, lowercase hex.
pub fn hash_password(password: &str) -> String {
    hex::encode(Sha256::digest(password.as_bytes()))
}
