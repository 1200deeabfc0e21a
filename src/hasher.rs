//! Salted one-way digests for stored passwords and session keys.

use sha2::{Digest, Sha256};
use thiserror::Error;

#[derive(Debug, Error)]
#[error("Hashing failed: {0}")]
pub struct HashError(pub String);

/// Deterministic `message -> hex digest` transform.
///
/// The same message always yields the same digest for a given hasher, which is what lets
/// a session key be recomputed from a username and a password be compared by digest.
pub trait Hasher: Send + Sync {
    fn hash(&self, message: &str) -> Result<String, HashError>;
}

/// SHA-256 over `salt || message`, rendered as lowercase hex.
#[derive(Clone)]
pub struct SaltedHasher {
    salt: Vec<u8>,
}

impl SaltedHasher {
    #[must_use]
    pub fn new(salt: impl Into<Vec<u8>>) -> Self {
        Self { salt: salt.into() }
    }
}

impl Hasher for SaltedHasher {
    fn hash(&self, message: &str) -> Result<String, HashError> {
        let mut hasher = Sha256::new();
        hasher.update(&self.salt);
        hasher.update(message.as_bytes());

        Ok(to_hex(&hasher.finalize()))
    }
}

fn to_hex(bytes: &[u8]) -> String {
    bytes
        .iter()
        .fold(String::with_capacity(bytes.len() * 2), |mut acc, b| {
            use std::fmt::Write;
            let _ = write!(acc, "{b:02x}");
            acc
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_is_deterministic() {
        let hasher = SaltedHasher::new("secret");
        let first = hasher.hash("password123").unwrap();
        let second = hasher.hash("password123").unwrap();

        assert_eq!(first, second);
        assert_eq!(first.len(), 64);
        assert!(first.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_salt_changes_digest() {
        let passwords = SaltedHasher::new("secret");
        let sessions = SaltedHasher::new("session");

        assert_ne!(
            passwords.hash("alice").unwrap(),
            sessions.hash("alice").unwrap()
        );
    }

    #[test]
    fn test_different_messages_differ() {
        let hasher = SaltedHasher::new("secret");
        assert_ne!(hasher.hash("alice").unwrap(), hasher.hash("bob").unwrap());
    }

    #[test]
    fn test_known_digest() {
        // sha256("") with an empty salt
        let hasher = SaltedHasher::new(Vec::new());
        assert_eq!(
            hasher.hash("").unwrap(),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
    }
}
