use std::sync::Arc;
use std::time::Duration;

use crate::cache::{CacheError, KvStore};
use crate::hasher::{HashError, Hasher};
use crate::models::Session;

/// How long a session stays valid after it is issued.
pub const SESSION_TTL: Duration = Duration::from_secs(8 * 60 * 60);

#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("session not found")]
    NotFound,

    #[error("session payload is corrupt: {0}")]
    Corrupt(#[source] serde_json::Error),

    #[error("failed to encode session: {0}")]
    Serialize(#[source] serde_json::Error),

    #[error(transparent)]
    Hash(#[from] HashError),

    #[error(transparent)]
    Cache(#[from] CacheError),
}

/// Sessions keyed by a salted digest of the username.
///
/// Logging in again overwrites the previous entry, so a user has at most one
/// live session and its key is stable across logins.
pub struct SessionStore {
    kv: Arc<dyn KvStore>,
    hasher: Arc<dyn Hasher>,
    ttl: Duration,
}

impl SessionStore {
    pub fn new(kv: Arc<dyn KvStore>, hasher: Arc<dyn Hasher>) -> Self {
        Self {
            kv,
            hasher,
            ttl: SESSION_TTL,
        }
    }

    #[must_use]
    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }

    /// Writes the session and returns the key to hand back as the cookie value.
    pub async fn create(&self, session: &Session) -> Result<String, SessionError> {
        let key = self.hasher.hash(&session.username)?;
        let payload = serde_json::to_vec(session).map_err(SessionError::Serialize)?;

        self.kv.set_with_ttl(&key, &payload, self.ttl).await?;

        Ok(key)
    }

    pub async fn get(&self, key: &str) -> Result<Session, SessionError> {
        let payload = self.kv.get(key).await?.ok_or(SessionError::NotFound)?;
        serde_json::from_slice(&payload).map_err(SessionError::Corrupt)
    }

    pub async fn ping(&self) -> Result<(), SessionError> {
        self.kv.ping().await.map_err(SessionError::from)
    }
}
