//! Domain service for user accounts.

use thiserror::Error;

use crate::hasher::HashError;
use crate::models::{Credentials, User};

#[derive(Debug, Error)]
pub enum UserError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("User not found: {0}")]
    NotFound(String),

    #[error(transparent)]
    Hash(#[from] HashError),

    #[error("Database error: {0}")]
    Database(String),
}

impl From<anyhow::Error> for UserError {
    fn from(err: anyhow::Error) -> Self {
        Self::Database(format!("{err:#}"))
    }
}

#[async_trait::async_trait]
pub trait UserService: Send + Sync {
    /// Stores a new non-admin user with a digested password.
    ///
    /// # Errors
    ///
    /// Returns [`UserError::Database`] if the username is already taken.
    async fn register(&self, credentials: &Credentials) -> Result<User, UserError>;

    /// Checks the username and password.
    ///
    /// # Errors
    ///
    /// Returns [`UserError::InvalidCredentials`] if no user matches both.
    async fn login(&self, credentials: &Credentials) -> Result<User, UserError>;

    /// Grants or revokes the admin role. Takes effect on the user's next login.
    async fn set_admin(&self, username: &str, is_admin: bool) -> Result<(), UserError>;
}
