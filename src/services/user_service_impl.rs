//! `SeaORM` implementation of the `UserService` trait.

use std::sync::Arc;

use async_trait::async_trait;

use crate::db::Store;
use crate::hasher::Hasher;
use crate::models::{Credentials, User};
use crate::services::user_service::{UserError, UserService};

pub struct SeaOrmUserService {
    store: Store,
    hasher: Arc<dyn Hasher>,
}

impl SeaOrmUserService {
    #[must_use]
    pub fn new(store: Store, hasher: Arc<dyn Hasher>) -> Self {
        Self { store, hasher }
    }
}

#[async_trait]
impl UserService for SeaOrmUserService {
    async fn register(&self, credentials: &Credentials) -> Result<User, UserError> {
        let digest = self.hasher.hash(&credentials.password)?;
        self.store.create_user(&credentials.username, &digest).await?;

        Ok(User {
            username: credentials.username.clone(),
            is_admin: false,
        })
    }

    async fn login(&self, credentials: &Credentials) -> Result<User, UserError> {
        let digest = self.hasher.hash(&credentials.password)?;
        self.store
            .find_user_by_credentials(&credentials.username, &digest)
            .await?
            .ok_or(UserError::InvalidCredentials)
    }

    async fn set_admin(&self, username: &str, is_admin: bool) -> Result<(), UserError> {
        if self.store.set_user_admin(username, is_admin).await? {
            Ok(())
        } else {
            Err(UserError::NotFound(username.to_string()))
        }
    }
}
