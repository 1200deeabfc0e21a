//! Domain service for actor records.

use thiserror::Error;

use crate::models::{Actor, ActorWithMovie, NewActor};

#[derive(Debug, Error)]
pub enum ActorError {
    #[error("Actor not found: {0}")]
    NotFound(i32),

    #[error("Database error: {0}")]
    Database(String),
}

impl From<anyhow::Error> for ActorError {
    fn from(err: anyhow::Error) -> Self {
        Self::Database(format!("{err:#}"))
    }
}

#[async_trait::async_trait]
pub trait ActorService: Send + Sync {
    /// Stores a new actor and returns its id.
    async fn create(&self, actor: &NewActor) -> Result<i32, ActorError>;

    /// Overwrites all fields of an existing actor.
    ///
    /// # Errors
    ///
    /// Returns [`ActorError::NotFound`] if no actor has `actor.id`.
    async fn update(&self, actor: &Actor) -> Result<(), ActorError>;

    /// Removes the actor and its movie links. Deleting an unknown id is not an error.
    async fn delete(&self, id: i32) -> Result<(), ActorError>;

    async fn list_with_movies(&self) -> Result<Vec<ActorWithMovie>, ActorError>;
}
