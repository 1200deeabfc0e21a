//! `SeaORM` implementation of the `ActorService` trait.

use async_trait::async_trait;
use tracing::debug;

use crate::db::Store;
use crate::models::{Actor, ActorWithMovie, NewActor};
use crate::services::actor_service::{ActorError, ActorService};

pub struct SeaOrmActorService {
    store: Store,
}

impl SeaOrmActorService {
    #[must_use]
    pub const fn new(store: Store) -> Self {
        Self { store }
    }
}

#[async_trait]
impl ActorService for SeaOrmActorService {
    async fn create(&self, actor: &NewActor) -> Result<i32, ActorError> {
        Ok(self.store.create_actor(actor).await?)
    }

    async fn update(&self, actor: &Actor) -> Result<(), ActorError> {
        if self.store.update_actor(actor).await? {
            Ok(())
        } else {
            Err(ActorError::NotFound(actor.id))
        }
    }

    async fn delete(&self, id: i32) -> Result<(), ActorError> {
        if !self.store.delete_actor(id).await? {
            debug!(actor_id = id, "Delete requested for unknown actor");
        }
        Ok(())
    }

    async fn list_with_movies(&self) -> Result<Vec<ActorWithMovie>, ActorError> {
        Ok(self.store.list_actors_with_movies().await?)
    }
}
