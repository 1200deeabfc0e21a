use std::path::Path;
use std::sync::Arc;

use anyhow::Context;
use tracing::info;

use crate::cache::{KvStore, MemoryKvStore, RedisKvStore, SessionStore};
use crate::config::{CacheBackend, Config};
use crate::db::Store;
use crate::hasher::SaltedHasher;
use crate::policy::Policy;
use crate::services::{
    ActorService, MovieService, SeaOrmActorService, SeaOrmMovieService, SeaOrmUserService,
    UserService,
};

/// Long-lived components shared by every request.
#[derive(Clone)]
pub struct SharedState {
    pub config: Arc<Config>,

    pub store: Store,

    pub actor_service: Arc<dyn ActorService>,

    pub movie_service: Arc<dyn MovieService>,

    pub user_service: Arc<dyn UserService>,

    pub sessions: Arc<SessionStore>,

    pub policy: Arc<Policy>,
}

impl SharedState {
    pub async fn new(config: Config) -> anyhow::Result<Self> {
        let store = Store::with_pool_options(
            &config.database.connection_url(),
            config.database.max_connections,
            config.database.min_connections,
        )
        .await
        .context("Failed to initialize database")?;

        let kv: Arc<dyn KvStore> = match config.cache.backend {
            CacheBackend::Redis => Arc::new(
                RedisKvStore::connect(&config.cache.redis_url())
                    .await
                    .context("Failed to connect to redis")?,
            ),
            CacheBackend::Memory => {
                info!("Using in-memory session cache");
                Arc::new(MemoryKvStore::new())
            }
        };

        let policy = Policy::load(Path::new(&config.security.policy_path))
            .context("Failed to load access policy")?;

        let shared = Self::from_parts(config, store, kv, policy);
        shared.check_connections().await?;
        Ok(shared)
    }

    /// Wires services around already-built infrastructure.
    #[must_use]
    pub fn from_parts(config: Config, store: Store, kv: Arc<dyn KvStore>, policy: Policy) -> Self {
        let password_hasher = Arc::new(SaltedHasher::new(config.security.password_salt.as_str()));
        let session_hasher = Arc::new(SaltedHasher::new(config.security.session_salt.as_str()));

        Self {
            actor_service: Arc::new(SeaOrmActorService::new(store.clone())),
            movie_service: Arc::new(SeaOrmMovieService::new(store.clone())),
            user_service: Arc::new(SeaOrmUserService::new(store.clone(), password_hasher)),
            sessions: Arc::new(SessionStore::new(kv, session_hasher)),
            policy: Arc::new(policy),
            config: Arc::new(config),
            store,
        }
    }

    /// Refuses to start when the database or the session cache does not answer.
    pub async fn check_connections(&self) -> anyhow::Result<()> {
        self.store.ping().await.context("Database is not reachable")?;
        self.sessions
            .ping()
            .await
            .context("Session cache is not reachable")?;
        Ok(())
    }
}
