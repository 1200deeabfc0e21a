use anyhow::Result;
use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection, Statement};
use std::path::Path;
use std::time::Duration;
use tracing::info;

use crate::models::{
    Actor, ActorWithMovie, Movie, MovieOrder, MovieSearch, MovieSummary, NewActor, NewMovie, User,
};

pub mod migrator;
pub mod repositories;

#[derive(Clone)]
pub struct Store {
    pub conn: DatabaseConnection,
}

impl Store {
    pub async fn new(db_url: &str) -> Result<Self> {
        Self::with_pool_options(db_url, 10, 1).await
    }

    /// Connects, sizes the pool and applies pending migrations.
    pub async fn with_pool_options(
        db_url: &str,
        max_connections: u32,
        min_connections: u32,
    ) -> Result<Self> {
        use sea_orm_migration::MigratorTrait;

        if let Some(path_str) = db_url.strip_prefix("sqlite:") {
            let path_str = path_str.trim_start_matches("//");
            if !path_str.starts_with(":memory:") {
                let path_str = path_str.split('?').next().unwrap_or(path_str);
                if let Some(parent) = Path::new(path_str).parent() {
                    tokio::fs::create_dir_all(parent).await.ok();
                }
                if !Path::new(path_str).exists() {
                    std::fs::File::create(path_str)?;
                }
            }
        }

        let mut opt = ConnectOptions::new(db_url.to_string());
        opt.max_connections(max_connections)
            .min_connections(min_connections)
            .connect_timeout(Duration::from_secs(10))
            .acquire_timeout(Duration::from_secs(10))
            .idle_timeout(Duration::from_secs(300))
            .max_lifetime(Duration::from_secs(600))
            .sqlx_logging(false);

        let conn = Database::connect(opt).await?;

        migrator::Migrator::up(&conn, None).await?;

        info!(
            "Database connected & migrations applied (pool: {}-{})",
            min_connections, max_connections
        );

        Ok(Self { conn })
    }

    pub async fn ping(&self) -> Result<()> {
        let backend = self.conn.get_database_backend();
        self.conn
            .query_one(Statement::from_string(backend, "SELECT 1".to_string()))
            .await?;
        Ok(())
    }

    fn actor_repo(&self) -> repositories::actor::ActorRepository {
        repositories::actor::ActorRepository::new(self.conn.clone())
    }

    fn movie_repo(&self) -> repositories::movie::MovieRepository {
        repositories::movie::MovieRepository::new(self.conn.clone())
    }

    fn user_repo(&self) -> repositories::user::UserRepository {
        repositories::user::UserRepository::new(self.conn.clone())
    }

    pub async fn create_actor(&self, actor: &NewActor) -> Result<i32> {
        self.actor_repo().create(actor).await
    }

    pub async fn update_actor(&self, actor: &Actor) -> Result<bool> {
        self.actor_repo().update(actor).await
    }

    pub async fn delete_actor(&self, id: i32) -> Result<bool> {
        self.actor_repo().delete(id).await
    }

    pub async fn list_actors_with_movies(&self) -> Result<Vec<ActorWithMovie>> {
        self.actor_repo().list_with_movies().await
    }

    pub async fn create_movie(&self, movie: &NewMovie) -> Result<i32> {
        self.movie_repo().create(movie).await
    }

    pub async fn update_movie(&self, movie: &Movie) -> Result<bool> {
        self.movie_repo().update(movie).await
    }

    pub async fn delete_movie(&self, id: i32) -> Result<bool> {
        self.movie_repo().delete(id).await
    }

    pub async fn get_movie(&self, id: i32) -> Result<Option<Movie>> {
        self.movie_repo().get(id).await
    }

    pub async fn find_movie(&self, search: &MovieSearch) -> Result<Option<MovieSummary>> {
        self.movie_repo().find(search).await
    }

    pub async fn list_movies(&self, order: MovieOrder) -> Result<Vec<MovieSummary>> {
        self.movie_repo().list_ordered(order).await
    }

    pub async fn create_user(&self, username: &str, password_digest: &str) -> Result<()> {
        self.user_repo().create(username, password_digest).await
    }

    pub async fn find_user_by_credentials(
        &self,
        username: &str,
        password_digest: &str,
    ) -> Result<Option<User>> {
        self.user_repo()
            .find_by_credentials(username, password_digest)
            .await
    }

    pub async fn get_user(&self, username: &str) -> Result<Option<User>> {
        self.user_repo().get_by_username(username).await
    }

    pub async fn set_user_admin(&self, username: &str, is_admin: bool) -> Result<bool> {
        self.user_repo().set_admin(username, is_admin).await
    }
}
