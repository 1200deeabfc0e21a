//! `SeaORM` implementation of the `MovieService` trait.

use async_trait::async_trait;
use tracing::debug;

use crate::db::Store;
use crate::models::{Movie, MovieOrder, MovieSearch, MovieSummary, NewMovie};
use crate::services::movie_service::{MovieError, MovieService};

pub struct SeaOrmMovieService {
    store: Store,
}

impl SeaOrmMovieService {
    #[must_use]
    pub const fn new(store: Store) -> Self {
        Self { store }
    }
}

#[async_trait]
impl MovieService for SeaOrmMovieService {
    async fn create(&self, movie: &NewMovie) -> Result<i32, MovieError> {
        Ok(self.store.create_movie(movie).await?)
    }

    async fn update(&self, movie: &Movie) -> Result<(), MovieError> {
        if self.store.update_movie(movie).await? {
            Ok(())
        } else {
            Err(MovieError::NotFound(movie.id))
        }
    }

    async fn delete(&self, id: i32) -> Result<(), MovieError> {
        if !self.store.delete_movie(id).await? {
            debug!(movie_id = id, "Delete requested for unknown movie");
        }
        Ok(())
    }

    async fn find(&self, search: &MovieSearch) -> Result<MovieSummary, MovieError> {
        self.store
            .find_movie(search)
            .await?
            .ok_or_else(|| MovieError::NoMatch(search.to_string()))
    }

    async fn list(&self, order: MovieOrder) -> Result<Vec<MovieSummary>, MovieError> {
        Ok(self.store.list_movies(order).await?)
    }
}
