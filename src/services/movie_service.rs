//! Domain service for movies and their casts.

use thiserror::Error;

use crate::models::{Movie, MovieOrder, MovieSearch, MovieSummary, NewMovie};

#[derive(Debug, Error)]
pub enum MovieError {
    #[error("Movie not found: {0}")]
    NotFound(i32),

    #[error("No movie matches {0}")]
    NoMatch(String),

    #[error("Database error: {0}")]
    Database(String),
}

impl From<anyhow::Error> for MovieError {
    fn from(err: anyhow::Error) -> Self {
        Self::Database(format!("{err:#}"))
    }
}

/// Movie operations. Writes that touch the cast are all-or-nothing.
#[async_trait::async_trait]
pub trait MovieService: Send + Sync {
    /// Stores the movie and links every listed actor; returns the new id.
    ///
    /// # Errors
    ///
    /// Returns [`MovieError::Database`] if any part fails, in which case nothing is stored.
    async fn create(&self, movie: &NewMovie) -> Result<i32, MovieError>;

    /// Replaces the movie's fields and its whole cast.
    ///
    /// # Errors
    ///
    /// - [`MovieError::NotFound`] if no movie has `movie.id`
    /// - [`MovieError::Database`] if any part fails; the movie is left unchanged
    async fn update(&self, movie: &Movie) -> Result<(), MovieError>;

    async fn delete(&self, id: i32) -> Result<(), MovieError>;

    /// First movie matching the search.
    ///
    /// # Errors
    ///
    /// Returns [`MovieError::NoMatch`] when nothing matches.
    async fn find(&self, search: &MovieSearch) -> Result<MovieSummary, MovieError>;

    /// All movies, descending by `order`.
    async fn list(&self, order: MovieOrder) -> Result<Vec<MovieSummary>, MovieError>;
}
