use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::{Actor, ActorWithMovie, Movie, MovieSummary, NewActor, NewMovie};

/// Uniform body for writes and errors.
///
/// Successful writes carry `status: "OK"`; errors omit `status` and set `error`.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<&'static str>,
    pub error: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl ApiResponse<()> {
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            status: Some("OK"),
            error: false,
            message: message.into(),
            data: None,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            status: None,
            error: true,
            message: message.into(),
            data: None,
        }
    }
}

impl<T> ApiResponse<T> {
    pub fn ok_with(message: impl Into<String>, data: T) -> Self {
        Self {
            status: Some("OK"),
            error: false,
            message: message.into(),
            data: Some(data),
        }
    }
}

/// Timestamps on the wire are RFC 3339; only the calendar date is kept.
fn to_wire_date(date: NaiveDate) -> DateTime<Utc> {
    date.and_time(NaiveTime::MIN).and_utc()
}

// ============================================================================
// Actors
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct CreateActorRequest {
    pub actor_name: String,
    pub gender: String,
    pub date_of_birth: DateTime<Utc>,
}

impl From<CreateActorRequest> for NewActor {
    fn from(req: CreateActorRequest) -> Self {
        Self {
            name: req.actor_name,
            gender: req.gender,
            date_of_birth: req.date_of_birth.date_naive(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct UpdateActorRequest {
    pub actor_id: i32,
    pub actor_name: String,
    pub gender: String,
    pub date_of_birth: DateTime<Utc>,
}

impl From<UpdateActorRequest> for Actor {
    fn from(req: UpdateActorRequest) -> Self {
        Self {
            id: req.actor_id,
            name: req.actor_name,
            gender: req.gender,
            date_of_birth: req.date_of_birth.date_naive(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct DeleteActorRequest {
    pub actor_id: i32,
}

#[derive(Debug, Serialize)]
pub struct CreatedActor {
    pub actor_id: i32,
}

#[derive(Debug, Serialize)]
pub struct ActorWithMovieDto {
    pub actor_name: String,
    pub gender: String,
    pub date_of_birth: DateTime<Utc>,
    #[serde(rename = "Title")]
    pub title: String,
}

impl From<ActorWithMovie> for ActorWithMovieDto {
    fn from(row: ActorWithMovie) -> Self {
        Self {
            actor_name: row.actor_name,
            gender: row.gender,
            date_of_birth: to_wire_date(row.date_of_birth),
            title: row.movie_title,
        }
    }
}

// ============================================================================
// Movies
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct CreateMovieRequest {
    pub movie_title: String,
    pub description: String,
    pub release_date: DateTime<Utc>,
    pub rating: u8,
    #[serde(default)]
    pub actors: Vec<i32>,
}

impl From<CreateMovieRequest> for NewMovie {
    fn from(req: CreateMovieRequest) -> Self {
        Self {
            title: req.movie_title,
            description: req.description,
            release_date: req.release_date.date_naive(),
            rating: req.rating,
            actors: req.actors,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct UpdateMovieRequest {
    pub movie_id: i32,
    pub movie_title: String,
    pub description: String,
    pub release_date: DateTime<Utc>,
    pub rating: u8,
    #[serde(default)]
    pub actors: Vec<i32>,
}

impl From<UpdateMovieRequest> for Movie {
    fn from(req: UpdateMovieRequest) -> Self {
        Self {
            id: req.movie_id,
            title: req.movie_title,
            description: req.description,
            release_date: req.release_date.date_naive(),
            rating: req.rating,
            actors: req.actors,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct DeleteMovieRequest {
    pub movie_id: i32,
}

#[derive(Debug, Serialize)]
pub struct CreatedMovie {
    pub movie_id: i32,
}

#[derive(Debug, Deserialize)]
pub struct MovieQuery {
    pub title: Option<String>,
    pub actor: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct MovieListQuery {
    pub order: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct MovieDto {
    pub title: String,
    pub description: String,
    pub release_date: DateTime<Utc>,
    pub rating: u8,
}

impl From<MovieSummary> for MovieDto {
    fn from(movie: MovieSummary) -> Self {
        Self {
            title: movie.title,
            description: movie.description,
            release_date: to_wire_date(movie.release_date),
            rating: movie.rating,
        }
    }
}
