use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use std::fmt;

use super::ApiResponse;
use crate::cache::SessionError;
use crate::policy::PolicyError;
use crate::services::{ActorError, MovieError, UserError};

pub const BAD_REQUEST_MESSAGE: &str = "bad request";

#[derive(Debug)]
pub enum ApiError {
    BadRequest(String),

    Unauthorized(String),

    /// Policy denial. Answered with an empty body.
    Forbidden,

    DatabaseError(String),

    /// `message` goes to the client, `cause` only to the log.
    InternalError { message: String, cause: String },
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BadRequest(msg) => write!(f, "Bad request: {msg}"),
            Self::Unauthorized(msg) => write!(f, "Unauthorized: {msg}"),
            Self::Forbidden => f.write_str("Forbidden"),
            Self::DatabaseError(msg) => write!(f, "Database error: {msg}"),
            Self::InternalError { message, cause } => write!(f, "{message}: {cause}"),
        }
    }
}

impl std::error::Error for ApiError {}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            Self::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            Self::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg),
            Self::Forbidden => return StatusCode::FORBIDDEN.into_response(),
            Self::DatabaseError(msg) => {
                tracing::error!("Database error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "A database error occurred".to_string(),
                )
            }
            Self::InternalError { message, cause } => {
                tracing::error!(cause = %cause, "{}", message);
                (StatusCode::INTERNAL_SERVER_ERROR, message)
            }
        };

        (status, Json(ApiResponse::error(message))).into_response()
    }
}

impl ApiError {
    pub fn bad_request(msg: impl Into<String>) -> Self {
        Self::BadRequest(msg.into())
    }

    pub fn internal(message: impl Into<String>, cause: impl fmt::Display) -> Self {
        Self::InternalError {
            message: message.into(),
            cause: cause.to_string(),
        }
    }
}

impl From<ActorError> for ApiError {
    fn from(err: ActorError) -> Self {
        match err {
            ActorError::Database(msg) => Self::DatabaseError(msg),
            ActorError::NotFound(_) => Self::internal(err.to_string(), "no rows"),
        }
    }
}

impl From<MovieError> for ApiError {
    fn from(err: MovieError) -> Self {
        match err {
            MovieError::Database(msg) => Self::DatabaseError(msg),
            MovieError::NotFound(_) | MovieError::NoMatch(_) => {
                Self::internal(err.to_string(), "no rows")
            }
        }
    }
}

impl From<UserError> for ApiError {
    fn from(err: UserError) -> Self {
        match err {
            UserError::Database(msg) => Self::DatabaseError(msg),
            UserError::Hash(e) => Self::internal("failed to hash password", e),
            UserError::InvalidCredentials | UserError::NotFound(_) => {
                Self::internal(err.to_string(), "no rows")
            }
        }
    }
}

impl From<SessionError> for ApiError {
    fn from(err: SessionError) -> Self {
        Self::internal("failed to create session", err)
    }
}

impl From<PolicyError> for ApiError {
    fn from(err: PolicyError) -> Self {
        Self::internal("access policy evaluation failed", err)
    }
}
