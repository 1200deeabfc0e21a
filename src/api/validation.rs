use super::ApiError;
use super::error::BAD_REQUEST_MESSAGE;
use crate::models::{MovieOrder, MovieSearch};

/// A missing or empty `order` means the default (`rating`).
pub fn validate_order(order: Option<&str>) -> Result<MovieOrder, ApiError> {
    match order.filter(|o| !o.is_empty()) {
        None => Ok(MovieOrder::default()),
        Some(raw) => raw
            .parse::<MovieOrder>()
            .map_err(|e| ApiError::bad_request(e.to_string())),
    }
}

pub fn validate_movie_search(
    title: Option<&str>,
    actor: Option<&str>,
) -> Result<MovieSearch, ApiError> {
    MovieSearch::from_terms(title, actor).ok_or_else(|| {
        ApiError::bad_request(format!(
            "{BAD_REQUEST_MESSAGE}: either title or actor must be given"
        ))
    })
}
