use axum::{
    body::Bytes,
    extract::{FromRequest, Request},
    http::{HeaderMap, header},
};
use serde::de::DeserializeOwned;

use super::ApiError;
use super::error::BAD_REQUEST_MESSAGE;

/// JSON body that must be declared as `application/json`.
///
/// Unlike `axum::Json`, every rejection is a 400 with the standard envelope.
pub struct JsonBody<T>(pub T);

impl<T, S> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        if !is_json(req.headers()) {
            tracing::info!("Request did not declare application/json");
            return Err(ApiError::bad_request(BAD_REQUEST_MESSAGE));
        }

        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|e| ApiError::bad_request(format!("failed to read body: {e}")))?;

        serde_json::from_slice(&bytes)
            .map(Self)
            .map_err(|e| ApiError::bad_request(format!("invalid request body: {e}")))
    }
}

fn is_json(headers: &HeaderMap) -> bool {
    headers
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(';').next())
        .is_some_and(|essence| essence.trim().eq_ignore_ascii_case("application/json"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers(content_type: Option<&'static str>) -> HeaderMap {
        let mut headers = HeaderMap::new();
        if let Some(ct) = content_type {
            headers.insert(header::CONTENT_TYPE, HeaderValue::from_static(ct));
        }
        headers
    }

    #[test]
    fn test_is_json() {
        assert!(is_json(&headers(Some("application/json"))));
        assert!(is_json(&headers(Some("application/json; charset=utf-8"))));
        assert!(!is_json(&headers(Some("text/plain"))));
        assert!(!is_json(&headers(Some("application/jsonp"))));
        assert!(!is_json(&headers(None)));
    }
}
