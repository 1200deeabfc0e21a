use axum::{
    Json,
    extract::{FromRequestParts, Request, State},
    http::{HeaderMap, HeaderValue, StatusCode, header, request::Parts},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use std::convert::Infallible;
use std::sync::Arc;
use time::OffsetDateTime;
use tower_sessions::cookie::Cookie;
use tracing::{debug, info, warn};

use super::extract::JsonBody;
use super::{ApiError, ApiResponse, AppState};
use crate::cache::SessionError;
use crate::models::{Credentials, Identity, Session};

pub const SESSION_COOKIE: &str = "session-id";

/// Matches the session TTL in the cache.
const COOKIE_LIFETIME: time::Duration = time::Duration::hours(8);

/// Paths reachable without a session cookie.
const PUBLIC_PATHS: [&str; 4] = ["/register", "/login", "/docs", "/swagger.yaml"];

fn is_public(path: &str) -> bool {
    PUBLIC_PATHS.contains(&path)
}

// ============================================================================
// Middleware
// ============================================================================

/// Resolves the `session-id` cookie into an [`Identity`] request extension.
///
/// Without a cookie only public paths pass; everything else is redirected to
/// `/register`. A cookie whose session is gone is rejected with 401 and cleared,
/// except on public paths where the request continues anonymously.
pub async fn auth_middleware(
    State(state): State<Arc<AppState>>,
    mut request: Request,
    next: Next,
) -> Response {
    let public = is_public(request.uri().path());

    let Some(session_id) = session_cookie(request.headers()) else {
        if public {
            return next.run(request).await;
        }
        return Redirect::permanent("/register").into_response();
    };

    match state.sessions().get(&session_id).await {
        Ok(session) => {
            let identity = Identity::from(session);
            tracing::Span::current().record("user_id", tracing::field::display(&identity));
            request.extensions_mut().insert(identity);
            next.run(request).await
        }
        Err(e) if public => {
            debug!(error = %e, "Ignoring unusable session on public path");
            next.run(request).await
        }
        Err(e @ (SessionError::NotFound | SessionError::Corrupt(_))) => {
            warn!(error = %e, path = %request.uri().path(), "Rejecting unusable session");
            let mut response =
                ApiError::Unauthorized("session expired or invalid".to_string()).into_response();
            if let Ok(value) = HeaderValue::from_str(&expired_cookie().to_string()) {
                response.headers_mut().append(header::SET_COOKIE, value);
            }
            response
        }
        Err(e) => ApiError::internal("failed to read session", e).into_response(),
    }
}

/// The identity attached by [`auth_middleware`], anonymous if there is none.
impl<S> FromRequestParts<S> for Identity
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(parts.extensions.get::<Self>().cloned().unwrap_or_default())
    }
}

fn session_cookie(headers: &HeaderMap) -> Option<String> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(Cookie::split_parse)
        .filter_map(Result::ok)
        .find(|cookie| cookie.name() == SESSION_COOKIE)
        .map(|cookie| cookie.value().to_string())
}

fn new_session_cookie(session_id: String) -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, session_id))
        .http_only(true)
        .path("/")
        .expires(OffsetDateTime::now_utc() + COOKIE_LIFETIME)
        .build()
}

fn expired_cookie() -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, ""))
        .http_only(true)
        .path("/")
        .max_age(time::Duration::ZERO)
        .build()
}

fn with_session(session_id: String, message: &str) -> Response {
    (
        StatusCode::CREATED,
        [(header::SET_COOKIE, new_session_cookie(session_id).to_string())],
        Json(ApiResponse::ok(message)),
    )
        .into_response()
}

// ============================================================================
// Handlers
// ============================================================================

/// POST /register
///
/// The user row is committed before the session is written; a cache failure
/// answers 500 but leaves the account in place.
pub async fn register(
    State(state): State<Arc<AppState>>,
    JsonBody(credentials): JsonBody<Credentials>,
) -> Result<Response, ApiError> {
    let user = state.user_service().register(&credentials).await?;
    let session_id = state.sessions().create(&Session::from(user)).await?;

    info!(username = %credentials.username, "Registered user and created session");
    Ok(with_session(session_id, "user was created"))
}

/// POST /login
pub async fn login(
    State(state): State<Arc<AppState>>,
    JsonBody(credentials): JsonBody<Credentials>,
) -> Result<Response, ApiError> {
    let user = state.user_service().login(&credentials).await?;
    let session_id = state.sessions().create(&Session::from(user)).await?;

    info!(username = %credentials.username, "Created session");
    Ok(with_session(session_id, "user was login"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::SESSION_TTL;

    #[test]
    fn test_public_paths() {
        assert!(is_public("/login"));
        assert!(is_public("/docs"));
        assert!(!is_public("/movie"));
        assert!(!is_public("/login/"));
    }

    #[test]
    fn test_session_cookie_parsing() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::COOKIE,
            HeaderValue::from_static("theme=dark; session-id=abc123"),
        );
        assert_eq!(session_cookie(&headers), Some("abc123".to_string()));

        headers.insert(header::COOKIE, HeaderValue::from_static("theme=dark"));
        assert_eq!(session_cookie(&headers), None);
    }

    #[test]
    fn test_cookie_attributes() {
        let rendered = new_session_cookie("abc".to_string()).to_string();
        assert!(rendered.starts_with("session-id=abc"));
        assert!(rendered.contains("HttpOnly"));
        assert!(rendered.contains("Expires="));

        let cleared = expired_cookie().to_string();
        assert!(cleared.contains("Max-Age=0"));
    }

    #[test]
    fn test_cookie_lifetime_matches_session_ttl() {
        assert_eq!(
            COOKIE_LIFETIME.whole_seconds(),
            i64::try_from(SESSION_TTL.as_secs()).unwrap()
        );
    }
}
