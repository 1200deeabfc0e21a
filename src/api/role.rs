use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use std::sync::Arc;
use tracing::debug;

use super::{ApiError, AppState};
use crate::models::Identity;

/// Checks `(subject, path, method)` against the access policy.
///
/// Runs after [`super::auth::auth_middleware`]; a request without an identity is anonymous.
pub async fn role_middleware(
    State(state): State<Arc<AppState>>,
    request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let identity = request
        .extensions()
        .get::<Identity>()
        .cloned()
        .unwrap_or_default();

    let allowed = state.policy().enforce(
        identity.subject(),
        request.uri().path(),
        request.method().as_str(),
    )?;

    if !allowed {
        debug!(
            identity = %identity,
            method = %request.method(),
            path = %request.uri().path(),
            "Access denied by policy"
        );
        return Err(ApiError::Forbidden);
    }

    Ok(next.run(request).await)
}
