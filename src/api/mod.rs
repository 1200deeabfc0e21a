use axum::{
    Router, middleware,
    routing::{get, post},
};
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use crate::cache::SessionStore;
use crate::config::Config;
use crate::policy::Policy;
use crate::services::{ActorService, MovieService, UserService};
use crate::state::SharedState;

mod actors;
pub mod auth;
mod docs;
mod error;
mod extract;
mod movies;
mod observability;
mod role;
mod types;
mod validation;

pub use error::ApiError;
pub use types::*;

#[derive(Clone)]
pub struct AppState {
    pub shared: Arc<SharedState>,

    pub prometheus_handle: Option<PrometheusHandle>,
}

impl AppState {
    #[must_use]
    pub fn store(&self) -> &crate::db::Store {
        &self.shared.store
    }

    #[must_use]
    pub fn actor_service(&self) -> &Arc<dyn ActorService> {
        &self.shared.actor_service
    }

    #[must_use]
    pub fn movie_service(&self) -> &Arc<dyn MovieService> {
        &self.shared.movie_service
    }

    #[must_use]
    pub fn user_service(&self) -> &Arc<dyn UserService> {
        &self.shared.user_service
    }

    #[must_use]
    pub fn sessions(&self) -> &SessionStore {
        &self.shared.sessions
    }

    #[must_use]
    pub fn policy(&self) -> &Policy {
        &self.shared.policy
    }
}

#[must_use]
pub fn create_app_state(
    shared: Arc<SharedState>,
    prometheus_handle: Option<PrometheusHandle>,
) -> Arc<AppState> {
    Arc::new(AppState {
        shared,
        prometheus_handle,
    })
}

pub async fn create_app_state_from_config(
    config: Config,
    prometheus_handle: Option<PrometheusHandle>,
) -> anyhow::Result<Arc<AppState>> {
    let shared = Arc::new(SharedState::new(config).await?);
    Ok(create_app_state(shared, prometheus_handle))
}

/// Request pipeline: logging, then authentication, then the access policy, then the handler.
pub fn router(state: Arc<AppState>) -> Router {
    let mut app = Router::new()
        .route("/register", post(auth::register))
        .route("/login", post(auth::login))
        .route(
            "/actor",
            get(actors::list_actors)
                .post(actors::create_actor)
                .put(actors::update_actor)
                .delete(actors::delete_actor),
        )
        .route(
            "/movie",
            get(movies::get_movie)
                .post(movies::create_movie)
                .put(movies::update_movie)
                .delete(movies::delete_movie),
        )
        .route("/movie/all", get(movies::list_movies))
        .route("/docs", get(docs::serve_docs))
        .route("/swagger.yaml", get(docs::serve_swagger))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            role::role_middleware,
        ))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            auth::auth_middleware,
        ))
        .layer(middleware::from_fn(observability::logging_middleware));

    // not behind auth or the access policy
    if state.prometheus_handle.is_some() {
        app = app.route("/metrics", get(observability::get_metrics));
    }

    app.layer(TraceLayer::new_for_http()).with_state(state)
}
