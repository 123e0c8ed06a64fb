use std::sync::Arc;

use axum::routing::post;
use axum::Router;

use crate::features::users::handlers;
use crate::features::users::repository::UserRepository;

/// Account endpoints are version-neutral and mounted under both prefixes.
pub fn routes(repo: Arc<UserRepository>) -> Router {
    Router::new()
        .route("/api/v1/Users/Login", post(handlers::login))
        .route("/api/v1/Users/Register", post(handlers::register))
        .route("/api/v2/Users/Login", post(handlers::login))
        .route("/api/v2/Users/Register", post(handlers::register))
        .with_state(repo)
}
