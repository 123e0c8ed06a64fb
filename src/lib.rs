pub mod core;
pub mod features;
pub mod shared;

use std::sync::Arc;

use axum::{middleware::from_fn_with_state, routing::get, Router};
use sqlx::SqlitePool;

use crate::core::config::AuthConfig;
use crate::core::middleware;
use crate::features::users::repository::UserRepository;
use crate::features::users::routes as users_routes;
use crate::features::users::token_service::TokenService;
use crate::features::villa_numbers::handlers::VillaNumberApiState;
use crate::features::villa_numbers::repository::VillaNumberRepository;
use crate::features::villa_numbers::routes as villa_numbers_routes;
use crate::features::villas::repository::VillaRepository;
use crate::features::villas::routes as villas_routes;

async fn health_check() -> axum::http::StatusCode {
    axum::http::StatusCode::OK
}

/// Assembles the application router: protected v1 CRUD surface behind the
/// bearer-token middleware, plus the public account and v2 endpoints.
pub fn build_router(pool: SqlitePool, auth: AuthConfig) -> Router {
    let token_service = Arc::new(TokenService::new(auth));
    let user_repository = Arc::new(UserRepository::new(pool.clone(), Arc::clone(&token_service)));
    let villa_repository = Arc::new(VillaRepository::new(pool.clone()));
    let villa_number_repository = Arc::new(VillaNumberRepository::new(pool));

    let villa_number_state = VillaNumberApiState {
        villa_numbers: villa_number_repository,
        villas: Arc::clone(&villa_repository),
    };

    let protected_routes = Router::new()
        .merge(villas_routes::v1_routes(villa_repository))
        .merge(villa_numbers_routes::v1_routes(villa_number_state))
        .route_layer(from_fn_with_state(
            token_service,
            middleware::auth_middleware,
        ));

    let public_routes = Router::new()
        .merge(users_routes::routes(user_repository))
        .merge(villa_numbers_routes::v2_routes())
        .route("/health", get(health_check));

    Router::new().merge(protected_routes).merge(public_routes)
}
