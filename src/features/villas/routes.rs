use std::sync::Arc;

use axum::http::{header, HeaderValue};
use axum::routing::get;
use axum::Router;
use tower_http::set_header::SetResponseHeaderLayer;

use crate::features::villas::handlers;
use crate::features::villas::repository::VillaRepository;

/// Villa CRUD surface. Read responses carry a 30 second cache hint.
pub fn v1_routes(repo: Arc<VillaRepository>) -> Router {
    Router::new()
        .route(
            "/api/v1/VillaAPI",
            get(handlers::list_villas).post(handlers::create_villa),
        )
        .route(
            "/api/v1/VillaAPI/{id}",
            get(handlers::get_villa)
                .put(handlers::update_villa)
                .patch(handlers::patch_villa)
                .delete(handlers::delete_villa),
        )
        .layer(SetResponseHeaderLayer::if_not_present(
            header::CACHE_CONTROL,
            HeaderValue::from_static("max-age=30"),
        ))
        .with_state(repo)
}
