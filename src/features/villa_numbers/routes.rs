use axum::http::{header, HeaderValue};
use axum::routing::get;
use axum::Router;
use tower_http::set_header::SetResponseHeaderLayer;

use crate::features::villa_numbers::handlers;
use crate::features::villa_numbers::handlers::VillaNumberApiState;

pub fn v1_routes(state: VillaNumberApiState) -> Router {
    Router::new()
        .route(
            "/api/v1/VillaNumberAPI",
            get(handlers::list_villa_numbers).post(handlers::create_villa_number),
        )
        .route(
            "/api/v1/VillaNumberAPI/{id}",
            get(handlers::get_villa_number)
                .put(handlers::update_villa_number)
                .delete(handlers::delete_villa_number),
        )
        .layer(SetResponseHeaderLayer::if_not_present(
            header::CACHE_CONTROL,
            HeaderValue::from_static("max-age=30"),
        ))
        .with_state(state)
}

/// The v2 surface only carries the placeholder endpoint.
pub fn v2_routes() -> Router {
    Router::new().route("/api/v2/VillaNumberAPI/GetString", get(handlers::get_string))
}
