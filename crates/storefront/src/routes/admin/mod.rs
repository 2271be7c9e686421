//! Admin API handlers. Every handler takes [`RequireAdmin`](crate::middleware::RequireAdmin).

pub mod products;
pub mod reports;
pub mod settings;
pub mod users;

use axum::{
    Router,
    routing::{get, post, put},
};

use crate::state::AppState;

/// Create the admin API router.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/products", get(products::index).post(products::create))
        .route(
            "/products/{id}",
            put(products::update).delete(products::destroy),
        )
        .route("/products/{id}/toggle", post(products::toggle))
        .route("/settings", get(settings::show).put(settings::update))
        .route("/users", get(users::index))
        .route("/users/{id}/promote", post(users::promote))
        .route("/reports/{kind}", get(reports::show))
        .route("/reports/{kind}/document", get(reports::document))
        .route("/reports/{kind}/email", post(reports::email))
}
