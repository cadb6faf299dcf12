use axum::{Router, middleware, routing::get};
use scrimhub_storage::Database;

use super::handlers::get_dashboard;
use crate::middleware::auth::{JwtKeys, require_auth};

pub fn routes(jwt: JwtKeys) -> Router<Database> {
    Router::new()
        .route("/", get(get_dashboard))
        .route_layer(middleware::from_fn_with_state(jwt, require_auth))
}
