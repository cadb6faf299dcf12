use axum::{
    Router, middleware,
    routing::{get, post, put},
};
use scrimhub_storage::Database;

use super::handlers::{
    create_scrimmage, delete_scrimmage, get_scrimmage, list_scrimmages, update_scrimmage,
};
use crate::features::registrations;
use crate::middleware::auth::{JwtKeys, require_auth};

pub fn routes(jwt: JwtKeys) -> Router<Database> {
    let protected = Router::new()
        .route("/", post(create_scrimmage))
        .route("/:id", put(update_scrimmage).delete(delete_scrimmage))
        .route_layer(middleware::from_fn_with_state(jwt.clone(), require_auth));

    Router::new()
        .route("/", get(list_scrimmages))
        .route("/:id", get(get_scrimmage))
        .merge(protected)
        .merge(registrations::routes::scrimmage_routes(jwt))
}
