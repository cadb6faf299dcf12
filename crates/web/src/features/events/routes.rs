use axum::{
    Router, middleware,
    routing::{get, post, put},
};
use scrimhub_storage::Database;

use super::handlers::{
    create_event, delete_event, get_event, list_events, next_event, update_event,
};
use crate::middleware::auth::{JwtKeys, require_auth};

pub fn routes(jwt: JwtKeys) -> Router<Database> {
    let protected = Router::new()
        .route("/", post(create_event))
        .route("/:id", put(update_event).delete(delete_event))
        .route_layer(middleware::from_fn_with_state(jwt, require_auth));

    Router::new()
        .route("/", get(list_events))
        .route("/next", get(next_event))
        .route("/:id", get(get_event))
        .merge(protected)
}
