use axum::{
    Router, middleware,
    routing::{delete, get, post},
};
use scrimhub_storage::Database;

use super::handlers::{
    approve_registration, delete_registration, get_capacity, list_registrations,
    my_registration, reject_registration, sign_up, withdraw_registration,
};
use crate::middleware::auth::{JwtKeys, require_auth};

/// Routes under `/api/registrations`
pub fn routes(jwt: JwtKeys) -> Router<Database> {
    Router::new()
        .route("/:id/approve", post(approve_registration))
        .route("/:id/reject", post(reject_registration))
        .route("/:id/withdraw", post(withdraw_registration))
        .route("/:id", delete(delete_registration))
        .route_layer(middleware::from_fn_with_state(jwt, require_auth))
}

/// Registration routes hanging off a scrimmage, merged into `/api/scrimmages`
pub fn scrimmage_routes(jwt: JwtKeys) -> Router<Database> {
    let protected = Router::new()
        .route(
            "/:id/registrations",
            get(list_registrations).post(sign_up),
        )
        .route("/:id/registrations/me", get(my_registration))
        .route_layer(middleware::from_fn_with_state(jwt, require_auth));

    Router::new()
        .route("/:id/capacity", get(get_capacity))
        .merge(protected)
}
