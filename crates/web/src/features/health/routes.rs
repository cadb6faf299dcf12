use axum::{Router, routing::get};
use scrimhub_storage::Database;

use super::handlers::health;

pub fn routes() -> Router<Database> {
    Router::new().route("/api/health", get(health))
}
