use axum::{Json, extract::State};
use scrimhub_storage::Database;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    pub status: String,
    /// `postgres` or `memory`
    pub storage: String,
}

#[utoipa::path(
    get,
    path = "/api/health",
    responses(
        (status = 200, description = "Service is up", body = HealthResponse)
    ),
    tag = "health"
)]
pub async fn health(State(db): State<Database>) -> Json<HealthResponse> {
    let storage = if db.is_persistent() { "postgres" } else { "memory" };

    Json(HealthResponse {
        status: "ok".to_string(),
        storage: storage.to_string(),
    })
}
