use axum::{
    Extension, Json,
    extract::{Query, State},
};
use scrimhub_storage::{
    Database, Session,
    dto::dashboard::{DashboardParams, DashboardResponse},
};

use crate::error::{ErrorResponse, WebError};

use super::services;

#[utoipa::path(
    get,
    path = "/api/dashboard",
    params(DashboardParams),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Scrimmages and events owned by the caller, plus their registrations", body = DashboardResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    ),
    tag = "dashboard"
)]
pub async fn get_dashboard(
    State(db): State<Database>,
    Extension(session): Extension<Session>,
    Query(params): Query<DashboardParams>,
) -> Result<Json<DashboardResponse>, WebError> {
    let dashboard = services::dashboard(&db, &session, &params).await?;

    Ok(Json(dashboard))
}
