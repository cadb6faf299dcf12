use axum::{
    Extension, Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use scrimhub_storage::{
    Database, Session,
    dto::{
        common::{ListParams, PaginationMeta},
        scrimmage::{
            CreateScrimmageRequest, ScrimmageDetailResponse, ScrimmageListResponse,
            ScrimmageResponse, UpdateScrimmageRequest,
        },
    },
};
use uuid::Uuid;
use validator::Validate;

use crate::error::{ErrorResponse, WebError};

use super::services;

#[utoipa::path(
    get,
    path = "/api/scrimmages",
    params(ListParams),
    responses(
        (status = 200, description = "Scrimmages ordered by scheduled date", body = ScrimmageListResponse),
        (status = 400, description = "Invalid pagination parameters", body = ErrorResponse)
    ),
    tag = "scrimmages"
)]
pub async fn list_scrimmages(
    State(db): State<Database>,
    Query(params): Query<ListParams>,
) -> Result<Json<ScrimmageListResponse>, WebError> {
    params.validate().map_err(WebError::BadRequest)?;

    let page = services::list_scrimmages(&db, &params).await?;

    Ok(Json(ScrimmageListResponse {
        data: page.items.into_iter().map(ScrimmageResponse::from).collect(),
        pagination: PaginationMeta::new(params.page, params.page_size, page.total),
    }))
}

#[utoipa::path(
    get,
    path = "/api/scrimmages/{id}",
    params(
        ("id" = Uuid, Path, description = "Scrimmage id")
    ),
    responses(
        (status = 200, description = "Scrimmage with its capacity summary", body = ScrimmageDetailResponse),
        (status = 404, description = "Scrimmage not found", body = ErrorResponse)
    ),
    tag = "scrimmages"
)]
pub async fn get_scrimmage(
    State(db): State<Database>,
    Path(id): Path<Uuid>,
) -> Result<Json<ScrimmageDetailResponse>, WebError> {
    let (scrimmage, summary) = services::get_scrimmage_detailed(&db, id).await?;

    Ok(Json(ScrimmageDetailResponse::new(scrimmage, summary)))
}

#[utoipa::path(
    post,
    path = "/api/scrimmages",
    request_body = CreateScrimmageRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 201, description = "Scrimmage created successfully", body = ScrimmageResponse),
        (status = 400, description = "Validation error", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    ),
    tag = "scrimmages"
)]
pub async fn create_scrimmage(
    State(db): State<Database>,
    Extension(session): Extension<Session>,
    Json(req): Json<CreateScrimmageRequest>,
) -> Result<Response, WebError> {
    req.validate()?;

    let scrimmage = services::create_scrimmage(&db, &session, req).await?;

    Ok((StatusCode::CREATED, Json(ScrimmageResponse::from(scrimmage))).into_response())
}

#[utoipa::path(
    put,
    path = "/api/scrimmages/{id}",
    params(
        ("id" = Uuid, Path, description = "Scrimmage id")
    ),
    request_body = UpdateScrimmageRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Scrimmage updated successfully", body = ScrimmageResponse),
        (status = 400, description = "Validation error", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Caller does not own the scrimmage", body = ErrorResponse),
        (status = 404, description = "Scrimmage not found", body = ErrorResponse),
        (status = 422, description = "Scrimmage has already taken place", body = ErrorResponse)
    ),
    tag = "scrimmages"
)]
pub async fn update_scrimmage(
    State(db): State<Database>,
    Extension(session): Extension<Session>,
    Path(id): Path<Uuid>,
    Json(update_req): Json<UpdateScrimmageRequest>,
) -> Result<Json<ScrimmageResponse>, WebError> {
    update_req.validate()?;

    let updated = services::update_scrimmage(&db, &session, id, &update_req).await?;

    Ok(Json(ScrimmageResponse::from(updated)))
}

#[utoipa::path(
    delete,
    path = "/api/scrimmages/{id}",
    params(
        ("id" = Uuid, Path, description = "Scrimmage id")
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 204, description = "Scrimmage and its registrations deleted"),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Caller does not own the scrimmage", body = ErrorResponse),
        (status = 404, description = "Scrimmage not found", body = ErrorResponse)
    ),
    tag = "scrimmages"
)]
pub async fn delete_scrimmage(
    State(db): State<Database>,
    Extension(session): Extension<Session>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, WebError> {
    services::delete_scrimmage(&db, &session, id).await?;

    Ok(StatusCode::NO_CONTENT)
}
