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
        event::{CreateEventRequest, EventListResponse, EventResponse, UpdateEventRequest},
    },
    error::ServiceError,
};
use uuid::Uuid;
use validator::Validate;

use crate::error::{ErrorResponse, WebError};

use super::services;

#[utoipa::path(
    get,
    path = "/api/events",
    params(ListParams),
    responses(
        (status = 200, description = "Events ordered by event time", body = EventListResponse),
        (status = 400, description = "Invalid pagination parameters", body = ErrorResponse)
    ),
    tag = "events"
)]
pub async fn list_events(
    State(db): State<Database>,
    Query(params): Query<ListParams>,
) -> Result<Json<EventListResponse>, WebError> {
    params.validate().map_err(WebError::BadRequest)?;

    let page = services::list_events(&db, &params).await?;

    Ok(Json(EventListResponse {
        data: page.items.into_iter().map(EventResponse::from).collect(),
        pagination: PaginationMeta::new(params.page, params.page_size, page.total),
    }))
}

#[utoipa::path(
    get,
    path = "/api/events/next",
    responses(
        (status = 200, description = "The next upcoming event", body = EventResponse),
        (status = 404, description = "No upcoming event", body = ErrorResponse)
    ),
    tag = "events"
)]
pub async fn next_event(State(db): State<Database>) -> Result<Json<EventResponse>, WebError> {
    let event = services::next_event(&db)
        .await?
        .ok_or(ServiceError::NotFound)?;

    Ok(Json(event.into()))
}

#[utoipa::path(
    get,
    path = "/api/events/{id}",
    params(
        ("id" = Uuid, Path, description = "Event id")
    ),
    responses(
        (status = 200, description = "Event found", body = EventResponse),
        (status = 404, description = "Event not found", body = ErrorResponse)
    ),
    tag = "events"
)]
pub async fn get_event(
    State(db): State<Database>,
    Path(id): Path<Uuid>,
) -> Result<Json<EventResponse>, WebError> {
    let event = services::get_event(&db, id).await?;

    Ok(Json(event.into()))
}

#[utoipa::path(
    post,
    path = "/api/events",
    request_body = CreateEventRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 201, description = "Event created successfully", body = EventResponse),
        (status = 400, description = "Validation error", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    ),
    tag = "events"
)]
pub async fn create_event(
    State(db): State<Database>,
    Extension(session): Extension<Session>,
    Json(req): Json<CreateEventRequest>,
) -> Result<Response, WebError> {
    req.validate()?;

    let event = services::create_event(&db, &session, req).await?;

    Ok((StatusCode::CREATED, Json(EventResponse::from(event))).into_response())
}

#[utoipa::path(
    put,
    path = "/api/events/{id}",
    params(
        ("id" = Uuid, Path, description = "Event id")
    ),
    request_body = UpdateEventRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Event updated successfully", body = EventResponse),
        (status = 400, description = "Validation error", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Caller does not own the event", body = ErrorResponse),
        (status = 404, description = "Event not found", body = ErrorResponse),
        (status = 422, description = "Event has already taken place", body = ErrorResponse)
    ),
    tag = "events"
)]
pub async fn update_event(
    State(db): State<Database>,
    Extension(session): Extension<Session>,
    Path(id): Path<Uuid>,
    Json(update_req): Json<UpdateEventRequest>,
) -> Result<Json<EventResponse>, WebError> {
    update_req.validate()?;

    let updated = services::update_event(&db, &session, id, &update_req).await?;

    Ok(Json(updated.into()))
}

#[utoipa::path(
    delete,
    path = "/api/events/{id}",
    params(
        ("id" = Uuid, Path, description = "Event id")
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 204, description = "Event deleted successfully"),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Caller does not own the event", body = ErrorResponse),
        (status = 404, description = "Event not found", body = ErrorResponse)
    ),
    tag = "events"
)]
pub async fn delete_event(
    State(db): State<Database>,
    Extension(session): Extension<Session>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, WebError> {
    services::delete_event(&db, &session, id).await?;

    Ok(StatusCode::NO_CONTENT)
}
