use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use scrimhub_storage::{
    Database, Session,
    dto::registration::{CreateRegistrationRequest, RegistrationResponse},
    services::{capacity::CapacitySummary, registration_workflow},
};
use uuid::Uuid;
use validator::Validate;

use crate::error::{ErrorResponse, WebError};

#[utoipa::path(
    get,
    path = "/api/scrimmages/{id}/capacity",
    params(
        ("id" = Uuid, Path, description = "Scrimmage id")
    ),
    responses(
        (status = 200, description = "Approved and pending counts with the spots left", body = CapacitySummary),
        (status = 404, description = "Scrimmage not found", body = ErrorResponse)
    ),
    tag = "registrations"
)]
pub async fn get_capacity(
    State(db): State<Database>,
    Path(id): Path<Uuid>,
) -> Result<Json<CapacitySummary>, WebError> {
    let summary = registration_workflow::capacity_summary(&db, id).await?;

    Ok(Json(summary))
}

#[utoipa::path(
    get,
    path = "/api/scrimmages/{id}/registrations",
    params(
        ("id" = Uuid, Path, description = "Scrimmage id")
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "All registrations, oldest first", body = Vec<RegistrationResponse>),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Caller does not own the scrimmage", body = ErrorResponse),
        (status = 404, description = "Scrimmage not found", body = ErrorResponse)
    ),
    tag = "registrations"
)]
pub async fn list_registrations(
    State(db): State<Database>,
    Extension(session): Extension<Session>,
    Path(id): Path<Uuid>,
) -> Result<Json<Vec<RegistrationResponse>>, WebError> {
    let registrations = registration_workflow::list_registrations(&db, &session, id).await?;

    Ok(Json(
        registrations
            .into_iter()
            .map(RegistrationResponse::from)
            .collect(),
    ))
}

#[utoipa::path(
    post,
    path = "/api/scrimmages/{id}/registrations",
    params(
        ("id" = Uuid, Path, description = "Scrimmage id")
    ),
    request_body = CreateRegistrationRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 201, description = "Registration created as pending", body = RegistrationResponse),
        (status = 400, description = "Validation error", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 404, description = "Scrimmage not found", body = ErrorResponse),
        (status = 409, description = "Already registered, or no spots left", body = ErrorResponse)
    ),
    tag = "registrations"
)]
pub async fn sign_up(
    State(db): State<Database>,
    Extension(session): Extension<Session>,
    Path(id): Path<Uuid>,
    Json(req): Json<CreateRegistrationRequest>,
) -> Result<Response, WebError> {
    req.validate()?;

    let registration = registration_workflow::sign_up(&db, &session, id, req).await?;

    Ok((
        StatusCode::CREATED,
        Json(RegistrationResponse::from(registration)),
    )
        .into_response())
}

#[utoipa::path(
    get,
    path = "/api/scrimmages/{id}/registrations/me",
    params(
        ("id" = Uuid, Path, description = "Scrimmage id")
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "The caller's registration", body = RegistrationResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 404, description = "Caller has not registered", body = ErrorResponse)
    ),
    tag = "registrations"
)]
pub async fn my_registration(
    State(db): State<Database>,
    Extension(session): Extension<Session>,
    Path(id): Path<Uuid>,
) -> Result<Json<RegistrationResponse>, WebError> {
    let registration = registration_workflow::my_registration(&db, &session, id).await?;

    Ok(Json(registration.into()))
}

#[utoipa::path(
    post,
    path = "/api/registrations/{id}/approve",
    params(
        ("id" = Uuid, Path, description = "Registration id")
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Registration approved, a spot was claimed", body = RegistrationResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Caller does not own the scrimmage", body = ErrorResponse),
        (status = 404, description = "Registration not found", body = ErrorResponse),
        (status = 409, description = "No spots left, or registration is not pending", body = ErrorResponse)
    ),
    tag = "registrations"
)]
pub async fn approve_registration(
    State(db): State<Database>,
    Extension(session): Extension<Session>,
    Path(id): Path<Uuid>,
) -> Result<Json<RegistrationResponse>, WebError> {
    let registration = registration_workflow::approve(&db, &session, id).await?;

    Ok(Json(registration.into()))
}

#[utoipa::path(
    post,
    path = "/api/registrations/{id}/reject",
    params(
        ("id" = Uuid, Path, description = "Registration id")
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Registration rejected, any held spot was freed", body = RegistrationResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Caller does not own the scrimmage", body = ErrorResponse),
        (status = 404, description = "Registration not found", body = ErrorResponse),
        (status = 409, description = "Registration cannot be rejected from its current status", body = ErrorResponse)
    ),
    tag = "registrations"
)]
pub async fn reject_registration(
    State(db): State<Database>,
    Extension(session): Extension<Session>,
    Path(id): Path<Uuid>,
) -> Result<Json<RegistrationResponse>, WebError> {
    let registration = registration_workflow::reject(&db, &session, id).await?;

    Ok(Json(registration.into()))
}

#[utoipa::path(
    post,
    path = "/api/registrations/{id}/withdraw",
    params(
        ("id" = Uuid, Path, description = "Registration id")
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Registration cancelled", body = RegistrationResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Caller is not the registrant", body = ErrorResponse),
        (status = 404, description = "Registration not found", body = ErrorResponse),
        (status = 409, description = "Registration is no longer pending", body = ErrorResponse)
    ),
    tag = "registrations"
)]
pub async fn withdraw_registration(
    State(db): State<Database>,
    Extension(session): Extension<Session>,
    Path(id): Path<Uuid>,
) -> Result<Json<RegistrationResponse>, WebError> {
    let registration = registration_workflow::withdraw(&db, &session, id).await?;

    Ok(Json(registration.into()))
}

#[utoipa::path(
    delete,
    path = "/api/registrations/{id}",
    params(
        ("id" = Uuid, Path, description = "Registration id")
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 204, description = "Registration deleted"),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Caller may not delete this registration", body = ErrorResponse),
        (status = 404, description = "Registration not found", body = ErrorResponse)
    ),
    tag = "registrations"
)]
pub async fn delete_registration(
    State(db): State<Database>,
    Extension(session): Extension<Session>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, WebError> {
    registration_workflow::remove(&db, &session, id).await?;

    Ok(StatusCode::NO_CONTENT)
}
