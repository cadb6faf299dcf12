//! Scrimmage registration lifecycle.
//!
//! Teams sign up in `Pending`; the scrimmage owner approves or rejects; the
//! registrant may withdraw while pending. Capacity is claimed by the store in
//! the same atomic step as the status change, so a spot can never be handed
//! out twice.

use uuid::Uuid;

use crate::Database;
use crate::dto::registration::CreateRegistrationRequest;
use crate::error::{ServiceError, ServiceResult};
use crate::models::{Registration, RegistrationStatus};
use crate::services::capacity::CapacitySummary;
use crate::services::ownership::ensure_owner;
use crate::session::Session;

/// Sign the caller's team up for a scrimmage.
pub async fn sign_up(
    db: &Database,
    session: &Session,
    scrimmage_id: Uuid,
    request: CreateRegistrationRequest,
) -> ServiceResult<Registration> {
    let new = request.into_new(scrimmage_id, session.user_id);

    let registration = db
        .registrations()
        .create_pending(&new)
        .await
        .inspect_err(|e| {
            tracing::debug!(%scrimmage_id, user_id = %session.user_id, "Signup refused: {}", e)
        })?;

    tracing::info!(
        registration_id = %registration.registration_id,
        %scrimmage_id,
        user_id = %session.user_id,
        "Registration created"
    );

    Ok(registration)
}

pub async fn approve(
    db: &Database,
    session: &Session,
    registration_id: Uuid,
) -> ServiceResult<Registration> {
    decide(db, session, registration_id, RegistrationStatus::Approved).await
}

/// Reject a pending registration, or revoke an approved one.
pub async fn reject(
    db: &Database,
    session: &Session,
    registration_id: Uuid,
) -> ServiceResult<Registration> {
    decide(db, session, registration_id, RegistrationStatus::Rejected).await
}

async fn decide(
    db: &Database,
    session: &Session,
    registration_id: Uuid,
    to: RegistrationStatus,
) -> ServiceResult<Registration> {
    let registration = db.registrations().find_by_id(registration_id).await?;
    let scrimmage = db.scrimmages().find_by_id(registration.scrimmage_id).await?;

    ensure_owner(scrimmage.owner_id, session)?;

    let updated = db.registrations().transition(registration_id, to).await?;

    tracing::info!(
        %registration_id,
        scrimmage_id = %scrimmage.scrimmage_id,
        from = %registration.status,
        to = %updated.status,
        "Registration status changed by owner"
    );

    Ok(updated)
}

/// The registrant pulls a pending registration back.
pub async fn withdraw(
    db: &Database,
    session: &Session,
    registration_id: Uuid,
) -> ServiceResult<Registration> {
    let registration = db.registrations().find_by_id(registration_id).await?;

    if !registration.is_held_by(session.user_id) {
        return Err(ServiceError::NotAuthorized);
    }

    let updated = db
        .registrations()
        .transition(registration_id, RegistrationStatus::Cancelled)
        .await?;

    tracing::info!(
        %registration_id,
        scrimmage_id = %updated.scrimmage_id,
        "Registration withdrawn"
    );

    Ok(updated)
}

/// Delete a registration outright.
///
/// The scrimmage owner may delete any registration. The registrant may delete
/// their own while it is pending or cancelled, which also frees them to sign up
/// again.
pub async fn remove(db: &Database, session: &Session, registration_id: Uuid) -> ServiceResult<()> {
    let registration = db.registrations().find_by_id(registration_id).await?;
    let scrimmage = db.scrimmages().find_by_id(registration.scrimmage_id).await?;

    let is_owner = scrimmage.is_owned_by(session.user_id);
    let is_registrant_allowed = registration.is_held_by(session.user_id)
        && matches!(
            registration.status,
            RegistrationStatus::Pending | RegistrationStatus::Cancelled
        );

    if !is_owner && !is_registrant_allowed {
        return Err(ServiceError::NotAuthorized);
    }

    db.registrations().delete(registration_id).await?;

    tracing::info!(
        %registration_id,
        scrimmage_id = %scrimmage.scrimmage_id,
        by_owner = is_owner,
        "Registration deleted"
    );

    Ok(())
}

/// Public spot counts for a scrimmage.
pub async fn capacity_summary(db: &Database, scrimmage_id: Uuid) -> ServiceResult<CapacitySummary> {
    let scrimmage = db.scrimmages().find_by_id(scrimmage_id).await?;
    let registrations = db.registrations().list_for_scrimmage(scrimmage_id).await?;

    Ok(CapacitySummary::from_registrations(
        scrimmage.capacity,
        &registrations,
    ))
}

/// Full registration list, including contact details. Owner only.
pub async fn list_registrations(
    db: &Database,
    session: &Session,
    scrimmage_id: Uuid,
) -> ServiceResult<Vec<Registration>> {
    let scrimmage = db.scrimmages().find_by_id(scrimmage_id).await?;
    ensure_owner(scrimmage.owner_id, session)?;

    Ok(db.registrations().list_for_scrimmage(scrimmage_id).await?)
}

pub async fn my_registration(
    db: &Database,
    session: &Session,
    scrimmage_id: Uuid,
) -> ServiceResult<Registration> {
    db.registrations()
        .find_for_user(scrimmage_id, session.user_id)
        .await?
        .ok_or(ServiceError::NotFound)
}

pub async fn my_registrations(db: &Database, session: &Session) -> ServiceResult<Vec<Registration>> {
    Ok(db.registrations().list_for_user(session.user_id).await?)
}
