use chrono::Utc;
use scrimhub_storage::{
    Database, Session,
    dto::{
        common::ListParams,
        scrimmage::{CreateScrimmageRequest, UpdateScrimmageRequest},
    },
    error::ServiceResult,
    models::Scrimmage,
    repository::Page,
    services::{
        capacity::CapacitySummary,
        ownership::{ensure_not_past, ensure_owner},
    },
};
use uuid::Uuid;

/// List scrimmages by scheduled date
pub async fn list_scrimmages(db: &Database, params: &ListParams) -> ServiceResult<Page<Scrimmage>> {
    let filter = params.to_filter(Utc::now());
    Ok(db.scrimmages().list(filter).await?)
}

/// Get a scrimmage along with its registration counts
pub async fn get_scrimmage_detailed(
    db: &Database,
    scrimmage_id: Uuid,
) -> ServiceResult<(Scrimmage, CapacitySummary)> {
    let scrimmage = db.scrimmages().find_by_id(scrimmage_id).await?;
    let registrations = db.registrations().list_for_scrimmage(scrimmage_id).await?;
    let summary = CapacitySummary::from_registrations(scrimmage.capacity, &registrations);

    Ok((scrimmage, summary))
}

pub async fn create_scrimmage(
    db: &Database,
    session: &Session,
    req: CreateScrimmageRequest,
) -> ServiceResult<Scrimmage> {
    let scrimmage = db.scrimmages().create(&req.into_new(session.user_id)).await?;

    tracing::info!(
        scrimmage_id = %scrimmage.scrimmage_id,
        owner_id = %session.user_id,
        "Scrimmage created"
    );

    Ok(scrimmage)
}

/// Apply a partial update. Only the owner may edit, and only before it starts.
pub async fn update_scrimmage(
    db: &Database,
    session: &Session,
    scrimmage_id: Uuid,
    req: &UpdateScrimmageRequest,
) -> ServiceResult<Scrimmage> {
    let mut scrimmage = db.scrimmages().find_by_id(scrimmage_id).await?;

    ensure_owner(scrimmage.owner_id, session)?;
    ensure_not_past(scrimmage.scheduled_at, Utc::now())?;

    req.apply_to(&mut scrimmage);

    Ok(db.scrimmages().update(&scrimmage).await?)
}

pub async fn delete_scrimmage(
    db: &Database,
    session: &Session,
    scrimmage_id: Uuid,
) -> ServiceResult<()> {
    let scrimmage = db.scrimmages().find_by_id(scrimmage_id).await?;
    ensure_owner(scrimmage.owner_id, session)?;

    db.scrimmages().delete(scrimmage_id).await?;

    tracing::info!(%scrimmage_id, "Scrimmage deleted");

    Ok(())
}
