use chrono::Utc;
use scrimhub_storage::{
    Database, Session,
    dto::{
        common::ListParams,
        event::{CreateEventRequest, UpdateEventRequest},
    },
    error::ServiceResult,
    models::Event,
    repository::Page,
    services::ownership::{ensure_not_past, ensure_owner},
};
use uuid::Uuid;

/// List events by event time
pub async fn list_events(db: &Database, params: &ListParams) -> ServiceResult<Page<Event>> {
    let filter = params.to_filter(Utc::now());
    Ok(db.events().list(filter).await?)
}

/// The first event that has not started yet
pub async fn next_event(db: &Database) -> ServiceResult<Option<Event>> {
    Ok(db.events().next_upcoming(Utc::now()).await?)
}

pub async fn get_event(db: &Database, event_id: Uuid) -> ServiceResult<Event> {
    Ok(db.events().find_by_id(event_id).await?)
}

pub async fn create_event(
    db: &Database,
    session: &Session,
    req: CreateEventRequest,
) -> ServiceResult<Event> {
    let event = db.events().create(&req.into_new(session.user_id)).await?;

    tracing::info!(
        event_id = %event.event_id,
        event_type = ?event.event_type,
        owner_id = %session.user_id,
        "Event created"
    );

    Ok(event)
}

pub async fn update_event(
    db: &Database,
    session: &Session,
    event_id: Uuid,
    req: &UpdateEventRequest,
) -> ServiceResult<Event> {
    let mut event = db.events().find_by_id(event_id).await?;

    ensure_owner(event.owner_id, session)?;
    ensure_not_past(event.event_time, Utc::now())?;

    req.apply_to(&mut event);

    Ok(db.events().update(&event).await?)
}

pub async fn delete_event(db: &Database, session: &Session, event_id: Uuid) -> ServiceResult<()> {
    let event = db.events().find_by_id(event_id).await?;
    ensure_owner(event.owner_id, session)?;

    db.events().delete(event_id).await?;

    tracing::info!(%event_id, "Event deleted");

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use scrimhub_storage::{error::ServiceError, models::EventType};

    fn create_request(hours_from_now: i64) -> CreateEventRequest {
        CreateEventRequest {
            title: "Intro to soldering".to_string(),
            description: "Bring safety glasses".to_string(),
            event_type: EventType::Workshop,
            event_time: Utc::now() + Duration::hours(hours_from_now),
            location: None,
        }
    }

    #[tokio::test]
    async fn test_next_event_skips_past_ones() {
        let db = Database::in_memory();
        let owner = Session::new(Uuid::new_v4());

        create_event(&db, &owner, create_request(-5)).await.unwrap();
        let later = create_event(&db, &owner, create_request(48)).await.unwrap();
        let sooner = create_event(&db, &owner, create_request(2)).await.unwrap();

        let next = next_event(&db).await.unwrap().unwrap();
        assert_eq!(next.event_id, sooner.event_id);
        assert_ne!(next.event_id, later.event_id);
    }

    #[tokio::test]
    async fn test_stranger_cannot_delete_event() {
        let db = Database::in_memory();
        let owner = Session::new(Uuid::new_v4());
        let event = create_event(&db, &owner, create_request(3)).await.unwrap();

        let err = delete_event(&db, &Session::new(Uuid::new_v4()), event.event_id)
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::NotAuthorized));

        assert!(get_event(&db, event.event_id).await.is_ok());
    }

    #[tokio::test]
    async fn test_past_event_cannot_be_edited() {
        let db = Database::in_memory();
        let owner = Session::new(Uuid::new_v4());
        let event = create_event(&db, &owner, create_request(-1)).await.unwrap();

        let update = UpdateEventRequest {
            event_type: Some(EventType::Lecture),
            ..Default::default()
        };
        let err = update_event(&db, &owner, event.event_id, &update)
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::AlreadyHappened));
    }
}
