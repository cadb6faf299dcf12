use chrono::Utc;
use scrimhub_storage::{
    Database, Session,
    dto::{
        dashboard::{DashboardParams, DashboardResponse},
        event::EventResponse,
        registration::RegistrationResponse,
        scrimmage::ScrimmageResponse,
    },
    error::ServiceResult,
    services::registration_workflow,
};

/// Build the caller's dashboard.
///
/// The upcoming and past counters cover every owned scrimmage and event,
/// whether or not `hide_past` drops the past ones from the lists.
pub async fn dashboard(
    db: &Database,
    session: &Session,
    params: &DashboardParams,
) -> ServiceResult<DashboardResponse> {
    let now = Utc::now();
    let scrimmages = db.scrimmages().list_by_owner(session.user_id).await?;
    let events = db.events().list_by_owner(session.user_id).await?;
    let registrations = registration_workflow::my_registrations(db, session).await?;

    let past_count = scrimmages.iter().filter(|s| s.is_past(now)).count()
        + events.iter().filter(|e| e.is_past(now)).count();
    let upcoming_count = scrimmages.len() + events.len() - past_count;

    let scrimmages = scrimmages
        .into_iter()
        .filter(|s| !(params.hide_past && s.is_past(now)))
        .map(ScrimmageResponse::from)
        .collect();
    let events = events
        .into_iter()
        .filter(|e| !(params.hide_past && e.is_past(now)))
        .map(EventResponse::from)
        .collect();

    Ok(DashboardResponse {
        scrimmages,
        events,
        registrations: registrations
            .into_iter()
            .map(RegistrationResponse::from)
            .collect(),
        upcoming_count,
        past_count,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use scrimhub_storage::{
        models::EventType,
        repository::{NewEvent, NewScrimmage},
    };
    use uuid::Uuid;

    async fn seed(db: &Database, owner: &Session) {
        for days in [-3, 4, 9] {
            db.scrimmages()
                .create(&NewScrimmage {
                    title: format!("Scrimmage {days}"),
                    description: "Practice".to_string(),
                    scheduled_at: Utc::now() + Duration::days(days),
                    location: "Court 1".to_string(),
                    capacity: Some(2),
                    owner_id: owner.user_id,
                })
                .await
                .unwrap();
        }
        db.events()
            .create(&NewEvent {
                title: "Science fair".to_string(),
                description: "Posters and demos".to_string(),
                event_type: EventType::Exhibition,
                event_time: Utc::now() - Duration::days(1),
                location: None,
                owner_id: owner.user_id,
            })
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_counts_ignore_hide_past() {
        let db = Database::in_memory();
        let owner = Session::new(Uuid::new_v4());
        seed(&db, &owner).await;

        let all = dashboard(&db, &owner, &DashboardParams::default())
            .await
            .unwrap();
        assert_eq!(all.scrimmages.len(), 3);
        assert_eq!(all.events.len(), 1);
        assert_eq!(all.upcoming_count, 2);
        assert_eq!(all.past_count, 2);

        let upcoming_only = dashboard(&db, &owner, &DashboardParams { hide_past: true })
            .await
            .unwrap();
        assert_eq!(upcoming_only.scrimmages.len(), 2);
        assert!(upcoming_only.events.is_empty());
        assert_eq!(upcoming_only.upcoming_count, 2);
        assert_eq!(upcoming_only.past_count, 2);
    }

    #[tokio::test]
    async fn test_other_users_items_are_not_listed() {
        let db = Database::in_memory();
        let owner = Session::new(Uuid::new_v4());
        seed(&db, &owner).await;

        let stranger = Session::new(Uuid::new_v4());
        let view = dashboard(&db, &stranger, &DashboardParams::default())
            .await
            .unwrap();
        assert!(view.scrimmages.is_empty());
        assert!(view.events.is_empty());
        assert_eq!(view.upcoming_count + view.past_count, 0);
    }
}
