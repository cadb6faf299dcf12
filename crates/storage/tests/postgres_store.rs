//! Exercises the PostgreSQL repositories against a live database.
//!
//! Run with `DATABASE_URL=postgres://... cargo test -p scrimhub-storage -- --ignored`.

use chrono::{Duration, Utc};
use scrimhub_storage::Database;
use scrimhub_storage::error::StorageError;
use scrimhub_storage::models::RegistrationStatus;
use scrimhub_storage::repository::{NewRegistration, NewScrimmage};
use uuid::Uuid;

async fn connect() -> Database {
    let url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set for these tests");
    let db = Database::new(&url, 5).await.expect("connect");
    db.run_migrations().await.expect("migrations");
    db
}

async fn scrimmage(db: &Database, capacity: i32) -> Uuid {
    db.scrimmages()
        .create(&NewScrimmage {
            title: "Integration scrimmage".to_string(),
            description: "Created by postgres_store tests".to_string(),
            scheduled_at: Utc::now() + Duration::days(10),
            location: "Lab".to_string(),
            capacity: Some(capacity),
            owner_id: Uuid::new_v4(),
        })
        .await
        .expect("create scrimmage")
        .scrimmage_id
}

fn registration(scrimmage_id: Uuid, user_id: Uuid) -> NewRegistration {
    NewRegistration {
        scrimmage_id,
        user_id,
        team_name: "Pg team".to_string(),
        team_contact: "pg@example.org".to_string(),
        team_size: 2,
        team_description: None,
    }
}

#[tokio::test]
#[ignore = "needs a PostgreSQL database"]
async fn test_duplicate_signup_is_reported() {
    let db = connect().await;
    let scrimmage_id = scrimmage(&db, 3).await;
    let user_id = Uuid::new_v4();

    let created = db
        .registrations()
        .create_pending(&registration(scrimmage_id, user_id))
        .await
        .unwrap();
    assert_eq!(created.status, RegistrationStatus::Pending);

    let err = db
        .registrations()
        .create_pending(&registration(scrimmage_id, user_id))
        .await
        .unwrap_err();
    assert!(matches!(err, StorageError::DuplicateRegistration));

    db.scrimmages().delete(scrimmage_id).await.unwrap();
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
#[ignore = "needs a PostgreSQL database"]
async fn test_concurrent_approvals_respect_capacity() {
    let db = connect().await;
    let scrimmage_id = scrimmage(&db, 1).await;

    let mut ids = Vec::new();
    for _ in 0..4 {
        let r = db
            .registrations()
            .create_pending(&registration(scrimmage_id, Uuid::new_v4()))
            .await
            .unwrap();
        ids.push(r.registration_id);
    }

    let handles: Vec<_> = ids
        .into_iter()
        .map(|id| {
            let db = db.clone();
            tokio::spawn(async move {
                db.registrations()
                    .transition(id, RegistrationStatus::Approved)
                    .await
            })
        })
        .collect();

    let mut approved = 0;
    for handle in handles {
        match handle.await.unwrap() {
            Ok(_) => approved += 1,
            Err(StorageError::CapacityExceeded { .. }) => {}
            Err(other) => panic!("unexpected error: {other:?}"),
        }
    }
    assert_eq!(approved, 1);

    db.scrimmages().delete(scrimmage_id).await.unwrap();
}
