use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use super::{EventRepository, ListFilter, NewEvent, Page};
use crate::error::{Result, StorageError};
use crate::models::Event;

const EVENT_COLUMNS: &str =
    "event_id, title, description, event_type, event_time, location, owner_id, created_at";

/// Repository for Event database operations
#[derive(Clone)]
pub struct PgEventRepository {
    pool: PgPool,
}

impl PgEventRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl EventRepository for PgEventRepository {
    async fn list(&self, filter: ListFilter) -> Result<Page<Event>> {
        let items = sqlx::query_as::<_, Event>(&format!(
            r#"
            SELECT {EVENT_COLUMNS}
            FROM events
            WHERE ($1::timestamptz IS NULL OR event_time > $1)
            ORDER BY event_time ASC, created_at ASC
            LIMIT $2 OFFSET $3
            "#
        ))
        .bind(filter.after)
        .bind(filter.limit)
        .bind(filter.offset)
        .fetch_all(&self.pool)
        .await?;

        let total = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT COUNT(*)
            FROM events
            WHERE ($1::timestamptz IS NULL OR event_time > $1)
            "#,
        )
        .bind(filter.after)
        .fetch_one(&self.pool)
        .await?;

        Ok(Page { items, total })
    }

    async fn list_by_owner(&self, owner_id: Uuid) -> Result<Vec<Event>> {
        let events = sqlx::query_as::<_, Event>(&format!(
            r#"
            SELECT {EVENT_COLUMNS}
            FROM events
            WHERE owner_id = $1
            ORDER BY event_time ASC
            "#
        ))
        .bind(owner_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(events)
    }

    async fn next_upcoming(&self, now: DateTime<Utc>) -> Result<Option<Event>> {
        let event = sqlx::query_as::<_, Event>(&format!(
            r#"
            SELECT {EVENT_COLUMNS}
            FROM events
            WHERE event_time >= $1
            ORDER BY event_time ASC
            LIMIT 1
            "#
        ))
        .bind(now)
        .fetch_optional(&self.pool)
        .await?;

        Ok(event)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Event> {
        let event = sqlx::query_as::<_, Event>(&format!(
            r#"
            SELECT {EVENT_COLUMNS}
            FROM events
            WHERE event_id = $1
            "#
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(StorageError::NotFound)?;

        Ok(event)
    }

    async fn create(&self, new: &NewEvent) -> Result<Event> {
        let event = sqlx::query_as::<_, Event>(&format!(
            r#"
            INSERT INTO events (title, description, event_type, event_time, location, owner_id)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING {EVENT_COLUMNS}
            "#
        ))
        .bind(&new.title)
        .bind(&new.description)
        .bind(new.event_type)
        .bind(new.event_time)
        .bind(&new.location)
        .bind(new.owner_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(event)
    }

    async fn update(&self, event: &Event) -> Result<Event> {
        let updated = sqlx::query_as::<_, Event>(&format!(
            r#"
            UPDATE events
            SET
                title = $2,
                description = $3,
                event_type = $4,
                event_time = $5,
                location = $6
            WHERE event_id = $1
            RETURNING {EVENT_COLUMNS}
            "#
        ))
        .bind(event.event_id)
        .bind(&event.title)
        .bind(&event.description)
        .bind(event.event_type)
        .bind(event.event_time)
        .bind(&event.location)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(StorageError::NotFound)?;

        Ok(updated)
    }

    async fn delete(&self, id: Uuid) -> Result<()> {
        let result = sqlx::query("DELETE FROM events WHERE event_id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StorageError::NotFound);
        }

        Ok(())
    }
}
