use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use super::{ListFilter, NewScrimmage, Page, ScrimmageRepository};
use crate::error::{Result, StorageError};
use crate::models::Scrimmage;

const SCRIMMAGE_COLUMNS: &str = "scrimmage_id, title, description, scheduled_at, location, \
                                 capacity, owner_id, created_at";

/// Repository for Scrimmage database operations
#[derive(Clone)]
pub struct PgScrimmageRepository {
    pool: PgPool,
}

impl PgScrimmageRepository {
    /// Create a new PgScrimmageRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ScrimmageRepository for PgScrimmageRepository {
    async fn list(&self, filter: ListFilter) -> Result<Page<Scrimmage>> {
        let items = sqlx::query_as::<_, Scrimmage>(&format!(
            r#"
            SELECT {SCRIMMAGE_COLUMNS}
            FROM scrimmages
            WHERE ($1::timestamptz IS NULL OR scheduled_at > $1)
            ORDER BY scheduled_at ASC, created_at ASC
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
            FROM scrimmages
            WHERE ($1::timestamptz IS NULL OR scheduled_at > $1)
            "#,
        )
        .bind(filter.after)
        .fetch_one(&self.pool)
        .await?;

        Ok(Page { items, total })
    }

    async fn list_by_owner(&self, owner_id: Uuid) -> Result<Vec<Scrimmage>> {
        let scrimmages = sqlx::query_as::<_, Scrimmage>(&format!(
            r#"
            SELECT {SCRIMMAGE_COLUMNS}
            FROM scrimmages
            WHERE owner_id = $1
            ORDER BY scheduled_at ASC
            "#
        ))
        .bind(owner_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(scrimmages)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Scrimmage> {
        let scrimmage = sqlx::query_as::<_, Scrimmage>(&format!(
            r#"
            SELECT {SCRIMMAGE_COLUMNS}
            FROM scrimmages
            WHERE scrimmage_id = $1
            "#
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(StorageError::NotFound)?;

        Ok(scrimmage)
    }

    async fn create(&self, new: &NewScrimmage) -> Result<Scrimmage> {
        let scrimmage = sqlx::query_as::<_, Scrimmage>(&format!(
            r#"
            INSERT INTO scrimmages (title, description, scheduled_at, location, capacity, owner_id)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING {SCRIMMAGE_COLUMNS}
            "#
        ))
        .bind(&new.title)
        .bind(&new.description)
        .bind(new.scheduled_at)
        .bind(&new.location)
        .bind(new.capacity)
        .bind(new.owner_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(scrimmage)
    }

    async fn update(&self, scrimmage: &Scrimmage) -> Result<Scrimmage> {
        let updated = sqlx::query_as::<_, Scrimmage>(&format!(
            r#"
            UPDATE scrimmages
            SET
                title = $2,
                description = $3,
                scheduled_at = $4,
                location = $5,
                capacity = $6
            WHERE scrimmage_id = $1
            RETURNING {SCRIMMAGE_COLUMNS}
            "#
        ))
        .bind(scrimmage.scrimmage_id)
        .bind(&scrimmage.title)
        .bind(&scrimmage.description)
        .bind(scrimmage.scheduled_at)
        .bind(&scrimmage.location)
        .bind(scrimmage.capacity)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(StorageError::NotFound)?;

        Ok(updated)
    }

    async fn delete(&self, id: Uuid) -> Result<()> {
        let result = sqlx::query(
            r#"
            DELETE FROM scrimmages
            WHERE scrimmage_id = $1
            "#,
        )
        .bind(id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(StorageError::NotFound);
        }

        Ok(())
    }
}
