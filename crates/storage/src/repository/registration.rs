use async_trait::async_trait;
use sqlx::{PgConnection, PgPool};
use uuid::Uuid;

use super::{NewRegistration, RegistrationRepository};
use crate::error::{Result, StorageError};
use crate::models::{Registration, RegistrationStatus};
use crate::services::capacity::{available_spots, effective_capacity};

const REGISTRATION_COLUMNS: &str = "registration_id, scrimmage_id, user_id, team_name, \
                                    team_contact, team_size, team_description, status, \
                                    created_at, updated_at";

/// Repository for scrimmage registrations.
///
/// Signups and status changes lock the parent scrimmage row for the duration of
/// their transaction, so capacity checks for one scrimmage never interleave.
#[derive(Clone)]
pub struct PgRegistrationRepository {
    pool: PgPool,
}

impl PgRegistrationRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Locks the scrimmage row and returns its declared capacity.
async fn lock_scrimmage(conn: &mut PgConnection, scrimmage_id: Uuid) -> Result<Option<i32>> {
    sqlx::query_scalar::<_, Option<i32>>(
        r#"
        SELECT capacity
        FROM scrimmages
        WHERE scrimmage_id = $1
        FOR UPDATE
        "#,
    )
    .bind(scrimmage_id)
    .fetch_optional(&mut *conn)
    .await?
    .ok_or(StorageError::NotFound)
}

async fn approved_count(conn: &mut PgConnection, scrimmage_id: Uuid) -> Result<i64> {
    let count = sqlx::query_scalar::<_, i64>(
        r#"
        SELECT COUNT(*)
        FROM scrimmage_registrations
        WHERE scrimmage_id = $1 AND status = 'approved'
        "#,
    )
    .bind(scrimmage_id)
    .fetch_one(&mut *conn)
    .await?;

    Ok(count)
}

async fn ensure_spot_left(
    conn: &mut PgConnection,
    scrimmage_id: Uuid,
    capacity: Option<i32>,
) -> Result<()> {
    let approved = approved_count(conn, scrimmage_id).await?;

    if available_spots(capacity, approved) <= 0 {
        return Err(StorageError::CapacityExceeded {
            capacity: effective_capacity(capacity),
            approved,
        });
    }

    Ok(())
}

#[async_trait]
impl RegistrationRepository for PgRegistrationRepository {
    async fn list_for_scrimmage(&self, scrimmage_id: Uuid) -> Result<Vec<Registration>> {
        let registrations = sqlx::query_as::<_, Registration>(&format!(
            r#"
            SELECT {REGISTRATION_COLUMNS}
            FROM scrimmage_registrations
            WHERE scrimmage_id = $1
            ORDER BY created_at ASC
            "#
        ))
        .bind(scrimmage_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(registrations)
    }

    async fn list_for_user(&self, user_id: Uuid) -> Result<Vec<Registration>> {
        let registrations = sqlx::query_as::<_, Registration>(&format!(
            r#"
            SELECT {REGISTRATION_COLUMNS}
            FROM scrimmage_registrations
            WHERE user_id = $1
            ORDER BY created_at DESC
            "#
        ))
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(registrations)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Registration> {
        let registration = sqlx::query_as::<_, Registration>(&format!(
            r#"
            SELECT {REGISTRATION_COLUMNS}
            FROM scrimmage_registrations
            WHERE registration_id = $1
            "#
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(StorageError::NotFound)?;

        Ok(registration)
    }

    async fn find_for_user(
        &self,
        scrimmage_id: Uuid,
        user_id: Uuid,
    ) -> Result<Option<Registration>> {
        let registration = sqlx::query_as::<_, Registration>(&format!(
            r#"
            SELECT {REGISTRATION_COLUMNS}
            FROM scrimmage_registrations
            WHERE scrimmage_id = $1 AND user_id = $2
            "#
        ))
        .bind(scrimmage_id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(registration)
    }

    async fn create_pending(&self, new: &NewRegistration) -> Result<Registration> {
        let mut tx = self.pool.begin().await?;

        let capacity = lock_scrimmage(&mut tx, new.scrimmage_id).await?;

        let already_registered = sqlx::query_scalar::<_, bool>(
            r#"
            SELECT EXISTS (
                SELECT 1
                FROM scrimmage_registrations
                WHERE scrimmage_id = $1 AND user_id = $2
            )
            "#,
        )
        .bind(new.scrimmage_id)
        .bind(new.user_id)
        .fetch_one(&mut *tx)
        .await?;

        if already_registered {
            return Err(StorageError::DuplicateRegistration);
        }

        ensure_spot_left(&mut tx, new.scrimmage_id, capacity).await?;

        let registration = sqlx::query_as::<_, Registration>(&format!(
            r#"
            INSERT INTO scrimmage_registrations (
                scrimmage_id, user_id, team_name, team_contact, team_size,
                team_description, status
            )
            VALUES ($1, $2, $3, $4, $5, $6, 'pending')
            RETURNING {REGISTRATION_COLUMNS}
            "#
        ))
        .bind(new.scrimmage_id)
        .bind(new.user_id)
        .bind(&new.team_name)
        .bind(&new.team_contact)
        .bind(new.team_size)
        .bind(&new.team_description)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| {
            // The unique index backs up the existence check above
            if let sqlx::Error::Database(ref db_err) = e {
                if db_err.code().as_deref() == Some("23505") {
                    return StorageError::DuplicateRegistration;
                }
            }
            StorageError::from(e)
        })?;

        tx.commit().await?;

        Ok(registration)
    }

    async fn transition(&self, id: Uuid, to: RegistrationStatus) -> Result<Registration> {
        let mut tx = self.pool.begin().await?;

        let scrimmage_id = sqlx::query_scalar::<_, Uuid>(
            r#"
            SELECT scrimmage_id
            FROM scrimmage_registrations
            WHERE registration_id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or(StorageError::NotFound)?;

        // Scrimmage first, then the registration: same order as signups
        let capacity = lock_scrimmage(&mut tx, scrimmage_id).await?;

        let current = sqlx::query_as::<_, Registration>(&format!(
            r#"
            SELECT {REGISTRATION_COLUMNS}
            FROM scrimmage_registrations
            WHERE registration_id = $1
            FOR UPDATE
            "#
        ))
        .bind(id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or(StorageError::NotFound)?;

        if !current.status.can_transition_to(to) {
            return Err(StorageError::InvalidTransition {
                from: current.status,
                to,
            });
        }

        if to.holds_spot() {
            ensure_spot_left(&mut tx, scrimmage_id, capacity).await?;
        }

        let updated = sqlx::query_as::<_, Registration>(&format!(
            r#"
            UPDATE scrimmage_registrations
            SET status = $2, updated_at = CURRENT_TIMESTAMP
            WHERE registration_id = $1
            RETURNING {REGISTRATION_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(to)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(updated)
    }

    async fn delete(&self, id: Uuid) -> Result<()> {
        let result = sqlx::query(
            r#"
            DELETE FROM scrimmage_registrations
            WHERE registration_id = $1
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
