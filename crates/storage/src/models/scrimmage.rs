use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Scrimmage {
    pub scrimmage_id: Uuid,
    pub title: String,
    pub description: String,
    pub scheduled_at: DateTime<Utc>,
    pub location: String,
    /// Maximum number of approved teams. `None` is treated as no spots at all.
    pub capacity: Option<i32>,
    pub owner_id: Uuid,
    pub created_at: DateTime<Utc>,
}

impl Scrimmage {
    pub fn is_owned_by(&self, user_id: Uuid) -> bool {
        self.owner_id == user_id
    }

    pub fn is_past(&self, now: DateTime<Utc>) -> bool {
        self.scheduled_at <= now
    }
}
