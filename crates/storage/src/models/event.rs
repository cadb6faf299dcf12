use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type, ToSchema,
)]
#[sqlx(type_name = "event_type", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum EventType {
    #[default]
    Workshop,
    Competition,
    Lecture,
    Hackathon,
    Exhibition,
    Networking,
    Other,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Event {
    pub event_id: Uuid,
    pub title: String,
    pub description: String,
    pub event_type: EventType,
    pub event_time: DateTime<Utc>,
    pub location: Option<String>,
    pub owner_id: Uuid,
    pub created_at: DateTime<Utc>,
}

impl Event {
    pub fn is_owned_by(&self, user_id: Uuid) -> bool {
        self.owner_id == user_id
    }

    pub fn is_past(&self, now: DateTime<Utc>) -> bool {
        self.event_time <= now
    }
}
