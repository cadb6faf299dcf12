use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use super::common::{PaginationMeta, validate_not_blank};
use crate::models::{Event, EventType};
use crate::repository::NewEvent;

/// Request payload for creating a new event
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateEventRequest {
    #[validate(length(
        min = 1,
        max = 255,
        message = "Title must be between 1 and 255 characters"
    ))]
    #[validate(custom(function = "validate_not_blank"))]
    pub title: String,

    #[validate(length(min = 1, max = 5000))]
    #[validate(custom(function = "validate_not_blank"))]
    pub description: String,

    #[serde(default)]
    pub event_type: EventType,

    pub event_time: DateTime<Utc>,

    #[validate(length(max = 255))]
    pub location: Option<String>,
}

/// Request payload for updating an existing event
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdateEventRequest {
    #[validate(length(min = 1, max = 255))]
    #[validate(custom(function = "validate_not_blank"))]
    pub title: Option<String>,

    #[validate(length(min = 1, max = 5000))]
    #[validate(custom(function = "validate_not_blank"))]
    pub description: Option<String>,

    pub event_type: Option<EventType>,

    pub event_time: Option<DateTime<Utc>>,

    #[validate(length(max = 255))]
    pub location: Option<String>,
}

/// Response containing event details
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct EventResponse {
    pub event_id: Uuid,
    pub title: String,
    pub description: String,
    pub event_type: EventType,
    pub event_time: DateTime<Utc>,
    pub location: Option<String>,
    pub owner_id: Uuid,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct EventListResponse {
    pub data: Vec<EventResponse>,
    pub pagination: PaginationMeta,
}

fn trimmed_location(location: &Option<String>) -> Option<String> {
    location
        .as_deref()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .map(String::from)
}

impl CreateEventRequest {
    pub fn into_new(self, owner_id: Uuid) -> NewEvent {
        NewEvent {
            title: self.title.trim().to_string(),
            description: self.description.trim().to_string(),
            event_type: self.event_type,
            event_time: self.event_time,
            location: trimmed_location(&self.location),
            owner_id,
        }
    }
}

impl UpdateEventRequest {
    /// Overwrites the fields present in the request. An empty location clears it.
    pub fn apply_to(&self, event: &mut Event) {
        if let Some(title) = &self.title {
            event.title = title.trim().to_string();
        }
        if let Some(description) = &self.description {
            event.description = description.trim().to_string();
        }
        if let Some(event_type) = self.event_type {
            event.event_type = event_type;
        }
        if let Some(event_time) = self.event_time {
            event.event_time = event_time;
        }
        if self.location.is_some() {
            event.location = trimmed_location(&self.location);
        }
    }
}

impl From<Event> for EventResponse {
    fn from(event: Event) -> Self {
        Self {
            event_id: event.event_id,
            title: event.title,
            description: event.description,
            event_type: event.event_type,
            event_time: event.event_time,
            location: event.location,
            owner_id: event.owner_id,
            created_at: event.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_type_defaults_to_workshop() {
        let req: CreateEventRequest = serde_json::from_value(serde_json::json!({
            "title": "Robotics 101",
            "description": "Intro session",
            "event_time": "2030-05-01T17:00:00Z"
        }))
        .unwrap();

        assert_eq!(req.event_type, EventType::Workshop);
        assert!(req.validate().is_ok());
    }

    #[test]
    fn test_unknown_event_type_is_rejected() {
        let result: Result<CreateEventRequest, _> = serde_json::from_value(serde_json::json!({
            "title": "Robotics 101",
            "description": "Intro session",
            "event_type": "party",
            "event_time": "2030-05-01T17:00:00Z"
        }));

        assert!(result.is_err());
    }

    #[test]
    fn test_blank_location_is_dropped() {
        let req = CreateEventRequest {
            title: "Hack night".to_string(),
            description: "Build things".to_string(),
            event_type: EventType::Hackathon,
            event_time: Utc::now(),
            location: Some("   ".to_string()),
        };

        assert_eq!(req.into_new(Uuid::new_v4()).location, None);
    }
}
