use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use super::common::{PaginationMeta, validate_not_blank};
use crate::models::Scrimmage;
use crate::repository::NewScrimmage;
use crate::services::capacity::CapacitySummary;

/// Request payload for creating a new scrimmage
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateScrimmageRequest {
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

    pub scheduled_at: DateTime<Utc>,

    #[validate(length(min = 1, max = 255))]
    #[validate(custom(function = "validate_not_blank"))]
    pub location: String,

    #[validate(range(min = 0, max = 1000, message = "Capacity must be between 0 and 1000"))]
    pub capacity: Option<i32>,
}

/// Request payload for updating an existing scrimmage
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdateScrimmageRequest {
    #[validate(length(min = 1, max = 255))]
    #[validate(custom(function = "validate_not_blank"))]
    pub title: Option<String>,

    #[validate(length(min = 1, max = 5000))]
    #[validate(custom(function = "validate_not_blank"))]
    pub description: Option<String>,

    pub scheduled_at: Option<DateTime<Utc>>,

    #[validate(length(min = 1, max = 255))]
    #[validate(custom(function = "validate_not_blank"))]
    pub location: Option<String>,

    #[validate(range(min = 0, max = 1000, message = "Capacity must be between 0 and 1000"))]
    pub capacity: Option<i32>,
}

/// Response containing scrimmage details
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ScrimmageResponse {
    pub scrimmage_id: Uuid,
    pub title: String,
    pub description: String,
    pub scheduled_at: DateTime<Utc>,
    pub location: String,
    pub capacity: Option<i32>,
    pub owner_id: Uuid,
    pub created_at: DateTime<Utc>,
}

/// A scrimmage together with its current registration counts
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ScrimmageDetailResponse {
    pub scrimmage: ScrimmageResponse,
    pub summary: CapacitySummary,
    pub is_full: bool,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ScrimmageListResponse {
    pub data: Vec<ScrimmageResponse>,
    pub pagination: PaginationMeta,
}

impl CreateScrimmageRequest {
    pub fn into_new(self, owner_id: Uuid) -> NewScrimmage {
        NewScrimmage {
            title: self.title.trim().to_string(),
            description: self.description.trim().to_string(),
            scheduled_at: self.scheduled_at,
            location: self.location.trim().to_string(),
            capacity: self.capacity,
            owner_id,
        }
    }
}

impl UpdateScrimmageRequest {
    /// Overwrites the fields present in the request, leaving the rest untouched.
    pub fn apply_to(&self, scrimmage: &mut Scrimmage) {
        if let Some(title) = &self.title {
            scrimmage.title = title.trim().to_string();
        }
        if let Some(description) = &self.description {
            scrimmage.description = description.trim().to_string();
        }
        if let Some(scheduled_at) = self.scheduled_at {
            scrimmage.scheduled_at = scheduled_at;
        }
        if let Some(location) = &self.location {
            scrimmage.location = location.trim().to_string();
        }
        if let Some(capacity) = self.capacity {
            scrimmage.capacity = Some(capacity);
        }
    }
}

impl From<Scrimmage> for ScrimmageResponse {
    fn from(scrimmage: Scrimmage) -> Self {
        Self {
            scrimmage_id: scrimmage.scrimmage_id,
            title: scrimmage.title,
            description: scrimmage.description,
            scheduled_at: scrimmage.scheduled_at,
            location: scrimmage.location,
            capacity: scrimmage.capacity,
            owner_id: scrimmage.owner_id,
            created_at: scrimmage.created_at,
        }
    }
}

impl ScrimmageDetailResponse {
    pub fn new(scrimmage: Scrimmage, summary: CapacitySummary) -> Self {
        Self {
            scrimmage: scrimmage.into(),
            is_full: summary.is_full(),
            summary,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn create_request() -> CreateScrimmageRequest {
        CreateScrimmageRequest {
            title: "  Spring scrimmage ".to_string(),
            description: "Practice matches".to_string(),
            scheduled_at: Utc::now() + Duration::days(7),
            location: "Gym B".to_string(),
            capacity: Some(8),
        }
    }

    #[test]
    fn test_create_request_is_trimmed() {
        let owner = Uuid::new_v4();
        let new = create_request().into_new(owner);
        assert_eq!(new.title, "Spring scrimmage");
        assert_eq!(new.owner_id, owner);
    }

    #[test]
    fn test_blank_title_is_rejected() {
        let req = CreateScrimmageRequest {
            title: "   ".to_string(),
            ..create_request()
        };
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_negative_capacity_is_rejected() {
        let req = CreateScrimmageRequest {
            capacity: Some(-1),
            ..create_request()
        };
        assert!(req.validate().is_err());
        assert!(create_request().validate().is_ok());
    }

    #[test]
    fn test_update_only_touches_present_fields() {
        let new = create_request().into_new(Uuid::new_v4());
        let mut scrimmage = Scrimmage {
            scrimmage_id: Uuid::new_v4(),
            title: new.title,
            description: new.description,
            scheduled_at: new.scheduled_at,
            location: new.location,
            capacity: new.capacity,
            owner_id: new.owner_id,
            created_at: Utc::now(),
        };

        let update = UpdateScrimmageRequest {
            capacity: Some(2),
            location: Some("Field 3".to_string()),
            ..UpdateScrimmageRequest::default()
        };
        update.apply_to(&mut scrimmage);

        assert_eq!(scrimmage.capacity, Some(2));
        assert_eq!(scrimmage.location, "Field 3");
        assert_eq!(scrimmage.title, "Spring scrimmage");
    }
}
