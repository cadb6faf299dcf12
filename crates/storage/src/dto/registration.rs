use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use super::common::validate_not_blank;
use crate::models::{Registration, RegistrationStatus};
use crate::repository::NewRegistration;

/// Request payload for signing a team up to a scrimmage
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateRegistrationRequest {
    #[validate(length(
        min = 1,
        max = 255,
        message = "Team name must be between 1 and 255 characters"
    ))]
    #[validate(custom(function = "validate_not_blank"))]
    pub team_name: String,

    #[validate(length(min = 1, max = 255))]
    #[validate(custom(function = "validate_not_blank"))]
    pub team_contact: String,

    #[validate(range(min = 1, max = 20, message = "Team size must be between 1 and 20"))]
    pub team_size: i32,

    #[validate(length(max = 2000))]
    pub team_description: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct RegistrationResponse {
    pub registration_id: Uuid,
    pub scrimmage_id: Uuid,
    pub user_id: Uuid,
    pub team_name: String,
    pub team_contact: String,
    pub team_size: i32,
    pub team_description: Option<String>,
    pub status: RegistrationStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl CreateRegistrationRequest {
    pub fn into_new(self, scrimmage_id: Uuid, user_id: Uuid) -> NewRegistration {
        NewRegistration {
            scrimmage_id,
            user_id,
            team_name: self.team_name.trim().to_string(),
            team_contact: self.team_contact.trim().to_string(),
            team_size: self.team_size,
            team_description: self
                .team_description
                .as_deref()
                .map(str::trim)
                .filter(|d| !d.is_empty())
                .map(String::from),
        }
    }
}

impl From<Registration> for RegistrationResponse {
    fn from(registration: Registration) -> Self {
        Self {
            registration_id: registration.registration_id,
            scrimmage_id: registration.scrimmage_id,
            user_id: registration.user_id,
            team_name: registration.team_name,
            team_contact: registration.team_contact,
            team_size: registration.team_size,
            team_description: registration.team_description,
            status: registration.status,
            created_at: registration.created_at,
            updated_at: registration.updated_at,
        }
    }
}
