use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

/// Lifecycle of a team's request to join a scrimmage.
///
/// Only `Approved` registrations occupy a spot. `Cancelled` marks a withdrawal
/// by the registrant, as opposed to `Rejected` which is the owner's decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "registration_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum RegistrationStatus {
    Pending,
    Approved,
    Rejected,
    Cancelled,
}

impl RegistrationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
            Self::Cancelled => "cancelled",
        }
    }

    /// Whether a registration in this status may move to `next`.
    ///
    /// ```
    /// use scrimhub_storage::models::RegistrationStatus;
    ///
    /// assert!(RegistrationStatus::Pending.can_transition_to(RegistrationStatus::Approved));
    /// assert!(RegistrationStatus::Approved.can_transition_to(RegistrationStatus::Rejected));
    /// assert!(!RegistrationStatus::Rejected.can_transition_to(RegistrationStatus::Approved));
    /// ```
    pub fn can_transition_to(self, next: RegistrationStatus) -> bool {
        use RegistrationStatus::*;

        matches!(
            (self, next),
            (Pending, Approved) | (Pending, Rejected) | (Pending, Cancelled) | (Approved, Rejected)
        )
    }

    pub fn holds_spot(self) -> bool {
        self == Self::Approved
    }
}

impl fmt::Display for RegistrationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Registration {
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

impl Registration {
    pub fn is_held_by(&self, user_id: Uuid) -> bool {
        self.user_id == user_id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use RegistrationStatus::*;

    #[test]
    fn test_pending_can_move_to_every_other_state() {
        assert!(Pending.can_transition_to(Approved));
        assert!(Pending.can_transition_to(Rejected));
        assert!(Pending.can_transition_to(Cancelled));
        assert!(!Pending.can_transition_to(Pending));
    }

    #[test]
    fn test_approved_can_only_be_revoked() {
        assert!(Approved.can_transition_to(Rejected));
        assert!(!Approved.can_transition_to(Cancelled));
        assert!(!Approved.can_transition_to(Pending));
        assert!(!Approved.can_transition_to(Approved));
    }

    #[test]
    fn test_rejected_and_cancelled_are_closed() {
        for next in [Pending, Approved, Rejected, Cancelled] {
            assert!(!Rejected.can_transition_to(next));
            assert!(!Cancelled.can_transition_to(next));
        }
    }

    #[test]
    fn test_only_approved_holds_a_spot() {
        assert!(Approved.holds_spot());
        assert!(!Pending.holds_spot());
        assert!(!Rejected.holds_spot());
        assert!(!Cancelled.holds_spot());
    }

    #[test]
    fn test_status_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Cancelled).unwrap(), "\"cancelled\"");
        assert_eq!(Approved.to_string(), "approved");
    }
}
