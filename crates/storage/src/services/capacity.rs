use serde::Serialize;
use utoipa::ToSchema;

use crate::models::{Registration, RegistrationStatus};

/// Capacity used for spot arithmetic. Missing or negative values count as zero.
pub fn effective_capacity(capacity: Option<i32>) -> i32 {
    capacity.unwrap_or(0).max(0)
}

/// Spots left once `approved` teams are counted against `capacity`.
///
/// The result goes negative when a scrimmage is over capacity, which callers
/// treat the same as full.
///
/// ```
/// use scrimhub_storage::services::capacity::available_spots;
///
/// assert_eq!(available_spots(Some(4), 1), 3);
/// assert_eq!(available_spots(Some(1), 3), -2);
/// assert_eq!(available_spots(None, 0), 0);
/// ```
pub fn available_spots(capacity: Option<i32>, approved: i64) -> i64 {
    i64::from(effective_capacity(capacity)) - approved
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
pub struct CapacitySummary {
    pub capacity: i32,
    pub approved_count: i64,
    pub pending_count: i64,
    pub available_spots: i64,
}

impl CapacitySummary {
    pub fn from_registrations(capacity: Option<i32>, registrations: &[Registration]) -> Self {
        let count = |status: RegistrationStatus| {
            registrations.iter().filter(|r| r.status == status).count() as i64
        };
        let approved_count = count(RegistrationStatus::Approved);

        Self {
            capacity: effective_capacity(capacity),
            approved_count,
            pending_count: count(RegistrationStatus::Pending),
            available_spots: available_spots(capacity, approved_count),
        }
    }

    pub fn is_full(&self) -> bool {
        self.available_spots <= 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use uuid::Uuid;

    fn registration(status: RegistrationStatus) -> Registration {
        Registration {
            registration_id: Uuid::new_v4(),
            scrimmage_id: Uuid::nil(),
            user_id: Uuid::new_v4(),
            team_name: "Gearheads".to_string(),
            team_contact: "coach@example.org".to_string(),
            team_size: 4,
            team_description: None,
            status,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_spots_are_capacity_minus_approved() {
        for capacity in 0..6 {
            for approved in 0..8 {
                assert_eq!(
                    available_spots(Some(capacity), approved),
                    i64::from(capacity) - approved
                );
            }
        }
    }

    #[test]
    fn test_zero_capacity_is_always_full() {
        let summary = CapacitySummary::from_registrations(Some(0), &[]);
        assert_eq!(summary.available_spots, 0);
        assert!(summary.is_full());
    }

    #[test]
    fn test_missing_or_negative_capacity_floors_to_zero() {
        assert_eq!(effective_capacity(None), 0);
        assert_eq!(effective_capacity(Some(-3)), 0);
        assert_eq!(available_spots(Some(-3), 0), 0);
    }

    #[test]
    fn test_summary_counts_only_approved_against_capacity() {
        let registrations = vec![
            registration(RegistrationStatus::Approved),
            registration(RegistrationStatus::Pending),
            registration(RegistrationStatus::Pending),
            registration(RegistrationStatus::Rejected),
            registration(RegistrationStatus::Cancelled),
        ];

        let summary = CapacitySummary::from_registrations(Some(3), &registrations);
        assert_eq!(summary.capacity, 3);
        assert_eq!(summary.approved_count, 1);
        assert_eq!(summary.pending_count, 2);
        assert_eq!(summary.available_spots, 2);
        assert!(!summary.is_full());
    }

    #[test]
    fn test_over_capacity_reports_negative_spots() {
        let registrations = vec![
            registration(RegistrationStatus::Approved),
            registration(RegistrationStatus::Approved),
        ];

        let summary = CapacitySummary::from_registrations(Some(1), &registrations);
        assert_eq!(summary.available_spots, -1);
        assert!(summary.is_full());
    }
}
