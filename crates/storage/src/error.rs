use thiserror::Error;

use crate::models::RegistrationStatus;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("Not found")]
    NotFound,

    #[error("Constraint violation: {0}")]
    ConstraintViolation(String),

    #[error("User is already registered for this scrimmage")]
    DuplicateRegistration,

    #[error("Scrimmage is full ({approved} of {capacity} teams approved)")]
    CapacityExceeded { capacity: i32, approved: i64 },

    #[error("Cannot move registration from {from} to {to}")]
    InvalidTransition {
        from: RegistrationStatus,
        to: RegistrationStatus,
    },
}

pub type Result<T> = std::result::Result<T, StorageError>;

impl StorageError {
    pub fn is_unique_violation(&self) -> bool {
        matches!(
            self,
            StorageError::Database(sqlx::Error::Database(e))
                if e.code().as_deref() == Some("23505")
        )
    }

    pub fn is_foreign_key_violation(&self) -> bool {
        matches!(
            self,
            StorageError::Database(sqlx::Error::Database(e))
                if e.code().as_deref() == Some("23503")
        )
    }
}

/// Errors reported by the service operations (workflow, listings, dashboard).
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("You have already registered for this scrimmage")]
    DuplicateRegistration,

    #[error("This scrimmage is full")]
    CapacityExceeded,

    #[error("You are not allowed to perform this action")]
    NotAuthorized,

    #[error("Resource not found")]
    NotFound,

    #[error("Cannot move registration from {from} to {to}")]
    InvalidTransition {
        from: RegistrationStatus,
        to: RegistrationStatus,
    },

    #[error("This item has already taken place and can no longer be edited")]
    AlreadyHappened,

    #[error("Store unavailable: {0}")]
    StoreUnavailable(#[source] StorageError),
}

pub type ServiceResult<T> = std::result::Result<T, ServiceError>;

impl From<StorageError> for ServiceError {
    fn from(error: StorageError) -> Self {
        match error {
            StorageError::NotFound => Self::NotFound,
            StorageError::DuplicateRegistration => Self::DuplicateRegistration,
            StorageError::CapacityExceeded { .. } => Self::CapacityExceeded,
            StorageError::InvalidTransition { from, to } => Self::InvalidTransition { from, to },
            e if e.is_unique_violation() => Self::DuplicateRegistration,
            e if e.is_foreign_key_violation() => Self::NotFound,
            other => Self::StoreUnavailable(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capacity_error_maps_to_service_error() {
        let err = ServiceError::from(StorageError::CapacityExceeded {
            capacity: 2,
            approved: 2,
        });
        assert!(matches!(err, ServiceError::CapacityExceeded));
    }

    #[test]
    fn test_transition_error_keeps_states() {
        let err = ServiceError::from(StorageError::InvalidTransition {
            from: RegistrationStatus::Rejected,
            to: RegistrationStatus::Approved,
        });
        match err {
            ServiceError::InvalidTransition { from, to } => {
                assert_eq!(from, RegistrationStatus::Rejected);
                assert_eq!(to, RegistrationStatus::Approved);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_database_errors_become_store_unavailable() {
        let err = ServiceError::from(StorageError::Database(sqlx::Error::PoolTimedOut));
        assert!(matches!(err, ServiceError::StoreUnavailable(_)));

        let err = ServiceError::from(StorageError::ConstraintViolation("bad".to_string()));
        assert!(matches!(err, ServiceError::StoreUnavailable(_)));
    }
}
