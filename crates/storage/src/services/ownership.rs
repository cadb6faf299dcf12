use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::error::{ServiceError, ServiceResult};
use crate::session::Session;

/// Only the owner of a scrimmage or event may change it.
pub fn ensure_owner(owner_id: Uuid, session: &Session) -> ServiceResult<()> {
    if owner_id != session.user_id {
        return Err(ServiceError::NotAuthorized);
    }
    Ok(())
}

/// Items whose start time has passed are frozen.
pub fn ensure_not_past(starts_at: DateTime<Utc>, now: DateTime<Utc>) -> ServiceResult<()> {
    if starts_at <= now {
        return Err(ServiceError::AlreadyHappened);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_owner_passes_and_stranger_fails() {
        let owner = Uuid::new_v4();
        assert!(ensure_owner(owner, &Session::new(owner)).is_ok());
        assert!(matches!(
            ensure_owner(owner, &Session::new(Uuid::new_v4())),
            Err(ServiceError::NotAuthorized)
        ));
    }

    #[test]
    fn test_past_items_are_frozen() {
        let now = Utc::now();
        assert!(ensure_not_past(now + Duration::hours(1), now).is_ok());
        assert!(matches!(
            ensure_not_past(now, now),
            Err(ServiceError::AlreadyHappened)
        ));
    }
}
