use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Identity of the authenticated caller, established once per request and
/// handed to every operation that needs to know who is acting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub user_id: Uuid,
}

impl Session {
    pub fn new(user_id: Uuid) -> Self {
        Self { user_id }
    }
}
