//! Persistence seams for scrimmages, events and registrations.
//!
//! Each aggregate has a trait with a PostgreSQL implementation and a shared
//! in-process implementation in [`memory`]. Operations that guard the capacity
//! invariant ([`RegistrationRepository::create_pending`] and
//! [`RegistrationRepository::transition`]) must perform their check and their
//! write as one atomic step.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::error::Result;
use crate::models::{Event, EventType, Registration, RegistrationStatus, Scrimmage};

pub mod event;
pub mod memory;
pub mod registration;
pub mod scrimmage;

pub use event::PgEventRepository;
pub use memory::MemoryStore;
pub use registration::PgRegistrationRepository;
pub use scrimmage::PgScrimmageRepository;

/// Window into a date-ordered listing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListFilter {
    /// Exclusive lower bound on the scheduled time
    pub after: Option<DateTime<Utc>>,
    pub offset: i64,
    pub limit: i64,
}

impl Default for ListFilter {
    fn default() -> Self {
        Self {
            after: None,
            offset: 0,
            limit: 50,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: i64,
}

#[derive(Debug, Clone)]
pub struct NewScrimmage {
    pub title: String,
    pub description: String,
    pub scheduled_at: DateTime<Utc>,
    pub location: String,
    pub capacity: Option<i32>,
    pub owner_id: Uuid,
}

#[derive(Debug, Clone)]
pub struct NewEvent {
    pub title: String,
    pub description: String,
    pub event_type: EventType,
    pub event_time: DateTime<Utc>,
    pub location: Option<String>,
    pub owner_id: Uuid,
}

#[derive(Debug, Clone)]
pub struct NewRegistration {
    pub scrimmage_id: Uuid,
    pub user_id: Uuid,
    pub team_name: String,
    pub team_contact: String,
    pub team_size: i32,
    pub team_description: Option<String>,
}

#[async_trait]
pub trait ScrimmageRepository: Send + Sync {
    /// Scrimmages ordered by scheduled time, earliest first
    async fn list(&self, filter: ListFilter) -> Result<Page<Scrimmage>>;

    async fn list_by_owner(&self, owner_id: Uuid) -> Result<Vec<Scrimmage>>;

    async fn find_by_id(&self, id: Uuid) -> Result<Scrimmage>;

    async fn create(&self, new: &NewScrimmage) -> Result<Scrimmage>;

    /// Persists every mutable field of `scrimmage`
    async fn update(&self, scrimmage: &Scrimmage) -> Result<Scrimmage>;

    /// Removes the scrimmage and all of its registrations
    async fn delete(&self, id: Uuid) -> Result<()>;
}

#[async_trait]
pub trait EventRepository: Send + Sync {
    /// Events ordered by event time, earliest first
    async fn list(&self, filter: ListFilter) -> Result<Page<Event>>;

    async fn list_by_owner(&self, owner_id: Uuid) -> Result<Vec<Event>>;

    /// First event at or after `now`
    async fn next_upcoming(&self, now: DateTime<Utc>) -> Result<Option<Event>>;

    async fn find_by_id(&self, id: Uuid) -> Result<Event>;

    async fn create(&self, new: &NewEvent) -> Result<Event>;

    async fn update(&self, event: &Event) -> Result<Event>;

    async fn delete(&self, id: Uuid) -> Result<()>;
}

#[async_trait]
pub trait RegistrationRepository: Send + Sync {
    /// All registrations of a scrimmage, oldest first
    async fn list_for_scrimmage(&self, scrimmage_id: Uuid) -> Result<Vec<Registration>>;

    async fn list_for_user(&self, user_id: Uuid) -> Result<Vec<Registration>>;

    async fn find_by_id(&self, id: Uuid) -> Result<Registration>;

    async fn find_for_user(
        &self,
        scrimmage_id: Uuid,
        user_id: Uuid,
    ) -> Result<Option<Registration>>;

    /// Inserts a `Pending` registration.
    ///
    /// Fails with `NotFound` when the scrimmage is missing, `DuplicateRegistration`
    /// when the user already holds a registration for it, and `CapacityExceeded`
    /// when no spot is left at the time of the call.
    async fn create_pending(&self, new: &NewRegistration) -> Result<Registration>;

    /// Moves a registration to `to`.
    ///
    /// Fails with `InvalidTransition` when the current status does not allow it.
    /// A move to `Approved` claims a spot and fails with `CapacityExceeded` when
    /// none is left.
    async fn transition(&self, id: Uuid, to: RegistrationStatus) -> Result<Registration>;

    async fn delete(&self, id: Uuid) -> Result<()>;
}
