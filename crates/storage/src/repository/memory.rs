use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::Mutex;
use uuid::Uuid;

use super::{
    EventRepository, ListFilter, NewEvent, NewRegistration, NewScrimmage, Page,
    RegistrationRepository, ScrimmageRepository,
};
use crate::error::{Result, StorageError};
use crate::models::{Event, Registration, RegistrationStatus, Scrimmage};
use crate::services::capacity::{available_spots, effective_capacity};

#[derive(Default)]
struct MemoryState {
    scrimmages: HashMap<Uuid, Scrimmage>,
    events: HashMap<Uuid, Event>,
    registrations: HashMap<Uuid, Registration>,
}

impl MemoryState {
    fn approved_count(&self, scrimmage_id: Uuid) -> i64 {
        self.registrations
            .values()
            .filter(|r| r.scrimmage_id == scrimmage_id && r.status.holds_spot())
            .count() as i64
    }

    fn ensure_spot_left(&self, scrimmage_id: Uuid) -> Result<()> {
        let capacity = self
            .scrimmages
            .get(&scrimmage_id)
            .ok_or(StorageError::NotFound)?
            .capacity;
        let approved = self.approved_count(scrimmage_id);

        if available_spots(capacity, approved) <= 0 {
            return Err(StorageError::CapacityExceeded {
                capacity: effective_capacity(capacity),
                approved,
            });
        }

        Ok(())
    }
}

/// Store keeping every table in one process-local map behind a single lock.
///
/// Used for development runs without a database and by the test suites. All
/// three repository traits share the lock, so each call is atomic.
#[derive(Clone, Default)]
pub struct MemoryStore {
    state: Arc<Mutex<MemoryState>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn paginate<T: Clone>(mut items: Vec<T>, filter: ListFilter) -> Page<T> {
    let total = items.len() as i64;
    let offset = filter.offset.max(0) as usize;
    let limit = filter.limit.max(0) as usize;

    let items = if offset >= items.len() {
        Vec::new()
    } else {
        items.drain(offset..).take(limit).collect()
    };

    Page { items, total }
}

fn after(bound: Option<DateTime<Utc>>, at: DateTime<Utc>) -> bool {
    bound.is_none_or(|b| at > b)
}

#[async_trait]
impl ScrimmageRepository for MemoryStore {
    async fn list(&self, filter: ListFilter) -> Result<Page<Scrimmage>> {
        let state = self.state.lock().await;

        let mut scrimmages: Vec<Scrimmage> = state
            .scrimmages
            .values()
            .filter(|s| after(filter.after, s.scheduled_at))
            .cloned()
            .collect();
        scrimmages.sort_by_key(|s| (s.scheduled_at, s.created_at));

        Ok(paginate(scrimmages, filter))
    }

    async fn list_by_owner(&self, owner_id: Uuid) -> Result<Vec<Scrimmage>> {
        let state = self.state.lock().await;

        let mut scrimmages: Vec<Scrimmage> = state
            .scrimmages
            .values()
            .filter(|s| s.is_owned_by(owner_id))
            .cloned()
            .collect();
        scrimmages.sort_by_key(|s| s.scheduled_at);

        Ok(scrimmages)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Scrimmage> {
        let state = self.state.lock().await;
        state
            .scrimmages
            .get(&id)
            .cloned()
            .ok_or(StorageError::NotFound)
    }

    async fn create(&self, new: &NewScrimmage) -> Result<Scrimmage> {
        let mut state = self.state.lock().await;

        let scrimmage = Scrimmage {
            scrimmage_id: Uuid::new_v4(),
            title: new.title.clone(),
            description: new.description.clone(),
            scheduled_at: new.scheduled_at,
            location: new.location.clone(),
            capacity: new.capacity,
            owner_id: new.owner_id,
            created_at: Utc::now(),
        };
        state
            .scrimmages
            .insert(scrimmage.scrimmage_id, scrimmage.clone());

        Ok(scrimmage)
    }

    async fn update(&self, scrimmage: &Scrimmage) -> Result<Scrimmage> {
        let mut state = self.state.lock().await;

        let stored = state
            .scrimmages
            .get_mut(&scrimmage.scrimmage_id)
            .ok_or(StorageError::NotFound)?;
        stored.title = scrimmage.title.clone();
        stored.description = scrimmage.description.clone();
        stored.scheduled_at = scrimmage.scheduled_at;
        stored.location = scrimmage.location.clone();
        stored.capacity = scrimmage.capacity;

        Ok(stored.clone())
    }

    async fn delete(&self, id: Uuid) -> Result<()> {
        let mut state = self.state.lock().await;

        state.scrimmages.remove(&id).ok_or(StorageError::NotFound)?;
        state.registrations.retain(|_, r| r.scrimmage_id != id);

        Ok(())
    }
}

#[async_trait]
impl EventRepository for MemoryStore {
    async fn list(&self, filter: ListFilter) -> Result<Page<Event>> {
        let state = self.state.lock().await;

        let mut events: Vec<Event> = state
            .events
            .values()
            .filter(|e| after(filter.after, e.event_time))
            .cloned()
            .collect();
        events.sort_by_key(|e| (e.event_time, e.created_at));

        Ok(paginate(events, filter))
    }

    async fn list_by_owner(&self, owner_id: Uuid) -> Result<Vec<Event>> {
        let state = self.state.lock().await;

        let mut events: Vec<Event> = state
            .events
            .values()
            .filter(|e| e.is_owned_by(owner_id))
            .cloned()
            .collect();
        events.sort_by_key(|e| e.event_time);

        Ok(events)
    }

    async fn next_upcoming(&self, now: DateTime<Utc>) -> Result<Option<Event>> {
        let state = self.state.lock().await;

        Ok(state
            .events
            .values()
            .filter(|e| e.event_time >= now)
            .min_by_key(|e| e.event_time)
            .cloned())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Event> {
        let state = self.state.lock().await;
        state.events.get(&id).cloned().ok_or(StorageError::NotFound)
    }

    async fn create(&self, new: &NewEvent) -> Result<Event> {
        let mut state = self.state.lock().await;

        let event = Event {
            event_id: Uuid::new_v4(),
            title: new.title.clone(),
            description: new.description.clone(),
            event_type: new.event_type,
            event_time: new.event_time,
            location: new.location.clone(),
            owner_id: new.owner_id,
            created_at: Utc::now(),
        };
        state.events.insert(event.event_id, event.clone());

        Ok(event)
    }

    async fn update(&self, event: &Event) -> Result<Event> {
        let mut state = self.state.lock().await;

        let stored = state
            .events
            .get_mut(&event.event_id)
            .ok_or(StorageError::NotFound)?;
        stored.title = event.title.clone();
        stored.description = event.description.clone();
        stored.event_type = event.event_type;
        stored.event_time = event.event_time;
        stored.location = event.location.clone();

        Ok(stored.clone())
    }

    async fn delete(&self, id: Uuid) -> Result<()> {
        let mut state = self.state.lock().await;
        state.events.remove(&id).ok_or(StorageError::NotFound)?;
        Ok(())
    }
}

#[async_trait]
impl RegistrationRepository for MemoryStore {
    async fn list_for_scrimmage(&self, scrimmage_id: Uuid) -> Result<Vec<Registration>> {
        let state = self.state.lock().await;

        let mut registrations: Vec<Registration> = state
            .registrations
            .values()
            .filter(|r| r.scrimmage_id == scrimmage_id)
            .cloned()
            .collect();
        registrations.sort_by_key(|r| r.created_at);

        Ok(registrations)
    }

    async fn list_for_user(&self, user_id: Uuid) -> Result<Vec<Registration>> {
        let state = self.state.lock().await;

        let mut registrations: Vec<Registration> = state
            .registrations
            .values()
            .filter(|r| r.is_held_by(user_id))
            .cloned()
            .collect();
        registrations.sort_by_key(|r| std::cmp::Reverse(r.created_at));

        Ok(registrations)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Registration> {
        let state = self.state.lock().await;
        state
            .registrations
            .get(&id)
            .cloned()
            .ok_or(StorageError::NotFound)
    }

    async fn find_for_user(
        &self,
        scrimmage_id: Uuid,
        user_id: Uuid,
    ) -> Result<Option<Registration>> {
        let state = self.state.lock().await;

        Ok(state
            .registrations
            .values()
            .find(|r| r.scrimmage_id == scrimmage_id && r.is_held_by(user_id))
            .cloned())
    }

    async fn create_pending(&self, new: &NewRegistration) -> Result<Registration> {
        let mut state = self.state.lock().await;

        if !state.scrimmages.contains_key(&new.scrimmage_id) {
            return Err(StorageError::NotFound);
        }

        let already_registered = state
            .registrations
            .values()
            .any(|r| r.scrimmage_id == new.scrimmage_id && r.is_held_by(new.user_id));
        if already_registered {
            return Err(StorageError::DuplicateRegistration);
        }

        state.ensure_spot_left(new.scrimmage_id)?;

        let now = Utc::now();
        let registration = Registration {
            registration_id: Uuid::new_v4(),
            scrimmage_id: new.scrimmage_id,
            user_id: new.user_id,
            team_name: new.team_name.clone(),
            team_contact: new.team_contact.clone(),
            team_size: new.team_size,
            team_description: new.team_description.clone(),
            status: RegistrationStatus::Pending,
            created_at: now,
            updated_at: now,
        };
        state
            .registrations
            .insert(registration.registration_id, registration.clone());

        Ok(registration)
    }

    async fn transition(&self, id: Uuid, to: RegistrationStatus) -> Result<Registration> {
        let mut state = self.state.lock().await;

        let current = state
            .registrations
            .get(&id)
            .ok_or(StorageError::NotFound)?;
        let (from, scrimmage_id) = (current.status, current.scrimmage_id);

        if !from.can_transition_to(to) {
            return Err(StorageError::InvalidTransition { from, to });
        }

        if to.holds_spot() {
            state.ensure_spot_left(scrimmage_id)?;
        }

        let registration = state
            .registrations
            .get_mut(&id)
            .ok_or(StorageError::NotFound)?;
        registration.status = to;
        registration.updated_at = Utc::now();

        Ok(registration.clone())
    }

    async fn delete(&self, id: Uuid) -> Result<()> {
        let mut state = self.state.lock().await;
        state
            .registrations
            .remove(&id)
            .ok_or(StorageError::NotFound)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn new_scrimmage(capacity: Option<i32>, days_ahead: i64) -> NewScrimmage {
        NewScrimmage {
            title: "Regional warm-up".to_string(),
            description: "Three rounds".to_string(),
            scheduled_at: Utc::now() + Duration::days(days_ahead),
            location: "Hall A".to_string(),
            capacity,
            owner_id: Uuid::new_v4(),
        }
    }

    fn new_registration(scrimmage_id: Uuid) -> NewRegistration {
        NewRegistration {
            scrimmage_id,
            user_id: Uuid::new_v4(),
            team_name: "Bolt".to_string(),
            team_contact: "bolt@example.org".to_string(),
            team_size: 3,
            team_description: None,
        }
    }

    #[tokio::test]
    async fn test_list_orders_by_date_and_paginates() {
        let store = MemoryStore::new();
        for days in [5, 1, 3] {
            ScrimmageRepository::create(&store, &new_scrimmage(Some(2), days))
                .await
                .unwrap();
        }

        let page = ScrimmageRepository::list(
            &store,
            ListFilter {
                after: None,
                offset: 1,
                limit: 1,
            },
        )
        .await
        .unwrap();

        assert_eq!(page.total, 3);
        assert_eq!(page.items.len(), 1);

        let all = ScrimmageRepository::list(&store, ListFilter::default())
            .await
            .unwrap();
        assert_eq!(all.items[1].scheduled_at, page.items[0].scheduled_at);
        assert!(all.items[0].scheduled_at < all.items[2].scheduled_at);
    }

    #[tokio::test]
    async fn test_upcoming_filter_skips_past_items() {
        let store = MemoryStore::new();
        ScrimmageRepository::create(&store, &new_scrimmage(Some(2), -2))
            .await
            .unwrap();
        ScrimmageRepository::create(&store, &new_scrimmage(Some(2), 2))
            .await
            .unwrap();

        let page = ScrimmageRepository::list(
            &store,
            ListFilter {
                after: Some(Utc::now()),
                ..ListFilter::default()
            },
        )
        .await
        .unwrap();

        assert_eq!(page.total, 1);
    }

    #[tokio::test]
    async fn test_signup_requires_existing_scrimmage() {
        let store = MemoryStore::new();
        let err = store
            .create_pending(&new_registration(Uuid::new_v4()))
            .await
            .unwrap_err();
        assert!(matches!(err, StorageError::NotFound));
    }

    #[tokio::test]
    async fn test_transition_checks_capacity_inside_lock() {
        let store = MemoryStore::new();
        let scrimmage = ScrimmageRepository::create(&store, &new_scrimmage(Some(1), 3))
            .await
            .unwrap();

        let first = store
            .create_pending(&new_registration(scrimmage.scrimmage_id))
            .await
            .unwrap();
        let second = store
            .create_pending(&new_registration(scrimmage.scrimmage_id))
            .await
            .unwrap();

        store
            .transition(first.registration_id, RegistrationStatus::Approved)
            .await
            .unwrap();
        let err = store
            .transition(second.registration_id, RegistrationStatus::Approved)
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            StorageError::CapacityExceeded {
                capacity: 1,
                approved: 1
            }
        ));
    }

    #[tokio::test]
    async fn test_deleting_scrimmage_removes_registrations() {
        let store = MemoryStore::new();
        let scrimmage = ScrimmageRepository::create(&store, &new_scrimmage(Some(4), 3))
            .await
            .unwrap();
        let registration = store
            .create_pending(&new_registration(scrimmage.scrimmage_id))
            .await
            .unwrap();

        ScrimmageRepository::delete(&store, scrimmage.scrimmage_id)
            .await
            .unwrap();

        let err = RegistrationRepository::find_by_id(&store, registration.registration_id)
            .await
            .unwrap_err();
        assert!(matches!(err, StorageError::NotFound));
    }

    #[tokio::test]
    async fn test_next_upcoming_event() {
        let store = MemoryStore::new();
        let owner = Uuid::new_v4();
        for days in [-1, 4, 2] {
            EventRepository::create(
                &store,
                &NewEvent {
                    title: format!("Event in {days} days"),
                    description: "STEM night".to_string(),
                    event_type: Default::default(),
                    event_time: Utc::now() + Duration::days(days),
                    location: None,
                    owner_id: owner,
                },
            )
            .await
            .unwrap();
        }

        let next = store.next_upcoming(Utc::now()).await.unwrap().unwrap();
        assert_eq!(next.title, "Event in 2 days");
    }
}
