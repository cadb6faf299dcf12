pub mod dto;
pub mod error;
pub mod models;
pub mod repository;
pub mod services;
pub mod session;

use std::sync::Arc;

use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;

use error::Result;
use repository::{
    EventRepository, MemoryStore, PgEventRepository, PgRegistrationRepository,
    PgScrimmageRepository, RegistrationRepository, ScrimmageRepository,
};

pub use session::Session;

/// Handle on the persistence layer shared by every request.
///
/// Cloning is cheap: the repositories sit behind `Arc`s and the PostgreSQL
/// pool is itself reference counted.
#[derive(Clone)]
pub struct Database {
    scrimmages: Arc<dyn ScrimmageRepository>,
    events: Arc<dyn EventRepository>,
    registrations: Arc<dyn RegistrationRepository>,
    pool: Option<PgPool>,
}

impl Database {
    /// Connect to PostgreSQL
    pub async fn new(database_url: &str, max_connections: u32) -> Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect(database_url)
            .await?;

        Ok(Self::from_pool(pool))
    }

    pub fn from_pool(pool: PgPool) -> Self {
        Self {
            scrimmages: Arc::new(PgScrimmageRepository::new(pool.clone())),
            events: Arc::new(PgEventRepository::new(pool.clone())),
            registrations: Arc::new(PgRegistrationRepository::new(pool.clone())),
            pool: Some(pool),
        }
    }

    /// Process-local store, nothing is persisted
    pub fn in_memory() -> Self {
        let store = MemoryStore::new();
        Self {
            scrimmages: Arc::new(store.clone()),
            events: Arc::new(store.clone()),
            registrations: Arc::new(store),
            pool: None,
        }
    }

    /// Apply the embedded migrations. A no-op for the in-memory store.
    pub async fn run_migrations(&self) -> Result<()> {
        if let Some(pool) = &self.pool {
            sqlx::migrate!("./migrations").run(pool).await?;
        }
        Ok(())
    }

    pub fn is_persistent(&self) -> bool {
        self.pool.is_some()
    }

    pub fn scrimmages(&self) -> &dyn ScrimmageRepository {
        self.scrimmages.as_ref()
    }

    pub fn events(&self) -> &dyn EventRepository {
        self.events.as_ref()
    }

    pub fn registrations(&self) -> &dyn RegistrationRepository {
        self.registrations.as_ref()
    }
}
