//! Data access for the entity store.
//!
//! Every entity is reached through a [`Repository`]; lookups that can miss
//! return `Ok(None)` rather than an error. Two backends implement the
//! traits: an in-process [`memory`] store and a [`postgres`] store.

use std::sync::Arc;

use async_trait::async_trait;
use sqlx::PgPool;

use crate::models::{Entity, Event, Individual, Organization, User};

pub mod memory;
pub mod postgres;

pub use memory::MemoryRepository;

#[derive(Debug, thiserror::Error)]
pub enum RepoError {
    #[error("Database error: {0}")]
    Database(String),
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<sqlx::Error> for RepoError {
    fn from(e: sqlx::Error) -> Self {
        RepoError::Database(e.to_string())
    }
}

/// Key-based access to one entity type.
#[async_trait]
pub trait Repository<T: Entity>: Send + Sync {
    async fn find_by_id(&self, id: i64) -> Result<Option<T>, RepoError>;

    /// Every stored entity. Callers must not rely on the order.
    async fn find_all(&self) -> Result<Vec<T>, RepoError>;

    /// Upsert. Entities without an id get one assigned; otherwise the
    /// record with the same id is overwritten.
    async fn save(&self, entity: T) -> Result<T, RepoError>;

    /// Returns whether a record was removed.
    async fn delete_by_id(&self, id: i64) -> Result<bool, RepoError>;
}

#[async_trait]
pub trait EmailLookup<T>: Send + Sync {
    /// First entity registered under `email`, if any.
    async fn find_first_by_email(&self, email: &str) -> Result<Option<T>, RepoError>;
}

pub trait EventRepository: Repository<Event> {}

impl<R: Repository<Event>> EventRepository for R {}

pub trait OrganizationRepository: Repository<Organization> + EmailLookup<Organization> {}

impl<R: Repository<Organization> + EmailLookup<Organization>> OrganizationRepository for R {}

pub trait IndividualRepository: Repository<Individual> + EmailLookup<Individual> {}

impl<R: Repository<Individual> + EmailLookup<Individual>> IndividualRepository for R {}

#[async_trait]
pub trait UserRepository: Repository<User> {
    async fn find_by_email(&self, email: &str) -> Result<Vec<User>, RepoError>;

    /// Returns the number of deleted accounts.
    async fn delete_by_email(&self, email: &str) -> Result<u64, RepoError>;
}

/// One handle per repository, shared across request handlers.
#[derive(Clone)]
pub struct Stores {
    pub events: Arc<dyn EventRepository>,
    pub organizations: Arc<dyn OrganizationRepository>,
    pub individuals: Arc<dyn IndividualRepository>,
    pub users: Arc<dyn UserRepository>,
}

impl Stores {
    pub fn memory() -> Self {
        Self {
            events: Arc::new(MemoryRepository::<Event>::new()),
            organizations: Arc::new(MemoryRepository::<Organization>::new()),
            individuals: Arc::new(MemoryRepository::<Individual>::new()),
            users: Arc::new(MemoryRepository::<User>::new()),
        }
    }

    pub fn postgres(pool: PgPool) -> Self {
        Self {
            events: Arc::new(postgres::PgEventRepository::new(pool.clone())),
            organizations: Arc::new(postgres::PgOrganizationRepository::new(pool.clone())),
            individuals: Arc::new(postgres::PgIndividualRepository::new(pool.clone())),
            users: Arc::new(postgres::PgUserRepository::new(pool)),
        }
    }
}
