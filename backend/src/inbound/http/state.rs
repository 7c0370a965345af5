//! Shared HTTP adapter state.
//!
//! Handlers receive this via `actix_web::web::Data`, so they depend only on
//! the domain ports and stay testable without a database.

use std::sync::Arc;

use crate::domain::ports::{MotorcycleRepository, UserRepository, YardRepository};
use crate::outbound::memory::InMemoryStore;
use crate::outbound::persistence::{
    DbPool, DieselMotorcycleRepository, DieselUserRepository, DieselYardRepository,
};

/// Dependency bundle for the HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    /// Motorcycle store.
    pub motorcycles: Arc<dyn MotorcycleRepository>,
    /// Yard store.
    pub yards: Arc<dyn YardRepository>,
    /// User store.
    pub users: Arc<dyn UserRepository>,
}

impl HttpState {
    /// State backed by the Diesel adapters over the given pool.
    pub fn with_pool(pool: &DbPool) -> Self {
        Self {
            motorcycles: Arc::new(DieselMotorcycleRepository::new(pool.clone())),
            yards: Arc::new(DieselYardRepository::new(pool.clone())),
            users: Arc::new(DieselUserRepository::new(pool.clone())),
        }
    }

    /// State backed by a fresh in-memory store (development and tests).
    pub fn in_memory() -> Self {
        Self::from_store(&InMemoryStore::new())
    }

    /// State over an existing in-memory store.
    pub fn from_store(store: &InMemoryStore) -> Self {
        Self {
            motorcycles: Arc::new(store.motorcycles()),
            yards: Arc::new(store.yards()),
            users: Arc::new(store.users()),
        }
    }
}
