//! Diesel persistence adapters for the repository ports.

mod diesel_motorcycle_repository;
mod diesel_user_repository;
mod diesel_yard_repository;
mod error_mapping;
mod models;
mod pool;
pub(crate) mod schema;

pub use self::diesel_motorcycle_repository::DieselMotorcycleRepository;
pub use self::diesel_user_repository::DieselUserRepository;
pub use self::diesel_yard_repository::DieselYardRepository;
pub use self::pool::{DbPool, PoolConfig, PoolError};
