//! Repository contracts the outbound adapters implement.

mod motorcycle_repository;
mod repository;
mod user_repository;
mod yard_repository;

pub use self::motorcycle_repository::{MotorcyclePage, MotorcycleRepository, MotorcycleSortField};
pub use self::repository::{Repository, RepositoryError};
pub use self::user_repository::{UserPage, UserRepository, UserSortField};
pub use self::yard_repository::{YardPage, YardRepository, YardSortField};
