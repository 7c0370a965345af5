//! Generic CRUD port shared by every entity repository.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::DomainError;

/// Failures raised by repository adapters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RepositoryError {
    /// The store could not be reached or a connection checkout failed.
    #[error("repository connection failed: {message}")]
    Connection {
        /// Adapter-supplied description.
        message: String,
    },
    /// A query or mutation failed during execution.
    #[error("repository query failed: {message}")]
    Query {
        /// Adapter-supplied description.
        message: String,
    },
    /// A stored record no longer satisfies a domain invariant.
    #[error("stored record is corrupt: {message}")]
    Corrupt {
        /// Adapter-supplied description.
        message: String,
    },
}

impl RepositoryError {
    /// Create a connection error with the given message.
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
        }
    }

    /// Create a query error with the given message.
    pub fn query(message: impl Into<String>) -> Self {
        Self::Query {
            message: message.into(),
        }
    }

    /// Create a corrupt-record error with the given message.
    pub fn corrupt(message: impl Into<String>) -> Self {
        Self::Corrupt {
            message: message.into(),
        }
    }
}

impl From<RepositoryError> for DomainError {
    fn from(err: RepositoryError) -> Self {
        DomainError::internal(err.to_string())
    }
}

/// Generic async CRUD contract over an entity type.
///
/// Mutations commit individually; there is no cross-call unit of work at
/// this seam. `remove` reports whether a row existed so callers can map
/// absence to a not-found response.
#[async_trait]
pub trait Repository<T>: Send + Sync {
    /// Fetch every stored entity.
    async fn list(&self) -> Result<Vec<T>, RepositoryError>;

    /// Fetch one entity by id, `None` when absent.
    async fn find(&self, id: Uuid) -> Result<Option<T>, RepositoryError>;

    /// Persist a new entity.
    async fn add(&self, entity: &T) -> Result<(), RepositoryError>;

    /// Persist changes to an existing entity.
    async fn update(&self, entity: &T) -> Result<(), RepositoryError>;

    /// Delete by id, returning whether a row was removed.
    async fn remove(&self, id: Uuid) -> Result<bool, RepositoryError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn repository_errors_map_to_internal_domain_errors() {
        let err: DomainError = RepositoryError::connection("pool exhausted").into();
        assert_eq!(err.code(), crate::domain::ErrorCode::InternalError);
        assert!(err.message().contains("pool exhausted"));
    }

    #[rstest]
    fn corrupt_error_names_the_record_problem() {
        let err = RepositoryError::corrupt("stored plate 'A' is malformed");
        assert!(err.to_string().contains("stored plate"));
    }
}
