//! Port for user persistence and paginated queries.

use async_trait::async_trait;
use pagination::{PageRequest, PageResult, SortDir};

use crate::domain::User;

use super::repository::{Repository, RepositoryError};

/// Sortable user fields. Unrecognised values fall back to the registration
/// timestamp.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UserSortField {
    /// Display name.
    Name,
    /// Contact email.
    Email,
    /// Registration timestamp (the default).
    #[default]
    RegisteredAt,
}

impl UserSortField {
    /// Parse a `sortBy` query value, case-insensitively, accepting the first
    /// API generation's Portuguese names.
    pub fn parse(value: Option<&str>) -> Self {
        match value.unwrap_or_default().to_ascii_lowercase().as_str() {
            "name" | "nome" => Self::Name,
            "email" => Self::Email,
            _ => Self::RegisteredAt,
        }
    }
}

/// A paginated user query.
///
/// `search` matches case-insensitive substrings of name or email.
#[derive(Debug, Clone, Default)]
pub struct UserPage {
    /// Normalised page/size request.
    pub request: PageRequest,
    /// Optional free-text filter.
    pub search: Option<String>,
    /// Active sort field.
    pub sort_by: UserSortField,
    /// Sort direction.
    pub direction: SortDir,
}

/// User store: generic CRUD plus the paginated query.
#[async_trait]
pub trait UserRepository: Repository<User> {
    /// Execute a counted, sorted, sliced query.
    async fn page(&self, query: UserPage) -> Result<PageResult<User>, RepositoryError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(Some("nome"), UserSortField::Name)]
    #[case(Some("EMAIL"), UserSortField::Email)]
    #[case(Some("datacadastro"), UserSortField::RegisteredAt)]
    #[case(None, UserSortField::RegisteredAt)]
    fn sort_field_falls_back_to_registration(
        #[case] input: Option<&str>,
        #[case] expected: UserSortField,
    ) {
        assert_eq!(UserSortField::parse(input), expected);
    }
}
