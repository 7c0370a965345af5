//! Port for yard persistence and paginated queries.

use async_trait::async_trait;
use pagination::{PageRequest, PageResult, SortDir};

use crate::domain::Yard;

use super::repository::{Repository, RepositoryError};

/// Sortable yard fields. Unrecognised values fall back to the name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum YardSortField {
    /// Display name (the default).
    #[default]
    Name,
    /// Capacity.
    Capacity,
    /// Identifier.
    Id,
}

impl YardSortField {
    /// Parse a `sortBy` query value, case-insensitively, accepting the first
    /// API generation's Portuguese names.
    pub fn parse(value: Option<&str>) -> Self {
        match value.unwrap_or_default().to_ascii_lowercase().as_str() {
            "capacity" | "capacidade" => Self::Capacity,
            "id" => Self::Id,
            _ => Self::Name,
        }
    }
}

/// A paginated yard query.
///
/// `search` matches case-insensitive substrings of name, street, city, or
/// postal code.
#[derive(Debug, Clone, Default)]
pub struct YardPage {
    /// Normalised page/size request.
    pub request: PageRequest,
    /// Optional free-text filter.
    pub search: Option<String>,
    /// Active sort field.
    pub sort_by: YardSortField,
    /// Sort direction.
    pub direction: SortDir,
}

/// Yard store: generic CRUD plus the paginated query.
///
/// `find` and `list` load each yard's occupant ids alongside the row so the
/// capacity invariant can be checked without a second round trip. The same
/// two-statement count/fetch caveat as the motorcycle port applies.
#[async_trait]
pub trait YardRepository: Repository<Yard> {
    /// Execute a counted, sorted, sliced query.
    async fn page(&self, query: YardPage) -> Result<PageResult<Yard>, RepositoryError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(Some("capacidade"), YardSortField::Capacity)]
    #[case(Some("Capacity"), YardSortField::Capacity)]
    #[case(Some("id"), YardSortField::Id)]
    #[case(Some("nome"), YardSortField::Name)]
    #[case(Some("anything"), YardSortField::Name)]
    #[case(None, YardSortField::Name)]
    fn sort_field_falls_back_to_name(#[case] input: Option<&str>, #[case] expected: YardSortField) {
        assert_eq!(YardSortField::parse(input), expected);
    }
}
