//! Port for motorcycle persistence and paginated queries.

use async_trait::async_trait;
use pagination::{PageRequest, PageResult, SortDir};

use crate::domain::Motorcycle;

use super::repository::{Repository, RepositoryError};

/// Sortable motorcycle fields.
///
/// Parsing accepts the English names and, for clients of the first API
/// generation, the Portuguese ones. Anything unrecognised falls back to the
/// registration timestamp.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MotorcycleSortField {
    /// Normalised plate text.
    Plate,
    /// Model name.
    Model,
    /// Brand name.
    Brand,
    /// Model year.
    Year,
    /// Fleet status.
    Status,
    /// Registration timestamp (the default).
    #[default]
    RegisteredAt,
}

impl MotorcycleSortField {
    /// Parse a `sortBy` query value, case-insensitively.
    pub fn parse(value: Option<&str>) -> Self {
        match value.unwrap_or_default().to_ascii_lowercase().as_str() {
            "plate" | "placa" => Self::Plate,
            "model" | "modelo" => Self::Model,
            "brand" | "marca" => Self::Brand,
            "year" | "ano" => Self::Year,
            "status" => Self::Status,
            _ => Self::RegisteredAt,
        }
    }
}

/// A paginated motorcycle query.
///
/// `search` matches case-insensitive substrings of plate, model, or brand.
#[derive(Debug, Clone, Default)]
pub struct MotorcyclePage {
    /// Normalised page/size request.
    pub request: PageRequest,
    /// Optional free-text filter.
    pub search: Option<String>,
    /// Active sort field.
    pub sort_by: MotorcycleSortField,
    /// Sort direction.
    pub direction: SortDir,
}

/// Motorcycle store: the generic CRUD contract plus the paginated query.
///
/// `page` executes a filtered count and a filtered, sorted, offset/limit
/// fetch as two separate statements; the two are not a snapshot, so totals
/// can drift against the slice under concurrent writes. The requested page
/// is clamped into `[1, total_pages]` before slicing, and equal sort keys
/// tiebreak on id ascending.
#[async_trait]
pub trait MotorcycleRepository: Repository<Motorcycle> {
    /// Execute a counted, sorted, sliced query.
    async fn page(&self, query: MotorcyclePage) -> Result<PageResult<Motorcycle>, RepositoryError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(Some("plate"), MotorcycleSortField::Plate)]
    #[case(Some("Placa"), MotorcycleSortField::Plate)]
    #[case(Some("MODELO"), MotorcycleSortField::Model)]
    #[case(Some("brand"), MotorcycleSortField::Brand)]
    #[case(Some("ano"), MotorcycleSortField::Year)]
    #[case(Some("status"), MotorcycleSortField::Status)]
    #[case(Some("datacadastro"), MotorcycleSortField::RegisteredAt)]
    #[case(Some("registeredAt"), MotorcycleSortField::RegisteredAt)]
    #[case(Some("unknown-field"), MotorcycleSortField::RegisteredAt)]
    #[case(None, MotorcycleSortField::RegisteredAt)]
    fn sort_field_parses_with_aliases_and_fallback(
        #[case] input: Option<&str>,
        #[case] expected: MotorcycleSortField,
    ) {
        assert_eq!(MotorcycleSortField::parse(input), expected);
    }
}
