//! Sort direction parsing for listing endpoints.

/// Direction applied to the active sort field.
///
/// The wire value matches `"Asc"` case-insensitively; everything else,
/// including an absent parameter, sorts descending.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDir {
    /// Ascending order.
    Asc,
    /// Descending order (the default).
    #[default]
    Desc,
}

impl SortDir {
    /// Parse the `sortDir` query value.
    pub fn parse(value: Option<&str>) -> Self {
        match value {
            Some(v) if v.eq_ignore_ascii_case("asc") => Self::Asc,
            _ => Self::Desc,
        }
    }

    /// Whether this direction sorts ascending.
    pub fn is_ascending(self) -> bool {
        matches!(self, Self::Asc)
    }
}
