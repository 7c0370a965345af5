//! Licence plate value object.

use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

use super::validation::ValidationError;

/// Legacy Brazilian format, three letters then four digits, hyphen optional.
static LEGACY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Z]{3}-?\d{4}$").expect("legacy plate pattern compiles"));

/// Mercosul format, `AAA9A99`.
static MERCOSUL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Z]{3}\d[A-Z]\d{2}$").expect("mercosul plate pattern compiles"));

/// A validated licence plate, normalised to uppercase with the hyphen
/// stripped.
///
/// Two formats are accepted: the legacy `AAA-9999` (hyphen optional on
/// input) and the Mercosul `AAA9A99`. Equality and ordering compare the
/// normalised value.
///
/// # Examples
/// ```
/// use motoyard::domain::Plate;
///
/// let plate = Plate::new("abc-1234").expect("legacy format");
/// assert_eq!(plate.as_str(), "ABC1234");
/// assert_eq!(plate, Plate::new("ABC1234").expect("same plate without hyphen"));
/// assert!(Plate::new("1234ABC").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct Plate(String);

impl Plate {
    /// Validate and normalise a plate string.
    pub fn new(value: &str) -> Result<Self, ValidationError> {
        let candidate = value.trim().to_uppercase();
        if candidate.is_empty() {
            return Err(ValidationError::EmptyField { field: "plate" });
        }
        if !LEGACY.is_match(&candidate) && !MERCOSUL.is_match(&candidate) {
            return Err(ValidationError::InvalidPlate { value: candidate });
        }
        Ok(Self(candidate.replace('-', "")))
    }

    /// The normalised plate text.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Plate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}
