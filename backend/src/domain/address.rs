//! Yard address value object and its flattened persistence form.

use serde::Serialize;

use super::validation::{ValidationError, non_empty};

/// Separator used in the flattened `street|city|postal` persistence form.
const SEPARATOR: char = '|';

/// A yard's postal address, compared structurally.
///
/// The address persists as a single delimited string; [`Address::encode`] and
/// [`Address::decode`] are the only two sides of that mapping and are invoked
/// at the persistence boundary, never by the domain itself.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    street: String,
    city: String,
    postal_code: String,
}

impl Address {
    /// Validate the three required fields, trimming surrounding whitespace.
    pub fn new(street: String, city: String, postal_code: String) -> Result<Self, ValidationError> {
        Ok(Self {
            street: non_empty(street, "street")?,
            city: non_empty(city, "city")?,
            postal_code: non_empty(postal_code, "postalCode")?,
        })
    }

    /// Street line.
    pub fn street(&self) -> &str {
        &self.street
    }

    /// City name.
    pub fn city(&self) -> &str {
        &self.city
    }

    /// Postal code.
    pub fn postal_code(&self) -> &str {
        &self.postal_code
    }

    /// Render the flattened `street|city|postal` persistence form.
    pub fn encode(&self) -> String {
        format!(
            "{}{SEPARATOR}{}{SEPARATOR}{}",
            self.street, self.city, self.postal_code
        )
    }

    /// Rebuild an address from its persisted form.
    ///
    /// Reads are permissive: missing segments become empty fields and no
    /// error is raised, so a malformed stored value never fails a fetch.
    pub fn decode(persisted: &str) -> Self {
        let mut parts = persisted.split(SEPARATOR);
        let mut next = || parts.next().unwrap_or_default().trim().to_owned();
        Self {
            street: next(),
            city: next(),
            postal_code: next(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn address(street: &str, city: &str, postal: &str) -> Address {
        Address::new(street.to_owned(), city.to_owned(), postal.to_owned())
            .expect("valid address fields")
    }

    #[rstest]
    fn encode_then_decode_round_trips() {
        let original = address("Rua Azul 10", "Sao Paulo", "01310-100");
        let decoded = Address::decode(&original.encode());
        assert_eq!(decoded, original);
    }

    #[rstest]
    #[case("Rua Azul 10|Sao Paulo|01310-100")]
    #[case("a|b|c")]
    fn well_formed_strings_round_trip_exactly(#[case] persisted: &str) {
        assert_eq!(Address::decode(persisted).encode(), persisted);
    }

    #[rstest]
    #[case("")]
    #[case("   ")]
    fn empty_input_decodes_to_empty_fields(#[case] persisted: &str) {
        let decoded = Address::decode(persisted);
        assert_eq!(decoded, Address::default());
    }

    #[rstest]
    fn partial_input_fills_missing_fields_with_empty() {
        let decoded = Address::decode("Rua Azul 10|Sao Paulo");
        assert_eq!(decoded.street(), "Rua Azul 10");
        assert_eq!(decoded.city(), "Sao Paulo");
        assert_eq!(decoded.postal_code(), "");
    }

    #[rstest]
    fn construction_rejects_blank_fields() {
        let err = Address::new(String::new(), "Sao Paulo".to_owned(), "01310-100".to_owned())
            .expect_err("blank street");
        assert_eq!(err, ValidationError::EmptyField { field: "street" });
    }

    #[rstest]
    fn construction_trims_fields() {
        let trimmed = address(" Rua Azul 10 ", " Sao Paulo ", " 01310-100 ");
        assert_eq!(trimmed.street(), "Rua Azul 10");
        assert_eq!(trimmed.encode(), "Rua Azul 10|Sao Paulo|01310-100");
    }
}
