//! Motorcycle aggregate: registration data, status, and yard assignment.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use super::plate::Plate;
use super::validation::{ValidationError, non_empty, year_in_range};

/// Fleet status of a motorcycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum MotorcycleStatus {
    /// Registered and free for assignment.
    Available,
    /// Checked in at a yard.
    InUse,
    /// Flagged with a problem; excluded from check-in.
    InMaintenance,
}

impl MotorcycleStatus {
    /// Stable string form used in storage and query parameters.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Available => "available",
            Self::InUse => "in_use",
            Self::InMaintenance => "in_maintenance",
        }
    }

    /// Parse the stable string form, case-insensitively.
    pub fn parse(value: &str) -> Option<Self> {
        match value.to_ascii_lowercase().as_str() {
            "available" => Some(Self::Available),
            "in_use" => Some(Self::InUse),
            "in_maintenance" => Some(Self::InMaintenance),
            _ => None,
        }
    }
}

impl std::fmt::Display for MotorcycleStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Input payload for registering or updating a motorcycle.
#[derive(Debug, Clone, PartialEq)]
pub struct MotorcycleDraft {
    /// Plate text in either accepted format.
    pub plate: String,
    /// Model name.
    pub model: String,
    /// Brand name.
    pub brand: String,
    /// RFID tag attached to the vehicle.
    pub rfid_tag: String,
    /// Model year.
    pub year: i32,
    /// Optional open problem note.
    pub problem: Option<String>,
    /// Optional free-text location hint.
    pub location: Option<String>,
}

/// A registered motorcycle.
///
/// State changes only through the methods below; construction and every
/// update re-validate the full field set. Yard assignment is driven by
/// [`Yard::check_in`](super::Yard::check_in) and
/// [`Yard::check_out`](super::Yard::check_out), which own the transition
/// rules.
#[derive(Debug, Clone, PartialEq)]
pub struct Motorcycle {
    id: Uuid,
    plate: Plate,
    model: String,
    brand: String,
    rfid_tag: String,
    year: i32,
    registered_at: DateTime<Utc>,
    problem: Option<String>,
    location: Option<String>,
    status: MotorcycleStatus,
    yard_id: Option<Uuid>,
}

impl Motorcycle {
    /// Register a new motorcycle: fresh id, current timestamp, status
    /// [`MotorcycleStatus::Available`].
    pub fn register(draft: MotorcycleDraft) -> Result<Self, ValidationError> {
        let mut motorcycle = Self {
            id: Uuid::new_v4(),
            plate: Plate::new(&draft.plate)?,
            model: String::new(),
            brand: String::new(),
            rfid_tag: String::new(),
            year: 0,
            registered_at: Utc::now(),
            problem: None,
            location: None,
            status: MotorcycleStatus::Available,
            yard_id: None,
        };
        motorcycle.apply(draft)?;
        Ok(motorcycle)
    }

    /// Rehydrate a motorcycle from already-validated stored parts.
    #[expect(clippy::too_many_arguments, reason = "storage rehydration mirrors the row shape")]
    pub(crate) fn from_parts(
        id: Uuid,
        plate: Plate,
        model: String,
        brand: String,
        rfid_tag: String,
        year: i32,
        registered_at: DateTime<Utc>,
        problem: Option<String>,
        location: Option<String>,
        status: MotorcycleStatus,
        yard_id: Option<Uuid>,
    ) -> Self {
        Self {
            id,
            plate,
            model,
            brand,
            rfid_tag,
            year,
            registered_at,
            problem,
            location,
            status,
            yard_id,
        }
    }

    /// Unique identifier.
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Validated plate.
    pub fn plate(&self) -> &Plate {
        &self.plate
    }

    /// Model name.
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Brand name.
    pub fn brand(&self) -> &str {
        &self.brand
    }

    /// RFID tag.
    pub fn rfid_tag(&self) -> &str {
        &self.rfid_tag
    }

    /// Model year.
    pub fn year(&self) -> i32 {
        self.year
    }

    /// Registration timestamp (UTC).
    pub fn registered_at(&self) -> DateTime<Utc> {
        self.registered_at
    }

    /// Open problem note, if any.
    pub fn problem(&self) -> Option<&str> {
        self.problem.as_deref()
    }

    /// Free-text location hint, if any.
    pub fn location(&self) -> Option<&str> {
        self.location.as_deref()
    }

    /// Current fleet status.
    pub fn status(&self) -> MotorcycleStatus {
        self.status
    }

    /// Yard the motorcycle is checked in at, if any.
    pub fn yard_id(&self) -> Option<Uuid> {
        self.yard_id
    }

    /// Replace the registration data, re-validating every field.
    ///
    /// Identity, registration timestamp, status, and yard assignment are
    /// not touched.
    pub fn update(&mut self, draft: MotorcycleDraft) -> Result<(), ValidationError> {
        self.plate = Plate::new(&draft.plate)?;
        self.apply(draft)
    }

    fn apply(&mut self, draft: MotorcycleDraft) -> Result<(), ValidationError> {
        self.model = non_empty(draft.model, "model")?;
        self.brand = non_empty(draft.brand, "brand")?;
        self.rfid_tag = non_empty(draft.rfid_tag, "rfidTag")?;
        self.year = year_in_range(draft.year)?;
        self.problem = draft.problem.filter(|p| !p.trim().is_empty());
        self.location = draft.location.filter(|l| !l.trim().is_empty());
        Ok(())
    }

    /// Record an open problem and move to maintenance.
    pub fn report_problem(&mut self, note: String) -> Result<(), ValidationError> {
        self.problem = Some(non_empty(note, "problem")?);
        self.status = MotorcycleStatus::InMaintenance;
        Ok(())
    }

    /// Clear the problem note, restoring the status implied by the yard
    /// assignment.
    pub fn resolve_problem(&mut self) {
        self.problem = None;
        self.status = if self.yard_id.is_some() {
            MotorcycleStatus::InUse
        } else {
            MotorcycleStatus::Available
        };
    }

    /// Attach to a yard. Only [`super::Yard`] transitions call this.
    pub(crate) fn assign_to_yard(&mut self, yard_id: Uuid) {
        self.yard_id = Some(yard_id);
        if self.status == MotorcycleStatus::Available {
            self.status = MotorcycleStatus::InUse;
        }
    }

    /// Detach from the current yard. Only [`super::Yard`] transitions call
    /// this.
    pub(crate) fn release_from_yard(&mut self) {
        self.yard_id = None;
        if self.status == MotorcycleStatus::InUse {
            self.status = MotorcycleStatus::Available;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn draft() -> MotorcycleDraft {
        MotorcycleDraft {
            plate: "ABC1D23".to_owned(),
            model: "CG 160".to_owned(),
            brand: "Honda".to_owned(),
            rfid_tag: "RF-001".to_owned(),
            year: 2023,
            problem: None,
            location: Some("dock 3".to_owned()),
        }
    }

    #[rstest]
    fn register_defaults_to_available() {
        let moto = Motorcycle::register(draft()).expect("valid draft");
        assert_eq!(moto.status(), MotorcycleStatus::Available);
        assert_eq!(moto.yard_id(), None);
        assert_eq!(moto.plate().as_str(), "ABC1D23");
    }

    #[rstest]
    fn register_rejects_blank_rfid() {
        let mut input = draft();
        input.rfid_tag = "  ".to_owned();
        let err = Motorcycle::register(input).expect_err("blank rfid");
        assert_eq!(err, ValidationError::EmptyField { field: "rfidTag" });
    }

    #[rstest]
    #[case(1884)]
    #[case(2200)]
    fn register_rejects_implausible_years(#[case] year: i32) {
        let mut input = draft();
        input.year = year;
        let err = Motorcycle::register(input).expect_err("implausible year");
        assert!(matches!(err, ValidationError::YearOutOfRange { .. }));
    }

    #[rstest]
    fn update_revalidates_and_keeps_identity() {
        let mut moto = Motorcycle::register(draft()).expect("valid draft");
        let id = moto.id();
        let registered_at = moto.registered_at();

        let mut changed = draft();
        changed.plate = "XYZ-9876".to_owned();
        changed.model = "Factor 150".to_owned();
        moto.update(changed).expect("valid update");

        assert_eq!(moto.id(), id);
        assert_eq!(moto.registered_at(), registered_at);
        assert_eq!(moto.plate().as_str(), "XYZ9876");
        assert_eq!(moto.model(), "Factor 150");

        let mut bad = draft();
        bad.model = String::new();
        assert!(moto.update(bad).is_err());
    }

    #[rstest]
    fn problem_report_moves_to_maintenance_and_back() {
        let mut moto = Motorcycle::register(draft()).expect("valid draft");
        moto.report_problem("flat tyre".to_owned()).expect("note accepted");
        assert_eq!(moto.status(), MotorcycleStatus::InMaintenance);
        assert_eq!(moto.problem(), Some("flat tyre"));

        moto.resolve_problem();
        assert_eq!(moto.status(), MotorcycleStatus::Available);
        assert_eq!(moto.problem(), None);
    }

    #[rstest]
    fn resolve_problem_restores_in_use_when_assigned() {
        let mut moto = Motorcycle::register(draft()).expect("valid draft");
        moto.assign_to_yard(Uuid::new_v4());
        moto.report_problem("loose chain".to_owned()).expect("note accepted");
        moto.resolve_problem();
        assert_eq!(moto.status(), MotorcycleStatus::InUse);
    }

    #[rstest]
    #[case("available", Some(MotorcycleStatus::Available))]
    #[case("IN_USE", Some(MotorcycleStatus::InUse))]
    #[case("in_maintenance", Some(MotorcycleStatus::InMaintenance))]
    #[case("retired", None)]
    fn status_parses_stable_names(#[case] input: &str, #[case] expected: Option<MotorcycleStatus>) {
        assert_eq!(MotorcycleStatus::parse(input), expected);
    }
}
