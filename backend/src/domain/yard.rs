//! Yard aggregate: bounded-capacity holding area for motorcycles.

use uuid::Uuid;

use super::address::Address;
use super::motorcycle::{Motorcycle, MotorcycleStatus};
use super::validation::{ValidationError, non_empty};

/// State-conflict failures raised by yard transitions.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TransitionError {
    /// Every slot in the yard is taken.
    #[error("yard is at capacity ({capacity})")]
    YardFull {
        /// The yard's capacity.
        capacity: i32,
    },
    /// The motorcycle is already checked in at another yard.
    #[error("motorcycle is already assigned to yard {yard_id}")]
    AssignedElsewhere {
        /// The yard currently holding the motorcycle.
        yard_id: Uuid,
    },
    /// Motorcycles under maintenance cannot check in.
    #[error("motorcycle is in maintenance")]
    InMaintenance,
    /// The new capacity would not hold the current occupants.
    #[error("capacity {capacity} is below current occupancy {occupancy}")]
    CapacityBelowOccupancy {
        /// The rejected capacity.
        capacity: i32,
        /// Motorcycles currently checked in.
        occupancy: usize,
    },
}

/// Failures raised by [`Yard::update`], which validates fields and checks
/// occupancy in one pass.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum YardError {
    /// A field failed validation.
    #[error(transparent)]
    Validation(#[from] ValidationError),
    /// The change conflicts with current occupancy.
    #[error(transparent)]
    Transition(#[from] TransitionError),
}

/// A physical yard with bounded capacity.
///
/// The occupant list is loaded by the repository alongside the yard row;
/// check-in and check-out keep it and the motorcycle's own assignment in
/// step. Occupancy never exceeds capacity.
#[derive(Debug, Clone, PartialEq)]
pub struct Yard {
    id: Uuid,
    name: String,
    address: Address,
    capacity: i32,
    motorcycle_ids: Vec<Uuid>,
}

impl Yard {
    /// Create an empty yard with the given capacity.
    pub fn new(name: String, address: Address, capacity: i32) -> Result<Self, ValidationError> {
        if capacity < 1 {
            return Err(ValidationError::CapacityNotPositive { capacity });
        }
        Ok(Self {
            id: Uuid::new_v4(),
            name: non_empty(name, "name")?,
            address,
            capacity,
            motorcycle_ids: Vec::new(),
        })
    }

    /// Rehydrate a yard and its occupant ids from storage.
    pub(crate) fn from_parts(
        id: Uuid,
        name: String,
        address: Address,
        capacity: i32,
        motorcycle_ids: Vec<Uuid>,
    ) -> Self {
        Self {
            id,
            name,
            address,
            capacity,
            motorcycle_ids,
        }
    }

    /// Unique identifier.
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Display name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Postal address.
    pub fn address(&self) -> &Address {
        &self.address
    }

    /// Maximum number of motorcycles the yard can hold.
    pub fn capacity(&self) -> i32 {
        self.capacity
    }

    /// Ids of the motorcycles currently checked in.
    pub fn motorcycle_ids(&self) -> &[Uuid] {
        &self.motorcycle_ids
    }

    /// Number of motorcycles currently checked in.
    pub fn occupancy(&self) -> usize {
        self.motorcycle_ids.len()
    }

    /// Whether every slot is taken.
    pub fn is_full(&self) -> bool {
        self.occupancy() >= usize::try_from(self.capacity).unwrap_or(0)
    }

    /// Replace name, address, and capacity.
    ///
    /// Shrinking capacity below the current occupancy is a conflict;
    /// shrinking to exactly the occupancy succeeds.
    pub fn update(
        &mut self,
        name: String,
        address: Address,
        capacity: i32,
    ) -> Result<(), YardError> {
        if capacity < 1 {
            return Err(ValidationError::CapacityNotPositive { capacity }.into());
        }
        let occupancy = self.occupancy();
        if usize::try_from(capacity).unwrap_or(0) < occupancy {
            return Err(TransitionError::CapacityBelowOccupancy {
                capacity,
                occupancy,
            }
            .into());
        }
        self.name = non_empty(name, "name").map_err(YardError::from)?;
        self.address = address;
        self.capacity = capacity;
        Ok(())
    }

    /// Check a motorcycle in.
    ///
    /// A motorcycle already in this yard is a no-op success. Conflicts: the
    /// yard is full, the motorcycle is assigned to another yard, or it is in
    /// maintenance.
    pub fn check_in(&mut self, motorcycle: &mut Motorcycle) -> Result<(), TransitionError> {
        if motorcycle.yard_id() == Some(self.id) {
            return Ok(());
        }
        if self.is_full() {
            return Err(TransitionError::YardFull {
                capacity: self.capacity,
            });
        }
        if let Some(other) = motorcycle.yard_id() {
            return Err(TransitionError::AssignedElsewhere { yard_id: other });
        }
        if motorcycle.status() == MotorcycleStatus::InMaintenance {
            return Err(TransitionError::InMaintenance);
        }
        self.motorcycle_ids.push(motorcycle.id());
        motorcycle.assign_to_yard(self.id);
        Ok(())
    }

    /// Check a motorcycle out.
    ///
    /// A motorcycle that is not in this yard is a no-op; otherwise the
    /// relation is cleared and an `InUse` status reverts to `Available`.
    pub fn check_out(&mut self, motorcycle: &mut Motorcycle) {
        if motorcycle.yard_id() != Some(self.id) {
            return;
        }
        self.motorcycle_ids.retain(|id| *id != motorcycle.id());
        motorcycle.release_from_yard();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::motorcycle::MotorcycleDraft;
    use rstest::rstest;

    fn motorcycle(plate: &str) -> Motorcycle {
        Motorcycle::register(MotorcycleDraft {
            plate: plate.to_owned(),
            model: "CG 160".to_owned(),
            brand: "Honda".to_owned(),
            rfid_tag: format!("RF-{plate}"),
            year: 2023,
            problem: None,
            location: None,
        })
        .expect("valid draft")
    }

    fn yard(capacity: i32) -> Yard {
        let address = Address::new(
            "Rua Azul 10".to_owned(),
            "Sao Paulo".to_owned(),
            "01310-100".to_owned(),
        )
        .expect("valid address");
        Yard::new("Centro".to_owned(), address, capacity).expect("valid yard")
    }

    #[rstest]
    fn check_in_assigns_and_marks_in_use() {
        let mut yard = yard(2);
        let mut moto = motorcycle("ABC1234");

        yard.check_in(&mut moto).expect("slot available");

        assert_eq!(moto.yard_id(), Some(yard.id()));
        assert_eq!(moto.status(), MotorcycleStatus::InUse);
        assert_eq!(yard.occupancy(), 1);
    }

    #[rstest]
    fn check_in_at_capacity_is_a_conflict() {
        let mut yard = yard(1);
        let mut first = motorcycle("ABC1234");
        let mut second = motorcycle("XYZ9876");

        yard.check_in(&mut first).expect("slot available");
        let err = yard.check_in(&mut second).expect_err("yard full");

        assert_eq!(err, TransitionError::YardFull { capacity: 1 });
        assert_eq!(second.yard_id(), None);
    }

    #[rstest]
    fn check_in_same_yard_is_idempotent() {
        let mut yard = yard(1);
        let mut moto = motorcycle("ABC1234");

        yard.check_in(&mut moto).expect("slot available");
        yard.check_in(&mut moto).expect("repeat check-in is a no-op");

        assert_eq!(yard.occupancy(), 1);
    }

    #[rstest]
    fn check_in_assigned_elsewhere_is_a_conflict() {
        let mut first_yard = yard(1);
        let mut second_yard = yard(1);
        let mut moto = motorcycle("ABC1234");

        first_yard.check_in(&mut moto).expect("slot available");
        let err = second_yard.check_in(&mut moto).expect_err("already assigned");

        assert_eq!(
            err,
            TransitionError::AssignedElsewhere {
                yard_id: first_yard.id()
            }
        );
    }

    #[rstest]
    fn check_in_refuses_maintenance() {
        let mut yard = yard(1);
        let mut moto = motorcycle("ABC1234");
        moto.report_problem("flat tyre".to_owned()).expect("note accepted");

        let err = yard.check_in(&mut moto).expect_err("in maintenance");
        assert_eq!(err, TransitionError::InMaintenance);
    }

    #[rstest]
    fn check_out_reverts_assignment() {
        let mut yard = yard(1);
        let mut moto = motorcycle("ABC1234");

        yard.check_in(&mut moto).expect("slot available");
        yard.check_out(&mut moto);

        assert_eq!(moto.yard_id(), None);
        assert_eq!(moto.status(), MotorcycleStatus::Available);
        assert_eq!(yard.occupancy(), 0);
    }

    #[rstest]
    fn check_out_of_unassigned_motorcycle_is_a_no_op() {
        let mut yard = yard(1);
        let mut moto = motorcycle("ABC1234");

        yard.check_out(&mut moto);

        assert_eq!(moto.status(), MotorcycleStatus::Available);
        assert_eq!(yard.occupancy(), 0);
    }

    #[rstest]
    fn capacity_cannot_shrink_below_occupancy() {
        let mut yard = yard(2);
        let mut first = motorcycle("ABC1234");
        let mut second = motorcycle("XYZ9876");
        yard.check_in(&mut first).expect("slot available");
        yard.check_in(&mut second).expect("slot available");

        let address = yard.address().clone();
        let err = yard
            .update("Centro".to_owned(), address.clone(), 1)
            .expect_err("occupancy exceeds new capacity");
        assert!(matches!(
            err,
            YardError::Transition(TransitionError::CapacityBelowOccupancy {
                capacity: 1,
                occupancy: 2
            })
        ));

        yard.update("Centro".to_owned(), address, 2)
            .expect("capacity equal to occupancy is allowed");
    }

    #[rstest]
    #[case(0)]
    #[case(-4)]
    fn capacity_must_be_positive(#[case] capacity: i32) {
        let address = Address::new(
            "Rua Azul 10".to_owned(),
            "Sao Paulo".to_owned(),
            "01310-100".to_owned(),
        )
        .expect("valid address");
        let err = Yard::new("Centro".to_owned(), address, capacity).expect_err("capacity rejected");
        assert_eq!(err, ValidationError::CapacityNotPositive { capacity });
    }
}
