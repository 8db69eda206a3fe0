//! Person record.
//!
//! # Invariants
//! - `id` is a non-nil UUID and stays stable for the record's lifetime.
//! - `name` is free text: empty and duplicate values are both valid.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Entity name of the persistence surface.
pub const PERSON_ENTITY: &str = "Person";
/// The single attribute stored for a person.
pub const PERSON_NAME_ATTRIBUTE: &str = "name";

/// Stable identifier assigned by the persistence gateway.
pub type PersonId = Uuid;

/// Rejected person construction input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PersonValidationError {
    NilId,
}

impl Display for PersonValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NilId => write!(f, "person id must not be the nil uuid"),
        }
    }
}

impl Error for PersonValidationError {}

/// One entry of the list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Person {
    pub id: PersonId,
    pub name: String,
}

impl Person {
    /// Creates a person with a freshly generated id.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
        }
    }

    /// Rebuilds a person from an id that already exists, e.g. a stored row.
    pub fn with_id(id: PersonId, name: impl Into<String>) -> Result<Self, PersonValidationError> {
        if id.is_nil() {
            return Err(PersonValidationError::NilId);
        }
        Ok(Self {
            id,
            name: name.into(),
        })
    }
}
