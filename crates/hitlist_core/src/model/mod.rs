//! Domain model for the people list.
//!
//! # Invariants
//! - `Person` is the only persisted entity and `name` its only attribute.
//! - Identity is assigned once and never compared by list logic.

pub mod person;
