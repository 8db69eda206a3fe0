//! Use-case layer between display events and the persistence gateway.
//!
//! # Responsibility
//! - Own in-memory list state and serve it as row data.
//! - Keep display surfaces decoupled from storage details.

pub mod list_controller;
