//! Persistence gateway contracts and the SQLite implementation.
//!
//! # Responsibility
//! - Define the fetch-all / create-and-save contract the list depends on.
//! - Keep SQL details out of the controller.
//!
//! # Invariants
//! - A successful `create_and_save` is durable before it returns.
//! - `fetch_all` reflects every prior successful `create_and_save`.

pub mod person_repo;
