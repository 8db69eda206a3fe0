//! Core of the HitList people list.
//! Owns the person model, its SQLite persistence and the list controller
//! that display surfaces drive.

pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::person::{
    Person, PersonId, PersonValidationError, PERSON_ENTITY, PERSON_NAME_ATTRIBUTE,
};
pub use repo::person_repo::{PersonRepository, RepoError, RepoResult, SqlitePersonRepository};
pub use service::list_controller::{
    AddOutcome, ListController, NamePrompt, PromptResponse, RefreshOutcome, ADD_NAME_MESSAGE,
    ADD_NAME_TITLE, LIST_TITLE,
};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
