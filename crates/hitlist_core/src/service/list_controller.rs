//! List controller: in-memory people list plus the two display events.
//!
//! # Responsibility
//! - Refresh list state from the gateway when the list becomes visible.
//! - Run the add-name flow and append only confirmed saves.
//! - Answer row count / row content queries from the display.
//!
//! # Invariants
//! - `row_count()` always equals the length of the in-memory list.
//! - A failed gateway call never mutates the in-memory list.
//! - Gateway failures are logged and reported as outcomes, never propagated.

use crate::model::person::Person;
use crate::repo::person_repo::PersonRepository;
use log::{debug, error, info};

/// Title shown above the list.
pub const LIST_TITLE: &str = "\"The List\"";
/// Title of the add-name prompt.
pub const ADD_NAME_TITLE: &str = "New Name";
/// Message of the add-name prompt.
pub const ADD_NAME_MESSAGE: &str = "Add a new name";

/// Answer of a two-button text prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PromptResponse {
    /// Dismissed without saving.
    Cancel,
    /// Save pressed; `None` when the text field had no value at all.
    Save(Option<String>),
}

/// Modal text-input prompt supplied by the display surface.
pub trait NamePrompt {
    fn ask(&mut self, title: &str, message: &str) -> PromptResponse;
}

impl<F> NamePrompt for F
where
    F: FnMut(&str, &str) -> PromptResponse,
{
    fn ask(&mut self, title: &str, message: &str) -> PromptResponse {
        self(title, message)
    }
}

/// Result of a become-visible refresh.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshOutcome {
    /// List replaced with the gateway contents.
    Refreshed { rows: usize },
    /// Fetch failed; previous contents kept.
    Stale,
}

/// Result of an add-name attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddOutcome {
    /// Person persisted and appended at `index`.
    Saved { index: usize },
    /// Gateway rejected the save; list unchanged.
    Failed,
    /// Prompt dismissed; nothing attempted.
    Cancelled,
}

/// Owns the displayed people and mediates between display events and storage.
pub struct ListController<R: PersonRepository> {
    repo: R,
    people: Vec<Person>,
    render_requested: bool,
}

impl<R: PersonRepository> ListController<R> {
    /// Creates a controller with an empty list over the given gateway.
    pub fn new(repo: R) -> Self {
        Self {
            repo,
            people: Vec::new(),
            render_requested: false,
        }
    }

    /// Replaces list state with everything the gateway holds.
    ///
    /// On failure the previous contents stay in place and are still rendered.
    pub fn on_becoming_visible(&mut self) -> RefreshOutcome {
        self.render_requested = true;
        match self.repo.fetch_all() {
            Ok(people) => {
                debug!(
                    "event=people_fetch module=list status=ok rows={}",
                    people.len()
                );
                self.people = people;
                RefreshOutcome::Refreshed {
                    rows: self.people.len(),
                }
            }
            Err(err) => {
                error!(
                    "event=people_fetch module=list status=error error_code=fetch_failed kept_rows={} error={err:?}",
                    self.people.len()
                );
                RefreshOutcome::Stale
            }
        }
    }

    /// Number of rows the display should show.
    pub fn row_count(&self) -> usize {
        self.people.len()
    }

    /// Display text of the row at `index`.
    ///
    /// # Panics
    /// - When `index >= self.row_count()`; callers must stay in range.
    pub fn row_content(&self, index: usize) -> &str {
        self.people[index].name.as_str()
    }

    /// Current in-memory list.
    pub fn rows(&self) -> &[Person] {
        &self.people
    }

    /// Opens the add-name prompt and saves the entered text on `Save`.
    ///
    /// A missing text value is saved as an empty name.
    pub fn request_add_name(&mut self, prompt: &mut impl NamePrompt) -> AddOutcome {
        match prompt.ask(ADD_NAME_TITLE, ADD_NAME_MESSAGE) {
            PromptResponse::Cancel => {
                debug!("event=add_name module=list status=cancelled");
                AddOutcome::Cancelled
            }
            PromptResponse::Save(text) => self.save_name(text.unwrap_or_default()),
        }
    }

    /// Persists a new person and appends it once the save is confirmed.
    pub fn save_name(&mut self, text: impl Into<String>) -> AddOutcome {
        let text = text.into();
        match self.repo.create_and_save(&text) {
            Ok(person) => {
                self.people.push(person);
                self.render_requested = true;
                let index = self.people.len() - 1;
                info!("event=person_save module=list status=ok index={index}");
                AddOutcome::Saved { index }
            }
            Err(err) => {
                error!(
                    "event=person_save module=list status=error error_code=save_failed name_chars={} error={err:?}",
                    text.chars().count()
                );
                AddOutcome::Failed
            }
        }
    }

    /// Returns whether a re-render was requested since the last call, and clears it.
    pub fn take_render_request(&mut self) -> bool {
        std::mem::take(&mut self.render_requested)
    }

    /// Hands the gateway back to the caller.
    pub fn into_repository(self) -> R {
        self.repo
    }
}

#[cfg(test)]
mod tests {
    use super::{AddOutcome, ListController, PromptResponse, RefreshOutcome, ADD_NAME_TITLE};
    use crate::model::person::Person;
    use crate::repo::person_repo::{PersonRepository, RepoError, RepoResult};
    use std::cell::RefCell;

    #[derive(Default)]
    struct MemoryRepository {
        people: RefCell<Vec<Person>>,
    }

    impl PersonRepository for MemoryRepository {
        fn fetch_all(&self) -> RepoResult<Vec<Person>> {
            Ok(self.people.borrow().clone())
        }

        fn create_and_save(&self, name: &str) -> RepoResult<Person> {
            let person = Person::new(name);
            self.people.borrow_mut().push(person.clone());
            Ok(person)
        }
    }

    struct BrokenRepository;

    impl PersonRepository for BrokenRepository {
        fn fetch_all(&self) -> RepoResult<Vec<Person>> {
            Err(RepoError::InvalidData("store unavailable".to_string()))
        }

        fn create_and_save(&self, _name: &str) -> RepoResult<Person> {
            Err(RepoError::InvalidData("disk full".to_string()))
        }
    }

    #[test]
    fn new_controller_starts_empty_without_render_request() {
        let mut controller = ListController::new(MemoryRepository::default());
        assert_eq!(controller.row_count(), 0);
        assert!(!controller.take_render_request());
    }

    #[test]
    fn cancel_leaves_state_untouched() {
        let mut controller = ListController::new(MemoryRepository::default());
        let mut prompt = |title: &str, _message: &str| {
            assert_eq!(title, ADD_NAME_TITLE);
            PromptResponse::Cancel
        };

        assert_eq!(controller.request_add_name(&mut prompt), AddOutcome::Cancelled);
        assert_eq!(controller.row_count(), 0);
        assert!(!controller.take_render_request());
    }

    #[test]
    fn absent_text_is_saved_as_empty_name() {
        let mut controller = ListController::new(MemoryRepository::default());
        let mut prompt = |_: &str, _: &str| PromptResponse::Save(None);

        assert_eq!(
            controller.request_add_name(&mut prompt),
            AddOutcome::Saved { index: 0 }
        );
        assert_eq!(controller.row_content(0), "");
    }

    #[test]
    fn render_request_is_consumed_once() {
        let mut controller = ListController::new(MemoryRepository::default());
        controller.save_name("Ann");

        assert!(controller.take_render_request());
        assert!(!controller.take_render_request());
    }

    #[test]
    fn broken_gateway_reports_outcomes_without_mutation() {
        let mut controller = ListController::new(BrokenRepository);

        assert_eq!(controller.on_becoming_visible(), RefreshOutcome::Stale);
        assert_eq!(controller.save_name("Dave"), AddOutcome::Failed);
        assert_eq!(controller.row_count(), 0);
    }

    #[test]
    #[should_panic]
    fn row_content_out_of_range_panics() {
        let controller = ListController::new(MemoryRepository::default());
        let _ = controller.row_content(0);
    }
}
