//! Line-oriented terminal surface for the list.
//!
//! Renders rows, reads commands and implements the add-name prompt on top
//! of any `BufRead`/`Write` pair.

use hitlist_core::{
    AddOutcome, ListController, NamePrompt, PersonRepository, PromptResponse, RefreshOutcome,
    LIST_TITLE,
};
use std::io::{self, BufRead, Write};

const HELP_LINE: &str = "[a] add name  [enter] refresh  [q] quit";
pub const STALE_NOTICE: &str = "! could not load the list; showing last known names";
pub const SAVE_FAILED_NOTICE: &str = "! could not save the name";

pub struct Terminal<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Terminal<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Writes the title and one line per row.
    pub fn render<P: PersonRepository>(
        &mut self,
        controller: &ListController<P>,
    ) -> io::Result<()> {
        writeln!(self.output, "{LIST_TITLE}")?;
        if controller.row_count() == 0 {
            writeln!(self.output, "  (empty)")?;
        }
        for index in 0..controller.row_count() {
            writeln!(self.output, "  {}", controller.row_content(index))?;
        }
        self.output.flush()
    }

    /// Tells the user what happened to an add attempt.
    pub fn report(&mut self, outcome: AddOutcome) -> io::Result<()> {
        match outcome {
            AddOutcome::Saved { .. } | AddOutcome::Cancelled => Ok(()),
            AddOutcome::Failed => writeln!(self.output, "{SAVE_FAILED_NOTICE}"),
        }
    }

    /// Runs the become-visible / add / quit loop until `q` or end of input.
    pub fn run_interactive<P: PersonRepository>(
        &mut self,
        controller: &mut ListController<P>,
    ) -> io::Result<()> {
        self.refresh(controller)?;

        loop {
            if controller.take_render_request() {
                self.render(controller)?;
            }
            writeln!(self.output, "{HELP_LINE}")?;
            self.output.flush()?;

            let Some(line) = self.read_line()? else {
                break;
            };
            match line.trim() {
                "q" | "quit" => break,
                "a" | "add" => {
                    let outcome = controller.request_add_name(self);
                    self.report(outcome)?;
                }
                "" => {
                    self.refresh(controller)?;
                }
                other => writeln!(self.output, "unknown command `{other}`")?,
            }
        }
        Ok(())
    }

    /// Reloads the list and warns when the stored names could not be read.
    pub fn refresh<P: PersonRepository>(
        &mut self,
        controller: &mut ListController<P>,
    ) -> io::Result<RefreshOutcome> {
        let outcome = controller.on_becoming_visible();
        if outcome == RefreshOutcome::Stale {
            writeln!(self.output, "{STALE_NOTICE}")?;
        }
        Ok(outcome)
    }

    fn read_line(&mut self) -> io::Result<Option<String>> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        let trimmed_len = line.trim_end_matches(['\n', '\r']).len();
        line.truncate(trimmed_len);
        Ok(Some(line))
    }

    fn ask_inner(&mut self, title: &str, message: &str) -> io::Result<PromptResponse> {
        writeln!(self.output, "{title}: {message}")?;
        write!(self.output, "name> ")?;
        self.output.flush()?;
        let Some(name) = self.read_line()? else {
            return Ok(PromptResponse::Cancel);
        };

        write!(self.output, "[s]ave / [c]ancel> ")?;
        self.output.flush()?;
        let response = match self.read_line()?.as_deref().map(str::trim) {
            Some("c") | Some("cancel") | None => PromptResponse::Cancel,
            Some(_) => PromptResponse::Save(Some(name)),
        };
        Ok(response)
    }
}

impl<R: BufRead, W: Write> NamePrompt for Terminal<R, W> {
    fn ask(&mut self, title: &str, message: &str) -> PromptResponse {
        match self.ask_inner(title, message) {
            Ok(response) => response,
            Err(err) => {
                log::warn!("event=prompt module=cli status=error error={err}");
                PromptResponse::Cancel
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Terminal, SAVE_FAILED_NOTICE, STALE_NOTICE};
    use hitlist_core::db::open_db_in_memory;
    use hitlist_core::{ListController, SqlitePersonRepository};
    use std::io::Cursor;

    fn run_script(script: &str, seed: &[&str]) -> (String, Vec<String>) {
        let conn = open_db_in_memory().unwrap();
        let mut controller = ListController::new(SqlitePersonRepository::try_new(&conn).unwrap());
        for name in seed {
            controller.save_name(*name);
        }

        let mut output = Vec::new();
        let mut terminal = Terminal::new(Cursor::new(script.as_bytes()), &mut output);
        terminal.run_interactive(&mut controller).unwrap();

        let names = controller
            .rows()
            .iter()
            .map(|person| person.name.clone())
            .collect();
        (String::from_utf8(output).unwrap(), names)
    }

    #[test]
    fn renders_seeded_rows_then_quits() {
        let (output, names) = run_script("q\n", &["Ann", "Bob"]);
        assert!(output.starts_with("\"The List\"\n  Ann\n  Bob\n"));
        assert_eq!(names, vec!["Ann", "Bob"]);
    }

    #[test]
    fn add_then_save_appends_row() {
        let (output, names) = run_script("a\nCarol\ns\nq\n", &[]);
        assert!(output.contains("New Name: Add a new name"));
        assert!(output.contains("  Carol\n"));
        assert_eq!(names, vec!["Carol"]);
    }

    #[test]
    fn add_then_cancel_keeps_list() {
        let (_, names) = run_script("a\nCarol\nc\nq\n", &["Ann"]);
        assert_eq!(names, vec!["Ann"]);
    }

    #[test]
    fn end_of_input_mid_prompt_cancels() {
        let (_, names) = run_script("a\nCarol\n", &[]);
        assert!(names.is_empty());
    }

    #[test]
    fn empty_list_shows_placeholder() {
        let (output, _) = run_script("", &[]);
        assert!(output.contains("(empty)"));
    }

    #[test]
    fn broken_store_shows_notices_and_keeps_rows() {
        let conn = open_db_in_memory().unwrap();
        let mut controller = ListController::new(SqlitePersonRepository::try_new(&conn).unwrap());
        controller.save_name("Ann");
        conn.execute_batch("DROP TABLE people;").unwrap();

        let mut output = Vec::new();
        let script = "a\nDave\ns\n\nq\n";
        let mut terminal = Terminal::new(Cursor::new(script.as_bytes()), &mut output);
        terminal.run_interactive(&mut controller).unwrap();

        let output = String::from_utf8(output).unwrap();
        assert_eq!(output.matches(STALE_NOTICE).count(), 2);
        assert!(output.contains(SAVE_FAILED_NOTICE));
        assert!(output.contains("  Ann\n"));
        assert!(!output.contains("  Dave\n"));
        assert_eq!(controller.row_count(), 1);
        assert_eq!(controller.row_content(0), "Ann");
    }
}
