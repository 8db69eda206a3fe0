//! `hitlist` command-line entry point.
//!
//! # Responsibility
//! - Resolve configuration from flags and environment.
//! - Open the database once at startup and close it at shutdown.
//! - Drive the list controller from a terminal surface.

mod terminal;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use hitlist_core::db::{close_db, open_db};
use hitlist_core::{
    default_log_level, init_logging, AddOutcome, ListController, PersonRepository,
    RefreshOutcome, SqlitePersonRepository,
};
use log::info;
use std::io;
use std::path::PathBuf;
use terminal::Terminal;

const DEFAULT_DB_FILE_NAME: &str = "hitlist.sqlite3";

#[derive(Debug, Parser)]
#[command(name = "hitlist", version, about = "Keep a persistent list of names")]
struct Cli {
    /// SQLite database file holding the list.
    ///
    /// Defaults to `hitlist.sqlite3` in the system temp directory, which some
    /// systems clear on reboot; pass a stable path to keep names across restarts.
    #[arg(long, env = "HITLIST_DB_PATH")]
    db: Option<PathBuf>,

    /// Absolute directory for rolling log files; logging is off when unset.
    #[arg(long, env = "HITLIST_LOG_DIR")]
    log_dir: Option<PathBuf>,

    /// trace|debug|info|warn|error; only used together with `--log-dir`.
    #[arg(long, env = "HITLIST_LOG_LEVEL", requires = "log_dir")]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print the list and exit.
    List,
    /// Save one name, then print the list.
    Add { name: String },
    /// Browse the list and add names from a prompt (default).
    Interactive,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Some(log_dir) = &cli.log_dir {
        let level = cli.log_level.as_deref().unwrap_or(default_log_level());
        init_logging(level, log_dir).context("failed to initialize logging")?;
    }

    let db_path = cli
        .db
        .clone()
        .unwrap_or_else(|| std::env::temp_dir().join(DEFAULT_DB_FILE_NAME));
    let conn = open_db(&db_path)
        .with_context(|| format!("failed to open database `{}`", db_path.display()))?;
    let command = cli.command.unwrap_or(Command::Interactive);
    let run_result = SqlitePersonRepository::try_new(&conn)
        .context("database is not ready")
        .and_then(|repo| {
            info!(
                "event=cli_start module=cli status=ok db_path={} rows={}",
                db_path.display(),
                repo.count()?
            );
            let stdin = io::stdin();
            let terminal = Terminal::new(stdin.lock(), io::stdout());
            run(command, ListController::new(repo), terminal)
        });

    close_db(conn).context("failed to close database")?;
    run_result
}

fn run<P, R, W>(
    command: Command,
    mut controller: ListController<P>,
    mut terminal: Terminal<R, W>,
) -> Result<()>
where
    P: PersonRepository,
    R: io::BufRead,
    W: io::Write,
{
    match command {
        Command::List => {
            let refreshed = terminal.refresh(&mut controller)?;
            terminal.render(&controller)?;
            if refreshed == RefreshOutcome::Stale {
                anyhow::bail!("the stored names could not be loaded");
            }
        }
        Command::Add { name } => {
            let refreshed = terminal.refresh(&mut controller)?;
            let outcome = controller.save_name(name);
            terminal.report(outcome)?;
            if outcome == AddOutcome::Failed {
                anyhow::bail!("the name was not saved");
            }
            terminal.render(&controller)?;
            if refreshed == RefreshOutcome::Stale {
                anyhow::bail!("the name was saved but the stored names could not be loaded");
            }
        }
        Command::Interactive => terminal.run_interactive(&mut controller)?,
    }
    Ok(())
}
