//! Person repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Persist new people and read the full list back.
//! - Reject malformed stored rows instead of masking them.
//!
//! # Invariants
//! - `fetch_all` returns rows in insertion order (`seq ASC`).
//! - Inserts run in autocommit mode, so `Ok` means committed.

use crate::db::migrations::{current_user_version, latest_version};
use crate::db::{DbError, DbResult};
use crate::model::person::{Person, PersonId};
use rusqlite::{params, Connection, Row};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

const PERSON_SELECT_SQL: &str = "SELECT uuid, name FROM people";

pub type RepoResult<T> = Result<T, RepoError>;

/// Failure of a gateway call against the store.
#[derive(Debug)]
pub enum RepoError {
    Db(DbError),
    InvalidData(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::InvalidData(message) => write!(f, "invalid persisted person data: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::InvalidData(_) => None,
        }
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Gateway contract used by the list controller.
pub trait PersonRepository {
    /// Returns every persisted person in insertion order.
    fn fetch_all(&self) -> RepoResult<Vec<Person>>;
    /// Creates a person named `name`, commits it and returns the stored record.
    fn create_and_save(&self, name: &str) -> RepoResult<Person>;
}

impl<R: PersonRepository + ?Sized> PersonRepository for &R {
    fn fetch_all(&self) -> RepoResult<Vec<Person>> {
        (**self).fetch_all()
    }

    fn create_and_save(&self, name: &str) -> RepoResult<Person> {
        (**self).create_and_save(name)
    }
}

/// SQLite-backed person repository borrowing an open connection.
pub struct SqlitePersonRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqlitePersonRepository<'conn> {
    /// Wraps a connection whose schema is already migrated.
    ///
    /// # Errors
    /// - `DbError::SchemaNotReady` when `conn` did not come from `open_db*`.
    pub fn try_new(conn: &'conn Connection) -> DbResult<Self> {
        let db_version = current_user_version(conn)?;
        let expected = latest_version();
        if db_version != expected {
            return Err(DbError::SchemaNotReady {
                db_version,
                expected,
            });
        }
        Ok(Self { conn })
    }

    /// Number of persisted people.
    pub fn count(&self) -> RepoResult<u64> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM people;", [], |row| row.get(0))?;
        u64::try_from(count)
            .map_err(|_| RepoError::InvalidData(format!("negative row count `{count}`")))
    }
}

impl PersonRepository for SqlitePersonRepository<'_> {
    fn fetch_all(&self) -> RepoResult<Vec<Person>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{PERSON_SELECT_SQL} ORDER BY seq ASC;"))?;
        let mut rows = stmt.query([])?;
        let mut people = Vec::new();

        while let Some(row) = rows.next()? {
            people.push(parse_person_row(row)?);
        }

        Ok(people)
    }

    fn create_and_save(&self, name: &str) -> RepoResult<Person> {
        let person = Person::new(name);

        self.conn.execute(
            "INSERT INTO people (uuid, name) VALUES (?1, ?2);",
            params![person.id.to_string(), person.name.as_str()],
        )?;

        Ok(person)
    }
}

fn parse_person_row(row: &Row<'_>) -> RepoResult<Person> {
    let uuid_text: String = row.get("uuid")?;
    let id: PersonId = Uuid::parse_str(&uuid_text).map_err(|_| {
        RepoError::InvalidData(format!("invalid uuid value `{uuid_text}` in people.uuid"))
    })?;

    Person::with_id(id, row.get::<_, String>("name")?)
        .map_err(|err| RepoError::InvalidData(format!("{err} in people.uuid")))
}
