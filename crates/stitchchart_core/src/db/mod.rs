//! Local SQLite store that backs up charts the backend refused.
//!
//! # Responsibility
//! - Hand out connections whose schema matches this binary.
//! - Report storage failures as [`DbError`].
//!
//! # Invariants
//! - `PRAGMA user_version` equals the last applied migration.
//! - A backup file is only opened inside an existing directory.

use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

pub mod migrations;
mod open;

pub use open::{open_db, open_db_in_memory};

pub type DbResult<T> = Result<T, DbError>;

#[derive(Debug)]
pub enum DbError {
    Sqlite(rusqlite::Error),
    /// Parent directory of the backup file does not exist.
    MissingDirectory(PathBuf),
    /// Store was written by a newer build with unknown backup tables.
    SchemaTooNew { found: u32, supported: u32 },
}

impl Display for DbError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sqlite(err) => write!(f, "backup store: {err}"),
            Self::MissingDirectory(dir) => {
                write!(f, "backup store directory does not exist: {}", dir.display())
            }
            Self::SchemaTooNew { found, supported } => write!(
                f,
                "backup store schema {found} is newer than this build supports ({supported})"
            ),
        }
    }
}

impl Error for DbError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Sqlite(err) => Some(err),
            _ => None,
        }
    }
}

impl From<rusqlite::Error> for DbError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}
