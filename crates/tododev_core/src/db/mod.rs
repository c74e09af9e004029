//! SQLite location, connection bootstrap and migration entry points.
//!
//! # Responsibility
//! - Turn a connection URL into concrete database file paths.
//! - Open and configure SQLite connections.
//! - Apply ordered migration scripts from disk.
//!
//! # Invariants
//! - Only the `sqlite:` scheme is accepted.
//! - No applied-migration bookkeeping is kept; every run applies every script.

use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

pub mod location;
pub mod migrations;
mod open;

pub use location::{resolve_sqlite_path, DatabaseLocation};
pub use open::open_db;

pub type DbResult<T> = Result<T, DbError>;

#[derive(Debug)]
pub enum DbError {
    /// Connection URL cannot be mapped to a SQLite file.
    Configuration(String),
    /// Filesystem operation failed.
    Io {
        action: &'static str,
        path: PathBuf,
        source: std::io::Error,
    },
    /// A migration script failed to execute.
    Script {
        file: String,
        source: rusqlite::Error,
    },
    /// A statement referenced a table that does not exist.
    Schema(rusqlite::Error),
    Sqlite(rusqlite::Error),
}

impl DbError {
    pub(crate) fn io(action: &'static str, path: &Path, source: std::io::Error) -> Self {
        Self::Io {
            action,
            path: path.to_path_buf(),
            source,
        }
    }

    /// Maps "no such table" failures to [`DbError::Schema`].
    pub(crate) fn classify(err: rusqlite::Error) -> Self {
        if is_missing_table(&err) {
            Self::Schema(err)
        } else {
            Self::Sqlite(err)
        }
    }
}

impl Display for DbError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Configuration(message) => write!(f, "configuration error: {message}"),
            Self::Io {
                action,
                path,
                source,
            } => write!(f, "failed to {action} `{}`: {source}", path.display()),
            Self::Script { file, source } => {
                write!(f, "migration `{file}` failed: {source}")
            }
            Self::Schema(err) => write!(f, "schema error: {err}"),
            Self::Sqlite(err) => write!(f, "{err}"),
        }
    }
}

impl Error for DbError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Configuration(_) => None,
            Self::Io { source, .. } => Some(source),
            Self::Script { source, .. } => Some(source),
            Self::Schema(err) => Some(err),
            Self::Sqlite(err) => Some(err),
        }
    }
}

impl From<rusqlite::Error> for DbError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}

fn is_missing_table(err: &rusqlite::Error) -> bool {
    match err {
        rusqlite::Error::SqliteFailure(_, Some(message)) => message.starts_with("no such table"),
        _ => false,
    }
}
