//! Database lifecycle workflows exposed to the CLI.
//!
//! # Responsibility
//! - Compose location resolution and the migration runner into
//!   `migrate`, `reset` and `seed`.
//! - Provide a read-only `inspect` view of the resolved setup.
//!
//! # Invariants
//! - Location is resolved fresh for every call.
//! - Each workflow uses at most one connection at a time.
//! - Errors surface immediately; nothing is retried.

mod seed;

pub use seed::{insert_seed_todos, SEED_TODOS};

use crate::config::ProjectLayout;
use crate::db::migrations::{apply_migrations, discover_migrations};
use crate::db::{open_db, DatabaseLocation, DbError, DbResult};
use crate::progress::{Progress, ProgressReporter};
use log::info;
use std::io::ErrorKind;
use std::path::PathBuf;
use std::time::Instant;

/// Result of a [`reset`] run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResetOutcome {
    /// Artifacts that existed and were deleted.
    pub removed: Vec<PathBuf>,
    /// Scripts applied by the follow-up migration.
    pub applied: usize,
}

/// Snapshot returned by [`inspect`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatabaseStatus {
    pub url: String,
    pub path: PathBuf,
    pub exists: bool,
    /// Script names in application order.
    pub migrations: Vec<String>,
}

/// Applies every migration script to the configured database.
pub fn migrate(layout: &ProjectLayout, reporter: &mut dyn ProgressReporter) -> DbResult<usize> {
    let location = DatabaseLocation::resolve(layout)?;
    migrate_at(&location, layout, reporter)
}

fn migrate_at(
    location: &DatabaseLocation,
    layout: &ProjectLayout,
    reporter: &mut dyn ProgressReporter,
) -> DbResult<usize> {
    let applied = apply_migrations(location.primary(), layout.migrations_dir(), reporter)?;
    reporter.report(Progress::MigrationsApplied { count: applied });
    Ok(applied)
}

/// Deletes the database file and its sidecars, then migrates from scratch.
///
/// # Errors
/// - [`DbError::Io`] when an existing artifact cannot be deleted.
/// - Any error from [`migrate`].
pub fn reset(
    layout: &ProjectLayout,
    reporter: &mut dyn ProgressReporter,
) -> DbResult<ResetOutcome> {
    let started_at = Instant::now();
    let location = DatabaseLocation::resolve(layout)?;

    let mut removed = Vec::new();
    for path in location.artifacts() {
        match std::fs::remove_file(&path) {
            Ok(()) => {
                reporter.report(Progress::RemovedFile { path: path.clone() });
                removed.push(path);
            }
            Err(err) if err.kind() == ErrorKind::NotFound => {}
            Err(err) => return Err(DbError::io("remove database file", &path, err)),
        }
    }
    if removed.is_empty() {
        reporter.report(Progress::NothingToRemove);
    }

    let applied = migrate_at(&location, layout, reporter)?;
    info!(
        "event=reset module=lifecycle status=ok removed={} applied={} duration_ms={}",
        removed.len(),
        applied,
        started_at.elapsed().as_millis()
    );
    Ok(ResetOutcome { removed, applied })
}

/// Inserts the fixed sample todos into the configured database.
///
/// Returns the number of rows inserted.
///
/// # Errors
/// - [`DbError::Schema`] when the `todos` table does not exist; no rows are
///   kept in that case.
pub fn seed(layout: &ProjectLayout, reporter: &mut dyn ProgressReporter) -> DbResult<usize> {
    let started_at = Instant::now();
    let location = DatabaseLocation::resolve(layout)?;

    let mut conn = open_db(location.primary())?;
    let count = insert_seed_todos(&mut conn, &SEED_TODOS)?;
    conn.close().map_err(|(_, err)| DbError::Sqlite(err))?;

    info!(
        "event=seed module=lifecycle status=ok rows={} duration_ms={}",
        count,
        started_at.elapsed().as_millis()
    );
    reporter.report(Progress::Seeded {
        count,
        path: location.primary().to_path_buf(),
    });
    Ok(count)
}

/// Reports the resolved URL, path and pending script order without writing.
pub fn inspect(layout: &ProjectLayout) -> DbResult<DatabaseStatus> {
    let location = DatabaseLocation::resolve(layout)?;
    let migrations = discover_migrations(layout.migrations_dir())?
        .iter()
        .map(|script| script.name().to_string())
        .collect();

    Ok(DatabaseStatus {
        url: location.url().to_string(),
        path: location.primary().to_path_buf(),
        exists: location.primary().is_file(),
        migrations,
    })
}
