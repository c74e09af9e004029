//! On-disk SQL migration discovery and executor.
//!
//! # Responsibility
//! - Discover `*.sql` scripts in the migrations directory.
//! - Apply every discovered script in file-name order on one connection.
//!
//! # Invariants
//! - Ordering is byte-wise file-name order only; callers zero-pad prefixes.
//! - Every script is applied on every run; nothing records prior runs.
//! - Statements run with the engine's default transaction behavior; a failure
//!   stops the sequence and leaves earlier statements in place.
//! - An open transaction is committed once, after the last script.
//! - The connection is released on every exit path.

use crate::db::{open_db, DbError, DbResult};
use crate::progress::{Progress, ProgressReporter};
use log::{debug, error, info};
use rusqlite::Connection;
use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use std::time::Instant;

const SCRIPT_EXTENSION: &str = "sql";

/// A discovered migration file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MigrationScript {
    name: String,
    path: PathBuf,
}

impl MigrationScript {
    /// File name, used as the ordering key.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Reads the full script text.
    pub fn read(&self) -> DbResult<String> {
        std::fs::read_to_string(&self.path)
            .map_err(|err| DbError::io("read migration script", &self.path, err))
    }
}

/// Lists `.sql` files in `dir`, sorted by file name.
///
/// Directories and files with other extensions are skipped.
///
/// # Errors
/// - [`DbError::Io`] when `dir` cannot be listed.
pub fn discover_migrations(dir: &Path) -> DbResult<Vec<MigrationScript>> {
    let read_error = |err: std::io::Error| DbError::io("read migrations directory", dir, err);
    let mut scripts = Vec::new();

    for entry in std::fs::read_dir(dir).map_err(read_error)? {
        let path = entry.map_err(read_error)?.path();
        if path.extension() != Some(OsStr::new(SCRIPT_EXTENSION)) || !path.is_file() {
            continue;
        }
        let Some(name) = path.file_name() else {
            continue;
        };
        scripts.push(MigrationScript {
            name: name.to_string_lossy().into_owned(),
            path,
        });
    }

    scripts.sort_by(|left, right| left.name.cmp(&right.name));
    Ok(scripts)
}

/// Applies every script in `migrations_dir` to the database at `db_path`.
///
/// Returns the number of scripts applied. The parent directory of `db_path`
/// is created first; the database file itself is created by the engine.
///
/// # Errors
/// - [`DbError::Io`] when the parent directory, the migrations directory or a
///   script cannot be accessed.
/// - [`DbError::Script`] when a script fails; remaining scripts are skipped
///   and no final commit is issued.
pub fn apply_migrations(
    db_path: &Path,
    migrations_dir: &Path,
    reporter: &mut dyn ProgressReporter,
) -> DbResult<usize> {
    if let Some(parent) = db_path.parent() {
        std::fs::create_dir_all(parent)
            .map_err(|err| DbError::io("create database directory", parent, err))?;
    }

    let conn = open_db(db_path)?;
    let scripts = discover_migrations(migrations_dir)?;
    if scripts.is_empty() {
        info!(
            "event=migrate module=db status=skip reason=no_scripts dir={}",
            migrations_dir.display()
        );
        reporter.report(Progress::NoMigrationsFound {
            dir: migrations_dir.to_path_buf(),
        });
        return Ok(0);
    }

    let applied = run_scripts(&conn, &scripts, reporter)?;
    conn.close().map_err(|(_, err)| DbError::Sqlite(err))?;
    Ok(applied)
}

/// Executes `scripts` in order on `conn`.
///
/// Each script may hold several statements, including its own
/// `BEGIN`/`COMMIT`; all of them are executed.
pub fn run_scripts(
    conn: &Connection,
    scripts: &[MigrationScript],
    reporter: &mut dyn ProgressReporter,
) -> DbResult<usize> {
    let started_at = Instant::now();

    for script in scripts {
        reporter.report(Progress::ApplyingMigration {
            name: script.name.clone(),
        });
        debug!(
            "event=migration_apply module=db status=start file={}",
            script.name
        );
        let sql = script.read()?;
        if let Err(err) = conn.execute_batch(&sql) {
            error!(
                "event=migration_apply module=db status=error file={} duration_ms={} error={}",
                script.name,
                started_at.elapsed().as_millis(),
                err
            );
            return Err(DbError::Script {
                file: script.name.clone(),
                source: err,
            });
        }
    }

    if !conn.is_autocommit() {
        conn.execute_batch("COMMIT;")?;
    }
    info!(
        "event=migrate module=db status=ok applied={} duration_ms={}",
        scripts.len(),
        started_at.elapsed().as_millis()
    );
    Ok(scripts.len())
}

#[cfg(test)]
mod tests {
    use super::discover_migrations;
    use std::fs;

    #[test]
    fn discovery_sorts_lexically_not_numerically() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["10_late.sql", "2_early.sql", "01_first.sql"] {
            fs::write(dir.path().join(name), "SELECT 1;").unwrap();
        }

        let names: Vec<String> = discover_migrations(dir.path())
            .unwrap()
            .iter()
            .map(|script| script.name().to_string())
            .collect();
        assert_eq!(names, vec!["01_first.sql", "10_late.sql", "2_early.sql"]);
    }

    #[test]
    fn discovery_skips_directories_named_like_scripts() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join("archive.sql")).unwrap();
        fs::write(dir.path().join("001_init.sql"), "SELECT 1;").unwrap();

        let scripts = discover_migrations(dir.path()).unwrap();
        assert_eq!(scripts.len(), 1);
        assert_eq!(scripts[0].name(), "001_init.sql");
    }
}
