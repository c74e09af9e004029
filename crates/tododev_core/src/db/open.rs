//! Connection bootstrap for the on-disk SQLite database.
//!
//! # Responsibility
//! - Open file-backed SQLite connections (creating the file if missing).
//! - Configure connection pragmas shared by all lifecycle commands.
//!
//! # Invariants
//! - Returned connections have `foreign_keys=ON`.
//! - Opening never runs migrations; callers decide what to apply.

use super::DbResult;
use log::{error, info};
use rusqlite::Connection;
use std::path::Path;
use std::time::{Duration, Instant};

const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Opens a SQLite database file.
///
/// # Side effects
/// - Creates the database file when it does not exist.
/// - Emits `db_open` logging events with duration and status.
pub fn open_db(path: impl AsRef<Path>) -> DbResult<Connection> {
    let path = path.as_ref();
    let started_at = Instant::now();
    info!(
        "event=db_open module=db status=start path={}",
        path.display()
    );

    let conn = match Connection::open(path) {
        Ok(conn) => conn,
        Err(err) => {
            error!(
                "event=db_open module=db status=error duration_ms={} error_code=db_open_failed error={}",
                started_at.elapsed().as_millis(),
                err
            );
            return Err(err.into());
        }
    };

    match bootstrap_connection(&conn) {
        Ok(()) => {
            info!(
                "event=db_open module=db status=ok duration_ms={}",
                started_at.elapsed().as_millis()
            );
            Ok(conn)
        }
        Err(err) => {
            error!(
                "event=db_open module=db status=error duration_ms={} error_code=db_bootstrap_failed error={}",
                started_at.elapsed().as_millis(),
                err
            );
            Err(err)
        }
    }
}

fn bootstrap_connection(conn: &Connection) -> DbResult<()> {
    conn.execute_batch("PRAGMA foreign_keys = ON;")?;
    conn.busy_timeout(BUSY_TIMEOUT)?;
    Ok(())
}
