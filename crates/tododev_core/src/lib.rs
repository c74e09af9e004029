//! Core of the `tododev` developer tool.
//! Owns database location resolution, migrations and sample data for the
//! todo application's local SQLite database.

pub mod config;
pub mod db;
pub mod lifecycle;
pub mod logging;
pub mod model;
pub mod progress;

pub use config::{resolve_database_url, ProjectLayout, DEFAULT_DATABASE_URL};
pub use db::{resolve_sqlite_path, DatabaseLocation, DbError, DbResult};
pub use lifecycle::{inspect, migrate, reset, seed, DatabaseStatus, ResetOutcome};
pub use logging::{default_log_level, init_logging};
pub use model::todo::{SeedTodo, TodoPriority, TodoStatus};
pub use progress::{Progress, ProgressReporter, SilentReporter};

