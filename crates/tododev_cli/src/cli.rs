//! Command-line surface for `tododev`.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "tododev")]
#[command(about = "Dev utilities for the todo web app")]
#[command(version)]
pub struct Cli {
    /// Project root holding Rocket.toml and migrations/ (defaults to the current directory)
    #[arg(long, global = true, env = "TODODEV_PROJECT_ROOT")]
    pub project_root: Option<PathBuf>,

    /// Config file holding the database url (defaults to <project-root>/Rocket.toml)
    #[arg(long, global = true, env = "TODODEV_CONFIG")]
    pub config: Option<PathBuf>,

    /// Log level: trace|debug|info|warn|error
    #[arg(long, global = true, env = "TODODEV_LOG")]
    pub log_level: Option<String>,

    /// Directory for rolling log files (stderr when omitted)
    #[arg(long, global = true, env = "TODODEV_LOG_DIR")]
    pub log_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Subcommand)]
pub enum Commands {
    /// Run the app (cargo run)
    Run,
    /// Run with autoreload (cargo watch -x run)
    Watch,
    /// Run tests
    Test,
    /// Format code with rustfmt
    Fmt,
    /// Lint with clippy (deny warnings)
    Clippy,
    /// Type-check with cargo check
    Check,
    /// Apply SQL migrations to SQLite
    Migrate,
    /// Delete DB and re-apply migrations
    #[command(name = "reset-db")]
    ResetDb,
    /// Seed sample data
    Seed,
    /// Show the resolved database location and migration order
    #[command(name = "db-info")]
    DbInfo,
}
