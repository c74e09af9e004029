//! Human-facing progress signals emitted by lifecycle operations.
//!
//! Operations never print; they hand events to a [`ProgressReporter`] and the
//! caller decides where they go.

use std::fmt::{Display, Formatter};
use std::path::PathBuf;

/// One progress signal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Progress {
    /// The migrations directory holds no `.sql` files.
    NoMigrationsFound { dir: PathBuf },
    /// Emitted right before a script starts executing.
    ApplyingMigration { name: String },
    /// The migrate step finished; `count` may be zero.
    MigrationsApplied { count: usize },
    /// A database artifact was deleted during reset.
    RemovedFile { path: PathBuf },
    /// Reset found no artifacts to delete.
    NothingToRemove,
    /// Seed rows were committed.
    Seeded { count: usize, path: PathBuf },
}

impl Display for Progress {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NoMigrationsFound { dir } => {
                write!(f, "No .sql files found in {}", dir.display())
            }
            Self::ApplyingMigration { name } => write!(f, "Applying migration: {name}"),
            Self::MigrationsApplied { count } => {
                write!(f, "Migrations applied successfully ({count} scripts).")
            }
            Self::RemovedFile { path } => write!(f, "Removed {}", path.display()),
            Self::NothingToRemove => write!(f, "No existing database files to remove."),
            Self::Seeded { count, path } => {
                write!(f, "Seeded {count} todos into {}", path.display())
            }
        }
    }
}

/// Sink for [`Progress`] events.
pub trait ProgressReporter {
    fn report(&mut self, event: Progress);
}

impl<F> ProgressReporter for F
where
    F: FnMut(Progress),
{
    fn report(&mut self, event: Progress) {
        self(event)
    }
}

/// Reporter that drops every event.
#[derive(Debug, Default, Clone, Copy)]
pub struct SilentReporter;

impl ProgressReporter for SilentReporter {
    fn report(&mut self, _event: Progress) {}
}

#[cfg(test)]
mod tests {
    use super::{Progress, ProgressReporter};

    #[test]
    fn closures_collect_events() {
        let mut seen = Vec::new();
        {
            let mut reporter = |event: Progress| seen.push(event);
            reporter.report(Progress::NothingToRemove);
        }
        assert_eq!(seen, vec![Progress::NothingToRemove]);
    }

    #[test]
    fn applying_message_names_the_file() {
        let event = Progress::ApplyingMigration {
            name: "001_init.sql".to_string(),
        };
        assert_eq!(event.to_string(), "Applying migration: 001_init.sql");
    }
}
