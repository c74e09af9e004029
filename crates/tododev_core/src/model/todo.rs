//! Todo record shape used by the sample-data seeder.
//!
//! # Responsibility
//! - Mirror the `todos` table columns written by seeding.
//! - Keep status/priority storage strings in one place.
//!
//! # Invariants
//! - Status and priority are stored as lowercase snake_case text.

/// Lifecycle state stored in `todos.status`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TodoStatus {
    /// Not started yet.
    Pending,
    /// Work is underway.
    InProgress,
    /// Finished.
    Completed,
}

impl TodoStatus {
    /// Returns the storage string for this status.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::InProgress => "in_progress",
            Self::Completed => "completed",
        }
    }
}

/// Urgency stored in `todos.priority`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TodoPriority {
    Low,
    Medium,
    High,
}

impl TodoPriority {
    /// Returns the storage string for this priority.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

/// One literal row inserted by the seeder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeedTodo {
    pub title: &'static str,
    pub description: &'static str,
    pub status: TodoStatus,
    pub priority: TodoPriority,
}

#[cfg(test)]
mod tests {
    use super::{TodoPriority, TodoStatus};

    #[test]
    fn status_storage_strings_are_snake_case() {
        assert_eq!(TodoStatus::Pending.as_str(), "pending");
        assert_eq!(TodoStatus::InProgress.as_str(), "in_progress");
        assert_eq!(TodoStatus::Completed.as_str(), "completed");
    }

    #[test]
    fn priority_storage_strings_are_lowercase() {
        assert_eq!(TodoPriority::Low.as_str(), "low");
        assert_eq!(TodoPriority::Medium.as_str(), "medium");
        assert_eq!(TodoPriority::High.as_str(), "high");
    }
}
