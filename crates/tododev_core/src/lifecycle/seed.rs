//! Sample todo rows for local development.

use crate::db::{DbError, DbResult};
use crate::model::todo::{SeedTodo, TodoPriority, TodoStatus};
use rusqlite::{params, Connection};

const INSERT_TODO_SQL: &str = "INSERT INTO todos (title, description, status, priority)
VALUES (?1, ?2, ?3, ?4);";

/// Rows written by `tododev seed`.
pub const SEED_TODOS: [SeedTodo; 3] = [
    SeedTodo {
        title: "Write docs",
        description: "Draft API docs and README",
        status: TodoStatus::InProgress,
        priority: TodoPriority::High,
    },
    SeedTodo {
        title: "Implement update",
        description: "Add PUT /todos/:id",
        status: TodoStatus::Pending,
        priority: TodoPriority::Medium,
    },
    SeedTodo {
        title: "Polish UI",
        description: "Tweak styles for list view",
        status: TodoStatus::Completed,
        priority: TodoPriority::Low,
    },
];

/// Inserts `todos` as one batch; either every row is committed or none.
///
/// Assumes the `todos` table exists. Schema is never created here.
pub fn insert_seed_todos(conn: &mut Connection, todos: &[SeedTodo]) -> DbResult<usize> {
    let tx = conn.transaction()?;
    {
        let mut stmt = tx.prepare(INSERT_TODO_SQL).map_err(DbError::classify)?;
        for todo in todos {
            stmt.execute(params![
                todo.title,
                todo.description,
                todo.status.as_str(),
                todo.priority.as_str(),
            ])
            .map_err(DbError::classify)?;
        }
    }
    tx.commit()?;
    Ok(todos.len())
}
