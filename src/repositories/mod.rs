pub mod category_repository;
pub mod execution_history_repository;
pub mod habit_task_repository;
pub mod user_repository;

use sqlx::Error as SqlxError;

use crate::error::AppError;

/// Maps unique (23505) and foreign-key (23503) violations to `Conflict`;
/// everything else stays a database error.
pub(crate) fn map_constraint_violation(err: SqlxError, message: &str) -> AppError {
    match err {
        SqlxError::Database(db_err)
            if matches!(db_err.code().as_deref(), Some("23505") | Some("23503")) =>
        {
            AppError::conflict(message)
        }
        other => other.into(),
    }
}
