use chrono::{DateTime, Utc};
use sqlx::{PgExecutor, Postgres, QueryBuilder};

use crate::error::AppError;
use crate::models::execution_history::ExecutionHistory;

use super::map_constraint_violation;

pub async fn list_execution_histories(
    executor: impl PgExecutor<'_>,
    owner_id: Option<i64>,
    habit_task_id: Option<i64>,
    start_datetime: Option<DateTime<Utc>>,
    end_datetime: Option<DateTime<Utc>>,
) -> Result<Vec<ExecutionHistory>, AppError> {
    let mut query = QueryBuilder::<Postgres>::new(
        "SELECT eh.id, eh.habit_task_id, eh.executed_at
         FROM execution_histories eh
         JOIN habit_tasks ht ON eh.habit_task_id = ht.id
         JOIN categories c ON ht.category_id = c.id
         WHERE TRUE",
    );
    if let Some(owner_id) = owner_id {
        query.push(" AND c.user_id = ");
        query.push_bind(owner_id);
    }
    if let Some(habit_task_id) = habit_task_id {
        query.push(" AND eh.habit_task_id = ");
        query.push_bind(habit_task_id);
    }
    if let Some(start_datetime) = start_datetime {
        query.push(" AND eh.executed_at >= ");
        query.push_bind(start_datetime);
    }
    if let Some(end_datetime) = end_datetime {
        query.push(" AND eh.executed_at <= ");
        query.push_bind(end_datetime);
    }
    query.push(" ORDER BY eh.id");

    Ok(query
        .build_query_as::<ExecutionHistory>()
        .fetch_all(executor)
        .await?)
}

/// Ownership-filtered fetch; the owning user is resolved through the
/// habit task's parent category.
pub async fn get_execution_history_by_id(
    executor: impl PgExecutor<'_>,
    execution_history_id: i64,
    owner_id: Option<i64>,
) -> Result<Option<ExecutionHistory>, AppError> {
    let mut query = QueryBuilder::<Postgres>::new(
        "SELECT eh.id, eh.habit_task_id, eh.executed_at
         FROM execution_histories eh
         JOIN habit_tasks ht ON eh.habit_task_id = ht.id
         JOIN categories c ON ht.category_id = c.id
         WHERE eh.id = ",
    );
    query.push_bind(execution_history_id);
    if let Some(owner_id) = owner_id {
        query.push(" AND c.user_id = ");
        query.push_bind(owner_id);
    }

    Ok(query
        .build_query_as::<ExecutionHistory>()
        .fetch_optional(executor)
        .await?)
}

pub async fn insert_execution_history(
    executor: impl PgExecutor<'_>,
    habit_task_id: i64,
    executed_at: DateTime<Utc>,
) -> Result<ExecutionHistory, AppError> {
    sqlx::query_as::<_, ExecutionHistory>(
        "INSERT INTO execution_histories (habit_task_id, executed_at)
         VALUES ($1, $2)
         RETURNING id, habit_task_id, executed_at",
    )
    .bind(habit_task_id)
    .bind(executed_at)
    .fetch_one(executor)
    .await
    .map_err(|e| map_constraint_violation(e, "Execution history cannot be added to the database"))
}

pub async fn delete_execution_history(
    executor: impl PgExecutor<'_>,
    execution_history_id: i64,
) -> Result<(), AppError> {
    sqlx::query("DELETE FROM execution_histories WHERE id = $1")
        .bind(execution_history_id)
        .execute(executor)
        .await?;

    Ok(())
}
