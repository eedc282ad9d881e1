use sqlx::{PgExecutor, Postgres, QueryBuilder};

use crate::error::AppError;
use crate::models::habit_task::HabitTask;

use super::map_constraint_violation;

pub async fn list_habit_tasks(
    executor: impl PgExecutor<'_>,
    owner_id: Option<i64>,
    category_id: Option<i64>,
    name: Option<&str>,
) -> Result<Vec<HabitTask>, AppError> {
    let mut query = QueryBuilder::<Postgres>::new(
        "SELECT ht.id, ht.category_id, ht.name, ht.description, ht.created_at, ht.updated_at
         FROM habit_tasks ht
         JOIN categories c ON ht.category_id = c.id
         WHERE TRUE",
    );
    if let Some(owner_id) = owner_id {
        query.push(" AND c.user_id = ");
        query.push_bind(owner_id);
    }
    if let Some(category_id) = category_id {
        query.push(" AND ht.category_id = ");
        query.push_bind(category_id);
    }
    if let Some(name) = name {
        query.push(" AND ht.name ILIKE ");
        query.push_bind(format!("%{name}%"));
    }
    query.push(" ORDER BY ht.id");

    Ok(query.build_query_as::<HabitTask>().fetch_all(executor).await?)
}

/// Ownership-filtered fetch; the owning user is resolved through the
/// parent category.
pub async fn get_habit_task_by_id(
    executor: impl PgExecutor<'_>,
    habit_task_id: i64,
    owner_id: Option<i64>,
) -> Result<Option<HabitTask>, AppError> {
    let mut query = QueryBuilder::<Postgres>::new(
        "SELECT ht.id, ht.category_id, ht.name, ht.description, ht.created_at, ht.updated_at
         FROM habit_tasks ht
         JOIN categories c ON ht.category_id = c.id
         WHERE ht.id = ",
    );
    query.push_bind(habit_task_id);
    if let Some(owner_id) = owner_id {
        query.push(" AND c.user_id = ");
        query.push_bind(owner_id);
    }

    Ok(query
        .build_query_as::<HabitTask>()
        .fetch_optional(executor)
        .await?)
}

pub async fn insert_habit_task(
    executor: impl PgExecutor<'_>,
    category_id: i64,
    name: &str,
    description: Option<&str>,
) -> Result<HabitTask, AppError> {
    sqlx::query_as::<_, HabitTask>(
        "INSERT INTO habit_tasks (category_id, name, description)
         VALUES ($1, $2, $3)
         RETURNING id, category_id, name, description, created_at, updated_at",
    )
    .bind(category_id)
    .bind(name)
    .bind(description)
    .fetch_one(executor)
    .await
    .map_err(|e| map_constraint_violation(e, "Habit Task cannot be added to the database"))
}

pub async fn update_habit_task(
    executor: impl PgExecutor<'_>,
    habit_task: &HabitTask,
) -> Result<HabitTask, AppError> {
    sqlx::query_as::<_, HabitTask>(
        "UPDATE habit_tasks
         SET category_id = $2, name = $3, description = $4, updated_at = NOW()
         WHERE id = $1
         RETURNING id, category_id, name, description, created_at, updated_at",
    )
    .bind(habit_task.id)
    .bind(habit_task.category_id)
    .bind(&habit_task.name)
    .bind(&habit_task.description)
    .fetch_one(executor)
    .await
    .map_err(|e| map_constraint_violation(e, "Habit Task cannot be added to the database"))
}

pub async fn delete_habit_task(
    executor: impl PgExecutor<'_>,
    habit_task_id: i64,
) -> Result<(), AppError> {
    sqlx::query("DELETE FROM habit_tasks WHERE id = $1")
        .bind(habit_task_id)
        .execute(executor)
        .await?;

    Ok(())
}
