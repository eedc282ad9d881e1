use sqlx::{PgExecutor, Postgres, QueryBuilder};

use crate::error::AppError;
use crate::models::user::User;

use super::map_constraint_violation;

pub async fn list_users(
    executor: impl PgExecutor<'_>,
    first_name: Option<&str>,
    last_name: Option<&str>,
    is_active: Option<bool>,
) -> Result<Vec<User>, AppError> {
    let mut query = QueryBuilder::<Postgres>::new(
        "SELECT id, first_name, last_name, email, password_hash, is_active, role, created_at, updated_at
         FROM users WHERE TRUE",
    );
    if let Some(first_name) = first_name {
        query.push(" AND first_name ILIKE ");
        query.push_bind(format!("%{first_name}%"));
    }
    if let Some(last_name) = last_name {
        query.push(" AND last_name ILIKE ");
        query.push_bind(format!("%{last_name}%"));
    }
    if let Some(is_active) = is_active {
        query.push(" AND is_active = ");
        query.push_bind(is_active);
    }
    query.push(" ORDER BY id");

    Ok(query.build_query_as::<User>().fetch_all(executor).await?)
}

pub async fn get_user_by_id(
    executor: impl PgExecutor<'_>,
    user_id: i64,
) -> Result<Option<User>, AppError> {
    let user = sqlx::query_as::<_, User>(
        "SELECT id, first_name, last_name, email, password_hash, is_active, role, created_at, updated_at
         FROM users WHERE id = $1",
    )
    .bind(user_id)
    .fetch_optional(executor)
    .await?;

    Ok(user)
}

pub async fn get_user_by_email(
    executor: impl PgExecutor<'_>,
    email: &str,
) -> Result<Option<User>, AppError> {
    let user = sqlx::query_as::<_, User>(
        "SELECT id, first_name, last_name, email, password_hash, is_active, role, created_at, updated_at
         FROM users WHERE LOWER(email) = LOWER($1)",
    )
    .bind(email)
    .fetch_optional(executor)
    .await?;

    Ok(user)
}

pub async fn insert_user(
    executor: impl PgExecutor<'_>,
    first_name: &str,
    last_name: &str,
    email: &str,
    password_hash: &str,
    role: &str,
) -> Result<User, AppError> {
    sqlx::query_as::<_, User>(
        "INSERT INTO users (first_name, last_name, email, password_hash, role)
         VALUES ($1, $2, $3, $4, $5)
         RETURNING id, first_name, last_name, email, password_hash, is_active, role, created_at, updated_at",
    )
    .bind(first_name)
    .bind(last_name)
    .bind(email)
    .bind(password_hash)
    .bind(role)
    .fetch_one(executor)
    .await
    .map_err(|e| map_constraint_violation(e, "User cannot be added to the database"))
}

pub async fn update_user(
    executor: impl PgExecutor<'_>,
    user: &User,
) -> Result<User, AppError> {
    sqlx::query_as::<_, User>(
        "UPDATE users
         SET first_name = $2, last_name = $3, email = $4, is_active = $5, updated_at = NOW()
         WHERE id = $1
         RETURNING id, first_name, last_name, email, password_hash, is_active, role, created_at, updated_at",
    )
    .bind(user.id)
    .bind(&user.first_name)
    .bind(&user.last_name)
    .bind(&user.email)
    .bind(user.is_active)
    .fetch_one(executor)
    .await
    .map_err(|e| map_constraint_violation(e, "User cannot be added to the database"))
}

pub async fn delete_user(executor: impl PgExecutor<'_>, user_id: i64) -> Result<(), AppError> {
    sqlx::query("DELETE FROM users WHERE id = $1")
        .bind(user_id)
        .execute(executor)
        .await?;

    Ok(())
}
