use sqlx::{PgExecutor, Postgres, QueryBuilder};

use crate::error::AppError;
use crate::models::category::Category;

use super::map_constraint_violation;

/// Name given to the category created alongside every new user.
pub const DEFAULT_CATEGORY_NAME: &str = "Default";

pub async fn list_categories(
    executor: impl PgExecutor<'_>,
    owner_id: Option<i64>,
    name: Option<&str>,
) -> Result<Vec<Category>, AppError> {
    let mut query = QueryBuilder::<Postgres>::new(
        "SELECT id, user_id, name, description, created_at, updated_at
         FROM categories WHERE TRUE",
    );
    if let Some(owner_id) = owner_id {
        query.push(" AND user_id = ");
        query.push_bind(owner_id);
    }
    if let Some(name) = name {
        query.push(" AND name ILIKE ");
        query.push_bind(format!("%{name}%"));
    }
    query.push(" ORDER BY id");

    Ok(query.build_query_as::<Category>().fetch_all(executor).await?)
}

/// Ownership-filtered fetch: `owner_id = None` means no restriction.
pub async fn get_category_by_id(
    executor: impl PgExecutor<'_>,
    category_id: i64,
    owner_id: Option<i64>,
) -> Result<Option<Category>, AppError> {
    let mut query = QueryBuilder::<Postgres>::new(
        "SELECT id, user_id, name, description, created_at, updated_at
         FROM categories WHERE id = ",
    );
    query.push_bind(category_id);
    if let Some(owner_id) = owner_id {
        query.push(" AND user_id = ");
        query.push_bind(owner_id);
    }

    Ok(query
        .build_query_as::<Category>()
        .fetch_optional(executor)
        .await?)
}

pub async fn insert_category(
    executor: impl PgExecutor<'_>,
    user_id: i64,
    name: &str,
    description: Option<&str>,
) -> Result<Category, AppError> {
    sqlx::query_as::<_, Category>(
        "INSERT INTO categories (user_id, name, description)
         VALUES ($1, $2, $3)
         RETURNING id, user_id, name, description, created_at, updated_at",
    )
    .bind(user_id)
    .bind(name)
    .bind(description)
    .fetch_one(executor)
    .await
    .map_err(|e| map_constraint_violation(e, "Category cannot be added to the database"))
}

pub async fn create_default_category_for_user(
    executor: impl PgExecutor<'_>,
    user_id: i64,
) -> Result<Category, AppError> {
    insert_category(executor, user_id, DEFAULT_CATEGORY_NAME, None).await
}

pub async fn update_category(
    executor: impl PgExecutor<'_>,
    category: &Category,
) -> Result<Category, AppError> {
    sqlx::query_as::<_, Category>(
        "UPDATE categories
         SET name = $2, description = $3, updated_at = NOW()
         WHERE id = $1
         RETURNING id, user_id, name, description, created_at, updated_at",
    )
    .bind(category.id)
    .bind(&category.name)
    .bind(&category.description)
    .fetch_one(executor)
    .await
    .map_err(|e| map_constraint_violation(e, "Category cannot be added to the database"))
}

pub async fn delete_category(
    executor: impl PgExecutor<'_>,
    category_id: i64,
) -> Result<(), AppError> {
    sqlx::query("DELETE FROM categories WHERE id = $1")
        .bind(category_id)
        .execute(executor)
        .await?;

    Ok(())
}
