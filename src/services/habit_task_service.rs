use sqlx::{PgExecutor, PgPool};
use tracing::info;

use crate::dtos::habit_task::{
    CreateHabitTaskRequest, HabitTaskListParams, HabitTaskResponse, UpdateHabitTaskRequest,
};
use crate::error::AppError;
use crate::middleware::auth::AuthContext;
use crate::models::habit_task::HabitTask;
use crate::policy;
use crate::repositories::habit_task_repository;
use crate::services::category_service;
use crate::utils;

const ENTITY_TYPE: &str = "Habit Task";

pub async fn get_habit_tasks(
    pool: &PgPool,
    auth: &AuthContext,
    params: HabitTaskListParams,
) -> Result<Vec<HabitTaskResponse>, AppError> {
    let requested_owner = utils::str_to_int_or_none(params.user_id.as_deref())?;
    let category_id = utils::str_to_int_or_none(params.category_id.as_deref())?;

    let owner_id = policy::effective_owner_filter(auth, requested_owner)?;

    let habit_tasks = habit_task_repository::list_habit_tasks(
        pool,
        owner_id,
        category_id,
        params.name.as_deref(),
    )
    .await?;

    Ok(habit_tasks.into_iter().map(HabitTaskResponse::from).collect())
}

pub async fn get_habit_task_by_id(
    pool: &PgPool,
    auth: &AuthContext,
    habit_task_id: i64,
) -> Result<HabitTaskResponse, AppError> {
    let habit_task = get_habit_task_entity(pool, habit_task_id, policy::owner_scope(auth))
        .await
        .map_err(|e| policy::mask_not_found(e, auth))?;

    Ok(HabitTaskResponse::from(habit_task))
}

pub async fn create_habit_task(
    pool: &PgPool,
    auth: &AuthContext,
    payload: CreateHabitTaskRequest,
) -> Result<HabitTaskResponse, AppError> {
    validate_name(&payload.name)?;
    validate_description(payload.description.as_deref())?;

    // Parent category must exist and, for non-admins, belong to the
    // requester; the check and the insert run on one transaction.
    let mut tx = pool.begin().await?;

    category_service::get_category_entity(&mut *tx, payload.category_id, policy::owner_scope(auth))
        .await
        .map_err(|e| policy::mask_not_found(e, auth))?;

    let habit_task = habit_task_repository::insert_habit_task(
        &mut *tx,
        payload.category_id,
        payload.name.trim(),
        payload.description.as_deref(),
    )
    .await?;

    tx.commit().await?;

    Ok(HabitTaskResponse::from(habit_task))
}

pub async fn update_habit_task(
    pool: &PgPool,
    auth: &AuthContext,
    habit_task_id: i64,
    updates: UpdateHabitTaskRequest,
) -> Result<HabitTaskResponse, AppError> {
    if let Some(name) = &updates.name {
        validate_name(name)?;
    }
    validate_description(updates.description.as_deref())?;

    let mut tx = pool.begin().await?;

    let mut habit_task = get_habit_task_entity(&mut *tx, habit_task_id, policy::owner_scope(auth))
        .await
        .map_err(|e| policy::mask_not_found(e, auth))?;

    apply_habit_task_updates(&mut habit_task, &updates);

    let updated = habit_task_repository::update_habit_task(&mut *tx, &habit_task).await?;

    tx.commit().await?;

    Ok(HabitTaskResponse::from(updated))
}

pub async fn delete_habit_task(
    pool: &PgPool,
    auth: &AuthContext,
    habit_task_id: i64,
) -> Result<(), AppError> {
    let mut tx = pool.begin().await?;

    let habit_task = get_habit_task_entity(&mut *tx, habit_task_id, policy::owner_scope(auth))
        .await
        .map_err(|e| policy::mask_not_found(e, auth))?;

    habit_task_repository::delete_habit_task(&mut *tx, habit_task.id).await?;

    tx.commit().await?;

    info!(habit_task_id, "Habit task deleted");

    Ok(())
}

/// Ownership-filtered entity fetch shared with the execution history
/// service's parent check.
pub(crate) async fn get_habit_task_entity(
    executor: impl PgExecutor<'_>,
    habit_task_id: i64,
    owner_id: Option<i64>,
) -> Result<HabitTask, AppError> {
    habit_task_repository::get_habit_task_by_id(executor, habit_task_id, owner_id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("{ENTITY_TYPE} not found")))
}

fn apply_habit_task_updates(habit_task: &mut HabitTask, updates: &UpdateHabitTaskRequest) {
    if let Some(category_id) = updates.category_id {
        habit_task.category_id = category_id;
    }
    if let Some(name) = &updates.name {
        habit_task.name = name.clone();
    }
    if let Some(description) = &updates.description {
        habit_task.description = Some(description.clone());
    }
}

fn validate_name(value: &str) -> Result<(), AppError> {
    let trimmed = value.trim();
    if trimmed.is_empty() || trimmed.len() > 50 {
        return Err(AppError::validation("Name must be 1-50 characters"));
    }
    Ok(())
}

fn validate_description(value: Option<&str>) -> Result<(), AppError> {
    if let Some(description) = value {
        if description.len() > 250 {
            return Err(AppError::validation("Description must be at most 250 characters"));
        }
    }
    Ok(())
}
