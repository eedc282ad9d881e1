use sqlx::{PgExecutor, PgPool};
use tracing::info;

use crate::dtos::execution_history::{
    CreateExecutionHistoryRequest, ExecutionHistoryListParams, ExecutionHistoryResponse,
};
use crate::error::AppError;
use crate::middleware::auth::AuthContext;
use crate::models::execution_history::ExecutionHistory;
use crate::policy;
use crate::repositories::execution_history_repository;
use crate::services::habit_task_service;
use crate::utils;

const ENTITY_TYPE: &str = "Execution history";

pub async fn get_execution_histories(
    pool: &PgPool,
    auth: &AuthContext,
    params: ExecutionHistoryListParams,
) -> Result<Vec<ExecutionHistoryResponse>, AppError> {
    let requested_owner = utils::str_to_int_or_none(params.user_id.as_deref())?;
    let habit_task_id = utils::str_to_int_or_none(params.habit_task_id.as_deref())?;
    let start_datetime = utils::str_to_datetime_or_none(params.start_datetime.as_deref())?;
    let end_datetime = utils::str_to_datetime_or_none(params.end_datetime.as_deref())?;

    let owner_id = policy::effective_owner_filter(auth, requested_owner)?;

    let execution_histories = execution_history_repository::list_execution_histories(
        pool,
        owner_id,
        habit_task_id,
        start_datetime,
        end_datetime,
    )
    .await?;

    Ok(execution_histories
        .into_iter()
        .map(ExecutionHistoryResponse::from)
        .collect())
}

pub async fn get_execution_history_by_id(
    pool: &PgPool,
    auth: &AuthContext,
    execution_history_id: i64,
) -> Result<ExecutionHistoryResponse, AppError> {
    let execution_history =
        get_execution_history_entity(pool, execution_history_id, policy::owner_scope(auth))
            .await
            .map_err(|e| policy::mask_not_found(e, auth))?;

    Ok(ExecutionHistoryResponse::from(execution_history))
}

pub async fn create_execution_history(
    pool: &PgPool,
    auth: &AuthContext,
    payload: CreateExecutionHistoryRequest,
) -> Result<ExecutionHistoryResponse, AppError> {
    // Parent habit task must exist and, for non-admins, belong to the
    // requester; the check and the insert run on one transaction.
    let mut tx = pool.begin().await?;

    habit_task_service::get_habit_task_entity(
        &mut *tx,
        payload.habit_task_id,
        policy::owner_scope(auth),
    )
    .await
    .map_err(|e| policy::mask_not_found(e, auth))?;

    let execution_history = execution_history_repository::insert_execution_history(
        &mut *tx,
        payload.habit_task_id,
        payload.executed_at,
    )
    .await?;

    tx.commit().await?;

    Ok(ExecutionHistoryResponse::from(execution_history))
}

pub async fn delete_execution_history(
    pool: &PgPool,
    auth: &AuthContext,
    execution_history_id: i64,
) -> Result<(), AppError> {
    let mut tx = pool.begin().await?;

    let execution_history =
        get_execution_history_entity(&mut *tx, execution_history_id, policy::owner_scope(auth))
            .await
            .map_err(|e| policy::mask_not_found(e, auth))?;

    execution_history_repository::delete_execution_history(&mut *tx, execution_history.id).await?;

    tx.commit().await?;

    info!(execution_history_id, "Execution history deleted");

    Ok(())
}

async fn get_execution_history_entity(
    executor: impl PgExecutor<'_>,
    execution_history_id: i64,
    owner_id: Option<i64>,
) -> Result<ExecutionHistory, AppError> {
    execution_history_repository::get_execution_history_by_id(
        executor,
        execution_history_id,
        owner_id,
    )
    .await?
    .ok_or_else(|| AppError::not_found(format!("{ENTITY_TYPE} not found")))
}
