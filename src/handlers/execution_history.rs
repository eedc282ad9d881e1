use axum::extract::{Extension, Path, Query, State};
use axum::http::StatusCode;
use axum::Json;

use crate::dtos::execution_history::{
    CreateExecutionHistoryRequest, ExecutionHistoryListParams, ExecutionHistoryResponse,
};
use crate::error::AppError;
use crate::middleware::auth::AuthContext;
use crate::services::execution_history_service;
use crate::state::AppState;

// GET /execution_histories
pub async fn get_execution_histories(
    State(AppState { db_pool }): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Query(params): Query<ExecutionHistoryListParams>,
) -> Result<Json<Vec<ExecutionHistoryResponse>>, AppError> {
    let execution_histories =
        execution_history_service::get_execution_histories(&db_pool, &auth, params).await?;

    Ok(Json(execution_histories))
}

// GET /execution_histories/{execution_history_id}
pub async fn get_execution_history_by_id(
    State(AppState { db_pool }): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(execution_history_id): Path<i64>,
) -> Result<Json<ExecutionHistoryResponse>, AppError> {
    let execution_history = execution_history_service::get_execution_history_by_id(
        &db_pool,
        &auth,
        execution_history_id,
    )
    .await?;

    Ok(Json(execution_history))
}

// POST /execution_histories
pub async fn create_execution_history(
    State(AppState { db_pool }): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Json(payload): Json<CreateExecutionHistoryRequest>,
) -> Result<(StatusCode, Json<ExecutionHistoryResponse>), AppError> {
    let execution_history =
        execution_history_service::create_execution_history(&db_pool, &auth, payload).await?;

    Ok((StatusCode::CREATED, Json(execution_history)))
}

// DELETE /execution_histories/{execution_history_id}
pub async fn delete_execution_history(
    State(AppState { db_pool }): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(execution_history_id): Path<i64>,
) -> Result<StatusCode, AppError> {
    execution_history_service::delete_execution_history(&db_pool, &auth, execution_history_id)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}
