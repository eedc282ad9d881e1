use axum::extract::{Extension, Path, Query, State};
use axum::http::StatusCode;
use axum::Json;

use crate::dtos::habit_task::{
    CreateHabitTaskRequest, HabitTaskListParams, HabitTaskResponse, UpdateHabitTaskRequest,
};
use crate::error::AppError;
use crate::middleware::auth::AuthContext;
use crate::services::habit_task_service;
use crate::state::AppState;

// GET /habit_tasks
pub async fn get_habit_tasks(
    State(AppState { db_pool }): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Query(params): Query<HabitTaskListParams>,
) -> Result<Json<Vec<HabitTaskResponse>>, AppError> {
    let habit_tasks = habit_task_service::get_habit_tasks(&db_pool, &auth, params).await?;

    Ok(Json(habit_tasks))
}

// GET /habit_tasks/{habit_task_id}
pub async fn get_habit_task_by_id(
    State(AppState { db_pool }): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(habit_task_id): Path<i64>,
) -> Result<Json<HabitTaskResponse>, AppError> {
    let habit_task =
        habit_task_service::get_habit_task_by_id(&db_pool, &auth, habit_task_id).await?;

    Ok(Json(habit_task))
}

// POST /habit_tasks
pub async fn create_habit_task(
    State(AppState { db_pool }): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Json(payload): Json<CreateHabitTaskRequest>,
) -> Result<(StatusCode, Json<HabitTaskResponse>), AppError> {
    let habit_task = habit_task_service::create_habit_task(&db_pool, &auth, payload).await?;

    Ok((StatusCode::CREATED, Json(habit_task)))
}

// PUT /habit_tasks/{habit_task_id}
pub async fn update_habit_task(
    State(AppState { db_pool }): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(habit_task_id): Path<i64>,
    Json(payload): Json<UpdateHabitTaskRequest>,
) -> Result<Json<HabitTaskResponse>, AppError> {
    let habit_task =
        habit_task_service::update_habit_task(&db_pool, &auth, habit_task_id, payload).await?;

    Ok(Json(habit_task))
}

// DELETE /habit_tasks/{habit_task_id}
pub async fn delete_habit_task(
    State(AppState { db_pool }): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(habit_task_id): Path<i64>,
) -> Result<StatusCode, AppError> {
    habit_task_service::delete_habit_task(&db_pool, &auth, habit_task_id).await?;

    Ok(StatusCode::NO_CONTENT)
}
