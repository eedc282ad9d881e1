use axum::extract::{Extension, Path, Query, State};
use axum::http::StatusCode;
use axum::Json;

use crate::dtos::user::{RegisterUserRequest, UpdateUserRequest, UserListParams, UserResponse};
use crate::error::AppError;
use crate::middleware::auth::AuthContext;
use crate::services::user_service;
use crate::state::AppState;

// POST /users/register - public registration
pub async fn register_user(
    State(AppState { db_pool }): State<AppState>,
    Json(payload): Json<RegisterUserRequest>,
) -> Result<(StatusCode, Json<UserResponse>), AppError> {
    let user = user_service::create_user(&db_pool, payload).await?;

    Ok((StatusCode::CREATED, Json(user)))
}

// GET /users - admin-only listing
pub async fn get_users(
    State(AppState { db_pool }): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Query(params): Query<UserListParams>,
) -> Result<Json<Vec<UserResponse>>, AppError> {
    let users = user_service::get_users(&db_pool, &auth, params).await?;

    Ok(Json(users))
}

// GET /users/id/{user_id}
pub async fn get_user_by_id(
    State(AppState { db_pool }): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(user_id): Path<i64>,
) -> Result<Json<UserResponse>, AppError> {
    let user = user_service::get_user_by_id(&db_pool, &auth, user_id).await?;

    Ok(Json(user))
}

// GET /users/email/{email}
pub async fn get_user_by_email(
    State(AppState { db_pool }): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(email): Path<String>,
) -> Result<Json<UserResponse>, AppError> {
    let user = user_service::get_user_by_email(&db_pool, &auth, &email).await?;

    Ok(Json(user))
}

// PUT /users/{user_id}
pub async fn update_user(
    State(AppState { db_pool }): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(user_id): Path<i64>,
    Json(payload): Json<UpdateUserRequest>,
) -> Result<Json<UserResponse>, AppError> {
    let user = user_service::update_user(&db_pool, &auth, user_id, payload).await?;

    Ok(Json(user))
}

// DELETE /users/{user_id}
pub async fn delete_user(
    State(AppState { db_pool }): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(user_id): Path<i64>,
) -> Result<StatusCode, AppError> {
    user_service::delete_user(&db_pool, &auth, user_id).await?;

    Ok(StatusCode::NO_CONTENT)
}
