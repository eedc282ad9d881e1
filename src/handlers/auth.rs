use axum::{extract::State, Json};

use crate::auth::jwt::TOKEN_TTL_SECONDS;
use crate::dtos::user::{LoginRequest, LoginResponse};
use crate::error::AppError;
use crate::services::auth_service;
use crate::state::AppState;

pub async fn login(
    State(AppState { db_pool }): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, AppError> {
    let token = auth_service::login(
        &db_pool,
        payload.email.as_deref(),
        payload.password.as_deref(),
    )
    .await?;

    Ok(Json(LoginResponse {
        access_token: token,
        token_type: "Bearer",
        expires_in_seconds: TOKEN_TTL_SECONDS,
    }))
}
