use axum::extract::{Extension, Path, Query, State};
use axum::http::StatusCode;
use axum::Json;

use crate::dtos::category::{
    CategoryListParams, CategoryResponse, CreateCategoryRequest, UpdateCategoryRequest,
};
use crate::error::AppError;
use crate::middleware::auth::AuthContext;
use crate::services::category_service;
use crate::state::AppState;

// GET /categories
pub async fn get_categories(
    State(AppState { db_pool }): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Query(params): Query<CategoryListParams>,
) -> Result<Json<Vec<CategoryResponse>>, AppError> {
    let categories = category_service::get_categories(&db_pool, &auth, params).await?;

    Ok(Json(categories))
}

// GET /categories/{category_id}
pub async fn get_category_by_id(
    State(AppState { db_pool }): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(category_id): Path<i64>,
) -> Result<Json<CategoryResponse>, AppError> {
    let category = category_service::get_category_by_id(&db_pool, &auth, category_id).await?;

    Ok(Json(category))
}

// POST /categories
pub async fn create_category(
    State(AppState { db_pool }): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Json(payload): Json<CreateCategoryRequest>,
) -> Result<(StatusCode, Json<CategoryResponse>), AppError> {
    let category = category_service::create_category(&db_pool, &auth, payload).await?;

    Ok((StatusCode::CREATED, Json(category)))
}

// PUT /categories/{category_id}
pub async fn update_category(
    State(AppState { db_pool }): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(category_id): Path<i64>,
    Json(payload): Json<UpdateCategoryRequest>,
) -> Result<Json<CategoryResponse>, AppError> {
    let category =
        category_service::update_category(&db_pool, &auth, category_id, payload).await?;

    Ok(Json(category))
}

// DELETE /categories/{category_id}
pub async fn delete_category(
    State(AppState { db_pool }): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(category_id): Path<i64>,
) -> Result<StatusCode, AppError> {
    category_service::delete_category(&db_pool, &auth, category_id).await?;

    Ok(StatusCode::NO_CONTENT)
}
