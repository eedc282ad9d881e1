use sqlx::{PgExecutor, PgPool};
use tracing::info;

use crate::dtos::category::{
    CategoryListParams, CategoryResponse, CreateCategoryRequest, UpdateCategoryRequest,
};
use crate::error::AppError;
use crate::middleware::auth::AuthContext;
use crate::models::category::Category;
use crate::policy;
use crate::repositories::{category_repository, user_repository};
use crate::utils;

const ENTITY_TYPE: &str = "Category";

pub async fn get_categories(
    pool: &PgPool,
    auth: &AuthContext,
    params: CategoryListParams,
) -> Result<Vec<CategoryResponse>, AppError> {
    let requested_owner = utils::str_to_int_or_none(params.user_id.as_deref())?;
    let owner_id = policy::effective_owner_filter(auth, requested_owner)?;

    let categories =
        category_repository::list_categories(pool, owner_id, params.name.as_deref()).await?;

    Ok(categories.into_iter().map(CategoryResponse::from).collect())
}

pub async fn get_category_by_id(
    pool: &PgPool,
    auth: &AuthContext,
    category_id: i64,
) -> Result<CategoryResponse, AppError> {
    let category = get_category_entity(pool, category_id, policy::owner_scope(auth))
        .await
        .map_err(|e| policy::mask_not_found(e, auth))?;

    Ok(CategoryResponse::from(category))
}

pub async fn create_category(
    pool: &PgPool,
    auth: &AuthContext,
    payload: CreateCategoryRequest,
) -> Result<CategoryResponse, AppError> {
    validate_name(&payload.name)?;
    validate_description(payload.description.as_deref())?;

    if !policy::can_access(auth, payload.user_id) {
        return Err(AppError::forbidden("Forbidden"));
    }

    // Owner check and insert see the same snapshot
    let mut tx = pool.begin().await?;

    let owner = user_repository::get_user_by_id(&mut *tx, payload.user_id)
        .await?
        .ok_or_else(|| AppError::not_found("User not found"))
        .map_err(|e| policy::mask_not_found(e, auth))?;

    let category = category_repository::insert_category(
        &mut *tx,
        owner.id,
        payload.name.trim(),
        payload.description.as_deref(),
    )
    .await?;

    tx.commit().await?;

    Ok(CategoryResponse::from(category))
}

pub async fn update_category(
    pool: &PgPool,
    auth: &AuthContext,
    category_id: i64,
    updates: UpdateCategoryRequest,
) -> Result<CategoryResponse, AppError> {
    if let Some(name) = &updates.name {
        validate_name(name)?;
    }
    validate_description(updates.description.as_deref())?;

    let mut tx = pool.begin().await?;

    let mut category = get_category_entity(&mut *tx, category_id, policy::owner_scope(auth))
        .await
        .map_err(|e| policy::mask_not_found(e, auth))?;

    apply_category_updates(&mut category, &updates);

    let updated = category_repository::update_category(&mut *tx, &category).await?;

    tx.commit().await?;

    Ok(CategoryResponse::from(updated))
}

/// Deletes the category and, through the store's cascade, all habit tasks
/// and execution histories under it.
pub async fn delete_category(
    pool: &PgPool,
    auth: &AuthContext,
    category_id: i64,
) -> Result<(), AppError> {
    let mut tx = pool.begin().await?;

    let category = get_category_entity(&mut *tx, category_id, policy::owner_scope(auth))
        .await
        .map_err(|e| policy::mask_not_found(e, auth))?;

    category_repository::delete_category(&mut *tx, category.id).await?;

    tx.commit().await?;

    info!(category_id, "Category deleted");

    Ok(())
}

/// Ownership-filtered entity fetch shared with the habit task service's
/// parent check.
pub(crate) async fn get_category_entity(
    executor: impl PgExecutor<'_>,
    category_id: i64,
    owner_id: Option<i64>,
) -> Result<Category, AppError> {
    category_repository::get_category_by_id(executor, category_id, owner_id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("{ENTITY_TYPE} not found")))
}

fn apply_category_updates(category: &mut Category, updates: &UpdateCategoryRequest) {
    if let Some(name) = &updates.name {
        category.name = name.clone();
    }
    if let Some(description) = &updates.description {
        category.description = Some(description.clone());
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::get_utc_time;

    fn existing_category() -> Category {
        let now = get_utc_time();
        Category {
            id: 1,
            user_id: 1,
            name: "Category name".to_string(),
            description: Some("Category description".to_string()),
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn partial_update_overwrites_only_present_fields() {
        let mut category = existing_category();
        let updates = UpdateCategoryRequest {
            name: Some("Changed name".to_string()),
            description: None,
        };

        apply_category_updates(&mut category, &updates);

        assert_eq!(category.name, "Changed name");
        assert_eq!(category.description.as_deref(), Some("Category description"));
        assert_eq!(category.user_id, 1);
    }

    #[test]
    fn empty_update_changes_nothing() {
        let mut category = existing_category();
        let updates = UpdateCategoryRequest {
            name: None,
            description: None,
        };

        apply_category_updates(&mut category, &updates);

        assert_eq!(category.name, "Category name");
        assert_eq!(category.description.as_deref(), Some("Category description"));
    }

    #[test]
    fn name_validation_bounds() {
        assert!(validate_name("Fitness").is_ok());
        assert!(validate_name("").is_err());
        assert!(validate_name(&"x".repeat(51)).is_err());
    }

    #[test]
    fn description_validation_bounds() {
        assert!(validate_description(None).is_ok());
        assert!(validate_description(Some("short")).is_ok());
        assert!(validate_description(Some(&"x".repeat(251))).is_err());
    }
}
