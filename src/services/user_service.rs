use bcrypt::{hash, DEFAULT_COST};
use sqlx::{PgExecutor, PgPool};
use tracing::info;

use crate::dtos::user::{RegisterUserRequest, UpdateUserRequest, UserListParams, UserResponse};
use crate::error::AppError;
use crate::middleware::auth::AuthContext;
use crate::models::user::{User, UserRole};
use crate::policy;
use crate::repositories::{category_repository, user_repository};
use crate::utils;

const ENTITY_TYPE: &str = "User";

pub async fn get_users(
    pool: &PgPool,
    auth: &AuthContext,
    params: UserListParams,
) -> Result<Vec<UserResponse>, AppError> {
    // Listing accounts is never an ownership-scoped query
    if !auth.role.is_admin() {
        return Err(AppError::forbidden("Forbidden"));
    }

    let is_active = utils::str_to_bool_or_none(params.is_active.as_deref())?;

    let users = user_repository::list_users(
        pool,
        params.first_name.as_deref(),
        params.last_name.as_deref(),
        is_active,
    )
    .await?;

    Ok(users.into_iter().map(UserResponse::from).collect())
}

pub async fn get_user_by_id(
    pool: &PgPool,
    auth: &AuthContext,
    user_id: i64,
) -> Result<UserResponse, AppError> {
    if !policy::can_access(auth, user_id) {
        return Err(AppError::forbidden("Forbidden"));
    }

    let user = get_user_entity(pool, user_id)
        .await
        .map_err(|e| policy::mask_not_found(e, auth))?;

    Ok(UserResponse::from(user))
}

pub async fn get_user_by_email(
    pool: &PgPool,
    auth: &AuthContext,
    email: &str,
) -> Result<UserResponse, AppError> {
    let user = user_repository::get_user_by_email(pool, email)
        .await?
        .ok_or_else(|| AppError::not_found(format!("{ENTITY_TYPE} not found")))
        .map_err(|e| policy::mask_not_found(e, auth))?;

    if !policy::can_access(auth, user.id) {
        return Err(AppError::forbidden("Forbidden"));
    }

    Ok(UserResponse::from(user))
}

/// Public registration: no requester. The user row and their "Default"
/// category land in the same transaction.
pub async fn create_user(
    pool: &PgPool,
    payload: RegisterUserRequest,
) -> Result<UserResponse, AppError> {
    validate_person_name(&payload.first_name, "First name")?;
    validate_person_name(&payload.last_name, "Last name")?;
    validate_email(&payload.email)?;
    if payload.password.len() < 6 {
        return Err(AppError::validation("Password too short"));
    }

    // The payload's role is honored so the first admin can be bootstrapped
    // without a separate promotion path; everyone else defaults to USER.
    let role = match payload.role.as_deref() {
        None => UserRole::User,
        Some(value) => UserRole::parse(value).ok_or_else(|| AppError::validation("Invalid role"))?,
    };

    let password_hash = hash(&payload.password, DEFAULT_COST)
        .map_err(|e| AppError::internal(format!("Hash error: {e}")))?;

    let mut tx = pool.begin().await?;

    let user = user_repository::insert_user(
        &mut *tx,
        payload.first_name.trim(),
        payload.last_name.trim(),
        payload.email.trim(),
        &password_hash,
        role.as_str(),
    )
    .await?;

    category_repository::create_default_category_for_user(&mut *tx, user.id).await?;

    tx.commit().await?;

    info!(user_id = user.id, "User registered");

    Ok(UserResponse::from(user))
}

pub async fn update_user(
    pool: &PgPool,
    auth: &AuthContext,
    user_id: i64,
    updates: UpdateUserRequest,
) -> Result<UserResponse, AppError> {
    if !policy::can_access(auth, user_id) {
        return Err(AppError::forbidden("Forbidden"));
    }

    if let Some(first_name) = &updates.first_name {
        validate_person_name(first_name, "First name")?;
    }
    if let Some(last_name) = &updates.last_name {
        validate_person_name(last_name, "Last name")?;
    }
    if let Some(email) = &updates.email {
        validate_email(email)?;
    }

    let mut tx = pool.begin().await?;

    let mut user = get_user_entity(&mut *tx, user_id)
        .await
        .map_err(|e| policy::mask_not_found(e, auth))?;

    apply_user_updates(&mut user, &updates);

    let updated = user_repository::update_user(&mut *tx, &user).await?;

    tx.commit().await?;

    Ok(UserResponse::from(updated))
}

pub async fn delete_user(
    pool: &PgPool,
    auth: &AuthContext,
    user_id: i64,
) -> Result<(), AppError> {
    if !policy::can_access(auth, user_id) {
        return Err(AppError::forbidden("Forbidden"));
    }

    let mut tx = pool.begin().await?;

    let user = get_user_entity(&mut *tx, user_id)
        .await
        .map_err(|e| policy::mask_not_found(e, auth))?;

    user_repository::delete_user(&mut *tx, user.id).await?;

    tx.commit().await?;

    info!(user_id, "User deleted");

    Ok(())
}

async fn get_user_entity(
    executor: impl PgExecutor<'_>,
    user_id: i64,
) -> Result<User, AppError> {
    user_repository::get_user_by_id(executor, user_id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("{ENTITY_TYPE} not found")))
}

/// Only fields present in the payload overwrite; absent fields are left
/// untouched.
fn apply_user_updates(user: &mut User, updates: &UpdateUserRequest) {
    if let Some(first_name) = &updates.first_name {
        user.first_name = first_name.clone();
    }
    if let Some(last_name) = &updates.last_name {
        user.last_name = last_name.clone();
    }
    if let Some(email) = &updates.email {
        user.email = email.clone();
    }
    if let Some(is_active) = updates.is_active {
        user.is_active = is_active;
    }
}

fn validate_person_name(value: &str, field: &str) -> Result<(), AppError> {
    let trimmed = value.trim();
    if trimmed.is_empty() || trimmed.len() > 50 {
        return Err(AppError::validation(format!("{field} must be 1-50 characters")));
    }
    Ok(())
}

fn validate_email(value: &str) -> Result<(), AppError> {
    let trimmed = value.trim();
    if trimmed.is_empty() || trimmed.len() > 128 || !trimmed.contains('@') {
        return Err(AppError::validation("Invalid email address"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::get_utc_time;

    fn existing_user() -> User {
        let now = get_utc_time();
        User {
            id: 1,
            first_name: "John".to_string(),
            last_name: "Doe".to_string(),
            email: "test@email.com".to_string(),
            password_hash: "$2b$12$hash".to_string(),
            is_active: true,
            role: "USER".to_string(),
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn partial_update_overwrites_only_present_fields() {
        let mut user = existing_user();
        let updates = UpdateUserRequest {
            first_name: Some("Jane".to_string()),
            last_name: None,
            email: None,
            is_active: None,
        };

        apply_user_updates(&mut user, &updates);

        assert_eq!(user.first_name, "Jane");
        assert_eq!(user.last_name, "Doe");
        assert_eq!(user.email, "test@email.com");
        assert!(user.is_active);
    }

    #[test]
    fn empty_update_changes_nothing() {
        let mut user = existing_user();
        let updates = UpdateUserRequest {
            first_name: None,
            last_name: None,
            email: None,
            is_active: None,
        };

        apply_user_updates(&mut user, &updates);

        assert_eq!(user.first_name, "John");
        assert_eq!(user.last_name, "Doe");
        assert_eq!(user.email, "test@email.com");
        assert!(user.is_active);
    }

    #[test]
    fn update_can_deactivate_user() {
        let mut user = existing_user();
        let updates = UpdateUserRequest {
            first_name: None,
            last_name: None,
            email: None,
            is_active: Some(false),
        };

        apply_user_updates(&mut user, &updates);

        assert!(!user.is_active);
    }

    #[test]
    fn person_name_validation_bounds() {
        assert!(validate_person_name("John", "First name").is_ok());
        assert!(validate_person_name("", "First name").is_err());
        assert!(validate_person_name("   ", "First name").is_err());
        assert!(validate_person_name(&"x".repeat(51), "First name").is_err());
    }

    #[test]
    fn email_validation_requires_at_sign() {
        assert!(validate_email("test@email.com").is_ok());
        assert!(validate_email("not-an-email").is_err());
        assert!(validate_email("").is_err());
    }
}
