use bcrypt::verify;
use sqlx::PgPool;
use tracing::info;

use crate::auth::jwt::sign_token;
use crate::error::AppError;
use crate::repositories::user_repository;

/// Verifies credentials and issues a signed token carrying the user's id
/// and role. A missing user and a wrong password are indistinguishable to
/// the caller.
pub async fn login(
    pool: &PgPool,
    email: Option<&str>,
    password: Option<&str>,
) -> Result<String, AppError> {
    let (email, password) = match (email, password) {
        (Some(email), Some(password)) => (email, password),
        _ => return Err(AppError::MissingCredentials),
    };

    let user = user_repository::get_user_by_email(pool, email)
        .await?
        .ok_or(AppError::InvalidCredentials)?;

    let password_ok = verify(password, &user.password_hash)
        .map_err(|e| AppError::internal(format!("Password verify error: {e}")))?;

    if !password_ok {
        return Err(AppError::InvalidCredentials);
    }

    let secret = std::env::var("JWT_SECRET")
        .map_err(|_| AppError::internal("JWT secret not configured"))?;

    let token = sign_token(user.id, &user.role, &secret)?;

    info!(user_id = user.id, "User logged in");

    Ok(token)
}
