//! Ownership and role decisions, shared by every entity service.
//!
//! All functions here are pure: they never touch the store, so a denied
//! request is rejected before any query runs.

use crate::error::AppError;
use crate::middleware::auth::AuthContext;

/// True iff the requester is an admin or owns the resource.
pub fn can_access(auth: &AuthContext, owner_id: i64) -> bool {
    auth.role.is_admin() || auth.user_id == owner_id
}

/// Ownership filter for single-entity fetches: admins see everything,
/// everyone else only their own rows.
pub fn owner_scope(auth: &AuthContext) -> Option<i64> {
    if auth.role.is_admin() {
        None
    } else {
        Some(auth.user_id)
    }
}

/// Resolves the owner filter for list queries.
///
/// Non-admins default an unset scope to themselves and may not request
/// anyone else's. Admins pass any value through, including `None`
/// (no filter).
pub fn effective_owner_filter(
    auth: &AuthContext,
    requested_owner_id: Option<i64>,
) -> Result<Option<i64>, AppError> {
    if auth.role.is_admin() {
        return Ok(requested_owner_id);
    }

    match requested_owner_id {
        None => Ok(Some(auth.user_id)),
        Some(user_id) if user_id == auth.user_id => Ok(Some(user_id)),
        Some(_) => Err(AppError::forbidden("Forbidden")),
    }
}

/// Converts `NotFound` into `Forbidden` for non-admins so they cannot
/// probe whether a record exists. Admins keep the true `NotFound`; every
/// other error passes through unchanged.
pub fn mask_not_found(err: AppError, auth: &AuthContext) -> AppError {
    match err {
        AppError::NotFound(_) if !auth.role.is_admin() => AppError::forbidden("Forbidden"),
        other => other,
    }
}
