use axum::{Router, routing::{get, post, put, delete}, middleware};
use crate::state::AppState;
use crate::handlers::user::{register_user, get_users, get_user_by_id, get_user_by_email, update_user, delete_user};
use crate::middleware::auth::require_auth;

pub fn routes() -> Router<AppState> {
    // Registration is the only unauthenticated user route
    let open = Router::new()
        .route("/users/register", post(register_user));

    let protected = Router::new()
        .route("/users", get(get_users))
        .route("/users/id/{user_id}", get(get_user_by_id))
        .route("/users/email/{email}", get(get_user_by_email))
        .route("/users/{user_id}", put(update_user))
        .route("/users/{user_id}", delete(delete_user))
        .layer(middleware::from_fn(require_auth));

    open.merge(protected)
}
