use axum::{Router, routing::{get, post, put, delete}, middleware};
use crate::state::AppState;
use crate::handlers::category::{get_categories, get_category_by_id, create_category, update_category, delete_category};
use crate::middleware::auth::require_auth;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/categories", get(get_categories))
        .route("/categories", post(create_category))
        .route("/categories/{category_id}", get(get_category_by_id))
        .route("/categories/{category_id}", put(update_category))
        .route("/categories/{category_id}", delete(delete_category))
        .layer(middleware::from_fn(require_auth))
}
