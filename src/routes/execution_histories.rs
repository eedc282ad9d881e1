use axum::{Router, routing::{get, post, delete}, middleware};
use crate::state::AppState;
use crate::handlers::execution_history::{get_execution_histories, get_execution_history_by_id, create_execution_history, delete_execution_history};
use crate::middleware::auth::require_auth;

// Execution histories are immutable once recorded: no update route
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/execution_histories", get(get_execution_histories))
        .route("/execution_histories", post(create_execution_history))
        .route("/execution_histories/{execution_history_id}", get(get_execution_history_by_id))
        .route("/execution_histories/{execution_history_id}", delete(delete_execution_history))
        .layer(middleware::from_fn(require_auth))
}
