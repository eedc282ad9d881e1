use axum::{Router, routing::{get, post, put, delete}, middleware};
use crate::state::AppState;
use crate::handlers::habit_task::{get_habit_tasks, get_habit_task_by_id, create_habit_task, update_habit_task, delete_habit_task};
use crate::middleware::auth::require_auth;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/habit_tasks", get(get_habit_tasks))
        .route("/habit_tasks", post(create_habit_task))
        .route("/habit_tasks/{habit_task_id}", get(get_habit_task_by_id))
        .route("/habit_tasks/{habit_task_id}", put(update_habit_task))
        .route("/habit_tasks/{habit_task_id}", delete(delete_habit_task))
        .layer(middleware::from_fn(require_auth))
}
