pub mod auth;
pub mod categories;
pub mod execution_histories;
pub mod habit_tasks;
pub mod users;

use axum::Router;
use crate::state::AppState;

pub fn create_router() -> Router<AppState> {
    Router::new()
        .merge(auth::routes())
        .merge(users::routes())
        .merge(categories::routes())
        .merge(habit_tasks::routes())
        .merge(execution_histories::routes())
}
