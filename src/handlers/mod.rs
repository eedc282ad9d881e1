pub mod auth;
pub mod category;
pub mod execution_history;
pub mod habit_task;
pub mod user;
