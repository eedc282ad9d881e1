pub mod auth_service;
pub mod category_service;
pub mod execution_history_service;
pub mod habit_task_service;
pub mod user_service;
