use chrono::{DateTime, Utc};
use serde::Serialize;

#[derive(Debug, Clone, sqlx::FromRow, Serialize)]
pub struct ExecutionHistory {
    pub id: i64,
    pub habit_task_id: i64,
    pub executed_at: DateTime<Utc>,
}
