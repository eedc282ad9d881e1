use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::execution_history::ExecutionHistory;

#[derive(Deserialize)]
pub struct CreateExecutionHistoryRequest {
    pub habit_task_id: i64,
    pub executed_at: DateTime<Utc>,
}

#[derive(Deserialize)]
pub struct ExecutionHistoryListParams {
    pub user_id: Option<String>,
    pub habit_task_id: Option<String>,
    pub start_datetime: Option<String>,
    pub end_datetime: Option<String>,
}

#[derive(Serialize, Debug)]
pub struct ExecutionHistoryResponse {
    pub id: i64,
    pub habit_task_id: i64,
    pub executed_at: DateTime<Utc>,
}

impl From<ExecutionHistory> for ExecutionHistoryResponse {
    fn from(execution_history: ExecutionHistory) -> Self {
        ExecutionHistoryResponse {
            id: execution_history.id,
            habit_task_id: execution_history.habit_task_id,
            executed_at: execution_history.executed_at,
        }
    }
}
