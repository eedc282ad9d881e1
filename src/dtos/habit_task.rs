use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::habit_task::HabitTask;

#[derive(Deserialize)]
pub struct CreateHabitTaskRequest {
    pub category_id: i64,
    pub name: String,
    pub description: Option<String>,
}

#[derive(Deserialize)]
pub struct UpdateHabitTaskRequest {
    pub category_id: Option<i64>,
    pub name: Option<String>,
    pub description: Option<String>,
}

#[derive(Deserialize)]
pub struct HabitTaskListParams {
    pub user_id: Option<String>,
    pub category_id: Option<String>,
    pub name: Option<String>,
}

#[derive(Serialize, Debug)]
pub struct HabitTaskResponse {
    pub id: i64,
    pub category_id: i64,
    pub name: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<HabitTask> for HabitTaskResponse {
    fn from(habit_task: HabitTask) -> Self {
        HabitTaskResponse {
            id: habit_task.id,
            category_id: habit_task.category_id,
            name: habit_task.name,
            description: habit_task.description,
            created_at: habit_task.created_at,
            updated_at: habit_task.updated_at,
        }
    }
}
