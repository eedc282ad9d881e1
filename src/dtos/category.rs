use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::category::Category;

#[derive(Deserialize)]
pub struct CreateCategoryRequest {
    pub user_id: i64,
    pub name: String,
    pub description: Option<String>,
}

#[derive(Deserialize)]
pub struct UpdateCategoryRequest {
    pub name: Option<String>,
    pub description: Option<String>,
}

#[derive(Deserialize)]
pub struct CategoryListParams {
    pub user_id: Option<String>,
    pub name: Option<String>,
}

#[derive(Serialize, Debug)]
pub struct CategoryResponse {
    pub id: i64,
    pub user_id: i64,
    pub name: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Category> for CategoryResponse {
    fn from(category: Category) -> Self {
        CategoryResponse {
            id: category.id,
            user_id: category.user_id,
            name: category.name,
            description: category.description,
            created_at: category.created_at,
            updated_at: category.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::get_utc_time;

    #[test]
    fn response_preserves_category_fields() {
        let now = get_utc_time();
        let category = Category {
            id: 7,
            user_id: 1,
            name: "Category name".to_string(),
            description: Some("Category description".to_string()),
            created_at: now,
            updated_at: now,
        };

        let response = CategoryResponse::from(category);

        assert_eq!(response.id, 7);
        assert_eq!(response.user_id, 1);
        assert_eq!(response.name, "Category name");
        assert_eq!(response.description.as_deref(), Some("Category description"));
    }
}
