use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::user::User;

#[derive(Deserialize)]
pub struct RegisterUserRequest {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
    pub role: Option<String>,
}

#[derive(Deserialize)]
pub struct UpdateUserRequest {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub is_active: Option<bool>,
}

#[derive(Deserialize)]
pub struct UserListParams {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub is_active: Option<String>,
}

#[derive(Serialize, Debug)]
pub struct UserResponse {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub role: String,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        UserResponse {
            id: user.id,
            first_name: user.first_name,
            last_name: user.last_name,
            email: user.email,
            role: user.role,
            is_active: user.is_active,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

#[derive(Deserialize)]
pub struct LoginRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

#[derive(Serialize)]
pub struct LoginResponse {
    pub access_token: String,
    pub token_type: &'static str,
    pub expires_in_seconds: usize,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::get_utc_time;

    #[test]
    fn response_preserves_user_fields() {
        let now = get_utc_time();
        let user = User {
            id: 1,
            first_name: "John".to_string(),
            last_name: "Doe".to_string(),
            email: "test@email.com".to_string(),
            password_hash: "$2b$12$hash".to_string(),
            is_active: true,
            role: "USER".to_string(),
            created_at: now,
            updated_at: now,
        };

        let response = UserResponse::from(user);

        assert_eq!(response.id, 1);
        assert_eq!(response.first_name, "John");
        assert_eq!(response.last_name, "Doe");
        assert_eq!(response.email, "test@email.com");
        assert_eq!(response.role, "USER");
        assert!(response.is_active);
    }

    #[test]
    fn response_never_serializes_password_hash() {
        let now = get_utc_time();
        let user = User {
            id: 1,
            first_name: "John".to_string(),
            last_name: "Doe".to_string(),
            email: "test@email.com".to_string(),
            password_hash: "$2b$12$secret".to_string(),
            is_active: true,
            role: "USER".to_string(),
            created_at: now,
            updated_at: now,
        };

        let json = serde_json::to_string(&UserResponse::from(user)).unwrap();
        assert!(!json.contains("secret"));
        assert!(!json.contains("password"));
    }
}
