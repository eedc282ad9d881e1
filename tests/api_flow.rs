//! End-to-end service tests against a real database.
//!
//! Ignored by default; run with a disposable Postgres:
//! `TEST_DATABASE_URL=postgres://... cargo test -- --ignored`

use habitflow_backend::auth::jwt::verify_token;
use habitflow_backend::database;
use habitflow_backend::dtos::category::{CategoryListParams, CreateCategoryRequest};
use habitflow_backend::dtos::execution_history::CreateExecutionHistoryRequest;
use habitflow_backend::dtos::habit_task::CreateHabitTaskRequest;
use habitflow_backend::dtos::user::{RegisterUserRequest, UserResponse};
use habitflow_backend::error::AppError;
use habitflow_backend::middleware::auth::AuthContext;
use habitflow_backend::models::user::UserRole;
use habitflow_backend::services::{
    auth_service, category_service, execution_history_service, habit_task_service, user_service,
};
use habitflow_backend::utils::get_utc_time;
use sqlx::PgPool;

const JWT_SECRET: &str = "integration-test-secret";

async fn setup_pool() -> PgPool {
    let database_url = std::env::var("TEST_DATABASE_URL")
        .expect("TEST_DATABASE_URL must be set for integration tests");
    let pool = database::create_pool(&database_url)
        .await
        .expect("failed to connect to test database");
    database::run_migrations(&pool)
        .await
        .expect("failed to run migrations");
    pool
}

fn unique_email(prefix: &str) -> String {
    let nanos = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    format!("{prefix}-{nanos}@email.com")
}

async fn register(pool: &PgPool, prefix: &str, role: Option<&str>) -> UserResponse {
    user_service::create_user(
        pool,
        RegisterUserRequest {
            first_name: "John".to_string(),
            last_name: "Doe".to_string(),
            email: unique_email(prefix),
            password: "password123".to_string(),
            role: role.map(str::to_string),
        },
    )
    .await
    .expect("registration failed")
}

fn as_user(user: &UserResponse) -> AuthContext {
    AuthContext {
        user_id: user.id,
        role: UserRole::parse(&user.role).expect("unknown role"),
    }
}

#[tokio::test]
#[ignore = "requires a Postgres instance at TEST_DATABASE_URL"]
async fn registration_creates_default_category() {
    let pool = setup_pool().await;
    let user = register(&pool, "default-category", None).await;
    let auth = as_user(&user);

    let categories = category_service::get_categories(
        &pool,
        &auth,
        CategoryListParams {
            user_id: None,
            name: None,
        },
    )
    .await
    .unwrap();

    assert_eq!(categories.len(), 1);
    assert_eq!(categories[0].name, "Default");
    assert_eq!(categories[0].user_id, user.id);
}

#[tokio::test]
#[ignore = "requires a Postgres instance at TEST_DATABASE_URL"]
async fn duplicate_email_is_a_conflict() {
    let pool = setup_pool().await;
    let email = unique_email("duplicate");

    let request = |email: String| RegisterUserRequest {
        first_name: "John".to_string(),
        last_name: "Doe".to_string(),
        email,
        password: "password123".to_string(),
        role: None,
    };

    user_service::create_user(&pool, request(email.clone()))
        .await
        .unwrap();
    let err = user_service::create_user(&pool, request(email))
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::Conflict(_)));
}

#[tokio::test]
#[ignore = "requires a Postgres instance at TEST_DATABASE_URL"]
async fn login_round_trip_carries_id_and_role() {
    std::env::set_var("JWT_SECRET", JWT_SECRET);
    let pool = setup_pool().await;
    let user = register(&pool, "login", None).await;

    let token = auth_service::login(&pool, Some(&user.email), Some("password123"))
        .await
        .unwrap();
    let claims = verify_token(&token, JWT_SECRET).unwrap();

    assert_eq!(claims.sub, user.id);
    assert_eq!(claims.role, "USER");

    let err = auth_service::login(&pool, Some(&user.email), Some("wrong-password"))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::InvalidCredentials));

    let err = auth_service::login(&pool, Some(&user.email), None)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::MissingCredentials));
}

#[tokio::test]
#[ignore = "requires a Postgres instance at TEST_DATABASE_URL"]
async fn foreign_category_reads_are_masked_as_forbidden() {
    let pool = setup_pool().await;
    let owner = register(&pool, "owner", None).await;
    let other = register(&pool, "other", None).await;
    let admin = register(&pool, "admin", Some("ADMIN")).await;

    let categories = category_service::get_categories(
        &pool,
        &as_user(&owner),
        CategoryListParams {
            user_id: None,
            name: None,
        },
    )
    .await
    .unwrap();
    let category_id = categories[0].id;

    // Non-owner: forbidden whether the row exists or not
    let err = category_service::get_category_by_id(&pool, &as_user(&other), category_id)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Forbidden(_)));

    let err = category_service::get_category_by_id(&pool, &as_user(&other), i64::MAX)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Forbidden(_)));

    // Admin sees the truth
    let err = category_service::get_category_by_id(&pool, &as_user(&admin), i64::MAX)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));

    let fetched = category_service::get_category_by_id(&pool, &as_user(&admin), category_id)
        .await
        .unwrap();
    assert_eq!(fetched.id, category_id);
}

#[tokio::test]
#[ignore = "requires a Postgres instance at TEST_DATABASE_URL"]
async fn deleting_a_category_cascades_to_tasks_and_histories() {
    let pool = setup_pool().await;
    let user = register(&pool, "cascade", None).await;
    let auth = as_user(&user);
    let admin = register(&pool, "cascade-admin", Some("ADMIN")).await;

    let categories = category_service::get_categories(
        &pool,
        &auth,
        CategoryListParams {
            user_id: None,
            name: None,
        },
    )
    .await
    .unwrap();
    let category_id = categories[0].id;

    let habit_task = habit_task_service::create_habit_task(
        &pool,
        &auth,
        CreateHabitTaskRequest {
            category_id,
            name: "Morning run".to_string(),
            description: None,
        },
    )
    .await
    .unwrap();

    let execution_history = execution_history_service::create_execution_history(
        &pool,
        &auth,
        CreateExecutionHistoryRequest {
            habit_task_id: habit_task.id,
            executed_at: get_utc_time(),
        },
    )
    .await
    .unwrap();

    category_service::delete_category(&pool, &auth, category_id)
        .await
        .unwrap();

    let admin_auth = as_user(&admin);
    let err = category_service::get_category_by_id(&pool, &admin_auth, category_id)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));

    let err = habit_task_service::get_habit_task_by_id(&pool, &admin_auth, habit_task.id)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));

    let err = execution_history_service::get_execution_history_by_id(
        &pool,
        &admin_auth,
        execution_history.id,
    )
    .await
    .unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));
}

#[tokio::test]
#[ignore = "requires a Postgres instance at TEST_DATABASE_URL"]
async fn non_admin_cannot_create_for_another_user() {
    let pool = setup_pool().await;
    let owner = register(&pool, "target", None).await;
    let attacker = register(&pool, "attacker", None).await;

    let err = category_service::create_category(
        &pool,
        &as_user(&attacker),
        CreateCategoryRequest {
            user_id: owner.id,
            name: "Not mine".to_string(),
            description: None,
        },
    )
    .await
    .unwrap_err();

    assert!(matches!(err, AppError::Forbidden(_)));
}
