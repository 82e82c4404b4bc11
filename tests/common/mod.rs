#![allow(dead_code)]

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use serde_json::Value;
use sqlx::PgPool;
use tower::ServiceExt;
use uuid::Uuid;

use campus::campus_auth::{Role, create_access_token};
use campus::campus_config::{CorsConfig, JwtConfig};
use campus::campus_core::hash_password;
use campus::router::init_router;
use campus::state::AppState;

pub const TEST_PASSWORD: &str = "testpass123";

pub struct TestUser {
    pub id: Uuid,
    pub email: String,
    pub role: Role,
    pub school_id: Option<Uuid>,
}

pub fn test_jwt_config() -> JwtConfig {
    JwtConfig {
        secret: "integration-test-secret-key-0123456789".to_string(),
        access_token_expiry: 3600,
        issuer: "campus-api".to_string(),
        audience: vec!["campus-staff".to_string()],
    }
}

pub fn setup_app(pool: PgPool) -> Router {
    let state = AppState::new(
        pool,
        test_jwt_config(),
        CorsConfig {
            allowed_origins: vec!["http://localhost:3000".to_string()],
        },
    );
    init_router(state)
}

pub fn generate_unique_email() -> String {
    format!("test-{}@test.com", Uuid::new_v4())
}

pub fn generate_unique_school_name() -> String {
    format!("Test School {}", Uuid::new_v4())
}

pub async fn create_test_school(pool: &PgPool, name: &str) -> Uuid {
    sqlx::query_scalar("INSERT INTO schools (name, address) VALUES ($1, $2) RETURNING id")
        .bind(name)
        .bind("Test Address")
        .fetch_one(pool)
        .await
        .unwrap()
}

pub async fn create_test_user(pool: &PgPool, role: Role, school_id: Option<Uuid>) -> TestUser {
    let email = generate_unique_email();
    let hashed = hash_password(TEST_PASSWORD).unwrap();

    let id = sqlx::query_scalar(
        "INSERT INTO users (school_id, first_name, last_name, email, password, account_type)
         VALUES ($1, 'Test', 'User', $2, $3, $4)
         RETURNING id",
    )
    .bind(school_id)
    .bind(&email)
    .bind(&hashed)
    .bind(role.as_str())
    .fetch_one(pool)
    .await
    .unwrap();

    TestUser {
        id,
        email,
        role,
        school_id,
    }
}

pub async fn create_test_class(pool: &PgPool, school_id: Uuid, class_name: &str) -> Uuid {
    sqlx::query_scalar(
        "INSERT INTO classes (school_id, class_name, academic_year) VALUES ($1, $2, '2025/2026') RETURNING id",
    )
    .bind(school_id)
    .bind(class_name)
    .fetch_one(pool)
    .await
    .unwrap()
}

pub fn token_for(user: &TestUser) -> String {
    create_access_token(user.id, user.role, &test_jwt_config()).unwrap()
}

/// Sends one request and returns the status with the parsed JSON body
/// (`Value::Null` for an empty body).
pub async fn send(
    app: &Router,
    method: &str,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {}", token));
    }
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, json)
}
