mod common;

use axum::http::StatusCode;
use serde_json::json;
use sqlx::PgPool;

use campus::campus_auth::Role;
use common::{
    create_test_school, create_test_user, generate_unique_email, generate_unique_school_name,
    send, setup_app, token_for,
};

#[sqlx::test(migrations = "./migrations")]
async fn test_admin_adds_teacher(pool: PgPool) {
    let school_id = create_test_school(&pool, &generate_unique_school_name()).await;
    let admin = create_test_user(&pool, Role::Admin, Some(school_id)).await;
    let app = setup_app(pool);
    let email = generate_unique_email();

    let (status, res) = send(
        &app,
        "POST",
        &format!("/api/schools/{}/users", school_id),
        Some(&token_for(&admin)),
        Some(json!({
            "first_name": "Grace",
            "last_name": "Hopper",
            "email": email,
            "password": "teacherpass",
            "account_type": "teacher"
        })),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(res["data"]["email"], email);
    assert_eq!(res["data"]["account_type"], "teacher");
    assert_eq!(res["data"]["school_id"], school_id.to_string());
    assert!(res["data"].get("password").is_none());
}

#[sqlx::test(migrations = "./migrations")]
async fn test_super_admin_cannot_be_added_to_school(pool: PgPool) {
    let school_id = create_test_school(&pool, &generate_unique_school_name()).await;
    let admin = create_test_user(&pool, Role::Admin, Some(school_id)).await;
    let app = setup_app(pool);

    let (status, res) = send(
        &app,
        "POST",
        &format!("/api/schools/{}/users", school_id),
        Some(&token_for(&admin)),
        Some(json!({
            "first_name": "Mallory",
            "last_name": "Root",
            "email": generate_unique_email(),
            "password": "escalate123",
            "account_type": "super-admin"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(res["error"], "Super admins cannot belong to a school");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_duplicate_email_conflicts(pool: PgPool) {
    let school_id = create_test_school(&pool, &generate_unique_school_name()).await;
    let admin = create_test_user(&pool, Role::Admin, Some(school_id)).await;
    let app = setup_app(pool);

    let (status, res) = send(
        &app,
        "POST",
        &format!("/api/schools/{}/users", school_id),
        Some(&token_for(&admin)),
        Some(json!({
            "first_name": "Copy",
            "last_name": "Cat",
            "email": admin.email,
            "password": "password123",
            "account_type": "student"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(res["error"], "Email already exists");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_list_members_filters_and_hides_password(pool: PgPool) {
    let school_id = create_test_school(&pool, &generate_unique_school_name()).await;
    let other_school = create_test_school(&pool, &generate_unique_school_name()).await;
    let admin = create_test_user(&pool, Role::Admin, Some(school_id)).await;
    create_test_user(&pool, Role::Teacher, Some(school_id)).await;
    create_test_user(&pool, Role::Teacher, Some(school_id)).await;
    create_test_user(&pool, Role::Teacher, Some(other_school)).await;
    let token = token_for(&admin);
    let app = setup_app(pool);
    let base = format!("/api/schools/{}/users", school_id);

    let (status, res) = send(&app, "GET", &base, Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(res["meta"]["total"], 3);
    assert!(res["data"][0].get("password").is_none());

    let (status, res) = send(
        &app,
        "GET",
        &format!("{}?account_type=teacher", base),
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(res["meta"]["total"], 2);

    let (status, _) = send(
        &app,
        "GET",
        &format!("{}?fields=email,password", base),
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_member_of_other_school_is_not_found(pool: PgPool) {
    let school_id = create_test_school(&pool, &generate_unique_school_name()).await;
    let other_school = create_test_school(&pool, &generate_unique_school_name()).await;
    let admin = create_test_user(&pool, Role::Admin, Some(school_id)).await;
    let outsider = create_test_user(&pool, Role::Student, Some(other_school)).await;
    let token = token_for(&admin);
    let app = setup_app(pool);

    let uri = format!("/api/schools/{}/users/{}", school_id, outsider.id);
    let (status, _) = send(&app, "GET", &uri, Some(&token), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(&app, "DELETE", &uri, Some(&token), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_delete_member(pool: PgPool) {
    let school_id = create_test_school(&pool, &generate_unique_school_name()).await;
    let admin = create_test_user(&pool, Role::Admin, Some(school_id)).await;
    let student = create_test_user(&pool, Role::Student, Some(school_id)).await;
    let token = token_for(&admin);
    let app = setup_app(pool);
    let uri = format!("/api/schools/{}/users/{}", school_id, student.id);

    let (status, res) = send(&app, "GET", &uri, Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(res["data"]["account_type"], "student");

    let (status, _) = send(&app, "DELETE", &uri, Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = send(&app, "GET", &uri, Some(&token), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
