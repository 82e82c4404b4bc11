mod common;

use axum::http::StatusCode;
use serde_json::json;
use sqlx::PgPool;

use campus::campus_auth::{Role, verify_token};
use campus::campus_core::hash_password;
use campus::modules::users::service::{NewUser, UserService};
use common::{
    TEST_PASSWORD, create_test_school, create_test_user, generate_unique_email,
    generate_unique_school_name, send, setup_app, test_jwt_config, token_for,
};

#[sqlx::test(migrations = "./migrations")]
async fn test_register_super_admin_only_once(pool: PgPool) {
    let app = setup_app(pool);
    let body = json!({
        "first_name": "Platform",
        "last_name": "Owner",
        "email": generate_unique_email(),
        "password": "supersecret1"
    });

    let (status, res) = send(&app, "POST", "/api/auth/register-super-admin", None, Some(body)).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(res["data"]["user"]["account_type"], "super-admin");
    assert!(res["data"]["user"]["school_id"].is_null());
    assert!(res["data"]["user"].get("password").is_none());

    let token = res["data"]["access_token"].as_str().unwrap();
    let claims = verify_token(token, &test_jwt_config()).unwrap();
    assert_eq!(claims.account_type, Role::SuperAdmin);

    let second = json!({
        "first_name": "Second",
        "last_name": "Owner",
        "email": generate_unique_email(),
        "password": "supersecret1"
    });
    let (status, res) =
        send(&app, "POST", "/api/auth/register-super-admin", None, Some(second)).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(res["success"], false);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_login_returns_token_for_account_type(pool: PgPool) {
    let school_id = create_test_school(&pool, &generate_unique_school_name()).await;
    let teacher = create_test_user(&pool, Role::Teacher, Some(school_id)).await;
    let app = setup_app(pool);

    let (status, res) = send(
        &app,
        "POST",
        "/api/auth/login",
        None,
        Some(json!({ "email": teacher.email, "password": TEST_PASSWORD })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(res["data"]["user"]["id"], teacher.id.to_string());
    let token = res["data"]["access_token"].as_str().unwrap();
    let claims = verify_token(token, &test_jwt_config()).unwrap();
    assert_eq!(claims.id, teacher.id.to_string());
    assert_eq!(claims.account_type, Role::Teacher);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_login_rejects_bad_credentials(pool: PgPool) {
    let admin = create_test_user(&pool, Role::SuperAdmin, None).await;
    let app = setup_app(pool);

    let (status, res) = send(
        &app,
        "POST",
        "/api/auth/login",
        None,
        Some(json!({ "email": admin.email, "password": "wrong-password" })),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(res["error"], "Invalid email or password");

    let (status, res) = send(
        &app,
        "POST",
        "/api/auth/login",
        None,
        Some(json!({ "email": generate_unique_email(), "password": TEST_PASSWORD })),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(res["error"], "Invalid email or password");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_login_requires_email_field(pool: PgPool) {
    let app = setup_app(pool);
    let (status, res) = send(
        &app,
        "POST",
        "/api/auth/login",
        None,
        Some(json!({ "password": TEST_PASSWORD })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(res["error"], "email is required");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_profile_requires_token(pool: PgPool) {
    let school_id = create_test_school(&pool, &generate_unique_school_name()).await;
    let student = create_test_user(&pool, Role::Student, Some(school_id)).await;
    let app = setup_app(pool);

    let (status, _) = send(&app, "GET", "/api/auth/profile", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let token = token_for(&student);
    let (status, res) = send(&app, "GET", "/api/auth/profile", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(res["data"]["email"], student.email);
    assert_eq!(res["data"]["school_id"], school_id.to_string());
}

#[sqlx::test(migrations = "./migrations")]
async fn test_deactivated_admin_is_locked_out(pool: PgPool) {
    let school_id = create_test_school(&pool, &generate_unique_school_name()).await;
    let super_admin = create_test_user(&pool, Role::SuperAdmin, None).await;
    let admin = create_test_user(&pool, Role::Admin, Some(school_id)).await;
    let app = setup_app(pool);

    let admin_token = token_for(&admin);
    let uri = format!("/api/auth/admins/{}/deactivate", admin.id);

    let (status, _) = send(&app, "PATCH", &uri, Some(&admin_token), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, res) = send(&app, "PATCH", &uri, Some(&token_for(&super_admin)), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(res["data"]["is_disabled"], true);

    let (status, res) = send(
        &app,
        "POST",
        "/api/auth/login",
        None,
        Some(json!({ "email": admin.email, "password": TEST_PASSWORD })),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(res["error"], "Account is disabled");

    // The old token still verifies but the tenant gate re-reads the account.
    let classes = format!("/api/schools/{}/classes", school_id);
    let (status, _) = send(&app, "GET", &classes, Some(&admin_token), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_deactivate_only_targets_admins(pool: PgPool) {
    let school_id = create_test_school(&pool, &generate_unique_school_name()).await;
    let super_admin = create_test_user(&pool, Role::SuperAdmin, None).await;
    let teacher = create_test_user(&pool, Role::Teacher, Some(school_id)).await;
    let app = setup_app(pool);

    let uri = format!("/api/auth/admins/{}/deactivate", teacher.id);
    let (status, res) = send(&app, "PATCH", &uri, Some(&token_for(&super_admin)), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(res["error"], "Admin not found");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_second_live_super_admin_is_refused_by_database(pool: PgPool) {
    create_test_user(&pool, Role::SuperAdmin, None).await;
    let password_hash = hash_password(TEST_PASSWORD).unwrap();
    let email = generate_unique_email();

    // Inserts directly, as a request that passed the existence check concurrently would.
    let err = UserService::insert_user(
        &pool,
        NewUser {
            school_id: None,
            first_name: "Late",
            last_name: "Arrival",
            email: &email,
            password_hash: &password_hash,
            account_type: Role::SuperAdmin,
            phone_number: None,
        },
    )
    .await
    .unwrap_err();

    assert_eq!(err.status, StatusCode::FORBIDDEN);
    assert_eq!(err.message(), "A super admin already exists");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_deleted_super_admin_frees_bootstrap(pool: PgPool) {
    let old = create_test_user(&pool, Role::SuperAdmin, None).await;
    sqlx::query("UPDATE users SET is_deleted = TRUE WHERE id = $1")
        .bind(old.id)
        .execute(&pool)
        .await
        .unwrap();
    let app = setup_app(pool);

    let (status, _) = send(
        &app,
        "POST",
        "/api/auth/register-super-admin",
        None,
        Some(json!({
            "first_name": "New",
            "last_name": "Owner",
            "email": generate_unique_email(),
            "password": "supersecret1"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
}
