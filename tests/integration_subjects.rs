mod common;

use axum::http::StatusCode;
use serde_json::json;
use sqlx::PgPool;

use campus::campus_auth::Role;
use common::{
    create_test_class, create_test_school, create_test_user, generate_unique_school_name, send,
    setup_app, token_for,
};

#[sqlx::test(migrations = "./migrations")]
async fn test_create_subject_for_class(pool: PgPool) {
    let school_id = create_test_school(&pool, &generate_unique_school_name()).await;
    let class_id = create_test_class(&pool, school_id, "JSS 2").await;
    let admin = create_test_user(&pool, Role::Admin, Some(school_id)).await;
    let app = setup_app(pool);

    let (status, res) = send(
        &app,
        "POST",
        &format!("/api/schools/{}/subjects", school_id),
        Some(&token_for(&admin)),
        Some(json!({ "name": "Mathematics", "code": "MTH", "class_id": class_id })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(res["data"]["name"], "Mathematics");
    assert_eq!(res["data"]["class_id"], class_id.to_string());
}

#[sqlx::test(migrations = "./migrations")]
async fn test_subject_class_must_belong_to_school(pool: PgPool) {
    let school_id = create_test_school(&pool, &generate_unique_school_name()).await;
    let other_school = create_test_school(&pool, &generate_unique_school_name()).await;
    let foreign_class = create_test_class(&pool, other_school, "JSS 2").await;
    let admin = create_test_user(&pool, Role::Admin, Some(school_id)).await;
    let app = setup_app(pool);

    let (status, res) = send(
        &app,
        "POST",
        &format!("/api/schools/{}/subjects", school_id),
        Some(&token_for(&admin)),
        Some(json!({ "name": "Physics", "class_id": foreign_class })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(res["error"], "Class not found in this school");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_list_subjects_projects_joined_class(pool: PgPool) {
    let school_id = create_test_school(&pool, &generate_unique_school_name()).await;
    let class_id = create_test_class(&pool, school_id, "SS 1").await;
    let admin = create_test_user(&pool, Role::Admin, Some(school_id)).await;
    let token = token_for(&admin);
    let app = setup_app(pool);
    let base = format!("/api/schools/{}/subjects", school_id);

    for (name, class) in [("Biology", Some(class_id)), ("Civic Education", None)] {
        let (status, _) = send(
            &app,
            "POST",
            &base,
            Some(&token),
            Some(json!({ "name": name, "class_id": class })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
    }

    let (status, res) = send(
        &app,
        "GET",
        &format!("{}?fields=name,class.class_name&sort=name:asc", base),
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let rows = res["data"].as_array().unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0]["name"], "Biology");
    assert_eq!(rows[0]["class.class_name"], "SS 1");
    assert_eq!(rows[1]["name"], "Civic Education");
    assert!(rows[1]["class.class_name"].is_null());

    let (status, res) = send(
        &app,
        "GET",
        &format!("{}?class_id={}", base, class_id),
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(res["meta"]["total"], 1);
    assert_eq!(res["data"][0]["name"], "Biology");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_deleted_class_drops_out_of_join(pool: PgPool) {
    let school_id = create_test_school(&pool, &generate_unique_school_name()).await;
    let class_id = create_test_class(&pool, school_id, "SS 2").await;
    let admin = create_test_user(&pool, Role::Admin, Some(school_id)).await;
    let token = token_for(&admin);
    let app = setup_app(pool);
    let base = format!("/api/schools/{}/subjects", school_id);

    let (status, _) = send(
        &app,
        "POST",
        &base,
        Some(&token),
        Some(json!({ "name": "Chemistry", "class_id": class_id })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, _) = send(
        &app,
        "DELETE",
        &format!("/api/schools/{}/classes/{}", school_id, class_id),
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, res) = send(
        &app,
        "GET",
        &format!("{}?fields=class.class_name", base),
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(res["meta"]["total"], 1);
    assert!(res["data"][0]["class.class_name"].is_null());
}

#[sqlx::test(migrations = "./migrations")]
async fn test_unknown_join_alias_is_400(pool: PgPool) {
    let school_id = create_test_school(&pool, &generate_unique_school_name()).await;
    let admin = create_test_user(&pool, Role::Admin, Some(school_id)).await;
    let app = setup_app(pool);

    let (status, res) = send(
        &app,
        "GET",
        &format!("/api/schools/{}/subjects?fields=teacher.first_name", school_id),
        Some(&token_for(&admin)),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(res["success"], false);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_update_subject_and_duplicate_name(pool: PgPool) {
    let school_id = create_test_school(&pool, &generate_unique_school_name()).await;
    let admin = create_test_user(&pool, Role::Admin, Some(school_id)).await;
    let token = token_for(&admin);
    let app = setup_app(pool);
    let base = format!("/api/schools/{}/subjects", school_id);

    let mut ids = Vec::new();
    for name in ["English", "French"] {
        let (status, res) = send(&app, "POST", &base, Some(&token), Some(json!({ "name": name }))).await;
        assert_eq!(status, StatusCode::CREATED);
        ids.push(res["data"]["id"].as_str().unwrap().to_string());
    }

    let uri = format!("{}/{}", base, ids[1]);
    let (status, res) = send(&app, "PUT", &uri, Some(&token), Some(json!({ "name": "English" }))).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(res["error"], "A subject with this name already exists in this school");

    let (status, res) = send(
        &app,
        "PUT",
        &uri,
        Some(&token),
        Some(json!({ "code": "FRN", "is_active": false })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(res["data"]["name"], "French");
    assert_eq!(res["data"]["code"], "FRN");
    assert_eq!(res["data"]["is_active"], false);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_department_head_must_belong_to_school(pool: PgPool) {
    let school_id = create_test_school(&pool, &generate_unique_school_name()).await;
    let other_school = create_test_school(&pool, &generate_unique_school_name()).await;
    let admin = create_test_user(&pool, Role::Admin, Some(school_id)).await;
    let own_head = create_test_user(&pool, Role::Teacher, Some(school_id)).await;
    let foreign_head = create_test_user(&pool, Role::Teacher, Some(other_school)).await;
    let token = token_for(&admin);
    let app = setup_app(pool);
    let base = format!("/api/schools/{}/subjects", school_id);

    let (status, res) = send(
        &app,
        "POST",
        &base,
        Some(&token),
        Some(json!({ "name": "Geography", "department_head_id": foreign_head.id })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(res["error"], "Department head not found in this school");

    let (status, res) = send(
        &app,
        "POST",
        &base,
        Some(&token),
        Some(json!({ "name": "Geography", "department_head_id": own_head.id })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let subject_id = res["data"]["id"].as_str().unwrap().to_string();

    let (status, _) = send(
        &app,
        "PUT",
        &format!("{}/{}", base, subject_id),
        Some(&token),
        Some(json!({ "department_head_id": foreign_head.id })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}
