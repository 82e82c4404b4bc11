use axum::{
    Json,
    extract::{Path, Query, State, rejection::QueryRejection},
    http::StatusCode,
};
use uuid::Uuid;

use campus_core::{ApiResponse, AppError, ListResponse};
use campus_db::QueryParams;
use campus_models::{Subject, CreateSubjectDto, UpdateSubjectDto};

use crate::modules::query_params;
use crate::state::AppState;
use crate::validator::ValidatedJson;

use super::service::SubjectService;

#[utoipa::path(
    post,
    path = "/api/schools/{school_id}/subjects",
    params(("school_id" = Uuid, Path, description = "School ID")),
    request_body = CreateSubjectDto,
    responses(
        (status = 201, description = "Subject created", body = ApiResponse<Subject>),
        (status = 403, description = "Not an admin of this school"),
        (status = 404, description = "School not found"),
        (status = 409, description = "Subject name already used in this school")
    ),
    tag = "Subjects",
    security(("bearer_auth" = []))
)]
pub async fn create_subject(
    State(state): State<AppState>,
    Path(school_id): Path<Uuid>,
    ValidatedJson(dto): ValidatedJson<CreateSubjectDto>,
) -> Result<(StatusCode, Json<ApiResponse<Subject>>), AppError> {
    let subject = SubjectService::create_subject(&state.db, school_id, dto).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::ok("Subject created successfully", subject)),
    ))
}

#[utoipa::path(
    get,
    path = "/api/schools/{school_id}/subjects",
    params(
        ("school_id" = Uuid, Path, description = "School ID"),
        ("page" = Option<i64>, Query, description = "Page number (default 1)"),
        ("limit" = Option<i64>, Query, description = "Page size (default 100, max 1000)"),
        ("sort" = Option<String>, Query, description = "e.g. `name:asc,class.class_name:desc`"),
        ("fields" = Option<String>, Query, description = "e.g. `name,code,class.class_name`")
    ),
    responses(
        (status = 200, description = "Paginated subjects", body = ListResponse),
        (status = 400, description = "Unknown field in filter, sort or fields")
    ),
    tag = "Subjects",
    security(("bearer_auth" = []))
)]
pub async fn get_subjects(
    State(state): State<AppState>,
    Path(school_id): Path<Uuid>,
    params: Result<Query<QueryParams>, QueryRejection>,
) -> Result<Json<ListResponse>, AppError> {
    let params = query_params(params)?;
    let (rows, meta) = SubjectService::get_subjects(&state.db, school_id, &params).await?;
    Ok(Json(ListResponse::ok("Subjects fetched successfully", rows, meta)))
}

#[utoipa::path(
    get,
    path = "/api/schools/{school_id}/subjects/{id}",
    params(
        ("school_id" = Uuid, Path, description = "School ID"),
        ("id" = Uuid, Path, description = "Subject ID")
    ),
    responses(
        (status = 200, description = "Subject details", body = ApiResponse<Subject>),
        (status = 404, description = "Subject not found")
    ),
    tag = "Subjects",
    security(("bearer_auth" = []))
)]
pub async fn get_subject(
    State(state): State<AppState>,
    Path((school_id, id)): Path<(Uuid, Uuid)>,
) -> Result<Json<ApiResponse<Subject>>, AppError> {
    let subject = SubjectService::get_subject(&state.db, school_id, id).await?;
    Ok(Json(ApiResponse::ok("Subject fetched successfully", subject)))
}

#[utoipa::path(
    put,
    path = "/api/schools/{school_id}/subjects/{id}",
    params(
        ("school_id" = Uuid, Path, description = "School ID"),
        ("id" = Uuid, Path, description = "Subject ID")
    ),
    request_body = UpdateSubjectDto,
    responses(
        (status = 200, description = "Subject updated", body = ApiResponse<Subject>),
        (status = 404, description = "Subject not found"),
        (status = 409, description = "Subject name already used in this school")
    ),
    tag = "Subjects",
    security(("bearer_auth" = []))
)]
pub async fn update_subject(
    State(state): State<AppState>,
    Path((school_id, id)): Path<(Uuid, Uuid)>,
    ValidatedJson(dto): ValidatedJson<UpdateSubjectDto>,
) -> Result<Json<ApiResponse<Subject>>, AppError> {
    let subject = SubjectService::update_subject(&state.db, school_id, id, dto).await?;
    Ok(Json(ApiResponse::ok("Subject updated successfully", subject)))
}

#[utoipa::path(
    delete,
    path = "/api/schools/{school_id}/subjects/{id}",
    params(
        ("school_id" = Uuid, Path, description = "School ID"),
        ("id" = Uuid, Path, description = "Subject ID")
    ),
    responses(
        (status = 200, description = "Subject deleted"),
        (status = 404, description = "Subject not found")
    ),
    tag = "Subjects",
    security(("bearer_auth" = []))
)]
pub async fn delete_subject(
    State(state): State<AppState>,
    Path((school_id, id)): Path<(Uuid, Uuid)>,
) -> Result<Json<ApiResponse<()>>, AppError> {
    SubjectService::delete_subject(&state.db, school_id, id).await?;
    Ok(Json(ApiResponse::ok("Subject deleted successfully", ())))
}
