use axum::{
    Json,
    extract::{Path, Query, State, rejection::QueryRejection},
    http::StatusCode,
};
use uuid::Uuid;

use campus_core::{ApiResponse, AppError, ListResponse};
use campus_db::QueryParams;
use campus_models::{CreateSchoolDto, School, UpdateSchoolDto};

use crate::modules::query_params;
use crate::state::AppState;
use crate::validator::ValidatedJson;

use super::service::SchoolService;

#[utoipa::path(
    post,
    path = "/api/schools",
    request_body = CreateSchoolDto,
    responses(
        (status = 201, description = "School created", body = ApiResponse<School>),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Super admin only"),
        (status = 409, description = "School name already exists"),
        (status = 422, description = "Validation failed")
    ),
    tag = "Schools",
    security(("bearer_auth" = []))
)]
pub async fn create_school(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<CreateSchoolDto>,
) -> Result<(StatusCode, Json<ApiResponse<School>>), AppError> {
    let school = SchoolService::create_school(&state.db, dto).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::ok("School created successfully", school)),
    ))
}

#[utoipa::path(
    get,
    path = "/api/schools",
    params(
        ("page" = Option<i64>, Query, description = "Page number (default 1)"),
        ("limit" = Option<i64>, Query, description = "Page size (default 100, max 1000)"),
        ("sort" = Option<String>, Query, description = "e.g. `name:asc,created_at:desc`"),
        ("fields" = Option<String>, Query, description = "e.g. `name,city`")
    ),
    responses(
        (status = 200, description = "Paginated schools", body = ListResponse),
        (status = 400, description = "Unknown field in filter, sort or fields"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Super admin only")
    ),
    tag = "Schools",
    security(("bearer_auth" = []))
)]
pub async fn get_schools(
    State(state): State<AppState>,
    params: Result<Query<QueryParams>, QueryRejection>,
) -> Result<Json<ListResponse>, AppError> {
    let params = query_params(params)?;
    let (rows, meta) = SchoolService::get_schools(&state.db, &params).await?;
    Ok(Json(ListResponse::ok("Schools fetched successfully", rows, meta)))
}

#[utoipa::path(
    get,
    path = "/api/schools/{school_id}",
    params(("school_id" = Uuid, Path, description = "School ID")),
    responses(
        (status = 200, description = "School details", body = ApiResponse<School>),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "School not found")
    ),
    tag = "Schools",
    security(("bearer_auth" = []))
)]
pub async fn get_school(
    State(state): State<AppState>,
    Path(school_id): Path<Uuid>,
) -> Result<Json<ApiResponse<School>>, AppError> {
    let school = SchoolService::get_school(&state.db, school_id).await?;
    Ok(Json(ApiResponse::ok("School fetched successfully", school)))
}

#[utoipa::path(
    put,
    path = "/api/schools/{school_id}",
    params(("school_id" = Uuid, Path, description = "School ID")),
    request_body = UpdateSchoolDto,
    responses(
        (status = 200, description = "School updated", body = ApiResponse<School>),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "School not found"),
        (status = 409, description = "School name already exists")
    ),
    tag = "Schools",
    security(("bearer_auth" = []))
)]
pub async fn update_school(
    State(state): State<AppState>,
    Path(school_id): Path<Uuid>,
    ValidatedJson(dto): ValidatedJson<UpdateSchoolDto>,
) -> Result<Json<ApiResponse<School>>, AppError> {
    let school = SchoolService::update_school(&state.db, school_id, dto).await?;
    Ok(Json(ApiResponse::ok("School updated successfully", school)))
}

#[utoipa::path(
    delete,
    path = "/api/schools/{school_id}",
    params(("school_id" = Uuid, Path, description = "School ID")),
    responses(
        (status = 200, description = "School deleted"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "School not found")
    ),
    tag = "Schools",
    security(("bearer_auth" = []))
)]
pub async fn delete_school(
    State(state): State<AppState>,
    Path(school_id): Path<Uuid>,
) -> Result<Json<ApiResponse<()>>, AppError> {
    SchoolService::delete_school(&state.db, school_id).await?;
    Ok(Json(ApiResponse::ok("School deleted successfully", ())))
}
