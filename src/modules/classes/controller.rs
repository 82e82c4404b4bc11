use axum::{
    Json,
    extract::{Path, Query, State, rejection::QueryRejection},
    http::StatusCode,
};
use uuid::Uuid;

use campus_core::{ApiResponse, AppError, ListResponse};
use campus_db::QueryParams;
use campus_models::{Class, CreateClassDto, UpdateClassDto};

use crate::modules::query_params;
use crate::state::AppState;
use crate::validator::ValidatedJson;

use super::service::ClassService;

#[utoipa::path(
    post,
    path = "/api/schools/{school_id}/classes",
    params(("school_id" = Uuid, Path, description = "School ID")),
    request_body = CreateClassDto,
    responses(
        (status = 201, description = "Class created", body = ApiResponse<Class>),
        (status = 403, description = "Not an admin of this school"),
        (status = 404, description = "School not found"),
        (status = 409, description = "Class name already used in this school")
    ),
    tag = "Classes",
    security(("bearer_auth" = []))
)]
pub async fn create_class(
    State(state): State<AppState>,
    Path(school_id): Path<Uuid>,
    ValidatedJson(dto): ValidatedJson<CreateClassDto>,
) -> Result<(StatusCode, Json<ApiResponse<Class>>), AppError> {
    let class = ClassService::create_class(&state.db, school_id, dto).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::ok("Class created successfully", class)),
    ))
}

#[utoipa::path(
    get,
    path = "/api/schools/{school_id}/classes",
    params(
        ("school_id" = Uuid, Path, description = "School ID"),
        ("page" = Option<i64>, Query, description = "Page number (default 1)"),
        ("limit" = Option<i64>, Query, description = "Page size (default 100, max 1000)"),
        ("sort" = Option<String>, Query, description = "e.g. `class_name:asc`"),
        ("fields" = Option<String>, Query, description = "e.g. `class_name,academic_year`")
    ),
    responses(
        (status = 200, description = "Paginated classes", body = ListResponse),
        (status = 400, description = "Unknown field in filter, sort or fields")
    ),
    tag = "Classes",
    security(("bearer_auth" = []))
)]
pub async fn get_classes(
    State(state): State<AppState>,
    Path(school_id): Path<Uuid>,
    params: Result<Query<QueryParams>, QueryRejection>,
) -> Result<Json<ListResponse>, AppError> {
    let params = query_params(params)?;
    let (rows, meta) = ClassService::get_classes(&state.db, school_id, &params).await?;
    Ok(Json(ListResponse::ok("Classes fetched successfully", rows, meta)))
}

#[utoipa::path(
    get,
    path = "/api/schools/{school_id}/classes/{id}",
    params(
        ("school_id" = Uuid, Path, description = "School ID"),
        ("id" = Uuid, Path, description = "Class ID")
    ),
    responses(
        (status = 200, description = "Class details", body = ApiResponse<Class>),
        (status = 404, description = "Class not found")
    ),
    tag = "Classes",
    security(("bearer_auth" = []))
)]
pub async fn get_class(
    State(state): State<AppState>,
    Path((school_id, id)): Path<(Uuid, Uuid)>,
) -> Result<Json<ApiResponse<Class>>, AppError> {
    let class = ClassService::get_class(&state.db, school_id, id).await?;
    Ok(Json(ApiResponse::ok("Class fetched successfully", class)))
}

#[utoipa::path(
    put,
    path = "/api/schools/{school_id}/classes/{id}",
    params(
        ("school_id" = Uuid, Path, description = "School ID"),
        ("id" = Uuid, Path, description = "Class ID")
    ),
    request_body = UpdateClassDto,
    responses(
        (status = 200, description = "Class updated", body = ApiResponse<Class>),
        (status = 404, description = "Class not found"),
        (status = 409, description = "Class name already used in this school")
    ),
    tag = "Classes",
    security(("bearer_auth" = []))
)]
pub async fn update_class(
    State(state): State<AppState>,
    Path((school_id, id)): Path<(Uuid, Uuid)>,
    ValidatedJson(dto): ValidatedJson<UpdateClassDto>,
) -> Result<Json<ApiResponse<Class>>, AppError> {
    let class = ClassService::update_class(&state.db, school_id, id, dto).await?;
    Ok(Json(ApiResponse::ok("Class updated successfully", class)))
}

#[utoipa::path(
    delete,
    path = "/api/schools/{school_id}/classes/{id}",
    params(
        ("school_id" = Uuid, Path, description = "School ID"),
        ("id" = Uuid, Path, description = "Class ID")
    ),
    responses(
        (status = 200, description = "Class deleted"),
        (status = 404, description = "Class not found")
    ),
    tag = "Classes",
    security(("bearer_auth" = []))
)]
pub async fn delete_class(
    State(state): State<AppState>,
    Path((school_id, id)): Path<(Uuid, Uuid)>,
) -> Result<Json<ApiResponse<()>>, AppError> {
    ClassService::delete_class(&state.db, school_id, id).await?;
    Ok(Json(ApiResponse::ok("Class deleted successfully", ())))
}
