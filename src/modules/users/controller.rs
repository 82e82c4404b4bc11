use axum::{
    Json,
    extract::{Path, Query, State, rejection::QueryRejection},
    http::StatusCode,
};
use uuid::Uuid;

use campus_core::{ApiResponse, AppError, ListResponse};
use campus_db::QueryParams;
use campus_models::{CreateMemberDto, User};

use crate::modules::query_params;
use crate::state::AppState;
use crate::validator::ValidatedJson;

use super::service::UserService;

#[utoipa::path(
    post,
    path = "/api/schools/{school_id}/users",
    params(("school_id" = Uuid, Path, description = "School ID")),
    request_body = CreateMemberDto,
    responses(
        (status = 201, description = "Member added", body = ApiResponse<User>),
        (status = 400, description = "Super admins cannot belong to a school"),
        (status = 403, description = "Not an admin of this school"),
        (status = 409, description = "Email already exists")
    ),
    tag = "Users",
    security(("bearer_auth" = []))
)]
pub async fn create_member(
    State(state): State<AppState>,
    Path(school_id): Path<Uuid>,
    ValidatedJson(dto): ValidatedJson<CreateMemberDto>,
) -> Result<(StatusCode, Json<ApiResponse<User>>), AppError> {
    let user = UserService::create_member(&state.db, school_id, dto).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::ok("User created successfully", user)),
    ))
}

/// Filterable on any public user column, e.g. `?account_type=teacher`.
#[utoipa::path(
    get,
    path = "/api/schools/{school_id}/users",
    params(
        ("school_id" = Uuid, Path, description = "School ID"),
        ("page" = Option<i64>, Query, description = "Page number (default 1)"),
        ("limit" = Option<i64>, Query, description = "Page size (default 100, max 1000)"),
        ("sort" = Option<String>, Query, description = "e.g. `last_name:asc`"),
        ("fields" = Option<String>, Query, description = "e.g. `first_name,email`")
    ),
    responses(
        (status = 200, description = "Paginated members", body = ListResponse),
        (status = 400, description = "Unknown field in filter, sort or fields")
    ),
    tag = "Users",
    security(("bearer_auth" = []))
)]
pub async fn get_members(
    State(state): State<AppState>,
    Path(school_id): Path<Uuid>,
    params: Result<Query<QueryParams>, QueryRejection>,
) -> Result<Json<ListResponse>, AppError> {
    let params = query_params(params)?;
    let (rows, meta) = UserService::get_members(&state.db, school_id, &params).await?;
    Ok(Json(ListResponse::ok("Users fetched successfully", rows, meta)))
}

#[utoipa::path(
    get,
    path = "/api/schools/{school_id}/users/{id}",
    params(
        ("school_id" = Uuid, Path, description = "School ID"),
        ("id" = Uuid, Path, description = "User ID")
    ),
    responses(
        (status = 200, description = "Member details", body = ApiResponse<User>),
        (status = 404, description = "User not found")
    ),
    tag = "Users",
    security(("bearer_auth" = []))
)]
pub async fn get_member(
    State(state): State<AppState>,
    Path((school_id, id)): Path<(Uuid, Uuid)>,
) -> Result<Json<ApiResponse<User>>, AppError> {
    let user = UserService::get_member(&state.db, school_id, id).await?;
    Ok(Json(ApiResponse::ok("User fetched successfully", user)))
}

#[utoipa::path(
    delete,
    path = "/api/schools/{school_id}/users/{id}",
    params(
        ("school_id" = Uuid, Path, description = "School ID"),
        ("id" = Uuid, Path, description = "User ID")
    ),
    responses(
        (status = 200, description = "Member deleted"),
        (status = 404, description = "User not found")
    ),
    tag = "Users",
    security(("bearer_auth" = []))
)]
pub async fn delete_member(
    State(state): State<AppState>,
    Path((school_id, id)): Path<(Uuid, Uuid)>,
) -> Result<Json<ApiResponse<()>>, AppError> {
    UserService::delete_member(&state.db, school_id, id).await?;
    Ok(Json(ApiResponse::ok("User deleted successfully", ())))
}
