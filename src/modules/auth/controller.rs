use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use uuid::Uuid;

use campus_core::{ApiResponse, AppError};
use campus_models::{AuthResponse, LoginRequest, RegisterSuperAdminRequest, User};

use crate::middleware::auth::AuthUser;
use crate::state::AppState;
use crate::validator::ValidatedJson;

use super::service::AuthService;

/// Register the first super admin
#[utoipa::path(
    post,
    path = "/api/auth/register-super-admin",
    request_body = RegisterSuperAdminRequest,
    responses(
        (status = 201, description = "Super admin registered", body = ApiResponse<AuthResponse>),
        (status = 403, description = "A super admin already exists"),
        (status = 409, description = "Email already exists")
    ),
    tag = "Authentication"
)]
pub async fn register_super_admin(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<RegisterSuperAdminRequest>,
) -> Result<(StatusCode, Json<ApiResponse<AuthResponse>>), AppError> {
    let auth = AuthService::register_super_admin(&state.db, &state.jwt_config, dto).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::ok("Super admin registered successfully", auth)),
    ))
}

/// Login and receive an access token
#[utoipa::path(
    post,
    path = "/api/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = ApiResponse<AuthResponse>),
        (status = 401, description = "Invalid email or password"),
        (status = 403, description = "Account is disabled")
    ),
    tag = "Authentication"
)]
pub async fn login(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<LoginRequest>,
) -> Result<Json<ApiResponse<AuthResponse>>, AppError> {
    let auth = AuthService::login(&state.db, &state.jwt_config, dto).await?;
    Ok(Json(ApiResponse::ok("Login successful", auth)))
}

#[utoipa::path(
    get,
    path = "/api/auth/profile",
    responses(
        (status = 200, description = "Current user", body = ApiResponse<User>),
        (status = 401, description = "Missing or invalid token")
    ),
    tag = "Authentication",
    security(("bearer_auth" = []))
)]
pub async fn profile(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> Result<Json<ApiResponse<User>>, AppError> {
    let user = AuthService::profile(&state.db, auth_user.user_id()?).await?;
    Ok(Json(ApiResponse::ok("Profile fetched successfully", user)))
}

#[utoipa::path(
    patch,
    path = "/api/auth/admins/{id}/deactivate",
    params(("id" = Uuid, Path, description = "Admin user ID")),
    responses(
        (status = 200, description = "Admin deactivated", body = ApiResponse<User>),
        (status = 403, description = "Super admin only"),
        (status = 404, description = "Admin not found")
    ),
    tag = "Authentication",
    security(("bearer_auth" = []))
)]
pub async fn deactivate_admin(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<User>>, AppError> {
    let user = AuthService::deactivate_admin(&state.db, id).await?;
    Ok(Json(ApiResponse::ok("Admin deactivated successfully", user)))
}
