use std::collections::HashMap;

use anyhow::anyhow;
use axum::{
    extract::{Path, Request, State},
    middleware::Next,
    response::Response,
};
use tracing::{debug, warn};
use uuid::Uuid;

use campus_core::AppError;

use crate::middleware::auth::AuthUser;
use crate::modules::schools::service::SchoolService;
use crate::modules::users::service::UserService;
use crate::state::AppState;

/// Tenant gate for routes nested under `/schools/{school_id}`.
///
/// The school must exist and not be soft-deleted (`404`). Super-admins pass;
/// anyone else must have a live, enabled account attached to that school,
/// checked against the stored user row rather than the token (`403`).
pub async fn ensure_school_access(
    State(state): State<AppState>,
    Path(params): Path<HashMap<String, String>>,
    auth_user: AuthUser,
    req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let school_id = params
        .get("school_id")
        .and_then(|raw| Uuid::parse_str(raw).ok())
        .ok_or_else(|| AppError::not_found(anyhow!("School not found")))?;

    let school = SchoolService::get_school(&state.db, school_id).await?;

    if !auth_user.is_super_admin() {
        let user = UserService::find_user(&state.db, auth_user.user_id()?)
            .await?
            .ok_or_else(|| AppError::unauthorized("Please log in"))?;

        if !user.can_access_school(school.id) {
            warn!(
                user.id = %user.id,
                school.id = %school.id,
                "User attempted to access another school"
            );
            return Err(AppError::forbidden(
                "Access denied. You do not belong to this school",
            ));
        }
    }

    debug!(school.id = %school.id, "School access granted");
    Ok(next.run(req).await)
}
