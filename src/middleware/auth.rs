use std::sync::Arc;

use axum::{
    extract::{FromRequestParts, Request, State},
    http::{HeaderMap, request::Parts},
    middleware::Next,
    response::{IntoResponse, Response},
};
use tracing::debug;
use uuid::Uuid;

use campus_auth::{Role, verify_token};
use campus_config::JwtConfig;
use campus_core::AppError;

use crate::metrics::track_auth_rejection;

pub const NO_TOKEN_MESSAGE: &str = "Access denied. No token provided";
pub const INVALID_TOKEN_MESSAGE: &str = "Please log in";
pub const FORBIDDEN_MESSAGE: &str = "Access denied. Insufficient permission.";

/// Custom header checked before `Authorization`.
pub const AUTH_TOKEN_HEADER: &str = "x-auth-token";

/// The identity attached to an authenticated request.
///
/// Only the token's subject id and account type are carried. Handlers that
/// need mutable account state (disabled, school membership) re-read the user
/// row by [`AuthUser::user_id`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthUser {
    pub id: String,
    pub role: Role,
}

impl AuthUser {
    pub fn user_id(&self) -> Result<Uuid, AppError> {
        Uuid::parse_str(&self.id).map_err(|_| AppError::unauthorized(INVALID_TOKEN_MESSAGE))
    }

    pub fn is_super_admin(&self) -> bool {
        self.role.is_super_admin()
    }
}

/// Reads the identity left by [`require_auth`]. Routes outside a gate get `401`.
impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthUser>()
            .cloned()
            .ok_or_else(|| AppError::unauthorized(NO_TOKEN_MESSAGE))
    }
}

/// Verifies the bearer token and enforces a role allow-list.
///
/// Built once per route group at startup. An empty allow-list admits any
/// authenticated identity.
#[derive(Clone, Debug)]
pub struct Authenticator {
    jwt_config: Arc<JwtConfig>,
    allowed_roles: Arc<[Role]>,
}

impl Authenticator {
    pub fn new(jwt_config: Arc<JwtConfig>, allowed_roles: &[Role]) -> Self {
        Self {
            jwt_config,
            allowed_roles: allowed_roles.into(),
        }
    }

    pub fn allows(&self, role: Role) -> bool {
        self.allowed_roles.is_empty() || self.allowed_roles.contains(&role)
    }

    pub fn authenticate(&self, headers: &HeaderMap) -> Result<AuthUser, AppError> {
        let Some(token) = extract_token(headers) else {
            track_auth_rejection("missing_token");
            return Err(AppError::unauthorized(NO_TOKEN_MESSAGE));
        };

        let claims = verify_token(token, &self.jwt_config).map_err(|e| {
            debug!(error = %e, "Rejected bearer token");
            track_auth_rejection("invalid_token");
            AppError::unauthorized(INVALID_TOKEN_MESSAGE)
        })?;

        if !self.allows(claims.account_type) {
            debug!(
                user.id = %claims.id,
                user.role = %claims.account_type,
                "Role not permitted on this route"
            );
            track_auth_rejection("forbidden_role");
            return Err(AppError::forbidden(FORBIDDEN_MESSAGE));
        }

        Ok(AuthUser {
            id: claims.id,
            role: claims.account_type,
        })
    }
}

/// Route-group middleware: `middleware::from_fn_with_state(gate, require_auth)`.
pub async fn require_auth(
    State(gate): State<Authenticator>,
    mut req: Request,
    next: Next,
) -> Response {
    match gate.authenticate(req.headers()) {
        Ok(user) => {
            req.extensions_mut().insert(user);
            next.run(req).await
        }
        Err(err) => err.into_response(),
    }
}

/// Token from `x-auth-token`, else `Authorization`, minus an optional
/// `Bearer ` prefix. Blank values count as absent.
fn extract_token(headers: &HeaderMap) -> Option<&str> {
    [AUTH_TOKEN_HEADER, "authorization"]
        .into_iter()
        .filter_map(|name| headers.get(name).and_then(|v| v.to_str().ok()))
        .map(|raw| {
            let raw = raw.trim();
            raw.strip_prefix("Bearer ").unwrap_or(raw).trim()
        })
        .find(|token| !token.is_empty())
}
