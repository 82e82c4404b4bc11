use axum::{
    Router, middleware,
    routing::{get, patch, post},
};

use crate::middleware::auth::{Authenticator, require_auth};
use crate::state::AppState;

use super::controller::{deactivate_admin, login, profile, register_super_admin};

/// `any_user` gates the profile route, `super_admin` the admin management routes.
pub fn init_auth_router(any_user: Authenticator, super_admin: Authenticator) -> Router<AppState> {
    let public = Router::new()
        .route("/register-super-admin", post(register_super_admin))
        .route("/login", post(login));

    let authenticated = Router::new()
        .route("/profile", get(profile))
        .route_layer(middleware::from_fn_with_state(any_user, require_auth));

    let super_admin_only = Router::new()
        .route("/admins/{id}/deactivate", patch(deactivate_admin))
        .route_layer(middleware::from_fn_with_state(super_admin, require_auth));

    public.merge(authenticated).merge(super_admin_only)
}
