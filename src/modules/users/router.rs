use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

use super::controller::{create_member, delete_member, get_member, get_members};

/// Mounted under `/schools/{school_id}/users`.
pub fn init_users_router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_member).get(get_members))
        .route("/{id}", get(get_member).delete(delete_member))
}
