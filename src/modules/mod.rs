//! Feature modules. Each has a `controller`, `service` and `router`.

pub mod auth;
pub mod classes;
pub mod schools;
pub mod subjects;
pub mod users;

use anyhow::anyhow;
use axum::extract::{Query, rejection::QueryRejection};

use campus_core::AppError;
use campus_db::QueryParams;

/// Unwraps the query string of a list endpoint, turning a malformed one into `400`.
pub fn query_params(
    params: Result<Query<QueryParams>, QueryRejection>,
) -> Result<QueryParams, AppError> {
    params
        .map(|Query(params)| params)
        .map_err(|e| AppError::bad_request(anyhow!("Invalid query parameters: {}", e.body_text())))
}
