//! Uniform success envelope.
//!
//! Single-record endpoints answer with [`ApiResponse`], list endpoints with
//! [`ListResponse`]. Errors use the shape produced by
//! [`AppError`](crate::AppError).

use serde::Serialize;
use utoipa::ToSchema;

use crate::pagination::PaginationMeta;

#[derive(Debug, Serialize, ToSchema)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub message: String,
    pub data: T,
}

impl<T> ApiResponse<T> {
    pub fn ok(message: impl Into<String>, data: T) -> Self {
        Self {
            success: true,
            message: message.into(),
            data,
        }
    }
}

/// A page of composed rows. Row shape depends on the `fields` parameter,
/// so rows are carried as JSON objects.
#[derive(Debug, Serialize, ToSchema)]
pub struct ListResponse {
    pub success: bool,
    pub message: String,
    #[schema(value_type = Vec<Object>)]
    pub data: Vec<serde_json::Value>,
    pub meta: PaginationMeta,
}

impl ListResponse {
    pub fn ok(message: impl Into<String>, data: Vec<serde_json::Value>, meta: PaginationMeta) -> Self {
        Self {
            success: true,
            message: message.into(),
            data,
            meta,
        }
    }
}
