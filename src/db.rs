//! Helpers shared by the entity services.

use anyhow::anyhow;
use serde_json::Value;
use sqlx::PgPool;
use tracing::{debug, error};

use campus_core::{AppError, PaginationMeta};
use campus_db::{ApiQuery, QueryParams, ScopedQuery};

/// Runs a list request: composes `base` with the query string, counts the
/// matching rows and fetches the requested page.
pub async fn fetch_page(
    db: &PgPool,
    base: ScopedQuery,
    params: &QueryParams,
) -> Result<(Vec<Value>, PaginationMeta), AppError> {
    let composed = ApiQuery::new(base, params)
        .filter()
        .and_then(ApiQuery::sort)
        .and_then(ApiQuery::limit_fields)
        .map_err(AppError::bad_request)?
        .paginate();

    let page = composed.page();
    let query = composed.into_query();

    let total = query.count(db).await.map_err(|e| {
        error!(error = %e, table = query.table().name, "Database error counting rows");
        AppError::from(e)
    })?;

    let rows = query.fetch_all(db).await.map_err(|e| {
        error!(error = %e, table = query.table().name, "Database error fetching rows");
        AppError::from(e)
    })?;

    debug!(
        table = query.table().name,
        total = %total,
        returned = %rows.len(),
        page = %page.page,
        "Rows fetched"
    );

    Ok((rows, PaginationMeta::new(&page, total)))
}

/// Maps an INSERT/UPDATE failure: unique violations become `409` with
/// `conflict_message`, dangling references become `400`.
pub fn map_write_error(e: sqlx::Error, conflict_message: &str) -> AppError {
    if let sqlx::Error::Database(db_err) = &e {
        if db_err.is_unique_violation() {
            return AppError::conflict(anyhow!(conflict_message.to_string()));
        }
        if db_err.is_foreign_key_violation() {
            return AppError::bad_request(anyhow!("Referenced record does not exist"));
        }
    }
    error!(error = %e, "Database error writing row");
    AppError::from(e)
}
