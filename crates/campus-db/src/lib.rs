//! # Campus DB
//!
//! Database pool and the tenant-scoped query composer for the Campus API.
//!
//! - [`scoped`]: [`Table`] descriptors and [`ScopedQuery`], a read query that
//!   always carries its mandatory predicates and renders through
//!   `sqlx::QueryBuilder`
//! - [`api_query`]: [`ApiQuery`], which layers query-string filters, sort
//!   terms, field projection and pagination on top of a [`ScopedQuery`]
//!
//! # Example
//!
//! ```ignore
//! use campus_db::{ApiQuery, ScopedQuery};
//!
//! let base = ScopedQuery::new(CLASSES)
//!     .where_eq("school_id", school_id)
//!     .not_deleted();
//!
//! let composed = ApiQuery::new(base, &params)
//!     .filter()?
//!     .sort()?
//!     .limit_fields()?
//!     .paginate();
//!
//! let rows = composed.into_query().fetch_all(&pool).await?;
//! ```

pub mod api_query;
pub mod error;
pub mod scoped;

use anyhow::Context;
use sqlx::postgres::PgPoolOptions;
use tracing::info;

use campus_config::DatabaseConfig;

pub use api_query::{ApiQuery, QueryParams, RESERVED_KEYS};
pub use error::QueryError;
pub use scoped::{BindValue, ColumnRef, ScopedQuery, SortDirection, Table};

// Re-export PgPool for convenience
pub use sqlx::PgPool;

/// Creates the PostgreSQL connection pool.
///
/// # Errors
///
/// Fails when `DATABASE_URL` is unset or the first connection cannot be
/// established.
pub async fn init_db_pool(config: &DatabaseConfig) -> anyhow::Result<PgPool> {
    let url = config
        .url
        .as_deref()
        .context("DATABASE_URL must be set")?;

    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .connect(url)
        .await
        .context("Failed to connect to database")?;

    info!(max_connections = config.max_connections, "Database pool ready");

    Ok(pool)
}
