//! Tracing setup and request logging.
//!
//! # Environment Variables
//!
//! - `LOG_LEVEL`: console filter directive (falls back to `RUST_LOG`, then
//!   `campus=info,tower_http=warn`)
//! - `LOG_DIR`: directory for the daily-rolling JSON log (default `storage/logs`)

use std::time::Instant;

use anyhow::Context;
use axum::{
    extract::{MatchedPath, Request},
    middleware::Next,
    response::Response,
};
use tracing::{error, info, warn};
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{EnvFilter, Layer, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Logs every request with a generated `request_id`, its matched route,
/// status and latency. 4xx log at `warn`, 5xx at `error`.
pub async fn logging_middleware(req: Request, next: Next) -> Response {
    let start = Instant::now();
    let method = req.method().clone();
    let path = req
        .extensions()
        .get::<MatchedPath>()
        .map(|p| p.as_str().to_string())
        .unwrap_or_else(|| req.uri().path().to_string());
    let request_id = uuid::Uuid::new_v4().to_string();

    info!(request_id = %request_id, method = %method, path = %path, "Incoming request");

    let response = next.run(req).await;
    let status = response.status().as_u16();
    let latency_ms = start.elapsed().as_millis();

    match status {
        400..=499 => warn!(
            request_id = %request_id, method = %method, path = %path,
            status, latency_ms = %latency_ms, "Client error"
        ),
        500..=599 => error!(
            request_id = %request_id, method = %method, path = %path,
            status, latency_ms = %latency_ms, "Server error"
        ),
        _ => info!(
            request_id = %request_id, method = %method, path = %path,
            status, latency_ms = %latency_ms, "Request completed"
        ),
    }

    response
}

pub fn init_tracing() -> anyhow::Result<()> {
    let log_dir = std::env::var("LOG_DIR").unwrap_or_else(|_| "storage/logs".to_string());
    std::fs::create_dir_all(&log_dir).context("Failed to create logs directory")?;

    let console_filter = std::env::var("LOG_LEVEL")
        .ok()
        .and_then(|level| EnvFilter::try_new(level).ok())
        .or_else(|| EnvFilter::try_from_default_env().ok())
        .unwrap_or_else(|| {
            EnvFilter::new(format!(
                "{}=info,campus_db=info,tower_http=warn",
                env!("CARGO_CRATE_NAME")
            ))
        });

    let console_layer = fmt::layer()
        .with_target(false)
        .with_file(true)
        .with_line_number(true)
        .compact()
        .with_filter(console_filter);

    let json_appender = RollingFileAppender::new(Rotation::DAILY, &log_dir, "campus.json");
    let json_layer = fmt::layer()
        .json()
        .with_writer(json_appender)
        .with_current_span(true)
        .with_span_list(true)
        .with_filter(EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(console_layer)
        .with(json_layer)
        .try_init()
        .context("Failed to install tracing subscriber")?;

    Ok(())
}
