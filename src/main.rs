use anyhow::Context;
use dotenvy::dotenv;
use tracing::info;

use campus::campus_config::ServerConfig;
use campus::logging::init_tracing;
use campus::metrics::{init_metrics, metrics_app};
use campus::router::init_router;
use campus::state::init_app_state;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    init_tracing()?;

    let metrics_handle = init_metrics()?;
    let state = init_app_state().await?;

    let mut app = init_router(state);
    if let Some(handle) = metrics_handle {
        app = app.merge(metrics_app(handle));
    }

    let server = ServerConfig::from_env();
    let listener = tokio::net::TcpListener::bind(server.addr())
        .await
        .with_context(|| format!("Failed to bind {}", server.addr()))?;

    info!(addr = %server.addr(), "Server running");
    info!("Swagger UI available at /swagger-ui, Scalar at /scalar");

    axum::serve(listener, app).await.context("Server error")?;
    Ok(())
}
