use dotenvy::dotenv;
use skillswap::logging::init_tracing;
use skillswap::metrics::{init_metrics, metrics_app};
use skillswap::router::init_router;
use skillswap::state::init_app_state;
use skillswap_config::ServerConfig;
use skillswap_db::run_migrations;
use tracing::{error, info};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    init_tracing()?;

    let server_config = ServerConfig::from_env();

    if let Some(handle) = init_metrics()?
        && let Some(metrics_addr) = server_config.metrics_addr()
    {
        tokio::spawn(async move {
            match tokio::net::TcpListener::bind(metrics_addr).await {
                Ok(listener) => {
                    info!(addr = %metrics_addr, "Metrics server listening");
                    if let Err(e) = axum::serve(listener, metrics_app(handle)).await {
                        error!(error = %e, "Metrics server stopped");
                    }
                }
                Err(e) => error!(addr = %metrics_addr, error = %e, "Failed to bind metrics server"),
            }
        });
    }

    let state = init_app_state().await?;
    run_migrations(&state.db).await?;

    let app = init_router(state);

    let addr = server_config.addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!(addr = %addr, "🚀 Server running");
    info!("📚 Swagger UI available at http://{}/swagger-ui", addr);
    info!("📖 Scalar UI available at http://{}/scalar", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
