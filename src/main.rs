use std::sync::Arc;

use anyhow::Context;
use tokio::net::TcpListener;

use batchdash::application::ports::BatchApi;
use batchdash::application::services::{
    ColorRegistry, DashboardService, StatsAggregator, ViewStatusBoard,
};
use batchdash::infrastructure::http::HttpBatchApi;
use batchdash::infrastructure::observability::{TracingConfig, init_tracing};
use batchdash::presentation::{AppState, Environment, Settings, create_router};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let environment = Environment::from_env().map_err(anyhow::Error::msg)?;
    let settings = Settings::load(environment).context("loading settings")?;
    let addr = settings.server.socket_addr()?;

    init_tracing(
        &TracingConfig::from_settings(&settings.logging, environment),
        addr,
    )
    .context("installing tracing subscriber")?;

    let api: Arc<dyn BatchApi> = Arc::new(
        HttpBatchApi::new(&settings.upstream.base_url, settings.upstream.timeout())
            .context("building upstream client")?,
    );
    tracing::info!(upstream = %settings.upstream.base_url, "Using batch API");

    let dashboard = Arc::new(DashboardService::new(
        api,
        StatsAggregator::new(settings.stats.average_basis),
        Arc::new(ColorRegistry::new()),
        Arc::new(ViewStatusBoard::new()),
    ));

    let router = create_router(AppState::new(dashboard, settings));

    tracing::info!("Listening on {}", addr);

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
    }
    tracing::info!("Shutting down");
}
