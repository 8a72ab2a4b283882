use anyhow::Result;
use tavily_search::api::{self, AppState};
use tavily_search::{SearchClient, SearchConfig};
use tokio_util::sync::CancellationToken;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("tavily_search=debug,tower_http=info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let config = SearchConfig::from_env()?;
    info!(base_url = %config.base_url, "Loaded configuration");

    let shutdown = CancellationToken::new();
    let state = AppState::new(SearchClient::from_config(&config), shutdown.clone());
    let app = api::router(state);

    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    info!("Tavily search proxy running on http://{}", config.bind_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            tokio::signal::ctrl_c().await.ok();
            info!("Shutting down, cancelling in-flight searches");
            shutdown.cancel();
        })
        .await?;
    Ok(())
}
