use anyhow::{Context, Result};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use taiex_analyzer::commands::{router, AppState};
use taiex_analyzer::config::{load_config, DEFAULT_CONFIG_PATH};
use taiex_analyzer::logging::init_tracing;
use taiex_analyzer::stock_api::{AnalysisService, SeriesFetcher, YahooFetcher};

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing()?;

    let config_path = std::env::var("TAIEX_CONFIG")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from(DEFAULT_CONFIG_PATH));
    let config = load_config(&config_path)?;

    let fetcher: Arc<dyn SeriesFetcher> = Arc::new(
        YahooFetcher::new(
            config.fetcher.base_url.clone(),
            config.fetcher.timeout(),
            config.fetcher.retries,
        )
        .context("failed to build HTTP client")?,
    );

    let state = AppState {
        service: AnalysisService::new(fetcher, config.analysis.clone()),
    };
    let app = router(state);

    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port)
        .parse()
        .with_context(|| {
            format!(
                "invalid HOST:PORT configuration: {}:{}",
                config.server.host, config.server.port
            )
        })?;

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    tracing::info!("taiex-analyzer v{} listening on {}", env!("CARGO_PKG_VERSION"), addr);

    axum::serve(listener, app).await.context("server error")?;
    Ok(())
}
