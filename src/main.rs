use anyhow::Context;
use std::net::SocketAddr;
use vaporval::{api, config::Config};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing_subscriber::filter::LevelFilter::INFO.into()),
        )
        .init();

    let config = Config::from_env().context("configuration error")?;
    let port = config.port;
    let irr_method = config.irr_method;

    // Market table and seed deals
    let state = api::AppState::from_config(config).context("failed to load market data")?;
    tracing::info!(
        "Loaded {} markets, {} deals (IRR method: {:?})",
        state.markets.len(),
        state.deals.read().await.len(),
        irr_method
    );

    let app = api::create_router(state);

    let addr = SocketAddr::from(([127, 0, 0, 1], port));
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind to {}", addr))?;

    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, app).await.context("server error")?;
    Ok(())
}
