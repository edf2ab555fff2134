use nba_pbp_server::config::Config;
use nba_pbp_server::handler::{AppState, build_router};
use tracing::info;
use tracing_subscriber::EnvFilter;

type Error = Box<dyn std::error::Error + Send + Sync>;

#[tokio::main]
async fn main() -> Result<(), Error> {
    // Structured JSON logs, level from RUST_LOG
    let _ = tracing_subscriber::fmt()
        .json()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_current_span(false)
        .with_target(false)
        .with_ansi(false)
        .try_init();

    let config = Config::from_env()?;
    info!(
        listen_addr = %config.listen_addr,
        games_url = %config.games_url,
        nba_base_url = %config.nba_base_url,
        timeout_secs = config.upstream_timeout.as_secs(),
        "Loaded configuration"
    );

    let app = build_router(AppState::from_config(&config));
    let listener = tokio::net::TcpListener::bind(config.listen_addr).await?;
    info!(listen_addr = %config.listen_addr, "pbp server listening");
    axum::serve(listener, app).await?;
    Ok(())
}
