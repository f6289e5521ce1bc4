use clap::Parser;
use gatekeeper_server::api;
use gatekeeper_server::api::state::AppState;
use gatekeeper_server::config::AppConfig;
use gatekeeper_server::db;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "gatekeeper-server")]
#[command(about = "Presence-tracking backend for maritime shipyard beacon gateways")]
struct Args {
    /// Interface to bind the HTTP server to.
    #[arg(long, default_value = "0.0.0.0")]
    bind_host: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .json()
        .init();

    let args = Args::parse();
    let config = AppConfig::from_env()?;

    let pool = db::create_pool(&config).await?;
    db::run_migrations(&pool).await?;

    let port = config.port;
    let state = AppState::new(pool, config);

    let app = api::router(state);
    let listener = TcpListener::bind((args.bind_host.as_str(), port)).await?;

    info!(host = %args.bind_host, port, "server listening");

    axum::serve(listener, app).await?;

    Ok(())
}
