use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use blog_api::app::{router, AppState};
use blog_api::config::AppConfig;
use blog_api::database;

#[derive(Parser)]
#[command(name = "blog-api")]
#[command(about = "REST backend for a blog platform with cookie-based sessions")]
#[command(version)]
struct Args {
    #[arg(long, help = "Port to listen on (overrides PORT)")]
    port: Option<u16>,

    #[arg(long, help = "PostgreSQL connection string (overrides DATABASE_URL)")]
    database_url: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present so cargo run picks up ACCESS_TOKEN_SECRET, DATABASE_URL, etc.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();

    // Missing signing secret is fatal here, before anything is served
    let mut config = AppConfig::from_env().context("invalid configuration")?;
    if let Some(port) = args.port {
        config.server.port = port;
    }
    if let Some(url) = args.database_url {
        config.database.url = Some(url);
    }
    tracing::info!("Starting Blog API in {:?} mode", config.environment);

    let store = database::connect(&config)
        .await
        .context("failed to open storage backend")?;

    let bind_addr = format!("0.0.0.0:{}", config.server.port);
    let app = router(AppState::new(config, store));

    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", bind_addr))?;

    tracing::info!("Blog API listening on http://{}", bind_addr);

    axum::serve(listener, app).await.context("server error")?;
    Ok(())
}
