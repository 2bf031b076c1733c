use anyhow::Context;
use clap::Parser;
use hn_trends::{routes, ApiConfig, HnClient, TrendsService};
use std::env;
use std::sync::Arc;
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "hn-trends", about = "Top-word trends from Hacker News story titles")]
struct Args {
    /// API origin; falls back to the BASE_URL environment variable, then to
    /// the public Hacker News API.
    #[arg(long)]
    base_url: Option<String>,

    /// Address to serve the HTTP API on.
    #[arg(long, default_value = "127.0.0.1:3000")]
    bind: String,

    /// Per-request timeout in seconds.
    #[arg(long, default_value_t = 30)]
    timeout: u64,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let args = Args::parse();

    let mut config = ApiConfig::default();
    if let Some(base_url) = args.base_url.or_else(|| env::var("BASE_URL").ok()) {
        config.base_url = base_url;
    }
    config.timeout_seconds = args.timeout;

    info!("Starting hn-trends against {}", config.base_url);

    let client = HnClient::new(&config).context("failed to build Hacker News client")?;
    let service = Arc::new(TrendsService::new(Arc::new(client)));
    let app = routes::router(service);

    let listener = tokio::net::TcpListener::bind(&args.bind)
        .await
        .with_context(|| format!("failed to bind {}", args.bind))?;
    info!("Listening on http://{}", args.bind);
    axum::serve(listener, app).await?;

    Ok(())
}
