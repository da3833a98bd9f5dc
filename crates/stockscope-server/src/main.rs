//! stockscope HTTP server

use anyhow::Context;
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use stockscope_core::InsightConfig;
use stockscope_server::{AppState, app_router};
use stockscope_utils::EnvSource;
use tokio::net::TcpListener;
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "stockscope-server")]
#[command(about = "Stock prices, curated news and answers over HTTP", long_about = None)]
struct Args {
    /// Address to bind
    #[arg(long, default_value = "127.0.0.1")]
    host: String,

    /// Port to listen on
    #[arg(long, default_value_t = 8000)]
    port: u16,

    /// Secrets file consulted after the process environment
    #[arg(long, default_value = ".env")]
    env_file: PathBuf,

    /// Emit logs as JSON
    #[arg(long)]
    log_json: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    if args.log_json {
        stockscope_utils::init_tracing_json();
    } else {
        stockscope_utils::init_tracing();
    }

    let source = EnvSource::with_file(&args.env_file)?;
    let config = InsightConfig::from_source(&source).context("invalid configuration")?;
    let state = Arc::new(AppState::from_config(&config)?);

    let addr = format!("{}:{}", args.host, args.port);
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    info!(%addr, "stockscope-server listening");

    axum::serve(listener, app_router(state)).await?;
    Ok(())
}
