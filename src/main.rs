//! Offerdeck binary — parse flags, launch the browser engine, serve reports.

use anyhow::{Context, Result};
use clap::Parser;
use offerdeck::config::AppConfig;
use offerdeck::renderer::chromium::ChromiumRenderer;
use offerdeck::renderer::Renderer;
use offerdeck::server;
use std::sync::Arc;
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "offerdeck", version, about = "Bank promotional-offer aggregator")]
struct Args {
    /// Port for the report endpoint.
    #[arg(long, env = "PORT", default_value_t = 3000)]
    port: u16,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("offerdeck=info".parse().unwrap()),
        )
        .init();

    info!("starting offerdeck v{}", env!("CARGO_PKG_VERSION"));

    let config = AppConfig::with_port(args.port);

    let renderer = Arc::new(
        ChromiumRenderer::launch()
            .await
            .context("starting browser engine")?,
    );
    let engine: Arc<dyn Renderer> = renderer.clone();

    let result = server::serve(config, engine).await;

    // Reap the browser process regardless of how serving ended.
    renderer.shutdown().await.ok();

    result
}
