//! HTTP surface — a single `GET /` endpoint serving the aggregated report.
//!
//! The handler triggers a full scrape on every request; nothing is cached
//! between requests. A fatal scrape error surfaces as a plain-text 502.

use crate::aggregate::Aggregator;
use crate::config::AppConfig;
use crate::error::ScrapeError;
use crate::renderer::Renderer;
use crate::report;
use anyhow::{Context, Result};
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use axum::routing::get;
use axum::Router;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing::{error, info};

/// Shared request-handler state, built once at startup.
struct App {
    aggregator: Aggregator,
}

/// Build the router for the given configuration and browser engine.
pub fn router(config: &AppConfig, renderer: Arc<dyn Renderer>) -> Router {
    let app = Arc::new(App {
        aggregator: Aggregator::new(renderer, config),
    });

    Router::new()
        .route("/", get(offers_report))
        .layer(TraceLayer::new_for_http())
        .with_state(app)
}

/// Bind the configured port and serve until interrupted.
pub async fn serve(config: AppConfig, renderer: Arc<dyn Renderer>) -> Result<()> {
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let app = router(&config, renderer);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("binding {addr}"))?;
    info!("listening on http://{addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("serving HTTP")
}

async fn shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
    info!("received shutdown signal");
}

async fn offers_report(State(app): State<Arc<App>>) -> Result<Html<String>, ReportError> {
    let results = app.aggregator.collect().await?;
    Ok(Html(report::render(&results)))
}

/// Wrapper so fatal scrape errors become HTTP responses.
struct ReportError(ScrapeError);

impl From<ScrapeError> for ReportError {
    fn from(err: ScrapeError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ReportError {
    fn into_response(self) -> Response {
        error!("aggregation failed: {}", self.0);
        (StatusCode::BAD_GATEWAY, format!("scrape failed: {}", self.0)).into_response()
    }
}
