//! Renderer abstraction for browser-based page rendering.
//!
//! Defines the `Renderer` and `PageContext` traits that abstract over the
//! browser engine (Chromium via chromiumoxide). Extraction never touches
//! these traits — it runs on the HTML snapshot a context hands back — so
//! everything downstream of `html()` is testable without a browser.

pub mod chromium;

use anyhow::Result;
use async_trait::async_trait;
use serde::Serialize;

/// Result of navigating to a URL.
#[derive(Debug, Clone, Serialize)]
pub struct NavigationResult {
    /// The final URL after any redirects.
    pub final_url: String,
    /// Time taken to load the page in milliseconds.
    pub load_time_ms: u64,
}

/// A browser engine that can create page contexts.
#[async_trait]
pub trait Renderer: Send + Sync {
    /// Open a fresh page (tab) with no shared navigation state.
    async fn new_context(&self) -> Result<Box<dyn PageContext>>;
    /// Shut down the browser engine.
    async fn shutdown(&self) -> Result<()>;
    /// Number of currently open contexts.
    fn active_contexts(&self) -> usize;
}

/// A single browser page for rendering one site's listing.
#[async_trait]
pub trait PageContext: Send + Sync {
    /// Navigate to a URL and wait for the load to complete, with a timeout.
    async fn navigate(&mut self, url: &str, timeout_ms: u64) -> Result<NavigationResult>;
    /// Wait until an element matching `selector` exists, with a timeout.
    async fn wait_for_selector(&self, selector: &str, timeout_ms: u64) -> Result<()>;
    /// Current total scrollable height of the page in pixels.
    async fn scroll_height(&self) -> Result<f64>;
    /// Scroll the page down by `delta` pixels.
    async fn scroll_by(&self, delta: f64) -> Result<()>;
    /// Full serialized HTML of the current page state.
    async fn html(&self) -> Result<String>;
    /// The page's current URL.
    async fn url(&self) -> Result<String>;
    /// Close this page and release its browser-side resources.
    async fn close(self: Box<Self>) -> Result<()>;
}
