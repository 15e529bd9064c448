//! Chromium-backed renderer using chromiumoxide.
//!
//! One headless Chromium process is launched up front; each context is an
//! independent page (tab), so cookies and navigation state from one site
//! never bleed into another extractor's run.

use crate::renderer::{NavigationResult, PageContext, Renderer};
use anyhow::{Context, Result};
use async_trait::async_trait;
use chromiumoxide::browser::{Browser, BrowserConfig};
use chromiumoxide::page::Page;
use futures::StreamExt;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

/// How often to re-check for a pending selector.
const SELECTOR_POLL_INTERVAL: Duration = Duration::from_millis(250);

/// Renderer backed by a single headless Chromium process.
pub struct ChromiumRenderer {
    browser: Mutex<Option<Browser>>,
    handler_task: JoinHandle<()>,
    active: Arc<AtomicUsize>,
}

impl ChromiumRenderer {
    /// Launch a headless Chromium process and start draining its event loop.
    pub async fn launch() -> Result<Self> {
        let config = BrowserConfig::builder()
            .window_size(1400, 900)
            .build()
            .map_err(anyhow::Error::msg)
            .context("building browser config")?;

        let (browser, mut handler) = Browser::launch(config)
            .await
            .context("launching headless Chromium")?;

        // The handler stream must be polled for the browser to make progress.
        let handler_task = tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                if let Err(e) = event {
                    warn!("browser event loop error: {e}");
                    break;
                }
            }
        });

        Ok(Self {
            browser: Mutex::new(Some(browser)),
            handler_task,
            active: Arc::new(AtomicUsize::new(0)),
        })
    }
}

#[async_trait]
impl Renderer for ChromiumRenderer {
    async fn new_context(&self) -> Result<Box<dyn PageContext>> {
        let guard = self.browser.lock().await;
        let browser = guard
            .as_ref()
            .ok_or_else(|| anyhow::anyhow!("browser already shut down"))?;

        let page = browser
            .new_page("about:blank")
            .await
            .context("opening browser page")?;

        self.active.fetch_add(1, Ordering::SeqCst);

        Ok(Box::new(ChromiumContext {
            page,
            active: Arc::clone(&self.active),
        }))
    }

    async fn shutdown(&self) -> Result<()> {
        if let Some(mut browser) = self.browser.lock().await.take() {
            browser.close().await.context("closing browser")?;
            browser.wait().await.context("waiting for browser exit")?;
        }
        self.handler_task.abort();
        Ok(())
    }

    fn active_contexts(&self) -> usize {
        self.active.load(Ordering::SeqCst)
    }
}

/// A single Chromium page.
pub struct ChromiumContext {
    page: Page,
    active: Arc<AtomicUsize>,
}

#[async_trait]
impl PageContext for ChromiumContext {
    async fn navigate(&mut self, url: &str, timeout_ms: u64) -> Result<NavigationResult> {
        let started = Instant::now();

        let load = async {
            self.page.goto(url).await.context("navigation request")?;
            self.page
                .wait_for_navigation()
                .await
                .context("waiting for page load")?;
            Ok::<_, anyhow::Error>(())
        };

        tokio::time::timeout(Duration::from_millis(timeout_ms), load)
            .await
            .map_err(|_| anyhow::anyhow!("navigation to {url} timed out after {timeout_ms} ms"))??;

        let final_url = self
            .page
            .url()
            .await
            .ok()
            .flatten()
            .unwrap_or_else(|| url.to_string());

        let result = NavigationResult {
            final_url,
            load_time_ms: started.elapsed().as_millis() as u64,
        };
        debug!("loaded {url} in {} ms", result.load_time_ms);
        Ok(result)
    }

    async fn wait_for_selector(&self, selector: &str, timeout_ms: u64) -> Result<()> {
        let deadline = Instant::now() + Duration::from_millis(timeout_ms);

        loop {
            if self.page.find_element(selector).await.is_ok() {
                return Ok(());
            }
            if Instant::now() >= deadline {
                anyhow::bail!("selector {selector:?} did not appear within {timeout_ms} ms");
            }
            tokio::time::sleep(SELECTOR_POLL_INTERVAL).await;
        }
    }

    async fn scroll_height(&self) -> Result<f64> {
        let result = self
            .page
            .evaluate("document.body ? document.body.scrollHeight : 0")
            .await
            .context("reading scroll height")?;
        Ok(result.value().and_then(|v| v.as_f64()).unwrap_or(0.0))
    }

    async fn scroll_by(&self, delta: f64) -> Result<()> {
        self.page
            .evaluate(format!("window.scrollBy(0, {delta})"))
            .await
            .context("scrolling page")?;
        Ok(())
    }

    async fn html(&self) -> Result<String> {
        self.page.content().await.context("serializing page HTML")
    }

    async fn url(&self) -> Result<String> {
        Ok(self
            .page
            .url()
            .await
            .context("reading page URL")?
            .unwrap_or_default())
    }

    async fn close(self: Box<Self>) -> Result<()> {
        let result = self.page.close().await.context("closing page");
        self.active.fetch_sub(1, Ordering::SeqCst);
        result
    }
}
