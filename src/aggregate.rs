//! Sequential per-site scraping and result assembly.
//!
//! Each site gets its own browser page: acquire, navigate, wait for the card
//! container, scroll out lazy content where the site needs it, snapshot the
//! HTML, extract, and release the page on every exit path. One site's fatal
//! failure fails the whole run — there is no partial-result fallback.

use crate::config::AppConfig;
use crate::error::ScrapeError;
use crate::extract::{self, Offer, SiteSpec};
use crate::renderer::{PageContext, Renderer};
use crate::scroll::{self, ScrollPlan};
use serde::Serialize;
use std::sync::Arc;
use std::time::Instant;
use tracing::{info, warn};

/// One bank's extracted listing.
#[derive(Debug, Clone, Serialize)]
pub struct SiteOffers {
    /// Bank name the results are keyed by.
    pub bank: String,
    #[serde(skip)]
    pub site: SiteSpec,
    pub offers: Vec<Offer>,
}

/// Runs every configured site extractor in order.
pub struct Aggregator {
    renderer: Arc<dyn Renderer>,
    sites: Vec<SiteSpec>,
    nav_timeout_ms: u64,
    selector_timeout_ms: u64,
    scroll: ScrollPlan,
}

impl Aggregator {
    pub fn new(renderer: Arc<dyn Renderer>, config: &AppConfig) -> Self {
        Self {
            renderer,
            sites: config.sites.clone(),
            nav_timeout_ms: config.nav_timeout_ms,
            selector_timeout_ms: config.selector_timeout_ms,
            scroll: config.scroll.clone(),
        }
    }

    /// Scrape every site sequentially and assemble results in site order.
    pub async fn collect(&self) -> Result<Vec<SiteOffers>, ScrapeError> {
        let mut results = Vec::with_capacity(self.sites.len());

        for site in &self.sites {
            let started = Instant::now();
            let offers = self.scrape_site(site).await?;
            info!(
                site = site.name,
                offers = offers.len(),
                elapsed_ms = started.elapsed().as_millis() as u64,
                "scraped listing"
            );
            results.push(SiteOffers {
                bank: site.name.to_string(),
                site: site.clone(),
                offers,
            });
        }

        Ok(results)
    }

    /// Scrape one site on a fresh page, releasing the page on every exit path.
    async fn scrape_site(&self, site: &SiteSpec) -> Result<Vec<Offer>, ScrapeError> {
        let mut page = self
            .renderer
            .new_context()
            .await
            .map_err(|e| ScrapeError::Session {
                message: e.to_string(),
            })?;

        let result = self.drive(page.as_mut(), site).await;

        if let Err(e) = page.close().await {
            warn!(site = site.name, "failed to close browser page: {e}");
        }

        result
    }

    async fn drive(
        &self,
        page: &mut dyn PageContext,
        site: &SiteSpec,
    ) -> Result<Vec<Offer>, ScrapeError> {
        page.navigate(site.url, self.nav_timeout_ms)
            .await
            .map_err(|e| ScrapeError::Navigation {
                site: site.name.to_string(),
                url: site.url.to_string(),
                message: e.to_string(),
            })?;

        page.wait_for_selector(site.wait_selector, self.selector_timeout_ms)
            .await
            .map_err(|_| ScrapeError::SelectorTimeout {
                site: site.name.to_string(),
                selector: site.wait_selector.to_string(),
                timeout_ms: self.selector_timeout_ms,
            })?;

        if site.lazy_load {
            scroll::exhaust(&*page, &self.scroll)
                .await
                .map_err(|e| ScrapeError::ScrollTimeout {
                    site: site.name.to_string(),
                    message: e.to_string(),
                })?;
        }

        let html = page.html().await.map_err(|e| ScrapeError::Session {
            message: e.to_string(),
        })?;

        Ok(extract::extract_offers(&html, site))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::NavigationResult;
    use async_trait::async_trait;
    use std::collections::VecDeque;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    struct FakePage {
        html: String,
        fail_wait: bool,
        closed: Arc<AtomicUsize>,
    }

    #[async_trait]
    impl PageContext for FakePage {
        async fn navigate(&mut self, url: &str, _timeout_ms: u64) -> anyhow::Result<NavigationResult> {
            Ok(NavigationResult {
                final_url: url.to_string(),
                load_time_ms: 1,
            })
        }
        async fn wait_for_selector(&self, selector: &str, _timeout_ms: u64) -> anyhow::Result<()> {
            if self.fail_wait {
                anyhow::bail!("selector {selector:?} never appeared");
            }
            Ok(())
        }
        async fn scroll_height(&self) -> anyhow::Result<f64> {
            Ok(0.0)
        }
        async fn scroll_by(&self, _delta: f64) -> anyhow::Result<()> {
            Ok(())
        }
        async fn html(&self) -> anyhow::Result<String> {
            Ok(self.html.clone())
        }
        async fn url(&self) -> anyhow::Result<String> {
            Ok(String::new())
        }
        async fn close(self: Box<Self>) -> anyhow::Result<()> {
            self.closed.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }
    }

    /// Hands out one scripted page per `new_context` call.
    struct FakeRenderer {
        pages: Mutex<VecDeque<FakePage>>,
    }

    impl FakeRenderer {
        fn new(pages: Vec<FakePage>) -> Self {
            Self {
                pages: Mutex::new(pages.into()),
            }
        }
    }

    #[async_trait]
    impl Renderer for FakeRenderer {
        async fn new_context(&self) -> anyhow::Result<Box<dyn PageContext>> {
            let page = self
                .pages
                .lock()
                .unwrap()
                .pop_front()
                .ok_or_else(|| anyhow::anyhow!("no scripted page left"))?;
            Ok(Box::new(page))
        }
        async fn shutdown(&self) -> anyhow::Result<()> {
            Ok(())
        }
        fn active_contexts(&self) -> usize {
            0
        }
    }

    fn demo_site(name: &'static str) -> SiteSpec {
        SiteSpec {
            name,
            url: "https://bank.example/offers",
            origin: "https://bank.example",
            card_selector: ".card",
            wait_selector: ".card",
            lazy_load: true,
            image_selector: None,
            title_selector: Some(".head h2"),
            description_selector: None,
            link: None,
            extras: Vec::new(),
        }
    }

    fn config_for(sites: Vec<SiteSpec>) -> AppConfig {
        AppConfig {
            sites,
            ..AppConfig::default()
        }
    }

    fn page(closed: &Arc<AtomicUsize>, html: &str, fail_wait: bool) -> FakePage {
        FakePage {
            html: html.to_string(),
            fail_wait,
            closed: Arc::clone(closed),
        }
    }

    #[tokio::test]
    async fn collects_sites_in_configured_order() {
        let closed = Arc::new(AtomicUsize::new(0));
        let renderer: Arc<dyn Renderer> = Arc::new(FakeRenderer::new(vec![
            page(&closed, r#"<div class="card"><div class="head"><h2>A1</h2></div></div>"#, false),
            page(&closed, r#"<div class="card"><div class="head"><h2>B1</h2></div></div>
                             <div class="card"><div class="head"><h2>B2</h2></div></div>"#, false),
        ]));

        let aggregator = Aggregator::new(
            renderer,
            &config_for(vec![demo_site("Alpha Bank"), demo_site("Beta Bank")]),
        );
        let results = aggregator.collect().await.unwrap();

        assert_eq!(results.len(), 2);
        assert_eq!(results[0].bank, "Alpha Bank");
        assert_eq!(results[0].offers.len(), 1);
        assert_eq!(results[1].bank, "Beta Bank");
        assert_eq!(results[1].offers.len(), 2);
        assert_eq!(closed.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn one_failed_site_fails_the_run() {
        let closed = Arc::new(AtomicUsize::new(0));
        let renderer: Arc<dyn Renderer> = Arc::new(FakeRenderer::new(vec![
            page(&closed, r#"<div class="card"><div class="head"><h2>A1</h2></div></div>"#, false),
            page(&closed, "", true),
        ]));

        let aggregator = Aggregator::new(
            renderer,
            &config_for(vec![demo_site("Alpha Bank"), demo_site("Beta Bank")]),
        );
        let err = aggregator.collect().await.unwrap_err();

        assert!(matches!(err, ScrapeError::SelectorTimeout { .. }));
        // Both pages were still released, including the failing one.
        assert_eq!(closed.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn session_acquisition_failure_is_a_session_error() {
        let renderer: Arc<dyn Renderer> = Arc::new(FakeRenderer::new(Vec::new()));
        let aggregator =
            Aggregator::new(renderer, &config_for(vec![demo_site("Alpha Bank")]));

        let err = aggregator.collect().await.unwrap_err();
        assert!(matches!(err, ScrapeError::Session { .. }));
    }
}
