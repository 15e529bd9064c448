//! End-to-end pipeline tests: a scripted browser engine driven through
//! aggregation, report rendering, and the HTTP surface.

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use offerdeck::config::AppConfig;
use offerdeck::extract::{ExtraRule, ExtraSpec, SiteSpec};
use offerdeck::renderer::{NavigationResult, PageContext, Renderer};
use offerdeck::server;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use tower::ServiceExt;

struct ScriptedPage {
    html: String,
    fail_wait: bool,
}

#[async_trait]
impl PageContext for ScriptedPage {
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
        Ok(())
    }
}

struct ScriptedRenderer {
    pages: Mutex<VecDeque<ScriptedPage>>,
}

impl ScriptedRenderer {
    fn new(pages: Vec<ScriptedPage>) -> Arc<dyn Renderer> {
        Arc::new(Self {
            pages: Mutex::new(pages.into()),
        })
    }
}

#[async_trait]
impl Renderer for ScriptedRenderer {
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

fn demo_site(name: &'static str, lazy_load: bool) -> SiteSpec {
    SiteSpec {
        name,
        url: "https://bank.example/offers",
        origin: "https://bank.example",
        card_selector: ".card",
        wait_selector: ".card",
        lazy_load,
        image_selector: Some(".media img"),
        title_selector: Some(".head h2"),
        description_selector: Some(".body p"),
        link: None,
        extras: vec![ExtraSpec {
            key: "expiry",
            label: "Expiry",
            rule: ExtraRule::Text(".expiry"),
        }],
    }
}

fn config_for(sites: Vec<SiteSpec>) -> AppConfig {
    AppConfig {
        sites,
        ..AppConfig::default()
    }
}

fn get_root() -> Request<Body> {
    Request::builder().uri("/").body(Body::empty()).unwrap()
}

#[tokio::test]
async fn report_covers_every_bank_and_defaults_missing_fields() {
    let renderer = ScriptedRenderer::new(vec![
        ScriptedPage {
            html: r#"
                <div class="card">
                  <div class="media"><img src="/img/a.png"></div>
                  <div class="head"><h2>Full card</h2></div>
                  <div class="body"><p>Everything present.</p></div>
                  <span class="expiry">31 Dec</span>
                </div>
                <div class="card">
                  <div class="head"><h2>Sparse card</h2></div>
                </div>"#
                .to_string(),
            fail_wait: false,
        },
        ScriptedPage {
            html: r#"
                <div class="card">
                  <div class="head"><h2>Lazy card</h2></div>
                </div>"#
                .to_string(),
            fail_wait: false,
        },
    ]);

    let config = config_for(vec![
        demo_site("Alpha Bank", false),
        demo_site("Beta Bank", true),
    ]);

    let response = server::router(&config, renderer)
        .oneshot(get_root())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let content_type = response
        .headers()
        .get("content-type")
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string();
    assert!(content_type.starts_with("text/html"));

    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let html = String::from_utf8(body.to_vec()).unwrap();

    assert!(html.contains("<h1>Alpha Bank Offers</h1>"));
    assert!(html.contains("<h1>Beta Bank Offers</h1>"));
    assert!(html.contains("Full card"));
    assert!(html.contains("Sparse card"));
    assert!(html.contains("Lazy card"));
    // Root-relative image resolved against the site origin.
    assert!(html.contains(r#"src="https://bank.example/img/a.png""#));
    // The sparse card's missing description rendered as an empty cell, not an error.
    assert!(html.contains("<td>Sparse card</td><td></td>"));
}

#[tokio::test]
async fn one_bank_failing_fails_the_whole_response() {
    let renderer = ScriptedRenderer::new(vec![
        ScriptedPage {
            html: r#"<div class="card"><div class="head"><h2>Fine</h2></div></div>"#.to_string(),
            fail_wait: false,
        },
        ScriptedPage {
            html: String::new(),
            fail_wait: true,
        },
    ]);

    let config = config_for(vec![
        demo_site("Alpha Bank", false),
        demo_site("Beta Bank", false),
    ]);

    let response = server::router(&config, renderer)
        .oneshot(get_root())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);

    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let text = String::from_utf8(body.to_vec()).unwrap();

    // No partial report: the healthy bank's table is not substituted in.
    assert!(!text.contains("Alpha Bank Offers"));
    assert!(text.contains("scrape failed"));
}
