//! Runtime configuration, built once at startup and passed down explicitly.

use crate::extract::{sites, SiteSpec};
use crate::scroll::ScrollPlan;

/// Everything the server needs, assembled in `main`.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Port the HTTP endpoint listens on.
    pub port: u16,
    /// Per-site navigation timeout.
    pub nav_timeout_ms: u64,
    /// Per-site wait-for-container timeout.
    pub selector_timeout_ms: u64,
    /// Lazy-load scroll parameters.
    pub scroll: ScrollPlan,
    /// Sites to scrape, in report order.
    pub sites: Vec<SiteSpec>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            port: 3000,
            nav_timeout_ms: 30_000,
            selector_timeout_ms: 15_000,
            scroll: ScrollPlan::default(),
            sites: sites::all(),
        }
    }
}

impl AppConfig {
    /// Default configuration on a specific port.
    pub fn with_port(port: u16) -> Self {
        Self {
            port,
            ..Self::default()
        }
    }
}
