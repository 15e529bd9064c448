//! Error taxonomy for a scrape run.
//!
//! Missing fields inside an offer card are not errors — they degrade to
//! defaults during extraction. Everything here is fatal to the run.

use thiserror::Error;

/// A fatal failure while scraping one bank's listing.
#[derive(Debug, Error)]
pub enum ScrapeError {
    /// The bank's page could not be reached or rendered.
    #[error("navigating to {url} for {site} failed: {message}")]
    Navigation {
        site: String,
        url: String,
        message: String,
    },

    /// The page loaded but the offer-card container never appeared.
    #[error("container {selector:?} did not appear on {site} within {timeout_ms} ms")]
    SelectorTimeout {
        site: String,
        selector: String,
        timeout_ms: u64,
    },

    /// The page kept growing while scrolling and never settled.
    #[error("lazy-load scrolling on {site} did not settle: {message}")]
    ScrollTimeout { site: String, message: String },

    /// Browser session acquisition or release failed.
    #[error("browser session error: {message}")]
    Session { message: String },
}
