//! Lazy-load trigger — scroll a page until its content stops materializing.
//!
//! Offer listings render list items lazily as the viewport approaches them.
//! The trigger scrolls down by a fixed increment on a fixed interval until the
//! cumulative scrolled distance reaches the page's total scrollable height,
//! re-reading the height every tick because scrolling itself loads more
//! content and grows the page.
//!
//! The source behavior has no upper bound; a settle timeout is applied here
//! so a page that never stops growing fails instead of hanging the request.

use crate::renderer::PageContext;
use anyhow::Result;
use std::time::Duration;

/// Parameters for one scroll-to-bottom pass.
#[derive(Debug, Clone)]
pub struct ScrollPlan {
    /// Pixels scrolled per tick.
    pub step_px: f64,
    /// Delay between ticks.
    pub interval: Duration,
    /// Upper bound on the whole pass.
    pub settle_timeout: Duration,
}

impl Default for ScrollPlan {
    fn default() -> Self {
        Self {
            step_px: 300.0,
            interval: Duration::from_millis(200),
            settle_timeout: Duration::from_secs(30),
        }
    }
}

/// Scroll until the cumulative distance covers the page height.
///
/// Returns the number of scroll ticks performed. Fails if the page has not
/// settled within `plan.settle_timeout`.
pub async fn exhaust(page: &dyn PageContext, plan: &ScrollPlan) -> Result<u32> {
    tokio::time::timeout(plan.settle_timeout, drive(page, plan))
        .await
        .map_err(|_| {
            anyhow::anyhow!(
                "page still growing after {} ms of scrolling",
                plan.settle_timeout.as_millis()
            )
        })?
}

async fn drive(page: &dyn PageContext, plan: &ScrollPlan) -> Result<u32> {
    let mut scrolled = 0.0_f64;
    let mut ticks = 0_u32;

    loop {
        // Re-read every tick: scrolling triggers loads that grow the page.
        let height = page.scroll_height().await?;

        page.scroll_by(plan.step_px).await?;
        scrolled += plan.step_px;
        ticks += 1;

        if scrolled >= height {
            return Ok(ticks);
        }
        tokio::time::sleep(plan.interval).await;
    }
}
