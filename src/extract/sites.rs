//! The bank listings this deployment scrapes.
//!
//! Selectors mirror each bank's live markup as of the last survey. A site
//! changing its structure degrades fields to their defaults; only the
//! container/wait selector failing is fatal (the request errors out).

use crate::extract::site::{ExtraRule, ExtraSpec, LinkRule, SiteSpec};

/// All configured sites, in report order.
pub fn all() -> Vec<SiteSpec> {
    vec![icici(), axis(), kotak()]
}

/// ICICI Bank's offer wall.
pub fn icici() -> SiteSpec {
    SiteSpec {
        name: "ICICI Bank",
        url: "https://www.icicibank.com/offers",
        origin: "https://www.icicibank.com",
        card_selector: ".offer-card",
        wait_selector: ".offer-card",
        lazy_load: false,
        image_selector: Some(".offer-card-media img"),
        title_selector: Some(".title h2"),
        description_selector: Some(".description p"),
        link: Some(LinkRule::Anchor(".title a")),
        extras: vec![
            ExtraSpec {
                key: "payment_modes",
                label: "Payment Modes",
                rule: ExtraRule::JoinedText(".offer-paymode-list li"),
            },
            ExtraSpec {
                key: "views",
                label: "Views",
                rule: ExtraRule::Text(".num-viewer"),
            },
            ExtraSpec {
                key: "days_left",
                label: "Days Left",
                rule: ExtraRule::Text(".remaining-time-v2"),
            },
            ExtraSpec {
                key: "category_link",
                label: "Category Link",
                rule: ExtraRule::Link(".offer-card-cta-2 a"),
            },
            ExtraSpec {
                key: "partner_link",
                label: "Partner Link",
                rule: ExtraRule::Link(".offer-disclaimer-link"),
            },
        ],
    }
}

/// Axis Bank's "Grab Deals" listing; items materialize on scroll.
pub fn axis() -> SiteSpec {
    SiteSpec {
        name: "Axis Bank",
        url: "https://www.axisbank.com/grab-deals/online-offers",
        origin: "https://www.axisbank.com",
        card_selector: "#ulGrabDeals .tmainListing",
        wait_selector: "#ulGrabDeals .tmainListing",
        lazy_load: true,
        image_selector: Some(".travelImgwrap img"),
        title_selector: Some(".tofferHeader h4"),
        description_selector: Some(".travelContentwrap p"),
        link: Some(LinkRule::Anchor(".travelTnc")),
        extras: vec![ExtraSpec {
            key: "expiry",
            label: "Expiry",
            rule: ExtraRule::Text(".travelexpires"),
        }],
    }
}

/// Kotak's offer tiles. The detail link is a soft link: the tile's CTA is a
/// button wired up in script, carrying the target in `data-redirect-url`.
pub fn kotak() -> SiteSpec {
    SiteSpec {
        name: "Kotak Mahindra Bank",
        url: "https://www.kotak.com/en/offers.html",
        origin: "https://www.kotak.com",
        card_selector: ".offer-tile",
        wait_selector: ".offer-tile",
        lazy_load: true,
        image_selector: Some(".offer-tile-banner img"),
        title_selector: Some(".offer-tile-title h3"),
        description_selector: Some(".offer-tile-copy p"),
        link: Some(LinkRule::Attr {
            selector: ".offer-tile-cta",
            attr: "data-redirect-url",
        }),
        extras: vec![
            ExtraSpec {
                key: "views",
                label: "Views",
                rule: ExtraRule::Text(".offer-view-count"),
            },
            ExtraSpec {
                key: "expiry",
                label: "Expiry",
                rule: ExtraRule::Text(".offer-validity"),
            },
        ],
    }
}
