//! Per-site extraction configuration.
//!
//! Each bank's listing differs only in markup; the extraction algorithm is
//! shared. A `SiteSpec` captures everything that varies: where the cards
//! are, where each field lives inside a card, and the origin used to resolve
//! root-relative URLs.

/// Configuration for extracting one bank's offer listing.
#[derive(Debug, Clone)]
pub struct SiteSpec {
    /// Display name, also the report's section heading.
    pub name: &'static str,
    /// The listing page to render.
    pub url: &'static str,
    /// Scheme+host prefix for resolving root-relative URLs.
    pub origin: &'static str,
    /// Matches one offer card.
    pub card_selector: &'static str,
    /// Element that must exist before extraction starts; usually the card
    /// selector itself.
    pub wait_selector: &'static str,
    /// Whether the listing materializes items lazily on scroll.
    pub lazy_load: bool,
    /// The card's image element; its `src` is read.
    pub image_selector: Option<&'static str>,
    /// The card's headline element.
    pub title_selector: Option<&'static str>,
    /// The card's body-text element.
    pub description_selector: Option<&'static str>,
    /// Where the offer's detail link comes from.
    pub link: Option<LinkRule>,
    /// Site-specific columns, in display order.
    pub extras: Vec<ExtraSpec>,
}

/// How a card's detail-page link is sourced.
#[derive(Debug, Clone)]
pub enum LinkRule {
    /// A real anchor; the `href` attribute is read.
    Anchor(&'static str),
    /// A "soft" link carried in a non-anchor attribute (the element is not a
    /// navigation target, the site wires it up in script).
    Attr {
        selector: &'static str,
        attr: &'static str,
    },
}

/// One site-specific column.
#[derive(Debug, Clone)]
pub struct ExtraSpec {
    /// Stable field key.
    pub key: &'static str,
    /// Report column header.
    pub label: &'static str,
    pub rule: ExtraRule,
}

/// How a site-specific column's value is extracted from a card.
#[derive(Debug, Clone)]
pub enum ExtraRule {
    /// Trimmed text of the first matching element.
    Text(&'static str),
    /// Trimmed text of every matching element, joined with `", "`.
    JoinedText(&'static str),
    /// An `href` resolved against the site origin.
    Link(&'static str),
}
