//! Generic offer-card extraction over a parsed HTML snapshot.
//!
//! Pure functions: the snapshot comes in as a string, offers come out. No
//! field is allowed to fail a card — absent markup degrades to the field's
//! default (`""`, or `None` for images and links).

use crate::extract::offer::{Extra, Offer};
use crate::extract::site::{ExtraRule, ExtraSpec, LinkRule, SiteSpec};
use scraper::{ElementRef, Html, Selector};

/// Extract every offer card from a rendered listing, in document order.
///
/// An unmatched container selector yields an empty sequence; the upstream
/// wait-for-selector step is expected to have failed first in that case.
pub fn extract_offers(html: &str, site: &SiteSpec) -> Vec<Offer> {
    let doc = Html::parse_document(html);
    let Some(cards) = parse_selector(site.card_selector) else {
        return Vec::new();
    };

    doc.select(&cards)
        .map(|card| offer_from_card(card, site))
        .collect()
}

fn offer_from_card(card: ElementRef<'_>, site: &SiteSpec) -> Offer {
    let image_url = site
        .image_selector
        .and_then(|sel| attr_value(card, sel, "src"))
        .map(|raw| absolutize(site.origin, &raw));

    let title = site
        .title_selector
        .and_then(|sel| first_text(card, sel))
        .unwrap_or_default();

    let description = site
        .description_selector
        .and_then(|sel| first_text(card, sel))
        .unwrap_or_default();

    let offer_page_link = site
        .link
        .as_ref()
        .and_then(|rule| link_value(card, rule))
        .map(|raw| absolutize(site.origin, &raw));

    let extras = site
        .extras
        .iter()
        .map(|spec| Extra {
            key: spec.key,
            value: extra_value(card, spec, site.origin),
        })
        .collect();

    Offer {
        image_url,
        title,
        description,
        offer_page_link,
        extras,
    }
}

fn extra_value(card: ElementRef<'_>, spec: &ExtraSpec, origin: &str) -> String {
    match spec.rule {
        ExtraRule::Text(sel) => first_text(card, sel).unwrap_or_default(),
        ExtraRule::JoinedText(sel) => joined_text(card, sel),
        ExtraRule::Link(sel) => attr_value(card, sel, "href")
            .map(|raw| absolutize(origin, &raw))
            .unwrap_or_default(),
    }
}

fn link_value(card: ElementRef<'_>, rule: &LinkRule) -> Option<String> {
    match rule {
        LinkRule::Anchor(sel) => attr_value(card, sel, "href"),
        LinkRule::Attr { selector, attr } => attr_value(card, selector, attr),
    }
}

/// Trimmed text of the first element matching `sel` under `card`.
fn first_text(card: ElementRef<'_>, sel: &str) -> Option<String> {
    let sel = parse_selector(sel)?;
    let element = card.select(&sel).next()?;
    Some(element.text().collect::<String>().trim().to_string())
}

/// Trimmed text of every element matching `sel`, joined with `", "`.
fn joined_text(card: ElementRef<'_>, sel: &str) -> String {
    let Some(sel) = parse_selector(sel) else {
        return String::new();
    };
    card.select(&sel)
        .map(|el| el.text().collect::<String>().trim().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Attribute of the first element matching `sel` under `card`.
fn attr_value(card: ElementRef<'_>, sel: &str, attr: &str) -> Option<String> {
    let sel = parse_selector(sel)?;
    let element = card.select(&sel).next()?;
    element.value().attr(attr).map(str::to_string)
}

/// Resolve a root-relative path against the site origin, exactly once.
/// Anything not starting with `/` is taken as already absolute.
fn absolutize(origin: &str, raw: &str) -> String {
    if raw.starts_with('/') {
        format!("{origin}{raw}")
    } else {
        raw.to_string()
    }
}

fn parse_selector(raw: &str) -> Option<Selector> {
    Selector::parse(raw).ok()
}
