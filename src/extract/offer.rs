//! The normalized offer record.

use serde::Serialize;

/// One promotional offer extracted from a bank's listing page.
///
/// Built fresh per request from live page content and never mutated after
/// construction. Missing markup degrades to the field defaults below instead
/// of failing the card.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Offer {
    /// Absolute image URL, if the card carries one.
    pub image_url: Option<String>,
    /// Offer headline; empty when absent in markup.
    pub title: String,
    /// Offer body text; empty when absent in markup.
    pub description: String,
    /// Absolute link to the offer's detail page, if the card carries one.
    pub offer_page_link: Option<String>,
    /// Site-specific columns in display order (always present, `""` when
    /// the markup is missing).
    pub extras: Vec<Extra>,
}

/// A site-specific field on an offer.
#[derive(Debug, Clone, Serialize)]
pub struct Extra {
    pub key: &'static str,
    pub value: String,
}

impl Offer {
    /// Look up a site-specific field by key.
    pub fn extra(&self, key: &str) -> Option<&str> {
        self.extras
            .iter()
            .find(|e| e.key == key)
            .map(|e| e.value.as_str())
    }
}
