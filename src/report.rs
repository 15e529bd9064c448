//! HTML report rendering — one table per bank.
//!
//! Pure string building over aggregated results; no decision logic beyond
//! laying columns out per site. Text content is escaped, image cells render
//! `<img>`, link cells render anchors.

use crate::aggregate::SiteOffers;
use crate::extract::{ExtraRule, ExtraSpec, Offer, SiteSpec};
use std::fmt::Write;

const STYLE: &str = "\
    table { border-collapse: collapse; width: 100%; margin-bottom: 50px; }\n\
    th, td { border: 1px solid #ddd; padding: 8px; vertical-align: top; }\n\
    th { background-color: #f4f4f4; }\n\
    img { max-width: 150px; }\n\
    h1 { text-align: center; }";

/// Render the aggregated results as a complete HTML document.
pub fn render(results: &[SiteOffers]) -> String {
    let mut body = String::new();
    for section in results {
        let _ = write!(
            body,
            "<h1>{} Offers</h1>\n{}",
            escape(&section.bank),
            table(&section.site, &section.offers)
        );
    }

    format!(
        "<html>\n<head>\n<title>Bank Offers</title>\n<style>\n{STYLE}\n</style>\n</head>\n\
         <body>\n{body}</body>\n</html>\n"
    )
}

/// One bank's table: header row from the site's column set, one row per offer.
fn table(site: &SiteSpec, offers: &[Offer]) -> String {
    let mut out = String::from("<table>\n<tr>");
    for column in columns(site) {
        let _ = write!(out, "<th>{}</th>", escape(&column));
    }
    out.push_str("</tr>\n");

    for offer in offers {
        out.push_str("<tr>");
        out.push_str(&image_cell(offer.image_url.as_deref()));
        let _ = write!(out, "<td>{}</td>", escape(&offer.title));
        let _ = write!(out, "<td>{}</td>", escape(&offer.description));

        for spec in text_extras(site) {
            let value = offer.extra(spec.key).unwrap_or("");
            let _ = write!(out, "<td>{}</td>", escape(value));
        }

        out.push_str(&link_cell(offer.offer_page_link.as_deref(), "View"));

        for spec in link_extras(site) {
            let value = offer.extra(spec.key).filter(|v| !v.is_empty());
            out.push_str(&link_cell(value, anchor_text(spec.label)));
        }
        out.push_str("</tr>\n");
    }

    out.push_str("</table>\n");
    out
}

/// Column headers in display order: the common fields, the site's text
/// columns, the offer-page column, then the site's link columns.
fn columns(site: &SiteSpec) -> Vec<String> {
    let mut cols = vec![
        "Image".to_string(),
        "Title".to_string(),
        "Description".to_string(),
    ];
    cols.extend(text_extras(site).map(|s| s.label.to_string()));
    cols.push("Offer Page".to_string());
    cols.extend(link_extras(site).map(|s| s.label.to_string()));
    cols
}

fn text_extras(site: &SiteSpec) -> impl Iterator<Item = &ExtraSpec> + '_ {
    site.extras
        .iter()
        .filter(|s| !matches!(s.rule, ExtraRule::Link(_)))
}

fn link_extras(site: &SiteSpec) -> impl Iterator<Item = &ExtraSpec> + '_ {
    site.extras
        .iter()
        .filter(|s| matches!(s.rule, ExtraRule::Link(_)))
}

/// "Category Link" columns get "Category" anchors.
fn anchor_text(label: &str) -> &str {
    label.strip_suffix(" Link").unwrap_or(label)
}

fn image_cell(url: Option<&str>) -> String {
    match url {
        Some(url) if !url.is_empty() => format!(r#"<td><img src="{}" /></td>"#, escape(url)),
        _ => "<td></td>".to_string(),
    }
}

fn link_cell(url: Option<&str>, text: &str) -> String {
    match url {
        Some(url) if !url.is_empty() => format!(
            r#"<td><a href="{}" target="_blank">{}</a></td>"#,
            escape(url),
            escape(text)
        ),
        _ => "<td></td>".to_string(),
    }
}

fn escape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
