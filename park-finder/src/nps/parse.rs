//! HTML extraction for nps.gov pages.

use std::collections::BTreeMap;

use scraper::{Html, Selector};

use crate::domain::Site;

use super::error::NpsError;

/// Parse a fixed CSS selector. A selector that fails to parse behaves like
/// one that matches nothing.
fn sel(css: &str) -> Option<Selector> {
    Selector::parse(css).ok()
}

/// Trimmed text of the first element matching `css`, or `None` when the
/// document has no such element.
fn select_text(doc: &Html, css: &str) -> Option<String> {
    let selector = sel(css)?;
    let element = doc.select(&selector).next()?;
    Some(element.text().collect::<String>().trim().to_string())
}

/// Text of a required element, or a parse error naming the field.
fn required_text(
    doc: &Html,
    css: &str,
    what: &'static str,
    url: &str,
) -> Result<String, NpsError> {
    select_text(doc, css).ok_or_else(|| NpsError::Parse {
        what,
        url: url.to_string(),
    })
}

/// Text of an element some pages omit, with a fixed placeholder.
fn text_or(doc: &Html, css: &str, placeholder: &str) -> String {
    select_text(doc, css).unwrap_or_else(|| placeholder.to_string())
}

/// Parse the index page's state dropdown into region name to listing URL.
///
/// Keys are lower-cased, trimmed link text; values resolve the anchor's
/// `href` against `base_url`. No dropdown block means no directory: that
/// is a hard failure, never a partial result.
pub fn region_map(
    html: &str,
    base_url: &str,
    page_url: &str,
) -> Result<BTreeMap<String, String>, NpsError> {
    let doc = Html::parse_document(html);

    let container = sel("div.SearchBar-keywordSearch")
        .and_then(|selector| doc.select(&selector).next())
        .ok_or_else(|| NpsError::Parse {
            what: "state dropdown",
            url: page_url.to_string(),
        })?;

    let mut regions = BTreeMap::new();
    if let Some(anchor) = sel("a") {
        for link in container.select(&anchor) {
            let Some(href) = link.value().attr("href") else {
                continue;
            };
            let name = link.text().collect::<String>().trim().to_lowercase();
            regions.insert(name, format!("{base_url}{href}"));
        }
    }

    Ok(regions)
}

/// Collect site-detail URLs from a region listing page, in document order.
///
/// Sites are marked with `h3` headings; headings without a link are
/// section dividers and are skipped, not errors.
pub fn listing_urls(html: &str, base_url: &str) -> Vec<String> {
    let doc = Html::parse_document(html);
    let mut urls = Vec::new();

    let (Some(heading), Some(anchor)) = (sel("h3"), sel("a")) else {
        return urls;
    };

    for h in doc.select(&heading) {
        if let Some(link) = h.select(&anchor).next()
            && let Some(href) = link.value().attr("href")
        {
            urls.push(format!("{base_url}{href}"));
        }
    }

    urls
}

/// Parse one site detail page into a [`Site`].
///
/// Title, designation, and phone are assumed always present; a page
/// without them violates the markup contract and fails the whole
/// operation. The address block is genuinely optional, so its three
/// fields fall back to placeholders instead.
pub fn site_detail(html: &str, url: &str) -> Result<Site, NpsError> {
    let doc = Html::parse_document(html);

    let name = required_text(&doc, "a.Hero-title", "site title", url)?;
    // Always rendered, though the text itself may be blank.
    let category = required_text(&doc, "span.Hero-designation", "site designation", url)?;
    let phone = required_text(&doc, "span.tel", "telephone", url)?;

    let zipcode = text_or(&doc, "span.postal-code", Site::UNKNOWN_ZIP);
    let region = text_or(&doc, "span.region", Site::NO_REGION);
    let city = text_or(&doc, r#"span[itemprop="addressLocality"]"#, Site::NO_CITY);

    Ok(Site {
        category,
        name,
        address: format!("{city}, {region}"),
        zipcode,
        phone,
    })
}
