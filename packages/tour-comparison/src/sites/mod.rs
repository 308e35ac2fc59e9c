//! Per-site extraction rules behind a common adapter interface.
//!
//! Each supported booking site gets one [`SiteAdapter`] implementation
//! holding its hand-tuned selectors; [`adapter_for`] picks the adapter
//! by hostname. Adding a site means adding an adapter, not touching the
//! pipeline.
//!
//! Extraction is a pure function of an already-parsed document: it never
//! fails and never mutates the page. A selector miss leaves the field at
//! its default.

pub mod getyourguide;
pub mod viator;

pub use getyourguide::GetYourGuideAdapter;
pub use viator::ViatorAdapter;

use std::sync::LazyLock;

use regex::Regex;
use scraper::{Html, Selector};
use url::Url;

use crate::types::{Site, TourDraft};

/// Highlights are capped to the first three entries, document order.
pub const MAX_HIGHLIGHTS: usize = 3;

/// Inclusion list items (both sites render the same widget markup).
pub(crate) const INCLUDED_ITEMS_SELECTOR: &str =
    "li.activity-inclusions__item--inclusion .activity-inclusions__test--include";

/// Exclusion list items.
pub(crate) const EXCLUDED_ITEMS_SELECTOR: &str =
    "li.activity-inclusions__item--exclusion .activity-inclusions__test--exclude";

static RE_NUMERIC_TOKEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d+[.,]?\d*").unwrap());

static RE_REVIEW_PHRASE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)based on\s+([\d,.]+)\s+reviews?").unwrap());

/// One extraction rule set per supported site.
pub trait SiteAdapter: Send + Sync {
    /// Which site this adapter scrapes.
    fn site(&self) -> Site;

    /// Hostname allow-list check.
    fn matches_host(&self, host: &str) -> bool;

    /// Whether the URL points at an individual bookable tour page, as
    /// opposed to a search/listing/landing page.
    fn is_tour_page(&self, url: &Url) -> bool;

    /// Produce a draft record from the parsed page.
    fn extract(&self, document: &Html, url: &Url) -> TourDraft;
}

static ADAPTERS: [&'static dyn SiteAdapter; 2] = [&GetYourGuideAdapter, &ViatorAdapter];

/// Select the adapter for a URL's hostname, or `None` when the host is
/// not on the allow-list (callers treat that as "no tour data present").
pub fn adapter_for(url: &Url) -> Option<&'static dyn SiteAdapter> {
    let host = url.host_str()?;
    ADAPTERS.iter().find(|a| a.matches_host(host)).copied()
}

/// Convenience: pick the adapter and extract in one call.
pub fn extract_tour(document: &Html, url: &Url) -> Option<TourDraft> {
    let adapter = adapter_for(url)?;
    let draft = adapter.extract(document, url);
    tracing::debug!(
        url = %url,
        site = %draft.source,
        has_title = draft.has_title(),
        "extracted tour draft"
    );
    Some(draft)
}

/* ---------------- shared selector/text helpers ---------------- */

/// Collapse whitespace runs and trim.
pub(crate) fn clean_text(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Text of the first element matching a selector list, cleaned.
/// Invalid selectors and misses both yield `None`.
pub(crate) fn first_text(document: &Html, selectors: &str) -> Option<String> {
    let selector = Selector::parse(selectors).ok()?;
    document
        .select(&selector)
        .next()
        .map(|el| clean_text(&el.text().collect::<String>()))
        .filter(|t| !t.is_empty())
}

/// Cleaned texts of every element matching a selector list, document
/// order, optionally capped.
pub(crate) fn collect_texts(document: &Html, selectors: &str, cap: Option<usize>) -> Vec<String> {
    let selector = match Selector::parse(selectors) {
        Ok(s) => s,
        Err(_) => return Vec::new(),
    };
    let texts = document
        .select(&selector)
        .map(|el| clean_text(&el.text().collect::<String>()));
    match cap {
        Some(n) => texts.take(n).collect(),
        None => texts.collect(),
    }
}

/// First `span` whose cleaned text is under 50 chars and mentions one of
/// the duration keywords. Sites differ on which keywords count.
pub(crate) fn duration_span(document: &Html, keywords: &[&str]) -> Option<String> {
    let selector = Selector::parse("span").ok()?;
    document
        .select(&selector)
        .map(|el| clean_text(&el.text().collect::<String>()))
        .find(|text| {
            text.chars().count() < 50 && keywords.iter().any(|kw| text.contains(kw))
        })
}

/// Reduce a price region's text to its first numeric token, stripping
/// currency symbols and other prose.
pub(crate) fn first_numeric_token(text: &str) -> Option<String> {
    RE_NUMERIC_TOKEN.find(text).map(|m| m.as_str().to_string())
}

/// Pull the count out of a "based on N reviews" phrase, thousands
/// commas stripped. Any other phrasing yields `None`, even when the
/// region clearly holds a number.
pub(crate) fn review_count_from(text: &str) -> Option<String> {
    RE_REVIEW_PHRASE
        .captures(text)
        .map(|caps| caps[1].replace(',', ""))
}
