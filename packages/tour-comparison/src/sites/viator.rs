//! Viator extraction rules.

use scraper::Html;
use std::sync::LazyLock;

use regex::Regex;
use url::Url;

use super::{
    collect_texts, duration_span, first_numeric_token, first_text, review_count_from,
    SiteAdapter, EXCLUDED_ITEMS_SELECTOR, INCLUDED_ITEMS_SELECTOR, MAX_HIGHLIGHTS,
};
use crate::types::{Site, TourDraft};

const TITLE_SELECTOR: &str = r#"h1[data-test="product-title"], h1"#;
const PRICE_SELECTOR: &str = r#"[data-test*="price"], .price, [class*="price"]"#;
const RATING_SELECTOR: &str = ".averageRatingWrapper";
const REVIEW_SELECTOR: &str = r#"[data-test*="review"], [class*="review"]"#;
const HIGHLIGHTS_SELECTOR: &str =
    r#"[data-test*="highlight"] li, .highlights li, [class*="highlight"] li"#;

/// Viator renders ratings with a variable number of decimals.
static RE_RATING: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\d+(\.\d+)?").unwrap());

pub struct ViatorAdapter;

impl SiteAdapter for ViatorAdapter {
    fn site(&self) -> Site {
        Site::Viator
    }

    fn matches_host(&self, host: &str) -> bool {
        host.contains("viator.com")
    }

    // Individual tour pages always live under /tours/.
    fn is_tour_page(&self, url: &Url) -> bool {
        url.as_str().contains("/tours/")
    }

    fn extract(&self, document: &Html, url: &Url) -> TourDraft {
        let mut draft = TourDraft::empty(Site::Viator, url.as_str());

        if let Some(title) = first_text(document, TITLE_SELECTOR) {
            draft.title = title;
        }

        if let Some(price_text) = first_text(document, PRICE_SELECTOR) {
            if let Some(token) = first_numeric_token(&price_text) {
                draft.price = token;
            }
        }

        if let Some(text) = duration_span(document, &["hour", "minute"]) {
            draft.duration = text;
        }

        if let Some(rating_text) = first_text(document, RATING_SELECTOR) {
            if let Some(m) = RE_RATING.find(&rating_text) {
                draft.rating = m.as_str().to_string();
            }
        }

        if let Some(review_text) = first_text(document, REVIEW_SELECTOR) {
            if let Some(count) = review_count_from(&review_text) {
                draft.review_count = count;
            }
        }

        draft.included = collect_texts(document, INCLUDED_ITEMS_SELECTOR, None);
        draft.excluded = collect_texts(document, EXCLUDED_ITEMS_SELECTOR, None);
        draft.highlights = collect_texts(document, HIGHLIGHTS_SELECTOR, Some(MAX_HIGHLIGHTS));

        draft
    }
}
