//! GetYourGuide extraction rules.

use scraper::Html;
use std::sync::LazyLock;

use regex::Regex;
use url::Url;

use super::{
    clean_text, collect_texts, duration_span, first_numeric_token, first_text,
    review_count_from, SiteAdapter, EXCLUDED_ITEMS_SELECTOR, INCLUDED_ITEMS_SELECTOR,
    MAX_HIGHLIGHTS,
};
use crate::types::{Site, TourDraft};

const TITLE_SELECTOR: &str = r#"h1[data-test-id="activity-header-title"], h1"#;
const PRICE_SELECTOR: &str = r#"[data-test-id="price-lead"], .price, [class*="price"]"#;
const RATING_SELECTOR: &str = r#"[data-test-id="rating"], .rating, [class*="rating"]"#;
const REVIEW_SUMMARY_SELECTOR: &str =
    "p.reviews-summary__rating-description.js-rating-description";
const HIGHLIGHTS_SELECTOR: &str =
    r#"[data-test-id*="highlight"], .highlight li, [class*="highlight"] li"#;

/// Ratings render as a single digit, a dot, and a single digit.
static RE_RATING: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\d\.\d").unwrap());

pub struct GetYourGuideAdapter;

impl SiteAdapter for GetYourGuideAdapter {
    fn site(&self) -> Site {
        Site::GetYourGuide
    }

    fn matches_host(&self, host: &str) -> bool {
        host.contains("getyourguide.com")
    }

    // Individual tour pages always carry the ranking_uuid query param.
    fn is_tour_page(&self, url: &Url) -> bool {
        url.as_str().contains("ranking_uuid=")
    }

    fn extract(&self, document: &Html, url: &Url) -> TourDraft {
        let mut draft = TourDraft::empty(Site::GetYourGuide, url.as_str());

        if let Some(title) = first_text(document, TITLE_SELECTOR) {
            draft.title = title;
        }

        if let Some(price_text) = first_text(document, PRICE_SELECTOR) {
            if let Some(token) = first_numeric_token(&price_text) {
                draft.price = token;
            }
        }

        // Duration spans are sometimes prefixed with a "Duration" label.
        if let Some(text) = duration_span(document, &["day", "hour", "minute"]) {
            draft.duration = match text.strip_prefix("Duration ") {
                Some(rest) => clean_text(rest),
                None => text,
            };
        }

        if let Some(rating_text) = first_text(document, RATING_SELECTOR) {
            if let Some(m) = RE_RATING.find(&rating_text) {
                draft.rating = m.as_str().to_string();
            }
        }

        if let Some(review_text) = first_text(document, REVIEW_SUMMARY_SELECTOR) {
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

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(html: &str) -> Html {
        Html::parse_document(html)
    }

    fn page_url() -> Url {
        Url::parse("https://www.getyourguide.com/rome-l33/colosseum-t1?ranking_uuid=abc").unwrap()
    }

    #[test]
    fn extracts_full_page() {
        let html = parse(
            r#"<html><body>
            <h1 data-test-id="activity-header-title"> Colosseum Guided Tour </h1>
            <div data-test-id="price-lead">From €49.50 per person</div>
            <span>Duration 3 hours</span>
            <div data-test-id="rating">4.7 / 5</div>
            <p class="reviews-summary__rating-description js-rating-description">
              Rated 4.7, based on 1,234 reviews
            </p>
            <ul>
              <li class="activity-inclusions__item--inclusion">
                <span class="activity-inclusions__test--include">Skip-the-line entry</span>
              </li>
              <li class="activity-inclusions__item--exclusion">
                <span class="activity-inclusions__test--exclude">Hotel pickup</span>
              </li>
            </ul>
            <div class="highlights"><ul>
              <li class="highlight-item">See the arena floor</li>
            </ul></div>
            </body></html>"#,
        );

        let draft = GetYourGuideAdapter.extract(&html, &page_url());

        assert_eq!(draft.source, Site::GetYourGuide);
        assert_eq!(draft.title, "Colosseum Guided Tour");
        assert_eq!(draft.price, "49.50");
        assert_eq!(draft.duration, "3 hours");
        assert_eq!(draft.rating, "4.7");
        assert_eq!(draft.review_count, "1234");
        assert_eq!(draft.included, vec!["Skip-the-line entry"]);
        assert_eq!(draft.excluded, vec!["Hotel pickup"]);
        assert!(!draft.highlights.is_empty());
        assert!(draft.meeting_point.is_empty());
        assert!(draft.cancellation.is_empty());
    }

    #[test]
    fn title_falls_back_to_plain_h1() {
        let html = parse("<html><body><h1>Plain Heading</h1></body></html>");
        let draft = GetYourGuideAdapter.extract(&html, &page_url());
        assert_eq!(draft.title, "Plain Heading");
    }

    #[test]
    fn empty_page_yields_defaults_without_panicking() {
        let html = parse("<html><body><p>nothing here</p></body></html>");
        let draft = GetYourGuideAdapter.extract(&html, &page_url());

        assert!(draft.title.is_empty());
        assert!(draft.price.is_empty());
        assert!(draft.rating.is_empty());
        assert!(draft.included.is_empty());
        assert!(draft.excluded.is_empty());
        assert!(draft.highlights.is_empty());
    }

    #[test]
    fn rating_requires_decimal_form() {
        let html = parse(r#"<html><body><div class="rating">5 stars</div></body></html>"#);
        let draft = GetYourGuideAdapter.extract(&html, &page_url());
        assert!(draft.rating.is_empty());
    }

    #[test]
    fn review_count_stays_empty_without_phrase() {
        let html = parse(
            r#"<html><body>
            <p class="reviews-summary__rating-description js-rating-description">1,234 reviews</p>
            </body></html>"#,
        );
        let draft = GetYourGuideAdapter.extract(&html, &page_url());
        assert!(draft.review_count.is_empty());
    }

    #[test]
    fn highlights_cap_at_three() {
        let html = parse(
            r#"<html><body><div class="highlights"><ul>
            <li class="highlight-a">one</li>
            <li class="highlight-b">two</li>
            <li class="highlight-c">three</li>
            <li class="highlight-d">four</li>
            </ul></div></body></html>"#,
        );
        let draft = GetYourGuideAdapter.extract(&html, &page_url());
        assert_eq!(draft.highlights.len(), 3);
        assert_eq!(draft.highlights[0], "one");
    }

    #[test]
    fn classifies_tour_pages_by_query_param() {
        assert!(GetYourGuideAdapter.is_tour_page(&page_url()));
        assert!(!GetYourGuideAdapter
            .is_tour_page(&Url::parse("https://www.getyourguide.com/s/?q=rome").unwrap()));
    }
}
