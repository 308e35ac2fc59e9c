//! Testing utilities: mock storage backends and page fixtures.
//!
//! These are useful for testing applications that use the comparison
//! library without a real browser storage area or live site markup.

use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

use crate::store::KeyValueStore;
use crate::types::{Site, TourDraft};

/// A draft with plausible values in every scalar field, for store and
/// projector tests.
pub fn sample_draft(source: Site, title: &str) -> TourDraft {
    let url = match source {
        Site::GetYourGuide => "https://www.getyourguide.com/rome-l33/tour-t1?ranking_uuid=9f3e",
        Site::Viator => "https://www.viator.com/tours/Rome/Sample/d511-1",
    };
    let mut draft = TourDraft::empty(source, url);
    draft.title = title.to_string();
    draft.price = "49.50".to_string();
    draft.duration = "3 hours".to_string();
    draft.rating = "4.5".to_string();
    draft.review_count = "120".to_string();
    draft
}

/// Error returned by the failing mock backend.
#[derive(Debug, Error)]
#[error("storage backend unavailable")]
pub struct BackendUnavailable;

/// A key-value store whose every operation fails, for exercising the
/// store-error propagation path.
pub struct FailingKeyValueStore;

#[async_trait]
impl KeyValueStore for FailingKeyValueStore {
    type Error = BackendUnavailable;

    async fn get(&self, _key: &str) -> Result<Option<Value>, Self::Error> {
        Err(BackendUnavailable)
    }

    async fn set(&self, _key: &str, _value: Value) -> Result<(), Self::Error> {
        Err(BackendUnavailable)
    }
}

/// A key-value store that answers after a fixed delay, for exercising
/// the store-timeout path.
pub struct SlowKeyValueStore {
    delay: Duration,
}

impl SlowKeyValueStore {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }
}

#[async_trait]
impl KeyValueStore for SlowKeyValueStore {
    type Error = BackendUnavailable;

    async fn get(&self, _key: &str) -> Result<Option<Value>, Self::Error> {
        tokio::time::sleep(self.delay).await;
        Ok(None)
    }

    async fn set(&self, _key: &str, _value: Value) -> Result<(), Self::Error> {
        tokio::time::sleep(self.delay).await;
        Ok(())
    }
}

/// A GetYourGuide tour page with every region the extractor looks for.
pub const GYG_TOUR_PAGE: &str = r#"<html><body>
<h1 data-test-id="activity-header-title">Colosseum Guided Tour</h1>
<div data-test-id="price-lead">From €49.50 per person</div>
<span>Duration 3 hours</span>
<div data-test-id="rating">4.7 / 5</div>
<p class="reviews-summary__rating-description js-rating-description">Rated 4.7, based on 1,234 reviews</p>
<ul>
  <li class="activity-inclusions__item--inclusion"><span class="activity-inclusions__test--include">Skip-the-line entry</span></li>
  <li class="activity-inclusions__item--inclusion"><span class="activity-inclusions__test--include">Local guide</span></li>
  <li class="activity-inclusions__item--exclusion"><span class="activity-inclusions__test--exclude">Hotel pickup</span></li>
</ul>
<div class="highlights"><ul>
  <li class="highlight-entry">Walk the arena floor</li>
  <li class="highlight-entry">Skip the ticket lines</li>
</ul></div>
</body></html>"#;

/// A Viator tour page with every region the extractor looks for.
pub const VIATOR_TOUR_PAGE: &str = r#"<html><body>
<h1 data-test="product-title">Skip the Line: Vatican Museums Tour</h1>
<div data-test="product-price">$65.00</div>
<span>2 hours 30 minutes</span>
<div class="averageRatingWrapper">4.5 out of 5</div>
<div class="review-summary">Rated 4.5, based on 8,912 reviews</div>
<ul>
  <li class="activity-inclusions__item--inclusion"><span class="activity-inclusions__test--include">Live guide</span></li>
  <li class="activity-inclusions__item--exclusion"><span class="activity-inclusions__test--exclude">Gratuities</span></li>
</ul>
<div data-test="tour-highlights"><ul>
  <li>Sistine Chapel access</li>
  <li>Small group size</li>
</ul></div>
</body></html>"#;
