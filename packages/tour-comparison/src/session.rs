//! Per-page controller for an injected UI surface.
//!
//! Owns what used to be free-floating page state: the current URL, the
//! classification result, and the draft extracted from the live
//! document. Navigation events are debounced for a fixed interval
//! before the classify + extract pipeline re-runs, matching how
//! single-page-app URL changes settle before the DOM is worth querying.
//!
//! The session talks to the background store owner only through the
//! message channel; it never touches persisted state directly.

use std::time::Duration;

use scraper::Html;
use url::Url;

use crate::classifier::is_individual_tour_page;
use crate::error::ChannelResult;
use crate::matrix::ComparisonMatrix;
use crate::messages::{fetch_tours, MessageChannel, TourRequest, TourResponse};
use crate::sites::extract_tour;
use crate::types::{TourDraft, TourRecord};

/// How long a URL change must settle before re-scraping.
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_secs(1);

/// What the session knows about the page it is attached to.
#[derive(Debug, Clone)]
pub struct PageView {
    pub url: Url,

    /// Classifier verdict for this URL
    pub is_tour_page: bool,

    /// Extraction result; `None` off tour pages and on unknown hosts
    pub draft: Option<TourDraft>,
}

impl PageView {
    /// Whether the "add to comparison" action should be offered: an
    /// individual tour page whose extraction produced a usable title.
    pub fn offers_add(&self) -> bool {
        self.is_tour_page && self.draft.as_ref().is_some_and(TourDraft::has_title)
    }
}

/// Outcome of an add attempt from this surface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AddStatus {
    /// Nothing worth adding on the current page
    NotOffered,

    /// Stored; the collection now holds `tour_count` records
    Added { tour_count: usize },

    /// The store reported a failure; prior state is unchanged
    Failed { error: String },
}

/// One UI surface's controller, created on inject and destroyed on
/// page teardown.
pub struct PageSession<C> {
    channel: C,
    debounce: Duration,
    view: Option<PageView>,
}

impl<C: MessageChannel> PageSession<C> {
    pub fn new(channel: C) -> Self {
        Self {
            channel,
            debounce: DEFAULT_DEBOUNCE,
            view: None,
        }
    }

    /// Override the navigation debounce (tests use zero).
    pub fn with_debounce(mut self, debounce: Duration) -> Self {
        self.debounce = debounce;
        self
    }

    /// Classify and extract immediately, replacing the current view.
    /// Used on initial inject; navigation updates go through
    /// [`on_url_change`](Self::on_url_change).
    pub fn visit(&mut self, url: Url, html: &str) -> &PageView {
        let is_tour_page = is_individual_tour_page(&url);
        let draft = if is_tour_page {
            let document = Html::parse_document(html);
            extract_tour(&document, &url)
        } else {
            None
        };

        tracing::debug!(
            url = %url,
            is_tour_page,
            has_draft = draft.is_some(),
            "page visited"
        );

        self.view.insert(PageView {
            url,
            is_tour_page,
            draft,
        })
    }

    /// Handle a navigation event. A changed URL waits out the debounce
    /// interval, then re-runs the pipeline; an unchanged URL is a
    /// no-op. Returns whether a re-scrape ran.
    pub async fn on_url_change(&mut self, url: Url, html: &str) -> bool {
        let changed = self.view.as_ref().map(|v| v.url != url).unwrap_or(true);
        if !changed {
            return false;
        }

        tokio::time::sleep(self.debounce).await;
        self.visit(url, html);
        true
    }

    /// The current view, if any page has been visited.
    pub fn current(&self) -> Option<&PageView> {
        self.view.as_ref()
    }

    /// Explicit teardown: drop page state so a stale draft can never be
    /// added after the surface is gone.
    pub fn close(&mut self) {
        self.view = None;
    }

    /// Send the current draft to the store, if the page offers one.
    pub async fn add_current(&self) -> ChannelResult<AddStatus> {
        let Some(draft) = self
            .view
            .as_ref()
            .filter(|v| v.offers_add())
            .and_then(|v| v.draft.clone())
        else {
            return Ok(AddStatus::NotOffered);
        };

        let response = self
            .channel
            .request(TourRequest::AddTour { tour_data: draft })
            .await?;

        Ok(match response {
            TourResponse::Mutation {
                success: true,
                tour_count,
            } => AddStatus::Added { tour_count },
            TourResponse::Failure { error, .. } => AddStatus::Failed { error },
            other => AddStatus::Failed {
                error: format!("unexpected response: {other:?}"),
            },
        })
    }

    /// Current store snapshot, for rendering.
    pub async fn tours(&self) -> ChannelResult<Vec<TourRecord>> {
        fetch_tours(&self.channel).await
    }

    /// Current store snapshot projected to the comparison matrix.
    pub async fn matrix(&self) -> ChannelResult<ComparisonMatrix> {
        Ok(ComparisonMatrix::project(&self.tours().await?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use crate::messages::{LocalChannel, MessageHandler};
    use crate::store::{MemoryKeyValueStore, TourStore};
    use crate::testing::{GYG_TOUR_PAGE, VIATOR_TOUR_PAGE};

    fn session() -> PageSession<LocalChannel<MemoryKeyValueStore>> {
        let handler = Arc::new(MessageHandler::new(TourStore::new(
            MemoryKeyValueStore::new(),
        )));
        PageSession::new(LocalChannel::new(handler)).with_debounce(Duration::ZERO)
    }

    fn gyg_tour_url() -> Url {
        Url::parse("https://www.getyourguide.com/rome-l33/tour-t1?ranking_uuid=9f3e").unwrap()
    }

    fn viator_tour_url() -> Url {
        Url::parse("https://www.viator.com/tours/Rome/Sample/d511-1").unwrap()
    }

    #[tokio::test]
    async fn tour_page_offers_add_and_stores_draft() {
        let mut session = session();
        let view = session.visit(gyg_tour_url(), GYG_TOUR_PAGE);
        assert!(view.offers_add());

        let status = session.add_current().await.unwrap();
        assert_eq!(status, AddStatus::Added { tour_count: 1 });

        let tours = session.tours().await.unwrap();
        assert_eq!(tours[0].title, "Colosseum Guided Tour");
    }

    #[tokio::test]
    async fn listing_page_offers_nothing() {
        let mut session = session();
        let url = Url::parse("https://www.getyourguide.com/rome-l33/").unwrap();
        let view = session.visit(url, GYG_TOUR_PAGE);

        assert!(!view.is_tour_page);
        assert!(!view.offers_add());
        assert_eq!(session.add_current().await.unwrap(), AddStatus::NotOffered);
    }

    #[tokio::test]
    async fn unchanged_url_does_not_rescrape() {
        let mut session = session();
        session.visit(viator_tour_url(), VIATOR_TOUR_PAGE);

        assert!(!session.on_url_change(viator_tour_url(), VIATOR_TOUR_PAGE).await);
        assert!(session.on_url_change(gyg_tour_url(), GYG_TOUR_PAGE).await);
        assert_eq!(
            session.current().unwrap().draft.as_ref().unwrap().title,
            "Colosseum Guided Tour"
        );
    }

    #[tokio::test]
    async fn close_drops_page_state() {
        let mut session = session();
        session.visit(viator_tour_url(), VIATOR_TOUR_PAGE);
        session.close();

        assert!(session.current().is_none());
        assert_eq!(session.add_current().await.unwrap(), AddStatus::NotOffered);
    }
}
