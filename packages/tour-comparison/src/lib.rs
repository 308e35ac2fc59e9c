//! Tour Comparison Core
//!
//! The extraction, storage, and projection pipeline behind a
//! tour-comparison browser tool: per-site DOM scraping rules normalize
//! two booking sites' markup into a uniform tour record, a single
//! persisted collection keeps the records ordered and deduplicated by
//! id across asynchronous UI surfaces, and a projector renders the
//! collection as a side-by-side matrix or CSV.
//!
//! # Design
//!
//! - Site-specific selector logic is isolated behind one
//!   [`SiteAdapter`] per site; adding a site is additive.
//! - Extraction never fails: selector misses become empty fields.
//! - Persistence and messaging are opaque async collaborators behind
//!   the [`KeyValueStore`] and [`MessageChannel`] traits.
//! - All mutations go through the [`TourStore`]'s read-modify-write
//!   contract; nothing else writes persisted state.
//!
//! # Usage
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use tour_comparison::{
//!     LocalChannel, MemoryKeyValueStore, MessageHandler, PageSession, TourStore,
//! };
//!
//! let handler = Arc::new(MessageHandler::new(TourStore::new(MemoryKeyValueStore::new())));
//! let mut session = PageSession::new(LocalChannel::new(handler));
//!
//! let view = session.visit(url, &page_html);
//! if view.offers_add() {
//!     session.add_current().await?;
//! }
//! let matrix = session.matrix().await?;
//! ```
//!
//! # Modules
//!
//! - [`sites`] - Per-site extraction rules and the adapter factory
//! - [`classifier`] - Tour-page vs listing-page URL classification
//! - [`store`] - The persisted tour collection and its backends
//! - [`matrix`] - Comparison matrix and CSV projection
//! - [`messages`] - Wire protocol and the background request handler
//! - [`session`] - Per-page controller with debounced re-extraction
//! - [`testing`] - Mock backends and page fixtures

pub mod classifier;
pub mod error;
pub mod matrix;
pub mod messages;
pub mod session;
pub mod sites;
pub mod store;
pub mod testing;
pub mod types;

// Re-export core types at crate root
pub use classifier::is_individual_tour_page;
pub use error::{ChannelError, ChannelResult, StoreError, StoreResult};
pub use matrix::{csv_filename, to_csv, ComparisonMatrix, CSV_HEADERS, FEATURE_LABELS};
pub use messages::{
    fetch_tours, LocalChannel, MessageChannel, MessageHandler, TourRequest, TourResponse,
};
pub use session::{AddStatus, PageSession, PageView, DEFAULT_DEBOUNCE};
pub use sites::{adapter_for, extract_tour, SiteAdapter};
pub use store::{
    AppendOutcome, JsonFileStore, KeyValueStore, MemoryKeyValueStore, TourStore, TOURS_KEY,
};
pub use types::{Site, TourDraft, TourRecord};
