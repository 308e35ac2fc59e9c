//! Page-state classification: is this URL an individual bookable tour
//! page, or a search/listing/landing page?
//!
//! Pure function of the URL string, cheap enough to run on every
//! navigation event. Unknown hostnames classify as "not a tour page".

use url::Url;

use crate::sites::adapter_for;

/// Whether the URL represents one specific bookable product.
pub fn is_individual_tour_page(url: &Url) -> bool {
    adapter_for(url)
        .map(|adapter| adapter.is_tour_page(url))
        .unwrap_or(false)
}
