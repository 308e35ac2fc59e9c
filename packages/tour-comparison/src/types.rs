//! Core data types: the tour record and its draft form.
//!
//! Field names serialize in the original extension's wire format
//! (camelCase), so persisted collections and channel payloads stay
//! readable by anything that spoke the old protocol.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Supported booking sites.
///
/// Serialized by variant name ("GetYourGuide" / "Viator"), matching the
/// `source` strings the extension always stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Site {
    GetYourGuide,
    Viator,
}

impl Site {
    pub fn as_str(&self) -> &'static str {
        match self {
            Site::GetYourGuide => "GetYourGuide",
            Site::Viator => "Viator",
        }
    }
}

impl std::fmt::Display for Site {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A tour as produced by extraction, before the store has assigned an
/// id and timestamp.
///
/// Every selector miss leaves the corresponding field at its default;
/// array fields are never null, absence is an empty vec.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TourDraft {
    pub source: Site,

    /// Absolute URL of the page the tour was extracted from
    pub url: String,

    /// Empty when extraction found no usable heading
    pub title: String,

    /// First numeric token of the price region, unit-less
    pub price: String,

    /// Free text, e.g. "3 hours" or "Full day"
    pub duration: String,

    /// Numeric text in 0.0–5.0, or empty
    pub rating: String,

    /// Digits only, thousands separators stripped
    pub review_count: String,

    /// At most three entries, document order
    pub highlights: Vec<String>,

    pub included: Vec<String>,

    pub excluded: Vec<String>,

    /// Reserved: no selector rule yet, always empty
    pub meeting_point: String,

    /// Reserved: no selector rule yet, always empty
    pub cancellation: String,
}

impl TourDraft {
    /// An all-default draft for a site and page URL.
    pub fn empty(source: Site, url: impl Into<String>) -> Self {
        Self {
            source,
            url: url.into(),
            title: String::new(),
            price: String::new(),
            duration: String::new(),
            rating: String::new(),
            review_count: String::new(),
            highlights: Vec::new(),
            included: Vec::new(),
            excluded: Vec::new(),
            meeting_point: String::new(),
            cancellation: String::new(),
        }
    }

    /// Whether the draft carries enough data to be worth storing.
    ///
    /// Callers gate the add action on this; the store itself accepts
    /// anything.
    pub fn has_title(&self) -> bool {
        !self.title.is_empty()
    }

    /// Promote the draft to a stored record.
    pub(crate) fn into_record(self, id: String, added_at: DateTime<Utc>) -> TourRecord {
        TourRecord {
            id,
            source: self.source,
            url: self.url,
            title: self.title,
            price: self.price,
            duration: self.duration,
            rating: self.rating,
            review_count: self.review_count,
            highlights: self.highlights,
            included: self.included,
            excluded: self.excluded,
            meeting_point: self.meeting_point,
            cancellation: self.cancellation,
            added_at,
        }
    }
}

/// A stored tour: a [`TourDraft`] enriched with identity and insertion
/// time. Immutable once persisted, except for wholesale deletion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TourRecord {
    /// Unique across the whole collection, stable once assigned.
    /// Canonical form is the string itself; deletions compare ids as
    /// strings to tolerate representation drift in old payloads.
    pub id: String,

    pub source: Site,

    pub url: String,

    pub title: String,

    pub price: String,

    pub duration: String,

    pub rating: String,

    pub review_count: String,

    pub highlights: Vec<String>,

    pub included: Vec<String>,

    pub excluded: Vec<String>,

    pub meeting_point: String,

    pub cancellation: String,

    /// Set at the moment the store accepted the record
    pub added_at: DateTime<Utc>,
}

/// Generate a fresh record id.
///
/// UUIDv7 keeps the original scheme's properties (time-ordered, random
/// tail) without its collision window across concurrent surfaces.
pub(crate) fn new_tour_id() -> String {
    Uuid::now_v7().to_string()
}
