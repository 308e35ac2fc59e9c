//! The comparison projector: tour list → display matrix and CSV text.
//!
//! Both projections are derived and ephemeral: regenerated from the
//! store snapshot on every read, never persisted.

use chrono::NaiveDate;

use crate::types::TourRecord;

/// Feature rows, in the fixed order every rendering must use.
pub const FEATURE_LABELS: [&str; 8] = [
    "Source",
    "Price",
    "Duration",
    "Rating",
    "Reviews",
    "Included",
    "Excluded",
    "Highlights",
];

/// CSV header row.
pub const CSV_HEADERS: [&str; 10] = [
    "Source",
    "Title",
    "Price",
    "Duration",
    "Rating",
    "Reviews",
    "Highlights",
    "Included",
    "Excluded",
    "URL",
];

/// Placeholder for empty display cells.
const NOT_AVAILABLE: &str = "N/A";

/// One column heading: enough for a UI surface to render a linked title
/// and a delete control.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnHeader {
    pub id: String,
    pub title: String,
    pub url: String,
}

/// One feature row across all tours.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeatureRow {
    pub label: &'static str,
    pub cells: Vec<String>,
}

/// Feature labels × tours, in store order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComparisonMatrix {
    pub columns: Vec<ColumnHeader>,
    pub rows: Vec<FeatureRow>,
}

impl ComparisonMatrix {
    /// Project a store snapshot into the fixed row/column shape.
    pub fn project(tours: &[TourRecord]) -> Self {
        let columns = tours
            .iter()
            .map(|tour| ColumnHeader {
                id: tour.id.clone(),
                title: display_cell(&tour.title),
                url: tour.url.clone(),
            })
            .collect();

        let row = |label: &'static str, cell: fn(&TourRecord) -> String| FeatureRow {
            label,
            cells: tours.iter().map(cell).collect(),
        };

        // Same order as FEATURE_LABELS.
        let rows = vec![
            row("Source", |t| display_cell(t.source.as_str())),
            row("Price", |t| display_cell(&t.price)),
            row("Duration", |t| display_cell(&t.duration)),
            row("Rating", |t| display_cell(&t.rating)),
            row("Reviews", |t| display_cell(&t.review_count)),
            row("Included", |t| display_list(&t.included)),
            row("Excluded", |t| display_list(&t.excluded)),
            row("Highlights", |t| display_list(&t.highlights)),
        ];

        Self { columns, rows }
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

fn display_cell(value: &str) -> String {
    if value.is_empty() {
        NOT_AVAILABLE.to_string()
    } else {
        value.to_string()
    }
}

fn display_list(items: &[String]) -> String {
    if items.is_empty() {
        NOT_AVAILABLE.to_string()
    } else {
        items.join(", ")
    }
}

/// Render the snapshot as CSV text: fixed header plus one row per tour
/// in store order. Every field is quoted, quotes doubled, so free text
/// with commas or quotes re-parses to the original.
pub fn to_csv(tours: &[TourRecord]) -> Result<String, csv::Error> {
    let mut writer = csv::WriterBuilder::new()
        .quote_style(csv::QuoteStyle::Always)
        .from_writer(Vec::new());

    writer.write_record(CSV_HEADERS)?;
    for tour in tours {
        let highlights = tour.highlights.join("; ");
        let included = tour.included.join("; ");
        let excluded = tour.excluded.join("; ");
        writer.write_record([
            tour.source.as_str(),
            tour.title.as_str(),
            tour.price.as_str(),
            tour.duration.as_str(),
            tour.rating.as_str(),
            tour.review_count.as_str(),
            highlights.as_str(),
            included.as_str(),
            excluded.as_str(),
            tour.url.as_str(),
        ])?;
    }

    let bytes = writer.into_inner().map_err(|e| e.into_error())?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

/// Export filename for a given date: `tour-comparison-YYYY-MM-DD.csv`.
pub fn csv_filename(date: NaiveDate) -> String {
    format!("tour-comparison-{}.csv", date.format("%Y-%m-%d"))
}
