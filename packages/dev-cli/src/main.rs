//! Developer CLI for the tour-comparison pipeline.
//!
//! Drives the same classify → extract → store → project flow the
//! browser surfaces use, against a JSON file instead of browser
//! storage. Handy for tuning selectors against saved pages.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use chrono::Utc;
use clap::{Parser, Subcommand};
use colored::Colorize;
use scraper::Html;
use url::Url;

use tour_comparison::{
    adapter_for, csv_filename, extract_tour, is_individual_tour_page, to_csv,
    ComparisonMatrix, JsonFileStore, MessageHandler, TourDraft, TourRequest, TourStore,
};

#[derive(Parser)]
#[command(name = "tour-compare")]
#[command(about = "Scrape, store, and compare tour listings")]
#[command(version)]
struct Cli {
    /// Path of the JSON store file
    #[arg(long, global = true, default_value = "tour-comparison.json")]
    store: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check whether a URL is an individual bookable tour page
    Classify {
        url: Url,
    },

    /// Extract a tour record from a page without storing it
    Extract {
        url: Url,

        /// Read markup from a file instead of fetching the URL
        #[arg(long)]
        html_file: Option<PathBuf>,
    },

    /// Extract a tour record and add it to the comparison
    Add {
        url: Url,

        /// Read markup from a file instead of fetching the URL
        #[arg(long)]
        html_file: Option<PathBuf>,
    },

    /// Show the stored tours as a comparison table
    List,

    /// Delete one stored tour by id
    Delete {
        id: String,
    },

    /// Write the comparison as a dated CSV file
    Export {
        /// Directory to write into
        #[arg(long, default_value = ".")]
        out: PathBuf,
    },

    /// Drop every stored tour
    Clear,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let handler = Arc::new(MessageHandler::new(TourStore::new(JsonFileStore::new(
        &cli.store,
    ))));

    match cli.command {
        Commands::Classify { url } => {
            if is_individual_tour_page(&url) {
                println!("{} individual tour page", "✓".green());
            } else {
                println!("{} not a tour page", "✗".yellow());
            }
        }

        Commands::Extract { url, html_file } => {
            let draft = extract_draft(&url, html_file).await?;
            print_draft(&draft);
        }

        Commands::Add { url, html_file } => {
            let draft = extract_draft(&url, html_file).await?;
            if !draft.has_title() {
                bail!("no tour title found on that page, refusing to store an empty record");
            }

            let response = handler
                .handle(TourRequest::AddTour { tour_data: draft })
                .await;
            match response.tour_count() {
                Some(count) if response.succeeded() => {
                    println!("{} tour added ({count} total)", "✓".green());
                }
                _ => bail!("store rejected the tour: {response:?}"),
            }
        }

        Commands::List => {
            let tours = handler.store().list().await?;
            if tours.is_empty() {
                println!("no tours stored yet");
                return Ok(());
            }
            print_matrix(&ComparisonMatrix::project(&tours));
        }

        Commands::Delete { id } => {
            let count = handler.store().remove(&id).await?;
            println!("{} {count} tour(s) remain", "✓".green());
        }

        Commands::Export { out } => {
            let tours = handler.store().list().await?;
            if tours.is_empty() {
                println!("no tours to export");
                return Ok(());
            }

            let path = out.join(csv_filename(Utc::now().date_naive()));
            tokio::fs::write(&path, to_csv(&tours)?)
                .await
                .with_context(|| format!("writing {}", path.display()))?;
            println!("{} exported {} tour(s) to {}", "✓".green(), tours.len(), path.display());
        }

        Commands::Clear => {
            handler.store().clear().await?;
            println!("{} all tours cleared", "✓".green());
        }
    }

    Ok(())
}

/// Load markup from disk or the live site, then run the site adapter.
async fn extract_draft(url: &Url, html_file: Option<PathBuf>) -> Result<TourDraft> {
    if adapter_for(url).is_none() {
        bail!("unsupported site: {url}");
    }

    let html = match html_file {
        Some(path) => tokio::fs::read_to_string(&path)
            .await
            .with_context(|| format!("reading {}", path.display()))?,
        None => fetch_page(url).await?,
    };

    let document = Html::parse_document(&html);
    extract_tour(&document, url).context("extraction produced no record")
}

async fn fetch_page(url: &Url) -> Result<String> {
    // Browser-like User-Agent, same trick the crawler uses to avoid
    // bot detection on these sites.
    let client = reqwest::Client::builder()
        .timeout(Duration::from_secs(30))
        .user_agent(
            "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 \
             (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36",
        )
        .build()
        .context("failed to create HTTP client")?;

    let response = client
        .get(url.clone())
        .send()
        .await
        .with_context(|| format!("fetching {url}"))?;

    let status = response.status();
    if !status.is_success() {
        bail!("HTTP {status} for {url}");
    }

    response.text().await.context("reading response body")
}

fn print_draft(draft: &TourDraft) {
    let title = if draft.has_title() {
        draft.title.normal()
    } else {
        "(no title found)".dimmed()
    };
    println!("{}  [{}]", title.bold(), draft.source);
    println!("  price:    {}", orelse(&draft.price));
    println!("  duration: {}", orelse(&draft.duration));
    println!("  rating:   {}", orelse(&draft.rating));
    println!("  reviews:  {}", orelse(&draft.review_count));
    println!("  included:   {}", orelse(&draft.included.join("; ")));
    println!("  excluded:   {}", orelse(&draft.excluded.join("; ")));
    println!("  highlights: {}", orelse(&draft.highlights.join("; ")));
}

fn print_matrix(matrix: &ComparisonMatrix) {
    let titles: Vec<_> = matrix.columns.iter().map(|c| c.title.as_str()).collect();
    println!("{:<12} {}", "Tour".bold(), titles.join(" | "));
    for row in &matrix.rows {
        println!("{:<12} {}", row.label, row.cells.join(" | "));
    }
}

fn orelse(value: &str) -> &str {
    if value.is_empty() {
        "-"
    } else {
        value
    }
}
