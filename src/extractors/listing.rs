// src/extractors/listing.rs

use crate::utils::error::ExtractError;
use once_cell::sync::Lazy;
use regex::Regex;
use scraper::{ElementRef, Html, Selector};
use serde::Serialize;

// --- Placeholders for fields absent from an item ---
pub const NO_TITLE: &str = "No title";
pub const NO_PRICE: &str = "No price";
pub const NO_AVAILABILITY: &str = "No availability";

// --- CSS Selectors (Lazy Static) ---
static ITEM_SELECTOR: Lazy<Selector> = Lazy::new(|| {
    Selector::parse("article.product_pod").expect("Failed to compile ITEM_SELECTOR")
});

static TITLE_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("h3 > a").expect("Failed to compile TITLE_SELECTOR"));

static PRICE_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("p.price_color").expect("Failed to compile PRICE_SELECTOR"));

static AVAILABILITY_SELECTOR: Lazy<Selector> = Lazy::new(|| {
    Selector::parse("p.instock.availability").expect("Failed to compile AVAILABILITY_SELECTOR")
});

// Collapses runs of whitespace inside element text (source markup wraps
// text nodes in indentation and newlines).
static WHITESPACE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s+").expect("Failed to compile WHITESPACE_RE"));

// --- Data Structures ---

/// One item's fields exactly as scraped. Absence is kept explicit here;
/// placeholder substitution happens in the tabulation pass.
#[derive(Debug, Clone, Default)]
pub struct RawRecord {
    pub title: Option<String>,
    pub raw_price: Option<String>,
    pub availability: Option<String>,
}

/// One normalized listing row.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Record {
    pub title: String,
    pub price: f64,
    pub availability: String,
}

/// Ordered collection of records from one source document.
/// Insertion order is document order; rebuilt in full on every extraction.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Listing {
    pub records: Vec<Record>,
}

impl Listing {
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Record> {
        self.records.iter()
    }
}

// --- Main Extractor Structure ---
pub struct ListingExtractor;

impl ListingExtractor {
    pub fn new() -> Self {
        Self {}
    }

    /// Extracts a normalized Listing from raw listing-page markup.
    ///
    /// Locates every item container, reads its title/price/availability
    /// fields, then runs the tabulation pass over the whole collected set:
    /// placeholder substitution for absent fields, price normalization for
    /// every row. A row whose price has no numeric content fails the whole
    /// call with [`ExtractError::Price`]. Zero items is not an error.
    pub fn extract(&self, markup: &str) -> Result<Listing, ExtractError> {
        let document = Html::parse_document(markup);
        let raw = self.scrape_records(&document);
        tracing::debug!("Located {} listing items in document", raw.len());

        let listing = self.tabulate(raw)?;
        tracing::info!("Extracted {} records from listing page", listing.len());
        Ok(listing)
    }

    /// Locates item containers and reads their fields as scraped.
    /// No substitution or parsing happens here; absent fields stay `None`.
    fn scrape_records(&self, document: &Html) -> Vec<RawRecord> {
        let mut records = Vec::new();

        for item in document.select(&ITEM_SELECTOR) {
            let title = item
                .select(&TITLE_SELECTOR)
                .next()
                .and_then(|anchor| anchor.value().attr("title"))
                .map(str::to_string);

            let raw_price = item.select(&PRICE_SELECTOR).next().map(element_text);

            let availability = item
                .select(&AVAILABILITY_SELECTOR)
                .next()
                .map(element_text);

            records.push(RawRecord {
                title,
                raw_price,
                availability,
            });
        }

        records
    }

    /// Tabulation pass over the whole collected table: substitutes the
    /// documented placeholder for each absent field, then normalizes every
    /// raw price string into a float.
    fn tabulate(&self, raw: Vec<RawRecord>) -> Result<Listing, ExtractError> {
        let mut records = Vec::with_capacity(raw.len());

        for (row, item) in raw.into_iter().enumerate() {
            let title = item.title.unwrap_or_else(|| NO_TITLE.to_string());
            let raw_price = item.raw_price.unwrap_or_else(|| NO_PRICE.to_string());
            let availability = item
                .availability
                .unwrap_or_else(|| NO_AVAILABILITY.to_string());

            let price = normalize_price(&raw_price).ok_or_else(|| {
                tracing::error!("Row {} has no parseable price: {:?}", row, raw_price);
                ExtractError::Price {
                    row,
                    raw: raw_price.clone(),
                }
            })?;

            records.push(Record {
                title,
                price,
                availability,
            });
        }

        Ok(Listing { records })
    }
}

/// Converts a raw price string into a float by removing every character
/// that is not an ASCII digit or a decimal point and parsing the remainder.
/// Returns `None` when nothing parseable remains. The strip removes commas
/// along with currency symbols, so "1,234.50" normalizes to 1234.5.
pub fn normalize_price(raw: &str) -> Option<f64> {
    let stripped: String = raw
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.')
        .collect();

    if stripped.is_empty() {
        return None;
    }

    stripped.parse::<f64>().ok()
}

/// Text content of an element with internal whitespace collapsed and
/// surrounding whitespace trimmed.
fn element_text(element: ElementRef) -> String {
    let text = element.text().collect::<String>();
    WHITESPACE_RE.replace_all(&text, " ").trim().to_string()
}
