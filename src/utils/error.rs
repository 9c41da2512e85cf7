// src/utils/error.rs
use axum::http::StatusCode;
use thiserror::Error;

// Define specific error types for different parts of the application
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("Network request failed: {0}")]
    Network(#[from] reqwest::Error), // Automatically convert reqwest errors

    #[error("HTTP error: {0}")]
    Http(reqwest::StatusCode), // e.g., 403 Forbidden, 500 from the source site

    #[error("Listing page not found: {0}")]
    PageNotFound(String),
}

#[derive(Error, Debug)]
pub enum ExtractError {
    /// A price field had no numeric content left after stripping.
    /// Fatal for the whole extraction call; downstream aggregation
    /// assumes every row carries a valid price.
    #[error("Unparseable price in row {row}: {raw:?}")]
    Price { row: usize, raw: String },
}

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Catalog file not found: {0}")]
    NotFound(String),

    #[error("Invalid catalog name: {0}")]
    InvalidName(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Malformed CSV: {0}")]
    Malformed(#[from] csv::Error),
}

#[derive(Error, Debug)]
pub enum ChartError {
    #[error("Chart rendering failed: {0}")]
    Render(String),
}

impl<E: std::error::Error + Send + Sync> From<plotters::drawing::DrawingAreaErrorKind<E>>
    for ChartError
{
    fn from(err: plotters::drawing::DrawingAreaErrorKind<E>) -> Self {
        ChartError::Render(err.to_string())
    }
}

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error), // Automatically convert IO errors

    #[error("Fetching the listing page failed: {0}")]
    Fetch(#[from] FetchError),

    #[error("Extraction failed: {0}")]
    Extraction(#[from] ExtractError),

    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    #[error("Chart error: {0}")]
    Chart(#[from] ChartError),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("CSV serialization failed: {0}")]
    Csv(#[from] csv::Error),
}

impl AppError {
    /// HTTP status this error maps to when it escapes a request handler.
    pub fn status(&self) -> StatusCode {
        match self {
            // The source page is the upstream at fault.
            AppError::Fetch(_) | AppError::Extraction(_) => StatusCode::BAD_GATEWAY,
            AppError::Catalog(CatalogError::NotFound(_)) => StatusCode::NOT_FOUND,
            AppError::Catalog(CatalogError::InvalidName(_)) => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}
