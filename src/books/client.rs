// src/books/client.rs
use crate::utils::error::FetchError;
use reqwest::header;

const SCRAPER_USER_AGENT: &str = concat!("listing_dashboard/", env!("CARGO_PKG_VERSION"));

/// Creates a reqwest client configured for fetching the listing source.
pub fn build_client() -> Result<reqwest::Client, reqwest::Error> {
    reqwest::Client::builder()
        .user_agent(SCRAPER_USER_AGENT)
        .build()
}

/// Downloads the listing page and returns its body text.
/// Fetching is all this layer does; parsing is owned by the extractor.
pub async fn fetch_listing_page(
    client: &reqwest::Client,
    url: &str,
) -> Result<String, FetchError> {
    tracing::info!("Fetching listing page from: {}", url);

    let response = client
        .get(url)
        .header(header::ACCEPT, "text/html,application/xhtml+xml,*/*")
        .send()
        .await?; // Propagates reqwest::Error as FetchError::Network

    let status = response.status();
    if !status.is_success() {
        tracing::error!("HTTP error status: {} for URL: {}", status, url);
        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(FetchError::PageNotFound(url.to_string()));
        }
        return Err(FetchError::Http(status));
    }

    let body = response.text().await?;
    tracing::debug!("Downloaded {} bytes from {}", body.len(), url);

    Ok(body)
}
