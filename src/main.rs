// src/main.rs
mod books;
mod catalog;
mod charts;
mod export;
mod extractors;
mod render;
mod server;
mod storage;
mod utils;

use clap::Parser;
use server::AppState;
use storage::StorageManager;
use utils::error::FetchError;
use utils::AppError;

/// Web dashboard over a scraped book listing
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Address to bind the server to
    #[arg(short, long, default_value = "0.0.0.0:5000")]
    bind: String,

    /// URL of the listing page to scrape
    #[arg(long, default_value = "http://books.toscrape.com/index.html")]
    source_url: String,

    /// Directory generated charts are written to
    #[arg(long, default_value = "./static")]
    static_dir: String,

    /// Directory holding the pre-existing CSV catalogs
    #[arg(long, default_value = "./catalog")]
    catalog_dir: String,
}

#[tokio::main]
async fn main() -> Result<(), AppError> {
    // 1. Setup Logging (reads RUST_LOG env var)
    utils::logging::setup_logging();

    // 2. Parse CLI Arguments
    let args = Args::parse();
    tracing::info!("Starting dashboard with args: {:?}", args);

    // 3. Initialize storage (static output dir + catalog dir)
    let storage = StorageManager::new(&args.static_dir, &args.catalog_dir)?;

    // 4. Build the HTTP client used for scraping the source site
    let http = books::client::build_client().map_err(FetchError::from)?;

    // 5. Wire up shared state and serve
    let state = AppState::new(storage, http, args.source_url);
    server::run(state, &args.bind).await
}
