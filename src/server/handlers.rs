// src/server/handlers.rs
use axum::extract::{Path, State};
use axum::http::header;
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum::Json;
use chrono::Utc;

use super::{AppState, Snapshot};
use crate::extractors::ListingExtractor;
use crate::utils::AppError;
use crate::{books, catalog, charts, export, render};

pub async fn home(State(state): State<AppState>) -> Html<String> {
    Html(render::home(&state.storage.list_catalogs()))
}

/// Fetches the source page, extracts a fresh Listing, replaces the shared
/// one and renders it. The previous Listing is fully discarded.
pub async fn scrape(State(state): State<AppState>) -> Result<Html<String>, AppError> {
    let markup = books::fetch_listing_page(&state.http, &state.source_url).await?;
    let listing = ListingExtractor::new().extract(&markup)?;

    let snapshot = Snapshot {
        listing,
        scraped_at: Utc::now(),
    };
    let html = render::listing_table(&snapshot.listing, snapshot.scraped_at);
    *state.listing.write().await = Some(snapshot);

    Ok(Html(html))
}

pub async fn table(State(state): State<AppState>) -> Response {
    let guard = state.listing.read().await;
    match guard.as_ref() {
        Some(snapshot) => {
            Html(render::listing_table(&snapshot.listing, snapshot.scraped_at)).into_response()
        }
        None => Redirect::to("/scrape").into_response(),
    }
}

pub async fn bar_chart(State(state): State<AppState>) -> Result<Response, AppError> {
    let guard = state.listing.read().await;
    let snapshot = match guard.as_ref() {
        Some(snapshot) => snapshot,
        None => return Ok(Redirect::to("/scrape").into_response()),
    };

    let path = state.storage.bar_chart_path();
    charts::render_bar_chart(&snapshot.listing, &path)?;

    Ok(Html(render::chart_page("Book Prices", &static_src(&path))).into_response())
}

pub async fn pie_chart(State(state): State<AppState>) -> Result<Response, AppError> {
    let guard = state.listing.read().await;
    let snapshot = match guard.as_ref() {
        Some(snapshot) => snapshot,
        None => return Ok(Redirect::to("/scrape").into_response()),
    };

    let path = state.storage.pie_chart_path();
    charts::render_pie_chart(&snapshot.listing, &path)?;

    Ok(Html(render::chart_page("Availability", &static_src(&path))).into_response())
}

pub async fn export_csv(State(state): State<AppState>) -> Result<Response, AppError> {
    let guard = state.listing.read().await;
    let snapshot = match guard.as_ref() {
        Some(snapshot) => snapshot,
        None => return Ok(Redirect::to("/scrape").into_response()),
    };

    let bytes = export::write_csv(&snapshot.listing)?;
    Ok((
        [
            (header::CONTENT_TYPE, "text/csv"),
            (
                header::CONTENT_DISPOSITION,
                "attachment; filename=\"listing.csv\"",
            ),
        ],
        bytes,
    )
        .into_response())
}

/// JSON view of the shared Listing. `scraped_at: null` with an empty record
/// array is the "no data yet" answer.
pub async fn listing_json(State(state): State<AppState>) -> Response {
    let guard = state.listing.read().await;
    match guard.as_ref() {
        Some(snapshot) => Json(serde_json::json!({
            "scraped_at": snapshot.scraped_at,
            "records": snapshot.listing.records,
        }))
        .into_response(),
        None => Json(serde_json::json!({
            "scraped_at": null,
            "records": [],
        }))
        .into_response(),
    }
}

pub async fn catalog_table(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Html<String>, AppError> {
    let path = state.storage.catalog_path(&name)?;
    let table = catalog::load_catalog(&name, &path)?;
    Ok(Html(render::catalog_table(&table)))
}

pub async fn catalog_download(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Response, AppError> {
    let path = state.storage.catalog_path(&name)?;
    let bytes = catalog::read_raw(&path)?;

    let disposition = format!("attachment; filename=\"{}.csv\"", name);
    Ok((
        [
            (header::CONTENT_TYPE, "text/csv"),
            (header::CONTENT_DISPOSITION, disposition.as_str()),
        ],
        bytes,
    )
        .into_response())
}

fn static_src(path: &std::path::Path) -> String {
    match path.file_name().and_then(|name| name.to_str()) {
        Some(name) => format!("/static/{}", name),
        None => "/static".to_string(),
    }
}
