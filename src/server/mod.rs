// src/server/mod.rs
pub mod handlers;

use std::sync::Arc;

use axum::response::{Html, IntoResponse, Response};
use axum::routing::get;
use axum::Router;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::extractors::Listing;
use crate::render;
use crate::storage::StorageManager;
use crate::utils::AppError;

/// The most recent scrape, stamped with its fetch time. Replaced wholesale
/// by each `/scrape`; never mutated incrementally.
#[derive(Debug, Clone)]
pub struct Snapshot {
    pub listing: Listing,
    pub scraped_at: DateTime<Utc>,
}

/// Listing shared across requests. `None` is the "no data yet" sentinel;
/// handlers that need records redirect to `/scrape` instead of assuming an
/// empty default.
pub type SharedListing = Arc<RwLock<Option<Snapshot>>>;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub listing: SharedListing,
    pub storage: Arc<StorageManager>,
    pub http: reqwest::Client,
    pub source_url: String,
}

impl AppState {
    pub fn new(storage: StorageManager, http: reqwest::Client, source_url: String) -> Self {
        Self {
            listing: Arc::new(RwLock::new(None)),
            storage: Arc::new(storage),
            http,
            source_url,
        }
    }
}

/// Build the axum application router
pub fn build_router(state: AppState) -> Router {
    let static_dir = state.storage.static_dir().to_path_buf();

    Router::new()
        .route("/", get(handlers::home))
        .route("/scrape", get(handlers::scrape))
        .route("/table", get(handlers::table))
        .route("/bar", get(handlers::bar_chart))
        .route("/pie", get(handlers::pie_chart))
        .route("/export.csv", get(handlers::export_csv))
        .route("/api/listing", get(handlers::listing_json))
        .route("/catalog/:name", get(handlers::catalog_table))
        .route("/catalog/:name/download", get(handlers::catalog_download))
        .nest_service("/static", ServeDir::new(static_dir))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Bind and serve until shutdown.
pub async fn run(state: AppState, bind: &str) -> Result<(), AppError> {
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(bind).await?;
    tracing::info!("Dashboard listening on {}", bind);

    axum::serve(listener, app).await?;
    Ok(())
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        tracing::error!("Request failed: {}", self);

        let body = format!(
            "<h1>{}</h1>\n<p>{}</p>\n",
            status,
            render::escape(&self.to_string())
        );
        (status, Html(render::page("Error", &body))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extractors::Record;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use tower::util::ServiceExt;

    fn test_state(dir: &std::path::Path) -> AppState {
        let storage = StorageManager::new(dir.join("static"), dir.join("catalog")).unwrap();
        AppState::new(
            storage,
            reqwest::Client::new(),
            "http://localhost/unused".to_string(),
        )
    }

    async fn populate(state: &AppState) {
        let listing = Listing {
            records: vec![
                Record {
                    title: "Book One".to_string(),
                    price: 51.77,
                    availability: "In stock".to_string(),
                },
                Record {
                    title: "Book Two".to_string(),
                    price: 23.0,
                    availability: "Out of stock".to_string(),
                },
            ],
        };
        *state.listing.write().await = Some(Snapshot {
            listing,
            scraped_at: Utc::now(),
        });
    }

    async fn send_get(app: Router, uri: &str) -> axum::http::Response<Body> {
        app.oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap()
    }

    async fn body_text(response: axum::http::Response<Body>) -> String {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn table_redirects_when_no_data_yet() {
        let dir = tempfile::tempdir().unwrap();
        let response = send_get(build_router(test_state(dir.path())), "/table").await;

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(response.headers().get("location").unwrap(), "/scrape");
    }

    #[tokio::test]
    async fn table_renders_populated_listing() {
        let dir = tempfile::tempdir().unwrap();
        let state = test_state(dir.path());
        populate(&state).await;

        let response = send_get(build_router(state), "/table").await;
        assert_eq!(response.status(), StatusCode::OK);

        let body = body_text(response).await;
        assert!(body.contains("Book One"));
        assert!(body.contains("2 records"));
    }

    #[tokio::test]
    async fn export_serves_csv_attachment() {
        let dir = tempfile::tempdir().unwrap();
        let state = test_state(dir.path());
        populate(&state).await;

        let response = send_get(build_router(state), "/export.csv").await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers().get("content-type").unwrap(),
            "text/csv"
        );

        let body = body_text(response).await;
        assert!(body.starts_with("title,price,availability\n"));
        assert!(body.contains("Book One,51.77,In stock"));
    }

    #[tokio::test]
    async fn export_redirects_when_no_data_yet() {
        let dir = tempfile::tempdir().unwrap();
        let response = send_get(build_router(test_state(dir.path())), "/export.csv").await;
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
    }

    #[tokio::test]
    async fn charts_render_into_static_dir() {
        let dir = tempfile::tempdir().unwrap();
        let state = test_state(dir.path());
        populate(&state).await;

        let response = send_get(build_router(state), "/bar").await;
        assert_eq!(response.status(), StatusCode::OK);
        assert!(dir.path().join("static/bar_chart.svg").is_file());
    }

    #[tokio::test]
    async fn missing_catalog_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let response = send_get(build_router(test_state(dir.path())), "/catalog/missing").await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn catalog_renders_as_table() {
        let dir = tempfile::tempdir().unwrap();
        let catalog_dir = dir.path().join("catalog");
        std::fs::create_dir_all(&catalog_dir).unwrap();
        std::fs::write(
            catalog_dir.join("pipettes.csv"),
            "model,price\nP20,305.00\n",
        )
        .unwrap();

        let response = send_get(build_router(test_state(dir.path())), "/catalog/pipettes").await;
        assert_eq!(response.status(), StatusCode::OK);

        let body = body_text(response).await;
        assert!(body.contains("<th>model</th>"));
        assert!(body.contains("<td>P20</td>"));
    }

    #[tokio::test]
    async fn listing_json_reports_no_data_sentinel() {
        let dir = tempfile::tempdir().unwrap();
        let response = send_get(build_router(test_state(dir.path())), "/api/listing").await;
        assert_eq!(response.status(), StatusCode::OK);

        let body = body_text(response).await;
        assert!(body.contains("\"scraped_at\":null"));
    }
}
