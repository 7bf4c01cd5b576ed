//! REST API server module
//!
//! Exposes report generation and document download over HTTP. Every route lives under
//! the configured prefix (`/api/docx` by default).

use crate::report::DocumentAssembler;
use crate::{Config, Result};
use axum::{
    Router,
    http::HeaderValue,
    routing::{get, post},
};
use std::future::Future;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;

pub mod error_response;
pub mod openapi;
pub mod routes;
pub mod state;

pub use openapi::ApiDoc;
pub use state::AppState;

/// Create the API router with all route definitions
///
/// # Routes
///
/// ## Reports
/// - `POST /` - Single event report (original path)
/// - `POST /evento` - Single event report
/// - `POST /eventos` - Multi-activity event report
/// - `POST /informe` - Final dissemination report
///
/// ## Download
/// - `GET /download/:folder/:documentName` - Stream a generated document
/// - `GET /download`, `GET /download/:folder` - 400, both parameters are required
///
/// ## System
/// - `GET /health` - Health check
/// - `GET /openapi.json` - OpenAPI specification
pub fn create_router(assembler: Arc<DocumentAssembler>, config: Arc<Config>) -> Router {
    let state = AppState::new(assembler);

    let routes = Router::new()
        // Reports
        .route("/", post(routes::generate_legacy_event_report))
        .route("/evento", post(routes::generate_event_report))
        .route("/eventos", post(routes::generate_events_report))
        .route("/informe", post(routes::generate_final_report))
        // Download
        .route("/download", get(routes::download_missing_params))
        .route("/download/:folder", get(routes::download_missing_params))
        .route(
            "/download/:folder/:documentName",
            get(routes::download_document),
        )
        // System
        .route("/health", get(routes::health_check))
        .route("/openapi.json", get(routes::openapi_spec))
        .with_state(state);

    let prefix = config.server.route_prefix.trim_end_matches('/');
    let router = if prefix.is_empty() {
        routes
    } else {
        Router::new().nest(prefix, routes)
    };

    let router = router.layer(TraceLayer::new_for_http());

    // Apply CORS middleware if enabled in config
    if config.server.cors_enabled {
        let cors = build_cors_layer(&config.server.cors_origins);
        router.layer(cors)
    } else {
        router
    }
}

/// Build a CORS layer based on configured origins
///
/// `"*"` (or an empty list) allows any origin; otherwise only the listed origins are
/// allowed. Methods and headers are always unrestricted.
fn build_cors_layer(origins: &[String]) -> CorsLayer {
    // Check if "*" (all origins) is in the list
    let allow_any = origins.iter().any(|o| o == "*");

    if allow_any || origins.is_empty() {
        // Allow all origins (default for local development)
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        // Allow specific origins
        let allowed: Vec<HeaderValue> = origins.iter().filter_map(|o| o.parse().ok()).collect();

        CorsLayer::new()
            .allow_origin(AllowOrigin::list(allowed))
            .allow_methods(Any)
            .allow_headers(Any)
    }
}

/// Start the API server on the configured bind address.
///
/// Runs until `shutdown` resolves; in-flight requests are allowed to finish.
///
/// # Example
///
/// ```no_run
/// use event_reports::{Config, DocumentAssembler, DocxModel, HttpImageFetcher};
/// use std::sync::Arc;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let config = Arc::new(Config::default());
/// let fetcher = Arc::new(HttpImageFetcher::new(&config.fetch)?);
/// let assembler = Arc::new(DocumentAssembler::new(
///     (*config).clone(),
///     fetcher,
///     Arc::new(DocxModel::new()),
/// ));
///
/// // Serve until Ctrl+C
/// event_reports::api::start_api_server(assembler, config, async {
///     let _ = tokio::signal::ctrl_c().await;
/// })
/// .await?;
/// # Ok(())
/// # }
/// ```
pub async fn start_api_server<F>(
    assembler: Arc<DocumentAssembler>,
    config: Arc<Config>,
    shutdown: F,
) -> Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let bind_address = config.server.bind_address;

    tracing::info!(
        address = %bind_address,
        prefix = %config.server.route_prefix,
        "Starting API server"
    );

    let app = create_router(assembler, config);

    // Bind TCP listener to the configured address
    let listener = TcpListener::bind(bind_address)
        .await
        .map_err(crate::error::Error::Io)?;

    tracing::info!(
        address = %bind_address,
        "API server listening"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await
        .map_err(|e| crate::error::Error::ApiServerError(e.to_string()))?;

    tracing::info!("API server stopped");
    Ok(())
}

// unwrap/expect are acceptable in tests for concise failure-on-error assertions
#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests;
