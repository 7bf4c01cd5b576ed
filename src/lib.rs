//! # event-reports
//!
//! Report service that turns event and advertisement records into `.docx` documents.
//!
//! ## Design Philosophy
//!
//! - **Format-agnostic assembly** - Report code builds a block tree; a [`DocumentModel`]
//!   turns it into bytes
//! - **Deterministic output** - Block order depends only on the input record
//! - **No shared mutable state** - Concurrent requests only share configuration and the
//!   naming counter
//!
//! ## Quick Start
//!
//! ```no_run
//! use event_reports::{Config, DocumentAssembler, DocxModel, HttpImageFetcher};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::default();
//!     let fetcher = Arc::new(HttpImageFetcher::new(&config.fetch)?);
//!     let assembler = DocumentAssembler::new(config, fetcher, Arc::new(DocxModel::new()));
//!
//!     let report = serde_json::from_str(r#"{ "anuncio": [], "evento": [], "eventos": [] }"#)?;
//!     let info = assembler.generate_final_report(&report).await?;
//!     println!("{}/{}", info.folder, info.document_name);
//!
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::unwrap_used)]
#![warn(clippy::expect_used)]

/// REST API module
pub mod api;
/// Configuration types
pub mod config;
/// Document block tree and serializers
pub mod document;
/// Error types
pub mod error;
/// Image retrieval
pub mod fetch;
/// Document naming
pub mod naming;
/// Report assembly engine
pub mod report;
/// Domain records
pub mod types;

use std::sync::Arc;

// Re-export commonly used types
pub use config::{Config, NamingStrategy, ServerConfig};
pub use document::{ContentBlock, Document, DocumentModel, DocxModel};
pub use error::{ApiError, Error, ErrorDetail, Result, ToHttpStatus};
pub use fetch::{HttpImageFetcher, ImageFetcher, LocalAssetLoader};
pub use naming::NamingService;
pub use report::{DocumentAssembler, SectionComposer};
pub use types::{
    AdvertisementRecord, EventRecord, EventWithActivitiesRecord, FinalReportRecord,
    GeneratedDocumentInfo, RecordId, ReportKind,
};

/// Helper function to serve the API with graceful signal handling.
///
/// Builds the production collaborators from `config`, serves until a termination signal
/// arrives, then lets in-flight requests finish.
///
/// - **Unix:** listens for SIGTERM and SIGINT, with fallbacks if signal registration fails.
/// - **Windows/other:** listens for Ctrl+C via `tokio::signal::ctrl_c()`.
///
/// # Example
///
/// ```no_run
/// use event_reports::{Config, run_with_shutdown};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let config = Config::from_env()?;
///
///     // Run with automatic signal handling
///     run_with_shutdown(config).await?;
///
///     Ok(())
/// }
/// ```
pub async fn run_with_shutdown(config: Config) -> Result<()> {
    let fetcher = Arc::new(HttpImageFetcher::new(&config.fetch)?);
    let model = Arc::new(DocxModel::new());

    tracing::info!(
        reports_dir = %config.reports.base_dir.display(),
        naming = ?config.reports.naming,
        fetcher = fetcher.name(),
        model = model.name(),
        "Report service configured"
    );

    let config = Arc::new(config);
    let assembler = Arc::new(DocumentAssembler::new((*config).clone(), fetcher, model));

    api::start_api_server(assembler, config, wait_for_signal()).await
}

#[cfg(unix)]
async fn wait_for_signal() {
    use tokio::signal::unix::{SignalKind, signal};

    // Set up signal handlers - these may fail in restricted environments (containers, tests)
    let sigterm_result = signal(SignalKind::terminate());
    let sigint_result = signal(SignalKind::interrupt());

    match (sigterm_result, sigint_result) {
        (Ok(mut sigterm), Ok(mut sigint)) => {
            tokio::select! {
                _ = sigterm.recv() => {
                    tracing::info!("Received SIGTERM signal");
                }
                _ = sigint.recv() => {
                    tracing::info!("Received SIGINT signal (Ctrl+C)");
                }
            }
        }
        (Err(e), _) => {
            tracing::warn!(error = %e, "Could not register SIGTERM handler, waiting for SIGINT only");
            if let Ok(mut sigint) = signal(SignalKind::interrupt()) {
                sigint.recv().await;
                tracing::info!("Received SIGINT signal (Ctrl+C)");
            } else {
                tracing::error!("Could not register any signal handlers, using ctrl_c fallback");
                tokio::signal::ctrl_c().await.ok();
            }
        }
        (_, Err(e)) => {
            tracing::warn!(error = %e, "Could not register SIGINT handler, waiting for SIGTERM only");
            if let Ok(mut sigterm) = signal(SignalKind::terminate()) {
                sigterm.recv().await;
                tracing::info!("Received SIGTERM signal");
            } else {
                tracing::error!("Could not register any signal handlers, using ctrl_c fallback");
                tokio::signal::ctrl_c().await.ok();
            }
        }
    }
}

#[cfg(not(unix))]
async fn wait_for_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => {
            tracing::info!("Received Ctrl+C signal");
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to listen for Ctrl+C signal");
        }
    }
}
