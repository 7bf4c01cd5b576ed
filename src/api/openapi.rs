//! OpenAPI documentation and schema generation
//!
//! This module defines the OpenAPI specification for the event-reports REST API
//! using utoipa for compile-time spec generation.

use utoipa::OpenApi;

/// OpenAPI documentation for the event-reports REST API
///
/// The document is served via `/api/docx/openapi.json`.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "event-reports REST API",
        version = "0.1.0",
        description = "Generates .docx reports for events, multi-activity events and dissemination campaigns",
        license(
            name = "MIT OR Apache-2.0"
        )
    ),
    servers(
        (url = "http://localhost:3000", description = "Local development server")
    ),
    paths(
        // Reports
        crate::api::routes::generate_legacy_event_report,
        crate::api::routes::generate_event_report,
        crate::api::routes::generate_events_report,
        crate::api::routes::generate_final_report,

        // Download
        crate::api::routes::download_document,
        crate::api::routes::download_missing_params,

        // System
        crate::api::routes::health_check,
        crate::api::routes::openapi_spec,
    ),
    components(schemas(
        // Domain records from types.rs
        crate::types::EventReportRequest,
        crate::types::EventsReportRequest,
        crate::types::EventRecord,
        crate::types::EventWithActivitiesRecord,
        crate::types::AdvertisementRecord,
        crate::types::FinalReportRecord,
        crate::types::OrganizerRecord,
        crate::types::PlaceRecord,
        crate::types::ValuePairRecord,
        crate::types::SpeakerRecord,
        crate::types::ActivityRecord,
        crate::types::ImageRef,
        crate::types::ReportKind,
        crate::types::GeneratedDocumentInfo,

        // Config types from config.rs
        crate::config::Config,
        crate::config::ServerConfig,
        crate::config::ReportsConfig,
        crate::config::NamingStrategy,
        crate::config::FetchConfig,
        crate::config::LayoutConfig,
        crate::config::ImageSize,

        // Error types from error.rs
        crate::error::ApiError,
        crate::error::ErrorDetail,
    )),
    tags(
        (name = "reports", description = "Report generation - events, multi-activity events, final dissemination report"),
        (name = "download", description = "Download - stream generated documents"),
        (name = "system", description = "System endpoints - Health checks, OpenAPI spec"),
    )
)]
pub struct ApiDoc;
