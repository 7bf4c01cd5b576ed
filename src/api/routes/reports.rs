//! Report generation handlers.

use crate::api::AppState;
use crate::error::Error;
use crate::types::{
    EventReportRequest, EventsReportRequest, FinalReportRecord, GeneratedDocumentInfo,
};
use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    response::{IntoResponse, Response},
};

/// POST /evento - Generate the report of one plain event
#[utoipa::path(
    post,
    path = "/api/docx/evento",
    tag = "reports",
    request_body = EventReportRequest,
    responses(
        (status = 200, description = "Document generated", body = GeneratedDocumentInfo),
        (status = 422, description = "Payload is not a valid event", body = crate::error::ApiError),
        (status = 502, description = "An image could not be fetched", body = crate::error::ApiError),
        (status = 500, description = "Document could not be written", body = crate::error::ApiError)
    )
)]
pub async fn generate_event_report(
    State(state): State<AppState>,
    payload: Result<Json<EventReportRequest>, JsonRejection>,
) -> Response {
    let Json(request) = match payload {
        Ok(payload) => payload,
        Err(rejection) => return Error::from(rejection).into_response(),
    };

    match state
        .assembler
        .generate_event_report(&request.evento)
        .await
    {
        Ok(info) => Json(info).into_response(),
        Err(e) => e.into_response(),
    }
}

/// POST / - Single event report under its original path
#[utoipa::path(
    post,
    path = "/api/docx",
    tag = "reports",
    request_body = EventReportRequest,
    responses(
        (status = 200, description = "Document generated", body = GeneratedDocumentInfo),
        (status = 422, description = "Payload is not a valid event", body = crate::error::ApiError),
        (status = 502, description = "An image could not be fetched", body = crate::error::ApiError)
    )
)]
pub async fn generate_legacy_event_report(
    state: State<AppState>,
    payload: Result<Json<EventReportRequest>, JsonRejection>,
) -> Response {
    generate_event_report(state, payload).await
}

/// POST /eventos - Generate the report of one multi-activity event
#[utoipa::path(
    post,
    path = "/api/docx/eventos",
    tag = "reports",
    request_body = EventsReportRequest,
    responses(
        (status = 200, description = "Document generated", body = GeneratedDocumentInfo),
        (status = 422, description = "Payload is not a valid multi-activity event", body = crate::error::ApiError),
        (status = 502, description = "An image could not be fetched", body = crate::error::ApiError),
        (status = 500, description = "Document could not be written", body = crate::error::ApiError)
    )
)]
pub async fn generate_events_report(
    State(state): State<AppState>,
    payload: Result<Json<EventsReportRequest>, JsonRejection>,
) -> Response {
    let Json(request) = match payload {
        Ok(payload) => payload,
        Err(rejection) => return Error::from(rejection).into_response(),
    };

    match state
        .assembler
        .generate_events_report(&request.evento)
        .await
    {
        Ok(info) => Json(info).into_response(),
        Err(e) => e.into_response(),
    }
}

/// POST /informe - Generate the aggregate dissemination report
#[utoipa::path(
    post,
    path = "/api/docx/informe",
    tag = "reports",
    request_body = FinalReportRecord,
    responses(
        (status = 200, description = "Document generated", body = GeneratedDocumentInfo),
        (status = 422, description = "Payload is not a valid final report", body = crate::error::ApiError),
        (status = 502, description = "An image could not be fetched", body = crate::error::ApiError),
        (status = 500, description = "Document could not be written", body = crate::error::ApiError)
    )
)]
pub async fn generate_final_report(
    State(state): State<AppState>,
    payload: Result<Json<FinalReportRecord>, JsonRejection>,
) -> Response {
    let Json(report) = match payload {
        Ok(payload) => payload,
        Err(rejection) => return Error::from(rejection).into_response(),
    };

    match state.assembler.generate_final_report(&report).await {
        Ok(info) => Json(info).into_response(),
        Err(e) => e.into_response(),
    }
}
