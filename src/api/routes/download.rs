//! Download handlers: stream a generated document back to the caller.

use crate::api::AppState;
use crate::error::Error;
use axum::{
    body::Body,
    extract::{Path, State},
    http::header,
    response::{IntoResponse, Response},
};
use tokio_util::io::ReaderStream;

/// Message returned when a download path parameter is missing
pub const MISSING_DOWNLOAD_PARAMS: &str = "Folder and Document name are required";

/// GET /download/:folder/:documentName - Stream a generated document
#[utoipa::path(
    get,
    path = "/api/docx/download/{folder}/{documentName}",
    tag = "download",
    params(
        ("folder" = String, Path, description = "Report folder (evento, eventos, informe)"),
        ("documentName" = String, Path, description = "Document name returned by a generate call")
    ),
    responses(
        (status = 200, description = "The document, as an attachment", content_type = "application/vnd.openxmlformats-officedocument.wordprocessingml.document"),
        (status = 400, description = "Missing or invalid path parameter", body = crate::error::ApiError),
        (status = 404, description = "Document not found", body = crate::error::ApiError)
    )
)]
pub async fn download_document(
    State(state): State<AppState>,
    Path((folder, document_name)): Path<(String, String)>,
) -> Response {
    if folder.trim().is_empty() || document_name.trim().is_empty() {
        return missing_params().into_response();
    }

    let path = match state
        .assembler
        .resolve_download(&folder, &document_name)
        .await
    {
        Ok(path) => path,
        Err(e) => return e.into_response(),
    };

    let file = match tokio::fs::File::open(&path).await {
        Ok(file) => file,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Error::NotFound(format!("{folder}/{document_name}")).into_response();
        }
        Err(e) => return Error::Io(e).into_response(),
    };

    tracing::debug!(folder = %folder, document = %document_name, "streaming document");

    let body = Body::from_stream(ReaderStream::new(file));
    let disposition = format!("attachment; filename=\"{document_name}\"");

    (
        [
            (header::CONTENT_TYPE, state.assembler.content_type().to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        body,
    )
        .into_response()
}

/// GET /download and GET /download/:folder - Rejected, both parameters are required
#[utoipa::path(
    get,
    path = "/api/docx/download",
    tag = "download",
    responses(
        (status = 400, description = "Folder and Document name are required", body = crate::error::ApiError)
    )
)]
pub async fn download_missing_params() -> Response {
    missing_params().into_response()
}

fn missing_params() -> Error {
    Error::InvalidRequest(MISSING_DOWNLOAD_PARAMS.to_string())
}
