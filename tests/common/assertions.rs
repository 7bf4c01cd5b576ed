//! Helpers for inspecting generated packages and API responses

use axum::body::Body;
use axum::http::{Request, Response};
use event_reports::GeneratedDocumentInfo;
use std::io::{Cursor, Read};
use std::path::Path;

/// POST `body` as JSON to `uri`
pub fn post_json(uri: &str, body: &serde_json::Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_vec(body).unwrap()))
        .unwrap()
}

/// Collect a response body
pub async fn body_bytes(response: Response<Body>) -> Vec<u8> {
    axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap()
        .to_vec()
}

/// Parse a successful generation response
pub async fn generated_info(response: Response<Body>) -> GeneratedDocumentInfo {
    serde_json::from_slice(&body_bytes(response).await).unwrap()
}

/// Read a stored document from `<reports_dir>/<folder>/<name>`
pub fn read_document(reports_dir: &Path, info: &GeneratedDocumentInfo) -> Vec<u8> {
    std::fs::read(reports_dir.join(&info.folder).join(&info.document_name)).unwrap()
}

/// Text of `word/document.xml` inside a docx package
pub fn document_xml(bytes: &[u8]) -> String {
    let mut archive = zip::ZipArchive::new(Cursor::new(bytes)).unwrap();
    let mut part = archive.by_name("word/document.xml").unwrap();
    let mut xml = String::new();
    part.read_to_string(&mut xml).unwrap();
    xml
}

/// Names of the media parts inside a docx package
pub fn media_parts(bytes: &[u8]) -> Vec<String> {
    let archive = zip::ZipArchive::new(Cursor::new(bytes)).unwrap();
    archive
        .file_names()
        .filter(|name| name.starts_with("word/media/"))
        .map(str::to_string)
        .collect()
}

/// Byte offset of `needle` in `haystack`, panicking with context when absent
pub fn offset_of(haystack: &str, needle: &str) -> usize {
    haystack
        .find(needle)
        .unwrap_or_else(|| panic!("{needle:?} not found in document"))
}
