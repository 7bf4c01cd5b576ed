use super::*;
use crate::api::routes::MISSING_DOWNLOAD_PARAMS;
use crate::document::docx::DOCX_CONTENT_TYPE;
use crate::report::test_helpers::event;

#[tokio::test]
async fn test_download_generated_document() {
    let (app, assembler, _temp_dir) = create_test_app(StaticImageFetcher::new());
    let info = assembler.generate_event_report(&event(7u64)).await.unwrap();

    let uri = format!(
        "/api/docx/download/{}/{}",
        info.folder,
        info.document_name.replace(' ', "%20")
    );
    let response = app.oneshot(get_request(&uri)).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers().get("content-type").unwrap(),
        DOCX_CONTENT_TYPE
    );
    let disposition = response
        .headers()
        .get("content-disposition")
        .unwrap()
        .to_str()
        .unwrap()
        .to_string();
    assert!(disposition.starts_with("attachment"));
    assert!(disposition.contains(&info.document_name));

    let on_disk = std::fs::read(
        assembler
            .reports_dir()
            .join(&info.folder)
            .join(&info.document_name),
    )
    .unwrap();
    assert_eq!(body_bytes(response).await, on_disk);
}

#[tokio::test]
async fn test_download_missing_parameters() {
    let (app, _assembler, _temp_dir) = create_test_app(StaticImageFetcher::new());

    for uri in ["/api/docx/download", "/api/docx/download/evento"] {
        let response = app.clone().oneshot(get_request(uri)).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "{uri}");

        let error = api_error(response).await;
        assert_eq!(error.error.code, "invalid_request");
        assert!(error.error.message.contains(MISSING_DOWNLOAD_PARAMS));
    }
}

#[tokio::test]
async fn test_download_rejects_traversal() {
    let (app, _assembler, _temp_dir) = create_test_app(StaticImageFetcher::new());

    let response = app
        .oneshot(get_request("/api/docx/download/evento/..%2F..%2Fsecret"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_download_unknown_document() {
    let (app, _assembler, _temp_dir) = create_test_app(StaticImageFetcher::new());

    let response = app
        .oneshot(get_request("/api/docx/download/evento/report-1.docx"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(api_error(response).await.error.code, "not_found");
}
