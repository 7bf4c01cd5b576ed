use super::*;
use crate::error::ApiError;
use crate::report::test_helpers::{StaticImageFetcher, create_test_assembler};
use axum::body::Body;
use axum::http::{Request, StatusCode};
use std::net::SocketAddr;
use std::time::Duration;
use tower::ServiceExt;

mod download;

/// Router backed by an in-memory image fetcher and a temp reports directory.
/// Returns the router, the assembler and the tempdir (which must be kept alive).
fn create_test_app(
    fetcher: StaticImageFetcher,
) -> (Router, Arc<DocumentAssembler>, tempfile::TempDir) {
    let (assembler, _fetcher, temp_dir) = create_test_assembler(fetcher);
    let config = Arc::new(assembler.config().clone());
    let assembler = Arc::new(assembler);
    (create_router(assembler.clone(), config), assembler, temp_dir)
}

fn post_json(uri: &str, body: &serde_json::Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_vec(body).unwrap()))
        .unwrap()
}

fn get_request(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

async fn body_bytes(response: axum::response::Response) -> Vec<u8> {
    axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap()
        .to_vec()
}

async fn api_error(response: axum::response::Response) -> ApiError {
    serde_json::from_slice(&body_bytes(response).await).unwrap()
}

/// A plain event as a client sends it: numeric id and quota, no type or category.
fn event_json(id: u64) -> serde_json::Value {
    serde_json::json!({
        "id": id,
        "nombre": format!("Congreso {id}"),
        "descripcion": "Encuentro anual",
        "fechaInicioInscripcion": "2024-01-01",
        "fechaFinInscripcion": "2024-01-31",
        "fechaInicioEvento": "2024-03-05",
        "fechaFinEvento": "2024-03-07",
        "cupo": 120,
        "organizadores": [{ "nombre": "Facultad" }],
        "lugares": [{ "nombre": "Auditorio" }],
        "valor": [{ "rol": "Estudiante", "valor": "10" }],
        "ponentes": [{
            "nombre": "Ana",
            "apellido": "Pérez",
            "correo": "ana@example.com",
            "resumen": "Investigadora"
        }],
        "evidencias": ["ev-1.jpg"],
        "imagen": "evento.jpg",
        "cronograma": "cronograma.jpg"
    })
}

#[tokio::test]
async fn test_api_server_spawns_and_shuts_down() {
    let (assembler, _fetcher, _temp_dir) = create_test_assembler(StaticImageFetcher::new());

    let mut config = assembler.config().clone();
    config.server.bind_address = SocketAddr::from(([127, 0, 0, 1], 0)); // Port 0 = OS assigns a free port
    let config = Arc::new(config);

    let (tx, rx) = tokio::sync::oneshot::channel::<()>();
    let api_handle = tokio::spawn(start_api_server(Arc::new(assembler), config, async move {
        let _ = rx.await;
    }));

    // Give it a moment to start
    tokio::time::sleep(Duration::from_millis(100)).await;
    tx.send(()).unwrap();

    let result = tokio::time::timeout(Duration::from_secs(5), api_handle)
        .await
        .unwrap()
        .unwrap();
    assert!(result.is_ok());
}

#[tokio::test]
async fn test_cors_enabled() {
    let (app, _assembler, _temp_dir) = create_test_app(StaticImageFetcher::new());

    let request = Request::builder()
        .uri("/api/docx/health")
        .header("Origin", "http://localhost:8080")
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert!(
        response
            .headers()
            .contains_key("access-control-allow-origin"),
        "CORS header should be present when CORS is enabled"
    );
}

#[tokio::test]
async fn test_cors_disabled() {
    let (assembler, _fetcher, _temp_dir) = create_test_assembler(StaticImageFetcher::new());
    let mut config = assembler.config().clone();
    config.server.cors_enabled = false;

    let app = create_router(Arc::new(assembler), Arc::new(config));
    let request = Request::builder()
        .uri("/api/docx/health")
        .header("Origin", "http://localhost:8080")
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert!(
        !response
            .headers()
            .contains_key("access-control-allow-origin")
    );
}

#[tokio::test]
async fn test_custom_route_prefix() {
    let (assembler, _fetcher, _temp_dir) = create_test_assembler(StaticImageFetcher::new());
    let mut config = assembler.config().clone();
    config.server.route_prefix = "/reportes/".to_string();

    let app = create_router(Arc::new(assembler), Arc::new(config));

    let response = app
        .clone()
        .oneshot(get_request("/reportes/health"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app.oneshot(get_request("/api/docx/health")).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
