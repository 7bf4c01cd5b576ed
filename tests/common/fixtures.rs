//! Payload fixtures and image server helpers

use serde_json::{Value, json};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// 1x1 PNG header bytes; enough for the docx writer to pick the png extension
pub const PNG: &[u8] = &[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A, 0, 0, 0, 0x0D];

/// JPEG start-of-image marker
pub const JPEG: &[u8] = &[0xFF, 0xD8, 0xFF, 0xE0, 0, 0x10];

/// Serve `body` at `route` on `server`
pub async fn serve_image(server: &MockServer, route: &str, body: &[u8]) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(body.to_vec()))
        .mount(server)
        .await;
}

/// Start an image server with every image referenced by the fixtures below
pub async fn image_server() -> MockServer {
    let server = MockServer::start().await;
    for route in ["/evento.png", "/cronograma.png", "/anuncio.jpg"] {
        serve_image(&server, route, PNG).await;
    }
    for route in ["/ev-1.jpg", "/ev-2.jpg"] {
        serve_image(&server, route, JPEG).await;
    }
    server
}

/// Plain event whose images live on `base`
pub fn event_payload(base: &str, id: u64) -> Value {
    json!({
        "id": id,
        "nombre": format!("Congreso {id}"),
        "descripcion": "Encuentro anual de investigación",
        "fechaInicioInscripcion": "2024-01-01",
        "fechaFinInscripcion": "2024-01-31",
        "fechaInicioEvento": "2024-03-05",
        "fechaFinEvento": "2024-03-07",
        "tipoEvento": "Congreso",
        "cupo": 120,
        "organizadores": [{ "nombre": "Facultad de Ciencias" }],
        "lugares": [{ "nombre": "Auditorio" }, { "nombre": "Aula Magna" }],
        "valor": [{ "rol": "Estudiante", "valor": "10" }],
        "ponentes": [{
            "nombre": "Ana",
            "apellido": "Pérez",
            "correo": "ana@example.com",
            "resumen": "Investigadora"
        }],
        "evidencias": [format!("{base}/ev-1.jpg"), format!("{base}/ev-2.jpg")],
        "imagen": format!("{base}/evento.png"),
        "cronograma": format!("{base}/cronograma.png")
    })
}

/// Multi-activity event whose images live on `base`
pub fn events_payload(base: &str, id: u64) -> Value {
    let mut event = event_payload(base, id);
    let object = event.as_object_mut().unwrap();
    object.remove("organizadores");
    object.remove("lugares");
    object.insert(
        "actividades".to_string(),
        json!([
            {
                "nombre": "Taller de Rust",
                "tipo": "Taller",
                "categoria": "Académica",
                "organizador": "Facultad",
                "ponente": "Ana",
                "lugar": "Aula 1",
                "fecha": "2024-03-05"
            },
            {
                "nombre": "Mesa redonda",
                "tipo": "Panel",
                "categoria": "Divulgación",
                "organizador": "Rectorado",
                "ponente": "Luis",
                "lugar": "Auditorio",
                "fecha": "2024-03-06"
            }
        ]),
    );
    event
}

/// Advertisement whose image lives on `base`
pub fn advertisement_payload(base: &str, id: u64) -> Value {
    json!({
        "id": id,
        "nombre": format!("Anuncio {id}"),
        "descripcion": "Difusión en redes",
        "fechaSolicitud": "2024-02-10",
        "imagen": format!("{base}/anuncio.jpg")
    })
}
