//! Shared fixtures for report tests.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use crate::config::Config;
use crate::document::DocxModel;
use crate::error::{Error, Result};
use crate::fetch::ImageFetcher;
use crate::types::{
    ActivityRecord, AdvertisementRecord, EventRecord, EventWithActivitiesRecord, ImageRef,
    OrganizerRecord, PlaceRecord, Quota, RecordId, SpeakerRecord, ValuePairRecord,
};

use super::DocumentAssembler;

/// Smallest payload recognised as PNG by the docx writer.
pub(crate) const PNG: &[u8] = &[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];

/// In-memory fetcher: answers every reference with its own bytes unless told to fail,
/// and records the labels it was asked for.
#[derive(Default)]
pub(crate) struct StaticImageFetcher {
    overrides: HashMap<String, Vec<u8>>,
    failing: Vec<String>,
    labels: Mutex<Vec<String>>,
}

impl StaticImageFetcher {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Serve `bytes` for `reference` instead of the default payload.
    pub(crate) fn with_image(mut self, reference: &str, bytes: &[u8]) -> Self {
        self.overrides.insert(reference.to_string(), bytes.to_vec());
        self
    }

    /// Make `reference` fail like an unreachable host.
    pub(crate) fn failing_on(mut self, reference: &str) -> Self {
        self.failing.push(reference.to_string());
        self
    }

    /// Labels requested so far, in call order.
    pub(crate) fn labels(&self) -> Vec<String> {
        self.labels.lock().unwrap().clone()
    }
}

#[async_trait]
impl ImageFetcher for StaticImageFetcher {
    async fn fetch(&self, reference: &str, label: &str) -> Result<Vec<u8>> {
        self.labels.lock().unwrap().push(label.to_string());

        if self.failing.iter().any(|r| r == reference) {
            return Err(Error::ImageFetch {
                reference: reference.to_string(),
                label: label.to_string(),
                reason: "connection refused".to_string(),
            });
        }

        Ok(self.overrides.get(reference).cloned().unwrap_or_else(|| {
            let mut bytes = PNG.to_vec();
            bytes.extend_from_slice(reference.as_bytes());
            bytes
        }))
    }

    fn name(&self) -> &'static str {
        "static"
    }
}

/// Assembler writing into a fresh temp directory.
/// Returns the assembler, its fetcher and the tempdir (which must be kept alive).
pub(crate) fn create_test_assembler(
    fetcher: StaticImageFetcher,
) -> (DocumentAssembler, Arc<StaticImageFetcher>, tempfile::TempDir) {
    let temp_dir = tempfile::tempdir().unwrap();

    let mut config = Config::default();
    config.reports.base_dir = temp_dir.path().join("reports");
    config.reports.separator_image = "separator.png".to_string();

    let fetcher = Arc::new(fetcher);
    let assembler = DocumentAssembler::new(config, fetcher.clone(), Arc::new(DocxModel::new()))
        .with_asset_loader(fetcher.clone());
    (assembler, fetcher, temp_dir)
}

pub(crate) fn speaker(nombre: &str) -> SpeakerRecord {
    SpeakerRecord {
        nombre: nombre.to_string(),
        apellido: "Pérez".to_string(),
        correo: format!("{}@example.com", nombre.to_lowercase()),
        resumen: "Investigadora".to_string(),
    }
}

pub(crate) fn activity(nombre: &str) -> ActivityRecord {
    ActivityRecord {
        nombre: nombre.to_string(),
        tipo: "Taller".to_string(),
        categoria: "Académica".to_string(),
        organizador: "Facultad".to_string(),
        ponente: "Ana".to_string(),
        lugar: "Aula 1".to_string(),
        fecha: "2024-03-05".to_string(),
    }
}

pub(crate) fn event(id: u64) -> EventRecord {
    EventRecord {
        id: RecordId::from(id),
        nombre: format!("Congreso {id}"),
        descripcion: "Encuentro anual".to_string(),
        fecha_inicio_inscripcion: "2024-01-01".to_string(),
        fecha_fin_inscripcion: "2024-01-31".to_string(),
        fecha_inicio_evento: "2024-03-05".to_string(),
        fecha_fin_evento: "2024-03-07".to_string(),
        tipo_evento: None,
        categoria_evento: None,
        cupo: Quota::from(120),
        organizadores: vec![
            OrganizerRecord {
                nombre: "Facultad de Ciencias".to_string(),
            },
            OrganizerRecord {
                nombre: "Rectorado".to_string(),
            },
        ],
        lugares: vec![PlaceRecord {
            nombre: "Auditorio".to_string(),
        }],
        valor: vec![
            ValuePairRecord {
                rol: "Estudiante".to_string(),
                valor: "10".to_string(),
            },
            ValuePairRecord {
                rol: "Profesional".to_string(),
                valor: "25".to_string(),
            },
        ],
        ponentes: vec![speaker("Ana"), speaker("Luis")],
        evidencias: vec![ImageRef::from("ev-1.jpg"), ImageRef::from("ev-2.jpg")],
        imagen: ImageRef::from(format!("evento-{id}.jpg").as_str()),
        cronograma: ImageRef::from(format!("cronograma-{id}.jpg").as_str()),
    }
}

pub(crate) fn event_with_activities(id: u64, activities: usize) -> EventWithActivitiesRecord {
    let base = event(id);
    EventWithActivitiesRecord {
        id: base.id,
        nombre: base.nombre,
        descripcion: base.descripcion,
        fecha_inicio_inscripcion: base.fecha_inicio_inscripcion,
        fecha_fin_inscripcion: base.fecha_fin_inscripcion,
        fecha_inicio_evento: base.fecha_inicio_evento,
        fecha_fin_evento: base.fecha_fin_evento,
        tipo_evento: Some("Congreso".to_string()),
        categoria_evento: Some("Ciencia".to_string()),
        cupo: base.cupo,
        actividades: (1..=activities)
            .map(|n| activity(&format!("Actividad {n}")))
            .collect(),
        valor: base.valor,
        ponentes: base.ponentes,
        evidencias: base.evidencias,
        imagen: base.imagen,
        cronograma: base.cronograma,
    }
}

pub(crate) fn advertisement(id: u64) -> AdvertisementRecord {
    AdvertisementRecord {
        id: RecordId::from(id),
        nombre: format!("Anuncio {id}"),
        descripcion: "Difusión en redes".to_string(),
        fecha_solicitud: "2024-02-10".to_string(),
        imagen: ImageRef::from(format!("anuncio-{id}.jpg").as_str()),
    }
}
