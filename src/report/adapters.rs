//! Record to table-row mapping.
//!
//! Each adapter is a pure function of one record: it decides which label/value pairs a
//! table shows and in what order. Composers never build rows themselves.

use crate::document::TableRowSpec;
use crate::types::{
    ActivityRecord, AdvertisementRecord, EventRecord, EventWithActivitiesRecord, ImageRef,
    OrganizerRecord, PlaceRecord, Quota, RecordId, SpeakerRecord, ValuePairRecord,
};

use super::builders::{header_row, label_row};

/// Label shared by every row of the organizers table.
pub const ORGANIZER_LABEL: &str = "ORGANIZADOR";
/// Label shared by every row of the places table.
pub const PLACE_LABEL: &str = "LUGAR";

/// Anything that can be shown as a two-column table.
pub trait TableRows {
    /// Rows in display order.
    fn table_rows(&self) -> Vec<TableRowSpec>;
}

/// Fields shared by plain events and multi-activity events.
///
/// Lets one composer handle both shapes; only the repeated groups differ.
pub trait EventShell {
    /// Owning id
    fn id(&self) -> &RecordId;
    /// Event name
    fn nombre(&self) -> &str;
    /// Description body
    fn descripcion(&self) -> &str;
    /// Inscription start
    fn fecha_inicio_inscripcion(&self) -> &str;
    /// Inscription end
    fn fecha_fin_inscripcion(&self) -> &str;
    /// Event start
    fn fecha_inicio_evento(&self) -> &str;
    /// Event end
    fn fecha_fin_evento(&self) -> &str;
    /// Declared type, if any
    fn tipo_evento(&self) -> Option<&str>;
    /// Declared category, if any
    fn categoria_evento(&self) -> Option<&str>;
    /// Quota
    fn cupo(&self) -> &Quota;
    /// Prices per role
    fn valor(&self) -> &[ValuePairRecord];
    /// Speakers
    fn ponentes(&self) -> &[SpeakerRecord];
    /// Evidence photos
    fn evidencias(&self) -> &[ImageRef];
    /// Main image
    fn imagen(&self) -> &ImageRef;
    /// Schedule image
    fn cronograma(&self) -> &ImageRef;
}

macro_rules! impl_event_shell {
    ($($record:ty),+) => {$(
        impl EventShell for $record {
            fn id(&self) -> &RecordId { &self.id }
            fn nombre(&self) -> &str { &self.nombre }
            fn descripcion(&self) -> &str { &self.descripcion }
            fn fecha_inicio_inscripcion(&self) -> &str { &self.fecha_inicio_inscripcion }
            fn fecha_fin_inscripcion(&self) -> &str { &self.fecha_fin_inscripcion }
            fn fecha_inicio_evento(&self) -> &str { &self.fecha_inicio_evento }
            fn fecha_fin_evento(&self) -> &str { &self.fecha_fin_evento }
            fn tipo_evento(&self) -> Option<&str> { self.tipo_evento.as_deref() }
            fn categoria_evento(&self) -> Option<&str> { self.categoria_evento.as_deref() }
            fn cupo(&self) -> &Quota { &self.cupo }
            fn valor(&self) -> &[ValuePairRecord] { &self.valor }
            fn ponentes(&self) -> &[SpeakerRecord] { &self.ponentes }
            fn evidencias(&self) -> &[ImageRef] { &self.evidencias }
            fn imagen(&self) -> &ImageRef { &self.imagen }
            fn cronograma(&self) -> &ImageRef { &self.cronograma }
        }
    )+};
}

impl_event_shell!(EventRecord, EventWithActivitiesRecord);

/// Metadata table of an event: dates, optional type and category, quota.
pub struct EventMetadata<'a, E: ?Sized>(pub &'a E);

impl<E: EventShell + ?Sized> TableRows for EventMetadata<'_, E> {
    fn table_rows(&self) -> Vec<TableRowSpec> {
        let event = self.0;
        let mut rows = vec![
            label_row("INICIO DE INSCRIPCIONES", event.fecha_inicio_inscripcion()),
            label_row("FIN DE INSCRIPCIONES", event.fecha_fin_inscripcion()),
            label_row("INICIO DEL EVENTO", event.fecha_inicio_evento()),
            label_row("FIN DEL EVENTO", event.fecha_fin_evento()),
        ];

        if let Some(tipo) = present(event.tipo_evento()) {
            rows.push(label_row("TIPO DE EVENTO", tipo));
        }
        if let Some(categoria) = present(event.categoria_evento()) {
            rows.push(label_row("CATEGORÍA DEL EVENTO", categoria));
        }

        rows.push(label_row("CUPO", event.cupo().to_string()));
        rows
    }
}

/// Optional fields count as absent when empty or whitespace.
fn present(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

impl TableRows for [ValuePairRecord] {
    fn table_rows(&self) -> Vec<TableRowSpec> {
        std::iter::once(header_row("ROL", "VALOR"))
            .chain(self.iter().map(|pair| label_row(&pair.rol, &pair.valor)))
            .collect()
    }
}

impl TableRows for [OrganizerRecord] {
    fn table_rows(&self) -> Vec<TableRowSpec> {
        repeated_rows(ORGANIZER_LABEL, self.iter().map(|o| o.nombre.as_str()))
    }
}

impl TableRows for [PlaceRecord] {
    fn table_rows(&self) -> Vec<TableRowSpec> {
        repeated_rows(PLACE_LABEL, self.iter().map(|p| p.nombre.as_str()))
    }
}

/// One single-row group per item, all sharing `label`.
pub fn repeated_rows<'a, I>(label: &str, values: I) -> Vec<TableRowSpec>
where
    I: IntoIterator<Item = &'a str>,
{
    values
        .into_iter()
        .map(|value| label_row(label, value))
        .collect()
}

impl TableRows for SpeakerRecord {
    fn table_rows(&self) -> Vec<TableRowSpec> {
        vec![
            label_row("NOMBRE", &self.nombre),
            label_row("APELLIDO", &self.apellido),
            label_row("CORREO", &self.correo),
            label_row("RESUMEN", &self.resumen),
        ]
    }
}

impl TableRows for ActivityRecord {
    fn table_rows(&self) -> Vec<TableRowSpec> {
        vec![
            label_row("NOMBRE", &self.nombre),
            label_row("TIPO", &self.tipo),
            label_row("CATEGORÍA", &self.categoria),
            label_row("ORGANIZADOR", &self.organizador),
            label_row("PONENTE", &self.ponente),
            label_row("LUGAR", &self.lugar),
            label_row("FECHA", &self.fecha),
        ]
    }
}

impl TableRows for AdvertisementRecord {
    fn table_rows(&self) -> Vec<TableRowSpec> {
        vec![
            label_row("NOMBRE", &self.nombre),
            label_row("DESCRIPCIÓN", &self.descripcion),
            label_row("FECHA DE SOLICITUD", &self.fecha_solicitud),
        ]
    }
}
