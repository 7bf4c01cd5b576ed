//! Domain records accepted by the report endpoints
//!
//! Field names follow the inbound JSON payloads (Spanish, camelCase). Every record is
//! read-only: it is deserialized from one request, consumed once while the document is
//! assembled, and dropped when the call returns.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use utoipa::ToSchema;

/// Identifier of the entity that owns a generated document.
///
/// Payloads send ids either as JSON numbers or strings; both are kept verbatim so the
/// document name reflects what the caller sent.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RecordId(String);

impl RecordId {
    /// Create an id from any displayable value
    pub fn new(value: impl fmt::Display) -> Self {
        Self(value.to_string())
    }

    /// The id as it appears in document names
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<u64> for RecordId {
    fn from(value: u64) -> Self {
        Self::new(value)
    }
}

impl From<&str> for RecordId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl Serialize for RecordId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for RecordId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        scalar_text(deserializer).map(RecordId)
    }
}

/// JSON scalar printed into documents as text
#[derive(Deserialize)]
#[serde(untagged)]
enum Scalar {
    Signed(i64),
    Unsigned(u64),
    Float(f64),
    Text(String),
}

/// Accepts a JSON number or string and keeps its textual form.
///
/// Integral floats print without a fraction (`7.0` becomes `"7"`).
fn scalar_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Scalar::deserialize(deserializer)? {
        Scalar::Signed(n) => n.to_string(),
        Scalar::Unsigned(n) => n.to_string(),
        Scalar::Float(n) => n.to_string(),
        Scalar::Text(s) => s,
    })
}

/// Reference to a remote image (URL or local path)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(transparent)]
pub struct ImageRef(pub String);

impl ImageRef {
    /// The raw reference handed to the image fetcher
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ImageRef {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// Person or unit organizing an event
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct OrganizerRecord {
    /// Display name
    pub nombre: String,
}

/// Venue where an event takes place
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct PlaceRecord {
    /// Display name
    pub nombre: String,
}

/// Monetary value attached to a participant role
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ValuePairRecord {
    /// Participant role (e.g. "ESTUDIANTE")
    pub rol: String,
    /// Amount, printed as received; payloads send it as a number or as text
    #[serde(deserialize_with = "scalar_text")]
    pub valor: String,
}

/// Speaker taking part in an event
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct SpeakerRecord {
    /// First name
    pub nombre: String,
    /// Last name
    pub apellido: String,
    /// Contact email
    pub correo: String,
    /// Short biography
    pub resumen: String,
}

/// One activity inside a multi-activity event
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ActivityRecord {
    /// Activity name
    pub nombre: String,
    /// Activity type
    pub tipo: String,
    /// Activity category
    pub categoria: String,
    /// Organizer responsible for the activity
    pub organizador: String,
    /// Speaker of the activity
    pub ponente: String,
    /// Venue of the activity
    pub lugar: String,
    /// Date of the activity, printed as received
    pub fecha: String,
}

/// Plain event with organizers and places
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EventRecord {
    /// Owning id, used for the document name
    #[schema(value_type = String)]
    pub id: RecordId,
    /// Event name
    pub nombre: String,
    /// Free-text description
    pub descripcion: String,
    /// Start of the inscription period
    pub fecha_inicio_inscripcion: String,
    /// End of the inscription period
    pub fecha_fin_inscripcion: String,
    /// Start of the event
    pub fecha_inicio_evento: String,
    /// End of the event
    pub fecha_fin_evento: String,
    /// Declared event type; the metadata row is omitted when absent
    #[serde(default)]
    pub tipo_evento: Option<String>,
    /// Declared event category; the metadata row is omitted when absent
    #[serde(default)]
    pub categoria_evento: Option<String>,
    /// Available places
    #[schema(value_type = String)]
    pub cupo: Quota,
    /// Organizers, in display order
    pub organizadores: Vec<OrganizerRecord>,
    /// Places, in display order
    pub lugares: Vec<PlaceRecord>,
    /// Prices per role
    pub valor: Vec<ValuePairRecord>,
    /// Speakers, in display order
    pub ponentes: Vec<SpeakerRecord>,
    /// Evidence photos, in display order
    pub evidencias: Vec<ImageRef>,
    /// Main event image
    pub imagen: ImageRef,
    /// Schedule image
    pub cronograma: ImageRef,
}

/// Event made of several activities
///
/// Shares the event shell with [`EventRecord`] but lists activities instead of
/// organizers and places.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EventWithActivitiesRecord {
    /// Owning id, used for the document name
    #[schema(value_type = String)]
    pub id: RecordId,
    /// Event name
    pub nombre: String,
    /// Free-text description
    pub descripcion: String,
    /// Start of the inscription period
    pub fecha_inicio_inscripcion: String,
    /// End of the inscription period
    pub fecha_fin_inscripcion: String,
    /// Start of the event
    pub fecha_inicio_evento: String,
    /// End of the event
    pub fecha_fin_evento: String,
    /// Declared event type; the metadata row is omitted when absent
    #[serde(default)]
    pub tipo_evento: Option<String>,
    /// Declared event category; the metadata row is omitted when absent
    #[serde(default)]
    pub categoria_evento: Option<String>,
    /// Available places
    #[schema(value_type = String)]
    pub cupo: Quota,
    /// Activities, in display order
    pub actividades: Vec<ActivityRecord>,
    /// Prices per role
    pub valor: Vec<ValuePairRecord>,
    /// Speakers, in display order
    pub ponentes: Vec<SpeakerRecord>,
    /// Evidence photos, in display order
    pub evidencias: Vec<ImageRef>,
    /// Main event image
    pub imagen: ImageRef,
    /// Schedule image
    pub cronograma: ImageRef,
}

/// Advertisement published alongside events
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AdvertisementRecord {
    /// Owning id
    #[schema(value_type = String)]
    pub id: RecordId,
    /// Advertisement name
    pub nombre: String,
    /// Free-text description
    pub descripcion: String,
    /// Date the publication was requested
    pub fecha_solicitud: String,
    /// Advertisement artwork
    pub imagen: ImageRef,
}

/// Aggregate input of the final dissemination report
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct FinalReportRecord {
    /// Owner used for the document name; defaults to [`FinalReportRecord::DEFAULT_OWNER`]
    #[serde(default)]
    #[schema(value_type = Option<String>)]
    pub id: Option<RecordId>,
    /// Advertisements, in display order
    #[serde(default)]
    pub anuncio: Vec<AdvertisementRecord>,
    /// Plain events, in display order
    #[serde(default)]
    pub evento: Vec<EventRecord>,
    /// Multi-activity events, in display order
    #[serde(default)]
    pub eventos: Vec<EventWithActivitiesRecord>,
}

impl FinalReportRecord {
    /// Owner name used when the payload does not carry an id
    pub const DEFAULT_OWNER: &'static str = "difusion";

    /// Id that scopes the generated document name
    pub fn owner(&self) -> RecordId {
        self.id
            .clone()
            .unwrap_or_else(|| RecordId::from(Self::DEFAULT_OWNER))
    }
}

/// Event quota; payloads send it as a number or as text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Quota(pub String);

impl fmt::Display for Quota {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<u32> for Quota {
    fn from(value: u32) -> Self {
        Self(value.to_string())
    }
}

impl Serialize for Quota {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for Quota {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        scalar_text(deserializer).map(Quota)
    }
}

/// Request body of `POST /evento`
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct EventReportRequest {
    /// The event to report on
    pub evento: EventRecord,
}

/// Request body of `POST /eventos`
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct EventsReportRequest {
    /// The multi-activity event to report on
    #[serde(alias = "eventos")]
    pub evento: EventWithActivitiesRecord,
}

/// Report variants; each one has its own output folder
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ReportKind {
    /// Single plain event
    Evento,
    /// Single multi-activity event
    Eventos,
    /// Aggregate dissemination report
    Informe,
}

impl ReportKind {
    /// Folder name under the reports directory
    pub fn folder(&self) -> &'static str {
        match self {
            ReportKind::Evento => "evento",
            ReportKind::Eventos => "eventos",
            ReportKind::Informe => "informe",
        }
    }
}

impl fmt::Display for ReportKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.folder())
    }
}

/// Result of a generation call: where the document can be downloaded from
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedDocumentInfo {
    /// File name inside `folder`
    pub document_name: String,
    /// Folder under the reports directory
    pub folder: String,
}
