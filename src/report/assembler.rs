//! Document assembly and persistence.
//!
//! [`DocumentAssembler`] is the entry point for the three report variants. Each call
//! builds a fresh [`Document`], serializes it with the configured [`DocumentModel`] and
//! writes it under `<base_dir>/<folder>/<documentName>`. Nothing is shared between calls
//! except the configuration and the naming counter.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::config::Config;
use crate::document::{ContentBlock, Document, DocumentModel, Section};
use crate::error::{Error, Result};
use crate::fetch::{ImageFetcher, LocalAssetLoader, is_remote};
use crate::naming::NamingService;
use crate::types::{
    EventRecord, EventWithActivitiesRecord, FinalReportRecord, GeneratedDocumentInfo, ImageRef,
    RecordId, ReportKind,
};

use super::builders::{blank_line, title};
use super::sections::SectionComposer;

/// Builds, serializes and stores report documents
pub struct DocumentAssembler {
    fetcher: Arc<dyn ImageFetcher>,
    assets: Arc<dyn ImageFetcher>,
    model: Arc<dyn DocumentModel>,
    naming: NamingService,
    config: Config,
}

impl DocumentAssembler {
    /// Create an assembler; the naming strategy comes from `config.reports.naming`
    ///
    /// `fetcher` serves every image referenced by a record. The separator image comes from
    /// configuration: a local path is read with [`LocalAssetLoader`], a URL goes through
    /// `fetcher`.
    pub fn new(
        config: Config,
        fetcher: Arc<dyn ImageFetcher>,
        model: Arc<dyn DocumentModel>,
    ) -> Self {
        let naming = NamingService::new(config.reports.naming).with_extension(model.extension());
        let assets: Arc<dyn ImageFetcher> = if is_remote(&config.reports.separator_image) {
            Arc::clone(&fetcher)
        } else {
            Arc::new(LocalAssetLoader)
        };
        Self {
            fetcher,
            assets,
            model,
            naming,
            config,
        }
    }

    /// Replace the loader used for configured assets
    pub fn with_asset_loader(mut self, assets: Arc<dyn ImageFetcher>) -> Self {
        self.assets = assets;
        self
    }

    /// Replace the naming service (tests use a fixed seed)
    pub fn with_naming(mut self, naming: NamingService) -> Self {
        self.naming = naming.with_extension(self.model.extension());
        self
    }

    /// Active configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Directory holding every report folder
    pub fn reports_dir(&self) -> &Path {
        &self.config.reports.base_dir
    }

    /// MIME type of the documents this assembler writes
    pub fn content_type(&self) -> &'static str {
        self.model.content_type()
    }

    /// Generate the report of one plain event
    ///
    /// # Errors
    ///
    /// Fails without writing anything if any image cannot be fetched or the document
    /// cannot be serialized; fails with [`Error::Io`] if the file cannot be written.
    #[tracing::instrument(skip(self, event), fields(event_id = %event.id))]
    pub async fn generate_event_report(
        &self,
        event: &EventRecord,
    ) -> Result<GeneratedDocumentInfo> {
        let mut blocks = report_heading(&event.nombre);
        blocks.extend(self.composer().event_section(event).await?);

        self.persist(ReportKind::Evento, &event.id, blocks).await
    }

    /// Generate the report of one multi-activity event
    ///
    /// # Errors
    ///
    /// Same failure modes as [`DocumentAssembler::generate_event_report`].
    #[tracing::instrument(skip(self, event), fields(event_id = %event.id))]
    pub async fn generate_events_report(
        &self,
        event: &EventWithActivitiesRecord,
    ) -> Result<GeneratedDocumentInfo> {
        let mut blocks = report_heading(&event.nombre);
        blocks.extend(self.composer().event_with_activities_section(event).await?);

        self.persist(ReportKind::Eventos, &event.id, blocks).await
    }

    /// Generate the aggregate dissemination report
    ///
    /// # Errors
    ///
    /// Same failure modes as [`DocumentAssembler::generate_event_report`]; an unreadable
    /// separator image also aborts the call.
    #[tracing::instrument(skip(self, report), fields(
        advertisements = report.anuncio.len(),
        events = report.evento.len(),
        multi_activity_events = report.eventos.len(),
    ))]
    pub async fn generate_final_report(
        &self,
        report: &FinalReportRecord,
    ) -> Result<GeneratedDocumentInfo> {
        let separator = ImageRef(self.config.reports.separator_image.clone());
        let blocks = self
            .composer()
            .final_report_sections(report, &separator)
            .await?;

        self.persist(ReportKind::Informe, &report.owner(), blocks)
            .await
    }

    /// Resolve a previously generated document for download
    ///
    /// Both components must be single path segments.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidRequest`] for empty or multi-segment components and
    /// [`Error::NotFound`] if the file does not exist.
    pub async fn resolve_download(&self, folder: &str, document_name: &str) -> Result<PathBuf> {
        for component in [folder, document_name] {
            if !is_plain_segment(component) {
                return Err(Error::InvalidRequest(format!(
                    "invalid path component: {component:?}"
                )));
            }
        }

        let path = self.reports_dir().join(folder).join(document_name);
        match tokio::fs::metadata(&path).await {
            Ok(meta) if meta.is_file() => Ok(path),
            Ok(_) => Err(Error::NotFound(format!("{folder}/{document_name}"))),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(Error::NotFound(format!("{folder}/{document_name}")))
            }
            Err(e) => Err(Error::Io(e)),
        }
    }

    fn composer(&self) -> SectionComposer<'_> {
        SectionComposer::new(self.fetcher.as_ref(), &self.config.layout)
            .with_asset_loader(self.assets.as_ref())
            .with_fetch_concurrency(self.config.fetch.max_concurrent_fetches)
    }

    /// Serialize `blocks` as one section and write the file atomically
    async fn persist(
        &self,
        kind: ReportKind,
        owner: &RecordId,
        blocks: Vec<ContentBlock>,
    ) -> Result<GeneratedDocumentInfo> {
        let document = Document::new().with_section(Section::new(blocks));

        let model = Arc::clone(&self.model);
        let bytes = tokio::task::spawn_blocking(move || model.serialize(&document))
            .await
            .map_err(|e| Error::Other(format!("serialization task failed: {e}")))??;

        let info = self.naming.name_for(kind, owner);
        let folder = self.reports_dir().join(&info.folder);
        tokio::fs::create_dir_all(&folder).await?;

        let target = folder.join(&info.document_name);
        write_atomic(&folder, &info.document_name, &bytes).await?;

        tracing::info!(
            kind = %kind,
            owner = %owner,
            model = self.model.name(),
            path = %target.display(),
            bytes = bytes.len(),
            "report written"
        );

        Ok(info)
    }
}

/// Title line and spacer shared by the single-event reports
fn report_heading(name: &str) -> Vec<ContentBlock> {
    vec![title(format!("INFORME DEL EVENTO \"{name}\"")), blank_line()]
}

/// Writes to a hidden sibling first so readers never see a partial file
async fn write_atomic(folder: &Path, name: &str, bytes: &[u8]) -> Result<()> {
    let temp = folder.join(format!(".{name}.part"));
    let target = folder.join(name);

    if let Err(e) = tokio::fs::write(&temp, bytes).await {
        let _ = tokio::fs::remove_file(&temp).await;
        return Err(e.into());
    }

    if let Err(e) = tokio::fs::rename(&temp, &target).await {
        let _ = tokio::fs::remove_file(&temp).await;
        return Err(e.into());
    }

    Ok(())
}

fn is_plain_segment(component: &str) -> bool {
    !component.is_empty()
        && component != "."
        && component != ".."
        && !component.contains(['/', '\\'])
        && !component.contains("..")
}
