//! Section composers.
//!
//! A composer turns one record into the flat, ordered block list of its section. The block
//! order is a pure function of the record: images are fetched one after another (or with
//! bounded concurrency through an order-preserving buffer), never placed in completion
//! order.

use std::sync::Arc;

use futures::{FutureExt, StreamExt, TryStreamExt};

use crate::config::{ImageSize, LayoutConfig};
use crate::document::{Alignment, ContentBlock};
use crate::error::Result;
use crate::fetch::ImageFetcher;
use crate::types::{
    AdvertisementRecord, EventRecord, EventWithActivitiesRecord, FinalReportRecord, ImageRef,
};

use super::adapters::{EventMetadata, EventShell, TableRows};
use super::builders::{
    BODY_SIZE, HEADING_SIZE, LABEL_DIVISOR, SPEAKER_DIVISOR, blank_line, heading, image_block,
    labeled_text, table, title,
};

/// Title of the aggregate report.
pub const FINAL_REPORT_TITLE: &str = "INFORME DE DIFUSIÓN DE EVENTOS";
/// Heading of the advertisements part.
pub const ADVERTISEMENTS_HEADING: &str = "ANUNCIOS";
/// Heading of the plain events part.
pub const EVENTS_HEADING: &str = "Eventos difundidos";
/// Heading of the multi-activity events part.
pub const MULTI_ACTIVITY_HEADING: &str = "EVENTOS CON VARIAS ACTIVIDADES DIFUNDIDOS";

const DESCRIPTION_HEADING: &str = "DESCRIPCIÓN DEL EVENTO";
const ORGANIZERS_HEADING: &str = "ORGANIZADORES";
const PLACES_HEADING: &str = "LUGARES";
const ACTIVITIES_HEADING: &str = "ACTIVIDADES";

/// Titled run of tables that differs between event shapes.
struct RepeatedGroup {
    heading: &'static str,
    tables: Vec<ContentBlock>,
}

/// Builds section block lists for every record type.
///
/// Borrowed per generation call; holds no mutable state.
pub struct SectionComposer<'a> {
    fetcher: &'a dyn ImageFetcher,
    assets: &'a dyn ImageFetcher,
    layout: &'a LayoutConfig,
    fetch_concurrency: usize,
}

impl<'a> SectionComposer<'a> {
    /// Creates a composer that fetches images strictly one at a time.
    pub fn new(fetcher: &'a dyn ImageFetcher, layout: &'a LayoutConfig) -> Self {
        Self {
            fetcher,
            assets: fetcher,
            layout,
            fetch_concurrency: 1,
        }
    }

    /// Loads configured assets (the separator) through `assets` instead of the record
    /// image fetcher.
    pub fn with_asset_loader(mut self, assets: &'a dyn ImageFetcher) -> Self {
        self.assets = assets;
        self
    }

    /// Allows up to `limit` evidence images in flight at once.
    pub fn with_fetch_concurrency(mut self, limit: usize) -> Self {
        self.fetch_concurrency = limit.max(1);
        self
    }

    /// Full section of a plain event.
    ///
    /// Order: description heading and body, metadata table, organizers, places, value
    /// pairs, one table per speaker, event image, schedule image, evidence images. Every
    /// group is followed by a blank line.
    pub async fn event_section(&self, event: &EventRecord) -> Result<Vec<ContentBlock>> {
        let groups = vec![
            RepeatedGroup {
                heading: ORGANIZERS_HEADING,
                tables: vec![self.table(event.organizadores.table_rows())],
            },
            RepeatedGroup {
                heading: PLACES_HEADING,
                tables: vec![self.table(event.lugares.table_rows())],
            },
        ];

        self.compose_event("evento", event, groups).await
    }

    /// Section of a multi-activity event: same shell, one table per activity instead of
    /// organizers and places.
    pub async fn event_with_activities_section(
        &self,
        event: &EventWithActivitiesRecord,
    ) -> Result<Vec<ContentBlock>> {
        let groups = vec![RepeatedGroup {
            heading: ACTIVITIES_HEADING,
            tables: event
                .actividades
                .iter()
                .map(|activity| self.table(activity.table_rows()))
                .collect(),
        }];

        self.compose_event("eventos", event, groups).await
    }

    /// Metadata table followed by the advertisement image.
    pub async fn advertisement_section(
        &self,
        ad: &AdvertisementRecord,
    ) -> Result<Vec<ContentBlock>> {
        let label = format!("anuncio-{}-imagen", ad.id);
        let image = self
            .fetch_image(&ad.imagen, &label, self.layout.advertisement_image)
            .await?;

        Ok(vec![
            self.table(ad.table_rows()),
            blank_line(),
            image,
            blank_line(),
        ])
    }

    /// Every part of the aggregate report, title included.
    ///
    /// The separator image is fetched once and the same payload is placed between parts.
    pub async fn final_report_sections(
        &self,
        report: &FinalReportRecord,
        separator: &ImageRef,
    ) -> Result<Vec<ContentBlock>> {
        let separator_bytes: Arc<[u8]> = self
            .assets
            .fetch(separator.as_str(), "separador")
            .await?
            .into();
        let separator_block =
            || image_block(Arc::clone(&separator_bytes), self.layout.separator_image);

        let mut blocks = vec![
            title(FINAL_REPORT_TITLE),
            heading(ADVERTISEMENTS_HEADING, HEADING_SIZE),
        ];

        for ad in &report.anuncio {
            blocks.extend(self.advertisement_section(ad).await?);
        }

        blocks.push(separator_block());
        blocks.push(blank_line());
        blocks.push(heading(EVENTS_HEADING, HEADING_SIZE));

        for event in &report.evento {
            blocks.push(heading(&event.nombre, HEADING_SIZE));
            blocks.extend(self.event_section(event).await?);
        }

        blocks.push(separator_block());
        blocks.push(blank_line());
        blocks.push(heading(MULTI_ACTIVITY_HEADING, HEADING_SIZE));

        for event in &report.eventos {
            blocks.push(heading(&event.nombre, HEADING_SIZE));
            blocks.extend(self.event_with_activities_section(event).await?);
        }

        tracing::debug!(
            advertisements = report.anuncio.len(),
            events = report.evento.len(),
            multi_activity_events = report.eventos.len(),
            blocks = blocks.len(),
            "final report composed"
        );

        Ok(blocks)
    }

    async fn compose_event<E>(
        &self,
        label_prefix: &str,
        event: &E,
        groups: Vec<RepeatedGroup>,
    ) -> Result<Vec<ContentBlock>>
    where
        E: EventShell + Sync + ?Sized,
    {
        let mut blocks = vec![
            heading(DESCRIPTION_HEADING, HEADING_SIZE),
            labeled_text(event.descripcion(), BODY_SIZE, Alignment::Justified, false),
            blank_line(),
            self.table(EventMetadata(event).table_rows()),
            blank_line(),
        ];

        for group in groups {
            blocks.push(heading(group.heading, HEADING_SIZE));
            for group_table in group.tables {
                blocks.push(group_table);
                blocks.push(blank_line());
            }
        }

        blocks.push(self.table(event.valor().table_rows()));
        blocks.push(blank_line());

        for speaker in event.ponentes() {
            blocks.push(table(
                speaker.table_rows(),
                SPEAKER_DIVISOR,
                self.layout.table_width,
            ));
            blocks.push(blank_line());
        }

        let prefix = format!("{label_prefix}-{}", event.id());

        let image_label = format!("{prefix}-imagen");
        blocks.push(
            self.fetch_image(event.imagen(), &image_label, self.layout.event_image)
                .await?,
        );
        blocks.push(blank_line());

        let schedule_label = format!("{prefix}-cronograma");
        blocks.push(
            self.fetch_image(event.cronograma(), &schedule_label, self.layout.schedule_image)
                .await?,
        );
        blocks.push(blank_line());

        for evidence in self.fetch_evidences(&prefix, event.evidencias()).await? {
            blocks.push(evidence);
            blocks.push(blank_line());
        }

        Ok(blocks)
    }

    fn table(&self, rows: Vec<crate::document::TableRowSpec>) -> ContentBlock {
        table(rows, LABEL_DIVISOR, self.layout.table_width)
    }

    async fn fetch_image(
        &self,
        reference: &ImageRef,
        label: &str,
        size: ImageSize,
    ) -> Result<ContentBlock> {
        let bytes = self.fetcher.fetch(reference.as_str(), label).await?;
        Ok(image_block(bytes, size))
    }

    /// Fetches evidence images, returning blocks in input order.
    fn fetch_evidences<'b>(
        &'b self,
        prefix: &'b str,
        evidences: &'b [ImageRef],
    ) -> futures::future::BoxFuture<'b, Result<Vec<ContentBlock>>> {
        let size = self.layout.evidence_image;
        futures::stream::iter(evidences.iter().enumerate())
            .map(move |(index, reference)| async move {
                let label = format!("{prefix}-evidencia-{}", index + 1);
                self.fetch_image(reference, &label, size).await
            })
            .buffered(self.fetch_concurrency)
            .try_collect()
            .boxed()
    }
}
