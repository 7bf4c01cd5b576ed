//! Test configuration and app construction

use event_reports::api::create_router;
use event_reports::{Config, DocumentAssembler, DocxModel, HttpImageFetcher};
use std::sync::Arc;
use tempfile::TempDir;

/// Configuration writing into `temp_dir`, with the bundled separator image
pub fn test_config(temp_dir: &TempDir) -> Config {
    let mut config = Config::default();
    config.reports.base_dir = temp_dir.path().join("reports");
    config.reports.separator_image =
        concat!(env!("CARGO_MANIFEST_DIR"), "/assets/separator.png").to_string();
    config
}

/// Router wired to the production fetcher and docx serializer.
/// Returns the router and the tempdir (which must be kept alive).
pub fn create_test_app(configure: impl FnOnce(&mut Config)) -> (axum::Router, TempDir) {
    let temp_dir = tempfile::tempdir().unwrap();
    let mut config = test_config(&temp_dir);
    configure(&mut config);

    let fetcher = Arc::new(HttpImageFetcher::new(&config.fetch).unwrap());
    let assembler = Arc::new(DocumentAssembler::new(
        config.clone(),
        fetcher,
        Arc::new(DocxModel::new()),
    ));

    (create_router(assembler, Arc::new(config)), temp_dir)
}
