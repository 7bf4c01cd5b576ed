//! Configuration types for event-reports

use serde::{Deserialize, Serialize};
use std::{net::SocketAddr, path::PathBuf, time::Duration};
use utoipa::ToSchema;

use crate::error::{Error, Result};

/// HTTP server settings
#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct ServerConfig {
    /// Address to bind to (default: 0.0.0.0:3000, port overridable with `PORT`)
    #[serde(default = "default_bind_address")]
    #[schema(value_type = String)]
    pub bind_address: SocketAddr,

    /// Path prefix the report routes are mounted under (default: "/api/docx")
    #[serde(default = "default_route_prefix")]
    pub route_prefix: String,

    /// Enable CORS for browser access (default: true)
    #[serde(default = "default_true")]
    pub cors_enabled: bool,

    /// Allowed CORS origins (default: ["*"])
    #[serde(default = "default_cors_origins")]
    pub cors_origins: Vec<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: default_bind_address(),
            route_prefix: default_route_prefix(),
            cors_enabled: true,
            cors_origins: default_cors_origins(),
        }
    }
}

/// How the numeric suffix of document names is produced
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum NamingStrategy {
    /// Strictly increasing counter, randomly seeded at start (never repeats within a process)
    #[default]
    Counter,
    /// Milliseconds of the current second plus day of month; collides easily
    Legacy,
}

/// Output location and naming of generated reports
#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct ReportsConfig {
    /// Base directory; each report kind gets a sub-folder (default: "./reports")
    #[serde(default = "default_reports_dir")]
    #[schema(value_type = String)]
    pub base_dir: PathBuf,

    /// Document name suffix strategy
    #[serde(default)]
    pub naming: NamingStrategy,

    /// Image placed between the parts of the final report (URL or path)
    #[serde(default = "default_separator_image")]
    pub separator_image: String,
}

impl Default for ReportsConfig {
    fn default() -> Self {
        Self {
            base_dir: default_reports_dir(),
            naming: NamingStrategy::default(),
            separator_image: default_separator_image(),
        }
    }
}

/// Image retrieval settings
#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct FetchConfig {
    /// Per-request timeout in seconds (default: 30)
    #[serde(default = "default_fetch_timeout", with = "duration_serde")]
    #[schema(value_type = u64)]
    pub timeout: Duration,

    /// Evidence images fetched at the same time (default: 1, strictly sequential)
    #[serde(default = "default_max_concurrent_fetches")]
    pub max_concurrent_fetches: usize,

    /// User agent sent to image hosts
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            timeout: default_fetch_timeout(),
            max_concurrent_fetches: default_max_concurrent_fetches(),
            user_agent: default_user_agent(),
        }
    }
}

/// Display size of an embedded image, in pixels
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ImageSize {
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
}

impl ImageSize {
    /// Creates a size
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

/// Page layout constants shared by every table and image of a document
#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct LayoutConfig {
    /// Total table width in twentieths of a point (default: 9000)
    #[serde(default = "default_table_width")]
    pub table_width: u32,

    /// Main event image
    #[serde(default = "default_event_image")]
    pub event_image: ImageSize,

    /// Event schedule image
    #[serde(default = "default_schedule_image")]
    pub schedule_image: ImageSize,

    /// Evidence photos
    #[serde(default = "default_evidence_image")]
    pub evidence_image: ImageSize,

    /// Advertisement artwork
    #[serde(default = "default_advertisement_image")]
    pub advertisement_image: ImageSize,

    /// Separator between final report parts
    #[serde(default = "default_separator_size")]
    pub separator_image: ImageSize,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            table_width: default_table_width(),
            event_image: default_event_image(),
            schedule_image: default_schedule_image(),
            evidence_image: default_evidence_image(),
            advertisement_image: default_advertisement_image(),
            separator_image: default_separator_size(),
        }
    }
}

/// Main configuration for the report service
#[derive(Clone, Debug, Default, Serialize, Deserialize, ToSchema)]
pub struct Config {
    /// HTTP server settings
    #[serde(default)]
    pub server: ServerConfig,

    /// Output directory and naming
    #[serde(default)]
    pub reports: ReportsConfig,

    /// Image retrieval
    #[serde(default)]
    pub fetch: FetchConfig,

    /// Table and image layout
    #[serde(default)]
    pub layout: LayoutConfig,
}

impl Config {
    /// Builds the configuration from process environment variables.
    ///
    /// Read once at start; see [`Config::from_lookup`] for the recognised variables.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary variable lookup.
    ///
    /// Recognised variables:
    /// - `PORT` - listen port (default 3000)
    /// - `REPORTS_DIR` - base directory of generated reports
    /// - `SEPARATOR_IMAGE` - separator image reference for the final report
    /// - `FETCH_TIMEOUT_SECS` - image fetch timeout
    /// - `FETCH_CONCURRENCY` - evidence images fetched at the same time
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Config::default();

        if let Some(port) = lookup("PORT") {
            let port: u16 = parse_var("PORT", &port)?;
            config.server.bind_address.set_port(port);
        }

        if let Some(dir) = lookup("REPORTS_DIR").filter(|v| !v.trim().is_empty()) {
            config.reports.base_dir = PathBuf::from(dir);
        }

        if let Some(image) = lookup("SEPARATOR_IMAGE").filter(|v| !v.trim().is_empty()) {
            config.reports.separator_image = image;
        }

        if let Some(secs) = lookup("FETCH_TIMEOUT_SECS") {
            config.fetch.timeout = Duration::from_secs(parse_var("FETCH_TIMEOUT_SECS", &secs)?);
        }

        if let Some(limit) = lookup("FETCH_CONCURRENCY") {
            let limit: usize = parse_var("FETCH_CONCURRENCY", &limit)?;
            config.fetch.max_concurrent_fetches = limit.max(1);
        }

        Ok(config)
    }
}

fn parse_var<T: std::str::FromStr>(key: &str, value: &str) -> Result<T> {
    value.trim().parse().map_err(|_| Error::Config {
        message: format!("{key} has an invalid value: {value:?}"),
        key: Some(key.to_string()),
    })
}

fn default_bind_address() -> SocketAddr {
    SocketAddr::from(([0, 0, 0, 0], 3000))
}

fn default_route_prefix() -> String {
    "/api/docx".to_string()
}

fn default_true() -> bool {
    true
}

fn default_cors_origins() -> Vec<String> {
    vec!["*".to_string()]
}

fn default_reports_dir() -> PathBuf {
    PathBuf::from("./reports")
}

fn default_separator_image() -> String {
    "assets/separator.png".to_string()
}

fn default_fetch_timeout() -> Duration {
    Duration::from_secs(30)
}

fn default_max_concurrent_fetches() -> usize {
    1
}

fn default_user_agent() -> String {
    format!("event-reports/{}", env!("CARGO_PKG_VERSION"))
}

fn default_table_width() -> u32 {
    9000
}

fn default_event_image() -> ImageSize {
    ImageSize::new(500, 300)
}

fn default_schedule_image() -> ImageSize {
    ImageSize::new(500, 300)
}

fn default_evidence_image() -> ImageSize {
    ImageSize::new(400, 260)
}

fn default_advertisement_image() -> ImageSize {
    ImageSize::new(400, 400)
}

fn default_separator_size() -> ImageSize {
    ImageSize::new(600, 20)
}

// Duration serialization helper
mod duration_serde {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_u64(duration.as_secs())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        let secs = u64::deserialize(deserializer)?;
        Ok(Duration::from_secs(secs))
    }
}

#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_listen_on_port_3000() {
        let config = Config::from_lookup(|_| None).unwrap();
        assert_eq!(config.server.bind_address.port(), 3000);
        assert_eq!(config.reports.base_dir, PathBuf::from("./reports"));
        assert_eq!(config.reports.naming, NamingStrategy::Counter);
        assert_eq!(config.fetch.max_concurrent_fetches, 1);
    }

    #[test]
    fn port_and_directories_come_from_environment() {
        let config = Config::from_lookup(lookup_from(&[
            ("PORT", "8080"),
            ("REPORTS_DIR", "/var/reports"),
            ("FETCH_TIMEOUT_SECS", "5"),
            ("FETCH_CONCURRENCY", "0"),
        ]))
        .unwrap();

        assert_eq!(config.server.bind_address.port(), 8080);
        assert_eq!(config.reports.base_dir, PathBuf::from("/var/reports"));
        assert_eq!(config.fetch.timeout, Duration::from_secs(5));
        assert_eq!(config.fetch.max_concurrent_fetches, 1);
    }

    #[test]
    fn invalid_port_is_a_config_error() {
        let err = Config::from_lookup(lookup_from(&[("PORT", "not-a-port")])).unwrap_err();
        match err {
            Error::Config { key, .. } => assert_eq!(key.as_deref(), Some("PORT")),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn partial_json_uses_field_defaults() {
        let json = r#"{"reports":{"naming":"legacy"},"fetch":{"timeout":12}}"#;
        let config: Config = serde_json::from_str(json).unwrap();

        assert_eq!(config.reports.naming, NamingStrategy::Legacy);
        assert_eq!(config.reports.separator_image, "assets/separator.png");
        assert_eq!(config.fetch.timeout, Duration::from_secs(12));
        assert_eq!(config.layout.table_width, 9000);
    }

    #[test]
    fn duration_serializes_as_seconds() {
        let json = serde_json::to_value(FetchConfig::default()).unwrap();
        assert_eq!(json["timeout"], 30);
    }
}
