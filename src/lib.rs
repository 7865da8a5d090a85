//! Product Hub: an operator console for a product catalog.
//!
//! Product Hub keeps a catalog of product records and lets an operator:
//! - Search by id, name, barcode or brand
//! - Narrow the visible set with brand, material, color, barcode, weight and
//!   enrichment filters
//! - Select products individually or all at once and delete them in bulk
//! - Create and edit products through validated forms
//! - Enrich a product's description and ingredients through an external AI
//!   service, falling back to sample data when the service is unavailable

#![allow(clippy::multiple_crate_versions)]

//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │  Console Shim (main.rs)                             │  ← Entry point
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Application Layer (app/)                           │  ← Catalog view engine
//! │  - Search, filters, selection, vocabularies         │
//! │  - Event handling and action dispatching            │
//! │  - Runtime executing actions                        │
//! └─────────────────────────────────────────────────────┘
//!         │                    │                    │
//! ┌───────────────┐   ┌───────────────┐   ┌───────────────┐
//! │ UI Layer      │   │ Storage Layer │   │ Enrichment    │
//! │ (ui/)         │   │ (storage/)    │   │ (enrichment/) │
//! │ - Table       │   │ - JSON file   │   │ - HTTP client │
//! │ - Details     │   │ - REST API    │   │ - Mock data   │
//! └───────────────┘   └───────────────┘   └───────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Domain & Forms                                     │
//! │  - Product model, patches (domain/)                 │
//! │  - Error types (domain/error)                       │
//! │  - Form validation (forms/)                         │
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Observability (observability/)                     │
//! │  - tracing subscriber, rotating log file            │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! # Modules
//!
//! - [`app`]: catalog state, event/action model and runtime
//! - [`domain`]: product model and errors
//! - [`forms`]: create/edit form validation
//! - [`storage`]: product stores (JSON file, REST)
//! - [`enrichment`]: AI enrichment client with mock fallback
//! - [`ui`]: plain-text rendering
//! - [`observability`]: tracing setup
//!
//! # Configuration
//!
//! Settings come from an optional TOML file overridden by `key=value` pairs
//! on the command line:
//!
//! ```toml
//! store = "rest"
//! store_url = "https://example.supabase.co"
//! store_api_key = "..."
//! enrichment_url = "http://localhost:8000/process"
//! enrichment_timeout_secs = 30
//! log_level = "debug"
//! log_file = "product-hub.log"
//! ```
//!
//! # Example
//!
//! ```rust
//! use product_hub::app::{CatalogState, Event, FilterCriteria, Selector, handle_event};
//! use product_hub::domain::Product;
//!
//! let mut state = CatalogState::new();
//! let mut glasses = Product::new(1, "Safety Glasses");
//! glasses.brand = Some("Acme".to_string());
//! handle_event(&mut state, &Event::ProductsLoaded(vec![glasses, Product::new(2, "Goggles")]))?;
//!
//! let criteria = FilterCriteria {
//!     brand: Selector::parse("acme"),
//!     ..FilterCriteria::default()
//! };
//! handle_event(&mut state, &Event::FiltersApplied(criteria))?;
//! assert_eq!(state.visible_ids(), vec![1]);
//! # Ok::<(), product_hub::CatalogError>(())
//! ```

pub mod app;
pub mod domain;
pub mod enrichment;
pub mod forms;
pub mod observability;
pub mod storage;
pub mod ui;

pub use app::{handle_event, Action, CatalogState, Event, Runtime};
pub use domain::{CatalogError, Product, Result};

use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

use enrichment::HttpEnricher;
use storage::ProductStore;

const DEFAULT_STORE_PATH: &str = "products.json";
const DEFAULT_ENRICHMENT_URL: &str = "http://localhost:8000/process";
const DEFAULT_TIMEOUT_SECS: u64 = 30;
const DEFAULT_LOG_LEVEL: &str = "info";

/// Which backend holds the `products` relation.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum StoreKind {
    /// Local JSON file.
    #[default]
    Json,
    /// PostgREST-style HTTP API.
    Rest,
    /// Unrecognized name, rejected when the store is opened.
    Unknown(String),
}

impl StoreKind {
    #[must_use]
    pub fn parse(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "json" => Self::Json,
            "rest" => Self::Rest,
            _ => Self::Unknown(value.trim().to_string()),
        }
    }
}

impl fmt::Display for StoreKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Json => f.write_str("json"),
            Self::Rest => f.write_str("rest"),
            Self::Unknown(name) => f.write_str(name),
        }
    }
}

/// Console configuration.
///
/// # Example
///
/// ```rust
/// use std::collections::BTreeMap;
/// use product_hub::{Config, StoreKind};
///
/// let mut map = BTreeMap::new();
/// map.insert("store".to_string(), "rest".to_string());
/// map.insert("enrichment_timeout_secs".to_string(), "5".to_string());
///
/// let config = Config::from_map(&map);
/// assert_eq!(config.store, StoreKind::Rest);
/// assert_eq!(config.enrichment_timeout_secs, 5);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Backend selection. Default: `json`
    pub store: StoreKind,

    /// JSON store file. Default: `products.json`
    pub store_path: PathBuf,

    /// Base URL of the REST store. Required when `store` is `rest`.
    pub store_url: Option<String>,

    /// API key sent as `apikey` and bearer token to the REST store.
    pub store_api_key: Option<String>,

    /// Enrichment endpoint. Default: `http://localhost:8000/process`
    pub enrichment_url: String,

    /// Timeout for every HTTP call, in seconds. Default: `30`
    pub enrichment_timeout_secs: u64,

    /// Log filter directive used when `RUST_LOG` is unset. Default: `"info"`
    pub log_level: String,

    /// Log file. Logs go to stderr when unset.
    pub log_file: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            store: StoreKind::Json,
            store_path: PathBuf::from(DEFAULT_STORE_PATH),
            store_url: None,
            store_api_key: None,
            enrichment_url: DEFAULT_ENRICHMENT_URL.to_string(),
            enrichment_timeout_secs: DEFAULT_TIMEOUT_SECS,
            log_level: DEFAULT_LOG_LEVEL.to_string(),
            log_file: None,
        }
    }
}

impl Config {
    /// Builds a configuration from `key=value` settings over the defaults.
    ///
    /// See [`Config::merge_map`] for the parsing rules.
    #[must_use]
    pub fn from_map(settings: &BTreeMap<String, String>) -> Self {
        let mut config = Self::default();
        config.merge_map(settings);
        config
    }

    /// Overrides fields with the given settings.
    ///
    /// # Parsing Rules
    ///
    /// - `store`: `json` or `rest` (anything else is kept and rejected when
    ///   the store is opened)
    /// - `enrichment_timeout_secs`: positive integer, otherwise ignored
    /// - blank values are ignored
    /// - unknown keys are ignored
    pub fn merge_map(&mut self, settings: &BTreeMap<String, String>) {
        for (key, value) in settings {
            let value = value.trim();
            if value.is_empty() {
                tracing::debug!(key = %key, "ignoring blank setting");
                continue;
            }

            match key.as_str() {
                "store" => self.store = StoreKind::parse(value),
                "store_path" => self.store_path = PathBuf::from(value),
                "store_url" => self.store_url = Some(value.trim_end_matches('/').to_string()),
                "store_api_key" => self.store_api_key = Some(value.to_string()),
                "enrichment_url" => self.enrichment_url = value.to_string(),
                "enrichment_timeout_secs" => match value.parse::<u64>() {
                    Ok(secs) if secs > 0 => self.enrichment_timeout_secs = secs,
                    _ => tracing::debug!(value = %value, "invalid timeout, keeping default"),
                },
                "log_level" => self.log_level = value.to_string(),
                "log_file" => self.log_file = Some(PathBuf::from(value)),
                _ => tracing::debug!(key = %key, "ignoring unknown setting"),
            }
        }
    }

    /// Parses TOML settings over the defaults.
    ///
    /// Top-level string, integer and boolean values are read; anything else is
    /// ignored.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Config`] if the text is not valid TOML.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let table: toml::Table = text
            .parse()
            .map_err(|e: toml::de::Error| CatalogError::Config(format!("invalid TOML: {e}")))?;

        let settings: BTreeMap<String, String> = table
            .into_iter()
            .filter_map(|(key, value)| {
                let value = match value {
                    toml::Value::String(s) => s,
                    toml::Value::Integer(i) => i.to_string(),
                    toml::Value::Boolean(b) => b.to_string(),
                    other => {
                        tracing::debug!(key = %key, kind = other.type_str(), "ignoring setting");
                        return None;
                    }
                };
                Some((key, value))
            })
            .collect();

        Ok(Self::from_map(&settings))
    }

    /// Reads a TOML configuration file.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Io`] if the file cannot be read and
    /// [`CatalogError::Config`] if it is not valid TOML.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path.as_ref())?;
        Self::from_toml_str(&text)
    }

    /// Timeout applied to every outbound HTTP call.
    #[must_use]
    pub const fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.enrichment_timeout_secs)
    }
}

/// Opens the configured store and enrichment client and wraps them in a
/// [`Runtime`].
///
/// The catalog starts empty; dispatch [`Event::Refresh`] to load it.
///
/// # Errors
///
/// Returns [`CatalogError::Config`] for an unknown or incomplete store
/// selection, or any error from opening the store.
pub fn initialize(config: &Config) -> Result<Runtime<Box<dyn ProductStore>, HttpEnricher>> {
    tracing::debug!(store = %config.store, enrichment_url = %config.enrichment_url, "initializing product hub");

    let store = storage::open_store(config)?;
    let enricher = HttpEnricher::new(config.enrichment_url.clone(), config.request_timeout())?;
    Ok(Runtime::new(store, enricher))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn map(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect()
    }

    #[test]
    fn defaults() {
        let config = Config::default();
        assert_eq!(config.store, StoreKind::Json);
        assert_eq!(config.store_path, PathBuf::from("products.json"));
        assert_eq!(config.enrichment_url, "http://localhost:8000/process");
        assert_eq!(config.request_timeout(), Duration::from_secs(30));
        assert_eq!(config.log_level, "info");
        assert!(config.log_file.is_none());
    }

    #[test]
    fn invalid_values_keep_defaults() {
        let config = Config::from_map(&map(&[
            ("enrichment_timeout_secs", "soon"),
            ("store_path", "  "),
            ("colour", "blue"),
        ]));
        assert_eq!(config, Config::default());

        let config = Config::from_map(&map(&[("enrichment_timeout_secs", "0")]));
        assert_eq!(config.enrichment_timeout_secs, 30);
    }

    #[test]
    fn unknown_store_is_kept_for_rejection() {
        let config = Config::from_map(&map(&[("store", "sqlite")]));
        assert_eq!(config.store, StoreKind::Unknown("sqlite".to_string()));
    }

    #[test]
    fn toml_settings() {
        let config = Config::from_toml_str(
            r#"
            store = "REST"
            store_url = "https://db.example.com/"
            enrichment_timeout_secs = 5
            log_file = "hub.log"
            "#,
        )
        .unwrap();
        assert_eq!(config.store, StoreKind::Rest);
        assert_eq!(config.store_url.as_deref(), Some("https://db.example.com"));
        assert_eq!(config.enrichment_timeout_secs, 5);
        assert_eq!(config.log_file, Some(PathBuf::from("hub.log")));
    }

    #[test]
    fn malformed_toml_is_config_error() {
        assert!(matches!(
            Config::from_toml_str("store = "),
            Err(CatalogError::Config(_))
        ));
    }

    #[test]
    fn command_line_overrides_file() {
        let mut config = Config::from_toml_str("log_level = \"warn\"").unwrap();
        config.merge_map(&map(&[("log_level", "debug")]));
        assert_eq!(config.log_level, "debug");
    }
}
