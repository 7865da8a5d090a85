//! Storage layer for the `products` relation.
//!
//! # Modules
//!
//! - `backend`: [`ProductStore`] trait over the five store calls
//! - `json`: local JSON file store
//! - `rest`: PostgREST-style HTTP store

pub mod backend;
pub mod json;
pub mod rest;

pub use backend::ProductStore;
pub use json::JsonStore;
pub use rest::RestStore;

use crate::domain::{CatalogError, Result};
use crate::{Config, StoreKind};

/// Opens the store selected by `config`.
///
/// # Errors
///
/// Returns [`CatalogError::Config`] for an unknown store kind or a REST store
/// without URL, or any error from opening the chosen backend.
pub fn open_store(config: &Config) -> Result<Box<dyn ProductStore>> {
    match &config.store {
        StoreKind::Json => {
            tracing::debug!(path = ?config.store_path, "using JSON store");
            Ok(Box::new(JsonStore::open(&config.store_path)?))
        }
        StoreKind::Rest => {
            let url = config
                .store_url
                .as_deref()
                .ok_or_else(|| CatalogError::Config("store_url is required for the rest store".to_string()))?;
            tracing::debug!(url = %url, "using REST store");
            Ok(Box::new(RestStore::new(
                url,
                config.store_api_key.as_deref(),
                config.request_timeout(),
            )?))
        }
        StoreKind::Unknown(name) => Err(CatalogError::Config(format!(
            "unknown store '{name}', expected 'json' or 'rest'"
        ))),
    }
}
