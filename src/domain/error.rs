//! Error types for the product catalog console.
//!
//! This module defines the centralized error type [`CatalogError`] and a type alias
//! [`Result`] used throughout the crate. Every failure is terminal for the single
//! operation that produced it; none of them ends the console session.

use thiserror::Error;

/// The main error type for catalog operations.
///
/// Validation errors block a form submission. Enrichment failures are recovered
/// locally with mock data; everything else is reported as a notification.
///
/// # Examples
///
/// ```
/// use product_hub::CatalogError;
///
/// let err = CatalogError::validation("id", "ID is required");
/// assert_eq!(err.to_string(), "Invalid id: ID is required");
/// ```
#[derive(Debug, Error)]
pub enum CatalogError {
    /// A form field failed validation.
    ///
    /// Blocks submission; the message is shown next to the offending field.
    #[error("Invalid {field}: {message}")]
    Validation {
        /// Name of the offending form field.
        field: &'static str,
        /// Human-readable explanation.
        message: String,
    },

    /// The backend store could not be reached or rejected the request.
    ///
    /// Surfaced to the operator as a notification. Never retried.
    #[error("Transport error: {0}")]
    Transport(String),

    /// The enrichment service failed.
    ///
    /// Callers recover by substituting the canned mock record.
    #[error("Enrichment unavailable: {0}")]
    EnrichmentUnavailable(String),

    /// Attempted to select a product that is not in the visible set.
    #[error("Product {0} is not visible and cannot be selected")]
    InvalidSelection(i64),

    /// No product with the given id exists.
    #[error("Product {0} not found")]
    ProductNotFound(i64),

    /// Save or discard requested while no enrichment result is pending.
    #[error("No enrichment result is pending")]
    NoPendingEnrichment,

    /// The local store file is corrupt or violates a constraint.
    #[error("Storage error: {0}")]
    Storage(String),

    /// Filesystem or I/O operation failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration is invalid or missing.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl CatalogError {
    /// Shorthand for building a [`CatalogError::Validation`].
    pub fn validation(field: &'static str, message: impl Into<String>) -> Self {
        Self::Validation {
            field,
            message: message.into(),
        }
    }
}

impl From<reqwest::Error> for CatalogError {
    fn from(err: reqwest::Error) -> Self {
        Self::Transport(err.to_string())
    }
}

/// A specialized `Result` type for catalog operations.
pub type Result<T> = std::result::Result<T, CatalogError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_message_names_field() {
        let err = CatalogError::validation("barcode", "must be a whole number");
        assert_eq!(err.to_string(), "Invalid barcode: must be a whole number");
    }

    #[test]
    fn io_errors_convert() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err: CatalogError = io.into();
        assert!(matches!(err, CatalogError::Io(_)));
    }
}
