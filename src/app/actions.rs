//! Actions representing side effects to be executed by the runtime.
//!
//! The event handler never touches the store or the enrichment service itself.
//! It returns a `Vec<Action>`, and [`super::runtime::Runtime`] executes them in
//! order, turning each outcome into a completion event.
//!
//! # Example
//!
//! ```rust
//! use product_hub::app::{Action, Notification};
//!
//! let actions = vec![
//!     Action::Notify(Notification::success("Product added successfully")),
//!     Action::FetchProducts,
//! ];
//! assert_eq!(actions.len(), 2);
//! ```

use crate::domain::{NewProduct, Product, ProductPatch};
use std::fmt;

/// Commands for the runtime.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Lists every product from the store.
    FetchProducts,

    /// Inserts a validated new product.
    InsertProduct(NewProduct),

    /// Applies an edit-form patch.
    UpdateProduct {
        id: i64,
        patch: ProductPatch,
    },

    /// Applies a merged enrichment patch.
    SaveEnrichment {
        id: i64,
        patch: ProductPatch,
    },

    DeleteProduct(i64),

    DeleteProducts(Vec<i64>),

    /// Calls the enrichment service for a snapshot of the product.
    EnrichProduct(Product),

    /// Shows a message to the operator.
    Notify(Notification),
}

/// How a notification should be presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Success,
    Warning,
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Success => "Success",
            Self::Warning => "Warning",
            Self::Error => "Error",
        })
    }
}

/// A transient operator-facing message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub severity: Severity,
    pub message: String,
}

impl Notification {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Success,
            message: message.into(),
        }
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            message: message.into(),
        }
    }
}

impl fmt::Display for Notification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.severity, self.message)
    }
}
