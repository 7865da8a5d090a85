//! Text rendering layer.
//!
//! # Architecture
//!
//! ```text
//! CatalogState → CatalogViewModel / DetailView → render_* → String
//! ```
//!
//! # Modules
//!
//! - [`viewmodel`]: table view model (rows, header, footer, empty state)
//! - [`details`]: single-product detail view
//! - [`renderer`]: plain-text rendering of view models

pub mod details;
pub mod renderer;
pub mod viewmodel;

pub use details::DetailView;
pub use renderer::{
    render_catalog, render_details, render_enrichment, render_notifications, render_options,
    render_viewmodel,
};
pub use viewmodel::{CatalogViewModel, EmptyState, FooterInfo, HeaderInfo, TableRow};
