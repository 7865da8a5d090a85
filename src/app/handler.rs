//! Event handling and state transition logic.
//!
//! [`handle_event`] is the only place where [`CatalogState`] changes in response
//! to operator input or store results. It returns whether the view needs a
//! re-render together with the actions to run.
//!
//! # Architecture
//!
//! 1. Events arrive from the console or as completions from the runtime
//! 2. [`handle_event`] pattern-matches the event
//! 3. State mutations go through `CatalogState` methods
//! 4. Actions are collected and returned for execution
//!
//! # Event Types
//!
//! - **View**: `SearchChanged`, `FiltersApplied`, `FiltersReset`
//! - **Selection**: `ToggleSelection`, `ToggleSelectAll`
//! - **Mutations**: `CreateProduct`, `EditProduct`, `DeleteProduct`, `DeleteSelected`
//! - **Enrichment**: `EnrichProduct`, `SaveEnrichment`, `DiscardEnrichment`
//! - **Completions**: `ProductsLoaded`, `ProductCreated`, `ProductUpdated`,
//!   `ProductDeleted`, `ProductsDeleted`, `EnrichmentReceived`, `EnrichmentSaved`,
//!   `LoadFailed`, `OperationFailed`
//!
//! # Example
//!
//! ```rust
//! use product_hub::app::{handle_event, Action, CatalogState, Event};
//!
//! let mut state = CatalogState::new();
//! let (render, actions) = handle_event(&mut state, &Event::Refresh)?;
//! assert!(!render);
//! assert_eq!(actions, vec![Action::FetchProducts]);
//! # Ok::<(), product_hub::CatalogError>(())
//! ```

use super::actions::{Action, Notification};
use super::filters::FilterCriteria;
use super::state::{CatalogState, PendingEnrichment};
use crate::domain::{CatalogError, Product, Result};
use crate::enrichment::{merge_enrichment, EnrichmentResult};
use crate::forms::ProductForm;

/// Operator input and completion notices from the runtime.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// Re-fetches the whole collection.
    Refresh,
    /// A fetch completed.
    ProductsLoaded(Vec<Product>),
    /// A fetch failed; the current collection is kept.
    LoadFailed(String),

    SearchChanged(String),
    FiltersApplied(FilterCriteria),
    FiltersReset,

    ToggleSelection(i64),
    ToggleSelectAll,

    /// Submits the add-product form.
    CreateProduct(ProductForm),
    ProductCreated(Product),

    /// Submits the edit form for product `id`.
    EditProduct {
        id: i64,
        form: ProductForm,
    },
    ProductUpdated(Product),

    DeleteProduct(i64),
    ProductDeleted(i64),

    /// Deletes every selected product.
    DeleteSelected,
    ProductsDeleted {
        ids: Vec<i64>,
        removed: usize,
    },

    /// Requests enrichment of product `id`.
    EnrichProduct(i64),
    EnrichmentReceived {
        product_id: i64,
        result: EnrichmentResult,
    },
    /// Saves the pending enrichment onto its product.
    SaveEnrichment,
    EnrichmentSaved(Product),
    DiscardEnrichment,

    /// A store call failed.
    OperationFailed {
        /// What was being attempted, e.g. "add product".
        operation: &'static str,
        message: String,
    },
}

/// Processes an event, mutates state, and returns the actions to execute.
///
/// # Returns
///
/// `(render, actions)`: whether the view changed, and side effects to run in
/// order.
///
/// # Errors
///
/// - [`CatalogError::Validation`] when a submitted form does not validate
/// - [`CatalogError::InvalidSelection`] when toggling a product that is not visible
/// - [`CatalogError::ProductNotFound`] when editing or enriching an unknown id
/// - [`CatalogError::NoPendingEnrichment`] when saving with nothing pending
///
/// State is left untouched whenever an error is returned.
pub fn handle_event(state: &mut CatalogState, event: &Event) -> Result<(bool, Vec<Action>)> {
    let _span = tracing::debug_span!("handle_event", event_type = event_name(event)).entered();

    match event {
        Event::Refresh => Ok((false, vec![Action::FetchProducts])),
        Event::ProductsLoaded(products) => {
            tracing::debug!(count = products.len(), "products loaded");
            state.replace_products(products.clone());
            Ok((true, vec![]))
        }
        Event::LoadFailed(message) => {
            tracing::debug!(error = %message, "fetch failed, keeping current collection");
            Ok((
                true,
                vec![Action::Notify(Notification::error(format!(
                    "Failed to fetch products: {message}"
                )))],
            ))
        }
        Event::SearchChanged(query) => {
            tracing::trace!(query = %query, "search query updated");
            state.set_search_query(query.clone());
            Ok((true, vec![]))
        }
        Event::FiltersApplied(criteria) => {
            tracing::debug!(filters = ?criteria, "filters applied");
            state.set_filters(criteria.clone());
            Ok((true, vec![]))
        }
        Event::FiltersReset => {
            state.reset_filters();
            Ok((true, vec![]))
        }
        Event::ToggleSelection(id) => {
            let selected = state.toggle_selection(*id)?;
            tracing::debug!(product_id = id, selected, "selection toggled");
            Ok((true, vec![]))
        }
        Event::ToggleSelectAll => {
            state.toggle_select_all();
            Ok((true, vec![]))
        }
        Event::CreateProduct(form) => {
            let product = form.clone().into_new_product()?;
            tracing::debug!(product_id = product.id, "submitting new product");
            Ok((false, vec![Action::InsertProduct(product)]))
        }
        Event::ProductCreated(product) => {
            state.merge_options(product);
            Ok((
                true,
                vec![
                    Action::Notify(Notification::success("Product added successfully")),
                    Action::FetchProducts,
                ],
            ))
        }
        Event::EditProduct { id, form } => {
            if state.product(*id).is_none() {
                return Err(CatalogError::ProductNotFound(*id));
            }
            let patch = form.clone().into_patch()?;
            Ok((false, vec![Action::UpdateProduct { id: *id, patch }]))
        }
        Event::ProductUpdated(product) => {
            tracing::debug!(product_id = product.id, "product updated");
            Ok((
                true,
                vec![
                    Action::Notify(Notification::success("Product updated successfully")),
                    Action::FetchProducts,
                ],
            ))
        }
        Event::DeleteProduct(id) => Ok((false, vec![Action::DeleteProduct(*id)])),
        Event::ProductDeleted(id) => {
            state.deselect(*id);
            if state
                .pending_enrichment
                .as_ref()
                .is_some_and(|pending| pending.product_id == *id)
            {
                state.pending_enrichment = None;
            }
            Ok((
                true,
                vec![
                    Action::Notify(Notification::success("Product deleted successfully")),
                    Action::FetchProducts,
                ],
            ))
        }
        Event::DeleteSelected => {
            let ids = state.selected_ids();
            if ids.is_empty() {
                tracing::debug!("nothing selected to delete");
                return Ok((false, vec![]));
            }
            tracing::debug!(count = ids.len(), "deleting selected products");
            Ok((false, vec![Action::DeleteProducts(ids)]))
        }
        Event::ProductsDeleted { ids, removed } => {
            tracing::debug!(requested = ids.len(), removed, "bulk delete completed");
            state.clear_selection();
            if state
                .pending_enrichment
                .as_ref()
                .is_some_and(|pending| ids.contains(&pending.product_id))
            {
                state.pending_enrichment = None;
            }
            Ok((
                true,
                vec![
                    Action::Notify(Notification::success(format!(
                        "{} products deleted successfully",
                        ids.len()
                    ))),
                    Action::FetchProducts,
                ],
            ))
        }
        Event::EnrichProduct(id) => {
            let product = state
                .product(*id)
                .cloned()
                .ok_or(CatalogError::ProductNotFound(*id))?;
            Ok((false, vec![Action::EnrichProduct(product)]))
        }
        Event::EnrichmentReceived { product_id, result } => {
            let mut actions = vec![];
            if let EnrichmentResult::Fallback { reason, .. } = result {
                actions.push(Action::Notify(Notification::warning(format!(
                    "{reason} Showing sample enrichment data instead."
                ))));
            }
            state.pending_enrichment = Some(PendingEnrichment {
                product_id: *product_id,
                result: result.clone(),
            });
            Ok((true, actions))
        }
        Event::SaveEnrichment => {
            let pending = state
                .pending_enrichment
                .as_ref()
                .ok_or(CatalogError::NoPendingEnrichment)?;
            let existing = state
                .product(pending.product_id)
                .ok_or(CatalogError::ProductNotFound(pending.product_id))?;
            let patch = merge_enrichment(existing, pending.result.data());
            Ok((
                false,
                vec![Action::SaveEnrichment {
                    id: pending.product_id,
                    patch,
                }],
            ))
        }
        Event::EnrichmentSaved(product) => {
            tracing::debug!(product_id = product.id, "enrichment saved");
            state.pending_enrichment = None;
            Ok((
                true,
                vec![
                    Action::Notify(Notification::success("Product enriched successfully")),
                    Action::FetchProducts,
                ],
            ))
        }
        Event::DiscardEnrichment => {
            if state.pending_enrichment.take().is_none() {
                return Err(CatalogError::NoPendingEnrichment);
            }
            Ok((true, vec![]))
        }
        Event::OperationFailed { operation, message } => {
            tracing::debug!(operation, error = %message, "operation failed");
            Ok((
                true,
                vec![Action::Notify(Notification::error(format!(
                    "Failed to {operation}: {message}"
                )))],
            ))
        }
    }
}

fn event_name(event: &Event) -> &'static str {
    match event {
        Event::Refresh => "refresh",
        Event::ProductsLoaded(_) => "products_loaded",
        Event::LoadFailed(_) => "load_failed",
        Event::SearchChanged(_) => "search_changed",
        Event::FiltersApplied(_) => "filters_applied",
        Event::FiltersReset => "filters_reset",
        Event::ToggleSelection(_) => "toggle_selection",
        Event::ToggleSelectAll => "toggle_select_all",
        Event::CreateProduct(_) => "create_product",
        Event::ProductCreated(_) => "product_created",
        Event::EditProduct { .. } => "edit_product",
        Event::ProductUpdated(_) => "product_updated",
        Event::DeleteProduct(_) => "delete_product",
        Event::ProductDeleted(_) => "product_deleted",
        Event::DeleteSelected => "delete_selected",
        Event::ProductsDeleted { .. } => "products_deleted",
        Event::EnrichProduct(_) => "enrich_product",
        Event::EnrichmentReceived { .. } => "enrichment_received",
        Event::SaveEnrichment => "save_enrichment",
        Event::EnrichmentSaved(_) => "enrichment_saved",
        Event::DiscardEnrichment => "discard_enrichment",
        Event::OperationFailed { .. } => "operation_failed",
    }
}
