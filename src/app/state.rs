//! Catalog view engine state.
//!
//! [`CatalogState`] owns the in-memory product collection and everything derived
//! from it: the visible subset, the row selection, and the filter-option
//! vocabularies. It is the single source of truth the renderer reads from.
//!
//! # State Components
//!
//! - **Products**: full snapshot from the last fetch, in fetch order
//! - **Visible**: indices of products passing search and filters
//! - **Selection**: ids chosen for bulk deletion, always a subset of visible ids
//! - **Options**: distinct brands, materials and colors
//! - **Pending enrichment**: an enrichment result awaiting save or discard
//!
//! # Selection Rules
//!
//! Changing the search query or the filters clears the selection. Replacing the
//! collection on refresh only prunes ids that are no longer visible.
//!
//! # Example
//!
//! ```rust
//! use product_hub::app::CatalogState;
//! use product_hub::domain::Product;
//!
//! let mut state = CatalogState::new();
//! state.replace_products(vec![Product::new(1, "Safety Glasses"), Product::new(2, "Goggles")]);
//! state.set_search_query("glass");
//! assert_eq!(state.visible_ids(), vec![1]);
//! ```

use super::filters::{apply_filters, FilterCriteria};
use super::vocabulary::FilterOptions;
use crate::domain::{CatalogError, Product, Result};
use crate::enrichment::EnrichmentResult;
use std::collections::BTreeSet;

/// An enrichment result held for operator review.
#[derive(Debug, Clone, PartialEq)]
pub struct PendingEnrichment {
    /// Product the enrichment was requested for.
    pub product_id: i64,
    pub result: EnrichmentResult,
}

/// Central state of the catalog console.
#[derive(Debug, Clone, Default)]
pub struct CatalogState {
    products: Vec<Product>,
    visible: Vec<usize>,
    search_query: String,
    filters: FilterCriteria,
    selected: BTreeSet<i64>,
    options: FilterOptions,

    /// Enrichment awaiting save or discard.
    pub pending_enrichment: Option<PendingEnrichment>,
}

impl CatalogState {
    /// Creates an empty state with no constraints.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the whole collection with a fresh fetch.
    ///
    /// Recomputes the visible set, re-derives the vocabularies, and prunes the
    /// selection down to ids that are still visible.
    pub fn replace_products(&mut self, products: Vec<Product>) {
        let _span = tracing::debug_span!("replace_products", count = products.len()).entered();

        self.products = products;
        self.recompute_visible();
        self.options = FilterOptions::derive(&self.products);

        let visible: BTreeSet<i64> = self.visible_ids().into_iter().collect();
        let before = self.selected.len();
        self.selected.retain(|id| visible.contains(id));

        if before != self.selected.len() {
            tracing::debug!(
                pruned = before - self.selected.len(),
                "dropped selections no longer visible"
            );
        }
    }

    /// Sets the search query and clears the selection.
    pub fn set_search_query(&mut self, query: impl Into<String>) {
        self.search_query = query.into();
        self.selected.clear();
        self.recompute_visible();
    }

    /// Replaces the filter criteria and clears the selection.
    pub fn set_filters(&mut self, filters: FilterCriteria) {
        self.filters = filters;
        self.selected.clear();
        self.recompute_visible();
    }

    /// Restores unconstrained filters and clears the selection.
    pub fn reset_filters(&mut self) {
        self.set_filters(FilterCriteria::default());
    }

    fn recompute_visible(&mut self) {
        let _span = tracing::debug_span!(
            "recompute_visible",
            total_products = self.products.len(),
            query_len = self.search_query.len()
        )
        .entered();

        self.visible = apply_filters(&self.products, &self.search_query, &self.filters);

        tracing::debug!(visible_count = self.visible.len(), "visible set recomputed");
    }

    /// Flips the selection state of a visible product.
    ///
    /// # Returns
    ///
    /// `true` if the product is now selected.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::InvalidSelection`] if `id` is not visible.
    pub fn toggle_selection(&mut self, id: i64) -> Result<bool> {
        if !self.is_visible(id) {
            return Err(CatalogError::InvalidSelection(id));
        }
        if self.selected.remove(&id) {
            Ok(false)
        } else {
            self.selected.insert(id);
            Ok(true)
        }
    }

    /// Selects every visible product, or clears the selection if all visible
    /// products are already selected.
    pub fn toggle_select_all(&mut self) {
        if self.is_all_selected() {
            self.selected.clear();
        } else {
            self.selected = self.visible_ids().into_iter().collect();
        }
        tracing::debug!(selected = self.selected.len(), "select all toggled");
    }

    /// `true` when the visible set is non-empty and fully selected.
    #[must_use]
    pub fn is_all_selected(&self) -> bool {
        !self.visible.is_empty() && self.selected.len() == self.visible.len()
    }

    #[must_use]
    pub fn is_selected(&self, id: i64) -> bool {
        self.selected.contains(&id)
    }

    #[must_use]
    pub fn is_visible(&self, id: i64) -> bool {
        self.visible_products().any(|p| p.id == id)
    }

    /// Removes one id from the selection, if present.
    pub fn deselect(&mut self, id: i64) {
        self.selected.remove(&id);
    }

    pub fn clear_selection(&mut self) {
        self.selected.clear();
    }

    /// Merges a newly created product into the vocabularies without a full
    /// re-derivation.
    pub fn merge_options(&mut self, product: &Product) {
        self.options.merge(product);
    }

    /// Visible products in fetch order.
    pub fn visible_products(&self) -> impl Iterator<Item = &Product> + '_ {
        self.visible.iter().filter_map(|&index| self.products.get(index))
    }

    #[must_use]
    pub fn visible_ids(&self) -> Vec<i64> {
        self.visible_products().map(|p| p.id).collect()
    }

    #[must_use]
    pub fn visible_count(&self) -> usize {
        self.visible.len()
    }

    /// Selected ids in ascending order.
    #[must_use]
    pub fn selected_ids(&self) -> Vec<i64> {
        self.selected.iter().copied().collect()
    }

    #[must_use]
    pub fn selected_count(&self) -> usize {
        self.selected.len()
    }

    /// Looks up a product in the full collection, visible or not.
    #[must_use]
    pub fn product(&self, id: i64) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }

    #[must_use]
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    #[must_use]
    pub fn search_query(&self) -> &str {
        &self.search_query
    }

    #[must_use]
    pub fn filters(&self) -> &FilterCriteria {
        &self.filters
    }

    #[must_use]
    pub fn options(&self) -> &FilterOptions {
        &self.options
    }
}
