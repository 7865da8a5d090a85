//! Filter-option vocabularies.
//!
//! Distinct, sorted, non-blank values of the brand, material and color columns,
//! offered as choices in the filter panel. A full derivation runs whenever the
//! collection is replaced; a newly created product is merged in place.

use crate::domain::Product;
use std::cmp::Ordering;

/// Distinct values seen for each vocabulary-backed filter.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterOptions {
    pub brands: Vec<String>,
    pub materials: Vec<String>,
    pub colors: Vec<String>,
}

impl FilterOptions {
    /// Derives all three vocabularies from scratch.
    #[must_use]
    pub fn derive(products: &[Product]) -> Self {
        let mut options = Self::default();
        for product in products {
            options.merge(product);
        }
        tracing::debug!(
            brands = options.brands.len(),
            materials = options.materials.len(),
            colors = options.colors.len(),
            "filter options derived"
        );
        options
    }

    /// Adds the product's brand, material and color where not already present.
    pub fn merge(&mut self, product: &Product) {
        insert_sorted(&mut self.brands, product.brand.as_deref());
        insert_sorted(&mut self.materials, product.material.as_deref());
        insert_sorted(&mut self.colors, product.color.as_deref());
    }
}

/// Orders case-insensitively first, then by raw bytes so that values differing
/// only in case stay distinct and deterministic.
#[must_use]
pub fn vocabulary_cmp(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}

fn insert_sorted(values: &mut Vec<String>, candidate: Option<&str>) {
    let Some(candidate) = candidate.map(str::trim).filter(|c| !c.is_empty()) else {
        return;
    };
    if let Err(position) = values.binary_search_by(|existing| vocabulary_cmp(existing, candidate)) {
        values.insert(position, candidate.to_string());
    }
}
