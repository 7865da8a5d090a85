//! Folding an enrichment result into an update request.
//!
//! Each field takes the enriched value when the service supplied a non-blank
//! one and keeps the product's current value otherwise. The resulting patch is a
//! full overwrite, so nothing the service left out is cleared.

use super::messages::EnrichedProduct;
use crate::domain::{Product, ProductPatch};

/// Builds the update request that saves `enriched` onto `existing`.
#[must_use]
pub fn merge_enrichment(existing: &Product, enriched: &EnrichedProduct) -> ProductPatch {
    fn text(new: Option<&String>, old: Option<&String>) -> Option<String> {
        new.filter(|v| !v.trim().is_empty()).or(old).cloned()
    }

    let product_name = enriched
        .product_name
        .as_ref()
        .filter(|name| !name.trim().is_empty())
        .unwrap_or(&existing.product_name)
        .clone();

    ProductPatch {
        product_name,
        barcode: enriched.barcode.or(existing.barcode),
        brand: text(enriched.brand.as_ref(), existing.brand.as_ref()),
        product_image_url: text(
            enriched.product_image_url.as_ref(),
            existing.product_image_url.as_ref(),
        ),
        item_weight: enriched.item_weight.or(existing.item_weight),
        weight_unit: text(enriched.weight_unit.as_ref(), existing.weight_unit.as_ref()),
        product_description: text(
            enriched.product_description.as_ref(),
            existing.product_description.as_ref(),
        ),
        storage_requirements: text(
            enriched.storage_requirements.as_ref(),
            existing.storage_requirements.as_ref(),
        ),
        items_per_package: enriched.items_per_package.or(existing.items_per_package),
        color: text(enriched.color.as_ref(), existing.color.as_ref()),
        material: text(enriched.material.as_ref(), existing.material.as_ref()),
        width: enriched.width.or(existing.width),
        height: enriched.height.or(existing.height),
        dimension_unit: text(enriched.dimension_unit.as_ref(), existing.dimension_unit.as_ref()),
        warranty: enriched.warranty.or(existing.warranty),
        ingredients: enriched
            .ingredients
            .as_ref()
            .filter(|i| !i.is_empty())
            .or(existing.ingredients.as_ref())
            .cloned(),
    }
}
