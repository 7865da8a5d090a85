//! Plain-text summary of an enrichment result for operator review.

use super::messages::{EnrichedProduct, NOT_AVAILABLE};
use crate::domain::Ingredients;
use std::fmt::Write as _;

/// Renders `data` as the review text shown before saving.
///
/// Weight, dimensions, storage requirements, items per package and ingredients
/// appear only when present; the remaining headings always appear, with `N/A`
/// standing in for missing values.
#[must_use]
pub fn format_enrichment(data: &EnrichedProduct) -> String {
    fn or_na(value: Option<&String>) -> &str {
        value
            .map(String::as_str)
            .filter(|v| !v.trim().is_empty())
            .unwrap_or(NOT_AVAILABLE)
    }

    let mut out = String::new();

    let _ = writeln!(out, "Product Name: {}", or_na(data.product_name.as_ref()));
    let _ = writeln!(out, "Brand: {}", or_na(data.brand.as_ref()));
    let _ = writeln!(
        out,
        "Barcode: {}",
        data.barcode.map_or_else(|| NOT_AVAILABLE.to_string(), |b| b.to_string())
    );

    if let Some(weight) = data.item_weight.filter(|w| *w != 0.0) {
        let line = format!("Weight: {weight} {}", data.weight_unit.as_deref().unwrap_or(""));
        let _ = writeln!(out, "{}", line.trim_end());
    }

    if data.width.is_some() || data.height.is_some() {
        let side = |v: Option<f64>| v.map_or_else(|| NOT_AVAILABLE.to_string(), |v| v.to_string());
        let line = format!(
            "Dimensions: {} × {} {}",
            side(data.width),
            side(data.height),
            data.dimension_unit.as_deref().unwrap_or("")
        );
        let _ = writeln!(out, "{}", line.trim_end());
    }

    let _ = writeln!(out, "Color: {}", or_na(data.color.as_ref()));
    let _ = writeln!(out, "Material: {}", or_na(data.material.as_ref()));
    out.push('\n');

    let _ = writeln!(out, "Description: {}", or_na(data.product_description.as_ref()));
    out.push('\n');

    if let Some(storage) = data.storage_requirements.as_deref().filter(|s| !s.trim().is_empty()) {
        let _ = writeln!(out, "Storage Requirements: {storage}");
        out.push('\n');
    }

    if let Some(count) = data.items_per_package.filter(|c| *c != 0) {
        let _ = writeln!(out, "Items per Package: {count}");
        out.push('\n');
    }

    if let Some(ingredients) = &data.ingredients {
        out.push_str("Ingredients:\n");
        match ingredients {
            Ingredients::PlainText(text) => {
                let _ = writeln!(out, "  {text}");
            }
            Ingredients::Categorized(map) => {
                for (category, items) in map {
                    let _ = writeln!(out, "  {category}: {}", items.join(", "));
                }
            }
        }
    }

    out
}
