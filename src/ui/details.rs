//! Single-product detail view.

use crate::domain::{Ingredients, Product};
use crate::enrichment::NOT_AVAILABLE;

/// Shown when a product has no description.
pub const NO_DESCRIPTION: &str = "No description available.";

/// Display-ready details of one product.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailView {
    pub title: String,
    pub image: Option<String>,
    /// "Basic Information" rows.
    pub basic: Vec<(&'static str, String)>,
    /// "Physical Attributes" rows.
    pub physical: Vec<(&'static str, String)>,
    pub description: String,
    /// Only present when the product has ingredients.
    pub ingredients: Option<Vec<String>>,
}

impl DetailView {
    #[must_use]
    pub fn from_product(product: &Product) -> Self {
        let na = || NOT_AVAILABLE.to_string();
        let text = |value: &Option<String>| {
            value
                .as_deref()
                .filter(|v| !v.trim().is_empty())
                .map_or_else(na, str::to_string)
        };

        let warranty = product.warranty.filter(|w| *w != 0).map_or_else(na, |years| {
            if years == 1 {
                "1 year".to_string()
            } else {
                format!("{years} years")
            }
        });

        let weight = product.item_weight.filter(|w| *w != 0.0).map_or_else(na, |w| {
            format!("{w} {}", product.weight_unit.as_deref().unwrap_or(""))
                .trim_end()
                .to_string()
        });

        let dimensions = if product.width.is_some() || product.height.is_some() {
            format!(
                "{} × {} {}",
                product.width.unwrap_or(0.0),
                product.height.unwrap_or(0.0),
                product.dimension_unit.as_deref().unwrap_or("")
            )
            .trim_end()
            .to_string()
        } else {
            na()
        };

        Self {
            title: product.product_name.clone(),
            image: product.product_image_url.clone().filter(|url| !url.is_empty()),
            basic: vec![
                ("ID", product.id.to_string()),
                ("Name", product.product_name.clone()),
                ("Barcode", product.barcode.map_or_else(na, |b| b.to_string())),
                ("Brand", text(&product.brand)),
                (
                    "Items per Package",
                    product
                        .items_per_package
                        .filter(|n| *n != 0)
                        .map_or_else(na, |n| n.to_string()),
                ),
                ("Warranty", warranty),
            ],
            physical: vec![
                ("Weight", weight),
                ("Dimensions", dimensions),
                ("Color", text(&product.color)),
                ("Material", text(&product.material)),
                ("Storage", text(&product.storage_requirements)),
            ],
            description: product
                .product_description
                .clone()
                .filter(|d| !d.trim().is_empty())
                .unwrap_or_else(|| NO_DESCRIPTION.to_string()),
            ingredients: product.ingredients.as_ref().map(ingredient_lines),
        }
    }
}

fn ingredient_lines(ingredients: &Ingredients) -> Vec<String> {
    match ingredients {
        Ingredients::PlainText(text) => vec![text.clone()],
        Ingredients::Categorized(map) => map
            .iter()
            .map(|(category, items)| format!("{category}: {}", items.join(", ")))
            .collect(),
    }
}
