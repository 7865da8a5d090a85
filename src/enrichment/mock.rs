//! Canned enrichment record used when the service is unavailable.

use super::messages::EnrichedProduct;
use crate::domain::Ingredients;
use std::collections::BTreeMap;

const PRODUCT_IMAGE: &str = "https://s3.ap-southeast-1.amazonaws.com/sup-por-qa-backend-asset/12%2FPRODUCT_IMAGE%2F12_9_1704354861484_sampleocr_1.jpeg";

const DESCRIPTION: &str = "Celebrating the uniquely Asian staple, KOKA combines authentic recipes with the light and velvety texture of our iconic rice fettuccine. Served in flavorful broth, KOKA rice fettuccine gives you smooth as silk goodness in every bite.";

const SEASONING: &[&str] = &[
    "coconut powder (coconut milk)",
    "sugar",
    "salt",
    "spices",
    "crystalline fructose",
    "coriander",
    "lemongrass",
    "tumeric",
    "yeast extract",
    "from tapioca starch",
    "lactic acid",
    "canola oil",
    "laksa flavor (contains celery)",
    "cabbage",
    "dehydrated shrimp",
    "chili flakes",
];

/// Returns the fixed fallback record.
#[must_use]
pub fn mock_enrichment() -> EnrichedProduct {
    let mut ingredients = BTreeMap::new();
    ingredients.insert(
        "Rice Fettuccine".to_string(),
        vec!["rice flour".to_string(), "tapioca starch".to_string()],
    );
    ingredients.insert(
        "Seasoning".to_string(),
        SEASONING.iter().map(|s| (*s).to_string()).collect(),
    );

    EnrichedProduct {
        product_name: Some(
            "Thai peanut noodle kit includes stir-fry rice noodles & thai peanut seasoning".to_string(),
        ),
        barcode: Some(737_628_064_502),
        brand: Some("Thai Kitchen, Simply Asia".to_string()),
        product_image_url: Some(PRODUCT_IMAGE.to_string()),
        item_weight: Some(155.0),
        weight_unit: Some("g".to_string()),
        product_description: Some(DESCRIPTION.to_string()),
        storage_requirements: Some("Store in a cool, dry place".to_string()),
        items_per_package: None,
        color: Some("Brown".to_string()),
        material: None,
        width: Some(145.0),
        height: Some(55.0),
        dimension_unit: Some("mm".to_string()),
        warranty: None,
        ingredients: Some(Ingredients::Categorized(ingredients)),
    }
}
