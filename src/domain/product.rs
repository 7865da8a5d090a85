//! Product domain model.
//!
//! [`Product`] is the single entity of the catalog. It mirrors one row of the
//! `products` relation, using the relation's snake_case column names on the wire.
//! Two request shapes derive from it:
//!
//! - [`NewProduct`]: sent on create; absent fields are left out of the body entirely.
//! - [`ProductPatch`]: sent on update; absent fields are sent as explicit `null`.
//!
//! # Example
//!
//! ```rust
//! use product_hub::domain::Product;
//!
//! let product = Product::new(1, "Safety Glasses");
//! assert!(product.brand.is_none());
//! assert!(!product.is_enriched());
//! ```

use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// A catalog product.
///
/// Only `id` and `product_name` are always present; every other attribute is
/// optional and rendered as "N/A" when absent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// Externally assigned, immutable primary key.
    pub id: i64,

    #[serde(default)]
    pub product_name: String,

    #[serde(default)]
    pub barcode: Option<i64>,

    #[serde(default)]
    pub brand: Option<String>,

    #[serde(default, rename = "product_image")]
    pub product_image_url: Option<String>,

    #[serde(default)]
    pub item_weight: Option<f64>,

    #[serde(default)]
    pub weight_unit: Option<String>,

    #[serde(default)]
    pub product_description: Option<String>,

    #[serde(default)]
    pub storage_requirements: Option<String>,

    #[serde(default)]
    pub items_per_package: Option<i64>,

    #[serde(default)]
    pub color: Option<String>,

    #[serde(default)]
    pub material: Option<String>,

    #[serde(default)]
    pub width: Option<f64>,

    #[serde(default)]
    pub height: Option<f64>,

    #[serde(default)]
    pub dimension_unit: Option<String>,

    /// Warranty length in years.
    #[serde(default)]
    pub warranty: Option<i64>,

    #[serde(default)]
    pub ingredients: Option<Ingredients>,
}

impl Product {
    /// Creates a product with only the required fields set.
    #[must_use]
    pub fn new(id: i64, product_name: impl Into<String>) -> Self {
        Self {
            id,
            product_name: product_name.into(),
            barcode: None,
            brand: None,
            product_image_url: None,
            item_weight: None,
            weight_unit: None,
            product_description: None,
            storage_requirements: None,
            items_per_package: None,
            color: None,
            material: None,
            width: None,
            height: None,
            dimension_unit: None,
            warranty: None,
            ingredients: None,
        }
    }

    /// Returns `true` when the product carries a description or ingredients,
    /// the two fields only the enrichment service fills in practice.
    #[must_use]
    pub fn is_enriched(&self) -> bool {
        self.product_description
            .as_deref()
            .is_some_and(|d| !d.trim().is_empty())
            || self.ingredients.as_ref().is_some_and(|i| !i.is_empty())
    }
}

/// Ingredient listing of a product.
///
/// Stored either as free text or as a mapping from category name (for example
/// "Seasoning") to the ingredients in that category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Ingredients {
    PlainText(String),
    Categorized(BTreeMap<String, Vec<String>>),
}

impl Ingredients {
    /// Returns `true` if there is nothing to show.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        match self {
            Self::PlainText(text) => text.trim().is_empty(),
            Self::Categorized(map) => map.values().all(Vec::is_empty),
        }
    }
}

impl fmt::Display for Ingredients {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PlainText(text) => f.write_str(text),
            Self::Categorized(map) => {
                let mut first = true;
                for (category, items) in map {
                    if !first {
                        f.write_str("\n")?;
                    }
                    first = false;
                    write!(f, "{category}: {}", items.join(", "))?;
                }
                Ok(())
            }
        }
    }
}

/// Lenient decoding: ingredient payloads come from both the store and the
/// enrichment service, and the latter is loose about shapes.
///
/// - string: plain text
/// - object: categorized; a string value becomes a one-element list, other
///   scalars are stringified
/// - array: plain text, items joined with ", "
impl<'de> Deserialize<'de> for Ingredients {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        use serde_json::Value;

        let value = Value::deserialize(deserializer)?;
        match value {
            Value::String(text) => Ok(Self::PlainText(text)),
            Value::Object(entries) => {
                let map = entries
                    .into_iter()
                    .map(|(category, items)| {
                        let items = match items {
                            Value::Array(list) => list.into_iter().filter_map(scalar_text).collect(),
                            other => scalar_text(other).into_iter().collect(),
                        };
                        (category, items)
                    })
                    .collect();
                Ok(Self::Categorized(map))
            }
            Value::Array(list) => Ok(Self::PlainText(
                list.into_iter()
                    .filter_map(scalar_text)
                    .collect::<Vec<_>>()
                    .join(", "),
            )),
            other => Err(serde::de::Error::custom(format!(
                "ingredients must be a string or an object, got {other}"
            ))),
        }
    }
}

fn scalar_text(value: serde_json::Value) -> Option<String> {
    use serde_json::Value;
    match value {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

/// Body of a create request.
///
/// Absent optional fields are omitted from the serialized JSON rather than sent
/// as `null`, so the store applies its own column defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewProduct {
    pub id: i64,
    pub product_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub barcode: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub brand: Option<String>,
    #[serde(rename = "product_image", skip_serializing_if = "Option::is_none")]
    pub product_image_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub item_weight: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weight_unit: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product_description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub storage_requirements: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub items_per_package: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub material: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dimension_unit: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warranty: Option<i64>,
}

impl NewProduct {
    /// Creates a request carrying only the required columns.
    #[must_use]
    pub fn from_required(id: i64, product_name: impl Into<String>) -> Self {
        Self {
            id,
            product_name: product_name.into(),
            barcode: None,
            brand: None,
            product_image_url: None,
            item_weight: None,
            weight_unit: None,
            product_description: None,
            storage_requirements: None,
            items_per_package: None,
            color: None,
            material: None,
            width: None,
            height: None,
            dimension_unit: None,
            warranty: None,
        }
    }
}

impl From<NewProduct> for Product {
    fn from(new: NewProduct) -> Self {
        Self {
            id: new.id,
            product_name: new.product_name,
            barcode: new.barcode,
            brand: new.brand,
            product_image_url: new.product_image_url,
            item_weight: new.item_weight,
            weight_unit: new.weight_unit,
            product_description: new.product_description,
            storage_requirements: new.storage_requirements,
            items_per_package: new.items_per_package,
            color: new.color,
            material: new.material,
            width: new.width,
            height: new.height,
            dimension_unit: new.dimension_unit,
            warranty: new.warranty,
            ingredients: None,
        }
    }
}

/// Body of an update request.
///
/// Every scalar column is sent, with `null` clearing it. `ingredients` is only
/// sent when the patch carries a value, so edits made through the form never
/// wipe ingredients that came from enrichment.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProductPatch {
    pub product_name: String,
    pub barcode: Option<i64>,
    pub brand: Option<String>,
    #[serde(rename = "product_image")]
    pub product_image_url: Option<String>,
    pub item_weight: Option<f64>,
    pub weight_unit: Option<String>,
    pub product_description: Option<String>,
    pub storage_requirements: Option<String>,
    pub items_per_package: Option<i64>,
    pub color: Option<String>,
    pub material: Option<String>,
    pub width: Option<f64>,
    pub height: Option<f64>,
    pub dimension_unit: Option<String>,
    pub warranty: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ingredients: Option<Ingredients>,
}

impl ProductPatch {
    /// Overwrites `product` with the patch. The id is never touched.
    pub fn apply_to(&self, product: &mut Product) {
        product.product_name.clone_from(&self.product_name);
        product.barcode = self.barcode;
        product.brand.clone_from(&self.brand);
        product.product_image_url.clone_from(&self.product_image_url);
        product.item_weight = self.item_weight;
        product.weight_unit.clone_from(&self.weight_unit);
        product.product_description.clone_from(&self.product_description);
        product.storage_requirements.clone_from(&self.storage_requirements);
        product.items_per_package = self.items_per_package;
        product.color.clone_from(&self.color);
        product.material.clone_from(&self.material);
        product.width = self.width;
        product.height = self.height;
        product.dimension_unit.clone_from(&self.dimension_unit);
        product.warranty = self.warranty;
        if let Some(ingredients) = &self.ingredients {
            product.ingredients = Some(ingredients.clone());
        }
    }
}

impl From<&Product> for ProductPatch {
    fn from(product: &Product) -> Self {
        Self {
            product_name: product.product_name.clone(),
            barcode: product.barcode,
            brand: product.brand.clone(),
            product_image_url: product.product_image_url.clone(),
            item_weight: product.item_weight,
            weight_unit: product.weight_unit.clone(),
            product_description: product.product_description.clone(),
            storage_requirements: product.storage_requirements.clone(),
            items_per_package: product.items_per_package,
            color: product.color.clone(),
            material: product.material.clone(),
            width: product.width,
            height: product.height,
            dimension_unit: product.dimension_unit.clone(),
            warranty: product.warranty,
            ingredients: product.ingredients.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn deserializes_row_with_missing_columns() {
        let product: Product = serde_json::from_value(json!({
            "id": 7,
            "product_name": "Goggles",
            "brand": null,
            "item_weight": 200
        }))
        .unwrap();

        assert_eq!(product.id, 7);
        assert_eq!(product.item_weight, Some(200.0));
        assert!(product.brand.is_none());
        assert!(product.ingredients.is_none());
    }

    #[test]
    fn product_image_uses_column_name() {
        let mut product = Product::new(1, "Kit");
        product.product_image_url = Some("https://img".to_string());
        let value = serde_json::to_value(&product).unwrap();
        assert_eq!(value["product_image"], "https://img");
        assert!(value.get("product_image_url").is_none());
    }

    #[test]
    fn categorized_ingredients_accept_single_strings() {
        let ingredients: Ingredients = serde_json::from_value(json!({
            "Noodles": ["rice flour", "tapioca starch"],
            "Oil": "canola oil"
        }))
        .unwrap();

        let Ingredients::Categorized(map) = ingredients else {
            panic!("expected categorized ingredients");
        };
        assert_eq!(map["Noodles"], vec!["rice flour", "tapioca starch"]);
        assert_eq!(map["Oil"], vec!["canola oil"]);
    }

    #[test]
    fn plain_text_ingredients() {
        let ingredients: Ingredients = serde_json::from_value(json!("water, salt")).unwrap();
        assert_eq!(ingredients, Ingredients::PlainText("water, salt".to_string()));
    }

    #[test]
    fn new_product_omits_absent_fields() {
        let mut new = NewProduct::from_required(5, "Gloves");
        new.brand = Some("Acme".to_string());
        let value = serde_json::to_value(&new).unwrap();
        let object = value.as_object().unwrap();

        assert_eq!(object.len(), 3);
        assert_eq!(object["brand"], "Acme");
    }

    #[test]
    fn patch_sends_nulls_but_skips_missing_ingredients() {
        let patch = ProductPatch::from(&Product::new(5, "Gloves"));
        let value = serde_json::to_value(&patch).unwrap();

        assert!(value["brand"].is_null());
        assert!(value.as_object().unwrap().contains_key("brand"));
        assert!(!value.as_object().unwrap().contains_key("ingredients"));
    }

    #[test]
    fn patch_keeps_existing_ingredients() {
        let mut product = Product::new(1, "Kit");
        product.ingredients = Some(Ingredients::PlainText("rice".to_string()));
        product.brand = Some("Old".to_string());

        let mut patch = ProductPatch::from(&Product::new(1, "Kit v2"));
        patch.ingredients = None;
        patch.apply_to(&mut product);

        assert_eq!(product.product_name, "Kit v2");
        assert!(product.brand.is_none());
        assert_eq!(product.ingredients, Some(Ingredients::PlainText("rice".to_string())));
    }

    #[test]
    fn enrichment_detection() {
        let mut product = Product::new(1, "Kit");
        assert!(!product.is_enriched());
        product.product_description = Some("Tasty".to_string());
        assert!(product.is_enriched());
    }
}
