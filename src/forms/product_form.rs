//! Operator form for creating and editing products.
//!
//! The form holds raw text exactly as typed. Conversion into a request shape is
//! where validation happens: numeric columns must parse, blank fields are either
//! dropped ([`ProductForm::into_new_product`]) or sent as `null`
//! ([`ProductForm::into_patch`]).

use crate::domain::{CatalogError, NewProduct, Product, ProductPatch, Result};
use std::ops::RangeInclusive;

/// Range of randomly generated product ids (eight digits).
pub const GENERATED_ID_RANGE: RangeInclusive<i64> = 10_000_000..=99_999_999;

/// Raw text for every editable product field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductForm {
    pub id: String,
    pub product_name: String,
    pub barcode: String,
    pub brand: String,
    pub product_image_url: String,
    pub item_weight: String,
    pub weight_unit: String,
    pub product_description: String,
    pub storage_requirements: String,
    pub items_per_package: String,
    pub color: String,
    pub material: String,
    pub width: String,
    pub height: String,
    pub dimension_unit: String,
    pub warranty: String,
}

impl ProductForm {
    /// Blank form for a new product with the usual unit defaults
    /// (grams, one item per package, millimetres).
    #[must_use]
    pub fn for_create() -> Self {
        Self {
            weight_unit: "g".to_string(),
            items_per_package: "1".to_string(),
            dimension_unit: "mm".to_string(),
            ..Self::default()
        }
    }

    /// Form pre-filled from an existing product, for editing.
    #[must_use]
    pub fn from_product(product: &Product) -> Self {
        fn text(value: Option<&String>) -> String {
            value.cloned().unwrap_or_default()
        }
        fn number<T: ToString>(value: Option<T>) -> String {
            value.map(|v| v.to_string()).unwrap_or_default()
        }

        Self {
            id: product.id.to_string(),
            product_name: product.product_name.clone(),
            barcode: number(product.barcode),
            brand: text(product.brand.as_ref()),
            product_image_url: text(product.product_image_url.as_ref()),
            item_weight: number(product.item_weight),
            weight_unit: text(product.weight_unit.as_ref()),
            product_description: text(product.product_description.as_ref()),
            storage_requirements: text(product.storage_requirements.as_ref()),
            items_per_package: number(product.items_per_package),
            color: text(product.color.as_ref()),
            material: text(product.material.as_ref()),
            width: number(product.width),
            height: number(product.height),
            dimension_unit: text(product.dimension_unit.as_ref()),
            warranty: number(product.warranty),
        }
    }

    /// Fills the id field with a random eight-digit id.
    pub fn generate_id(&mut self) -> i64 {
        let id = fastrand::i64(GENERATED_ID_RANGE);
        self.id = id.to_string();
        tracing::debug!(id, "generated product id");
        id
    }

    /// Sets a field by its column name.
    ///
    /// Accepts both `product_image` and `product_image_url` for the image column.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Validation`] if `field` names no form field.
    pub fn set(&mut self, field: &str, value: impl Into<String>) -> Result<()> {
        let slot = match field {
            "id" => &mut self.id,
            "product_name" | "name" => &mut self.product_name,
            "barcode" => &mut self.barcode,
            "brand" => &mut self.brand,
            "product_image" | "product_image_url" | "image" => &mut self.product_image_url,
            "item_weight" | "weight" => &mut self.item_weight,
            "weight_unit" => &mut self.weight_unit,
            "product_description" | "description" => &mut self.product_description,
            "storage_requirements" => &mut self.storage_requirements,
            "items_per_package" => &mut self.items_per_package,
            "color" => &mut self.color,
            "material" => &mut self.material,
            "width" => &mut self.width,
            "height" => &mut self.height,
            "dimension_unit" => &mut self.dimension_unit,
            "warranty" => &mut self.warranty,
            _ => {
                return Err(CatalogError::validation(
                    "field",
                    format!("unknown product field '{field}'"),
                ))
            }
        };
        *slot = value.into();
        Ok(())
    }

    /// Validates the form into a create request.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Validation`] when the id is missing or not a whole
    /// number, the name is blank, or any numeric field does not parse.
    pub fn into_new_product(self) -> Result<NewProduct> {
        let id = parse_integer("id", &self.id)?
            .ok_or_else(|| CatalogError::validation("id", "ID is required"))?;
        let product_name = required_name(&self.product_name)?;

        Ok(NewProduct {
            id,
            product_name,
            barcode: parse_integer("barcode", &self.barcode)?,
            brand: text(&self.brand),
            product_image_url: text(&self.product_image_url),
            item_weight: parse_decimal("item_weight", &self.item_weight)?,
            weight_unit: text(&self.weight_unit),
            product_description: text(&self.product_description),
            storage_requirements: text(&self.storage_requirements),
            items_per_package: parse_integer("items_per_package", &self.items_per_package)?,
            color: text(&self.color),
            material: text(&self.material),
            width: parse_decimal("width", &self.width)?,
            height: parse_decimal("height", &self.height)?,
            dimension_unit: text(&self.dimension_unit),
            warranty: parse_integer("warranty", &self.warranty)?,
        })
    }

    /// Validates the form into an update request. The id field is ignored.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Validation`] when the name is blank or any numeric
    /// field does not parse.
    pub fn into_patch(self) -> Result<ProductPatch> {
        Ok(ProductPatch {
            product_name: required_name(&self.product_name)?,
            barcode: parse_integer("barcode", &self.barcode)?,
            brand: text(&self.brand),
            product_image_url: text(&self.product_image_url),
            item_weight: parse_decimal("item_weight", &self.item_weight)?,
            weight_unit: text(&self.weight_unit),
            product_description: text(&self.product_description),
            storage_requirements: text(&self.storage_requirements),
            items_per_package: parse_integer("items_per_package", &self.items_per_package)?,
            color: text(&self.color),
            material: text(&self.material),
            width: parse_decimal("width", &self.width)?,
            height: parse_decimal("height", &self.height)?,
            dimension_unit: text(&self.dimension_unit),
            warranty: parse_integer("warranty", &self.warranty)?,
            ingredients: None,
        })
    }
}

fn text(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

fn required_name(raw: &str) -> Result<String> {
    text(raw).ok_or_else(|| CatalogError::validation("product_name", "Product name is required"))
}

fn parse_integer(field: &'static str, raw: &str) -> Result<Option<i64>> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    trimmed
        .parse::<i64>()
        .map(Some)
        .map_err(|_| CatalogError::validation(field, format!("'{trimmed}' is not a whole number")))
}

fn parse_decimal(field: &'static str, raw: &str) -> Result<Option<f64>> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    match trimmed.parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(Some(value)),
        _ => Err(CatalogError::validation(field, format!("'{trimmed}' is not a number"))),
    }
}
