//! Wire types for the enrichment service.
//!
//! The service accepts a flat, all-string description of a product and answers
//! with a product-shaped JSON object. Responses are loose: numbers may arrive as
//! numbers or as numeric strings, and any field may be missing or `null`.
//!
//! # Request Format
//!
//! ```json
//! {
//!   "product": {
//!     "id": "1",
//!     "name": "Safety Glasses",
//!     "brand": "Acme",
//!     "barcode": "N/A",
//!     "color": "N/A",
//!     "material": "N/A",
//!     "weight": "50 g",
//!     "dimensions": "N/A",
//!     "description": "N/A",
//!     "product_image": "N/A"
//!   }
//! }
//! ```

use crate::domain::{Ingredients, Product};
use serde::{Deserialize, Serialize};

/// Placeholder sent and displayed for absent values.
pub const NOT_AVAILABLE: &str = "N/A";

/// Request envelope posted to the enrichment endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnrichmentRequest {
    pub product: EnrichmentPayload,
}

/// Flattened product description. Every value is a string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnrichmentPayload {
    pub id: String,
    pub name: String,
    pub brand: String,
    pub barcode: String,
    pub color: String,
    pub material: String,
    /// `"{weight} {unit}"`, or `N/A` without a weight.
    pub weight: String,
    /// `"{width} × {height} {unit}"`, or `N/A` without either dimension.
    pub dimensions: String,
    pub description: String,
    pub product_image: String,
}

impl EnrichmentRequest {
    /// Builds the request for `product`.
    #[must_use]
    pub fn for_product(product: &Product) -> Self {
        fn or_na(value: Option<&String>) -> String {
            value
                .map(|v| v.trim())
                .filter(|v| !v.is_empty())
                .map_or_else(|| NOT_AVAILABLE.to_string(), str::to_string)
        }

        let name = if product.product_name.trim().is_empty() {
            NOT_AVAILABLE.to_string()
        } else {
            product.product_name.clone()
        };

        let weight = product.item_weight.map_or_else(
            || NOT_AVAILABLE.to_string(),
            |w| {
                format!("{w} {}", product.weight_unit.as_deref().unwrap_or(""))
                    .trim_end()
                    .to_string()
            },
        );

        let dimensions = if product.width.is_some() || product.height.is_some() {
            format!(
                "{} × {} {}",
                product.width.unwrap_or(0.0),
                product.height.unwrap_or(0.0),
                product.dimension_unit.as_deref().unwrap_or("mm")
            )
        } else {
            NOT_AVAILABLE.to_string()
        };

        Self {
            product: EnrichmentPayload {
                id: product.id.to_string(),
                name,
                brand: or_na(product.brand.as_ref()),
                barcode: product
                    .barcode
                    .map_or_else(|| NOT_AVAILABLE.to_string(), |b| b.to_string()),
                color: or_na(product.color.as_ref()),
                material: or_na(product.material.as_ref()),
                weight,
                dimensions,
                description: or_na(product.product_description.as_ref()),
                product_image: or_na(product.product_image_url.as_ref()),
            },
        }
    }
}

/// Product fields returned by the enrichment service. All optional.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EnrichedProduct {
    #[serde(default)]
    pub product_name: Option<String>,
    #[serde(default, deserialize_with = "lenient::integer")]
    pub barcode: Option<i64>,
    #[serde(default)]
    pub brand: Option<String>,
    #[serde(default, rename = "product_image")]
    pub product_image_url: Option<String>,
    #[serde(default, deserialize_with = "lenient::decimal")]
    pub item_weight: Option<f64>,
    #[serde(default)]
    pub weight_unit: Option<String>,
    #[serde(default)]
    pub product_description: Option<String>,
    #[serde(default)]
    pub storage_requirements: Option<String>,
    #[serde(default, deserialize_with = "lenient::integer")]
    pub items_per_package: Option<i64>,
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default)]
    pub material: Option<String>,
    #[serde(default, deserialize_with = "lenient::decimal")]
    pub width: Option<f64>,
    #[serde(default, deserialize_with = "lenient::decimal")]
    pub height: Option<f64>,
    #[serde(default)]
    pub dimension_unit: Option<String>,
    #[serde(default, deserialize_with = "lenient::integer")]
    pub warranty: Option<i64>,
    #[serde(default)]
    pub ingredients: Option<Ingredients>,
}

/// Outcome of an enrichment call.
#[derive(Debug, Clone, PartialEq)]
pub enum EnrichmentResult {
    /// The service answered.
    Live(EnrichedProduct),
    /// The service failed and the canned record was substituted.
    Fallback {
        data: EnrichedProduct,
        /// Operator-facing description of the failure.
        reason: String,
    },
}

impl EnrichmentResult {
    #[must_use]
    pub fn data(&self) -> &EnrichedProduct {
        match self {
            Self::Live(data) | Self::Fallback { data, .. } => data,
        }
    }

    #[must_use]
    pub fn is_fallback(&self) -> bool {
        matches!(self, Self::Fallback { .. })
    }
}

/// Numeric fields that tolerate numeric strings. Anything unparseable is
/// treated as absent rather than failing the whole response.
mod lenient {
    use serde::{Deserialize, Deserializer};
    use serde_json::Value;

    pub fn decimal<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Option::<Value>::deserialize(deserializer)?;
        Ok(value.and_then(|v| match v {
            Value::Number(n) => n.as_f64(),
            Value::String(s) => s.trim().parse::<f64>().ok(),
            _ => None,
        })
        .filter(|v| v.is_finite()))
    }

    pub fn integer<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Option::<Value>::deserialize(deserializer)?;
        Ok(value.and_then(|v| match v {
            Value::Number(n) => n.as_i64().or_else(|| n.as_f64().and_then(whole)),
            Value::String(s) => {
                let trimmed = s.trim();
                trimmed
                    .parse::<i64>()
                    .ok()
                    .or_else(|| trimmed.parse::<f64>().ok().and_then(whole))
            }
            _ => None,
        }))
    }

    #[allow(clippy::cast_possible_truncation)]
    fn whole(value: f64) -> Option<i64> {
        (value.is_finite() && value.fract() == 0.0 && value.abs() < 9.0e15).then(|| value as i64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn request_uses_placeholders_for_absent_values() {
        let request = EnrichmentRequest::for_product(&Product::new(42, "Kit"));
        let payload = &request.product;

        assert_eq!(payload.id, "42");
        assert_eq!(payload.name, "Kit");
        assert_eq!(payload.brand, NOT_AVAILABLE);
        assert_eq!(payload.barcode, NOT_AVAILABLE);
        assert_eq!(payload.weight, NOT_AVAILABLE);
        assert_eq!(payload.dimensions, NOT_AVAILABLE);
        assert_eq!(payload.product_image, NOT_AVAILABLE);
    }

    #[test]
    fn request_formats_weight_and_dimensions() {
        let mut product = Product::new(1, "Kit");
        product.item_weight = Some(155.0);
        product.weight_unit = Some("g".to_string());
        product.width = Some(145.0);
        product.barcode = Some(737_628_064_502);

        let payload = EnrichmentRequest::for_product(&product).product;
        assert_eq!(payload.weight, "155 g");
        assert_eq!(payload.dimensions, "145 × 0 mm");
        assert_eq!(payload.barcode, "737628064502");
    }

    #[test]
    fn request_serializes_under_product_key() {
        let value = serde_json::to_value(EnrichmentRequest::for_product(&Product::new(1, "Kit"))).unwrap();
        assert_eq!(value["product"]["name"], "Kit");
        assert_eq!(value["product"]["id"], "1");
    }

    #[test]
    fn response_accepts_numeric_strings() {
        let enriched: EnrichedProduct = serde_json::from_value(json!({
            "id": 1,
            "product_name": "Kit",
            "barcode": "737628064502",
            "item_weight": "155.5",
            "width": 145,
            "items_per_package": "2",
            "warranty": null,
            "height": "tall"
        }))
        .unwrap();

        assert_eq!(enriched.barcode, Some(737_628_064_502));
        assert_eq!(enriched.item_weight, Some(155.5));
        assert_eq!(enriched.width, Some(145.0));
        assert_eq!(enriched.items_per_package, Some(2));
        assert!(enriched.warranty.is_none());
        assert!(enriched.height.is_none());
    }

    #[test]
    fn response_may_be_empty() {
        let enriched: EnrichedProduct = serde_json::from_value(json!({})).unwrap();
        assert_eq!(enriched, EnrichedProduct::default());
    }
}
