//! Search and structured filter matching.
//!
//! Pure predicates over [`Product`]. The engine in [`super::state`] composes them
//! as `visible = products.filter(matches_search).filter(matches_filters)`, keeping
//! the fetch order.
//!
//! # Matching Rules
//!
//! - **Search**: case-insensitive substring of name, id, brand, or barcode; any
//!   field may match; an empty query matches everything.
//! - **Brand / material / color**: case-insensitive equality unless `All`.
//! - **Barcode**: substring of the stringified barcode unless blank.
//! - **Weight**: inclusive numeric bounds; a product without a weight fails any
//!   bound that is set.
//! - **Enrichment**: `enriched` / `not_enriched` / `all`.
//!
//! All set criteria must hold (logical AND).

use crate::domain::Product;
use std::fmt;

/// A vocabulary-backed filter value: either no constraint or one exact value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Selector {
    #[default]
    All,
    Only(String),
}

impl Selector {
    /// Parses operator input; `"all"` (any case) and blank mean no constraint.
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("all") {
            Self::All
        } else {
            Self::Only(trimmed.to_string())
        }
    }

    fn matches(&self, value: Option<&str>) -> bool {
        match self {
            Self::All => true,
            Self::Only(wanted) => {
                value.is_some_and(|v| v.to_lowercase() == wanted.to_lowercase())
            }
        }
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => f.write_str("all"),
            Self::Only(value) => f.write_str(value),
        }
    }
}

/// Weight bounds as typed by the operator. Blank means unbounded.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WeightRange {
    pub min: String,
    pub max: String,
}

impl WeightRange {
    /// A bound that does not parse behaves like a comparison against NaN and
    /// rejects every product.
    fn matches(&self, weight: Option<f64>) -> bool {
        let min = self.min.trim();
        let max = self.max.trim();
        if min.is_empty() && max.is_empty() {
            return true;
        }
        let Some(weight) = weight else {
            return false;
        };
        let within_min = min.is_empty() || parse_bound(min).is_some_and(|bound| weight >= bound);
        let within_max = max.is_empty() || parse_bound(max).is_some_and(|bound| weight <= bound);
        within_min && within_max
    }
}

fn parse_bound(raw: &str) -> Option<f64> {
    raw.parse::<f64>().ok().filter(|v| !v.is_nan())
}

/// Constraint on whether a product has been enriched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum EnrichmentFilter {
    #[default]
    All,
    Enriched,
    NotEnriched,
    /// Any other value; matches nothing.
    Other(String),
}

impl EnrichmentFilter {
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_lowercase().as_str() {
            "" | "all" => Self::All,
            "enriched" => Self::Enriched,
            "not_enriched" | "not-enriched" => Self::NotEnriched,
            _ => Self::Other(raw.trim().to_string()),
        }
    }

    fn matches(&self, product: &Product) -> bool {
        match self {
            Self::All => true,
            Self::Enriched => product.is_enriched(),
            Self::NotEnriched => !product.is_enriched(),
            Self::Other(_) => false,
        }
    }
}

/// Structured filter criteria. The default value constrains nothing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterCriteria {
    pub brand: Selector,
    pub barcode: String,
    pub material: Selector,
    pub color: Selector,
    pub weight: WeightRange,
    pub enrichment: EnrichmentFilter,
}

impl FilterCriteria {
    /// Returns `true` when no criterion is set.
    #[must_use]
    pub fn is_unconstrained(&self) -> bool {
        *self == Self::default()
    }
}

/// Case-insensitive substring search over name, id, brand and barcode.
#[must_use]
pub fn matches_search(product: &Product, query: &str) -> bool {
    if query.is_empty() {
        return true;
    }
    let needle = query.to_lowercase();

    product.product_name.to_lowercase().contains(&needle)
        || product.id.to_string().contains(&needle)
        || product
            .brand
            .as_deref()
            .is_some_and(|brand| brand.to_lowercase().contains(&needle))
        || product
            .barcode
            .is_some_and(|barcode| barcode.to_string().contains(&needle))
}

/// Returns `true` if `product` satisfies every set criterion.
#[must_use]
pub fn matches_filters(product: &Product, criteria: &FilterCriteria) -> bool {
    let barcode = criteria.barcode.trim();

    criteria.brand.matches(product.brand.as_deref())
        && criteria.material.matches(product.material.as_deref())
        && criteria.color.matches(product.color.as_deref())
        && (barcode.is_empty()
            || product
                .barcode
                .is_some_and(|b| b.to_string().contains(barcode)))
        && criteria.weight.matches(product.item_weight)
        && criteria.enrichment.matches(product)
}

/// Indices into `products` of the visible subset, in input order.
#[must_use]
pub fn apply_filters(products: &[Product], query: &str, criteria: &FilterCriteria) -> Vec<usize> {
    products
        .iter()
        .enumerate()
        .filter(|(_, product)| matches_search(product, query))
        .filter(|(_, product)| matches_filters(product, criteria))
        .map(|(index, _)| index)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(id: i64, name: &str, brand: &str, weight: f64) -> Product {
        let mut p = Product::new(id, name);
        p.brand = Some(brand.to_string());
        p.item_weight = Some(weight);
        p
    }

    fn catalog() -> Vec<Product> {
        vec![
            product(1, "Safety Glasses", "Acme", 50.0),
            product(2, "Goggles", "Zeta", 200.0),
        ]
    }

    #[test]
    fn search_matches_name_case_insensitively() {
        let visible = apply_filters(&catalog(), "GLASS", &FilterCriteria::default());
        assert_eq!(visible, vec![0]);
    }

    #[test]
    fn search_matches_id_brand_and_barcode() {
        let mut products = catalog();
        products[1].barcode = Some(737_628_064_502);

        assert_eq!(apply_filters(&products, "1", &FilterCriteria::default()), vec![0]);
        assert_eq!(apply_filters(&products, "zet", &FilterCriteria::default()), vec![1]);
        assert_eq!(apply_filters(&products, "6280", &FilterCriteria::default()), vec![1]);
    }

    #[test]
    fn empty_query_and_criteria_keep_everything_in_order() {
        assert_eq!(apply_filters(&catalog(), "", &FilterCriteria::default()), vec![0, 1]);
    }

    #[test]
    fn min_weight_is_inclusive() {
        let criteria = FilterCriteria {
            weight: WeightRange { min: "100".to_string(), max: String::new() },
            ..FilterCriteria::default()
        };
        assert_eq!(apply_filters(&catalog(), "", &criteria), vec![1]);

        let criteria = FilterCriteria {
            weight: WeightRange { min: "50".to_string(), max: "50".to_string() },
            ..FilterCriteria::default()
        };
        assert_eq!(apply_filters(&catalog(), "", &criteria), vec![0]);
    }

    #[test]
    fn product_without_weight_fails_set_bound() {
        let mut products = catalog();
        products[0].item_weight = None;
        let criteria = FilterCriteria {
            weight: WeightRange { min: String::new(), max: "1000".to_string() },
            ..FilterCriteria::default()
        };
        assert_eq!(apply_filters(&products, "", &criteria), vec![1]);
    }

    #[test]
    fn unparseable_bound_matches_nothing() {
        let criteria = FilterCriteria {
            weight: WeightRange { min: "heavy".to_string(), max: String::new() },
            ..FilterCriteria::default()
        };
        assert!(apply_filters(&catalog(), "", &criteria).is_empty());
    }

    #[test]
    fn brand_is_case_insensitive_equality() {
        let criteria = FilterCriteria {
            brand: Selector::parse("acme"),
            ..FilterCriteria::default()
        };
        assert_eq!(apply_filters(&catalog(), "", &criteria), vec![0]);

        let criteria = FilterCriteria {
            brand: Selector::parse("Ac"),
            ..FilterCriteria::default()
        };
        assert!(apply_filters(&catalog(), "", &criteria).is_empty());
    }

    #[test]
    fn barcode_filter_is_substring() {
        let mut products = catalog();
        products[0].barcode = Some(123_456);
        let criteria = FilterCriteria {
            barcode: "345".to_string(),
            ..FilterCriteria::default()
        };
        assert_eq!(apply_filters(&products, "", &criteria), vec![0]);
    }

    #[test]
    fn criteria_combine_with_and() {
        let mut products = catalog();
        products[0].color = Some("Red".to_string());
        products[1].color = Some("Red".to_string());
        let criteria = FilterCriteria {
            color: Selector::parse("red"),
            brand: Selector::parse("Zeta"),
            ..FilterCriteria::default()
        };
        assert_eq!(apply_filters(&products, "", &criteria), vec![1]);
    }

    #[test]
    fn enrichment_filter() {
        let mut products = catalog();
        products[1].product_description = Some("Anti-fog".to_string());

        let enriched = FilterCriteria {
            enrichment: EnrichmentFilter::parse("enriched"),
            ..FilterCriteria::default()
        };
        let not_enriched = FilterCriteria {
            enrichment: EnrichmentFilter::parse("not_enriched"),
            ..FilterCriteria::default()
        };
        let unknown = FilterCriteria {
            enrichment: EnrichmentFilter::parse("partial"),
            ..FilterCriteria::default()
        };

        assert_eq!(apply_filters(&products, "", &enriched), vec![1]);
        assert_eq!(apply_filters(&products, "", &not_enriched), vec![0]);
        assert!(apply_filters(&products, "", &unknown).is_empty());
    }

    #[test]
    fn selector_parse() {
        assert_eq!(Selector::parse("ALL"), Selector::All);
        assert_eq!(Selector::parse(" "), Selector::All);
        assert_eq!(Selector::parse(" Acme "), Selector::Only("Acme".to_string()));
    }
}
