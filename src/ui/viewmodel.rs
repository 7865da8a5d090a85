//! View model types representing renderable UI state.
//!
//! View models are computed from [`CatalogState`] and consumed by the renderer.
//! They hold display-ready strings only; no business logic lives here.

use crate::app::CatalogState;
use crate::domain::Product;

/// Message shown in place of the table when nothing is visible.
pub const EMPTY_MESSAGE: &str = "No products found matching your criteria.";

/// Complete view model of the catalog screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogViewModel {
    pub header: HeaderInfo,
    pub rows: Vec<TableRow>,
    /// State of the select-all checkbox.
    pub all_selected: bool,
    pub selected_count: usize,
    pub empty_state: Option<EmptyState>,
    pub footer: FooterInfo,
}

/// One table row. Absent values are blank.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableRow {
    pub is_selected: bool,
    pub id: String,
    pub name: String,
    pub barcode: String,
    pub brand: String,
    pub weight: String,
    pub material: String,
    pub color: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderInfo {
    /// "`N` Product(s)" for the visible count.
    pub title: String,
    /// Active search query, if any.
    pub search: Option<String>,
    /// Human-readable list of active filters.
    pub active_filters: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FooterInfo {
    pub summary: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmptyState {
    pub message: String,
}

impl CatalogViewModel {
    /// Computes the view model for the current state.
    #[must_use]
    pub fn from_state(state: &CatalogState) -> Self {
        let visible = state.visible_count();

        let rows: Vec<TableRow> = state
            .visible_products()
            .map(|product| TableRow::new(product, state.is_selected(product.id)))
            .collect();

        let search = Some(state.search_query().to_string()).filter(|q| !q.is_empty());

        Self {
            header: HeaderInfo {
                title: format!("{visible} Product(s)"),
                search,
                active_filters: describe_filters(state),
            },
            empty_state: rows.is_empty().then(|| EmptyState {
                message: EMPTY_MESSAGE.to_string(),
            }),
            rows,
            all_selected: state.is_all_selected(),
            selected_count: state.selected_count(),
            footer: FooterInfo {
                summary: format!("Total {visible} product(s)"),
            },
        }
    }
}

impl TableRow {
    fn new(product: &Product, is_selected: bool) -> Self {
        let text = |value: &Option<String>| value.clone().unwrap_or_default();
        let weight = product.item_weight.map_or_else(String::new, |w| {
            format!("{w} {}", product.weight_unit.as_deref().unwrap_or(""))
                .trim_end()
                .to_string()
        });

        Self {
            is_selected,
            id: product.id.to_string(),
            name: product.product_name.clone(),
            barcode: product.barcode.map(|b| b.to_string()).unwrap_or_default(),
            brand: text(&product.brand),
            weight,
            material: text(&product.material),
            color: text(&product.color),
        }
    }
}

fn describe_filters(state: &CatalogState) -> Vec<String> {
    use crate::app::{EnrichmentFilter, Selector};

    let filters = state.filters();
    let mut active = Vec::new();

    for (label, selector) in [
        ("brand", &filters.brand),
        ("material", &filters.material),
        ("color", &filters.color),
    ] {
        if let Selector::Only(value) = selector {
            active.push(format!("{label}={value}"));
        }
    }
    if !filters.barcode.trim().is_empty() {
        active.push(format!("barcode~{}", filters.barcode.trim()));
    }
    if !filters.weight.min.trim().is_empty() {
        active.push(format!("weight>={}", filters.weight.min.trim()));
    }
    if !filters.weight.max.trim().is_empty() {
        active.push(format!("weight<={}", filters.weight.max.trim()));
    }
    match &filters.enrichment {
        EnrichmentFilter::All => {}
        EnrichmentFilter::Enriched => active.push("enriched".to_string()),
        EnrichmentFilter::NotEnriched => active.push("not enriched".to_string()),
        EnrichmentFilter::Other(value) => active.push(format!("enrichment={value}")),
    }
    active
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::{FilterCriteria, Selector};

    #[test]
    fn empty_state_when_nothing_visible() {
        let vm = CatalogViewModel::from_state(&CatalogState::new());
        assert_eq!(vm.header.title, "0 Product(s)");
        assert_eq!(vm.footer.summary, "Total 0 product(s)");
        assert_eq!(vm.empty_state.map(|e| e.message).as_deref(), Some(EMPTY_MESSAGE));
    }

    #[test]
    fn rows_follow_visible_order_and_selection() {
        let mut state = CatalogState::new();
        let mut glasses = Product::new(1, "Safety Glasses");
        glasses.item_weight = Some(50.0);
        glasses.weight_unit = Some("g".to_string());
        state.replace_products(vec![glasses, Product::new(2, "Goggles")]);
        state.toggle_selection(2).unwrap();

        let vm = CatalogViewModel::from_state(&state);
        assert_eq!(vm.rows.len(), 2);
        assert_eq!(vm.rows[0].weight, "50 g");
        assert!(!vm.rows[0].is_selected);
        assert!(vm.rows[1].is_selected);
        assert!(!vm.all_selected);
        assert!(vm.empty_state.is_none());
    }

    #[test]
    fn header_lists_active_filters() {
        let mut state = CatalogState::new();
        state.set_filters(FilterCriteria {
            brand: Selector::parse("Acme"),
            ..FilterCriteria::default()
        });
        let vm = CatalogViewModel::from_state(&state);
        assert_eq!(vm.header.active_filters, vec!["brand=Acme"]);
    }
}
