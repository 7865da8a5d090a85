//! Text rendering of view models.
//!
//! Each function computes (or receives) a view model and writes it into a
//! `String`. The console shim prints the result; tests inspect it directly.
//!
//! # Example
//!
//! ```rust
//! use product_hub::app::CatalogState;
//! use product_hub::ui::render_catalog;
//!
//! let screen = render_catalog(&CatalogState::new());
//! assert!(screen.contains("No products found matching your criteria."));
//! ```

use std::fmt::Write;

use crate::app::{CatalogState, FilterOptions, Notification, PendingEnrichment};
use crate::enrichment::format_enrichment;
use crate::ui::details::DetailView;
use crate::ui::viewmodel::{CatalogViewModel, TableRow};

const COLUMNS: [&str; 7] = ["ID", "Product Name", "Barcode", "Brand", "Weight", "Material", "Color"];

/// Renders the catalog table for the current state.
#[must_use]
pub fn render_catalog(state: &CatalogState) -> String {
    render_viewmodel(&CatalogViewModel::from_state(state))
}

/// Renders a precomputed catalog view model.
#[must_use]
pub fn render_viewmodel(vm: &CatalogViewModel) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "{}", vm.header.title);
    if let Some(search) = &vm.header.search {
        let _ = writeln!(out, "Search: {search}");
    }
    if !vm.header.active_filters.is_empty() {
        let _ = writeln!(out, "Filters: {}", vm.header.active_filters.join(", "));
    }

    if let Some(empty) = &vm.empty_state {
        let _ = writeln!(out);
        let _ = writeln!(out, "{}", empty.message);
        return out;
    }

    let widths = column_widths(&vm.rows);
    let check = if vm.all_selected { "[x]" } else { "[ ]" };
    let _ = writeln!(out, "{check} {}", join_padded(&COLUMNS.map(String::from), &widths));
    for row in &vm.rows {
        let check = if row.is_selected { "[x]" } else { "[ ]" };
        let _ = writeln!(out, "{check} {}", join_padded(&cells(row), &widths));
    }

    if vm.selected_count > 0 {
        let _ = writeln!(out, "{} selected", vm.selected_count);
    }
    let _ = writeln!(out, "{}", vm.footer.summary);
    out
}

/// Renders the detail view of one product.
#[must_use]
pub fn render_details(view: &DetailView) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", view.title);
    if let Some(image) = &view.image {
        let _ = writeln!(out, "Image: {image}");
    }

    for (heading, rows) in [("Basic Information", &view.basic), ("Physical Attributes", &view.physical)] {
        let _ = writeln!(out);
        let _ = writeln!(out, "{heading}");
        let width = rows.iter().map(|(label, _)| label.len()).max().unwrap_or(0);
        for (label, value) in rows {
            let _ = writeln!(out, "  {label:<width$}  {value}");
        }
    }

    let _ = writeln!(out);
    let _ = writeln!(out, "Description");
    let _ = writeln!(out, "  {}", view.description);

    if let Some(ingredients) = &view.ingredients {
        let _ = writeln!(out);
        let _ = writeln!(out, "Ingredients");
        for line in ingredients {
            let _ = writeln!(out, "  {line}");
        }
    }
    out
}

/// Renders a pending enrichment for review.
#[must_use]
pub fn render_enrichment(pending: &PendingEnrichment) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Enrichment for product {}", pending.product_id);
    if pending.result.is_fallback() {
        let _ = writeln!(out, "(sample data)");
    }
    let _ = writeln!(out);
    out.push_str(&format_enrichment(pending.result.data()));
    let _ = writeln!(out);
    let _ = writeln!(out, "save-enrichment to apply, discard-enrichment to drop");
    out
}

/// Renders the filter vocabularies.
#[must_use]
pub fn render_options(options: &FilterOptions) -> String {
    let mut out = String::new();
    for (label, values) in [
        ("Brands", &options.brands),
        ("Materials", &options.materials),
        ("Colors", &options.colors),
    ] {
        let listed = if values.is_empty() { "-".to_string() } else { values.join(", ") };
        let _ = writeln!(out, "{label}: {listed}");
    }
    out
}

/// Renders notifications, one per line.
#[must_use]
pub fn render_notifications(notifications: &[Notification]) -> String {
    notifications.iter().fold(String::new(), |mut out, n| {
        let _ = writeln!(out, "{n}");
        out
    })
}

fn cells(row: &TableRow) -> [String; 7] {
    [
        row.id.clone(),
        row.name.clone(),
        row.barcode.clone(),
        row.brand.clone(),
        row.weight.clone(),
        row.material.clone(),
        row.color.clone(),
    ]
}

fn column_widths(rows: &[TableRow]) -> [usize; 7] {
    let mut widths = COLUMNS.map(|c| c.chars().count());
    for row in rows {
        for (width, cell) in widths.iter_mut().zip(cells(row)) {
            *width = (*width).max(cell.chars().count());
        }
    }
    widths
}

fn join_padded(cells: &[String; 7], widths: &[usize; 7]) -> String {
    cells
        .iter()
        .zip(widths)
        .map(|(cell, width)| format!("{cell:<width$}"))
        .collect::<Vec<_>>()
        .join("  ")
        .trim_end()
        .to_string()
}
