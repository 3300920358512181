//! # Line Items
//!
//! Resolves every price-list entry into a [`LineItem`]: the rule-derived
//! quantity, the prices and percentages that apply, and the final include
//! flag. One line item per entry, in price-list order.
//!
//! ## Pricing
//!
//! ```text
//! quantity with waste = quantity × (1 + waste% / 100)
//! purchase total      = quantity with waste × purchase price
//! sale total          = purchase total × (1 + markup% / 100)
//! ```
//!
//! ## Example
//!
//! ```rust
//! use timber_core::building::BuildingInputs;
//! use timber_core::calculations::{geometry, quantities};
//! use timber_core::price_list::default_price_list;
//!
//! let inputs = BuildingInputs::default();
//! let geo = geometry::calculate(&inputs);
//! let items = quantities::calculate_line_items(default_price_list(), &inputs, &geo);
//!
//! let rods = items.iter().find(|i| i.article == "Dragstång").unwrap();
//! assert_eq!(rods.quantity, 6.0);
//! assert!(rods.include);
//! ```

use serde::{Deserialize, Serialize};

use crate::building::BuildingInputs;
use crate::calculations::geometry::CalculatedValues;
use crate::price_list::{Category, PriceListEntry, Unit};
use crate::rules::{quantity_for, LOG_MANUFACTURING_ARTICLE};

/// One resolved price-list row.
///
/// Rebuilt wholesale on every calculation; `index` is the position in the
/// price list, not a stable identity. Use the article name to carry user
/// edits across recalculations (see [`super::merge`]).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    pub index: usize,
    pub category: Category,
    pub article: String,
    pub unit: Unit,
    pub quantity_per_m2: f64,
    /// Rule-derived quantity, rounded to 2 decimals
    pub quantity: f64,
    /// Purchase price per unit (kr)
    pub purchase_price: f64,
    pub waste_pct: f64,
    pub markup_pct: f64,
    pub labor_hours_per_unit: f64,
    /// Requested in the price list AND quantity > 0
    pub include: bool,
    pub note: String,
}

impl LineItem {
    /// Position-based id, `"<category>-<index>"`
    pub fn id(&self) -> String {
        format!("{}-{}", self.category, self.index)
    }

    pub fn quantity_with_waste(&self) -> f64 {
        self.quantity * (1.0 + self.waste_pct / 100.0)
    }

    pub fn purchase_total(&self) -> f64 {
        self.quantity_with_waste() * self.purchase_price
    }

    pub fn sale_total(&self) -> f64 {
        self.purchase_total() * (1.0 + self.markup_pct / 100.0)
    }

    /// Sale price per unit, before waste
    pub fn unit_sale_price(&self) -> f64 {
        self.purchase_price * (1.0 + self.markup_pct / 100.0)
    }

    pub fn labor_hours(&self) -> f64 {
        self.quantity * self.labor_hours_per_unit
    }
}

/// Round to 2 decimals
fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Markup implied by the log purchase and sale prices, in whole percent.
///
/// Zero when no purchase price is configured.
pub fn log_markup_pct(inputs: &BuildingInputs) -> f64 {
    if inputs.log_price_in <= 0.0 {
        return 0.0;
    }
    ((inputs.log_price_out / inputs.log_price_in - 1.0) * 100.0).round()
}

/// Resolve a single entry.
pub fn line_item(
    index: usize,
    entry: &PriceListEntry,
    inputs: &BuildingInputs,
    geo: &CalculatedValues,
) -> LineItem {
    let quantity = round2(quantity_for(entry, geo, inputs).max(0.0));

    // Log walls are priced from the economy settings, not the row
    let (purchase_price, waste_pct, markup_pct) = if entry.article == LOG_MANUFACTURING_ARTICLE {
        (inputs.log_price_in, 0.0, log_markup_pct(inputs))
    } else {
        (entry.purchase_price, entry.waste_pct, entry.markup_pct)
    };

    LineItem {
        index,
        category: entry.category.clone(),
        article: entry.article.clone(),
        unit: entry.unit.clone(),
        quantity_per_m2: entry.quantity_per_m2,
        quantity,
        purchase_price,
        waste_pct,
        markup_pct,
        labor_hours_per_unit: entry.labor_hours_per_unit,
        include: entry.include && quantity > 0.0,
        note: entry.note.clone(),
    }
}

/// Resolve the whole price list, one line item per entry in order.
pub fn calculate_line_items(
    price_list: &[PriceListEntry],
    inputs: &BuildingInputs,
    geo: &CalculatedValues,
) -> Vec<LineItem> {
    let items: Vec<LineItem> = price_list
        .iter()
        .enumerate()
        .map(|(index, entry)| line_item(index, entry, inputs, geo))
        .collect();

    tracing::debug!(
        entries = items.len(),
        included = items.iter().filter(|i| i.include).count(),
        "resolved line items"
    );
    items
}
