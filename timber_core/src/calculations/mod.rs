//! # Calculations
//!
//! The calculation pipeline, leaf first:
//!
//! - [`geometry`] - `BuildingInputs` → `CalculatedValues`
//! - [`quantities`] - price list + inputs + geometry → `LineItem`s
//! - [`quote`] - line items → `QuoteTotals`
//! - [`merge`] - carry user edits over to freshly calculated items
//!
//! Every step is a pure function. Nothing is cached; the whole pipeline is
//! cheap enough to rerun on every input change.
//!
//! ## Example
//!
//! ```rust
//! use timber_core::building::BuildingInputs;
//! use timber_core::calculations::estimate;
//! use timber_core::price_list::default_price_list;
//!
//! let result = estimate(&BuildingInputs::default(), default_price_list());
//! assert_eq!(result.geometry.courses_low, 14);
//! assert!(result.totals.quote_inc_vat > 0.0);
//! ```

pub mod geometry;
pub mod merge;
pub mod quantities;
pub mod quote;

use serde::{Deserialize, Serialize};

use crate::building::BuildingInputs;
use crate::price_list::PriceListEntry;

// Re-export commonly used types
pub use geometry::CalculatedValues;
pub use merge::{merge_overrides, MergePolicy};
pub use quantities::{calculate_line_items, LineItem};
pub use quote::{calculate_totals, group_by_category, labor_by_category, CategoryLabor, QuoteTotals};

/// Full output of one calculation run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Estimate {
    pub geometry: CalculatedValues,
    pub items: Vec<LineItem>,
    pub totals: QuoteTotals,
}

/// Run geometry, quantities and totals in sequence.
pub fn estimate(inputs: &BuildingInputs, price_list: &[PriceListEntry]) -> Estimate {
    let geometry = geometry::calculate(inputs);
    let items = calculate_line_items(price_list, inputs, &geometry);
    let totals = calculate_totals(&items, inputs);
    Estimate { geometry, items, totals }
}

/// Like [`estimate`], but carries user edits from `previous` into the new items
/// before totalling.
pub fn estimate_with_overrides(
    inputs: &BuildingInputs,
    price_list: &[PriceListEntry],
    previous: &[LineItem],
    policy: MergePolicy,
) -> Estimate {
    let geometry = geometry::calculate(inputs);
    let fresh = calculate_line_items(price_list, inputs, &geometry);
    let items = merge_overrides(previous, fresh, policy);
    let totals = calculate_totals(&items, inputs);
    Estimate { geometry, items, totals }
}
