//! # Override Merge
//!
//! Line items are rebuilt from scratch on every calculation, and their index
//! shifts whenever the price list changes. User edits (a negotiated price, a
//! row switched off) are carried over by article name instead.

use serde::{Deserialize, Serialize};

use crate::calculations::quantities::LineItem;

/// How to reconcile previously edited items with a fresh calculation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MergePolicy {
    /// Fresh quantity, previous price, labor and include flag
    #[default]
    KeepUserEdits,
    /// Discard previous edits
    ReplaceAll,
}

/// Merge `previous` edits into `fresh` items.
///
/// Each fresh item takes its overrides from the first previous item with the
/// same article name. Unmatched items pass through.
/// Items whose fresh quantity is zero stay excluded. Output order follows
/// `fresh`.
pub fn merge_overrides(previous: &[LineItem], fresh: Vec<LineItem>, policy: MergePolicy) -> Vec<LineItem> {
    if policy == MergePolicy::ReplaceAll || previous.is_empty() {
        return fresh;
    }

    let mut carried = 0usize;
    let merged: Vec<LineItem> = fresh
        .into_iter()
        .map(|mut item| {
            if let Some(old) = previous.iter().find(|p| p.article == item.article) {
                item.purchase_price = old.purchase_price;
                item.labor_hours_per_unit = old.labor_hours_per_unit;
                // A zero quantity stays excluded whatever the user chose
                item.include = old.include && item.quantity > 0.0;
                carried += 1;
            }
            item
        })
        .collect();

    tracing::debug!(carried, "merged line item overrides");
    merged
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::price_list::{Category, Unit};

    fn item(index: usize, article: &str, quantity: f64, price: f64) -> LineItem {
        LineItem {
            index,
            category: Category::Roof,
            article: article.to_string(),
            unit: Unit::Length,
            quantity_per_m2: 0.0,
            quantity,
            purchase_price: price,
            waste_pct: 10.0,
            markup_pct: 30.0,
            labor_hours_per_unit: 0.2,
            include: true,
            note: String::new(),
        }
    }

    #[test]
    fn test_keep_user_edits() {
        let mut edited = item(0, "Nockplåt", 5.8, 99.0);
        edited.include = false;
        edited.labor_hours_per_unit = 0.5;
        let previous = vec![edited];

        let fresh = vec![item(0, "Takplåt", 20.0, 120.0), item(1, "Nockplåt", 6.8, 65.0)];
        let merged = merge_overrides(&previous, fresh, MergePolicy::KeepUserEdits);

        assert_eq!(merged[0].purchase_price, 120.0);
        assert_eq!(merged[1].quantity, 6.8);
        assert_eq!(merged[1].purchase_price, 99.0);
        assert_eq!(merged[1].labor_hours_per_unit, 0.5);
        assert!(!merged[1].include);
        assert_eq!(merged[1].index, 1);
    }

    #[test]
    fn test_first_previous_match_wins() {
        let previous = vec![item(0, "Takplåt", 1.0, 10.0), item(1, "Takplåt", 1.0, 20.0)];
        let merged = merge_overrides(&previous, vec![item(0, "Takplåt", 3.0, 120.0)], MergePolicy::KeepUserEdits);
        assert_eq!(merged[0].purchase_price, 10.0);
    }

    #[test]
    fn test_replace_all() {
        let previous = vec![item(0, "Takplåt", 1.0, 10.0)];
        let fresh = vec![item(0, "Takplåt", 3.0, 120.0)];
        let merged = merge_overrides(&previous, fresh.clone(), MergePolicy::ReplaceAll);
        assert_eq!(merged, fresh);
    }
}
