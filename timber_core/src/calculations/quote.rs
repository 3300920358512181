//! # Quote Totals
//!
//! Reduces line items into the figures of a quote. Only included items
//! contribute; excluded rows stay in the list but never reach a total.

use serde::{Deserialize, Serialize};

use crate::building::BuildingInputs;
use crate::calculations::quantities::LineItem;
use crate::price_list::Category;

/// Aggregated quote figures (kr, hours)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct QuoteTotals {
    pub material_purchase: f64,
    pub material_sale: f64,
    /// Sale minus purchase
    pub material_margin: f64,
    pub labor_hours: f64,
    pub labor_cost: f64,
    /// Material sale + labor cost
    pub quote_ex_vat: f64,
    pub vat: f64,
    pub quote_inc_vat: f64,
    /// Material margin + labor cost
    pub total_margin: f64,
}

/// Sum included line items into quote totals.
pub fn calculate_totals(items: &[LineItem], inputs: &BuildingInputs) -> QuoteTotals {
    let included = items.iter().filter(|i| i.include);

    let (material_purchase, material_sale, labor_hours) =
        included.fold((0.0, 0.0, 0.0), |(purchase, sale, hours), item| {
            (
                purchase + item.purchase_total(),
                sale + item.sale_total(),
                hours + item.labor_hours(),
            )
        });

    let material_margin = material_sale - material_purchase;
    let labor_cost = labor_hours * inputs.hourly_rate;
    let quote_ex_vat = material_sale + labor_cost;
    let vat = quote_ex_vat * inputs.vat_pct / 100.0;

    QuoteTotals {
        material_purchase,
        material_sale,
        material_margin,
        labor_hours,
        labor_cost,
        quote_ex_vat,
        vat,
        quote_inc_vat: quote_ex_vat + vat,
        total_margin: material_margin + labor_cost,
    }
}

/// Labor of one category, per article
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryLabor {
    pub category: Category,
    /// (article, hours) in line-item order
    pub articles: Vec<(String, f64)>,
    pub hours: f64,
}

/// Labor hours of included items, grouped by category in first-seen order.
///
/// Items with no labor are left out.
pub fn labor_by_category(items: &[LineItem]) -> Vec<CategoryLabor> {
    let mut groups: Vec<CategoryLabor> = Vec::new();
    for item in items.iter().filter(|i| i.include) {
        let hours = item.labor_hours();
        if hours <= 0.0 {
            continue;
        }
        match groups.iter_mut().find(|g| g.category == item.category) {
            Some(group) => {
                group.articles.push((item.article.clone(), hours));
                group.hours += hours;
            }
            None => groups.push(CategoryLabor {
                category: item.category.clone(),
                articles: vec![(item.article.clone(), hours)],
                hours,
            }),
        }
    }
    groups
}

/// Line items grouped for display: known categories in quote order, then
/// unknown ones in first-seen order. Empty groups are omitted.
pub fn group_by_category(items: &[LineItem]) -> Vec<(Category, Vec<&LineItem>)> {
    let mut order: Vec<Category> = Category::DISPLAY_ORDER.to_vec();
    for item in items {
        if !order.contains(&item.category) {
            order.push(item.category.clone());
        }
    }

    order
        .into_iter()
        .filter_map(|category| {
            let members: Vec<&LineItem> = items.iter().filter(|i| i.category == category).collect();
            if members.is_empty() {
                None
            } else {
                Some((category, members))
            }
        })
        .collect()
}
