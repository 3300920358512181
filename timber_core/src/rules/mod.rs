//! # Quantity Rules
//!
//! Per-article quantity formulas. Each price-list entry is matched against
//! the [`registry`] by category and article name; the matching rule turns
//! building geometry into a raw quantity.

pub mod registry;

pub use registry::{
    all_rules, find_rule, quantity_for, ArticleMatcher, QuantityRule, RuleEntry,
    LOG_MANUFACTURING_ARTICLE,
};
