//! # Quantity Rule Registry
//!
//! Ordered table mapping (category, article matcher) pairs to quantity
//! formulas. Lookup walks the table and takes the first entry whose category
//! equals the price-list entry's category and whose matcher accepts the
//! article name. No match means "not applicable" and a quantity of zero.
//!
//! Order matters where matchers overlap: `Vindskiveplåt` must be tried before
//! the `Vindskiv` prefix, `Fotplåt` before the eave-board rule, and every
//! named rule before its category's catch-all.
//!
//! ## Usage
//!
//! ```rust
//! use timber_core::building::BuildingInputs;
//! use timber_core::calculations::geometry;
//! use timber_core::price_list::{Category, PriceListEntry, Unit};
//! use timber_core::rules::registry::find_rule;
//!
//! let inputs = BuildingInputs::default();
//! let geo = geometry::calculate(&inputs);
//! let entry = PriceListEntry::new(Category::Frame, "Dragstång", Unit::Count);
//!
//! let rule = find_rule(&entry.category, &entry.article).unwrap();
//! assert_eq!(rule.rule.quantity(&geo, &inputs, &entry), 6.0);
//! ```

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::building::{BuildingInputs, FoundationType};
use crate::calculations::geometry::{CalculatedValues, CONCRETE_BLOCK_COUNT, PIER_COUNT};
use crate::price_list::{Category, PriceListEntry};

/// Number of tie rods in every frame
pub const TIE_ROD_COUNT: u32 = 6;

/// Plate coverage (m) assumed for verge flashing when the entry gives none
pub const DEFAULT_FLASHING_COVERAGE_M: f64 = 1.9;

/// Boards per roof edge assumed for verge boards when the entry gives none
pub const DEFAULT_BOARDS_PER_EDGE: f64 = 2.0;

// ============================================================================
// Article Matchers
// ============================================================================

/// How a rule recognizes article names
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArticleMatcher {
    /// Exact, case-sensitive name
    Exact(&'static str),
    /// Name contains any of the fragments
    Contains(&'static [&'static str]),
    /// Every article of the category
    Any,
}

impl ArticleMatcher {
    pub fn matches(&self, article: &str) -> bool {
        match self {
            ArticleMatcher::Exact(name) => article == *name,
            ArticleMatcher::Contains(fragments) => fragments.iter().any(|f| article.contains(f)),
            ArticleMatcher::Any => true,
        }
    }
}

// ============================================================================
// Quantity Rules
// ============================================================================

/// Quantity formulas, one per distinct way an article consumes geometry.
///
/// "Coefficient" below is the entry's `quantity_per_m2`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum QuantityRule {
    /// Inner floor area × coefficient (0 means 1); count units round up
    FloorArea,
    /// Two inner gable-wall lengths: 2 × inner width
    SupportRail,
    /// Building width, only when a foundation carries it
    BearerBeam,
    /// Net wall area, coefficient ignored
    NetWallArea,
    /// Tail-free outer perimeter
    SillPerimeter,
    /// Fixed number of tie rods
    TieRods,
    /// Ridge beam count × effective roof length
    RidgeBeams,
    /// Eave sides × effective length; count units divide by coverage and round up
    EaveFlashing,
    /// 2 × effective roof length (fascia boards, gutters)
    EaveBoards,
    /// Verge edges × slope length ÷ coverage (default 1.9 m), rounded up
    VergeFlashing,
    /// Verge edges × boards per edge (default 2) × slope length
    VergeBoards,
    /// Effective roof length
    RidgeCap,
    /// Roof area × coefficient, zero without a coefficient
    RoofArea,
    /// Net wall area × coefficient, zero without a coefficient
    WallArea,
    /// Interior wall area × coefficient (0 means 1)
    InteriorWallArea,
    /// Interior ceiling area × coefficient (0 means 1)
    InteriorCeilingArea,
    /// Inner floor area × coefficient, zero without a coefficient
    InnerArea,
    /// Fixed element count when the foundation type matches, otherwise
    /// inner floor area × coefficient
    FoundationElements(FoundationType),
}

/// Coefficient where 0 (or negative) stands for "the whole area"
fn coefficient_or_one(entry: &PriceListEntry) -> f64 {
    if entry.quantity_per_m2 > 0.0 {
        entry.quantity_per_m2
    } else {
        1.0
    }
}

/// Area × coefficient, zero when the entry has no coefficient
fn scaled_or_zero(area: f64, entry: &PriceListEntry) -> f64 {
    if entry.quantity_per_m2 > 0.0 {
        area * entry.quantity_per_m2
    } else {
        0.0
    }
}

impl QuantityRule {
    /// Raw (unrounded) quantity of `entry` for this building.
    pub fn quantity(&self, geo: &CalculatedValues, inputs: &BuildingInputs, entry: &PriceListEntry) -> f64 {
        let roof = inputs.roof_type;
        match self {
            QuantityRule::FloorArea => {
                let qty = geo.inner_area_m2 * coefficient_or_one(entry);
                if entry.unit.is_count() {
                    qty.ceil()
                } else {
                    qty
                }
            }
            QuantityRule::SupportRail => 2.0 * geo.inner_width_m,
            QuantityRule::BearerBeam => {
                if inputs.foundation_type.is_present() {
                    inputs.width_m
                } else {
                    0.0
                }
            }
            QuantityRule::NetWallArea => geo.wall_area_net_m2,
            QuantityRule::SillPerimeter => geo.sill_perimeter_m,
            QuantityRule::TieRods => f64::from(TIE_ROD_COUNT),
            QuantityRule::RidgeBeams => f64::from(inputs.ridge_beam_count) * geo.roof_length_eff_m,
            QuantityRule::EaveFlashing => {
                let total = f64::from(roof.eave_sides()) * geo.roof_length_eff_m;
                if entry.unit.is_count() && entry.quantity_per_m2 > 0.0 {
                    (total / entry.quantity_per_m2).ceil()
                } else {
                    total
                }
            }
            QuantityRule::EaveBoards => 2.0 * geo.roof_length_eff_m,
            QuantityRule::VergeFlashing => {
                let coverage = if entry.quantity_per_m2 > 0.0 {
                    entry.quantity_per_m2
                } else {
                    DEFAULT_FLASHING_COVERAGE_M
                };
                (f64::from(roof.verge_edges()) * geo.roof_slope_m / coverage).ceil()
            }
            QuantityRule::VergeBoards => {
                let boards = if entry.quantity_per_m2 > 0.0 {
                    entry.quantity_per_m2
                } else {
                    DEFAULT_BOARDS_PER_EDGE
                };
                f64::from(roof.verge_edges()) * boards * geo.roof_slope_m
            }
            QuantityRule::RidgeCap => geo.roof_length_eff_m,
            QuantityRule::RoofArea => scaled_or_zero(geo.roof_area_m2, entry),
            QuantityRule::WallArea => scaled_or_zero(geo.wall_area_net_m2, entry),
            QuantityRule::InteriorWallArea => geo.interior_wall_area_m2 * coefficient_or_one(entry),
            QuantityRule::InteriorCeilingArea => {
                geo.interior_ceiling_area_m2 * coefficient_or_one(entry)
            }
            QuantityRule::InnerArea => scaled_or_zero(geo.inner_area_m2, entry),
            QuantityRule::FoundationElements(kind) => {
                if inputs.foundation_type == *kind {
                    let count = match kind {
                        FoundationType::Piers => PIER_COUNT,
                        FoundationType::ConcreteBlock => CONCRETE_BLOCK_COUNT,
                        FoundationType::None => 0,
                    };
                    f64::from(count)
                } else {
                    scaled_or_zero(geo.inner_area_m2, entry)
                }
            }
        }
    }
}

// ============================================================================
// Registry
// ============================================================================

/// One row of the rule table
#[derive(Debug, Clone)]
pub struct RuleEntry {
    pub category: Category,
    pub matcher: ArticleMatcher,
    pub rule: QuantityRule,
    /// Short explanation shown next to computed quantities
    pub description: &'static str,
}

impl RuleEntry {
    fn new(category: Category, matcher: ArticleMatcher, rule: QuantityRule, description: &'static str) -> Self {
        RuleEntry { category, matcher, rule, description }
    }

    pub fn applies_to(&self, category: &Category, article: &str) -> bool {
        self.category == *category && self.matcher.matches(article)
    }
}

/// Article name of the log-wall manufacturing row, priced from the economy settings
pub const LOG_MANUFACTURING_ARTICLE: &str = "Timmer (tillverkning)";

static RULES: Lazy<Vec<RuleEntry>> = Lazy::new(|| {
    use ArticleMatcher::{Any, Contains, Exact};
    use Category::{Floor, Foundation, Frame, Interior, Roof, Wall};

    vec![
        // Golv
        RuleEntry::new(Floor, Exact("Stödregel 45x45"), QuantityRule::SupportRail, "2 × invändig bredd"),
        RuleEntry::new(Floor, Exact("Bärlina 45x95"), QuantityRule::BearerBeam, "Stommens bredd (med grund)"),
        RuleEntry::new(Floor, Any, QuantityRule::FloorArea, "Golvyta × mängd/m²"),
        // Stomme
        RuleEntry::new(Frame, Exact(LOG_MANUFACTURING_ARTICLE), QuantityRule::NetWallArea, "Väggarea netto"),
        RuleEntry::new(Frame, Exact("Montering stomme"), QuantityRule::NetWallArea, "Väggarea netto"),
        RuleEntry::new(Frame, Exact("Timmerväggar"), QuantityRule::NetWallArea, "Väggarea netto"),
        RuleEntry::new(Frame, Exact("Syllvirke 45x95"), QuantityRule::SillPerimeter, "Syllomkrets"),
        RuleEntry::new(Frame, Exact("Dragstång"), QuantityRule::TieRods, "Fast antal"),
        // Tak
        RuleEntry::new(Roof, Exact("Takåsar"), QuantityRule::RidgeBeams, "Antal åsar × taklängd"),
        RuleEntry::new(Roof, Contains(&["Fotplåt"]), QuantityRule::EaveFlashing, "Långsidor × taklängd"),
        RuleEntry::new(Roof, Contains(&["Takfotsbräda", "Regnvatten"]), QuantityRule::EaveBoards, "2 × taklängd"),
        RuleEntry::new(Roof, Contains(&["Vindskiveplåt"]), QuantityRule::VergeFlashing, "Takfallskanter × takfall ÷ täckning"),
        RuleEntry::new(Roof, Contains(&["Vindskiv"]), QuantityRule::VergeBoards, "Takfallskanter × brädor × takfall"),
        RuleEntry::new(Roof, Contains(&["Nockplåt"]), QuantityRule::RidgeCap, "Taklängd"),
        RuleEntry::new(Roof, Any, QuantityRule::RoofArea, "Takarea × mängd/m²"),
        // Vägg
        RuleEntry::new(Wall, Any, QuantityRule::WallArea, "Väggarea netto × mängd/m²"),
        // Invändigt
        RuleEntry::new(Interior, Contains(&["innervägg", "Innervägg"]), QuantityRule::InteriorWallArea, "Invändig väggarea"),
        RuleEntry::new(Interior, Contains(&["innertak", "Innertak"]), QuantityRule::InteriorCeilingArea, "Innertaksarea"),
        RuleEntry::new(Interior, Any, QuantityRule::InnerArea, "Golvyta × mängd/m²"),
        // Grund
        RuleEntry::new(Foundation, Exact("Plintar"), QuantityRule::FoundationElements(FoundationType::Piers), "Fast antal plintar"),
        RuleEntry::new(
            Foundation,
            Exact("Betongsten 40x40x10"),
            QuantityRule::FoundationElements(FoundationType::ConcreteBlock),
            "Fast antal betongsten",
        ),
        RuleEntry::new(Foundation, Any, QuantityRule::InnerArea, "Golvyta × mängd/m²"),
    ]
});

/// The full rule table in lookup order
pub fn all_rules() -> &'static [RuleEntry] {
    &RULES
}

/// First rule that applies to the article, if any
pub fn find_rule(category: &Category, article: &str) -> Option<&'static RuleEntry> {
    RULES.iter().find(|r| r.applies_to(category, article))
}

/// Quantity for one price-list entry; zero when no rule applies.
pub fn quantity_for(entry: &PriceListEntry, geo: &CalculatedValues, inputs: &BuildingInputs) -> f64 {
    match find_rule(&entry.category, &entry.article) {
        Some(rule) => rule.rule.quantity(geo, inputs, entry),
        None => {
            tracing::debug!(
                category = %entry.category,
                article = %entry.article,
                "no quantity rule, treating as not applicable"
            );
            0.0
        }
    }
}
