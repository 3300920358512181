//! # Project Data Structures
//!
//! The `Project` struct is the root container of one customer quote: the
//! building parameters, the price list the quote was made from and the line
//! items as last saved (including any user edits).
//! Projects serialize to `.tmb` files as human-readable JSON.
//!
//! ## Structure
//!
//! ```text
//! Project
//! ├── meta: ProjectMetadata (version, id, name, customer, timestamps)
//! ├── inputs: BuildingInputs
//! ├── price_list: Vec<PriceListEntry>
//! ├── economy: EconomySettings
//! └── items: Vec<LineItem> (saved line items with user edits)
//! ```
//!
//! ## Example
//!
//! ```rust
//! use timber_core::project::Project;
//!
//! let mut project = Project::new("Friggebod Ängsvägen", "Anna Berg");
//! let estimate = project.recalculate();
//!
//! assert_eq!(project.items.len(), project.price_list.len());
//! assert!(estimate.totals.quote_inc_vat > 0.0);
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::building::BuildingInputs;
use crate::calculations::{estimate_with_overrides, Estimate, LineItem, MergePolicy};
use crate::price_list::{default_price_list, EconomySettings, PriceListEntry, PriceListSource};

/// Current schema version for .tmb files
pub const SCHEMA_VERSION: &str = "0.1.0";

/// Root project container.
///
/// This is the top-level struct that gets serialized to `.tmb` files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Project {
    pub meta: ProjectMetadata,

    pub inputs: BuildingInputs,

    /// Price list the line items are calculated from
    pub price_list: Vec<PriceListEntry>,

    /// Economic settings delivered with the price list
    pub economy: EconomySettings,

    /// Line items as last calculated, carrying user edits
    #[serde(default)]
    pub items: Vec<LineItem>,
}

impl Project {
    /// Create a new project with default inputs and the built-in price list.
    ///
    /// # Example
    ///
    /// ```rust
    /// use timber_core::project::Project;
    ///
    /// let project = Project::new("Gäststuga", "Erik Lund");
    /// assert_eq!(project.meta.customer, "Erik Lund");
    /// assert!(project.items.is_empty());
    /// ```
    pub fn new(name: impl Into<String>, customer: impl Into<String>) -> Self {
        let now = Utc::now();
        let economy = EconomySettings::default();
        let mut inputs = BuildingInputs::default();
        inputs.apply_economy(&economy);
        Project {
            meta: ProjectMetadata {
                version: SCHEMA_VERSION.to_string(),
                project_id: Uuid::new_v4(),
                name: name.into(),
                customer: customer.into(),
                created: now,
                modified: now,
            },
            inputs,
            price_list: default_price_list().to_vec(),
            economy,
            items: Vec::new(),
        }
    }

    /// Replace the building inputs.
    ///
    /// The economy fields of `inputs` win over the stored economy settings.
    pub fn set_inputs(&mut self, inputs: BuildingInputs) {
        self.economy = inputs.economy();
        self.inputs = inputs;
        self.touch();
    }

    /// Replace the price list, taking its economy sheet when it has one.
    pub fn set_price_list(&mut self, source: PriceListSource) {
        self.price_list = source.entries;
        if let Some(economy) = source.economy {
            self.set_economy(economy);
        }
        self.touch();
    }

    pub fn set_economy(&mut self, economy: EconomySettings) {
        self.economy = economy;
        self.inputs.apply_economy(&economy);
        self.touch();
    }

    /// Recalculate everything and keep the resulting line items.
    ///
    /// Saved items supply user-edited prices, labor and include flags by
    /// article name; quantities always come from the fresh calculation.
    pub fn recalculate(&mut self) -> Estimate {
        self.recalculate_with(MergePolicy::KeepUserEdits)
    }

    pub fn recalculate_with(&mut self, policy: MergePolicy) -> Estimate {
        let estimate = estimate_with_overrides(&self.inputs, &self.price_list, &self.items, policy);
        self.items = estimate.items.clone();
        self.touch();
        tracing::info!(
            project = %self.meta.name,
            items = self.items.len(),
            quote_inc_vat = estimate.totals.quote_inc_vat,
            "project recalculated"
        );
        estimate
    }

    /// Update the modified timestamp.
    pub fn touch(&mut self) {
        self.meta.modified = Utc::now();
    }
}

impl Default for Project {
    fn default() -> Self {
        Project::new("", "")
    }
}

/// Project metadata stored in the file header.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectMetadata {
    /// Schema version (for migration compatibility)
    pub version: String,

    pub project_id: Uuid,

    /// Project name shown on the quote
    pub name: String,

    pub customer: String,

    pub created: DateTime<Utc>,

    pub modified: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::price_list::{Category, Unit};

    #[test]
    fn test_project_creation() {
        let project = Project::new("Bastu", "Karin Ek");
        assert_eq!(project.meta.name, "Bastu");
        assert_eq!(project.meta.customer, "Karin Ek");
        assert_eq!(project.meta.version, SCHEMA_VERSION);
        assert_eq!(project.price_list.len(), default_price_list().len());
    }

    #[test]
    fn test_project_serialization() {
        let mut project = Project::new("Bastu", "Karin Ek");
        project.recalculate();
        let json = serde_json::to_string_pretty(&project).unwrap();
        assert!(json.contains("Karin Ek"));
        assert!(json.contains("\"Stomme\""));

        let roundtrip: Project = serde_json::from_str(&json).unwrap();
        assert_eq!(roundtrip.meta.project_id, project.meta.project_id);
        assert_eq!(roundtrip.items, project.items);
    }

    #[test]
    fn test_recalculate_keeps_user_edits() {
        let mut project = Project::new("Bastu", "Karin Ek");
        project.recalculate();

        let item = project.items.iter_mut().find(|i| i.article == "Takplåt").unwrap();
        item.purchase_price = 99.0;

        project.set_inputs(BuildingInputs {
            length_m: 8.0,
            ..project.inputs.clone()
        });
        let estimate = project.recalculate();
        let item = estimate.items.iter().find(|i| i.article == "Takplåt").unwrap();
        assert_eq!(item.purchase_price, 99.0);
        assert!((estimate.geometry.roof_length_eff_m - 8.8).abs() < 1e-9);
    }

    #[test]
    fn test_replace_all_discards_edits() {
        let mut project = Project::new("Bastu", "Karin Ek");
        project.recalculate();
        for item in project.items.iter_mut() {
            item.purchase_price = 1.0;
        }
        project.recalculate_with(MergePolicy::ReplaceAll);
        assert!(project.items.iter().any(|i| i.purchase_price > 1.0));
    }

    #[test]
    fn test_price_list_economy_flows_into_inputs() {
        let mut project = Project::new("Bastu", "Karin Ek");
        project.set_price_list(PriceListSource {
            entries: vec![PriceListEntry::new(Category::Frame, "Dragstång", Unit::Count).with_price(100.0)],
            economy: Some(EconomySettings {
                hourly_rate: 600.0,
                ..EconomySettings::default()
            }),
        });
        assert_eq!(project.inputs.hourly_rate, 600.0);
        let estimate = project.recalculate();
        assert_eq!(estimate.items.len(), 1);
        assert!((estimate.totals.labor_cost - 0.0).abs() < 1e-9);
    }
}
