//! # Building Inputs
//!
//! The raw parameters of a log-house project: footprint, wall and roof
//! geometry, log dimensions, batten spacings and the economic figures the
//! quote needs. All lengths are metres, angles degrees, prices kronor.
//!
//! The engines consume a complete `BuildingInputs` and never validate it;
//! [`BuildingInputs::validate`] is offered to input collaborators (the CLI)
//! that want to reject out-of-range values before calculating.
//!
//! ## Example
//!
//! ```rust
//! use timber_core::building::{BuildingInputs, RoofType};
//!
//! let inputs = BuildingInputs {
//!     roof_type: RoofType::LeanTo,
//!     length_m: 6.0,
//!     ..BuildingInputs::default()
//! };
//! assert!(inputs.validate().is_ok());
//! ```

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};
use crate::price_list::EconomySettings;

/// Roof shape
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum RoofType {
    /// Two symmetric planes meeting at a ridge (sadeltak)
    #[default]
    Gable,
    /// One plane rising from the low to the high wall (pulpettak)
    LeanTo,
}

impl RoofType {
    pub const ALL: [RoofType; 2] = [RoofType::Gable, RoofType::LeanTo];

    pub fn display_name(&self) -> &'static str {
        match self {
            RoofType::Gable => "Sadeltak",
            RoofType::LeanTo => "Pulpettak",
        }
    }

    /// Number of roof planes
    pub fn planes(&self) -> u32 {
        match self {
            RoofType::Gable => 2,
            RoofType::LeanTo => 1,
        }
    }

    /// Sloped roof edges carrying verge boards and flashing
    pub fn verge_edges(&self) -> u32 {
        match self {
            RoofType::Gable => 4,
            RoofType::LeanTo => 2,
        }
    }

    /// Long sides carrying eave flashing
    pub fn eave_sides(&self) -> u32 {
        self.planes()
    }
}

impl std::fmt::Display for RoofType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Foundation under the bottom course
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum FoundationType {
    /// Cast piers (plintar)
    #[default]
    Piers,
    /// Stacked concrete blocks, two 10 cm blocks per point (betongsten)
    ConcreteBlock,
    /// Building rests directly on the ground
    None,
}

impl FoundationType {
    pub const ALL: [FoundationType; 3] = [
        FoundationType::Piers,
        FoundationType::ConcreteBlock,
        FoundationType::None,
    ];

    pub fn display_name(&self) -> &'static str {
        match self {
            FoundationType::Piers => "Plintar",
            FoundationType::ConcreteBlock => "Betongsten",
            FoundationType::None => "Ingen grund",
        }
    }

    pub fn is_present(&self) -> bool {
        !matches!(self, FoundationType::None)
    }
}

impl std::fmt::Display for FoundationType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Interior ceiling shape
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum CeilingType {
    /// Follows the roof pitch on the inside
    #[default]
    Sloped,
    /// Horizontal, same area as the floor
    Flat,
}

impl CeilingType {
    pub const ALL: [CeilingType; 2] = [CeilingType::Sloped, CeilingType::Flat];

    pub fn display_name(&self) -> &'static str {
        match self {
            CeilingType::Sloped => "Snedtak",
            CeilingType::Flat => "Platt innertak",
        }
    }
}

impl std::fmt::Display for CeilingType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Complete parameter set for one calculation run.
///
/// ## JSON Example
///
/// ```json
/// {
///   "roof_type": "gable",
///   "include_partition_wall": false,
///   "foundation_type": "piers",
///   "length_m": 5.0,
///   "width_m": 3.0,
///   "wall_height_m": 2.12,
///   "roof_angle_deg": 22.0,
///   "overhang_m": 0.4,
///   "corner_overhang_m": 0.14,
///   "log_thickness_m": 0.07,
///   "course_height_m": 0.157,
///   "cc_floor_joist_m": 0.6,
///   "cc_counter_batten_m": 0.6,
///   "cc_support_batten_m": 0.35,
///   "ridge_beam_count": 3,
///   "log_price_in": 458.0,
///   "log_price_out": 850.0,
///   "hourly_rate": 550.0,
///   "vat_pct": 25.0,
///   "opening_deduction_m2": 0.0,
///   "ceiling_type": "sloped"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BuildingInputs {
    pub roof_type: RoofType,

    /// Add an interior partition wall running the building length
    pub include_partition_wall: bool,

    pub foundation_type: FoundationType,

    /// Outer plan length (m), the ridge direction
    pub length_m: f64,

    /// Outer plan width (m), the gable direction
    pub width_m: f64,

    /// Wall height at the eave (low side for lean-to)
    pub wall_height_m: f64,

    /// Roof pitch in degrees
    pub roof_angle_deg: f64,

    /// Eave overhang beyond the walls
    pub overhang_m: f64,

    /// Corner log protrusion ("knut")
    pub corner_overhang_m: f64,

    pub log_thickness_m: f64,

    /// Height of a single log course
    pub course_height_m: f64,

    /// Center-to-center spacing of floor joists
    pub cc_floor_joist_m: f64,

    /// Center-to-center spacing of counter battens (ströläkt)
    pub cc_counter_batten_m: f64,

    /// Center-to-center spacing of support battens (bärläkt)
    pub cc_support_batten_m: f64,

    /// Number of ridge/purlin beams (takåsar)
    pub ridge_beam_count: u32,

    /// Log purchase price (kr per unit of the log article)
    pub log_price_in: f64,

    /// Log sale price (kr per unit of the log article)
    pub log_price_out: f64,

    /// Labor rate (kr/h)
    pub hourly_rate: f64,

    /// VAT percentage
    pub vat_pct: f64,

    /// Wall area removed for windows and doors (m²)
    #[serde(default)]
    pub opening_deduction_m2: f64,

    #[serde(default)]
    pub ceiling_type: CeilingType,
}

impl Default for BuildingInputs {
    fn default() -> Self {
        BuildingInputs {
            roof_type: RoofType::Gable,
            include_partition_wall: false,
            foundation_type: FoundationType::Piers,
            length_m: 5.0,
            width_m: 3.0,
            wall_height_m: 2.12,
            roof_angle_deg: 22.0,
            overhang_m: 0.4,
            corner_overhang_m: 0.14,
            log_thickness_m: 0.07,
            course_height_m: 0.157,
            cc_floor_joist_m: 0.6,
            cc_counter_batten_m: 0.6,
            cc_support_batten_m: 0.35,
            ridge_beam_count: 3,
            log_price_in: 458.0,
            log_price_out: 850.0,
            hourly_rate: 550.0,
            vat_pct: 25.0,
            opening_deduction_m2: 0.0,
            ceiling_type: CeilingType::Sloped,
        }
    }
}

/// Inclusive range check shared by every numeric field
fn check_range(field: &str, value: f64, min: f64, max: f64, what: &str) -> CalcResult<()> {
    if !value.is_finite() || value < min || value > max {
        return Err(CalcError::invalid_input(
            field,
            value.to_string(),
            format!("{} must be between {} and {}", what, min, max),
        ));
    }
    Ok(())
}

impl BuildingInputs {
    /// Validate against the ranges of the input form.
    ///
    /// The engines accept anything; this is for collaborators that collect
    /// values from a person and want to reject typos before calculating.
    pub fn validate(&self) -> CalcResult<()> {
        check_range("length_m", self.length_m, 1.0, 50.0, "Length (m)")?;
        check_range("width_m", self.width_m, 1.0, 50.0, "Width (m)")?;
        check_range("wall_height_m", self.wall_height_m, 0.1, 10.0, "Wall height (m)")?;
        check_range("roof_angle_deg", self.roof_angle_deg, 5.0, 60.0, "Roof angle (deg)")?;
        check_range("overhang_m", self.overhang_m, 0.0, 2.0, "Overhang (m)")?;
        check_range("corner_overhang_m", self.corner_overhang_m, 0.0, 1.0, "Corner overhang (m)")?;
        check_range("log_thickness_m", self.log_thickness_m, 0.04, 0.3, "Log thickness (m)")?;
        check_range("course_height_m", self.course_height_m, 0.08, 0.3, "Course height (m)")?;
        check_range("cc_floor_joist_m", self.cc_floor_joist_m, 0.1, 1.0, "Floor joist spacing (m)")?;
        check_range("cc_counter_batten_m", self.cc_counter_batten_m, 0.1, 1.0, "Counter batten spacing (m)")?;
        check_range("cc_support_batten_m", self.cc_support_batten_m, 0.1, 1.0, "Support batten spacing (m)")?;
        check_range("ridge_beam_count", f64::from(self.ridge_beam_count), 1.0, 50.0, "Ridge beam count")?;
        check_range("opening_deduction_m2", self.opening_deduction_m2, 0.0, 100.0, "Opening deduction (m²)")?;
        check_range("log_price_in", self.log_price_in, 0.0, 5000.0, "Log purchase price")?;
        check_range("log_price_out", self.log_price_out, 0.0, 5000.0, "Log sale price")?;
        check_range("hourly_rate", self.hourly_rate, 0.0, 2000.0, "Hourly rate")?;
        check_range("vat_pct", self.vat_pct, 0.0, 50.0, "VAT (%)")?;
        Ok(())
    }

    /// Copy the economic parameters of a price-list source into these inputs.
    pub fn apply_economy(&mut self, economy: &EconomySettings) {
        self.log_price_in = economy.log_price_in;
        self.log_price_out = economy.log_price_out;
        self.hourly_rate = economy.hourly_rate;
        self.vat_pct = economy.vat_pct;
    }

    /// The economic parameters currently carried by these inputs
    pub fn economy(&self) -> EconomySettings {
        EconomySettings {
            log_price_in: self.log_price_in,
            log_price_out: self.log_price_out,
            hourly_rate: self.hourly_rate,
            vat_pct: self.vat_pct,
        }
    }

    /// Roof angle in radians
    pub fn roof_angle_rad(&self) -> f64 {
        self.roof_angle_deg.to_radians()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert!(BuildingInputs::default().validate().is_ok());
    }

    #[test]
    fn test_roof_angle_out_of_range() {
        let inputs = BuildingInputs {
            roof_angle_deg: 75.0,
            ..BuildingInputs::default()
        };
        let err = inputs.validate().unwrap_err();
        match err {
            CalcError::InvalidInput { field, .. } => assert_eq!(field, "roof_angle_deg"),
            other => panic!("unexpected error {:?}", other),
        }
    }

    #[test]
    fn test_nan_rejected() {
        let inputs = BuildingInputs {
            width_m: f64::NAN,
            ..BuildingInputs::default()
        };
        assert!(inputs.validate().is_err());
    }

    #[test]
    fn test_apply_economy() {
        let mut inputs = BuildingInputs::default();
        inputs.apply_economy(&EconomySettings {
            log_price_in: 500.0,
            log_price_out: 900.0,
            hourly_rate: 600.0,
            vat_pct: 12.0,
        });
        assert_eq!(inputs.log_price_in, 500.0);
        assert_eq!(inputs.economy().vat_pct, 12.0);
    }

    #[test]
    fn test_edge_counts() {
        assert_eq!(RoofType::Gable.verge_edges(), 4);
        assert_eq!(RoofType::LeanTo.verge_edges(), 2);
        assert_eq!(RoofType::Gable.eave_sides(), 2);
        assert_eq!(RoofType::LeanTo.eave_sides(), 1);
    }

    #[test]
    fn test_serialization() {
        let inputs = BuildingInputs {
            roof_type: RoofType::LeanTo,
            foundation_type: FoundationType::ConcreteBlock,
            ..BuildingInputs::default()
        };
        let json = serde_json::to_string_pretty(&inputs).unwrap();
        assert!(json.contains("\"lean_to\""));
        assert!(json.contains("\"concrete_block\""));
        let roundtrip: BuildingInputs = serde_json::from_str(&json).unwrap();
        assert_eq!(inputs, roundtrip);
    }

    #[test]
    fn test_optional_fields_default() {
        let mut value = serde_json::to_value(BuildingInputs::default()).unwrap();
        let obj = value.as_object_mut().unwrap();
        obj.remove("opening_deduction_m2");
        obj.remove("ceiling_type");
        let parsed: BuildingInputs = serde_json::from_value(value).unwrap();
        assert_eq!(parsed.opening_deduction_m2, 0.0);
        assert_eq!(parsed.ceiling_type, CeilingType::Sloped);
    }
}
