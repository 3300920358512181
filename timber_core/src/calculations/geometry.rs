//! # Building Geometry
//!
//! Turns [`BuildingInputs`] into the flat set of derived measurements every
//! material rule draws from: course counts, log lengths, wall/roof/floor
//! areas, heights and batten run lengths.
//!
//! ## Roof Trigonometry
//!
//! ```text
//!   Gable (sadeltak)                 Lean-to (pulpettak)
//!
//!          /\                                  _____/|
//!         /  \  gable height            _____/       | delta = B·tan(a)
//!        /    \ = (B/2)·tan(a)         |             |
//!       |------|                        |             |
//!       |      | h                      | h           | h + delta
//!       |______|                        |_____________|
//!          B                                   B
//! ```
//!
//! Gable slopes run `B/2 + overhang`, lean-to slopes run `B + 2·overhang`
//! (overhang at both the low and the high edge). Slope length is
//! `run / cos(a)`.
//!
//! ## Example
//!
//! ```rust
//! use timber_core::building::BuildingInputs;
//! use timber_core::calculations::geometry::calculate;
//!
//! let geo = calculate(&BuildingInputs::default());
//! assert_eq!(geo.courses_low, 14);
//! assert!((geo.total_height_m - 2.926).abs() < 0.01);
//! ```

use serde::{Deserialize, Serialize};

use crate::building::{BuildingInputs, CeilingType, FoundationType, RoofType};

/// Height added by either foundation type (piers, or two stacked 10 cm blocks)
pub const FOUNDATION_HEIGHT_M: f64 = 0.2;

/// Fixed pier count used for every footprint
pub const PIER_COUNT: u32 = 9;

/// Fixed concrete block count used for every footprint
pub const CONCRETE_BLOCK_COUNT: u32 = 15;

/// Total height above which a building permit may be required
pub const PERMIT_HEIGHT_LIMIT_M: f64 = 3.0;

/// Derived measurements of one building.
///
/// Every field is a pure function of [`BuildingInputs`]; the record is
/// rebuilt wholesale on each input change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalculatedValues {
    /// Log courses on the low (or only) eave side
    pub courses_low: u32,
    /// Log courses on the high side (equal to `courses_low` for gable roofs)
    pub courses_high: u32,
    /// Mean course count used for lean-to length estimates (not rounded)
    pub courses_avg: f64,

    /// Log length in the four outer walls (m)
    pub outer_log_length_m: f64,
    /// Log length in the gable triangles (m), zero for lean-to
    pub gable_log_length_m: f64,
    /// Log length in the partition wall (m)
    pub partition_log_length_m: f64,
    /// Sum of outer, gable and partition logs (m)
    pub total_log_length_m: f64,
    /// Total log length scaled by net/gross wall area (m)
    pub net_log_length_m: f64,

    /// Wall area before opening deductions (m²)
    pub wall_area_gross_m2: f64,
    /// Wall area after opening deductions, clamped at zero (m²)
    pub wall_area_net_m2: f64,
    /// Inside face of the outer walls (m²)
    pub interior_wall_area_m2: f64,
    /// Inside ceiling surface, sloped or flat (m²)
    pub interior_ceiling_area_m2: f64,

    pub roof_area_m2: f64,
    /// Footprint L × B (m²)
    pub outer_area_m2: f64,
    /// Floor area inside the logs (m²)
    pub inner_area_m2: f64,
    pub inner_length_m: f64,
    pub inner_width_m: f64,

    /// Gable triangle height, or the lean-to high-side rise (m)
    pub gable_height_m: f64,
    pub foundation_height_m: f64,
    /// Wall + gable + foundation (m)
    pub total_height_m: f64,

    /// Floor joist run length (m)
    pub floor_joist_length_m: f64,
    /// Counter batten run length (m)
    pub counter_batten_length_m: f64,
    /// Support batten run length (m)
    pub support_batten_length_m: f64,

    /// Ridge-line length including both overhangs (m)
    pub roof_length_eff_m: f64,
    /// Slope length of one roof plane, eave to ridge (m)
    pub roof_slope_m: f64,

    /// Log length of one course including corner tails (m)
    pub perimeter_per_course_m: f64,
    /// Outer perimeter without corner tails, for sill beams (m)
    pub sill_perimeter_m: f64,
    pub inner_perimeter_m: f64,

    /// Piers or concrete blocks under the building
    pub foundation_element_count: u32,
}

impl CalculatedValues {
    /// True when the total height passes the building-permit threshold
    pub fn exceeds_permit_height(&self) -> bool {
        self.total_height_m > PERMIT_HEIGHT_LIMIT_M
    }
}

/// Whole courses (or battens) needed to cover `span` at `spacing`.
///
/// A non-positive spacing yields zero instead of an infinite count.
fn ceil_count(span: f64, spacing: f64) -> u32 {
    if spacing <= 0.0 || !spacing.is_finite() {
        return 0;
    }
    (span / spacing).ceil().max(0.0) as u32
}

/// Converts a wall area into running metres of log for a given course height
fn area_to_log_length(area_m2: f64, course_height_m: f64) -> f64 {
    if course_height_m <= 0.0 {
        return 0.0;
    }
    (area_m2 / course_height_m).max(0.0)
}

/// Logs, wall area and heights of the walls for one roof shape
struct WallGeometry {
    courses_low: u32,
    courses_high: u32,
    courses_avg: f64,
    outer_log: f64,
    gable_log: f64,
    partition_log: f64,
    gable_height: f64,
    wall_area: f64,
}

fn gable_walls(inputs: &BuildingInputs, perimeter: f64, angle_rad: f64) -> WallGeometry {
    let l = inputs.length_m;
    let b = inputs.width_m;
    let h = inputs.wall_height_m;
    let course_h = inputs.course_height_m;

    let courses = ceil_count(h, course_h);
    let gable_height = (b / 2.0) * angle_rad.tan();

    // Two triangles of L·gh/2 each
    let gable_log = area_to_log_length(l * gable_height, course_h);

    let mut partition_log = 0.0;
    let mut partition_area = 0.0;
    if inputs.include_partition_wall {
        let half_gable = 0.5 * l * gable_height;
        partition_log = f64::from(courses) * l + area_to_log_length(half_gable, course_h);
        partition_area = l * h + half_gable;
    }

    let wall_area = perimeter * h + 2.0 * (0.5 * b * gable_height) + partition_area;

    WallGeometry {
        courses_low: courses,
        courses_high: courses,
        courses_avg: f64::from(courses),
        outer_log: perimeter * f64::from(courses),
        gable_log,
        partition_log,
        gable_height,
        wall_area,
    }
}

fn lean_to_walls(inputs: &BuildingInputs, perimeter: f64, angle_rad: f64) -> WallGeometry {
    let l = inputs.length_m;
    let h = inputs.wall_height_m;
    let course_h = inputs.course_height_m;

    let rise = inputs.width_m * angle_rad.tan();
    let high_eave = h + rise;

    let courses_low = ceil_count(h, course_h);
    let courses_high = ceil_count(high_eave, course_h);
    let courses_avg = (f64::from(courses_low) + f64::from(courses_high)) / 2.0;
    let avg_height = (h + high_eave) / 2.0;

    let (partition_log, partition_area) = if inputs.include_partition_wall {
        (l * courses_avg, l * avg_height)
    } else {
        (0.0, 0.0)
    };

    WallGeometry {
        courses_low,
        courses_high,
        courses_avg,
        outer_log: perimeter * courses_avg,
        gable_log: 0.0,
        partition_log,
        gable_height: rise,
        wall_area: perimeter * avg_height + partition_area,
    }
}

/// Derive every geometric measurement of the building.
///
/// Never fails: zero spacings give zero counts and negative areas are
/// clamped at zero.
pub fn calculate(inputs: &BuildingInputs) -> CalculatedValues {
    let l = inputs.length_m;
    let b = inputs.width_m;
    let angle_rad = inputs.roof_angle_rad();
    let knut = inputs.corner_overhang_m;

    let perimeter_per_course = 2.0 * ((l + 2.0 * knut) + (b + 2.0 * knut));
    let sill_perimeter = 2.0 * (l + b);

    let walls = match inputs.roof_type {
        RoofType::Gable => gable_walls(inputs, perimeter_per_course, angle_rad),
        RoofType::LeanTo => lean_to_walls(inputs, perimeter_per_course, angle_rad),
    };

    let total_log = walls.outer_log + walls.gable_log + walls.partition_log;
    let wall_area_gross = walls.wall_area.max(0.0);
    let wall_area_net = (wall_area_gross - inputs.opening_deduction_m2).max(0.0);
    let net_log = if wall_area_gross > 0.0 {
        total_log * (wall_area_net / wall_area_gross)
    } else {
        total_log
    };

    // Roof
    let roof_length_eff = l + 2.0 * inputs.overhang_m;
    let roof_run = match inputs.roof_type {
        RoofType::Gable => b / 2.0 + inputs.overhang_m,
        RoofType::LeanTo => b + 2.0 * inputs.overhang_m,
    };
    let roof_slope = roof_run / angle_rad.cos();
    let planes = f64::from(inputs.roof_type.planes());
    let roof_area = planes * roof_length_eff * roof_slope;

    // Interior
    let inner_length = (l - 2.0 * inputs.log_thickness_m).max(0.0);
    let inner_width = (b - 2.0 * inputs.log_thickness_m).max(0.0);
    let inner_area = inner_length * inner_width;
    let inner_perimeter = 2.0 * (inner_length + inner_width);
    let interior_wall_area = inner_perimeter * inputs.wall_height_m.max(0.0);

    // The sloped ceiling gets its own pitch run from the inner width
    let interior_ceiling_area = match (inputs.ceiling_type, inputs.roof_type) {
        (CeilingType::Flat, _) => inner_area,
        (CeilingType::Sloped, RoofType::Gable) => {
            2.0 * inner_length * ((inner_width / 2.0) / angle_rad.cos())
        }
        (CeilingType::Sloped, RoofType::LeanTo) => inner_length * (inner_width / angle_rad.cos()),
    };

    // Foundation
    let foundation_height = if inputs.foundation_type.is_present() {
        FOUNDATION_HEIGHT_M
    } else {
        0.0
    };
    let foundation_element_count = match inputs.foundation_type {
        FoundationType::Piers => PIER_COUNT,
        FoundationType::ConcreteBlock => CONCRETE_BLOCK_COUNT,
        FoundationType::None => 0,
    };

    let total_height = inputs.wall_height_m + walls.gable_height + foundation_height;

    // Joists and battens
    let floor_joist_length =
        f64::from(ceil_count(l, inputs.cc_floor_joist_m)) * inner_width;
    let counter_batten_length = planes
        * roof_length_eff
        * f64::from(ceil_count(roof_slope, inputs.cc_counter_batten_m));
    let support_batten_length = planes
        * roof_slope
        * f64::from(ceil_count(roof_length_eff, inputs.cc_support_batten_m));

    CalculatedValues {
        courses_low: walls.courses_low,
        courses_high: walls.courses_high,
        courses_avg: walls.courses_avg,
        outer_log_length_m: walls.outer_log,
        gable_log_length_m: walls.gable_log,
        partition_log_length_m: walls.partition_log,
        total_log_length_m: total_log,
        net_log_length_m: net_log,
        wall_area_gross_m2: wall_area_gross,
        wall_area_net_m2: wall_area_net,
        interior_wall_area_m2: interior_wall_area,
        interior_ceiling_area_m2: interior_ceiling_area,
        roof_area_m2: roof_area,
        outer_area_m2: l * b,
        inner_area_m2: inner_area,
        inner_length_m: inner_length,
        inner_width_m: inner_width,
        gable_height_m: walls.gable_height,
        foundation_height_m: foundation_height,
        total_height_m: total_height,
        floor_joist_length_m: floor_joist_length,
        counter_batten_length_m: counter_batten_length,
        support_batten_length_m: support_batten_length,
        roof_length_eff_m: roof_length_eff,
        roof_slope_m: roof_slope,
        perimeter_per_course_m: perimeter_per_course,
        sill_perimeter_m: sill_perimeter,
        inner_perimeter_m: inner_perimeter,
        foundation_element_count,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    /// 5 × 3 m gable cabin standing on the ground
    fn scenario_a() -> BuildingInputs {
        BuildingInputs {
            roof_type: RoofType::Gable,
            foundation_type: FoundationType::None,
            length_m: 5.0,
            width_m: 3.0,
            wall_height_m: 2.12,
            roof_angle_deg: 22.0,
            course_height_m: 0.157,
            overhang_m: 0.4,
            corner_overhang_m: 0.14,
            ..BuildingInputs::default()
        }
    }

    fn approx(a: f64, b: f64, tol: f64) -> bool {
        (a - b).abs() < tol
    }

    #[test]
    fn test_gable_course_counts() {
        let geo = calculate(&scenario_a());
        // ceil(2.12 / 0.157) = ceil(13.50) = 14
        assert_eq!(geo.courses_low, 14);
        assert_eq!(geo.courses_high, 14);
        assert_eq!(geo.courses_avg, 14.0);
    }

    #[test]
    fn test_gable_heights() {
        let geo = calculate(&scenario_a());
        // 1.5 · tan(22°) = 0.606
        assert!(approx(geo.gable_height_m, 0.606, 0.001));
        assert!(approx(geo.total_height_m, 2.726, 0.001));
        assert_eq!(geo.foundation_height_m, 0.0);
        assert!(!geo.exceeds_permit_height());
    }

    #[test]
    fn test_piers_add_foundation() {
        let a = calculate(&scenario_a());
        let b = calculate(&BuildingInputs {
            foundation_type: FoundationType::Piers,
            ..scenario_a()
        });
        assert_eq!(b.foundation_element_count, PIER_COUNT);
        assert!(approx(b.total_height_m - a.total_height_m, 0.2, 1e-12));
    }

    #[test]
    fn test_concrete_blocks() {
        let geo = calculate(&BuildingInputs {
            foundation_type: FoundationType::ConcreteBlock,
            ..scenario_a()
        });
        assert_eq!(geo.foundation_element_count, CONCRETE_BLOCK_COUNT);
        assert_eq!(geo.foundation_height_m, FOUNDATION_HEIGHT_M);
        assert_eq!(calculate(&scenario_a()).foundation_element_count, 0);
    }

    #[test]
    fn test_perimeters() {
        let geo = calculate(&scenario_a());
        // 2 · ((5 + 0.28) + (3 + 0.28)) = 17.12
        assert!(approx(geo.perimeter_per_course_m, 17.12, 1e-9));
        assert!(approx(geo.sill_perimeter_m, 16.0, 1e-9));
    }

    #[test]
    fn test_gable_logs_and_walls() {
        let geo = calculate(&scenario_a());
        let gh = 1.5 * 22f64.to_radians().tan();
        assert!(approx(geo.outer_log_length_m, 17.12 * 14.0, 1e-9));
        assert!(approx(geo.gable_log_length_m, 5.0 * gh / 0.157, 1e-9));
        assert_eq!(geo.partition_log_length_m, 0.0);
        let wall = 17.12 * 2.12 + 3.0 * gh;
        assert!(approx(geo.wall_area_gross_m2, wall, 1e-9));
        assert_eq!(geo.wall_area_net_m2, geo.wall_area_gross_m2);
        assert_eq!(geo.net_log_length_m, geo.total_log_length_m);
    }

    #[test]
    fn test_gable_partition_wall() {
        let geo = calculate(&BuildingInputs {
            include_partition_wall: true,
            ..scenario_a()
        });
        let gh = geo.gable_height_m;
        let expected = 14.0 * 5.0 + (0.5 * 5.0 * gh) / 0.157;
        assert!(approx(geo.partition_log_length_m, expected, 1e-9));
        let without = calculate(&scenario_a());
        let added = geo.wall_area_gross_m2 - without.wall_area_gross_m2;
        assert!(approx(added, 5.0 * 2.12 + 0.5 * 5.0 * gh, 1e-9));
    }

    #[test]
    fn test_lean_to_courses() {
        let inputs = BuildingInputs {
            roof_type: RoofType::LeanTo,
            ..scenario_a()
        };
        let geo = calculate(&inputs);
        let rise = 3.0 * 22f64.to_radians().tan();
        assert!(approx(geo.gable_height_m, rise, 1e-9));
        assert_eq!(geo.courses_low, 14);
        // ceil((2.12 + 1.212) / 0.157) = ceil(21.22) = 22
        assert_eq!(geo.courses_high, 22);
        assert_eq!(geo.courses_avg, 18.0);
        assert_eq!(geo.gable_log_length_m, 0.0);
        assert!(approx(geo.outer_log_length_m, 17.12 * 18.0, 1e-9));
        let avg_h = 2.12 + rise / 2.0;
        assert!(approx(geo.wall_area_gross_m2, 17.12 * avg_h, 1e-9));
    }

    #[test]
    fn test_lean_to_partition_wall() {
        let geo = calculate(&BuildingInputs {
            roof_type: RoofType::LeanTo,
            include_partition_wall: true,
            ..scenario_a()
        });
        assert!(approx(geo.partition_log_length_m, 5.0 * 18.0, 1e-9));
    }

    #[test]
    fn test_roof_geometry() {
        let cos = 22f64.to_radians().cos();
        let gable = calculate(&scenario_a());
        assert!(approx(gable.roof_length_eff_m, 5.8, 1e-9));
        assert!(approx(gable.roof_slope_m, 1.9 / cos, 1e-9));
        assert!(approx(gable.roof_area_m2, 2.0 * 5.8 * 1.9 / cos, 1e-9));

        let lean = calculate(&BuildingInputs {
            roof_type: RoofType::LeanTo,
            ..scenario_a()
        });
        assert!(approx(lean.roof_slope_m, 3.8 / cos, 1e-9));
        assert!(approx(lean.roof_area_m2, 5.8 * 3.8 / cos, 1e-9));
    }

    #[test]
    fn test_interior() {
        let geo = calculate(&scenario_a());
        assert!(approx(geo.inner_length_m, 4.86, 1e-9));
        assert!(approx(geo.inner_width_m, 2.86, 1e-9));
        assert!(approx(geo.inner_area_m2, 4.86 * 2.86, 1e-9));
        assert!(approx(geo.outer_area_m2, 15.0, 1e-9));
        assert!(approx(geo.interior_wall_area_m2, 2.0 * (4.86 + 2.86) * 2.12, 1e-9));
        let cos = 22f64.to_radians().cos();
        assert!(approx(geo.interior_ceiling_area_m2, 2.0 * 4.86 * (1.43 / cos), 1e-9));
    }

    #[test]
    fn test_thick_logs_clamp_interior() {
        let geo = calculate(&BuildingInputs {
            log_thickness_m: 3.0,
            ..scenario_a()
        });
        assert_eq!(geo.inner_width_m, 0.0);
        assert_eq!(geo.inner_area_m2, 0.0);
    }

    #[test]
    fn test_battens() {
        let geo = calculate(&scenario_a());
        // ceil(5 / 0.6) = 9 joists across the inner width
        assert!(approx(geo.floor_joist_length_m, 9.0 * 2.86, 1e-9));
        let slope = geo.roof_slope_m;
        let counter = (slope / 0.6).ceil();
        assert!(approx(geo.counter_batten_length_m, 2.0 * 5.8 * counter, 1e-9));
        let support = (5.8f64 / 0.35).ceil();
        assert!(approx(geo.support_batten_length_m, 2.0 * slope * support, 1e-9));
    }

    #[test]
    fn test_lean_to_battens_single_plane() {
        let geo = calculate(&BuildingInputs {
            roof_type: RoofType::LeanTo,
            ..scenario_a()
        });
        let slope = geo.roof_slope_m;
        let counter = (slope / 0.6).ceil();
        assert!(approx(geo.counter_batten_length_m, 5.8 * counter, 1e-9));
        let support = (5.8f64 / 0.35).ceil();
        assert!(approx(geo.support_batten_length_m, slope * support, 1e-9));
        // Floor joists do not depend on the roof
        assert!(approx(geo.floor_joist_length_m, 9.0 * 2.86, 1e-9));
    }

    #[test]
    fn test_lean_to_sloped_ceiling() {
        let geo = calculate(&BuildingInputs {
            roof_type: RoofType::LeanTo,
            ceiling_type: CeilingType::Sloped,
            ..scenario_a()
        });
        let cos = 22f64.to_radians().cos();
        assert!(approx(geo.interior_ceiling_area_m2, 4.86 * 2.86 / cos, 1e-9));
        assert!(geo.interior_ceiling_area_m2 > geo.inner_area_m2);
    }

    #[test]
    fn test_zero_spacing_gives_zero() {
        let geo = calculate(&BuildingInputs {
            cc_floor_joist_m: 0.0,
            cc_counter_batten_m: 0.0,
            cc_support_batten_m: 0.0,
            ..scenario_a()
        });
        assert_eq!(geo.floor_joist_length_m, 0.0);
        assert_eq!(geo.counter_batten_length_m, 0.0);
        assert_eq!(geo.support_batten_length_m, 0.0);
    }

    #[test]
    fn test_full_opening_deduction() {
        let gross = calculate(&scenario_a()).wall_area_gross_m2;
        let geo = calculate(&BuildingInputs {
            opening_deduction_m2: gross,
            ..scenario_a()
        });
        assert_eq!(geo.wall_area_net_m2, 0.0);
        assert_eq!(geo.net_log_length_m, 0.0);

        let over = calculate(&BuildingInputs {
            opening_deduction_m2: gross * 2.0,
            ..scenario_a()
        });
        assert_eq!(over.wall_area_net_m2, 0.0);
    }

    #[test]
    fn test_partial_deduction_scales_logs() {
        let base = calculate(&scenario_a());
        let geo = calculate(&BuildingInputs {
            opening_deduction_m2: base.wall_area_gross_m2 / 4.0,
            ..scenario_a()
        });
        assert!(approx(geo.net_log_length_m, base.total_log_length_m * 0.75, 1e-9));
    }

    #[test]
    fn test_permit_threshold() {
        let geo = calculate(&BuildingInputs {
            wall_height_m: 2.6,
            foundation_type: FoundationType::Piers,
            ..scenario_a()
        });
        assert!(geo.exceeds_permit_height());
    }

    fn arb_inputs() -> impl Strategy<Value = BuildingInputs> {
        (
            (1.0f64..50.0, 1.0f64..50.0, 0.1f64..10.0, 5.0f64..60.0),
            (0.0f64..2.0, 0.0f64..1.0, 0.04f64..0.3, 0.08f64..0.3),
            (0.0f64..1.0, 0.0f64..1.0, 0.0f64..1.0, 0.0f64..100.0),
            (any::<bool>(), any::<bool>(), any::<bool>(), 0u8..3),
        )
            .prop_map(|(dims, logs, spacing, flags)| {
                let (length_m, width_m, wall_height_m, roof_angle_deg) = dims;
                let (overhang_m, corner_overhang_m, log_thickness_m, course_height_m) = logs;
                let (cc_floor, cc_counter, cc_support, deduction) = spacing;
                let (lean_to, partition, flat, foundation) = flags;
                BuildingInputs {
                    roof_type: if lean_to { RoofType::LeanTo } else { RoofType::Gable },
                    include_partition_wall: partition,
                    foundation_type: FoundationType::ALL[foundation as usize],
                    length_m,
                    width_m,
                    wall_height_m,
                    roof_angle_deg,
                    overhang_m,
                    corner_overhang_m,
                    log_thickness_m,
                    course_height_m,
                    cc_floor_joist_m: cc_floor,
                    cc_counter_batten_m: cc_counter,
                    cc_support_batten_m: cc_support,
                    opening_deduction_m2: deduction,
                    ceiling_type: if flat { CeilingType::Flat } else { CeilingType::Sloped },
                    ..BuildingInputs::default()
                }
            })
    }

    fn all_fields(geo: &CalculatedValues) -> Vec<f64> {
        vec![
            geo.courses_avg,
            geo.outer_log_length_m,
            geo.gable_log_length_m,
            geo.partition_log_length_m,
            geo.total_log_length_m,
            geo.net_log_length_m,
            geo.wall_area_gross_m2,
            geo.wall_area_net_m2,
            geo.interior_wall_area_m2,
            geo.interior_ceiling_area_m2,
            geo.roof_area_m2,
            geo.outer_area_m2,
            geo.inner_area_m2,
            geo.inner_length_m,
            geo.inner_width_m,
            geo.gable_height_m,
            geo.foundation_height_m,
            geo.total_height_m,
            geo.floor_joist_length_m,
            geo.counter_batten_length_m,
            geo.support_batten_length_m,
            geo.roof_length_eff_m,
            geo.roof_slope_m,
            geo.perimeter_per_course_m,
            geo.sill_perimeter_m,
            geo.inner_perimeter_m,
        ]
    }

    proptest! {
        #[test]
        fn every_field_is_finite_and_non_negative(inputs in arb_inputs()) {
            let geo = calculate(&inputs);
            for value in all_fields(&geo) {
                prop_assert!(value.is_finite());
                prop_assert!(value >= 0.0);
            }
        }

        #[test]
        fn net_never_exceeds_gross(inputs in arb_inputs()) {
            let geo = calculate(&inputs);
            prop_assert!(geo.wall_area_net_m2 <= geo.wall_area_gross_m2);
            prop_assert!(geo.net_log_length_m <= geo.total_log_length_m + 1e-9);
        }

        #[test]
        fn no_deduction_means_net_equals_gross(inputs in arb_inputs()) {
            let geo = calculate(&BuildingInputs { opening_deduction_m2: 0.0, ..inputs });
            prop_assert_eq!(geo.wall_area_net_m2, geo.wall_area_gross_m2);
            prop_assert_eq!(geo.net_log_length_m, geo.total_log_length_m);
        }

        #[test]
        fn course_count_is_monotonic(
            h in 0.1f64..10.0,
            extra in 0.0f64..5.0,
            course_h in 0.08f64..0.3,
        ) {
            let low = calculate(&BuildingInputs {
                wall_height_m: h,
                course_height_m: course_h,
                ..BuildingInputs::default()
            });
            let high = calculate(&BuildingInputs {
                wall_height_m: h + extra,
                course_height_m: course_h,
                ..BuildingInputs::default()
            });
            prop_assert!(high.courses_low >= low.courses_low);
        }

        #[test]
        fn course_symmetry(inputs in arb_inputs()) {
            let geo = calculate(&inputs);
            match inputs.roof_type {
                RoofType::Gable => prop_assert_eq!(geo.courses_high, geo.courses_low),
                RoofType::LeanTo => prop_assert!(geo.courses_high >= geo.courses_low),
            }
        }

        #[test]
        fn flat_ceiling_matches_floor(inputs in arb_inputs()) {
            let geo = calculate(&BuildingInputs { ceiling_type: CeilingType::Flat, ..inputs });
            prop_assert_eq!(geo.interior_ceiling_area_m2, geo.inner_area_m2);
        }

        #[test]
        fn deterministic(inputs in arb_inputs()) {
            prop_assert_eq!(calculate(&inputs), calculate(&inputs));
        }
    }
}
