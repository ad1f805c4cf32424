//! # Intact Stability Criteria Tables
//!
//! Minimum values for the general intact stability criteria, held as data
//! and keyed by vessel category. The evaluator in [`super::solas`] looks
//! thresholds up here instead of carrying literals of its own.
//!
//! ## Base Criteria (IS Code 2008, Part A, 2.2)
//!
//! | Criterion                | Minimum    |
//! |--------------------------|------------|
//! | Initial GM               | 0.150 m    |
//! | Area 0°–30°              | 0.055 m·rad |
//! | Area 0°–40°              | 0.090 m·rad |
//! | Area 30°–40°             | 0.030 m·rad |
//! | Maximum GZ               | 0.200 m    |
//! | Angle of maximum GZ      | 30°        |
//!
//! Passenger ships, tankers and grain carriers tighten some of these; see
//! [`CriteriaTable::standard`].

use std::collections::HashMap;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::errors::{ensure_positive, CalcResult};

// ============================================================================
// Code References
// ============================================================================

/// IS Code section references for each criterion.
pub mod is_code_ref {
    /// Initial metacentric height
    pub const INITIAL_GM: &str = "IS Code 2008 A/2.2.4";
    /// Area under the GZ curve up to 30°
    pub const AREA_0_30: &str = "IS Code 2008 A/2.2.1";
    /// Area under the GZ curve up to 40°
    pub const AREA_0_40: &str = "IS Code 2008 A/2.2.1";
    /// Area under the GZ curve between 30° and 40°
    pub const AREA_30_40: &str = "IS Code 2008 A/2.2.1";
    /// Righting lever at or beyond 30°
    pub const MAX_GZ: &str = "IS Code 2008 A/2.2.2";
    /// Angle of the maximum righting lever
    pub const ANGLE_OF_MAX_GZ: &str = "IS Code 2008 A/2.2.3";
    /// Grain carriers, initial GM after grain shift
    pub const GRAIN_GM: &str = "Grain Code A/7.1";
}

/// Vessel category used to pick a threshold set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VesselCategory {
    /// General cargo ship (base criteria)
    #[default]
    Cargo,
    /// Passenger ship
    Passenger,
    /// Oil or chemical tanker
    Tanker,
    /// Container ship
    Container,
    /// Bulk carrier loading grain
    BulkGrain,
}

impl VesselCategory {
    /// Human-readable name
    pub fn display_name(&self) -> &'static str {
        match self {
            VesselCategory::Cargo => "General Cargo",
            VesselCategory::Passenger => "Passenger",
            VesselCategory::Tanker => "Tanker",
            VesselCategory::Container => "Container",
            VesselCategory::BulkGrain => "Bulk Carrier (Grain)",
        }
    }

    /// All categories, in display order
    pub fn all() -> &'static [VesselCategory] {
        &[
            VesselCategory::Cargo,
            VesselCategory::Passenger,
            VesselCategory::Tanker,
            VesselCategory::Container,
            VesselCategory::BulkGrain,
        ]
    }
}

/// One of the six evaluated criteria.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Criterion {
    /// Initial metacentric height (m)
    InitialGm,
    /// Area under GZ from 0° to 30° (m·rad)
    Area0To30,
    /// Area under GZ from 0° to 40° (m·rad)
    Area0To40,
    /// Area under GZ from 30° to 40° (m·rad)
    Area30To40,
    /// Maximum righting arm (m)
    MaxGz,
    /// Heel at which GZ peaks (degrees)
    AngleOfMaxGz,
}

impl Criterion {
    /// Criteria in evaluation order
    pub const ALL: [Criterion; 6] = [
        Criterion::InitialGm,
        Criterion::Area0To30,
        Criterion::Area0To40,
        Criterion::Area30To40,
        Criterion::MaxGz,
        Criterion::AngleOfMaxGz,
    ];

    /// Short label for reports
    pub fn label(&self) -> &'static str {
        match self {
            Criterion::InitialGm => "Initial GM",
            Criterion::Area0To30 => "Area 0-30°",
            Criterion::Area0To40 => "Area 0-40°",
            Criterion::Area30To40 => "Area 30-40°",
            Criterion::MaxGz => "Maximum GZ",
            Criterion::AngleOfMaxGz => "Angle of max GZ",
        }
    }

    /// Unit of the value and threshold
    pub fn unit(&self) -> &'static str {
        match self {
            Criterion::InitialGm | Criterion::MaxGz => "m",
            Criterion::Area0To30 | Criterion::Area0To40 | Criterion::Area30To40 => "m·rad",
            Criterion::AngleOfMaxGz => "deg",
        }
    }

    /// Code section the criterion comes from for a vessel category
    pub fn reference(&self, category: VesselCategory) -> &'static str {
        match self {
            Criterion::InitialGm if category == VesselCategory::BulkGrain => is_code_ref::GRAIN_GM,
            Criterion::InitialGm => is_code_ref::INITIAL_GM,
            Criterion::Area0To30 => is_code_ref::AREA_0_30,
            Criterion::Area0To40 => is_code_ref::AREA_0_40,
            Criterion::Area30To40 => is_code_ref::AREA_30_40,
            Criterion::MaxGz => is_code_ref::MAX_GZ,
            Criterion::AngleOfMaxGz => is_code_ref::ANGLE_OF_MAX_GZ,
        }
    }
}

/// Minimum values for each criterion.
///
/// ## JSON Example
///
/// ```json
/// {
///   "min_gm_m": 0.15,
///   "min_area_0_30_mrad": 0.055,
///   "min_area_0_40_mrad": 0.09,
///   "min_area_30_40_mrad": 0.03,
///   "min_max_gz_m": 0.2,
///   "min_angle_of_max_gz_deg": 30.0
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CriteriaThresholds {
    pub min_gm_m: f64,
    pub min_area_0_30_mrad: f64,
    pub min_area_0_40_mrad: f64,
    pub min_area_30_40_mrad: f64,
    pub min_max_gz_m: f64,
    pub min_angle_of_max_gz_deg: f64,
}

impl Default for CriteriaThresholds {
    fn default() -> Self {
        CriteriaThresholds {
            min_gm_m: 0.150,
            min_area_0_30_mrad: 0.055,
            min_area_0_40_mrad: 0.090,
            min_area_30_40_mrad: 0.030,
            min_max_gz_m: 0.200,
            min_angle_of_max_gz_deg: 30.0,
        }
    }
}

impl CriteriaThresholds {
    /// Threshold for one criterion
    pub fn get(&self, criterion: Criterion) -> f64 {
        match criterion {
            Criterion::InitialGm => self.min_gm_m,
            Criterion::Area0To30 => self.min_area_0_30_mrad,
            Criterion::Area0To40 => self.min_area_0_40_mrad,
            Criterion::Area30To40 => self.min_area_30_40_mrad,
            Criterion::MaxGz => self.min_max_gz_m,
            Criterion::AngleOfMaxGz => self.min_angle_of_max_gz_deg,
        }
    }

    /// Replace one threshold (builder pattern)
    pub fn with(mut self, criterion: Criterion, minimum: f64) -> Self {
        let slot = match criterion {
            Criterion::InitialGm => &mut self.min_gm_m,
            Criterion::Area0To30 => &mut self.min_area_0_30_mrad,
            Criterion::Area0To40 => &mut self.min_area_0_40_mrad,
            Criterion::Area30To40 => &mut self.min_area_30_40_mrad,
            Criterion::MaxGz => &mut self.min_max_gz_m,
            Criterion::AngleOfMaxGz => &mut self.min_angle_of_max_gz_deg,
        };
        *slot = minimum;
        self
    }

    /// Every threshold must be a positive finite number.
    pub fn validate(&self) -> CalcResult<()> {
        ensure_positive("min_gm_m", self.min_gm_m)?;
        ensure_positive("min_area_0_30_mrad", self.min_area_0_30_mrad)?;
        ensure_positive("min_area_0_40_mrad", self.min_area_0_40_mrad)?;
        ensure_positive("min_area_30_40_mrad", self.min_area_30_40_mrad)?;
        ensure_positive("min_max_gz_m", self.min_max_gz_m)?;
        ensure_positive("min_angle_of_max_gz_deg", self.min_angle_of_max_gz_deg)?;
        Ok(())
    }
}

/// Threshold sets keyed by vessel category.
///
/// Categories without an entry use the base thresholds.
///
/// # Example
/// ```
/// use stab_core::calculations::criteria::{CriteriaTable, VesselCategory};
///
/// let table = CriteriaTable::standard();
/// assert_eq!(table.thresholds(VesselCategory::Cargo).min_gm_m, 0.15);
/// assert_eq!(table.thresholds(VesselCategory::Passenger).min_gm_m, 0.20);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CriteriaTable {
    /// Thresholds for categories without their own entry
    pub base: CriteriaThresholds,

    /// Category-specific thresholds
    #[serde(default)]
    pub by_category: HashMap<VesselCategory, CriteriaThresholds>,
}

static STANDARD_TABLE: Lazy<CriteriaTable> = Lazy::new(|| {
    let base = CriteriaThresholds::default();
    CriteriaTable::new(base)
        .with_category(
            VesselCategory::Passenger,
            base.with(Criterion::InitialGm, 0.200)
                .with(Criterion::Area0To30, 0.070),
        )
        .with_category(
            VesselCategory::Tanker,
            base.with(Criterion::Area0To30, 0.065)
                .with(Criterion::Area0To40, 0.100),
        )
        .with_category(
            VesselCategory::BulkGrain,
            base.with(Criterion::InitialGm, 0.300),
        )
});

impl CriteriaTable {
    /// Table with only base thresholds
    pub fn new(base: CriteriaThresholds) -> Self {
        CriteriaTable {
            base,
            by_category: HashMap::new(),
        }
    }

    /// The standard table shipped with the engine
    pub fn standard() -> &'static CriteriaTable {
        &STANDARD_TABLE
    }

    /// Add or replace a category entry (builder pattern)
    pub fn with_category(mut self, category: VesselCategory, thresholds: CriteriaThresholds) -> Self {
        self.by_category.insert(category, thresholds);
        self
    }

    /// Thresholds for a category, falling back to the base set
    pub fn thresholds(&self, category: VesselCategory) -> &CriteriaThresholds {
        self.by_category.get(&category).unwrap_or(&self.base)
    }

    /// Validate every threshold set in the table.
    pub fn validate(&self) -> CalcResult<()> {
        self.base.validate()?;
        for thresholds in self.by_category.values() {
            thresholds.validate()?;
        }
        Ok(())
    }
}

impl Default for CriteriaTable {
    fn default() -> Self {
        CriteriaTable::standard().clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_thresholds() {
        let t = CriteriaThresholds::default();
        assert_eq!(t.get(Criterion::InitialGm), 0.15);
        assert_eq!(t.get(Criterion::Area0To30), 0.055);
        assert_eq!(t.get(Criterion::Area0To40), 0.09);
        assert_eq!(t.get(Criterion::Area30To40), 0.03);
        assert_eq!(t.get(Criterion::MaxGz), 0.2);
        assert_eq!(t.get(Criterion::AngleOfMaxGz), 30.0);
    }

    #[test]
    fn test_category_overrides() {
        let table = CriteriaTable::standard();

        let passenger = table.thresholds(VesselCategory::Passenger);
        assert_eq!(passenger.min_gm_m, 0.20);
        assert_eq!(passenger.min_area_0_30_mrad, 0.070);
        assert_eq!(passenger.min_area_0_40_mrad, 0.090);

        let tanker = table.thresholds(VesselCategory::Tanker);
        assert_eq!(tanker.min_area_0_30_mrad, 0.065);
        assert_eq!(tanker.min_area_0_40_mrad, 0.100);

        assert_eq!(table.thresholds(VesselCategory::BulkGrain).min_gm_m, 0.30);
        // no entry: falls back to base
        assert_eq!(table.thresholds(VesselCategory::Container), &table.base);
    }

    #[test]
    fn test_every_criterion_has_reference() {
        for criterion in Criterion::ALL {
            assert!(criterion.reference(VesselCategory::Cargo).starts_with("IS Code"));
            assert!(!criterion.label().is_empty());
        }
    }

    #[test]
    fn test_grain_gm_reference() {
        assert_eq!(
            Criterion::InitialGm.reference(VesselCategory::BulkGrain),
            is_code_ref::GRAIN_GM
        );
        assert_eq!(
            Criterion::MaxGz.reference(VesselCategory::BulkGrain),
            is_code_ref::MAX_GZ
        );
        assert_eq!(
            Criterion::InitialGm.reference(VesselCategory::Passenger),
            is_code_ref::INITIAL_GM
        );
    }

    #[test]
    fn test_invalid_threshold() {
        let bad = CriteriaThresholds::default().with(Criterion::MaxGz, 0.0);
        assert!(bad.validate().is_err());
        assert!(CriteriaTable::standard().validate().is_ok());
    }

    #[test]
    fn test_table_serialization() {
        let table = CriteriaTable::standard().clone();
        let json = serde_json::to_string(&table).unwrap();
        assert!(json.contains("\"passenger\""));
        let roundtrip: CriteriaTable = serde_json::from_str(&json).unwrap();
        assert_eq!(roundtrip, table);
    }
}
