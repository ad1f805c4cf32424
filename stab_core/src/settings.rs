//! # Calculation Settings
//!
//! Every tunable constant of the simplified stability models lives here, so a
//! caller can adjust them per request without touching the formulas.
//!
//! ## JSON Example
//!
//! ```json
//! {
//!   "seawater_density_t_m3": 1.025,
//!   "assumed_tpc_t_per_cm": 20.0,
//!   "vessel_category": "tanker",
//!   "curve_resolution": "detailed"
//! }
//! ```
//!
//! Missing fields take their defaults; unknown fields are rejected.

use serde::{Deserialize, Serialize};

use crate::calculations::criteria::{CriteriaTable, CriteriaThresholds, VesselCategory};
use crate::errors::{ensure_non_negative, ensure_positive, CalcResult};

/// Density of sea water (t/m³)
pub const SEAWATER_DENSITY_T_M3: f64 = 1.025;

/// Standard gravity (m/s²)
pub const GRAVITY_M_S2: f64 = 9.81;

/// Density of air at sea level (kg/m³)
pub const AIR_DENSITY_KG_M3: f64 = 1.225;

/// Heel angle step used when generating GZ curves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CurveResolution {
    /// 1° steps (91 points)
    Detailed,
    /// 5° steps (19 points)
    #[default]
    Coarse,
}

impl CurveResolution {
    /// Angle step in degrees
    pub fn step_deg(&self) -> u32 {
        match self {
            CurveResolution::Detailed => 1,
            CurveResolution::Coarse => 5,
        }
    }
}

/// Tunable constants for one calculation request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StabilitySettings {
    /// Density of flood water and tank contents when not given (t/m³)
    pub seawater_density_t_m3: f64,

    /// Tonnes per centimetre immersion assumed by the damage model
    pub assumed_tpc_t_per_cm: f64,

    /// KM rise per unit of draft increase in the damage model
    pub km_draft_correction: f64,

    /// Free-surface factor applied to flooded volume in the damage model
    pub damage_free_surface_factor: f64,

    /// Transverse offset of flood water when none is given (m)
    pub asymmetric_flooding_offset_m: f64,

    /// Roll period form coefficient C in T = C·B/√GM
    pub roll_form_coefficient: f64,

    /// Angle step for generated curves
    pub curve_resolution: CurveResolution,

    /// Category used to pick criteria thresholds
    pub vessel_category: VesselCategory,

    /// Replaces the standard criteria table when present
    #[serde(skip_serializing_if = "Option::is_none")]
    pub criteria_table: Option<CriteriaTable>,
}

impl Default for StabilitySettings {
    fn default() -> Self {
        StabilitySettings {
            seawater_density_t_m3: SEAWATER_DENSITY_T_M3,
            assumed_tpc_t_per_cm: 20.0,
            km_draft_correction: 0.1,
            damage_free_surface_factor: 0.1,
            asymmetric_flooding_offset_m: 2.0,
            roll_form_coefficient: 0.8,
            curve_resolution: CurveResolution::default(),
            vessel_category: VesselCategory::default(),
            criteria_table: None,
        }
    }
}

impl StabilitySettings {
    /// Parse a settings document and validate it.
    ///
    /// # Example
    /// ```rust
    /// use stab_core::settings::StabilitySettings;
    ///
    /// let settings = StabilitySettings::from_json_str(r#"{ "assumed_tpc_t_per_cm": 32.5 }"#).unwrap();
    /// assert_eq!(settings.assumed_tpc_t_per_cm, 32.5);
    /// assert_eq!(settings.roll_form_coefficient, 0.8);
    ///
    /// assert!(StabilitySettings::from_json_str(r#"{ "tpc": 32.5 }"#).is_err());
    /// ```
    pub fn from_json_str(json: &str) -> CalcResult<Self> {
        let settings: StabilitySettings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Validate input parameters.
    pub fn validate(&self) -> CalcResult<()> {
        ensure_positive("seawater_density_t_m3", self.seawater_density_t_m3)?;
        ensure_positive("assumed_tpc_t_per_cm", self.assumed_tpc_t_per_cm)?;
        ensure_non_negative("km_draft_correction", self.km_draft_correction)?;
        ensure_non_negative("damage_free_surface_factor", self.damage_free_surface_factor)?;
        ensure_non_negative("asymmetric_flooding_offset_m", self.asymmetric_flooding_offset_m)?;
        ensure_positive("roll_form_coefficient", self.roll_form_coefficient)?;
        if let Some(table) = &self.criteria_table {
            table.validate()?;
        }
        Ok(())
    }

    /// Criteria table in effect: the override, or the standard table
    pub fn criteria_table(&self) -> &CriteriaTable {
        self.criteria_table
            .as_ref()
            .unwrap_or_else(|| CriteriaTable::standard())
    }

    /// Thresholds for the configured vessel category
    pub fn thresholds(&self) -> &CriteriaThresholds {
        self.criteria_table().thresholds(self.vessel_category)
    }
}
