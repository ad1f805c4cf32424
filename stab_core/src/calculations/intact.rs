//! # Intact Stability Assessment
//!
//! Full check of a loaded condition:
//!
//! 1. Free-surface correction from slack tanks (fluid GM)
//! 2. GZ curve, either wall-sided or from cross curves
//! 3. Criteria evaluation for the configured vessel category
//! 4. Natural roll period when the breadth is known
//! 5. Warnings
//!
//! ## Example
//!
//! ```rust
//! use stab_core::calculations::intact::{calculate, IntactInput};
//! use stab_core::settings::StabilitySettings;
//! use stab_core::vessel::VesselState;
//!
//! let vessel = VesselState::new(25_000.0, 8.5, 7.2);
//! let input = IntactInput { breadth_m: Some(32.0), ..IntactInput::default() };
//! let result = calculate(&vessel, &input, &StabilitySettings::default()).unwrap();
//!
//! assert!(result.evaluation.all_passed);
//! assert!(result.roll_period_s.is_some());
//! ```

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::criteria::VesselCategory;
use super::gz_curve::{GzCurve, KnSample};
use super::solas::{evaluate, SolasEvaluation};
use super::warnings::{assess, StabilityWarning};
use crate::equations::stability::{free_surface_moment, righting_moment, roll_period};
use crate::errors::{ensure_positive, CalcResult};
use crate::settings::{CurveResolution, StabilitySettings};
use crate::vessel::{TankState, VesselState};

/// Optional inputs for an intact assessment.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IntactInput {
    /// Moulded breadth, for the roll period (m)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub breadth_m: Option<f64>,

    /// Slack tanks to correct GM for
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tanks: Vec<TankState>,

    /// Cross-curve ordinates; when given they replace the wall-sided model
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kn_table: Option<Vec<KnSample>>,

    /// Curve resolution; defaults to the settings value
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resolution: Option<CurveResolution>,
}

impl IntactInput {
    /// Validate input parameters.
    pub fn validate(&self) -> CalcResult<()> {
        if let Some(breadth) = self.breadth_m {
            ensure_positive("breadth_m", breadth)?;
        }
        for tank in &self.tanks {
            tank.validate()?;
        }
        Ok(())
    }
}

/// Result of an intact assessment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IntactResult {
    /// Category whose thresholds were applied
    pub vessel_category: VesselCategory,

    /// GM before free-surface correction (m)
    pub gm_solid_m: f64,

    /// Virtual rise of G from slack tanks (m)
    pub free_surface_correction_m: f64,

    /// GM after free-surface correction (m)
    pub gm_fluid_m: f64,

    /// Righting moment at the peak of the curve (t·m)
    pub max_righting_moment_tm: f64,

    pub curve: GzCurve,
    pub evaluation: SolasEvaluation,

    /// Area under the whole curve by Simpson's rule; absent when the
    /// samples are unevenly spaced or even in number
    pub dynamic_stability_mrad: Option<f64>,

    /// Natural roll period; absent without a breadth or with GM ≤ 0
    pub roll_period_s: Option<f64>,

    pub warnings: Vec<StabilityWarning>,
}

/// Assess a loaded condition.
pub fn calculate(vessel: &VesselState, input: &IntactInput, settings: &StabilitySettings) -> CalcResult<IntactResult> {
    vessel.validate()?;
    input.validate()?;
    settings.validate()?;

    let gm_solid = vessel.gm();
    let correction = free_surface_moment(&input.tanks, vessel.displacement_t)?;
    let corrected = vessel.with_weight(vessel.displacement_t, vessel.kg_m + correction);
    let gm_fluid = corrected.gm();

    let curve = match &input.kn_table {
        Some(kn_table) => GzCurve::generate_from_kn(kn_table, corrected.kg_m)?,
        None => GzCurve::generate(&corrected, input.resolution.unwrap_or(settings.curve_resolution))?,
    };
    let evaluation = evaluate(&curve, &corrected, settings.thresholds())?;

    let roll_period_s = match input.breadth_m {
        Some(breadth) => roll_period(settings.roll_form_coefficient, breadth, gm_fluid)?,
        None => None,
    };

    let warnings = assess(gm_fluid, correction, &curve, &evaluation);

    debug!(
        gm_solid_m = gm_solid,
        gm_fluid_m = gm_fluid,
        passed = evaluation.passed_count,
        warnings = warnings.len(),
        "intact assessment complete"
    );

    Ok(IntactResult {
        vessel_category: settings.vessel_category,
        gm_solid_m: gm_solid,
        free_surface_correction_m: correction,
        gm_fluid_m: gm_fluid,
        max_righting_moment_tm: righting_moment(vessel.displacement_t, evaluation.max_gz_m),
        dynamic_stability_mrad: curve.dynamic_stability().ok().map(|area| area.0),
        curve,
        evaluation,
        roll_period_s,
        warnings,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reference_vessel() -> VesselState {
        VesselState::new(25_000.0, 8.5, 7.2)
    }

    #[test]
    fn test_reference_condition() {
        let input = IntactInput {
            breadth_m: Some(32.0),
            ..IntactInput::default()
        };
        let result = calculate(&reference_vessel(), &input, &StabilitySettings::default()).unwrap();

        assert_eq!(result.free_surface_correction_m, 0.0);
        assert!((result.gm_fluid_m - 1.3).abs() < 1e-9);
        assert!(result.evaluation.all_passed);
        assert!(result.warnings.is_empty());
        // T = 0.8 × 32 / √1.3
        assert!((result.roll_period_s.unwrap() - 0.8 * 32.0 / 1.3f64.sqrt()).abs() < 1e-9);
        assert!((result.max_righting_moment_tm - 25_000.0 * 1.3).abs() < 1e-6);
        assert!(result.dynamic_stability_mrad.is_some());
    }

    #[test]
    fn test_slack_tanks_reduce_gm() {
        let input = IntactInput {
            tanks: vec![TankState::new(20.0, 15.0, 0.5, 1.025)],
            ..IntactInput::default()
        };
        let result = calculate(&reference_vessel(), &input, &StabilitySettings::default()).unwrap();

        // 20 × 15³ / 12 × 1.025 / 25000
        let expected = 20.0 * 15f64.powi(3) / 12.0 * 1.025 / 25_000.0;
        assert!((result.free_surface_correction_m - expected).abs() < 1e-12);
        assert!((result.gm_fluid_m - (1.3 - expected)).abs() < 1e-12);
    }

    #[test]
    fn test_unstable_condition() {
        let vessel = VesselState::new(10_000.0, 7.0, 7.4);
        let input = IntactInput {
            breadth_m: Some(20.0),
            ..IntactInput::default()
        };
        let result = calculate(&vessel, &input, &StabilitySettings::default()).unwrap();
        assert_eq!(result.roll_period_s, None);
        assert!(result.warnings.iter().any(|w| w.is_critical()));
        assert!(!result.evaluation.all_passed);
    }

    #[test]
    fn test_cross_curves_replace_model() {
        let kn_table = vec![
            KnSample { heel_deg: 0.0, kn_m: 0.0 },
            KnSample { heel_deg: 10.0, kn_m: 1.45 },
            KnSample { heel_deg: 20.0, kn_m: 2.90 },
            KnSample { heel_deg: 30.0, kn_m: 4.25 },
            KnSample { heel_deg: 40.0, kn_m: 5.40 },
        ];
        let input = IntactInput {
            kn_table: Some(kn_table),
            ..IntactInput::default()
        };
        let result = calculate(&reference_vessel(), &input, &StabilitySettings::default()).unwrap();
        assert_eq!(result.curve.points().len(), 5);
        // GZ(30°) = 4.25 − 7.2 × 0.5
        assert!((result.curve.points()[3].gz_m - 0.65).abs() < 1e-9);
    }

    #[test]
    fn test_category_from_settings() {
        // GM = 0.18 m
        let vessel = VesselState::new(12_000.0, 7.0, 6.82);
        let settings = StabilitySettings {
            vessel_category: VesselCategory::Passenger,
            ..StabilitySettings::default()
        };
        let result = calculate(&vessel, &IntactInput::default(), &settings).unwrap();
        assert_eq!(result.vessel_category, VesselCategory::Passenger);
        assert_eq!(result.evaluation.criteria[0].required_threshold, 0.20);
        assert!(!result.evaluation.criteria[0].passed);
    }

    #[test]
    fn test_invalid_settings_rejected() {
        let settings = StabilitySettings {
            roll_form_coefficient: 0.0,
            ..StabilitySettings::default()
        };
        let input = IntactInput {
            breadth_m: Some(32.0),
            ..IntactInput::default()
        };
        let err = calculate(&reference_vessel(), &input, &settings).unwrap_err();
        assert_eq!(err.error_code(), "INVALID_INPUT");
    }

    #[test]
    fn test_invalid_breadth() {
        let input = IntactInput {
            breadth_m: Some(0.0),
            ..IntactInput::default()
        };
        assert!(calculate(&reference_vessel(), &input, &StabilitySettings::default()).is_err());
    }
}
