//! # Stability Warnings
//!
//! Plain-data warnings raised alongside an intact stability result. Text
//! formatting is left to the front end; each variant carries the number that
//! triggered it.

use serde::{Deserialize, Serialize};
use tracing::warn;

use super::gz_curve::GzCurve;
use super::solas::SolasEvaluation;

/// GM below this is flagged as low (m)
pub const LOW_GM_M: f64 = 0.15;

/// Free-surface correction above this is flagged (m)
pub const HIGH_FREE_SURFACE_M: f64 = 0.2;

/// Vanishing angle below this is flagged (degrees)
pub const LOW_VANISHING_ANGLE_DEG: f64 = 60.0;

/// A condition worth a second look.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum StabilityWarning {
    /// GM ≤ 0: the vessel has no initial stability
    NegativeGm { gm_m: f64 },
    /// 0 < GM < 0.15 m
    LowGm { gm_m: f64 },
    /// Free-surface correction exceeds 0.2 m
    HighFreeSurface { correction_m: f64 },
    /// Righting arm vanishes before 60°
    LowVanishingAngle { angle_deg: f64 },
    /// One or more criteria were not met
    CriteriaFailed { failed_count: usize },
}

impl StabilityWarning {
    /// Critical warnings describe a vessel that should not sail as loaded.
    pub fn is_critical(&self) -> bool {
        matches!(self, StabilityWarning::NegativeGm { .. })
    }
}

/// Collect warnings for a loaded condition.
///
/// # Arguments
///
/// * `gm_m` - GM after any free-surface correction
/// * `free_surface_correction_m` - Virtual KG rise from slack tanks
/// * `curve` - Righting-arm curve of the condition
/// * `evaluation` - Criteria evaluation of the same curve
pub fn assess(
    gm_m: f64,
    free_surface_correction_m: f64,
    curve: &GzCurve,
    evaluation: &SolasEvaluation,
) -> Vec<StabilityWarning> {
    let mut warnings = Vec::new();

    if gm_m <= 0.0 {
        warnings.push(StabilityWarning::NegativeGm { gm_m });
    } else if gm_m < LOW_GM_M {
        warnings.push(StabilityWarning::LowGm { gm_m });
    }

    if free_surface_correction_m > HIGH_FREE_SURFACE_M {
        warnings.push(StabilityWarning::HighFreeSurface {
            correction_m: free_surface_correction_m,
        });
    }

    if let Some(angle_deg) = curve.vanishing_angle() {
        if angle_deg < LOW_VANISHING_ANGLE_DEG {
            warnings.push(StabilityWarning::LowVanishingAngle { angle_deg });
        }
    }

    let failed_count = evaluation.failed().count();
    if failed_count > 0 {
        warnings.push(StabilityWarning::CriteriaFailed { failed_count });
    }

    for warning in warnings.iter().filter(|w| w.is_critical()) {
        warn!(?warning, "critical stability warning");
    }

    warnings
}
