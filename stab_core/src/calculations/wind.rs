//! # Wind Heeling
//!
//! Steady heel from beam wind on the lateral windage area.
//!
//! ```text
//! p   = ½ × ρ_air × v²                     (Pa)
//! arm = p × A × h / (Δ × 1000 × g)         (m)
//! φ   = atan(arm / GM)
//! ```

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::equations::stability::{heel_angle_from_gz, HeelAngle};
use crate::errors::{ensure_finite, ensure_non_negative, CalcResult};
use crate::settings::{AIR_DENSITY_KG_M3, GRAVITY_M_S2};
use crate::vessel::VesselState;

/// Wind load on the vessel.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WindHeelingInput {
    /// Wind speed (m/s)
    pub wind_speed_ms: f64,

    /// Projected lateral area above the waterline (m²)
    pub lateral_area_m2: f64,

    /// Vertical distance from the centre of lateral resistance to the
    /// centre of windage (m)
    pub lever_m: f64,
}

impl WindHeelingInput {
    /// Validate input parameters.
    pub fn validate(&self) -> CalcResult<()> {
        ensure_non_negative("wind_speed_ms", self.wind_speed_ms)?;
        ensure_non_negative("lateral_area_m2", self.lateral_area_m2)?;
        ensure_finite("lever_m", self.lever_m)?;
        Ok(())
    }
}

/// Wind heeling result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WindHeelingResult {
    /// Dynamic wind pressure (Pa)
    pub wind_pressure_pa: f64,
    /// Heeling moment (kN·m)
    pub heeling_moment_knm: f64,
    /// Heeling arm (m)
    pub heeling_arm_m: f64,
    pub heel: HeelAngle,
    /// GM − heeling arm (m)
    pub stability_margin_m: f64,
}

/// Calculate the steady wind heel.
///
/// # Example
/// ```rust
/// use stab_core::calculations::wind::{calculate, WindHeelingInput};
/// use stab_core::vessel::VesselState;
///
/// let vessel = VesselState::new(25_000.0, 8.5, 7.2);
/// let wind = WindHeelingInput { wind_speed_ms: 20.0, lateral_area_m2: 2_000.0, lever_m: 12.0 };
/// let result = calculate(&vessel, &wind).unwrap();
/// assert!((result.wind_pressure_pa - 245.0).abs() < 1e-9);
/// ```
pub fn calculate(vessel: &VesselState, input: &WindHeelingInput) -> CalcResult<WindHeelingResult> {
    vessel.validate()?;
    input.validate()?;

    let pressure = 0.5 * AIR_DENSITY_KG_M3 * input.wind_speed_ms.powi(2);
    let moment_nm = pressure * input.lateral_area_m2 * input.lever_m;
    let arm = moment_nm / (vessel.displacement_t * 1000.0 * GRAVITY_M_S2);
    let gm = vessel.gm();
    let heel = heel_angle_from_gz(arm, gm)?;

    if heel.is_capsize() {
        warn!(gm_m = gm, "wind heel requested for a vessel with no positive GM");
    }
    debug!(pressure_pa = pressure, heeling_arm_m = arm, heel_deg = heel.degrees(), "wind heeling calculated");

    Ok(WindHeelingResult {
        wind_pressure_pa: pressure,
        heeling_moment_knm: moment_nm / 1000.0,
        heeling_arm_m: arm,
        heel,
        stability_margin_m: gm - arm,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wind_chain() {
        let vessel = VesselState::new(25_000.0, 8.5, 7.2);
        let wind = WindHeelingInput {
            wind_speed_ms: 20.0,
            lateral_area_m2: 2_000.0,
            lever_m: 12.0,
        };
        let r = calculate(&vessel, &wind).unwrap();

        // 0.5 × 1.225 × 400 = 245 Pa
        let arm = 245.0 * 2_000.0 * 12.0 / (25_000.0 * 1000.0 * 9.81);
        assert!((r.heeling_arm_m - arm).abs() < 1e-12);
        assert!((r.heeling_moment_knm - 5_880.0).abs() < 1e-9);
        assert!((r.heel.degrees() - (arm / 1.3).atan().to_degrees()).abs() < 1e-9);
        assert!((r.stability_margin_m - (1.3 - arm)).abs() < 1e-12);
    }

    #[test]
    fn test_calm() {
        let vessel = VesselState::new(25_000.0, 8.5, 7.2);
        let calm = WindHeelingInput {
            wind_speed_ms: 0.0,
            lateral_area_m2: 2_000.0,
            lever_m: 12.0,
        };
        let r = calculate(&vessel, &calm).unwrap();
        assert_eq!(r.heeling_arm_m, 0.0);
        assert_eq!(r.heel, HeelAngle::Inclined(0.0));
    }

    #[test]
    fn test_negative_gm_capsize() {
        let vessel = VesselState::new(5_000.0, 6.0, 6.2);
        let wind = WindHeelingInput {
            wind_speed_ms: 10.0,
            lateral_area_m2: 500.0,
            lever_m: 5.0,
        };
        let r = calculate(&vessel, &wind).unwrap();
        assert!(r.heel.is_capsize());
        assert!(r.stability_margin_m < 0.0);
    }
}
