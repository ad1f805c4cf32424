//! # Pendulum Heel Measurement
//!
//! Heel read from a plumb line hung in a hatch or trunk. Positive deflection
//! is to starboard.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::equations::stability::pendulum_heel_angle;
use crate::errors::CalcResult;
use crate::units::{Degrees, Radians};
use crate::vessel::VesselState;

/// Side the vessel is heeled to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HeelSide {
    Upright,
    Starboard,
    Port,
}

/// A pendulum reading.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PendulumInput {
    /// Length from suspension point to the scale (m)
    pub pendulum_length_m: f64,

    /// Horizontal deflection read on the scale (m), positive to starboard
    pub deflection_m: f64,
}

/// Heel derived from a reading.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PendulumResult {
    /// Heel magnitude (degrees)
    pub heel_deg: f64,

    pub side: HeelSide,

    /// Heeling moment that holds the vessel at this heel, Δ·GM·tan φ (t·m);
    /// absent when GM ≤ 0
    #[serde(skip_serializing_if = "Option::is_none")]
    pub implied_heeling_moment_tm: Option<f64>,
}

/// Convert a pendulum reading into a heel angle.
///
/// # Errors
/// `InvalidInput` when the length is not positive or the deflection exceeds
/// it.
///
/// # Example
/// ```rust
/// use stab_core::calculations::pendulum::{calculate, PendulumInput};
/// use stab_core::vessel::VesselState;
///
/// let vessel = VesselState::new(25_000.0, 8.5, 7.2);
/// let reading = PendulumInput { pendulum_length_m: 1.0, deflection_m: 0.1 };
/// let result = calculate(&vessel, &reading).unwrap();
/// assert!((result.heel_deg - 5.74).abs() < 0.01);
/// ```
pub fn calculate(vessel: &VesselState, input: &PendulumInput) -> CalcResult<PendulumResult> {
    vessel.validate()?;
    let signed_heel = pendulum_heel_angle(input.pendulum_length_m, input.deflection_m)?;

    let side = if signed_heel > 0.0 {
        HeelSide::Starboard
    } else if signed_heel < 0.0 {
        HeelSide::Port
    } else {
        HeelSide::Upright
    };

    let gm = vessel.gm();
    let implied_heeling_moment_tm = (gm > 0.0).then(|| {
        let heel: Radians = Degrees(signed_heel.abs()).into();
        vessel.displacement_t * gm * heel.0.tan()
    });

    debug!(heel_deg = signed_heel, ?side, "pendulum reading converted");

    Ok(PendulumResult {
        heel_deg: signed_heel.abs(),
        side,
        implied_heeling_moment_tm,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::equations::stability::heel_angle_from_moment;

    fn vessel() -> VesselState {
        VesselState::new(25_000.0, 8.5, 7.2)
    }

    #[test]
    fn test_reference_reading() {
        let reading = PendulumInput {
            pendulum_length_m: 1.0,
            deflection_m: 0.1,
        };
        let result = calculate(&vessel(), &reading).unwrap();
        assert!((result.heel_deg - 0.1f64.asin().to_degrees()).abs() < 1e-12);
        assert_eq!(result.side, HeelSide::Starboard);
    }

    #[test]
    fn test_port_and_upright() {
        let port = calculate(
            &vessel(),
            &PendulumInput {
                pendulum_length_m: 2.0,
                deflection_m: -0.2,
            },
        )
        .unwrap();
        assert_eq!(port.side, HeelSide::Port);
        assert!(port.heel_deg > 0.0);

        let upright = calculate(
            &vessel(),
            &PendulumInput {
                pendulum_length_m: 2.0,
                deflection_m: 0.0,
            },
        )
        .unwrap();
        assert_eq!(upright.side, HeelSide::Upright);
    }

    #[test]
    fn test_implied_moment_inverts_heel() {
        let reading = PendulumInput {
            pendulum_length_m: 3.0,
            deflection_m: 0.25,
        };
        let result = calculate(&vessel(), &reading).unwrap();
        let moment = result.implied_heeling_moment_tm.unwrap();
        let heel = heel_angle_from_moment(moment, 25_000.0, 1.3).unwrap();
        assert!((heel.degrees() - result.heel_deg).abs() < 1e-9);
    }

    #[test]
    fn test_rejects_bad_readings() {
        let too_far = PendulumInput {
            pendulum_length_m: 1.0,
            deflection_m: 1.2,
        };
        assert!(calculate(&vessel(), &too_far).is_err());

        let no_length = PendulumInput {
            pendulum_length_m: 0.0,
            deflection_m: 0.0,
        };
        assert!(calculate(&vessel(), &no_length).is_err());
    }
}
