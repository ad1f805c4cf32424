//! # Loading and Cargo Shift
//!
//! Two related calculations on weights already aboard or coming aboard:
//!
//! - [`calculate_loading`] - Load or discharge a list of weights; new KG, GM and list
//! - [`calculate_shift`] - Move one weight vertically and/or transversely
//!
//! ```text
//!        w ──d──▶ w'          G moves parallel to the shift:
//!                               GG₁ = w·d / Δ
//!   ─────────G──▶G₁──────
//! ```
//!
//! ## Example
//!
//! ```rust
//! use stab_core::calculations::loading::{calculate_loading, LoadingInput};
//! use stab_core::vessel::{LoadItem, VesselState};
//!
//! let vessel = VesselState::new(10_000.0, 8.0, 6.0);
//! let input = LoadingInput { loads: vec![LoadItem::new(500.0, 12.0)] };
//! let result = calculate_loading(&vessel, &input).unwrap();
//! assert!(result.gm_change_m < 0.0);
//! ```

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::equations::stability::{
    centre_of_gravity_shift, gm_change_from_shift, gz_from_moment, heel_angle_from_gz, heel_angle_from_moment,
    new_kg, HeelAngle,
};
use crate::errors::{ensure_finite, ensure_non_negative, CalcError, CalcResult};
use crate::vessel::{LoadItem, VesselState};

// ============================================================================
// Loading
// ============================================================================

/// Weights to load (positive) or discharge (negative).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LoadingInput {
    pub loads: Vec<LoadItem>,
}

impl LoadingInput {
    /// Validate input parameters.
    pub fn validate(&self) -> CalcResult<()> {
        for load in &self.loads {
            load.validate()?;
        }
        Ok(())
    }

    /// Net change in displacement (t)
    pub fn total_weight_t(&self) -> f64 {
        self.loads.iter().map(|l| l.weight_t).sum()
    }

    /// Transverse moment of loads that carry a lever (t·m)
    pub fn transverse_moment_tm(&self) -> Option<f64> {
        let mut levered = self
            .loads
            .iter()
            .filter_map(|l| l.horizontal_lever_m.map(|lever| l.weight_t * lever))
            .peekable();
        levered.peek()?;
        Some(levered.sum())
    }
}

/// Condition after loading.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoadingResult {
    pub new_displacement_t: f64,
    pub new_kg_m: f64,
    pub new_gm_m: f64,

    /// new GM − original GM; negative is a loss
    pub gm_change_m: f64,

    /// Transverse moment of the levered loads (t·m)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transverse_moment_tm: Option<f64>,

    /// List caused by that moment; absent when no load has a lever
    #[serde(skip_serializing_if = "Option::is_none")]
    pub list: Option<HeelAngle>,
}

/// Apply a list of loads to a vessel.
///
/// KM is held constant; only displacement and KG change. A load with a
/// vertical lever is moved through it once aboard, raising G by w·d / Δ'.
pub fn calculate_loading(vessel: &VesselState, input: &LoadingInput) -> CalcResult<LoadingResult> {
    vessel.validate()?;
    input.validate()?;

    let new_displacement = vessel.displacement_t + input.total_weight_t();
    let mut kg = new_kg(vessel, &input.loads)?;
    for load in &input.loads {
        if let Some(lever) = load.vertical_lever_m {
            kg -= gm_change_from_shift(load.weight_t, lever, new_displacement)?;
        }
    }
    let loaded = vessel.with_weight(new_displacement, kg);
    let new_gm = loaded.gm();

    let transverse_moment = input.transverse_moment_tm();
    let list = transverse_moment
        .map(|moment| heel_angle_from_moment(moment, new_displacement, new_gm))
        .transpose()?;

    if new_gm <= 0.0 {
        warn!(new_gm_m = new_gm, "loading leaves the vessel with no positive GM");
    }
    debug!(
        loads = input.loads.len(),
        new_displacement_t = new_displacement,
        new_kg_m = kg,
        new_gm_m = new_gm,
        "loading calculated"
    );

    Ok(LoadingResult {
        new_displacement_t: new_displacement,
        new_kg_m: kg,
        new_gm_m: new_gm,
        gm_change_m: new_gm - vessel.gm(),
        transverse_moment_tm: transverse_moment,
        list,
    })
}

// ============================================================================
// Cargo Shift
// ============================================================================

/// A weight already aboard moved to a new position.
///
/// ## JSON Example
///
/// ```json
/// { "weight_t": 200.0, "vertical_shift_m": 4.0, "horizontal_shift_m": 6.0 }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CargoShiftInput {
    /// Weight moved (t)
    pub weight_t: f64,

    /// Upward movement (m); negative for lowering
    #[serde(default)]
    pub vertical_shift_m: f64,

    /// Transverse movement (m)
    #[serde(default)]
    pub horizontal_shift_m: f64,
}

impl CargoShiftInput {
    /// Validate input parameters.
    pub fn validate(&self) -> CalcResult<()> {
        ensure_non_negative("weight_t", self.weight_t)?;
        ensure_finite("vertical_shift_m", self.vertical_shift_m)?;
        ensure_finite("horizontal_shift_m", self.horizontal_shift_m)?;
        if self.vertical_shift_m == 0.0 && self.horizontal_shift_m == 0.0 {
            return Err(CalcError::missing_field("vertical_shift_m or horizontal_shift_m"));
        }
        Ok(())
    }
}

/// Effect of a cargo shift.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CargoShiftResult {
    /// GM change from the vertical component (m)
    pub gm_change_m: f64,

    pub new_gm_m: f64,

    /// Transverse shift of G, GG₁ (m)
    pub transverse_gg1_m: f64,

    /// Righting arm at the resulting heel (m)
    pub gz_m: f64,

    /// Equilibrium heel from the transverse component
    pub heel: HeelAngle,
}

/// Calculate the effect of moving a weight already aboard.
///
/// The vertical component changes GM by −w·d/Δ. The transverse component
/// produces GG₁ = w·d/Δ and heel φ = atan(GG₁ / GM) with the new GM.
pub fn calculate_shift(vessel: &VesselState, input: &CargoShiftInput) -> CalcResult<CargoShiftResult> {
    vessel.validate()?;
    input.validate()?;

    let displacement = vessel.displacement_t;
    let gm_change = gm_change_from_shift(input.weight_t, input.vertical_shift_m, displacement)?;
    let new_gm = vessel.gm() + gm_change;
    let gg1 = centre_of_gravity_shift(input.weight_t, input.horizontal_shift_m, displacement)?;
    let heel = heel_angle_from_gz(gg1, new_gm)?;
    let gz = gz_from_moment(input.weight_t, input.horizontal_shift_m, displacement, new_gm)?;

    if heel.is_capsize() {
        warn!(new_gm_m = new_gm, "cargo shift leaves the vessel with no positive GM");
    }
    debug!(gm_change_m = gm_change, gg1_m = gg1, heel_deg = heel.degrees(), "cargo shift calculated");

    Ok(CargoShiftResult {
        gm_change_m: gm_change,
        new_gm_m: new_gm,
        transverse_gg1_m: gg1,
        gz_m: gz,
        heel,
    })
}
