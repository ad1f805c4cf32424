//! # Crane and Derrick Lifts
//!
//! GM while a load hangs from the hook, and the list it causes when swung
//! outboard.
//!
//! ```text
//!            ┌────────── jib head (hook height)
//!            │        ╲
//!            │         ╲  outreach
//!            │          ●  load
//!   ─────────┴──────────────
//! ```
//!
//! ## Example
//!
//! ```rust
//! use stab_core::calculations::crane::{calculate, CraneLiftInput};
//! use stab_core::vessel::VesselState;
//!
//! let vessel = VesselState::new(25_000.0, 8.5, 7.2);
//! let input = CraneLiftInput::new(50.0, 25.0, 5.0);
//! let result = calculate(&vessel, &input).unwrap();
//! assert!((result.gm_change_m + 0.7984).abs() < 1e-4);
//! ```

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::equations::stability::{crane_gm_change, heel_angle_from_moment, HeelAngle};
use crate::errors::{ensure_finite, ensure_non_negative, CalcResult};
use crate::vessel::VesselState;

/// A load suspended from a shipboard crane.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CraneLiftInput {
    /// Weight of the load (t)
    pub weight_t: f64,

    /// Height of the hook / jib head above keel (m)
    pub hook_height_m: f64,

    /// Height of the load's centre of gravity above keel before lifting (m)
    pub load_height_m: f64,

    /// Transverse distance of the hook from the centreline (m)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub outreach_m: Option<f64>,
}

impl CraneLiftInput {
    /// Lift with no outreach
    pub fn new(weight_t: f64, hook_height_m: f64, load_height_m: f64) -> Self {
        CraneLiftInput {
            weight_t,
            hook_height_m,
            load_height_m,
            outreach_m: None,
        }
    }

    /// Set the outreach (builder pattern)
    pub fn with_outreach(mut self, outreach_m: f64) -> Self {
        self.outreach_m = Some(outreach_m);
        self
    }

    /// Validate input parameters.
    pub fn validate(&self) -> CalcResult<()> {
        ensure_non_negative("weight_t", self.weight_t)?;
        ensure_finite("hook_height_m", self.hook_height_m)?;
        ensure_finite("load_height_m", self.load_height_m)?;
        if let Some(outreach) = self.outreach_m {
            ensure_finite("outreach_m", outreach)?;
        }
        Ok(())
    }
}

/// Condition while the load is on the hook.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CraneLiftResult {
    /// Virtual rise of G (m)
    pub virtual_kg_rise_m: f64,

    /// Change in GM; the negative of the rise (m)
    pub gm_change_m: f64,

    pub new_gm_m: f64,

    /// List with the load at the outreach; absent without an outreach
    #[serde(skip_serializing_if = "Option::is_none")]
    pub heel: Option<HeelAngle>,
}

/// Calculate the effect of a crane lift.
pub fn calculate(vessel: &VesselState, input: &CraneLiftInput) -> CalcResult<CraneLiftResult> {
    vessel.validate()?;
    input.validate()?;

    let gm_change = crane_gm_change(
        input.weight_t,
        input.hook_height_m,
        input.load_height_m,
        vessel.displacement_t,
    )?;
    let new_gm = vessel.gm() + gm_change;

    // the load is aboard once it leaves the deck, so displacement includes it
    let heel = input
        .outreach_m
        .map(|outreach| heel_angle_from_moment(input.weight_t * outreach, vessel.displacement_t + input.weight_t, new_gm))
        .transpose()?;

    if new_gm <= 0.0 {
        warn!(new_gm_m = new_gm, "lift leaves the vessel with no positive GM");
    }
    debug!(gm_change_m = gm_change, new_gm_m = new_gm, "crane lift calculated");

    Ok(CraneLiftResult {
        virtual_kg_rise_m: -gm_change,
        gm_change_m: gm_change,
        new_gm_m: new_gm,
        heel,
    })
}
