//! # Free Surface Effect
//!
//! Per-tank breakdown of the free-surface correction and the fluid GM that
//! results.
//!
//! ```text
//!   ┌──────────────┐
//!   │~~~~~~~~~~~~~~│  slack tank: liquid flows to the low side
//!   │              │  G rises virtually by Σ Ixx·ρ / Δ
//!   └──────────────┘
//! ```

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::equations::stability::{gm_reduction_from_fsm, tank_free_surface_moment, tank_surface_inertia};
use crate::errors::CalcResult;
use crate::vessel::{TankState, VesselState};

/// Tanks to include.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FreeSurfaceInput {
    pub tanks: Vec<TankState>,
}

impl FreeSurfaceInput {
    /// Validate input parameters.
    pub fn validate(&self) -> CalcResult<()> {
        for tank in &self.tanks {
            tank.validate()?;
        }
        Ok(())
    }
}

/// One tank's share of the correction.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TankContribution {
    /// Position of the tank in the input list
    pub index: usize,
    pub is_slack: bool,
    /// Second moment of the free surface (m⁴); 0 for non-slack tanks
    pub inertia_m4: f64,
    pub fsm_tm: f64,
    pub correction_m: f64,
    /// Share of the total FSM (%)
    pub share_percent: f64,
}

/// Free-surface breakdown.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FreeSurfaceResult {
    pub tanks: Vec<TankContribution>,
    pub total_fsm_tm: f64,
    /// Virtual rise of G (m)
    pub correction_m: f64,
    pub gm_solid_m: f64,
    pub gm_fluid_m: f64,
    /// Correction as a percentage of solid GM; absent when solid GM ≤ 0
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reduction_percent: Option<f64>,
    pub slack_tank_count: usize,
}

/// Calculate the free-surface correction for a set of tanks.
pub fn calculate(vessel: &VesselState, input: &FreeSurfaceInput) -> CalcResult<FreeSurfaceResult> {
    vessel.validate()?;
    input.validate()?;

    let moments: Vec<f64> = input
        .tanks
        .iter()
        .map(tank_free_surface_moment)
        .collect::<CalcResult<_>>()?;
    let total_fsm: f64 = moments.iter().sum();

    let mut tanks = Vec::with_capacity(input.tanks.len());
    for (index, (tank, fsm)) in input.tanks.iter().zip(&moments).enumerate() {
        tanks.push(TankContribution {
            index,
            is_slack: tank.is_slack(),
            inertia_m4: if tank.is_slack() {
                tank_surface_inertia(tank.length_m, tank.breadth_m)
            } else {
                0.0
            },
            fsm_tm: *fsm,
            correction_m: gm_reduction_from_fsm(*fsm, vessel.displacement_t)?,
            share_percent: if total_fsm > 0.0 { fsm / total_fsm * 100.0 } else { 0.0 },
        });
    }

    let correction = gm_reduction_from_fsm(total_fsm, vessel.displacement_t)?;
    let gm_solid = vessel.gm();
    let gm_fluid = gm_solid - correction;
    let reduction_percent = (gm_solid > 0.0).then(|| correction / gm_solid * 100.0);

    if gm_solid > 0.0 && gm_fluid <= 0.0 {
        warn!(gm_solid_m = gm_solid, gm_fluid_m = gm_fluid, "free surface removes all positive GM");
    }
    debug!(total_fsm_tm = total_fsm, correction_m = correction, "free surface calculated");

    Ok(FreeSurfaceResult {
        slack_tank_count: tanks.iter().filter(|t| t.is_slack).count(),
        tanks,
        total_fsm_tm: total_fsm,
        correction_m: correction,
        gm_solid_m: gm_solid,
        gm_fluid_m: gm_fluid,
        reduction_percent,
    })
}
