//! # Transverse Stability Formulas
//!
//! Closed-form relations for initial (small-angle) transverse stability.
//! Every function is pure: inputs in, value out, no retained state.
//!
//! ## Notation
//!
//! - `Δ` = Displacement (t)
//! - `KM`, `KG`, `KB` = Heights of metacentre, centre of gravity and centre of buoyancy above keel (m)
//! - `GM` = Metacentric height, KM − KG (m)
//! - `GZ` = Righting arm at heel φ (m)
//! - `KN` = Cross-curve ordinate at heel φ (m)
//! - `w`, `d` = Weight (t) and lever (m) of a load or shift
//! - `FSM` = Free surface moment (t·m)
//!
//! ## Sign Conventions
//!
//! - Heel angles are degrees, positive to the side of the heeling moment
//! - A negative ΔGM is a loss of stability
//! - GM ≤ 0 is a valid result (unstable vessel); formulas that divide by GM
//!   return a defined sentinel instead of an error
//!
//! ## References
//!
//! - IMO International Code on Intact Stability (2008 IS Code), Part A
//! - Derrett & Barrass, Ship Stability for Masters and Mates, 7th Edition

use serde::{Deserialize, Serialize};

use crate::errors::{ensure_finite, ensure_non_negative, ensure_positive, CalcError, CalcResult};
use crate::units::{Degrees, Radians};
use crate::vessel::{LoadItem, TankState, VesselState};

/// Heel angle reported by the equilibrium formulas.
///
/// When GM ≤ 0 there is no upright equilibrium to solve for, so the angle is
/// reported as [`HeelAngle::Capsize`], which reads as 90°.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", content = "degrees")]
pub enum HeelAngle {
    /// Equilibrium heel in degrees
    Inclined(f64),
    /// Vessel has no positive initial stability
    Capsize,
}

impl HeelAngle {
    /// Angle used by the capsize sentinel
    pub const CAPSIZE_DEG: f64 = 90.0;

    /// Heel in degrees; 90° for [`HeelAngle::Capsize`]
    pub fn degrees(&self) -> f64 {
        match self {
            HeelAngle::Inclined(deg) => *deg,
            HeelAngle::Capsize => Self::CAPSIZE_DEG,
        }
    }

    /// True when the vessel has no positive initial stability
    pub fn is_capsize(&self) -> bool {
        matches!(self, HeelAngle::Capsize)
    }
}

// =============================================================================
// METACENTRIC HEIGHT AND CENTRE OF GRAVITY
// =============================================================================

/// Metacentric height of a vessel state
///
/// # Formula
/// GM = KM − KG
///
/// # Example
/// ```rust
/// use stab_core::equations::stability::compute_gm;
/// use stab_core::vessel::VesselState;
///
/// let gm = compute_gm(&VesselState::new(25_000.0, 8.5, 7.2));
/// assert!((gm - 1.3).abs() < 1e-9);
/// ```
#[inline]
pub fn compute_gm(state: &VesselState) -> f64 {
    state.km_m - state.kg_m
}

/// New KG after loading or discharging weights
///
/// # Formula
/// ```text
/// KG' = (Δ·KG + Σ w·kg) / (Δ + Σ w)
/// ```
///
/// An empty load list returns the original KG.
///
/// # Errors
/// `InvalidInput` when the vessel state is invalid, any load value is
/// non-finite, or the resulting total weight is zero or negative.
pub fn new_kg(state: &VesselState, loads: &[LoadItem]) -> CalcResult<f64> {
    state.validate()?;

    let mut total_moment = state.vertical_moment().0;
    let mut total_weight = state.displacement_t;
    for load in loads {
        load.validate()?;
        total_moment += load.weight_t * load.kg_m;
        total_weight += load.weight_t;
    }

    if total_weight <= 0.0 {
        return Err(CalcError::invalid_input(
            "total_weight_t",
            total_weight.to_string(),
            "Total weight after loading must be positive",
        ));
    }

    Ok(total_moment / total_weight)
}

/// GM change from moving a weight through an adverse lever
///
/// # Formula
/// ΔGM = −(w × d) / Δ
///
/// A positive `distance_m` (e.g. a weight raised) reduces GM.
pub fn gm_change_from_shift(weight_t: f64, distance_m: f64, displacement_t: f64) -> CalcResult<f64> {
    ensure_finite("weight_t", weight_t)?;
    ensure_finite("distance_m", distance_m)?;
    ensure_positive("displacement_t", displacement_t)?;
    Ok(-(weight_t * distance_m) / displacement_t)
}

/// Shift of G caused by moving a weight, GG₁ = w·d / Δ
pub fn centre_of_gravity_shift(weight_t: f64, distance_m: f64, displacement_t: f64) -> CalcResult<f64> {
    ensure_finite("weight_t", weight_t)?;
    ensure_finite("distance_m", distance_m)?;
    ensure_positive("displacement_t", displacement_t)?;
    Ok(weight_t * distance_m / displacement_t)
}

/// KM from the centre of buoyancy and metacentric radius, KM = KB + BM
#[inline]
pub fn km_from_kb_bm(kb_m: f64, bm_m: f64) -> f64 {
    kb_m + bm_m
}

/// Transverse metacentric radius from waterplane inertia
///
/// # Formula
/// BM = I / ∇
///
/// # Arguments
/// * `inertia_m4` - Transverse second moment of the waterplane (m⁴)
/// * `displaced_volume_m3` - Underwater volume (m³)
pub fn bm_from_inertia(inertia_m4: f64, displaced_volume_m3: f64) -> CalcResult<f64> {
    ensure_finite("inertia_m4", inertia_m4)?;
    ensure_positive("displaced_volume_m3", displaced_volume_m3)?;
    Ok(inertia_m4 / displaced_volume_m3)
}

// =============================================================================
// HEEL AND RIGHTING ARM
// =============================================================================

/// Equilibrium heel angle for a given righting arm
///
/// # Formula
/// φ = atan(GZ / GM)
///
/// Returns [`HeelAngle::Capsize`] (90°) when GM ≤ 0.
///
/// # Errors
/// `InvalidInput` when either argument is non-finite.
///
/// # Example
/// ```rust
/// use stab_core::equations::stability::{heel_angle_from_gz, HeelAngle};
///
/// assert_eq!(heel_angle_from_gz(0.1, 0.0).unwrap(), HeelAngle::Capsize);
/// let heel = heel_angle_from_gz(1.0, 1.0).unwrap().degrees();
/// assert!((heel - 45.0).abs() < 1e-9);
/// ```
pub fn heel_angle_from_gz(gz_m: f64, gm_m: f64) -> CalcResult<HeelAngle> {
    ensure_finite("gz_m", gz_m)?;
    ensure_finite("gm_m", gm_m)?;
    if gm_m <= 0.0 {
        return Ok(HeelAngle::Capsize);
    }
    Ok(HeelAngle::Inclined((gz_m / gm_m).atan().to_degrees()))
}

/// Equilibrium heel angle for a heeling moment
///
/// # Formula
/// φ = atan(M / (Δ × GM))
///
/// Returns [`HeelAngle::Capsize`] when GM ≤ 0.
pub fn heel_angle_from_moment(moment_tm: f64, displacement_t: f64, gm_m: f64) -> CalcResult<HeelAngle> {
    ensure_finite("moment_tm", moment_tm)?;
    ensure_positive("displacement_t", displacement_t)?;
    ensure_finite("gm_m", gm_m)?;
    if gm_m <= 0.0 {
        return Ok(HeelAngle::Capsize);
    }
    Ok(HeelAngle::Inclined((moment_tm / (displacement_t * gm_m)).atan().to_degrees()))
}

/// Righting arm produced by a heeling moment w × d
///
/// The equilibrium heel is found from the ratio of heeling to righting
/// moment, then GZ = GM · sin φ.
///
/// ```text
/// φ  = atan(w·d / (Δ·GM))
/// GZ = GM · sin φ
/// ```
///
/// Returns 0 when GM ≤ 0.
pub fn gz_from_moment(weight_t: f64, distance_m: f64, displacement_t: f64, gm_m: f64) -> CalcResult<f64> {
    ensure_finite("weight_t", weight_t)?;
    ensure_finite("distance_m", distance_m)?;
    match heel_angle_from_moment(weight_t * distance_m, displacement_t, gm_m)? {
        HeelAngle::Capsize => Ok(0.0),
        HeelAngle::Inclined(deg) => Ok(gm_m * Degrees(deg).sin()),
    }
}

/// Righting arm from a cross-curve (KN) ordinate
///
/// # Formula
/// GZ = KN − KG · sin φ
#[inline]
pub fn gz_from_kn(kn_m: f64, kg_m: f64, heel_deg: f64) -> f64 {
    kn_m - kg_m * Degrees(heel_deg).sin()
}

/// Small-angle righting arm, GZ = GM · sin φ
#[inline]
pub fn gz_small_angle(gm_m: f64, heel_deg: f64) -> f64 {
    gm_m * Degrees(heel_deg).sin()
}

/// Righting moment RM = Δ × GZ (t·m)
#[inline]
pub fn righting_moment(displacement_t: f64, gz_m: f64) -> f64 {
    displacement_t * gz_m
}

// =============================================================================
// SUSPENDED LOADS
// =============================================================================

/// GM change while a load hangs from a crane or derrick head
///
/// The load is treated as acting at the hook: its weight is lifted virtually
/// through the whole hoist height the moment it leaves the deck.
///
/// ```text
///        ┌── hook (h_hook)
///        │
///        ▼
///       [w]  load (h_load)
/// ```
///
/// # Formula
/// ```text
/// virtual KG rise = w × (h_hook − h_load)² / (Δ + w)
/// ΔGM             = −virtual KG rise
/// ```
///
/// This exact expression is kept for parity with reference calculations. A
/// zero weight gives zero change at any heights.
///
/// # Example
/// ```rust
/// use stab_core::equations::stability::crane_gm_change;
///
/// let dgm = crane_gm_change(50.0, 25.0, 5.0, 25_000.0).unwrap();
/// assert!((dgm + 0.7984).abs() < 1e-4);
/// ```
pub fn crane_gm_change(weight_t: f64, hook_height_m: f64, load_height_m: f64, displacement_t: f64) -> CalcResult<f64> {
    ensure_non_negative("weight_t", weight_t)?;
    ensure_finite("hook_height_m", hook_height_m)?;
    ensure_finite("load_height_m", load_height_m)?;
    ensure_positive("displacement_t", displacement_t)?;

    let hoist_m = hook_height_m - load_height_m;
    let virtual_kg_rise = weight_t * hoist_m.powi(2) / (displacement_t + weight_t);
    Ok(-virtual_kg_rise)
}

// =============================================================================
// FREE SURFACE
// =============================================================================

/// Second moment of a rectangular free surface about its centreline
///
/// # Formula
/// Ixx = l × b³ / 12
#[inline]
pub fn tank_surface_inertia(length_m: f64, breadth_m: f64) -> f64 {
    length_m * breadth_m.powi(3) / 12.0
}

/// Free surface moment of one tank (t·m)
///
/// # Formula
/// FSM = Ixx × ρ
///
/// Empty and pressed-up tanks (fill ratio outside (0, 1)) return 0.
pub fn tank_free_surface_moment(tank: &TankState) -> CalcResult<f64> {
    tank.validate()?;
    if !tank.is_slack() {
        return Ok(0.0);
    }
    Ok(tank_surface_inertia(tank.length_m, tank.breadth_m) * tank.fluid_density_t_m3)
}

/// Total free surface moment of a set of tanks (t·m)
pub fn free_surface_moment_tm(tanks: &[TankState]) -> CalcResult<f64> {
    tanks.iter().map(tank_free_surface_moment).sum()
}

/// GM reduction caused by a free surface moment
///
/// # Formula
/// GG' = FSM / Δ
pub fn gm_reduction_from_fsm(fsm_tm: f64, displacement_t: f64) -> CalcResult<f64> {
    ensure_non_negative("fsm_tm", fsm_tm)?;
    ensure_positive("displacement_t", displacement_t)?;
    Ok(fsm_tm / displacement_t)
}

/// Free-surface correction to GM for a set of tanks (m)
///
/// ```text
/// Σ (l·b³/12 × ρ / Δ)   over tanks with 0 < fill < 1
/// ```
///
/// The result is the virtual rise of G, i.e. the amount subtracted from GM.
///
/// # Example
/// ```rust
/// use stab_core::equations::stability::free_surface_moment;
/// use stab_core::vessel::TankState;
///
/// let tanks = [
///     TankState::new(12.0, 10.0, 0.5, 1.025),
///     TankState::new(12.0, 10.0, 1.0, 1.025), // pressed up
/// ];
/// let fsm = free_surface_moment(&tanks, 10_000.0).unwrap();
/// assert!((fsm - 12.0 * 1000.0 / 12.0 * 1.025 / 10_000.0).abs() < 1e-12);
/// ```
pub fn free_surface_moment(tanks: &[TankState], displacement_t: f64) -> CalcResult<f64> {
    ensure_positive("displacement_t", displacement_t)?;
    tanks
        .iter()
        .map(|tank| gm_reduction_from_fsm(tank_free_surface_moment(tank)?, displacement_t))
        .sum()
}

// =============================================================================
// ROLLING AND HEEL MEASUREMENT
// =============================================================================

/// Natural roll period
///
/// # Formula
/// T = C × B / √GM
///
/// # Returns
/// `None` when GM ≤ 0, since there is no natural period without positive
/// initial stability.
pub fn roll_period(form_coefficient: f64, breadth_m: f64, gm_m: f64) -> CalcResult<Option<f64>> {
    ensure_positive("form_coefficient", form_coefficient)?;
    ensure_positive("breadth_m", breadth_m)?;
    ensure_finite("gm_m", gm_m)?;
    if gm_m <= 0.0 {
        return Ok(None);
    }
    Ok(Some(form_coefficient * breadth_m / gm_m.sqrt()))
}

/// Heel angle measured with a pendulum (plumb line)
///
/// ```text
///    ┬  suspension point
///    │\
///  L │ \
///    │  \
///    ┴───●  deflection d
/// ```
///
/// # Formula
/// φ = asin(d / L)
///
/// # Errors
/// `InvalidInput` when L ≤ 0 or |d| > L.
///
/// # Example
/// ```rust
/// use stab_core::equations::stability::pendulum_heel_angle;
///
/// let heel = pendulum_heel_angle(1.0, 0.1).unwrap();
/// assert!((heel - 5.739).abs() < 1e-3);
/// ```
pub fn pendulum_heel_angle(pendulum_length_m: f64, deflection_m: f64) -> CalcResult<f64> {
    ensure_positive("pendulum_length_m", pendulum_length_m)?;
    ensure_finite("deflection_m", deflection_m)?;
    if deflection_m.abs() > pendulum_length_m {
        return Err(CalcError::invalid_input(
            "deflection_m",
            deflection_m.to_string(),
            "Deflection cannot exceed the pendulum length",
        ));
    }
    let heel: Degrees = Radians((deflection_m / pendulum_length_m).asin()).into();
    Ok(heel.0)
}

/// Pendulum deflection for a known heel, d = L · sin φ
pub fn pendulum_deflection(pendulum_length_m: f64, heel_deg: f64) -> CalcResult<f64> {
    ensure_positive("pendulum_length_m", pendulum_length_m)?;
    ensure_finite("heel_deg", heel_deg)?;
    Ok(pendulum_length_m * Degrees(heel_deg).sin())
}

// =============================================================================
// DRAFT
// =============================================================================

/// Parallel sinkage in centimetres, w / TPC
pub fn parallel_sinkage_cm(weight_t: f64, tpc_t_per_cm: f64) -> CalcResult<f64> {
    ensure_finite("weight_t", weight_t)?;
    ensure_positive("tpc_t_per_cm", tpc_t_per_cm)?;
    Ok(weight_t / tpc_t_per_cm)
}
