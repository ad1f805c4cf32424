//! # Vessel State and Loading Descriptors
//!
//! Value types describing the ship for one calculation request. They are
//! created fresh per request and never mutated by the engine; operations that
//! "change" KG or GM return new values.
//!
//! ```text
//!            M  ─┬─  metacentre
//!                │ GM = KM − KG
//!            G  ─┼─  centre of gravity
//!                │
//!   ─────────────┼──────────── waterline
//!            B   │
//!            K  ─┴─  keel
//! ```
//!
//! ## Example
//!
//! ```rust
//! use stab_core::vessel::VesselState;
//!
//! let vessel = VesselState::new(25_000.0, 8.5, 7.2);
//! assert!((vessel.gm() - 1.3).abs() < 1e-9);
//! ```

use serde::{Deserialize, Serialize};

use crate::errors::{ensure_finite, ensure_non_negative, ensure_positive, ensure_ratio, CalcResult};
use crate::units::{Metres, TonneMetres, Tonnes};

/// Basic hydrostatic state of the vessel.
///
/// ## JSON Example
///
/// ```json
/// { "displacement_t": 25000.0, "km_m": 8.5, "kg_m": 7.2 }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VesselState {
    /// Displacement in tonnes (must be positive)
    pub displacement_t: f64,

    /// Height of the transverse metacentre above keel (m)
    pub km_m: f64,

    /// Height of the centre of gravity above keel (m)
    pub kg_m: f64,
}

impl VesselState {
    /// Create a vessel state from displacement, KM and KG.
    pub fn new(displacement_t: f64, km_m: f64, kg_m: f64) -> Self {
        VesselState {
            displacement_t,
            km_m,
            kg_m,
        }
    }

    /// Validate input parameters.
    pub fn validate(&self) -> CalcResult<()> {
        ensure_positive("displacement_t", self.displacement_t)?;
        ensure_finite("km_m", self.km_m)?;
        ensure_finite("kg_m", self.kg_m)?;
        Ok(())
    }

    /// Metacentric height GM = KM − KG.
    ///
    /// Negative values are valid and describe an unstable vessel.
    pub fn gm(&self) -> f64 {
        self.km_m - self.kg_m
    }

    /// Vertical moment about the keel, Δ × KG
    pub fn vertical_moment(&self) -> TonneMetres {
        Tonnes(self.displacement_t) * Metres(self.kg_m)
    }

    /// Same hull and KM with a different displacement and KG.
    pub fn with_weight(&self, displacement_t: f64, kg_m: f64) -> Self {
        VesselState {
            displacement_t,
            km_m: self.km_m,
            kg_m,
        }
    }
}

/// A weight loaded (positive) or discharged (negative) at a given height.
///
/// ## JSON Example
///
/// ```json
/// { "weight_t": 120.0, "kg_m": 9.4, "horizontal_lever_m": 3.0 }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LoadItem {
    /// Weight in tonnes; negative for discharge
    pub weight_t: f64,

    /// Height of the load's centre of gravity above keel (m)
    pub kg_m: f64,

    /// Transverse distance of the load from the centreline (m)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub horizontal_lever_m: Option<f64>,

    /// Vertical distance the load is moved once aboard, positive upwards (m)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vertical_lever_m: Option<f64>,
}

impl LoadItem {
    /// Load at a height with no transverse or shift levers
    pub fn new(weight_t: f64, kg_m: f64) -> Self {
        LoadItem {
            weight_t,
            kg_m,
            horizontal_lever_m: None,
            vertical_lever_m: None,
        }
    }

    /// Set the transverse lever (builder pattern)
    pub fn with_horizontal_lever(mut self, lever_m: f64) -> Self {
        self.horizontal_lever_m = Some(lever_m);
        self
    }

    /// Set the vertical shift lever (builder pattern)
    pub fn with_vertical_lever(mut self, lever_m: f64) -> Self {
        self.vertical_lever_m = Some(lever_m);
        self
    }

    /// Validate input parameters.
    pub fn validate(&self) -> CalcResult<()> {
        ensure_finite("weight_t", self.weight_t)?;
        ensure_finite("kg_m", self.kg_m)?;
        if let Some(lever) = self.horizontal_lever_m {
            ensure_finite("horizontal_lever_m", lever)?;
        }
        if let Some(lever) = self.vertical_lever_m {
            ensure_finite("vertical_lever_m", lever)?;
        }
        Ok(())
    }
}

/// A rectangular tank, used for free-surface estimates.
///
/// Only slack tanks (0 < fill ratio < 1) have a free surface; empty and
/// pressed-up tanks contribute nothing.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TankState {
    /// Tank length (m)
    pub length_m: f64,

    /// Tank breadth (m), the dimension the liquid sloshes across
    pub breadth_m: f64,

    /// Fill ratio 0..=1
    pub fill_ratio: f64,

    /// Liquid density (t/m³)
    #[serde(default = "default_fluid_density")]
    pub fluid_density_t_m3: f64,
}

fn default_fluid_density() -> f64 {
    crate::settings::SEAWATER_DENSITY_T_M3
}

impl TankState {
    /// Create a tank description
    pub fn new(length_m: f64, breadth_m: f64, fill_ratio: f64, fluid_density_t_m3: f64) -> Self {
        TankState {
            length_m,
            breadth_m,
            fill_ratio,
            fluid_density_t_m3,
        }
    }

    /// Validate input parameters.
    pub fn validate(&self) -> CalcResult<()> {
        ensure_non_negative("length_m", self.length_m)?;
        ensure_non_negative("breadth_m", self.breadth_m)?;
        ensure_ratio("fill_ratio", self.fill_ratio)?;
        ensure_non_negative("fluid_density_t_m3", self.fluid_density_t_m3)?;
        Ok(())
    }

    /// True when the tank is partially filled and has a free surface.
    pub fn is_slack(&self) -> bool {
        self.fill_ratio > 0.0 && self.fill_ratio < 1.0
    }
}
