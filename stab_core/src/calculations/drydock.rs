//! # Drydock Stability
//!
//! Minimum GM while the vessel's weight transfers onto keel blocks.
//!
//! ## Simplified Model
//!
//! ```text
//! critical GM = 0.05 + (mean spacing between consecutive supports) / 100
//! ```
//!
//! This is a placeholder rule of thumb carried for parity with existing
//! results. It is not a structural analysis of the block layout.
//!
//! When the stern-frame upthrust P at the critical instant is known, the
//! classic virtual loss of GM is also reported:
//!
//! ```text
//! GM loss = P × KM / Δ
//! ```

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::errors::{ensure_finite, ensure_non_negative, ensure_positive, CalcError, CalcResult};
use crate::settings::GRAVITY_M_S2;
use crate::vessel::VesselState;

/// Base critical GM before the spacing term (m)
pub const BASE_CRITICAL_GM_M: f64 = 0.05;

/// Current GM at or above this multiple of critical is "very safe"
pub const VERY_SAFE_RATIO: f64 = 1.5;

/// Keel-block positions along the keel.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DrydockSupportLayout {
    /// Distance of each support from a common reference (m), any order
    pub support_positions_m: Vec<f64>,
}

impl DrydockSupportLayout {
    /// Validate input parameters.
    pub fn validate(&self) -> CalcResult<()> {
        if self.support_positions_m.len() < 2 {
            return Err(CalcError::insufficient_samples(
                "drydock support layout",
                "at least 2 supports",
                self.support_positions_m.len(),
            ));
        }
        for position in &self.support_positions_m {
            ensure_finite("support_positions_m", *position)?;
        }
        Ok(())
    }

    /// Distances between consecutive supports after sorting
    pub fn spacings(&self) -> Vec<f64> {
        let mut sorted = self.support_positions_m.clone();
        sorted.sort_by(f64::total_cmp);
        sorted.windows(2).map(|pair| pair[1] - pair[0]).collect()
    }

    /// Mean spacing between consecutive supports (m)
    pub fn average_spacing(&self) -> CalcResult<f64> {
        self.validate()?;
        let spacings = self.spacings();
        Ok(spacings.iter().sum::<f64>() / spacings.len() as f64)
    }

    /// Largest spacing between consecutive supports (m)
    pub fn max_spacing(&self) -> CalcResult<f64> {
        self.validate()?;
        Ok(self.spacings().into_iter().fold(0.0, f64::max))
    }
}

/// Critical GM for a support layout.
///
/// # Example
/// ```rust
/// use stab_core::calculations::drydock::{critical_gm, DrydockSupportLayout};
///
/// let layout = DrydockSupportLayout { support_positions_m: vec![0.0, 10.0, 20.0, 30.0] };
/// assert!((critical_gm(&layout).unwrap() - 0.15).abs() < 1e-12);
/// ```
pub fn critical_gm(layout: &DrydockSupportLayout) -> CalcResult<f64> {
    Ok(BASE_CRITICAL_GM_M + layout.average_spacing()? / 100.0)
}

/// Docking operation inputs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DrydockInput {
    pub layout: DrydockSupportLayout,

    /// Length overall, enables the support spacing check (m)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vessel_length_m: Option<f64>,

    /// Stern-frame upthrust at the critical instant (t)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub upthrust_t: Option<f64>,
}

impl DrydockInput {
    /// Validate input parameters.
    pub fn validate(&self) -> CalcResult<()> {
        self.layout.validate()?;
        if let Some(length) = self.vessel_length_m {
            ensure_positive("vessel_length_m", length)?;
        }
        if let Some(upthrust) = self.upthrust_t {
            ensure_non_negative("upthrust_t", upthrust)?;
        }
        Ok(())
    }
}

/// Safety band of the current GM relative to critical.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DrydockAssessment {
    /// GM ≥ 1.5 × critical
    VerySafe,
    /// critical ≤ GM < 1.5 × critical
    Safe,
    /// GM < critical
    Risky,
}

/// Docking assessment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DrydockResult {
    pub critical_gm_m: f64,
    pub current_gm_m: f64,
    /// current − critical (m)
    pub safety_margin_m: f64,
    /// current / critical
    pub gm_ratio: f64,
    pub average_spacing_m: f64,
    pub max_spacing_m: f64,
    pub support_count: usize,
    /// Δ × critical GM × g (kN·m)
    pub critical_heeling_moment_knm: f64,
    pub assessment: DrydockAssessment,

    /// Largest spacing above a quarter of the vessel length; absent without a length
    #[serde(skip_serializing_if = "Option::is_none")]
    pub spacing_exceeds_quarter_length: Option<bool>,

    /// Virtual GM loss from the upthrust (m)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub upthrust_gm_loss_m: Option<f64>,

    /// GM remaining at the critical instant (m)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub effective_gm_m: Option<f64>,
}

/// Assess a docking operation.
pub fn calculate(vessel: &VesselState, input: &DrydockInput) -> CalcResult<DrydockResult> {
    vessel.validate()?;
    input.validate()?;

    let critical = critical_gm(&input.layout)?;
    let current = vessel.gm();
    let average_spacing = input.layout.average_spacing()?;
    let max_spacing = input.layout.max_spacing()?;

    let assessment = if current >= critical * VERY_SAFE_RATIO {
        DrydockAssessment::VerySafe
    } else if current >= critical {
        DrydockAssessment::Safe
    } else {
        DrydockAssessment::Risky
    };

    let upthrust_gm_loss = input
        .upthrust_t
        .map(|upthrust| upthrust * vessel.km_m / vessel.displacement_t);

    if assessment == DrydockAssessment::Risky {
        warn!(current_gm_m = current, critical_gm_m = critical, "GM below drydock critical value");
    }
    debug!(critical_gm_m = critical, supports = input.layout.support_positions_m.len(), "drydock assessed");

    Ok(DrydockResult {
        critical_gm_m: critical,
        current_gm_m: current,
        safety_margin_m: current - critical,
        gm_ratio: current / critical,
        average_spacing_m: average_spacing,
        max_spacing_m: max_spacing,
        support_count: input.layout.support_positions_m.len(),
        critical_heeling_moment_knm: vessel.displacement_t * critical * GRAVITY_M_S2,
        assessment,
        spacing_exceeds_quarter_length: input.vessel_length_m.map(|length| max_spacing > length / 4.0),
        upthrust_gm_loss_m: upthrust_gm_loss,
        effective_gm_m: upthrust_gm_loss.map(|loss| current - loss),
    })
}
