//! # Damage Stability
//!
//! Residual stability after one compartment floods, using the added-weight
//! method with simplified draft, KM and free-surface terms.
//!
//! ## Model
//!
//! ```text
//! flood weight  w   = V × μ × ρ
//! Δ'                = Δ + w
//! KG'               = (Δ·KG + w·kg) / Δ'
//! draft'            = draft + w / TPC
//! KM'               = KM + (draft' − draft) × k
//! free surface      = V × f / Δ'
//! residual GM       = KM' − KG' − free surface
//! heel              = atan(w × offset / (Δ' × residual GM))
//! ```
//!
//! `ρ`, `TPC`, `k`, `f` and the default offset come from
//! [`StabilitySettings`]. The draft term divides tonnes by t/cm and adds the
//! result to a draft in metres unchanged; it is kept that way so results
//! match existing reference figures.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::equations::stability::{heel_angle_from_moment, new_kg, HeelAngle};
use crate::errors::{ensure_finite, ensure_non_negative, ensure_ratio, CalcResult};
use crate::settings::StabilitySettings;
use crate::vessel::{LoadItem, VesselState};

/// Residual GM needed for a "safe" verdict (m)
pub const SAFE_GM_M: f64 = 0.05;
/// Heel allowed for a "safe" verdict (degrees)
pub const SAFE_HEEL_DEG: f64 = 7.0;
/// Residual GM needed for a "marginal" verdict (m)
pub const MARGINAL_GM_M: f64 = 0.01;
/// Heel allowed for a "marginal" verdict (degrees)
pub const MARGINAL_HEEL_DEG: f64 = 12.0;
/// Draft increase flagged as excessive (m)
pub const EXCESSIVE_DRAFT_INCREASE_M: f64 = 1.0;

/// A flooded compartment.
///
/// ## JSON Example
///
/// ```json
/// { "flooded_volume_m3": 500.0, "kg_m": 3.0, "permeability": 0.85 }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DamageCompartment {
    /// Volume open to the sea (m³)
    pub flooded_volume_m3: f64,

    /// Height of the flood water's centre of gravity above keel (m)
    pub kg_m: f64,

    /// Fraction of the volume that can take water, 0..=1
    pub permeability: f64,

    /// Transverse offset of the flood water from the centreline (m)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transverse_offset_m: Option<f64>,
}

impl DamageCompartment {
    /// Validate input parameters.
    pub fn validate(&self) -> CalcResult<()> {
        ensure_non_negative("flooded_volume_m3", self.flooded_volume_m3)?;
        ensure_finite("kg_m", self.kg_m)?;
        ensure_ratio("permeability", self.permeability)?;
        if let Some(offset) = self.transverse_offset_m {
            ensure_finite("transverse_offset_m", offset)?;
        }
        Ok(())
    }

    /// Weight of flood water, V × μ × ρ (t)
    pub fn flood_weight_t(&self, density_t_m3: f64) -> f64 {
        self.flooded_volume_m3 * self.permeability * density_t_m3
    }
}

/// Damage case inputs.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DamageInput {
    pub compartment: DamageCompartment,

    /// Mean draft before flooding (m)
    pub original_draft_m: f64,
}

impl DamageInput {
    /// Validate input parameters.
    pub fn validate(&self) -> CalcResult<()> {
        self.compartment.validate()?;
        ensure_non_negative("original_draft_m", self.original_draft_m)?;
        Ok(())
    }
}

/// Survival verdict.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SurvivalStatus {
    /// GM ≥ 0.05 m and heel ≤ 7°
    Safe,
    /// GM ≥ 0.01 m and heel ≤ 12°
    Marginal,
    Dangerous,
}

impl SurvivalStatus {
    /// Classify a residual GM and heel.
    pub fn classify(residual_gm_m: f64, heel: HeelAngle) -> Self {
        let heel_deg = heel.degrees().abs();
        if residual_gm_m >= SAFE_GM_M && heel_deg <= SAFE_HEEL_DEG {
            SurvivalStatus::Safe
        } else if residual_gm_m >= MARGINAL_GM_M && heel_deg <= MARGINAL_HEEL_DEG {
            SurvivalStatus::Marginal
        } else {
            SurvivalStatus::Dangerous
        }
    }
}

/// Condition after flooding.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DamageResult {
    pub flood_weight_t: f64,
    pub new_displacement_t: f64,
    pub new_kg_m: f64,
    pub new_draft_m: f64,
    pub draft_increase_m: f64,
    pub new_km_m: f64,
    /// Free-surface term from the flooded compartment (m)
    pub free_surface_correction_m: f64,
    /// KM' − KG' − free surface (m)
    pub residual_gm_m: f64,
    /// Heel from asymmetric flooding
    pub heel: HeelAngle,
    pub survival: SurvivalStatus,
    /// residual GM / 0.05 × 100, clamped to 0..=100
    pub survival_ratio_percent: f64,
    /// Draft increase above 1 m
    pub excessive_draft_increase: bool,
}

/// Calculate residual stability after flooding.
///
/// # Example
/// ```rust
/// use stab_core::calculations::damage::{calculate, DamageCompartment, DamageInput};
/// use stab_core::settings::StabilitySettings;
/// use stab_core::vessel::VesselState;
///
/// let vessel = VesselState::new(10_000.0, 8.0, 6.5);
/// let input = DamageInput {
///     compartment: DamageCompartment {
///         flooded_volume_m3: 400.0,
///         kg_m: 3.0,
///         permeability: 0.95,
///         transverse_offset_m: None,
///     },
///     original_draft_m: 7.0,
/// };
/// let result = calculate(&vessel, &input, &StabilitySettings::default()).unwrap();
/// assert!((result.flood_weight_t - 389.5).abs() < 1e-9);
/// ```
pub fn calculate(vessel: &VesselState, input: &DamageInput, settings: &StabilitySettings) -> CalcResult<DamageResult> {
    vessel.validate()?;
    input.validate()?;
    settings.validate()?;

    let compartment = &input.compartment;
    let flood_weight = compartment.flood_weight_t(settings.seawater_density_t_m3);
    let new_displacement = vessel.displacement_t + flood_weight;
    let kg = new_kg(vessel, &[LoadItem::new(flood_weight, compartment.kg_m)])?;

    let draft_increase = flood_weight / settings.assumed_tpc_t_per_cm;
    let new_draft = input.original_draft_m + draft_increase;
    let new_km = vessel.km_m + draft_increase * settings.km_draft_correction;

    let free_surface = compartment.flooded_volume_m3 * settings.damage_free_surface_factor / new_displacement;
    let residual_gm = new_km - kg - free_surface;

    let offset = compartment
        .transverse_offset_m
        .unwrap_or(settings.asymmetric_flooding_offset_m);
    let heel = heel_angle_from_moment(flood_weight * offset, new_displacement, residual_gm)?;

    let survival = SurvivalStatus::classify(residual_gm, heel);
    let survival_ratio = (residual_gm / SAFE_GM_M * 100.0).clamp(0.0, 100.0);

    if survival == SurvivalStatus::Dangerous {
        warn!(residual_gm_m = residual_gm, heel_deg = heel.degrees(), "damage case is not survivable");
    }
    debug!(
        flood_weight_t = flood_weight,
        residual_gm_m = residual_gm,
        ?survival,
        "damage stability calculated"
    );

    Ok(DamageResult {
        flood_weight_t: flood_weight,
        new_displacement_t: new_displacement,
        new_kg_m: kg,
        new_draft_m: new_draft,
        draft_increase_m: draft_increase,
        new_km_m: new_km,
        free_surface_correction_m: free_surface,
        residual_gm_m: residual_gm,
        heel,
        survival,
        survival_ratio_percent: survival_ratio,
        excessive_draft_increase: draft_increase > EXCESSIVE_DRAFT_INCREASE_M,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn compartment(volume: f64, permeability: f64) -> DamageCompartment {
        DamageCompartment {
            flooded_volume_m3: volume,
            kg_m: 3.0,
            permeability,
            transverse_offset_m: None,
        }
    }

    #[test]
    fn test_flooded_kg_matches_added_load() {
        let vessel = VesselState::new(8_000.0, 7.5, 6.0);
        let input = DamageInput {
            compartment: compartment(250.0, 0.6),
            original_draft_m: 6.0,
        };
        let r = calculate(&vessel, &input, &StabilitySettings::default()).unwrap();
        let added = LoadItem::new(r.flood_weight_t, 3.0);
        assert_eq!(r.new_kg_m, new_kg(&vessel, &[added]).unwrap());
    }

    #[test]
    fn test_added_weight_chain() {
        let vessel = VesselState::new(10_000.0, 8.0, 6.5);
        let input = DamageInput {
            compartment: compartment(400.0, 0.95),
            original_draft_m: 7.0,
        };
        let r = calculate(&vessel, &input, &StabilitySettings::default()).unwrap();

        let w = 400.0 * 0.95 * 1.025;
        assert!((r.flood_weight_t - w).abs() < 1e-9);
        assert!((r.new_displacement_t - (10_000.0 + w)).abs() < 1e-9);

        let kg = (65_000.0 + w * 3.0) / (10_000.0 + w);
        assert!((r.new_kg_m - kg).abs() < 1e-12);

        let rise = w / 20.0;
        assert!((r.new_draft_m - (7.0 + rise)).abs() < 1e-12);
        assert!((r.new_km_m - (8.0 + rise * 0.1)).abs() < 1e-12);

        let fs = 400.0 * 0.1 / (10_000.0 + w);
        assert!((r.residual_gm_m - (8.0 + rise * 0.1 - kg - fs)).abs() < 1e-12);

        let heel = (w * 2.0 / ((10_000.0 + w) * r.residual_gm_m)).atan().to_degrees();
        assert!((r.heel.degrees() - heel).abs() < 1e-9);
        assert!(r.excessive_draft_increase);
    }

    #[test]
    fn test_zero_permeability_is_intact() {
        let vessel = VesselState::new(10_000.0, 8.0, 6.5);
        let input = DamageInput {
            compartment: compartment(400.0, 0.0),
            original_draft_m: 7.0,
        };
        let r = calculate(&vessel, &input, &StabilitySettings::default()).unwrap();
        assert_eq!(r.flood_weight_t, 0.0);
        assert_eq!(r.new_draft_m, 7.0);
        assert_eq!(r.heel, HeelAngle::Inclined(0.0));
        // only the free-surface term remains
        assert!((r.residual_gm_m - (1.5 - 0.004)).abs() < 1e-12);
        assert_eq!(r.survival, SurvivalStatus::Safe);
        assert_eq!(r.survival_ratio_percent, 100.0);
    }

    #[test]
    fn test_survival_bands() {
        assert_eq!(SurvivalStatus::classify(0.5, HeelAngle::Inclined(5.0)), SurvivalStatus::Safe);
        assert_eq!(SurvivalStatus::classify(0.5, HeelAngle::Inclined(-6.0)), SurvivalStatus::Safe);
        assert_eq!(SurvivalStatus::classify(0.03, HeelAngle::Inclined(5.0)), SurvivalStatus::Marginal);
        assert_eq!(SurvivalStatus::classify(0.5, HeelAngle::Inclined(10.0)), SurvivalStatus::Marginal);
        assert_eq!(SurvivalStatus::classify(0.5, HeelAngle::Inclined(15.0)), SurvivalStatus::Dangerous);
        assert_eq!(SurvivalStatus::classify(-0.1, HeelAngle::Capsize), SurvivalStatus::Dangerous);
    }

    #[test]
    fn test_unstable_after_flooding() {
        // already negative GM before the damage
        let vessel = VesselState::new(3_000.0, 6.0, 6.3);
        let input = DamageInput {
            compartment: DamageCompartment {
                flooded_volume_m3: 10.0,
                kg_m: 3.0,
                permeability: 1.0,
                transverse_offset_m: Some(4.0),
            },
            original_draft_m: 4.0,
        };
        let r = calculate(&vessel, &input, &StabilitySettings::default()).unwrap();
        assert!(r.residual_gm_m < 0.0);
        assert!(r.heel.is_capsize());
        assert_eq!(r.survival, SurvivalStatus::Dangerous);
        assert_eq!(r.survival_ratio_percent, 0.0);
    }

    #[test]
    fn test_settings_change_density() {
        let vessel = VesselState::new(10_000.0, 8.0, 6.5);
        let input = DamageInput {
            compartment: compartment(100.0, 1.0),
            original_draft_m: 7.0,
        };
        let fresh = StabilitySettings {
            seawater_density_t_m3: 1.0,
            ..StabilitySettings::default()
        };
        let r = calculate(&vessel, &input, &fresh).unwrap();
        assert!((r.flood_weight_t - 100.0).abs() < 1e-12);
    }

    #[test]
    fn test_invalid_permeability() {
        let vessel = VesselState::new(10_000.0, 8.0, 6.5);
        let input = DamageInput {
            compartment: compartment(100.0, 1.2),
            original_draft_m: 7.0,
        };
        assert!(calculate(&vessel, &input, &StabilitySettings::default()).is_err());
    }
}
