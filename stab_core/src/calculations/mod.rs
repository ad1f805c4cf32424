//! # Stability Calculations
//!
//! Each calculation follows the pattern:
//!
//! - `*Input` - Input parameters (JSON-serializable)
//! - `*Result` - Calculation results (JSON-serializable)
//! - `calculate(vessel, input) -> Result<*Result, CalcError>` - Pure calculation function
//!
//! A [`StabilityRequest`] wraps a vessel, settings and one [`Scenario`], so a
//! single JSON document can drive any of them through [`run`].
//!
//! ## Available Calculations
//!
//! - [`intact`] - GZ curve, criteria, roll period and warnings for a loaded condition
//! - [`loading`] - Loading/discharging weights and cargo shifts
//! - [`free_surface`] - Slack-tank free-surface correction
//! - [`crane`] - GM and list during a crane lift
//! - [`pendulum`] - Heel from a pendulum reading
//! - [`drydock`] - Critical GM on keel blocks
//! - [`damage`] - Residual stability after flooding
//! - [`wind`] - Steady wind heel
//!
//! Supporting modules: [`gz_curve`], [`criteria`], [`solas`], [`warnings`].
//!
//! ## JSON Example
//!
//! ```json
//! {
//!   "label": "Lift No. 2 hatch",
//!   "vessel": { "displacement_t": 25000.0, "km_m": 8.5, "kg_m": 7.2 },
//!   "scenario": {
//!     "type": "CraneLift",
//!     "weight_t": 50.0,
//!     "hook_height_m": 25.0,
//!     "load_height_m": 5.0
//!   }
//! }
//! ```

pub mod crane;
pub mod criteria;
pub mod damage;
pub mod drydock;
pub mod free_surface;
pub mod gz_curve;
pub mod intact;
pub mod loading;
pub mod pendulum;
pub mod solas;
pub mod warnings;
pub mod wind;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::errors::CalcResult;
use crate::settings::StabilitySettings;
use crate::vessel::VesselState;

// Re-export commonly used types
pub use crane::{CraneLiftInput, CraneLiftResult};
pub use damage::{DamageCompartment, DamageInput, DamageResult, SurvivalStatus};
pub use drydock::{DrydockAssessment, DrydockInput, DrydockResult, DrydockSupportLayout};
pub use free_surface::{FreeSurfaceInput, FreeSurfaceResult};
pub use gz_curve::{GzCurve, GzCurvePoint, KnSample};
pub use intact::{IntactInput, IntactResult};
pub use loading::{CargoShiftInput, CargoShiftResult, LoadingInput, LoadingResult};
pub use pendulum::{PendulumInput, PendulumResult};
pub use solas::{CriterionResult, SolasEvaluation};
pub use warnings::StabilityWarning;
pub use wind::{WindHeelingInput, WindHeelingResult};

/// One calculation to run against a vessel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Scenario {
    /// GZ curve and criteria for the condition as loaded
    Intact(IntactInput),
    /// Load or discharge weights
    Loading(LoadingInput),
    /// Move a weight already aboard
    CargoShift(CargoShiftInput),
    /// Slack-tank breakdown
    FreeSurface(FreeSurfaceInput),
    /// Load suspended from a crane
    CraneLift(CraneLiftInput),
    /// Pendulum heel reading
    Pendulum(PendulumInput),
    /// Docking on keel blocks
    Drydock(DrydockInput),
    /// Compartment flooding
    Damage(DamageInput),
    /// Beam wind
    WindHeeling(WindHeelingInput),
}

impl Scenario {
    /// Get the calculation type as a string
    pub fn calc_type(&self) -> &'static str {
        match self {
            Scenario::Intact(_) => "Intact",
            Scenario::Loading(_) => "Loading",
            Scenario::CargoShift(_) => "CargoShift",
            Scenario::FreeSurface(_) => "FreeSurface",
            Scenario::CraneLift(_) => "CraneLift",
            Scenario::Pendulum(_) => "Pendulum",
            Scenario::Drydock(_) => "Drydock",
            Scenario::Damage(_) => "Damage",
            Scenario::WindHeeling(_) => "WindHeeling",
        }
    }
}

/// Result of running a [`Scenario`], tagged the same way.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ScenarioOutcome {
    Intact(IntactResult),
    Loading(LoadingResult),
    CargoShift(CargoShiftResult),
    FreeSurface(FreeSurfaceResult),
    CraneLift(CraneLiftResult),
    Pendulum(PendulumResult),
    Drydock(DrydockResult),
    Damage(DamageResult),
    WindHeeling(WindHeelingResult),
}

/// A complete calculation request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StabilityRequest {
    /// User-provided label
    #[serde(default)]
    pub label: String,

    pub vessel: VesselState,

    #[serde(default)]
    pub settings: StabilitySettings,

    pub scenario: Scenario,
}

impl StabilityRequest {
    /// Request with default settings
    pub fn new(label: impl Into<String>, vessel: VesselState, scenario: Scenario) -> Self {
        StabilityRequest {
            label: label.into(),
            vessel,
            settings: StabilitySettings::default(),
            scenario,
        }
    }

    /// Parse a request document.
    pub fn from_json_str(json: &str) -> CalcResult<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Run the request's scenario.
///
/// # Example
/// ```rust
/// use stab_core::calculations::{run, StabilityRequest, ScenarioOutcome};
///
/// let json = r#"{
///     "vessel": { "displacement_t": 25000.0, "km_m": 8.5, "kg_m": 7.2 },
///     "scenario": { "type": "Pendulum", "pendulum_length_m": 1.0, "deflection_m": 0.1 }
/// }"#;
/// let request = StabilityRequest::from_json_str(json).unwrap();
/// match run(&request).unwrap() {
///     ScenarioOutcome::Pendulum(result) => assert!((result.heel_deg - 5.74).abs() < 0.01),
///     other => panic!("unexpected outcome: {:?}", other),
/// }
/// ```
pub fn run(request: &StabilityRequest) -> CalcResult<ScenarioOutcome> {
    request.settings.validate()?;
    let vessel = &request.vessel;
    let settings = &request.settings;

    debug!(label = %request.label, scenario = request.scenario.calc_type(), "running stability request");

    let outcome = match &request.scenario {
        Scenario::Intact(input) => ScenarioOutcome::Intact(intact::calculate(vessel, input, settings)?),
        Scenario::Loading(input) => ScenarioOutcome::Loading(loading::calculate_loading(vessel, input)?),
        Scenario::CargoShift(input) => ScenarioOutcome::CargoShift(loading::calculate_shift(vessel, input)?),
        Scenario::FreeSurface(input) => ScenarioOutcome::FreeSurface(free_surface::calculate(vessel, input)?),
        Scenario::CraneLift(input) => ScenarioOutcome::CraneLift(crane::calculate(vessel, input)?),
        Scenario::Pendulum(input) => ScenarioOutcome::Pendulum(pendulum::calculate(vessel, input)?),
        Scenario::Drydock(input) => ScenarioOutcome::Drydock(drydock::calculate(vessel, input)?),
        Scenario::Damage(input) => ScenarioOutcome::Damage(damage::calculate(vessel, input, settings)?),
        Scenario::WindHeeling(input) => ScenarioOutcome::WindHeeling(wind::calculate(vessel, input)?),
    };

    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculations::criteria::VesselCategory;
    use crate::errors::CalcError;

    fn reference_vessel() -> VesselState {
        VesselState::new(25_000.0, 8.5, 7.2)
    }

    #[test]
    fn test_crane_request_from_json() {
        let json = r#"{
            "label": "Lift No. 2 hatch",
            "vessel": { "displacement_t": 25000.0, "km_m": 8.5, "kg_m": 7.2 },
            "scenario": { "type": "CraneLift", "weight_t": 50.0, "hook_height_m": 25.0, "load_height_m": 5.0 }
        }"#;
        let request = StabilityRequest::from_json_str(json).unwrap();
        assert_eq!(request.scenario.calc_type(), "CraneLift");
        assert_eq!(request.settings, StabilitySettings::default());

        match run(&request).unwrap() {
            ScenarioOutcome::CraneLift(result) => assert!((result.gm_change_m + 0.7984).abs() < 1e-4),
            other => panic!("unexpected outcome: {:?}", other),
        }
    }

    #[test]
    fn test_settings_flow_into_intact() {
        let json = r#"{
            "vessel": { "displacement_t": 12000.0, "km_m": 7.0, "kg_m": 6.82 },
            "settings": { "vessel_category": "passenger", "curve_resolution": "detailed" },
            "scenario": { "type": "Intact" }
        }"#;
        let request = StabilityRequest::from_json_str(json).unwrap();
        assert_eq!(request.settings.vessel_category, VesselCategory::Passenger);

        match run(&request).unwrap() {
            ScenarioOutcome::Intact(result) => {
                assert_eq!(result.curve.points().len(), 91);
                assert!(!result.evaluation.all_passed);
            }
            other => panic!("unexpected outcome: {:?}", other),
        }
    }

    #[test]
    fn test_every_scenario_dispatches() {
        let scenarios = vec![
            Scenario::Intact(IntactInput::default()),
            Scenario::Loading(LoadingInput::default()),
            Scenario::CargoShift(CargoShiftInput {
                weight_t: 100.0,
                vertical_shift_m: 2.0,
                horizontal_shift_m: 0.0,
            }),
            Scenario::FreeSurface(FreeSurfaceInput::default()),
            Scenario::CraneLift(CraneLiftInput::new(50.0, 25.0, 5.0)),
            Scenario::Pendulum(PendulumInput {
                pendulum_length_m: 1.0,
                deflection_m: 0.1,
            }),
            Scenario::Drydock(DrydockInput {
                layout: DrydockSupportLayout {
                    support_positions_m: vec![0.0, 10.0, 20.0],
                },
                vessel_length_m: None,
                upthrust_t: None,
            }),
            Scenario::Damage(DamageInput {
                compartment: DamageCompartment {
                    flooded_volume_m3: 200.0,
                    kg_m: 3.0,
                    permeability: 0.85,
                    transverse_offset_m: None,
                },
                original_draft_m: 9.0,
            }),
            Scenario::WindHeeling(WindHeelingInput {
                wind_speed_ms: 15.0,
                lateral_area_m2: 1_500.0,
                lever_m: 10.0,
            }),
        ];

        for scenario in scenarios {
            let calc_type = scenario.calc_type();
            let request = StabilityRequest::new("dispatch", reference_vessel(), scenario);
            let outcome = run(&request).unwrap();

            let json = serde_json::to_value(&outcome).unwrap();
            assert_eq!(json["type"], calc_type);
        }
    }

    #[test]
    fn test_request_roundtrip() {
        let request = StabilityRequest::new(
            "roundtrip",
            reference_vessel(),
            Scenario::CraneLift(CraneLiftInput::new(20.0, 18.0, 3.0).with_outreach(12.0)),
        );
        let json = serde_json::to_string(&request).unwrap();
        let parsed = StabilityRequest::from_json_str(&json).unwrap();
        assert_eq!(parsed, request);
    }

    #[test]
    fn test_unknown_scenario_rejected() {
        let json = r#"{
            "vessel": { "displacement_t": 25000.0, "km_m": 8.5, "kg_m": 7.2 },
            "scenario": { "type": "Grounding" }
        }"#;
        let err = StabilityRequest::from_json_str(json).unwrap_err();
        assert!(matches!(err, CalcError::SerializationError { .. }));
    }

    #[test]
    fn test_invalid_vessel_fails_run() {
        let request = StabilityRequest::new(
            "bad",
            VesselState::new(0.0, 8.5, 7.2),
            Scenario::CraneLift(CraneLiftInput::new(10.0, 20.0, 2.0)),
        );
        assert_eq!(run(&request).unwrap_err().error_code(), "INVALID_INPUT");
    }
}
