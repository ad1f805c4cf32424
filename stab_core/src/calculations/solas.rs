//! # Intact Stability Criteria Evaluation
//!
//! Compares a GZ curve and the vessel's GM against a threshold set from
//! [`super::criteria`]. Each criterion yields a value, its minimum, a pass
//! flag and a percentage score; the aggregate reports how many passed.
//!
//! ## Scoring
//!
//! ```text
//! score = clamp(value / threshold × 100, 0, 100)
//! overall = mean(score)
//! ```
//!
//! ## Example
//!
//! ```rust
//! use stab_core::calculations::gz_curve::GzCurve;
//! use stab_core::calculations::criteria::CriteriaThresholds;
//! use stab_core::calculations::solas::evaluate;
//! use stab_core::settings::CurveResolution;
//! use stab_core::vessel::VesselState;
//!
//! let vessel = VesselState::new(25_000.0, 8.5, 7.2);
//! let curve = GzCurve::generate(&vessel, CurveResolution::Detailed).unwrap();
//! let evaluation = evaluate(&curve, &vessel, &CriteriaThresholds::default()).unwrap();
//!
//! assert!((evaluation.max_gz_m - 1.3).abs() < 1e-9);
//! println!("{}/{} criteria passed", evaluation.passed_count, evaluation.total_count);
//! ```

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::criteria::{CriteriaThresholds, Criterion};
use super::gz_curve::GzCurve;
use crate::errors::CalcResult;
use crate::vessel::VesselState;

/// Outcome of one criterion.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CriterionResult {
    pub criterion: Criterion,

    /// Value achieved by the vessel
    pub value: f64,

    /// Minimum required value
    pub required_threshold: f64,

    /// value ≥ required_threshold
    pub passed: bool,

    /// value / threshold × 100, clamped to 0..=100
    pub score_percent: f64,
}

impl CriterionResult {
    /// Compare a value against its minimum.
    pub fn check(criterion: Criterion, value: f64, required_threshold: f64) -> Self {
        let score_percent = (value / required_threshold * 100.0).clamp(0.0, 100.0);
        CriterionResult {
            criterion,
            value,
            required_threshold,
            passed: value >= required_threshold,
            score_percent,
        }
    }
}

/// Aggregate result of an intact stability evaluation.
///
/// ## JSON Example
///
/// ```json
/// {
///   "gm_m": 1.3,
///   "area_0_30_mrad": 0.153,
///   "max_gz_m": 1.3,
///   "angle_of_max_gz_deg": 90.0,
///   "passed_count": 6,
///   "total_count": 6,
///   "overall_score_percent": 100.0,
///   "all_passed": true
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SolasEvaluation {
    pub gm_m: f64,
    pub area_0_30_mrad: f64,
    pub area_0_40_mrad: f64,
    pub area_30_40_mrad: f64,
    pub max_gz_m: f64,
    pub angle_of_max_gz_deg: f64,

    /// One entry per criterion, in [`Criterion::ALL`] order
    pub criteria: Vec<CriterionResult>,

    pub passed_count: usize,
    pub total_count: usize,

    /// Mean of the per-criterion scores
    pub overall_score_percent: f64,

    /// Logical AND of every pass flag
    pub all_passed: bool,
}

impl SolasEvaluation {
    /// Criteria that were not met
    pub fn failed(&self) -> impl Iterator<Item = &CriterionResult> {
        self.criteria.iter().filter(|c| !c.passed)
    }

    /// Result for one criterion
    pub fn get(&self, criterion: Criterion) -> Option<&CriterionResult> {
        self.criteria.iter().find(|c| c.criterion == criterion)
    }

    /// Criterion with the lowest score
    pub fn governing_criterion(&self) -> Option<&CriterionResult> {
        self.criteria
            .iter()
            .min_by(|a, b| a.score_percent.total_cmp(&b.score_percent))
    }
}

/// Evaluate a curve and vessel against a threshold set.
///
/// # Arguments
///
/// * `curve` - Righting-arm curve covering at least 0°–40°
/// * `vessel` - Vessel state the GM is taken from
/// * `thresholds` - Minimum values to compare against
pub fn evaluate(curve: &GzCurve, vessel: &VesselState, thresholds: &CriteriaThresholds) -> CalcResult<SolasEvaluation> {
    vessel.validate()?;
    thresholds.validate()?;

    let area_0_30 = curve.area_between(0.0, 30.0);
    let area_0_40 = curve.area_between(0.0, 40.0);
    let area_30_40 = curve.area_between(30.0, 40.0);
    let peak = curve.max_gz();
    let gm = vessel.gm();

    let criteria: Vec<CriterionResult> = Criterion::ALL
        .iter()
        .map(|&criterion| {
            let value = match criterion {
                Criterion::InitialGm => gm,
                Criterion::Area0To30 => area_0_30,
                Criterion::Area0To40 => area_0_40,
                Criterion::Area30To40 => area_30_40,
                Criterion::MaxGz => peak.gz_m,
                Criterion::AngleOfMaxGz => peak.heel_deg,
            };
            CriterionResult::check(criterion, value, thresholds.get(criterion))
        })
        .collect();

    let passed_count = criteria.iter().filter(|c| c.passed).count();
    let total_count = criteria.len();
    let overall_score_percent = criteria.iter().map(|c| c.score_percent).sum::<f64>() / total_count as f64;

    let evaluation = SolasEvaluation {
        gm_m: gm,
        area_0_30_mrad: area_0_30,
        area_0_40_mrad: area_0_40,
        area_30_40_mrad: area_30_40,
        max_gz_m: peak.gz_m,
        angle_of_max_gz_deg: peak.heel_deg,
        criteria,
        passed_count,
        total_count,
        overall_score_percent,
        all_passed: passed_count == total_count,
    };

    for failed in evaluation.failed() {
        warn!(
            criterion = failed.criterion.label(),
            value = failed.value,
            required = failed.required_threshold,
            "stability criterion not met"
        );
    }
    debug!(
        passed = evaluation.passed_count,
        total = evaluation.total_count,
        score = evaluation.overall_score_percent,
        "criteria evaluated"
    );

    Ok(evaluation)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculations::criteria::{CriteriaTable, VesselCategory};
    use crate::settings::CurveResolution;

    fn evaluate_vessel(vessel: &VesselState, thresholds: &CriteriaThresholds) -> SolasEvaluation {
        let curve = GzCurve::generate(vessel, CurveResolution::Detailed).unwrap();
        evaluate(&curve, vessel, thresholds).unwrap()
    }

    #[test]
    fn test_reference_vessel_end_to_end() {
        let vessel = VesselState::new(25_000.0, 8.5, 7.2);
        let result = evaluate_vessel(&vessel, &CriteriaThresholds::default());

        let gm = result.get(Criterion::InitialGm).unwrap();
        assert!(gm.passed);
        assert!((gm.value - 1.3).abs() < 1e-9);

        assert!((result.max_gz_m - 1.3).abs() < 1e-9);
        assert_eq!(result.angle_of_max_gz_deg, 90.0);
        assert_eq!(result.total_count, 6);
        assert!(result.all_passed);
        assert_eq!(result.overall_score_percent, 100.0);
    }

    #[test]
    fn test_areas_match_closed_form() {
        // ∫ GM sin φ dφ from a to b = GM (cos a − cos b)
        let vessel = VesselState::new(25_000.0, 8.5, 7.2);
        let result = evaluate_vessel(&vessel, &CriteriaThresholds::default());
        let expected_0_30 = 1.3 * (1.0 - 30f64.to_radians().cos());
        let expected_30_40 = 1.3 * (30f64.to_radians().cos() - 40f64.to_radians().cos());
        assert!((result.area_0_30_mrad - expected_0_30).abs() < 1e-4);
        assert!((result.area_30_40_mrad - expected_30_40).abs() < 1e-4);
    }

    #[test]
    fn test_low_gm_fails() {
        // GM = 0.1 m
        let vessel = VesselState::new(8_000.0, 6.0, 5.9);
        let result = evaluate_vessel(&vessel, &CriteriaThresholds::default());

        let gm = result.get(Criterion::InitialGm).unwrap();
        assert!(!gm.passed);
        assert!((gm.score_percent - 0.1 / 0.15 * 100.0).abs() < 1e-6);
        assert!(!result.all_passed);
        assert!(result.passed_count < result.total_count);
        assert!(result.failed().count() > 0);
    }

    #[test]
    fn test_negative_gm_scores_zero() {
        let vessel = VesselState::new(8_000.0, 6.0, 6.5);
        let result = evaluate_vessel(&vessel, &CriteriaThresholds::default());
        let gm = result.get(Criterion::InitialGm).unwrap();
        assert_eq!(gm.score_percent, 0.0);
        assert_eq!(result.max_gz_m, 0.0);
        assert_eq!(result.passed_count, 0);
        assert_eq!(result.governing_criterion().unwrap().score_percent, 0.0);
    }

    #[test]
    fn test_passenger_thresholds_stricter() {
        // GM = 0.18 m passes cargo but fails passenger
        let vessel = VesselState::new(12_000.0, 7.0, 6.82);
        let table = CriteriaTable::standard();

        let cargo = evaluate_vessel(&vessel, table.thresholds(VesselCategory::Cargo));
        let passenger = evaluate_vessel(&vessel, table.thresholds(VesselCategory::Passenger));
        assert!(cargo.get(Criterion::InitialGm).unwrap().passed);
        assert!(!passenger.get(Criterion::InitialGm).unwrap().passed);
    }

    #[test]
    fn test_score_capped() {
        let result = CriterionResult::check(Criterion::MaxGz, 2.0, 0.2);
        assert!(result.passed);
        assert_eq!(result.score_percent, 100.0);
    }
}
