//! # Righting-Arm (GZ) Curve
//!
//! Samples the righting arm over 0°–90° of heel and tracks the running area
//! under the curve. Two sources are supported:
//!
//! - **Wall-sided model**: GZ = GM · sin φ, clamped at zero
//! - **Cross curves**: GZ = KN − KG · sin φ from a table of KN ordinates
//!
//! ```text
//!  GZ │        ____
//!     │     .-'    '-.
//!     │   .'          '.
//!     │  /              \
//!     │ /                \
//!     └─┴────────┴────────┴──── φ
//!       0°      max     vanishing
//! ```
//!
//! ## Example
//!
//! ```rust
//! use stab_core::calculations::gz_curve::GzCurve;
//! use stab_core::settings::CurveResolution;
//! use stab_core::vessel::VesselState;
//!
//! let vessel = VesselState::new(25_000.0, 8.5, 7.2);
//! let curve = GzCurve::generate(&vessel, CurveResolution::Coarse).unwrap();
//! assert_eq!(curve.points().len(), 19);
//! ```

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::equations::integration::{simpsons_one_third, trapezoidal_area, ArmSample};
use crate::equations::stability::{gz_from_kn, gz_small_angle};
use crate::errors::{ensure_finite, CalcError, CalcResult};
use crate::settings::CurveResolution;
use crate::units::{Degrees, MetreRadians, Radians};
use crate::vessel::VesselState;

/// GZ at or below this value counts as vanished (m)
pub const VANISHING_GZ_M: f64 = 0.001;

/// Largest heel angle covered by a curve (degrees)
pub const MAX_HEEL_DEG: f64 = 90.0;

/// One sample of a righting-arm curve.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GzCurvePoint {
    /// Heel angle (degrees)
    pub heel_deg: f64,

    /// Righting arm (m), never negative
    pub gz_m: f64,

    /// Area under the curve from the first sample to this one (m·rad)
    pub cumulative_area_mrad: f64,
}

impl ArmSample for GzCurvePoint {
    fn heel_deg(&self) -> f64 {
        self.heel_deg
    }

    fn arm_m(&self) -> f64 {
        self.gz_m
    }
}

/// A cross-curve ordinate: KN at a heel angle.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct KnSample {
    pub heel_deg: f64,
    pub kn_m: f64,
}

/// A sampled righting-arm curve with strictly increasing angles.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GzCurve {
    points: Vec<GzCurvePoint>,
}

impl GzCurve {
    /// Generate a curve from the wall-sided model GZ = GM · sin φ.
    ///
    /// Negative arms are clamped to zero, so a vessel with GM ≤ 0 gets a flat
    /// curve with no area.
    pub fn generate(vessel: &VesselState, resolution: CurveResolution) -> CalcResult<Self> {
        vessel.validate()?;
        let gm = vessel.gm();
        let step = resolution.step_deg();

        let samples: Vec<(f64, f64)> = (0..=MAX_HEEL_DEG as u32)
            .step_by(step as usize)
            .map(|deg| {
                let heel = f64::from(deg);
                (heel, gz_small_angle(gm, heel))
            })
            .collect();

        debug!(gm_m = gm, step_deg = step, points = samples.len(), "generating GZ curve");
        Self::from_samples(&samples)
    }

    /// Generate a curve from cross-curve (KN) ordinates.
    ///
    /// # Errors
    /// `InvalidInput` when the angles are unsorted, duplicated or outside
    /// 0°–90°; `InsufficientSamples` for fewer than two ordinates.
    ///
    /// # Example
    /// ```rust
    /// use stab_core::calculations::gz_curve::{GzCurve, KnSample};
    ///
    /// let kn = [
    ///     KnSample { heel_deg: 0.0, kn_m: 0.0 },
    ///     KnSample { heel_deg: 30.0, kn_m: 4.2 },
    ///     KnSample { heel_deg: 60.0, kn_m: 6.9 },
    /// ];
    /// let curve = GzCurve::generate_from_kn(&kn, 7.0).unwrap();
    /// // GZ(30°) = 4.2 − 7.0 × 0.5
    /// assert!((curve.points()[1].gz_m - 0.7).abs() < 1e-9);
    /// ```
    pub fn generate_from_kn(kn_table: &[KnSample], kg_m: f64) -> CalcResult<Self> {
        ensure_finite("kg_m", kg_m)?;
        let samples: Vec<(f64, f64)> = kn_table
            .iter()
            .map(|s| (s.heel_deg, gz_from_kn(s.kn_m, kg_m, s.heel_deg)))
            .collect();

        debug!(kg_m, points = samples.len(), "generating GZ curve from cross curves");
        Self::from_samples(&samples)
    }

    /// Build a curve from raw `(heel_deg, gz_m)` pairs.
    ///
    /// Arms are clamped at zero and the cumulative area is accumulated by the
    /// trapezoidal rule.
    pub fn from_samples<S: ArmSample>(samples: &[S]) -> CalcResult<Self> {
        if samples.len() < 2 {
            return Err(CalcError::insufficient_samples("GZ curve", "at least 2", samples.len()));
        }

        let mut points: Vec<GzCurvePoint> = Vec::with_capacity(samples.len());
        for sample in samples {
            let heel = sample.heel_deg();
            ensure_finite("heel_deg", heel)?;
            ensure_finite("gz_m", sample.arm_m())?;
            if !(0.0..=MAX_HEEL_DEG).contains(&heel) {
                return Err(CalcError::invalid_input(
                    "heel_deg",
                    heel.to_string(),
                    "Heel angles must lie between 0 and 90 degrees",
                ));
            }

            let gz = sample.arm_m().max(0.0);
            let cumulative = match points.last() {
                None => 0.0,
                Some(prev) => {
                    if heel <= prev.heel_deg {
                        return Err(CalcError::invalid_input(
                            "heel_deg",
                            heel.to_string(),
                            "Heel angles must be strictly increasing",
                        ));
                    }
                    let step: Radians = Degrees(heel - prev.heel_deg).into();
                    prev.cumulative_area_mrad + 0.5 * (prev.gz_m + gz) * step.0
                }
            };

            points.push(GzCurvePoint {
                heel_deg: heel,
                gz_m: gz,
                cumulative_area_mrad: cumulative,
            });
        }

        Ok(GzCurve { points })
    }

    /// Curve samples in ascending heel order
    pub fn points(&self) -> &[GzCurvePoint] {
        &self.points
    }

    /// Largest righting arm and the angle where it occurs.
    ///
    /// On ties the first (smallest) angle wins.
    pub fn max_gz(&self) -> GzCurvePoint {
        let mut points = self.points.iter().copied();
        let first = points.next().unwrap_or(GzCurvePoint {
            heel_deg: 0.0,
            gz_m: 0.0,
            cumulative_area_mrad: 0.0,
        });
        points.fold(first, |best, point| if point.gz_m > best.gz_m { point } else { best })
    }

    /// Trapezoidal area between two heel angles (m·rad)
    pub fn area_between(&self, from_deg: f64, to_deg: f64) -> f64 {
        trapezoidal_area(&self.points, from_deg, to_deg)
    }

    /// Area under the whole curve
    pub fn total_area(&self) -> MetreRadians {
        MetreRadians(self.points.last().map_or(0.0, |p| p.cumulative_area_mrad))
    }

    /// First angle above 0° where the righting arm has vanished.
    pub fn vanishing_angle(&self) -> Option<f64> {
        self.points
            .iter()
            .find(|p| p.heel_deg > 0.0 && p.gz_m <= VANISHING_GZ_M)
            .map(|p| p.heel_deg)
    }

    /// Righting arm at any heel, interpolated linearly between samples.
    ///
    /// `None` outside the sampled range.
    pub fn gz_at(&self, heel_deg: f64) -> Option<f64> {
        let first = self.points.first()?;
        let last = self.points.last()?;
        if heel_deg < first.heel_deg || heel_deg > last.heel_deg {
            return None;
        }
        self.points.windows(2).find_map(|pair| {
            let (a, b) = (pair[0], pair[1]);
            if heel_deg >= a.heel_deg && heel_deg <= b.heel_deg {
                let t = (heel_deg - a.heel_deg) / (b.heel_deg - a.heel_deg);
                Some(a.gz_m + t * (b.gz_m - a.gz_m))
            } else {
                None
            }
        })
    }

    /// Area under the whole curve by Simpson's 1/3 rule.
    ///
    /// # Errors
    /// `CalculationFailed` when samples are not equally spaced;
    /// `InsufficientSamples` when their count is even.
    pub fn dynamic_stability(&self) -> CalcResult<MetreRadians> {
        if self.points.len() < 3 {
            return Err(CalcError::insufficient_samples(
                "Simpson's 1/3 rule",
                "an odd count of at least 3",
                self.points.len(),
            ));
        }
        let step = self.points[1].heel_deg - self.points[0].heel_deg;
        let uniform = self
            .points
            .windows(2)
            .all(|pair| ((pair[1].heel_deg - pair[0].heel_deg) - step).abs() < 1e-9);
        if !uniform {
            return Err(CalcError::calculation_failed(
                "dynamic stability",
                "Simpson's rule needs equally spaced heel angles",
            ));
        }

        let ordinates: Vec<f64> = self.points.iter().map(|p| p.gz_m).collect();
        Ok(MetreRadians(simpsons_one_third(&ordinates, step)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reference_vessel() -> VesselState {
        VesselState::new(25_000.0, 8.5, 7.2)
    }

    #[test]
    fn test_point_counts() {
        let coarse = GzCurve::generate(&reference_vessel(), CurveResolution::Coarse).unwrap();
        let detailed = GzCurve::generate(&reference_vessel(), CurveResolution::Detailed).unwrap();
        assert_eq!(coarse.points().len(), 19);
        assert_eq!(detailed.points().len(), 91);
        assert_eq!(detailed.points().last().unwrap().heel_deg, 90.0);
    }

    #[test]
    fn test_wall_sided_values() {
        let curve = GzCurve::generate(&reference_vessel(), CurveResolution::Coarse).unwrap();
        let at_30 = curve.points()[6];
        assert_eq!(at_30.heel_deg, 30.0);
        assert!((at_30.gz_m - 0.65).abs() < 1e-9);

        let max = curve.max_gz();
        assert!((max.gz_m - 1.3).abs() < 1e-9);
        assert_eq!(max.heel_deg, 90.0);
    }

    #[test]
    fn test_detailed_curve_starts_at_zero_and_stays_non_negative() {
        let curve = GzCurve::generate(&reference_vessel(), CurveResolution::Detailed).unwrap();
        assert_eq!(curve.points()[0].heel_deg, 0.0);
        assert!(curve.points()[0].gz_m.abs() < 1e-12);
        for point in curve.points() {
            assert!(point.gz_m >= 0.0, "negative GZ at {}°", point.heel_deg);
        }
    }

    #[test]
    fn test_cumulative_area_monotonic() {
        let curve = GzCurve::generate(&reference_vessel(), CurveResolution::Detailed).unwrap();
        assert_eq!(curve.points()[0].cumulative_area_mrad, 0.0);
        for pair in curve.points().windows(2) {
            assert!(pair[1].heel_deg > pair[0].heel_deg);
            assert!(pair[1].cumulative_area_mrad >= pair[0].cumulative_area_mrad);
        }
        // ∫₀^π/2 1.3 sin φ dφ = 1.3
        assert!((curve.total_area().0 - 1.3).abs() < 1e-3);
    }

    #[test]
    fn test_negative_gm_flat_curve() {
        let unstable = VesselState::new(10_000.0, 7.0, 7.5);
        let curve = GzCurve::generate(&unstable, CurveResolution::Coarse).unwrap();
        assert!(curve.points().iter().all(|p| p.gz_m == 0.0));
        assert_eq!(curve.total_area().0, 0.0);
        assert_eq!(curve.max_gz().heel_deg, 0.0);
        assert_eq!(curve.vanishing_angle(), Some(5.0));
    }

    #[test]
    fn test_vanishing_angle_absent_for_wall_sided() {
        let curve = GzCurve::generate(&reference_vessel(), CurveResolution::Coarse).unwrap();
        assert_eq!(curve.vanishing_angle(), None);
    }

    #[test]
    fn test_max_gz_first_on_ties() {
        let curve = GzCurve::from_samples(&[(0.0, 0.0), (20.0, 0.5), (30.0, 0.5), (40.0, 0.2)]).unwrap();
        assert_eq!(curve.max_gz().heel_deg, 20.0);
    }

    #[test]
    fn test_area_between_matches_cumulative() {
        let curve = GzCurve::generate(&reference_vessel(), CurveResolution::Coarse).unwrap();
        let a30 = curve.points()[6].cumulative_area_mrad;
        let a40 = curve.points()[8].cumulative_area_mrad;
        assert!((curve.area_between(30.0, 40.0) - (a40 - a30)).abs() < 1e-12);
        assert!((curve.area_between(0.0, 30.0) - a30).abs() < 1e-12);
    }

    #[test]
    fn test_kn_curve() {
        let kn = [
            KnSample { heel_deg: 0.0, kn_m: 0.0 },
            KnSample { heel_deg: 30.0, kn_m: 4.0 },
            KnSample { heel_deg: 60.0, kn_m: 6.0 },
            KnSample { heel_deg: 90.0, kn_m: 6.5 },
        ];
        let curve = GzCurve::generate_from_kn(&kn, 7.0).unwrap();
        assert!((curve.points()[1].gz_m - 0.5).abs() < 1e-9);
        // 6.0 − 7.0 × sin 60° ≈ −0.062 and 6.5 − 7.0 < 0, both clamped
        assert_eq!(curve.points()[2].gz_m, 0.0);
        assert_eq!(curve.points()[3].gz_m, 0.0);
        assert_eq!(curve.vanishing_angle(), Some(60.0));
    }

    #[test]
    fn test_kn_rejects_unsorted_and_duplicates() {
        let unsorted = [
            KnSample { heel_deg: 30.0, kn_m: 4.0 },
            KnSample { heel_deg: 10.0, kn_m: 1.5 },
        ];
        assert!(GzCurve::generate_from_kn(&unsorted, 7.0).is_err());

        let duplicate = [
            KnSample { heel_deg: 10.0, kn_m: 1.5 },
            KnSample { heel_deg: 10.0, kn_m: 1.6 },
        ];
        assert!(GzCurve::generate_from_kn(&duplicate, 7.0).is_err());

        let single = [KnSample { heel_deg: 10.0, kn_m: 1.5 }];
        assert!(matches!(
            GzCurve::generate_from_kn(&single, 7.0),
            Err(CalcError::InsufficientSamples { .. })
        ));
    }

    #[test]
    fn test_gz_at_interpolates() {
        let curve = GzCurve::from_samples(&[(0.0, 0.0), (10.0, 0.2), (20.0, 0.6)]).unwrap();
        assert!((curve.gz_at(15.0).unwrap() - 0.4).abs() < 1e-12);
        assert_eq!(curve.gz_at(25.0), None);
    }

    #[test]
    fn test_dynamic_stability() {
        let curve = GzCurve::generate(&reference_vessel(), CurveResolution::Coarse).unwrap();
        let simpson = curve.dynamic_stability().unwrap();
        assert!((simpson.0 - 1.3).abs() < 1e-4);

        // 20 uniform points: even count
        let even: Vec<(f64, f64)> = (0..20).map(|i| (i as f64 * 4.0, 0.1)).collect();
        assert!(GzCurve::from_samples(&even).unwrap().dynamic_stability().is_err());

        let uneven = GzCurve::from_samples(&[(0.0, 0.0), (10.0, 0.2), (30.0, 0.6)]).unwrap();
        assert!(matches!(
            uneven.dynamic_stability(),
            Err(CalcError::CalculationFailed { .. })
        ));
    }
}
