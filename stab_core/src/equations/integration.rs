//! # Area Under the Righting-Arm Curve
//!
//! Numerical integration primitives for dynamic stability. Angles are given
//! in degrees and converted to radians, so areas come out in metre-radians.
//!
//! ## Rules
//!
//! | Rule          | Samples          | Weights                  |
//! |---------------|------------------|--------------------------|
//! | Trapezoidal   | ≥ 2, any spacing | ½, ½ per interval        |
//! | Simpson 1/3   | odd, ≥ 3         | 1, 4, 2, 4, …, 4, 1 (×h/3) |
//! | Simpson 3/8   | 3k + 1, ≥ 4      | 1, 3, 3, 2, …, 3, 3, 1 (×3h/8) |

use crate::errors::{ensure_finite, ensure_positive, CalcError, CalcResult};
use crate::units::{Degrees, Radians};

/// A sampled point of a righting-arm curve.
///
/// Implemented for `(heel_deg, gz_m)` tuples and for
/// [`GzCurvePoint`](crate::calculations::gz_curve::GzCurvePoint).
pub trait ArmSample {
    /// Heel angle of the sample (degrees)
    fn heel_deg(&self) -> f64;
    /// Righting arm at that heel (m)
    fn arm_m(&self) -> f64;
}

impl ArmSample for (f64, f64) {
    fn heel_deg(&self) -> f64 {
        self.0
    }

    fn arm_m(&self) -> f64 {
        self.1
    }
}

/// Trapezoidal area between two heel angles
///
/// Samples outside the closed range `[from_deg, to_deg]` are ignored; the
/// remaining ones are taken in the order given, which must be ascending by
/// angle.
///
/// ```text
/// A = Σ ½ (GZᵢ + GZᵢ₊₁) · (φᵢ₊₁ − φᵢ)      φ in radians
/// ```
///
/// Returns 0 when fewer than two samples fall in the range.
///
/// # Example
/// ```rust
/// use stab_core::equations::integration::trapezoidal_area;
///
/// let samples = [(0.0, 0.0), (10.0, 0.2), (20.0, 0.4)];
/// let area = trapezoidal_area(&samples, 0.0, 20.0);
/// assert!((area - 0.4 * 20f64.to_radians() / 2.0).abs() < 1e-12);
/// ```
pub fn trapezoidal_area<S: ArmSample>(samples: &[S], from_deg: f64, to_deg: f64) -> f64 {
    let in_range: Vec<&S> = samples
        .iter()
        .filter(|s| s.heel_deg() >= from_deg && s.heel_deg() <= to_deg)
        .collect();

    if in_range.len() < 2 {
        return 0.0;
    }

    in_range
        .windows(2)
        .map(|pair| {
            let step: Radians = Degrees(pair[1].heel_deg() - pair[0].heel_deg()).into();
            0.5 * (pair[0].arm_m() + pair[1].arm_m()) * step.0
        })
        .sum()
}

/// Composite Simpson's 1/3 rule over equally spaced ordinates
///
/// # Formula
/// ```text
/// A = (h/3) · [y₀ + 4y₁ + 2y₂ + 4y₃ + … + 4yₙ₋₁ + yₙ]     h in radians
/// ```
///
/// # Errors
/// `InsufficientSamples` for fewer than 3 ordinates or an even count
/// (the rule needs an even number of intervals); `InvalidInput` for a
/// non-positive step or non-finite ordinates.
///
/// # Example
/// ```rust
/// use stab_core::equations::integration::simpsons_one_third;
///
/// // ∫₀^π/2 sin φ dφ = 1
/// let values: Vec<f64> = (0..=18).map(|i| (i as f64 * 5.0).to_radians().sin()).collect();
/// let area = simpsons_one_third(&values, 5.0).unwrap();
/// assert!((area - 1.0).abs() < 1e-5);
/// ```
pub fn simpsons_one_third(values: &[f64], angle_step_deg: f64) -> CalcResult<f64> {
    const RULE: &str = "Simpson's 1/3 rule";
    if values.len() < 3 || values.len() % 2 == 0 {
        return Err(CalcError::insufficient_samples(RULE, "an odd count of at least 3", values.len()));
    }
    validate_ordinates(values, angle_step_deg)?;

    let last = values.len() - 1;
    let weighted: f64 = values
        .iter()
        .enumerate()
        .map(|(i, y)| {
            let weight = if i == 0 || i == last {
                1.0
            } else if i % 2 == 1 {
                4.0
            } else {
                2.0
            };
            weight * y
        })
        .sum();

    let h: Radians = Degrees(angle_step_deg).into();
    Ok(h.0 / 3.0 * weighted)
}

/// Composite Simpson's 3/8 rule over equally spaced ordinates
///
/// # Formula
/// ```text
/// A = (3h/8) · [y₀ + 3y₁ + 3y₂ + 2y₃ + 3y₄ + … + 3yₙ₋₁ + yₙ]
/// ```
///
/// Needs 3k + 1 ordinates (k ≥ 1).
pub fn simpsons_three_eighths(values: &[f64], angle_step_deg: f64) -> CalcResult<f64> {
    const RULE: &str = "Simpson's 3/8 rule";
    if values.len() < 4 || (values.len() - 1) % 3 != 0 {
        return Err(CalcError::insufficient_samples(RULE, "3k + 1 with k >= 1", values.len()));
    }
    validate_ordinates(values, angle_step_deg)?;

    let last = values.len() - 1;
    let weighted: f64 = values
        .iter()
        .enumerate()
        .map(|(i, y)| {
            let weight = if i == 0 || i == last {
                1.0
            } else if i % 3 == 0 {
                2.0
            } else {
                3.0
            };
            weight * y
        })
        .sum();

    let h: Radians = Degrees(angle_step_deg).into();
    Ok(3.0 * h.0 / 8.0 * weighted)
}

fn validate_ordinates(values: &[f64], angle_step_deg: f64) -> CalcResult<()> {
    ensure_positive("angle_step_deg", angle_step_deg)?;
    for value in values {
        ensure_finite("gz_m", *value)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hump(step_deg: f64) -> Vec<(f64, f64)> {
        // rises to a peak near 45° then falls, like a real GZ curve
        let n = (90.0 / step_deg) as usize;
        (0..=n)
            .map(|i| {
                let phi = i as f64 * step_deg;
                (phi, (2.0 * phi.to_radians()).sin() * 0.8)
            })
            .collect()
    }

    #[test]
    fn test_trapezoid_needs_two_points() {
        let samples = [(0.0, 0.0), (10.0, 0.2)];
        assert_eq!(trapezoidal_area(&samples, 5.0, 8.0), 0.0);
        assert_eq!(trapezoidal_area(&samples, 10.0, 20.0), 0.0);
        let empty: [(f64, f64); 0] = [];
        assert_eq!(trapezoidal_area(&empty, 0.0, 90.0), 0.0);
    }

    #[test]
    fn test_trapezoid_closed_range() {
        let samples = [(0.0, 0.0), (30.0, 0.3), (40.0, 0.4), (50.0, 0.1)];
        let area = trapezoidal_area(&samples, 30.0, 40.0);
        assert!((area - 0.35 * 10f64.to_radians()).abs() < 1e-12);
    }

    #[test]
    fn test_trapezoid_and_simpson_agree() {
        let samples = hump(5.0);
        let trap = trapezoidal_area(&samples, 0.0, 90.0);
        let values: Vec<f64> = samples.iter().map(|s| s.1).collect();
        let simpson = simpsons_one_third(&values, 5.0).unwrap();
        assert!(((trap - simpson) / simpson).abs() < 0.05);
        // exact: ∫ 0.8 sin 2φ dφ over [0, π/2] = 0.8
        assert!((simpson - 0.8).abs() < 1e-3);
    }

    #[test]
    fn test_simpson_weights() {
        // 1, 4, 2, 4, 1 weights on unit ordinates sum to 12 → area = 12 · h/3 = 4h
        let area = simpsons_one_third(&[1.0; 5], 1.0).unwrap();
        assert!((area - 4.0 * 1f64.to_radians()).abs() < 1e-12);
    }

    #[test]
    fn test_simpson_rejects_bad_counts() {
        assert!(matches!(
            simpsons_one_third(&[0.0, 1.0], 5.0),
            Err(CalcError::InsufficientSamples { actual: 2, .. })
        ));
        assert!(matches!(
            simpsons_one_third(&[0.0, 1.0, 2.0, 3.0], 5.0),
            Err(CalcError::InsufficientSamples { actual: 4, .. })
        ));
        assert!(simpsons_one_third(&[0.0, 1.0, 2.0], 0.0).is_err());
        assert!(simpsons_one_third(&[0.0, f64::NAN, 2.0], 5.0).is_err());
    }

    #[test]
    fn test_three_eighths() {
        // ∫₀^π/2 sin φ dφ = 1 with 19 ordinates (18 intervals)
        let values: Vec<f64> = (0..=18).map(|i| (i as f64 * 5.0).to_radians().sin()).collect();
        let area = simpsons_three_eighths(&values, 5.0).unwrap();
        assert!((area - 1.0).abs() < 1e-4);
        assert!(simpsons_three_eighths(&[0.0, 1.0, 2.0], 5.0).is_err());
        assert!(simpsons_three_eighths(&[0.0; 5], 5.0).is_err());
    }
}
