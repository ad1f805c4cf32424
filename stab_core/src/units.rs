//! # Unit Types
//!
//! Type-safe wrappers for the units used in stability work. They are plain
//! f64 newtypes that serialize as bare numbers.
//!
//! ## Conventions
//!
//! Everything is metric, matching stability booklets and the IS Code:
//! - Mass / displacement: tonnes (t)
//! - Length / heights above keel: metres (m)
//! - Heel angles: degrees in inputs and outputs, radians inside integration
//! - Dynamic stability (area under GZ): metre-radians (m·rad)
//!
//! ## Example
//!
//! ```rust
//! use stab_core::units::{Degrees, Radians};
//!
//! let heel = Degrees(30.0);
//! let rad: Radians = heel.into();
//! assert!((rad.0 - std::f64::consts::FRAC_PI_6).abs() < 1e-12);
//! ```

use serde::{Deserialize, Serialize};
use std::ops::{Add, Div, Mul, Sub};

// ============================================================================
// Angle Units
// ============================================================================

/// Angle in degrees
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Degrees(pub f64);

/// Angle in radians
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Radians(pub f64);

impl From<Degrees> for Radians {
    fn from(deg: Degrees) -> Self {
        Radians(deg.0.to_radians())
    }
}

impl From<Radians> for Degrees {
    fn from(rad: Radians) -> Self {
        Degrees(rad.0.to_degrees())
    }
}

impl Degrees {
    /// Sine of the angle
    pub fn sin(self) -> f64 {
        self.0.to_radians().sin()
    }
}

// ============================================================================
// Mass and Moment Units
// ============================================================================

/// Mass in metric tonnes
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Tonnes(pub f64);

/// Length in metres
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Metres(pub f64);

/// Moment in tonne-metres
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TonneMetres(pub f64);

impl Mul<Metres> for Tonnes {
    type Output = TonneMetres;
    fn mul(self, rhs: Metres) -> TonneMetres {
        TonneMetres(self.0 * rhs.0)
    }
}

impl Div<Tonnes> for TonneMetres {
    type Output = Metres;
    fn div(self, rhs: Tonnes) -> Metres {
        Metres(self.0 / rhs.0)
    }
}

/// Area under a righting-arm curve in metre-radians
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MetreRadians(pub f64);

// ============================================================================
// Arithmetic Implementations (macro to reduce boilerplate)
// ============================================================================

macro_rules! impl_arithmetic {
    ($type:ty) => {
        impl Add for $type {
            type Output = Self;
            fn add(self, rhs: Self) -> Self::Output {
                Self(self.0 + rhs.0)
            }
        }

        impl Sub for $type {
            type Output = Self;
            fn sub(self, rhs: Self) -> Self::Output {
                Self(self.0 - rhs.0)
            }
        }

        impl Mul<f64> for $type {
            type Output = Self;
            fn mul(self, rhs: f64) -> Self::Output {
                Self(self.0 * rhs)
            }
        }

        impl Div<f64> for $type {
            type Output = Self;
            fn div(self, rhs: f64) -> Self::Output {
                Self(self.0 / rhs)
            }
        }

        impl $type {
            /// Get the raw f64 value
            pub fn value(self) -> f64 {
                self.0
            }

            /// Create from raw f64 value
            pub fn new(value: f64) -> Self {
                Self(value)
            }
        }
    };
}

impl_arithmetic!(Degrees);
impl_arithmetic!(Radians);
impl_arithmetic!(Tonnes);
impl_arithmetic!(Metres);
impl_arithmetic!(TonneMetres);
impl_arithmetic!(MetreRadians);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_degrees_to_radians() {
        let rad: Radians = Degrees(180.0).into();
        assert!((rad.0 - std::f64::consts::PI).abs() < 1e-12);

        let deg: Degrees = Radians(std::f64::consts::FRAC_PI_2).into();
        assert!((deg.0 - 90.0).abs() < 1e-12);
    }

    #[test]
    fn test_moment_arithmetic() {
        let moment = Tonnes(50.0) * Metres(4.0);
        assert_eq!(moment, TonneMetres(200.0));
        let lever = moment / Tonnes(25_000.0);
        assert!((lever.0 - 0.008).abs() < 1e-12);
    }

    #[test]
    fn test_arithmetic() {
        let a = Metres(10.0);
        let b = Metres(4.0);
        assert_eq!((a + b).0, 14.0);
        assert_eq!((a - b).0, 6.0);
        assert_eq!((a * 2.0).0, 20.0);
        assert_eq!((a / 2.0).0, 5.0);
    }

    #[test]
    fn test_serialization() {
        let heel = Degrees(12.5);
        let json = serde_json::to_string(&heel).unwrap();
        assert_eq!(json, "12.5");
    }
}
