//! # Ship Stability Equations
//!
//! The fundamental naval-architecture relations used by every calculation.
//! Keeping them in one place makes it easy to check them against stability
//! booklets and the IS Code.
//!
//! ## Modules
//!
//! - [`stability`] - Transverse stability formulas (GM, KG, GZ, heel, free surface, roll)
//! - [`integration`] - Area under the GZ curve (trapezoidal and Simpson rules)
//!
//! ## Sign Conventions
//!
//! - **Heights**: Measured upward from the keel (K)
//! - **Heel**: Degrees; positive toward the heeling moment
//! - **ΔGM**: Negative is a loss of stability
//! - **Areas**: Metre-radians
//!
//! ## Model Limits
//!
//! The engine uses the wall-sided, small-angle approximation GZ = GM · sin φ
//! for generated curves. It does not integrate over real hull lines.

pub mod integration;
pub mod stability;

pub use integration::{simpsons_one_third, simpsons_three_eighths, trapezoidal_area, ArmSample};

pub use stability::{
    // Centre of gravity and GM
    compute_gm,
    new_kg,
    gm_change_from_shift,
    centre_of_gravity_shift,
    km_from_kb_bm,
    bm_from_inertia,
    // Heel and righting arm
    HeelAngle,
    heel_angle_from_gz,
    heel_angle_from_moment,
    gz_from_moment,
    gz_from_kn,
    gz_small_angle,
    righting_moment,
    // Suspended loads
    crane_gm_change,
    // Free surface
    tank_surface_inertia,
    tank_free_surface_moment,
    free_surface_moment_tm,
    gm_reduction_from_fsm,
    free_surface_moment,
    // Rolling and measurement
    roll_period,
    pendulum_heel_angle,
    pendulum_deflection,
    parallel_sinkage_cm,
};
