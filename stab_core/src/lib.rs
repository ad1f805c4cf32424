//! # stab_core - Ship Stability Calculation Engine
//!
//! `stab_core` computes transverse stability for a vessel described by its
//! displacement, KM and KG: metacentric height, righting-arm (GZ) curves,
//! intact stability criteria, and the stability effect of operational events
//! such as loading, cargo shift, crane lifts, slack tanks, docking, flooding
//! and wind. All inputs and outputs are JSON-serializable.
//!
//! ## Design Philosophy
//!
//! - **Stateless**: Pure functions that take input and return results
//! - **JSON-First**: All types implement Serialize/Deserialize
//! - **Rich Errors**: Structured error types, not just strings
//! - **Degenerate physics is a value**: negative GM gives a capsize heel or
//!   an absent roll period, never an error
//!
//! ## Quick Start
//!
//! ```rust
//! use stab_core::calculations::{run, Scenario, ScenarioOutcome, StabilityRequest};
//! use stab_core::calculations::intact::IntactInput;
//! use stab_core::vessel::VesselState;
//!
//! let vessel = VesselState::new(25_000.0, 8.5, 7.2);
//! let request = StabilityRequest::new("Departure", vessel, Scenario::Intact(IntactInput::default()));
//!
//! if let ScenarioOutcome::Intact(result) = run(&request).unwrap() {
//!     assert!(result.evaluation.all_passed);
//! }
//! ```
//!
//! ## Modules
//!
//! - [`vessel`] - Vessel state, load items and tanks
//! - [`equations`] - Closed-form stability formulas and area integration
//! - [`calculations`] - Curves, criteria and scenario calculators
//! - [`settings`] - Tunable model constants
//! - [`units`] - Type-safe unit wrappers
//! - [`errors`] - Structured error types
//!
//! ## Model Limits
//!
//! Generated curves use the wall-sided approximation GZ = GM · sin φ and the
//! drydock and damage models are simplified rules. Results are suitable for
//! training and quick checks, not for replacing an approved stability booklet.

pub mod calculations;
pub mod equations;
pub mod errors;
pub mod settings;
pub mod units;
pub mod vessel;

// Re-export commonly used types at crate root for convenience
pub use calculations::{run, Scenario, ScenarioOutcome, StabilityRequest};
pub use errors::{CalcError, CalcResult};
pub use settings::StabilitySettings;
pub use vessel::{LoadItem, TankState, VesselState};
