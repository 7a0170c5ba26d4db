//! Orbital kinematics for the display-scale solar system.
//!
//! Nothing in here integrates anything: every position is a closed-form
//! function of elapsed time, so states can be recomputed from scratch every
//! frame without drifting.
//! - [speeds] turns periods into angular speeds relative to a [ReferenceFrame]
//! - [kinematics] turns angular speeds and orbit shapes into [SolvedState]s

pub mod kinematics;
pub mod speeds;

pub use kinematics::{solve_dependent_position, solve_position, Orbit, SolvedState};
pub use speeds::{derive_speeds, AngularSpeeds, ReferenceFrame};
