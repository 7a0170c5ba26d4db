pub mod clock;
pub mod orrery;

pub use clock::SimulationClock;
pub use orrery::{Body, BodyID, BodyInfo, BodyState, OrbitalParams, Orrery, OrreryBuilder};
