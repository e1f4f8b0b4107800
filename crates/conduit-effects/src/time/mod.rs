//! Time effect handlers
//!
//! Implementations of `PhysicalTimeEffects` from `conduit-core`.

pub mod real;
pub mod simulated;

pub use real::RealClock;
pub use simulated::SimulatedClock;
