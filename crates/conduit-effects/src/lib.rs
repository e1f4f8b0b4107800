//! # Conduit Effects - Handlers
//!
//! Standard implementations of the collaborator traits defined in
//! `conduit-core::effects`.
//!
//! - `time/` - Real and simulated physical clocks
//! - `storage/` - In-memory resource store
//! - `network/` - In-memory storage network with controller and energy model
//! - `topology/` - In-memory world topology
//!
//! Hosts that embed Conduit normally supply their own store, network and
//! topology; the in-memory handlers exist for tests, simulations and small
//! standalone deployments.

#![forbid(unsafe_code)]

pub mod network;
pub mod storage;
pub mod time;
pub mod topology;

pub use network::MemoryNetwork;
pub use storage::MemoryResourceStore;
pub use time::{RealClock, SimulatedClock};
pub use topology::MemoryTopology;
