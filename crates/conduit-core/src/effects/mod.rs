//! Collaborator effect traits
//!
//! Pure trait definitions for everything Conduit consumes from its host.
//! This module defines **what** the host must provide; handlers in
//! `conduit-effects` (or the embedding host) define **how**.
//!
//! # Effect Classification
//!
//! - **Storage**: the network's resource store (enumerate, insert, extract)
//! - **Network**: node membership and activeness
//! - **Topology**: which kind occupies a position
//! - **Time**: physical clock for cache windows
//!
//! All traits are synchronous and `Send + Sync` so a single handler can be
//! shared between devices through `Arc`.

pub mod network;
pub mod storage;
pub mod time;
pub mod topology;

pub use network::{NetworkNode, NodeId, StorageNetworkEffects};
pub use storage::ResourceStoreEffects;
pub use time::{PhysicalTime, PhysicalTimeEffects};
pub use topology::TopologyEffects;
