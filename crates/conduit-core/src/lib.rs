//! # Conduit Core - Foundation
//!
//! **Purpose**: Define the vocabulary shared by every Conduit crate.
//!
//! This crate holds the resource data model, the contracts Conduit requires
//! from its external collaborators, and the configuration surface.
//!
//! # Architecture Constraints
//!
//! - YES Resource and position types
//! - YES Collaborator effect traits (store, network, topology, clock)
//! - YES Configuration and error types
//! - NO handler implementations (those live in `conduit-effects`)
//! - NO slot view or activation logic (those live in `conduit-interface`)
//!
//! All collaborator calls are synchronous. The host drives Conduit from a
//! single-threaded periodic tick, so nothing here suspends.

#![forbid(unsafe_code)]

/// Configuration types and validation
pub mod config;

/// Collaborator effect traits
pub mod effects;

/// Unified error type
pub mod errors;

/// Block positions and orthogonal directions
pub mod position;

/// Observable values with poll-based subscriptions
pub mod reactive;

/// Resource identities, amounts and stacks
pub mod types;

pub use config::{ConduitConfig, ConfigValidation, DEFAULT_ENERGY_USAGE, MAX_ENERGY_USAGE};
pub use errors::{ConduitError, Result};
pub use position::{BlockPos, Direction};
pub use reactive::{Observable, Subscription};
pub use types::{
    Action, Actor, FluidResource, ItemResource, ItemStack, KindId, Resource, ResourceAmount,
    DEFAULT_MAX_STACK_SIZE,
};
