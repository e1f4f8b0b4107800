//! # Conduit Interface
//!
//! Bridges a slot-indexed inventory protocol onto a quantity-based storage
//! network and reports whether each bridging device is currently live.
//!
//! ## Core Concepts
//!
//! - **Slot view** ([`SlotViewAdapter`]): presents the network's items as a
//!   contiguous slot range plus one overflow slot. The slot count is cached
//!   for [`CACHE_WINDOW`]; per-slot reads and transfers always re-enumerate.
//! - **Neighbor scanning** ([`NeighborScanner`]): a standalone device is live
//!   when any orthogonal neighbor is an allow-listed peer kind.
//! - **Activation** ([`ActivationStateMachine`]): turns a per-tick sample into
//!   a committed flag and notifies the host only when the flag flips.
//! - **Devices** ([`StandaloneInterface`], [`NetworkInterface`]): compose the
//!   above behind [`DeviceLifecycle`].
//! - **Scheduling** ([`TickScheduler`]): drives every registered device once
//!   per host tick.
//!
//! Every protocol call is total. An unreachable store, an out-of-range slot
//! or a non-positive quantity yields an empty or zero result, never an error.

#![forbid(unsafe_code)]

/// Activation state machine and notification sinks
pub mod activation;

/// Host-facing devices and their lifecycle
pub mod device;

/// Neighbor scanning and the peer allow-list
pub mod neighbors;

/// Per-tick device scheduling
pub mod scheduler;

/// Device to network composition handle
pub mod session;

/// Slot-indexed view over the resource store
pub mod slot_view;

pub use activation::{
    ActivationState, ActivationStateMachine, ActiveSignal, ActivenessSink, ConnectivitySampler,
    Transition,
};
pub use device::{DeviceLifecycle, NetworkInterface, StandaloneInterface};
pub use neighbors::{NeighborSampler, NeighborScanner, PeerAllowList};
pub use scheduler::{DeviceId, TickScheduler};
pub use session::NetworkSession;
pub use slot_view::{
    CacheState, SlotInventory, SlotViewAdapter, StorageAccess, CACHE_WINDOW,
    OVERFLOW_SLOT_CAPACITY,
};
