//! Per-tick device scheduling
//!
//! The host owns the clock and calls [`TickScheduler::tick`] once per
//! scheduling quantum. Devices are polled in registration order.

use crate::activation::Transition;
use crate::device::DeviceLifecycle;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;
use uuid::Uuid;

/// Handle of a registered device.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DeviceId(pub Uuid);

impl DeviceId {
    /// Allocate a fresh random id
    pub fn new_v4() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for DeviceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "device-{}", self.0)
    }
}

/// Registry of attached devices driven by the host tick.
#[derive(Debug)]
pub struct TickScheduler<D> {
    devices: IndexMap<DeviceId, D>,
    tick: u64,
}

impl<D: DeviceLifecycle> TickScheduler<D> {
    /// Create an empty scheduler
    pub fn new() -> Self {
        Self {
            devices: IndexMap::new(),
            tick: 0,
        }
    }

    /// Attach `device` and start ticking it. Returns the new id together
    /// with the transition committed on placement, if any.
    pub fn register(&mut self, mut device: D) -> (DeviceId, Option<Transition>) {
        let id = DeviceId::new_v4();
        let transition = device.attach();
        self.devices.insert(id, device);
        debug!(
            %id,
            devices = self.devices.len(),
            placed = ?transition.map(|t| t.to),
            "device registered"
        );
        (id, transition)
    }

    /// Stop ticking a device and detach it.
    pub fn remove(&mut self, id: DeviceId) -> Option<D> {
        let mut device = self.devices.shift_remove(&id)?;
        device.detach();
        debug!(%id, devices = self.devices.len(), "device removed");
        Some(device)
    }

    /// Run one tick over every device. Returns the transitions it produced.
    pub fn tick(&mut self) -> Vec<(DeviceId, Transition)> {
        self.tick += 1;
        let transitions: Vec<_> = self
            .devices
            .iter_mut()
            .filter_map(|(id, device)| device.on_tick().map(|t| (*id, t)))
            .collect();
        if !transitions.is_empty() {
            debug!(tick = self.tick, transitions = transitions.len(), "tick");
        }
        transitions
    }

    /// Forward a neighbor change event to one device.
    pub fn neighbor_changed(&mut self, id: DeviceId) -> Option<Transition> {
        self.devices.get_mut(&id)?.on_neighbor_changed()
    }

    /// Registered device
    pub fn get(&self, id: DeviceId) -> Option<&D> {
        self.devices.get(&id)
    }

    /// Registered device, mutably
    pub fn get_mut(&mut self, id: DeviceId) -> Option<&mut D> {
        self.devices.get_mut(&id)
    }

    /// Number of registered devices
    pub fn len(&self) -> usize {
        self.devices.len()
    }

    /// Whether no device is registered
    pub fn is_empty(&self) -> bool {
        self.devices.is_empty()
    }

    /// Ticks run so far
    pub fn tick_count(&self) -> u64 {
        self.tick
    }
}

impl<D: DeviceLifecycle> Default for TickScheduler<D> {
    fn default() -> Self {
        Self::new()
    }
}
