//! Host-facing devices
//!
//! A device composes an [`ActivationStateMachine`] with a sampling source and
//! a sink, and exposes the lifecycle hooks the host calls: placement,
//! removal, the per-tick entry point and neighbor change events.

use crate::activation::{ActivationState, ActivationStateMachine, ActivenessSink, Transition};
use crate::neighbors::{NeighborSampler, NeighborScanner};
use crate::session::NetworkSession;
use crate::slot_view::SlotViewAdapter;
use conduit_core::effects::{NetworkNode, PhysicalTimeEffects, StorageNetworkEffects};
use conduit_core::{Actor, BlockPos, ConduitConfig};
use std::sync::Arc;
use tracing::info;

/// Lifecycle hooks driven by the host.
pub trait DeviceLifecycle {
    /// Device was placed or loaded. Evaluates activeness immediately.
    fn attach(&mut self) -> Option<Transition>;

    /// Device was removed or unloaded. No notification is emitted.
    fn detach(&mut self);

    /// Once per scheduling quantum.
    fn on_tick(&mut self) -> Option<Transition>;

    /// An adjacent block changed.
    fn on_neighbor_changed(&mut self) -> Option<Transition> {
        self.on_tick()
    }

    /// Committed activation state
    fn activation_state(&self) -> ActivationState;

    /// Whether the committed flag is `true`
    fn is_active(&self) -> bool {
        self.activation_state().is_active()
    }
}

impl<T: DeviceLifecycle + ?Sized> DeviceLifecycle for Box<T> {
    fn attach(&mut self) -> Option<Transition> {
        (**self).attach()
    }

    fn detach(&mut self) {
        (**self).detach();
    }

    fn on_tick(&mut self) -> Option<Transition> {
        (**self).on_tick()
    }

    fn on_neighbor_changed(&mut self) -> Option<Transition> {
        (**self).on_neighbor_changed()
    }

    fn activation_state(&self) -> ActivationState {
        (**self).activation_state()
    }
}

/// Device without a network handle; live while a peer block is adjacent.
#[derive(Debug)]
pub struct StandaloneInterface<S> {
    sampler: NeighborSampler,
    machine: ActivationStateMachine,
    sink: S,
}

impl<S: ActivenessSink> StandaloneInterface<S> {
    /// Create a detached device at `pos`. Call [`DeviceLifecycle::attach`]
    /// once it is placed.
    pub fn new(pos: BlockPos, scanner: NeighborScanner, sink: S) -> Self {
        let mut machine = ActivationStateMachine::new();
        machine.detach();
        Self {
            sampler: NeighborSampler::new(scanner, pos),
            machine,
            sink,
        }
    }

    /// Device position
    pub fn pos(&self) -> BlockPos {
        self.sampler.pos()
    }

    /// Notification sink
    pub fn sink(&self) -> &S {
        &self.sink
    }
}

impl<S: ActivenessSink> DeviceLifecycle for StandaloneInterface<S> {
    fn attach(&mut self) -> Option<Transition> {
        self.machine.attach();
        info!(pos = %self.pos(), "standalone interface attached");
        self.machine.poll(&self.sampler, &mut self.sink)
    }

    fn detach(&mut self) {
        self.machine.detach();
        info!(pos = %self.pos(), "standalone interface detached");
    }

    fn on_tick(&mut self) -> Option<Transition> {
        self.machine.poll(&self.sampler, &mut self.sink)
    }

    fn activation_state(&self) -> ActivationState {
        self.machine.state()
    }
}

/// Device that joins a storage network and exposes its items as slots.
///
/// The energy usage is read from the configuration once, here. A changed
/// configuration reaches the network only through a newly built device.
pub struct NetworkInterface<S> {
    session: Arc<NetworkSession>,
    view: SlotViewAdapter,
    machine: ActivationStateMachine,
    sink: S,
}

impl<S: ActivenessSink> NetworkInterface<S> {
    /// Create a detached device for `network`.
    pub fn new(
        config: &ConduitConfig,
        network: Arc<dyn StorageNetworkEffects>,
        clock: Arc<dyn PhysicalTimeEffects>,
        sink: S,
    ) -> Self {
        let session = Arc::new(NetworkSession::new(
            network,
            NetworkNode::new(config.energy_usage),
        ));
        let actor = Actor::from(&ConduitConfig::interface_kind());
        let view = SlotViewAdapter::new(session.clone(), clock, actor);
        let mut machine = ActivationStateMachine::new();
        machine.detach();
        Self {
            session,
            view,
            machine,
            sink,
        }
    }

    /// Slot-indexed view of the network's items.
    pub fn item_handler(&mut self) -> &mut SlotViewAdapter {
        &mut self.view
    }

    /// The device's network membership
    pub fn session(&self) -> &Arc<NetworkSession> {
        &self.session
    }

    /// Notification sink
    pub fn sink(&self) -> &S {
        &self.sink
    }
}

impl<S: ActivenessSink> DeviceLifecycle for NetworkInterface<S> {
    fn attach(&mut self) -> Option<Transition> {
        let node = self.session.attach();
        self.machine.attach();
        info!(
            %node,
            energy_usage = self.session.node().energy_usage,
            "network interface attached"
        );
        self.machine.poll(self.session.as_ref(), &mut self.sink)
    }

    fn detach(&mut self) {
        self.machine.detach();
        self.session.detach();
        info!("network interface detached");
    }

    fn on_tick(&mut self) -> Option<Transition> {
        self.machine.poll(self.session.as_ref(), &mut self.sink)
    }

    fn activation_state(&self) -> ActivationState {
        self.machine.state()
    }
}

impl<S> std::fmt::Debug for NetworkInterface<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NetworkInterface")
            .field("session", &self.session)
            .field("machine", &self.machine)
            .finish_non_exhaustive()
    }
}
