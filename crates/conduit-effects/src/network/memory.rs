//! In-memory storage network
//!
//! Models the parts of a storage network Conduit observes: which nodes are
//! joined, whether a controller supplies energy, and how much. A node that
//! draws energy is active only while a controller is present and the
//! available energy covers the demand of every joined node. A node with zero
//! energy usage is active as soon as it is joined.

use crate::storage::MemoryResourceStore;
use conduit_core::effects::{NetworkNode, NodeId, ResourceStoreEffects, StorageNetworkEffects};
use indexmap::IndexMap;
use parking_lot::RwLock;
use std::sync::Arc;
use tracing::debug;

#[derive(Debug, Default)]
struct NetworkState {
    nodes: IndexMap<NodeId, NetworkNode>,
    controller: bool,
    available_energy: u64,
    storage_online: bool,
}

impl NetworkState {
    fn demand(&self) -> u64 {
        self.nodes
            .values()
            .map(|n| u64::from(n.energy_usage))
            .fold(0, u64::saturating_add)
    }
}

/// Storage network backed by a [`MemoryResourceStore`].
#[derive(Debug)]
pub struct MemoryNetwork {
    state: RwLock<NetworkState>,
    store: Arc<MemoryResourceStore>,
}

impl MemoryNetwork {
    /// Create a network with no controller around `store`.
    pub fn new(store: Arc<MemoryResourceStore>) -> Self {
        Self {
            state: RwLock::new(NetworkState {
                storage_online: true,
                ..NetworkState::default()
            }),
            store,
        }
    }

    /// Create a network with a controller supplying `available_energy`.
    pub fn with_controller(store: Arc<MemoryResourceStore>, available_energy: u64) -> Self {
        let network = Self::new(store);
        network.set_controller(true);
        network.set_available_energy(available_energy);
        network
    }

    /// Place or remove the controller
    pub fn set_controller(&self, present: bool) {
        self.state.write().controller = present;
    }

    /// Set the energy the controller can supply per tick
    pub fn set_available_energy(&self, energy: u64) {
        self.state.write().available_energy = energy;
    }

    /// Toggle whether the network exposes its store
    pub fn set_storage_online(&self, online: bool) {
        self.state.write().storage_online = online;
    }

    /// The backing store, for direct inspection and external mutation
    pub fn store(&self) -> &Arc<MemoryResourceStore> {
        &self.store
    }

    /// Number of joined nodes
    pub fn node_count(&self) -> usize {
        self.state.read().nodes.len()
    }

    /// Whether `node` is currently joined
    pub fn is_joined(&self, node: NodeId) -> bool {
        self.state.read().nodes.contains_key(&node)
    }
}

impl StorageNetworkEffects for MemoryNetwork {
    fn join(&self, node: NetworkNode) -> NodeId {
        let id = NodeId::new_v4();
        self.state.write().nodes.insert(id, node);
        debug!(%id, energy_usage = node.energy_usage, "node joined network");
        id
    }

    fn leave(&self, node: NodeId) {
        if self.state.write().nodes.shift_remove(&node).is_some() {
            debug!(id = %node, "node left network");
        }
    }

    fn is_node_active(&self, node: NodeId) -> bool {
        let state = self.state.read();
        match state.nodes.get(&node) {
            None => false,
            Some(n) if n.energy_usage == 0 => true,
            Some(_) => state.controller && state.available_energy >= state.demand(),
        }
    }

    fn storage(&self) -> Option<Arc<dyn ResourceStoreEffects>> {
        if self.state.read().storage_online {
            Some(self.store.clone() as Arc<dyn ResourceStoreEffects>)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn network() -> MemoryNetwork {
        MemoryNetwork::new(Arc::new(MemoryResourceStore::new()))
    }

    #[test]
    fn test_unknown_node_is_inactive() {
        assert!(!network().is_node_active(NodeId::new_v4()));
    }

    #[test]
    fn test_zero_energy_node_needs_no_controller() {
        let network = network();
        let id = network.join(NetworkNode::new(0));
        assert!(network.is_node_active(id));
    }

    #[test]
    fn test_energy_node_needs_controller_and_supply() {
        let network = network();
        let id = network.join(NetworkNode::new(2));
        assert!(!network.is_node_active(id));

        network.set_controller(true);
        network.set_available_energy(1);
        assert!(!network.is_node_active(id));

        network.set_available_energy(2);
        assert!(network.is_node_active(id));
    }

    #[test]
    fn test_demand_is_summed_over_joined_nodes() {
        let network = MemoryNetwork::with_controller(Arc::new(MemoryResourceStore::new()), 3);
        let first = network.join(NetworkNode::new(2));
        assert!(network.is_node_active(first));

        let second = network.join(NetworkNode::new(2));
        assert!(!network.is_node_active(first));
        assert!(!network.is_node_active(second));

        network.leave(second);
        assert!(network.is_node_active(first));
    }

    #[test]
    fn test_leave_is_idempotent() {
        let network = network();
        let id = network.join(NetworkNode::new(0));
        network.leave(id);
        network.leave(id);
        assert_eq!(network.node_count(), 0);
        assert!(!network.is_joined(id));
    }

    #[test]
    fn test_offline_storage_is_not_exposed() {
        let network = network();
        assert!(network.storage().is_some());
        network.set_storage_online(false);
        assert!(network.storage().is_none());
    }
}
