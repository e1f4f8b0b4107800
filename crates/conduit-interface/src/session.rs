//! Device membership in a storage network
//!
//! [`NetworkSession`] owns the node a network interface registers. The slot
//! view and the activation machine both read through it, so the store stops
//! being reachable at the same moment the node goes inactive or leaves.

use crate::activation::ConnectivitySampler;
use crate::slot_view::StorageAccess;
use conduit_core::effects::{NetworkNode, NodeId, ResourceStoreEffects, StorageNetworkEffects};
use parking_lot::RwLock;
use std::sync::Arc;
use tracing::debug;

/// Join/leave handle for one device's node.
pub struct NetworkSession {
    network: Arc<dyn StorageNetworkEffects>,
    node: NetworkNode,
    joined: RwLock<Option<NodeId>>,
}

impl NetworkSession {
    /// Prepare a session. The node is not joined until [`attach`](Self::attach).
    pub fn new(network: Arc<dyn StorageNetworkEffects>, node: NetworkNode) -> Self {
        Self {
            network,
            node,
            joined: RwLock::new(None),
        }
    }

    /// Join the network. A second call while joined returns the same id.
    pub fn attach(&self) -> NodeId {
        let mut joined = self.joined.write();
        if let Some(id) = *joined {
            return id;
        }
        let id = self.network.join(self.node);
        debug!(node = %id, energy_usage = self.node.energy_usage, "session attached");
        *joined = Some(id);
        id
    }

    /// Leave the network. Does nothing when not joined.
    pub fn detach(&self) {
        if let Some(id) = self.joined.write().take() {
            self.network.leave(id);
            debug!(node = %id, "session detached");
        }
    }

    /// Id of the joined node
    pub fn node_id(&self) -> Option<NodeId> {
        *self.joined.read()
    }

    /// The node declared at construction
    pub fn node(&self) -> NetworkNode {
        self.node
    }

    /// Whether the node is joined and powered.
    pub fn is_active(&self) -> bool {
        self.node_id().is_some_and(|id| self.network.is_node_active(id))
    }
}

impl ConnectivitySampler for NetworkSession {
    fn sample(&self) -> Option<bool> {
        self.node_id().map(|id| self.network.is_node_active(id))
    }
}

impl StorageAccess for NetworkSession {
    fn storage(&self) -> Option<Arc<dyn ResourceStoreEffects>> {
        if self.is_active() {
            self.network.storage()
        } else {
            None
        }
    }
}

impl std::fmt::Debug for NetworkSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NetworkSession")
            .field("node", &self.node)
            .field("joined", &self.node_id())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use conduit_effects::{MemoryNetwork, MemoryResourceStore};

    fn powered_network() -> Arc<MemoryNetwork> {
        Arc::new(MemoryNetwork::with_controller(
            Arc::new(MemoryResourceStore::new()),
            100,
        ))
    }

    #[test]
    fn test_unjoined_session_has_no_sample() {
        let session = NetworkSession::new(powered_network(), NetworkNode::new(2));
        assert_eq!(session.sample(), None);
        assert!(session.storage().is_none());
    }

    #[test]
    fn test_attach_is_idempotent() {
        let network = powered_network();
        let session = NetworkSession::new(network.clone(), NetworkNode::new(2));
        let first = session.attach();
        assert_eq!(session.attach(), first);
        assert_eq!(network.node_count(), 1);
        assert_eq!(session.sample(), Some(true));
        assert!(session.storage().is_some());
    }

    #[test]
    fn test_detach_leaves_network() {
        let network = powered_network();
        let session = NetworkSession::new(network.clone(), NetworkNode::new(2));
        let id = session.attach();
        session.detach();
        session.detach();
        assert!(!network.is_joined(id));
        assert_eq!(session.node_id(), None);
        assert!(session.storage().is_none());
    }

    #[test]
    fn test_unpowered_node_hides_storage() {
        let network = Arc::new(MemoryNetwork::new(Arc::new(MemoryResourceStore::new())));
        let session = NetworkSession::new(network, NetworkNode::new(2));
        session.attach();
        assert_eq!(session.sample(), Some(false));
        assert!(session.storage().is_none());
    }
}
