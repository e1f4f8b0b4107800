//! Storage network membership contract.

use super::storage::ResourceStoreEffects;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;
use uuid::Uuid;

/// Handle assigned by the network to a joined node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NodeId(pub Uuid);

impl NodeId {
    /// Allocate a fresh random node id.
    pub fn new_v4() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "node-{}", self.0)
    }
}

/// What a device declares about itself when joining a network.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkNode {
    /// Energy drawn per tick while active. Zero needs no controller.
    pub energy_usage: u32,
}

impl NetworkNode {
    /// Describe a node with the given per-tick energy cost.
    pub fn new(energy_usage: u32) -> Self {
        Self { energy_usage }
    }
}

/// Operations Conduit requires from the storage network.
pub trait StorageNetworkEffects: Send + Sync {
    /// Add a node to the network graph.
    fn join(&self, node: NetworkNode) -> NodeId;

    /// Remove a node. Unknown ids are ignored.
    fn leave(&self, node: NodeId);

    /// Whether the node is joined and the network can power it.
    fn is_node_active(&self, node: NodeId) -> bool;

    /// The network's resource store, if it currently exposes one.
    fn storage(&self) -> Option<Arc<dyn ResourceStoreEffects>>;
}

impl<T: StorageNetworkEffects + ?Sized> StorageNetworkEffects for Arc<T> {
    fn join(&self, node: NetworkNode) -> NodeId {
        (**self).join(node)
    }

    fn leave(&self, node: NodeId) {
        (**self).leave(node);
    }

    fn is_node_active(&self, node: NodeId) -> bool {
        (**self).is_node_active(node)
    }

    fn storage(&self) -> Option<Arc<dyn ResourceStoreEffects>> {
        (**self).storage()
    }
}
