//! In-memory world topology

use conduit_core::effects::TopologyEffects;
use conduit_core::{BlockPos, KindId};
use parking_lot::RwLock;
use std::collections::HashMap;

/// Sparse map of occupied positions.
#[derive(Debug, Default)]
pub struct MemoryTopology {
    blocks: RwLock<HashMap<BlockPos, KindId>>,
}

impl MemoryTopology {
    /// Create an empty world
    pub fn new() -> Self {
        Self::default()
    }

    /// Place a block of `kind` at `pos`, replacing whatever was there
    pub fn place(&self, pos: BlockPos, kind: impl Into<KindId>) {
        self.blocks.write().insert(pos, kind.into());
    }

    /// Clear `pos`, returning the kind that was there
    pub fn remove(&self, pos: BlockPos) -> Option<KindId> {
        self.blocks.write().remove(&pos)
    }
}

impl TopologyEffects for MemoryTopology {
    fn kind_at(&self, pos: BlockPos) -> Option<KindId> {
        self.blocks.read().get(&pos).cloned()
    }
}
