//! World topology contract.

use crate::position::BlockPos;
use crate::types::KindId;
use std::sync::Arc;

/// Answers which kind of block occupies a position.
pub trait TopologyEffects: Send + Sync {
    /// Kind at `pos`, or `None` for empty or unloaded positions.
    fn kind_at(&self, pos: BlockPos) -> Option<KindId>;
}

impl<T: TopologyEffects + ?Sized> TopologyEffects for Arc<T> {
    fn kind_at(&self, pos: BlockPos) -> Option<KindId> {
        (**self).kind_at(pos)
    }
}
