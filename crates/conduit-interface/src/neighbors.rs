//! Neighbor scanning for standalone devices
//!
//! A standalone interface has no network handle of its own. It counts as
//! connected while at least one of its six orthogonal neighbors is a block of
//! an allow-listed peer kind.

use crate::activation::ConnectivitySampler;
use conduit_core::effects::TopologyEffects;
use conduit_core::{BlockPos, ConduitConfig, ConduitError, Direction, KindId, Result};
use once_cell::sync::OnceCell;
use std::collections::HashSet;
use std::sync::Arc;
use tracing::trace;

static GLOBAL_ALLOW_LIST: OnceCell<Arc<PeerAllowList>> = OnceCell::new();

/// Set of block kinds that count as a compatible peer.
///
/// Fixed once built. The process-wide list is installed at most once, before
/// any device reads it; devices constructed earlier see the default list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PeerAllowList {
    kinds: HashSet<KindId>,
}

impl PeerAllowList {
    /// Build from an explicit set of kinds
    pub fn new(kinds: impl IntoIterator<Item = KindId>) -> Self {
        Self {
            kinds: kinds.into_iter().collect(),
        }
    }

    /// Build from the configured peer kinds
    pub fn from_config(config: &ConduitConfig) -> Self {
        Self::new(config.peer_kinds.iter().cloned())
    }

    /// Whether `kind` is a compatible peer
    pub fn contains(&self, kind: &KindId) -> bool {
        self.kinds.contains(kind)
    }

    /// Number of allowed kinds
    pub fn len(&self) -> usize {
        self.kinds.len()
    }

    /// Whether no kind is allowed
    pub fn is_empty(&self) -> bool {
        self.kinds.is_empty()
    }

    /// Install the process-wide list.
    ///
    /// Fails if a list was already installed, or if [`PeerAllowList::global`]
    /// has already resolved the default.
    pub fn install_global(list: PeerAllowList) -> Result<()> {
        GLOBAL_ALLOW_LIST
            .set(Arc::new(list))
            .map_err(|_| ConduitError::already_initialized("peer allow-list"))
    }

    /// The process-wide list, falling back to the default configuration.
    pub fn global() -> Arc<PeerAllowList> {
        GLOBAL_ALLOW_LIST
            .get_or_init(|| Arc::new(Self::from_config(&ConduitConfig::default())))
            .clone()
    }
}

impl Default for PeerAllowList {
    fn default() -> Self {
        Self::from_config(&ConduitConfig::default())
    }
}

/// Scans the neighbors of a position against an allow-list.
#[derive(Clone)]
pub struct NeighborScanner {
    allow: Arc<PeerAllowList>,
    topology: Arc<dyn TopologyEffects>,
}

impl NeighborScanner {
    /// Create a scanner over `topology`
    pub fn new(allow: Arc<PeerAllowList>, topology: Arc<dyn TopologyEffects>) -> Self {
        Self { allow, topology }
    }

    /// The allow-list in use
    pub fn allow_list(&self) -> &PeerAllowList {
        &self.allow
    }

    /// First neighbor of `pos` that is a compatible peer, in
    /// [`Direction::ALL`] order. Stops at the first match.
    pub fn first_peer(&self, pos: BlockPos) -> Option<(Direction, KindId)> {
        pos.neighbors().find_map(|(direction, neighbor)| {
            self.topology
                .kind_at(neighbor)
                .filter(|kind| self.allow.contains(kind))
                .map(|kind| (direction, kind))
        })
    }

    /// Whether any orthogonal neighbor of `pos` is a compatible peer.
    pub fn should_be_active(&self, pos: BlockPos) -> bool {
        let peer = self.first_peer(pos);
        trace!(%pos, peer = ?peer, "neighbor scan");
        peer.is_some()
    }
}

impl std::fmt::Debug for NeighborScanner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NeighborScanner")
            .field("allow", &self.allow)
            .finish_non_exhaustive()
    }
}

/// Binds a scanner to one device position.
#[derive(Debug, Clone)]
pub struct NeighborSampler {
    scanner: NeighborScanner,
    pos: BlockPos,
}

impl NeighborSampler {
    /// Sample the neighbors of `pos`
    pub fn new(scanner: NeighborScanner, pos: BlockPos) -> Self {
        Self { scanner, pos }
    }

    /// Device position
    pub fn pos(&self) -> BlockPos {
        self.pos
    }
}

impl ConnectivitySampler for NeighborSampler {
    fn sample(&self) -> Option<bool> {
        Some(self.scanner.should_be_active(self.pos))
    }
}
