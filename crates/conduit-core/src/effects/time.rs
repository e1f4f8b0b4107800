//! Physical time contract.
//!
//! Cache windows are measured against this clock instead of the system clock
//! so tests and simulations can step time explicitly.

use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;

/// Milliseconds on the host's physical clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PhysicalTime {
    /// Milliseconds since the clock's epoch
    pub ts_ms: u64,
}

impl PhysicalTime {
    /// Wrap a millisecond timestamp.
    pub const fn from_millis(ts_ms: u64) -> Self {
        Self { ts_ms }
    }

    /// Time elapsed since `earlier`, zero if the clock went backwards.
    pub fn saturating_since(self, earlier: PhysicalTime) -> Duration {
        Duration::from_millis(self.ts_ms.saturating_sub(earlier.ts_ms))
    }
}

/// Wall-clock source.
pub trait PhysicalTimeEffects: Send + Sync {
    /// Current physical time.
    fn physical_time(&self) -> PhysicalTime;
}

impl<T: PhysicalTimeEffects + ?Sized> PhysicalTimeEffects for Arc<T> {
    fn physical_time(&self) -> PhysicalTime {
        (**self).physical_time()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_saturating_since_never_negative() {
        let later = PhysicalTime::from_millis(1_500);
        let earlier = PhysicalTime::from_millis(500);
        assert_eq!(later.saturating_since(earlier), Duration::from_secs(1));
        assert_eq!(earlier.saturating_since(later), Duration::ZERO);
    }
}
