//! Real time handler for production use

use conduit_core::effects::{PhysicalTime, PhysicalTimeEffects};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

/// Wall clock backed by `SystemTime`.
#[derive(Debug, Clone, Copy, Default)]
pub struct RealClock;

impl RealClock {
    /// Create a new real clock
    pub fn new() -> Self {
        Self
    }
}

impl PhysicalTimeEffects for RealClock {
    fn physical_time(&self) -> PhysicalTime {
        let since_epoch = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or(Duration::ZERO);
        PhysicalTime::from_millis(u64::try_from(since_epoch.as_millis()).unwrap_or(u64::MAX))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_real_clock_is_monotonic_enough() {
        let clock = RealClock::new();
        let a = clock.physical_time();
        let b = clock.physical_time();
        assert!(b >= a);
        assert!(a.ts_ms > 0);
    }
}
