//! Simulated time handler for testing

use conduit_core::effects::{PhysicalTime, PhysicalTimeEffects};
use parking_lot::Mutex;
use std::sync::Arc;
use std::time::Duration;

/// Manually advanced clock. Clones share the same time.
#[derive(Debug, Clone)]
pub struct SimulatedClock {
    /// Current simulated time in milliseconds
    current_ms: Arc<Mutex<u64>>,
}

impl SimulatedClock {
    /// Create a clock starting at `start_ms`
    pub fn new(start_ms: u64) -> Self {
        Self {
            current_ms: Arc::new(Mutex::new(start_ms)),
        }
    }

    /// Create a clock starting at zero
    pub fn new_at_epoch() -> Self {
        Self::new(0)
    }

    /// Advance by `duration`
    pub fn advance(&self, duration: Duration) {
        self.advance_ms(u64::try_from(duration.as_millis()).unwrap_or(u64::MAX));
    }

    /// Advance by `ms` milliseconds
    pub fn advance_ms(&self, ms: u64) {
        let mut now = self.current_ms.lock();
        *now = now.saturating_add(ms);
    }

    /// Jump to an absolute time
    pub fn set_time_ms(&self, ms: u64) {
        *self.current_ms.lock() = ms;
    }

    /// Current time in milliseconds
    pub fn now_ms(&self) -> u64 {
        *self.current_ms.lock()
    }
}

impl Default for SimulatedClock {
    fn default() -> Self {
        Self::new_at_epoch()
    }
}

impl PhysicalTimeEffects for SimulatedClock {
    fn physical_time(&self) -> PhysicalTime {
        PhysicalTime::from_millis(self.now_ms())
    }
}
