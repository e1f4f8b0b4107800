//! Observable values with poll-based subscriptions
//!
//! The host rendering layer reads device state between ticks. `Observable<T>`
//! gives it a versioned value it can poll without registering callbacks; the
//! version only moves when a writer calls `set`.

use parking_lot::RwLock;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

struct ObservableInner<T> {
    value: RwLock<T>,
    version: AtomicU64,
}

/// A shared value whose changes can be observed by polling.
#[derive(Clone)]
pub struct Observable<T> {
    inner: Arc<ObservableInner<T>>,
}

impl<T: Clone + Send + Sync + 'static> Observable<T> {
    /// Create an observable holding `value` at version 0.
    pub fn new(value: T) -> Self {
        Self {
            inner: Arc::new(ObservableInner {
                value: RwLock::new(value),
                version: AtomicU64::new(0),
            }),
        }
    }

    /// Current value.
    pub fn get(&self) -> T {
        self.inner.value.read().clone()
    }

    /// Number of `set` calls so far.
    pub fn version(&self) -> u64 {
        self.inner.version.load(Ordering::Acquire)
    }

    /// Replace the value and bump the version.
    pub fn set(&self, value: T) {
        *self.inner.value.write() = value;
        self.inner.version.fetch_add(1, Ordering::Release);
    }

    /// Subscribe starting from the current version.
    pub fn subscribe(&self) -> Subscription<T> {
        Subscription {
            source: self.inner.clone(),
            last_version: self.version(),
        }
    }
}

impl<T: Clone + Send + Sync + Default + 'static> Default for Observable<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T: Clone + Send + Sync + fmt::Debug + 'static> fmt::Debug for Observable<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Observable")
            .field("value", &self.get())
            .field("version", &self.version())
            .finish()
    }
}

/// A polling handle on an [`Observable`].
pub struct Subscription<T> {
    source: Arc<ObservableInner<T>>,
    last_version: u64,
}

impl<T: Clone + Send + Sync + 'static> Subscription<T> {
    /// Whether the source was written since the last poll.
    pub fn has_changed(&self) -> bool {
        self.source.version.load(Ordering::Acquire) > self.last_version
    }

    /// Return the value if it changed since the last poll.
    pub fn poll(&mut self) -> Option<T> {
        let current = self.source.version.load(Ordering::Acquire);
        if current > self.last_version {
            self.last_version = current;
            Some(self.source.value.read().clone())
        } else {
            None
        }
    }

    /// Current value regardless of change.
    pub fn get(&self) -> T {
        self.source.value.read().clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_poll_reports_each_write_once() {
        let flag = Observable::new(false);
        let mut sub = flag.subscribe();
        assert_eq!(sub.poll(), None);

        flag.set(true);
        assert!(sub.has_changed());
        assert_eq!(sub.poll(), Some(true));
        assert_eq!(sub.poll(), None);
    }

    #[test]
    fn test_clones_share_state() {
        let a = Observable::new(1u32);
        let b = a.clone();
        b.set(7);
        assert_eq!(a.get(), 7);
        assert_eq!(a.version(), 1);
    }
}
