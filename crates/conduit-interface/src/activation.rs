//! Activation state machine
//!
//! A device samples "should I be active" every tick. Writing that value to
//! the host unconditionally would re-render the device twenty times a second,
//! so the machine keeps the last committed value and only notifies its sink
//! when a sample disagrees with it. Commit and notification happen in the
//! same call; there is no point at which one has happened without the other.

use conduit_core::{Observable, Subscription};
use tracing::debug;

/// Committed activation state of a device.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActivationState {
    /// Attached, last committed value `false`
    Inactive,
    /// Attached, last committed value `true`
    Active,
    /// Removed from the world; samples are ignored and nothing is emitted.
    /// The host keeps showing the last committed value.
    Detached,
}

impl ActivationState {
    /// Whether this state exposes an active flag to the host.
    pub fn is_active(self) -> bool {
        self == ActivationState::Active
    }
}

/// A committed flip of the active flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    /// State before the flip
    pub from: ActivationState,
    /// State after the flip
    pub to: ActivationState,
}

/// Source of the per-tick "should be active" sample.
pub trait ConnectivitySampler {
    /// Current truth value, or `None` when it cannot be determined (for
    /// example before the device is attached).
    fn sample(&self) -> Option<bool>;
}

/// Receives the committed active flag whenever it changes.
pub trait ActivenessSink {
    /// Called exactly once per committed flip.
    fn activeness_changed(&mut self, active: bool);
}

impl<F: FnMut(bool)> ActivenessSink for F {
    fn activeness_changed(&mut self, active: bool) {
        self(active);
    }
}

/// Sink that publishes the flag as a pollable observable, e.g. for a
/// "powered" block property.
#[derive(Debug, Clone)]
pub struct ActiveSignal(Observable<bool>);

impl ActiveSignal {
    /// Start inactive.
    pub fn new() -> Self {
        Self(Observable::new(false))
    }

    /// The underlying observable, for host subscriptions.
    pub fn observable(&self) -> &Observable<bool> {
        &self.0
    }

    /// Subscribe to future flips.
    pub fn subscribe(&self) -> Subscription<bool> {
        self.0.subscribe()
    }

    /// Last published value.
    pub fn get(&self) -> bool {
        self.0.get()
    }

    /// Number of values published so far.
    pub fn writes(&self) -> u64 {
        self.0.version()
    }
}

impl Default for ActiveSignal {
    fn default() -> Self {
        Self::new()
    }
}

impl ActivenessSink for ActiveSignal {
    fn activeness_changed(&mut self, active: bool) {
        self.0.set(active);
    }
}

/// Debounces sampled connectivity into committed transitions.
///
/// The committed flag is the value the sink last received. It survives a
/// detach, so a device placed again only notifies when its first sample
/// disagrees with what the host is still showing.
#[derive(Debug, Clone)]
pub struct ActivationStateMachine {
    committed: bool,
    attached: bool,
    transitions: u64,
}

impl ActivationStateMachine {
    /// A machine in the initial `Inactive` state.
    pub fn new() -> Self {
        Self {
            committed: false,
            attached: true,
            transitions: 0,
        }
    }

    /// Current committed state.
    pub fn state(&self) -> ActivationState {
        match (self.attached, self.committed) {
            (false, _) => ActivationState::Detached,
            (true, true) => ActivationState::Active,
            (true, false) => ActivationState::Inactive,
        }
    }

    /// Whether the machine is attached with a committed flag of `true`.
    pub fn is_active(&self) -> bool {
        self.state().is_active()
    }

    /// Value the sink last received, kept across detach.
    pub fn last_committed(&self) -> bool {
        self.committed
    }

    /// Number of transitions committed over the machine's lifetime.
    pub fn transitions(&self) -> u64 {
        self.transitions
    }

    /// Compare `sample` with the committed flag and commit a flip if they
    /// differ. A missing sample counts as `false`.
    pub fn evaluate<S>(&mut self, sample: Option<bool>, sink: &mut S) -> Option<Transition>
    where
        S: ActivenessSink + ?Sized,
    {
        if !self.attached {
            return None;
        }

        let target = sample.unwrap_or(false);
        if target == self.committed {
            return None;
        }

        let from = self.state();
        self.committed = target;
        self.transitions += 1;
        sink.activeness_changed(target);
        let transition = Transition {
            from,
            to: self.state(),
        };
        debug!(from = ?transition.from, to = ?transition.to, "activation changed");
        Some(transition)
    }

    /// Sample `sampler` and evaluate the result.
    pub fn poll<C, S>(&mut self, sampler: &C, sink: &mut S) -> Option<Transition>
    where
        C: ConnectivitySampler + ?Sized,
        S: ActivenessSink + ?Sized,
    {
        if !self.attached {
            return None;
        }
        self.evaluate(sampler.sample(), sink)
    }

    /// Resume after (re)attachment from the last committed flag.
    pub fn attach(&mut self) {
        self.attached = true;
    }

    /// Tear down. No notification is emitted and the committed flag is kept.
    pub fn detach(&mut self) {
        self.attached = false;
    }
}

impl Default for ActivationStateMachine {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_inactive() {
        let machine = ActivationStateMachine::new();
        assert_eq!(machine.state(), ActivationState::Inactive);
        assert!(!machine.is_active());
    }

    #[test]
    fn test_repeated_equal_samples_emit_once() {
        let mut machine = ActivationStateMachine::new();
        let mut seen = Vec::new();
        let mut sink = |active: bool| seen.push(active);

        for _ in 0..20 {
            machine.evaluate(Some(true), &mut sink);
        }
        for _ in 0..20 {
            machine.evaluate(Some(false), &mut sink);
        }
        assert_eq!(seen, vec![true, false]);
        assert_eq!(machine.transitions(), 2);
    }

    #[test]
    fn test_missing_sample_counts_as_inactive() {
        let mut machine = ActivationStateMachine::new();
        let mut signal = ActiveSignal::new();

        assert_eq!(machine.evaluate(None, &mut signal), None);
        machine.evaluate(Some(true), &mut signal);
        let transition = machine.evaluate(None, &mut signal).map(|t| t.to);
        assert_eq!(transition, Some(ActivationState::Inactive));
        assert!(!signal.get());
        assert_eq!(signal.writes(), 2);
    }

    #[test]
    fn test_detached_machine_ignores_samples() {
        let mut machine = ActivationStateMachine::new();
        let mut signal = ActiveSignal::new();
        machine.evaluate(Some(true), &mut signal);

        machine.detach();
        assert_eq!(machine.evaluate(Some(false), &mut signal), None);
        assert_eq!(machine.evaluate(Some(true), &mut signal), None);
        assert_eq!(machine.state(), ActivationState::Detached);
        assert_eq!(signal.writes(), 1);
    }

    #[test]
    fn test_reattach_on_fresh_machine_starts_inactive() {
        let mut machine = ActivationStateMachine::new();
        let mut sink = |_: bool| {};
        machine.detach();
        machine.attach();
        assert_eq!(machine.state(), ActivationState::Inactive);
        assert!(machine.evaluate(Some(true), &mut sink).is_some());
    }

    #[test]
    fn test_reattach_with_same_sample_stays_silent() {
        let mut machine = ActivationStateMachine::new();
        let mut signal = ActiveSignal::new();
        machine.evaluate(Some(true), &mut signal);

        machine.detach();
        assert!(machine.last_committed());
        machine.attach();
        assert_eq!(machine.state(), ActivationState::Active);
        assert_eq!(machine.evaluate(Some(true), &mut signal), None);
        assert_eq!(signal.writes(), 1);
    }

    #[test]
    fn test_reattach_without_peer_clears_host_flag() {
        let mut machine = ActivationStateMachine::new();
        let mut signal = ActiveSignal::new();
        machine.evaluate(Some(true), &mut signal);
        machine.detach();
        machine.attach();

        let transition = machine.evaluate(Some(false), &mut signal);
        assert_eq!(
            transition,
            Some(Transition {
                from: ActivationState::Active,
                to: ActivationState::Inactive,
            })
        );
        assert!(!signal.get());
        assert_eq!(signal.get(), machine.is_active());
        assert_eq!(signal.writes(), 2);
    }

    #[test]
    fn test_poll_uses_sampler() {
        struct Always(bool);
        impl ConnectivitySampler for Always {
            fn sample(&self) -> Option<bool> {
                Some(self.0)
            }
        }

        let mut machine = ActivationStateMachine::new();
        let mut signal = ActiveSignal::new();
        let transition = machine.poll(&Always(true), &mut signal);
        assert_eq!(
            transition,
            Some(Transition {
                from: ActivationState::Inactive,
                to: ActivationState::Active,
            })
        );
        assert!(signal.get());
    }

    #[test]
    fn test_signal_subscription_sees_each_flip() {
        let mut machine = ActivationStateMachine::new();
        let mut signal = ActiveSignal::new();
        let mut sub = signal.subscribe();

        machine.evaluate(Some(true), &mut signal);
        machine.evaluate(Some(true), &mut signal);
        assert_eq!(sub.poll(), Some(true));
        assert_eq!(sub.poll(), None);
    }
}
